use super::*;

/// Tests creating events in an empty store.
///
/// Verifies ids are assigned incrementally and the schedule is stored with the
/// organiser-entered time.
///
/// Expected: Ok with ids 1 and 2
#[tokio::test]
async fn assigns_incrementing_ids() -> Result<(), AppError> {
    let test = TestBuilder::new().build().await.unwrap();
    let store = DataStore::open(test.data_dir()).await?;
    let repo = EventRepository::new(&store);

    let first = repo.create(create_param("First")).await?;
    let second = repo.create(create_param("Second")).await?;

    assert_eq!(first.id, 1);
    assert_eq!(second.id, 2);
    assert!(first.has_time);
    assert_eq!((first.original_hour, first.original_minute), (19, 0));
    assert!(first.create_threads);

    let stored = test.read_events_json().unwrap();
    assert_eq!(stored.as_array().map(|a| a.len()), Some(2));
    assert_eq!(stored[0]["anchor_datetime"], "2025-10-24T19:00:00");
    assert_eq!(stored[1]["title"], "Second");

    Ok(())
}

/// Tests creating an event next to existing records.
///
/// Expected: Ok with id after the highest stored id
#[tokio::test]
async fn continues_after_highest_id() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_event(EventJsonFactory::new(GUILD_ID).id(41).build())
        .build()
        .await
        .unwrap();
    let store = DataStore::open(test.data_dir()).await?;

    let event = EventRepository::new(&store).create(create_param("New")).await?;

    assert_eq!(event.id, 42);

    Ok(())
}

/// Tests creating a TBC event.
///
/// Expected: Ok with no anchor and has_time false
#[tokio::test]
async fn creates_tbc_event() -> Result<(), AppError> {
    let test = TestBuilder::new().build().await.unwrap();
    let store = DataStore::open(test.data_dir()).await?;

    let mut param = create_param("Someday");
    param.schedule = None;
    let event = EventRepository::new(&store).create(param).await?;

    assert!(event.is_tbc());
    assert!(!event.has_time);

    Ok(())
}

/// Tests creating an event when the stored document is JSON but not a list.
///
/// Verifies the unusable document is kept as `.corrupt` instead of being overwritten
/// by the new list.
///
/// Expected: Ok with the new event stored alone and the old document preserved
#[tokio::test]
async fn keeps_wrong_shape_document_aside() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_raw_events(r#"{"title":"Raid night"}"#)
        .build()
        .await
        .unwrap();
    let store = DataStore::open(test.data_dir()).await?;

    let created = EventRepository::new(&store).create(create_param("New")).await?;

    assert_eq!(created.id, 1);
    let kept = std::fs::read_to_string(test.data_dir().join("events.json.corrupt"))?;
    assert_eq!(kept, r#"{"title":"Raid night"}"#);
    let stored = test.read_events_json().unwrap();
    assert_eq!(stored.as_array().map(|a| a.len()), Some(1));
    assert_eq!(stored[0]["title"], "New");

    Ok(())
}
