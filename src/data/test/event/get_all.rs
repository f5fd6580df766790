use super::*;

/// Tests loading when no event document exists yet.
///
/// Expected: Ok with empty list
#[tokio::test]
async fn returns_empty_list_when_missing() -> Result<(), AppError> {
    let test = TestBuilder::new().build().await.unwrap();
    let store = DataStore::open(test.data_dir()).await?;

    let events = EventRepository::new(&store).get_all().await?;

    assert!(events.is_empty());

    Ok(())
}

/// Tests loading a document that is not valid JSON.
///
/// Verifies the corrupt file is moved aside so a later write cannot destroy it.
///
/// Expected: Ok with empty list and `.corrupt` file present
#[tokio::test]
async fn moves_corrupt_document_aside() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_raw_events("[{\"title\": ")
        .build()
        .await
        .unwrap();
    let store = DataStore::open(test.data_dir()).await?;

    let events = EventRepository::new(&store).get_all().await?;

    assert!(events.is_empty());
    assert!(test.file_exists("events.json.corrupt"));
    assert!(!test.file_exists("events.json"));

    Ok(())
}

/// Tests that individually malformed records are skipped.
///
/// Expected: Ok with only the valid record loaded
#[tokio::test]
async fn skips_malformed_records() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_event(EventJsonFactory::new(GUILD_ID).id(1).title("Valid").build())
        .with_event(json!({ "title": "No guild" }))
        .with_event(json!("not an object"))
        .build()
        .await
        .unwrap();
    let store = DataStore::open(test.data_dir()).await?;

    let events = EventRepository::new(&store).get_all().await?;

    assert_eq!(events.len(), 1);
    assert_eq!(events[0].title, "Valid");

    Ok(())
}

/// Tests that legacy records without ids get fresh, unique ids.
///
/// Expected: Ok with ids assigned after the highest existing id
#[tokio::test]
async fn assigns_ids_to_legacy_records() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_event(EventJsonFactory::new(GUILD_ID).id(7).build())
        .with_event(EventJsonFactory::new(GUILD_ID).without_id().build())
        .with_event(EventJsonFactory::new(GUILD_ID).id(7).build())
        .build()
        .await
        .unwrap();
    let store = DataStore::open(test.data_dir()).await?;

    let events = EventRepository::new(&store).get_all().await?;
    let ids: Vec<u64> = events.iter().map(|e| e.id).collect();

    assert_eq!(ids, vec![7, 8, 9]);

    Ok(())
}

/// Tests that repairs made on decode are persisted by the next mutation.
///
/// Expected: stored recurring record without a date becomes non-recurring on disk
#[tokio::test]
async fn persists_repairs_on_next_write() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_event(EventJsonFactory::new(GUILD_ID).id(1).recurring().build())
        .build()
        .await
        .unwrap();
    let store = DataStore::open(test.data_dir()).await?;
    let repo = EventRepository::new(&store);

    repo.modify(|_| Ok(())).await?;

    let stored = test.read_events_json().unwrap();
    assert_eq!(stored[0]["recurring"], false);

    Ok(())
}

/// Tests that saving then loading yields the identical ordered list.
///
/// Expected: Ok with field-for-field equal events
#[tokio::test]
async fn round_trips_events() -> Result<(), AppError> {
    let test = TestBuilder::new().build().await.unwrap();
    let store = DataStore::open(test.data_dir()).await?;
    let repo = EventRepository::new(&store);

    let first = repo.create(create_param("First")).await?;
    let mut weekly = create_param("Weekly");
    weekly.recurring = true;
    weekly.description = Some("Bring snacks".to_string());
    let second = repo.create(weekly).await?;
    repo.record_thread(second.id, date(2025, 10, 31), 555).await?;

    let reopened = DataStore::open(test.data_dir()).await?;
    let loaded = EventRepository::new(&reopened).get_all().await?;

    assert_eq!(loaded.len(), 2);
    assert_eq!(loaded[0], first);
    assert_eq!(loaded[1].title, "Weekly");
    assert_eq!(loaded[1].thread_info.get(&date(2025, 10, 31)), Some(&555));
    assert_eq!(loaded, repo.get_all().await?);

    Ok(())
}
