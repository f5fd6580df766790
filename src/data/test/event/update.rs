use super::*;

/// Tests updating an event's title.
///
/// Expected: Ok with change persisted
#[tokio::test]
async fn updates_event() -> Result<(), AppError> {
    let test = TestBuilder::new().build().await.unwrap();
    let store = DataStore::open(test.data_dir()).await?;
    let repo = EventRepository::new(&store);
    let created = repo.create(create_param("Old")).await?;

    let (updated, ()) = repo
        .update(GUILD_ID, created.id, |event| {
            event.title = "New".to_string();
            Ok(())
        })
        .await?;

    assert_eq!(updated.title, "New");
    assert_eq!(repo.get_all().await?[0].title, "New");

    Ok(())
}

/// Tests that events of another guild cannot be updated.
///
/// Expected: Err(NotFound)
#[tokio::test]
async fn fails_for_other_guild() -> Result<(), AppError> {
    let test = TestBuilder::new().build().await.unwrap();
    let store = DataStore::open(test.data_dir()).await?;
    let repo = EventRepository::new(&store);
    let created = repo.create(create_param("Mine")).await?;

    let result = repo.update(GUILD_ID + 1, created.id, |_| Ok(())).await;

    assert!(matches!(result, Err(AppError::NotFound(_))));

    Ok(())
}

/// Tests that a failing update leaves the document untouched.
///
/// Expected: Err from the closure and stored title unchanged
#[tokio::test]
async fn failed_update_does_not_write() -> Result<(), AppError> {
    let test = TestBuilder::new().build().await.unwrap();
    let store = DataStore::open(test.data_dir()).await?;
    let repo = EventRepository::new(&store);
    let created = repo.create(create_param("Keep")).await?;

    let result: Result<(_, ()), AppError> = repo
        .update(GUILD_ID, created.id, |event| {
            event.title = "Changed".to_string();
            Err(ValidationError::RecurringWithoutDate.into())
        })
        .await;

    assert!(matches!(
        result,
        Err(AppError::Validation(ValidationError::RecurringWithoutDate))
    ));
    assert_eq!(test.read_events_json().unwrap()[0]["title"], "Keep");

    Ok(())
}
