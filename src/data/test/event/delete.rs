use super::*;

/// Tests deleting an event.
///
/// Expected: Ok with the removed event returned and the others kept in order
#[tokio::test]
async fn deletes_event() -> Result<(), AppError> {
    let test = TestBuilder::new().build().await.unwrap();
    let store = DataStore::open(test.data_dir()).await?;
    let repo = EventRepository::new(&store);
    let first = repo.create(create_param("First")).await?;
    let second = repo.create(create_param("Second")).await?;
    let third = repo.create(create_param("Third")).await?;

    let removed = repo.delete(GUILD_ID, second.id).await?;

    assert_eq!(removed.title, "Second");
    let remaining: Vec<u64> = repo.get_all().await?.iter().map(|e| e.id).collect();
    assert_eq!(remaining, vec![first.id, third.id]);

    Ok(())
}

/// Tests deleting an unknown event.
///
/// Expected: Err(NotFound)
#[tokio::test]
async fn fails_for_unknown_event() -> Result<(), AppError> {
    let test = TestBuilder::new().build().await.unwrap();
    let store = DataStore::open(test.data_dir()).await?;

    let result = EventRepository::new(&store).delete(GUILD_ID, 99).await;

    assert!(matches!(result, Err(AppError::NotFound(_))));

    Ok(())
}
