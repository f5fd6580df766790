use super::*;

/// Tests recording a thread for a one-off event.
///
/// Expected: Recorded, then AlreadyRecorded for a second thread
#[tokio::test]
async fn records_single_thread_once() -> Result<(), AppError> {
    let test = TestBuilder::new().build().await.unwrap();
    let store = DataStore::open(test.data_dir()).await?;
    let repo = EventRepository::new(&store);
    let event = repo.create(create_param("Op")).await?;

    let first = repo.record_thread(event.id, date(2025, 10, 24), 11).await?;
    let second = repo.record_thread(event.id, date(2025, 10, 24), 12).await?;

    assert_eq!(first, ThreadRecord::Recorded);
    assert_eq!(second, ThreadRecord::AlreadyRecorded(11));
    assert_eq!(repo.get_all().await?[0].thread_id, Some(11));

    Ok(())
}

/// Tests recording threads for several occurrences of a recurring event.
///
/// Expected: one thread_info entry per date
#[tokio::test]
async fn records_thread_per_occurrence() -> Result<(), AppError> {
    let test = TestBuilder::new().build().await.unwrap();
    let store = DataStore::open(test.data_dir()).await?;
    let repo = EventRepository::new(&store);
    let mut param = create_param("Weekly");
    param.recurring = true;
    let event = repo.create(param).await?;

    repo.record_thread(event.id, date(2025, 10, 24), 1).await?;
    repo.record_thread(event.id, date(2025, 10, 31), 2).await?;

    let stored = &repo.get_all().await?[0];
    assert_eq!(stored.thread_info.len(), 2);
    assert_eq!(stored.thread_id, None);
    assert_eq!(test.read_events_json().unwrap()[0]["thread_info"]["2025-10-31"], 2);

    Ok(())
}

/// Tests recording a thread for an event that went away.
///
/// Expected: EventGone for removed events and for one-off events moved to another date
#[tokio::test]
async fn reports_event_gone() -> Result<(), AppError> {
    let test = TestBuilder::new().build().await.unwrap();
    let store = DataStore::open(test.data_dir()).await?;
    let repo = EventRepository::new(&store);
    let event = repo.create(create_param("Moved")).await?;

    let moved = repo.record_thread(event.id, date(2025, 10, 25), 3).await?;
    let missing = repo.record_thread(event.id + 100, date(2025, 10, 24), 4).await?;

    assert_eq!(moved, ThreadRecord::EventGone);
    assert_eq!(missing, ThreadRecord::EventGone);
    assert_eq!(repo.get_all().await?[0].thread_id, None);

    Ok(())
}
