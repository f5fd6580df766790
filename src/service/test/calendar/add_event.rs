use super::*;

/// Tests adding a dated event.
///
/// Expected: Ok with id 1, stored with trimmed title
#[tokio::test]
async fn adds_event() -> Result<(), AppError> {
    let (test, store) = open(TestBuilder::new()).await?;
    let settings = CalendarSettings::default();
    let service = CalendarService::new(&store, Arc::new(MockGateway::new()), &settings);

    let event = service.add_event(create_param("  Fleet op ")).await?;

    assert_eq!(event.id, 1);
    assert_eq!(event.title, "Fleet op");
    let stored = test.read_events_json().unwrap();
    assert_eq!(stored[0]["title"], "Fleet op");
    assert_eq!(stored[0]["anchor_datetime"], "2025-10-24T19:00:00");

    Ok(())
}

/// Tests adding a recurring event without a date.
///
/// Expected: Err(RecurringWithoutDate) and no file written
#[tokio::test]
async fn rejects_recurring_without_date() -> Result<(), AppError> {
    let (test, store) = open(TestBuilder::new()).await?;
    let settings = CalendarSettings::default();
    let service = CalendarService::new(&store, Arc::new(MockGateway::new()), &settings);

    let result = service
        .add_event(CreateEventParam {
            schedule: None,
            recurring: true,
            ..create_param("Weekly")
        })
        .await;

    assert!(matches!(
        result,
        Err(AppError::Validation(ValidationError::RecurringWithoutDate))
    ));
    assert!(!test.file_exists(test_utils::EVENTS_FILE));

    Ok(())
}

/// Tests adding an event with a blank title.
///
/// Expected: Err(EmptyTitle)
#[tokio::test]
async fn rejects_blank_title() -> Result<(), AppError> {
    let (_test, store) = open(TestBuilder::new()).await?;
    let settings = CalendarSettings::default();
    let service = CalendarService::new(&store, Arc::new(MockGateway::new()), &settings);

    let result = service.add_event(create_param("   ")).await;

    assert!(matches!(
        result,
        Err(AppError::Validation(ValidationError::EmptyTitle))
    ));

    Ok(())
}

/// Tests adding a TBC event.
///
/// Expected: Ok with no anchor stored
#[tokio::test]
async fn adds_tbc_event() -> Result<(), AppError> {
    let (test, store) = open(TestBuilder::new()).await?;
    let settings = CalendarSettings::default();
    let service = CalendarService::new(&store, Arc::new(MockGateway::new()), &settings);

    let event = service
        .add_event(CreateEventParam {
            schedule: None,
            ..create_param("Someday")
        })
        .await?;

    assert!(event.is_tbc());
    assert!(test.read_events_json().unwrap()[0]["anchor_datetime"].is_null());

    Ok(())
}
