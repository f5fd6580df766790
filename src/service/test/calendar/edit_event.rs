use super::*;

/// Tests editing an event referenced by title, ignoring case.
///
/// Expected: Ok with the new description stored
#[tokio::test]
async fn edits_by_title() -> Result<(), AppError> {
    let (test, store) = open(
        TestBuilder::new().with_event(
            EventJsonFactory::new(GUILD_ID)
                .id(1)
                .title("Raid Night")
                .at("2025-10-24T19:00:00")
                .build(),
        ),
    )
    .await?;
    let settings = CalendarSettings::default();
    let service = CalendarService::new(&store, Arc::new(MockGateway::new()), &settings);

    let event = service
        .edit_event(
            GUILD_ID,
            &EventReference::parse("raid night"),
            UpdateEventParam {
                description: Some(Some("Bring ammo".to_string())),
                ..Default::default()
            },
        )
        .await?;

    assert_eq!(event.description.as_deref(), Some("Bring ammo"));
    assert_eq!(test.read_events_json().unwrap()[0]["description"], "Bring ammo");

    Ok(())
}

/// Tests clearing the date of a recurring event.
///
/// Expected: Err(RecurringWithoutDate) and the file untouched
#[tokio::test]
async fn rejects_recurring_without_date() -> Result<(), AppError> {
    let (test, store) = open(
        TestBuilder::new().with_event(
            EventJsonFactory::new(GUILD_ID)
                .id(1)
                .at("2025-10-03T19:00:00")
                .recurring()
                .build(),
        ),
    )
    .await?;
    let before = test.read_events_json().unwrap();
    let settings = CalendarSettings::default();
    let service = CalendarService::new(&store, Arc::new(MockGateway::new()), &settings);

    let result = service
        .edit_event(
            GUILD_ID,
            &EventReference::Id(1),
            UpdateEventParam {
                date: Some(None),
                ..Default::default()
            },
        )
        .await;

    assert!(matches!(
        result,
        Err(AppError::Validation(ValidationError::RecurringWithoutDate))
    ));
    assert_eq!(test.read_events_json().unwrap(), before);

    Ok(())
}

/// Tests making a one-off event recurring.
///
/// Expected: the single thread is dropped and archived
#[tokio::test]
async fn archives_orphaned_thread_when_made_recurring() -> Result<(), AppError> {
    let (test, store) = open(
        TestBuilder::new().with_event(
            EventJsonFactory::new(GUILD_ID)
                .id(1)
                .at("2025-10-24T19:00:00")
                .thread(77)
                .build(),
        ),
    )
    .await?;
    let gateway = Arc::new(MockGateway::new());
    let settings = CalendarSettings::default();
    let service = CalendarService::new(&store, gateway.clone(), &settings);

    let event = service
        .edit_event(
            GUILD_ID,
            &EventReference::Id(1),
            UpdateEventParam {
                recurring: Some(true),
                ..Default::default()
            },
        )
        .await?;

    assert!(event.recurring);
    assert_eq!(event.thread_id, None);
    assert_eq!(gateway.archived_threads(), vec![77]);
    assert!(test.read_events_json().unwrap()[0]["thread_id"].is_null());

    Ok(())
}

/// Tests a title shared by two events.
///
/// Expected: Err(AmbiguousTitle) listing both ids
#[tokio::test]
async fn rejects_ambiguous_title() -> Result<(), AppError> {
    let (_test, store) = open(
        TestBuilder::new()
            .with_event(EventJsonFactory::new(GUILD_ID).id(1).title("Op").build())
            .with_event(EventJsonFactory::new(GUILD_ID).id(2).title("Op").build()),
    )
    .await?;
    let settings = CalendarSettings::default();
    let service = CalendarService::new(&store, Arc::new(MockGateway::new()), &settings);

    let result = service
        .edit_event(
            GUILD_ID,
            &EventReference::parse("Op"),
            UpdateEventParam {
                title: Some("Renamed".to_string()),
                ..Default::default()
            },
        )
        .await;

    match result {
        Err(AppError::Validation(ValidationError::AmbiguousTitle { ids, .. })) => {
            assert_eq!(ids, "1, 2")
        }
        other => panic!("expected ambiguous title, got {:?}", other.map(|e| e.id)),
    }

    Ok(())
}

/// Tests editing an event of another guild.
///
/// Expected: Err(NotFound)
#[tokio::test]
async fn cannot_edit_other_guild() -> Result<(), AppError> {
    let (_test, store) = open(
        TestBuilder::new().with_event(EventJsonFactory::new(GUILD_ID + 1).id(1).build()),
    )
    .await?;
    let settings = CalendarSettings::default();
    let service = CalendarService::new(&store, Arc::new(MockGateway::new()), &settings);

    let result = service
        .edit_event(
            GUILD_ID,
            &EventReference::Id(1),
            UpdateEventParam {
                title: Some("Mine now".to_string()),
                ..Default::default()
            },
        )
        .await;

    assert!(matches!(result, Err(AppError::NotFound(_))));

    Ok(())
}
