use super::*;

/// Tests moving the summary to another channel.
///
/// Expected: the old message is forgotten so the next refresh posts
#[tokio::test]
async fn moving_display_forgets_message() -> Result<(), AppError> {
    let (_test, store) = open(TestBuilder::new().with_guild_display(display_with(Some(55)))).await?;
    let gateway = Arc::new(MockGateway::new());
    let settings = CalendarSettings::default();
    let service = CalendarService::new(&store, gateway.clone(), &settings);

    let display = service.set_display_channel(GUILD_ID, 11).await?;

    assert_eq!(display.channel_id, Some(11));
    assert_eq!(display.message_id, None);
    assert_eq!(display.thread_channel_id, Some(THREAD_CHANNEL));

    let outcome = service.refresh_display(GUILD_ID, now()).await?;
    assert!(matches!(outcome, DisplayOutcome::Posted(_)));
    assert_eq!(gateway.sent_messages()[0].0, 11);

    Ok(())
}

/// Tests choosing the channel that already shows the summary.
///
/// Expected: the existing message is kept
#[tokio::test]
async fn same_display_channel_keeps_message() -> Result<(), AppError> {
    let (_test, store) = open(TestBuilder::new().with_guild_display(display_with(Some(55)))).await?;
    let settings = CalendarSettings::default();
    let service = CalendarService::new(&store, Arc::new(MockGateway::new()), &settings);

    let display = service.set_display_channel(GUILD_ID, DISPLAY_CHANNEL).await?;

    assert_eq!(display.message_id, Some(55));

    Ok(())
}

/// Tests setting and clearing the thread channel.
///
/// Expected: stored value follows the calls
#[tokio::test]
async fn sets_thread_channel() -> Result<(), AppError> {
    let (test, store) = open(TestBuilder::new()).await?;
    let settings = CalendarSettings::default();
    let service = CalendarService::new(&store, Arc::new(MockGateway::new()), &settings);

    service.set_thread_channel(GUILD_ID, Some(30)).await?;
    assert_eq!(
        test.read_guild_display_json().unwrap()[GUILD_ID.to_string()]["thread_channel_id"],
        30
    );

    let display = service.set_thread_channel(GUILD_ID, None).await?;
    assert_eq!(display.thread_channel_id, None);

    Ok(())
}
