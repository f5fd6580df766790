use super::*;

/// Tests creating and updating display state.
///
/// Expected: Ok with state persisted under the guild id
#[tokio::test]
async fn creates_and_updates_entry() -> Result<(), AppError> {
    let test = TestBuilder::new().build().await.unwrap();
    let store = DataStore::open(test.data_dir()).await?;
    let repo = GuildDisplayRepository::new(&store);

    repo.update(5, |display| display.channel_id = Some(50)).await?;
    let display = repo.update(5, |display| display.thread_channel_id = Some(51)).await?;

    assert_eq!(display.channel_id, Some(50));
    assert_eq!(display.thread_channel_id, Some(51));
    assert_eq!(test.read_guild_display_json().unwrap()["5"]["channel_id"], 50);

    Ok(())
}

/// Tests that a message is only recorded for the current display channel.
///
/// Expected: stale channel is ignored, current one recorded
#[tokio::test]
async fn set_message_checks_channel() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_guild_display(guild_display_document(vec![(
            5,
            display_entry(Some(50), None, None),
        )]))
        .build()
        .await
        .unwrap();
    let store = DataStore::open(test.data_dir()).await?;
    let repo = GuildDisplayRepository::new(&store);

    let stale = repo.set_message(5, 49, Some(1)).await?;
    assert_eq!(stale.message_id, None);

    let current = repo.set_message(5, 50, Some(2)).await?;
    assert_eq!(current.message_id, Some(2));

    Ok(())
}

/// Tests updating when the stored document is JSON but not a display map.
///
/// Expected: Ok with the old document preserved as `.corrupt` and the new entry stored
#[tokio::test]
async fn keeps_malformed_document_aside() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_guild_display(json!(["channel", 50]))
        .build()
        .await
        .unwrap();
    let store = DataStore::open(test.data_dir()).await?;
    let repo = GuildDisplayRepository::new(&store);

    let display = repo.update(5, |display| display.channel_id = Some(60)).await?;

    assert_eq!(display.channel_id, Some(60));
    assert!(test.file_exists("guild_display.json.corrupt"));
    let kept = std::fs::read_to_string(test.data_dir().join("guild_display.json.corrupt"))?;
    assert_eq!(serde_json::from_str::<serde_json::Value>(&kept).unwrap(), json!(["channel", 50]));
    assert_eq!(test.read_guild_display_json().unwrap()["5"]["channel_id"], 60);

    Ok(())
}
