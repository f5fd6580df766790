use super::*;

/// Tests reading a guild without stored state.
///
/// Expected: Ok with default (all None)
#[tokio::test]
async fn returns_default_for_unknown_guild() -> Result<(), AppError> {
    let test = TestBuilder::new().build().await.unwrap();
    let store = DataStore::open(test.data_dir()).await?;

    let display = GuildDisplayRepository::new(&store).get(1).await?;

    assert_eq!(display, GuildDisplay::default());

    Ok(())
}

/// Tests reading seeded display state, including string ids.
///
/// Expected: Ok with ids decoded and invalid guild keys ignored
#[tokio::test]
async fn reads_seeded_state() -> Result<(), AppError> {
    let mut document = guild_display_document(vec![(1, display_entry(Some(10), Some(20), None))]);
    document["2"] = json!({ "channel_id": "30" });
    document["not-a-guild"] = json!({ "channel_id": 40 });
    let test = TestBuilder::new()
        .with_guild_display(document)
        .build()
        .await
        .unwrap();
    let store = DataStore::open(test.data_dir()).await?;
    let repo = GuildDisplayRepository::new(&store);

    let all = repo.get_all().await?;

    assert_eq!(all.len(), 2);
    assert_eq!(repo.get(1).await?.message_id, Some(20));
    assert_eq!(repo.get(2).await?.channel_id, Some(30));

    Ok(())
}
