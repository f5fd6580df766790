use dioxus_logger::tracing;

use crate::{
    config::Config,
    data::{event::EventRepository, DataStore},
    error::AppError,
};

/// Opens the data store and brings the event document up to date.
///
/// Legacy and inconsistent records are repaired while decoding; running an empty
/// modification persists those repairs once at startup instead of on the first command.
///
/// # Arguments
/// - `config` - Application configuration containing the data directory
///
/// # Returns
/// - `Ok(DataStore)` - Store ready for use
/// - `Err(AppError)` - The directory or the event document could not be read or written
pub async fn open_store(config: &Config) -> Result<DataStore, AppError> {
    let store = DataStore::open(&config.data_dir).await?;

    let count = EventRepository::new(&store)
        .modify(|events| Ok(events.len()))
        .await?;

    tracing::info!(
        "Loaded {} events from {}",
        count,
        config.data_dir.display()
    );

    Ok(store)
}
