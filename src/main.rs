mod bot;
mod config;
mod data;
mod discord;
mod error;
mod model;
mod scheduler;
mod service;
mod startup;
mod state;
mod util;

use dioxus_logger::tracing::{self, Level};
use serenity::http::Http;
use std::sync::Arc;

use crate::{
    config::Config, discord::http::HttpGateway, error::AppError,
    scheduler::calendar::start_scheduler, state::AppState,
};

#[tokio::main]
async fn main() -> Result<(), AppError> {
    dotenvy::dotenv().ok();

    if let Err(e) = dioxus_logger::init(Level::INFO) {
        eprintln!("Failed to initialize logger: {}", e);
    }

    let config = Config::from_env()?;
    let store = startup::open_store(&config).await?;

    // Services talk to Discord through their own HTTP client so they work while the
    // gateway connection is still being established.
    let discord_http = Arc::new(Http::new(&config.discord_bot_token));
    let state = AppState::new(
        store,
        Arc::new(HttpGateway::new(discord_http)),
        config.calendar.clone(),
    );

    let bot_client = bot::start::init_bot(&config, state.clone()).await?;
    tokio::spawn(async move {
        if let Err(e) = bot::start::start_bot(bot_client).await {
            tracing::error!("Discord bot error: {}", e);
        }
    });

    let mut scheduler = start_scheduler(state, &config).await?;

    tokio::signal::ctrl_c().await?;
    tracing::info!("Shutting down");

    scheduler.shutdown().await?;

    Ok(())
}
