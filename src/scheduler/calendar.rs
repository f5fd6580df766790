use chrono::Utc;
use dioxus_logger::tracing;
use tokio_cron_scheduler::{Job, JobScheduler};

use crate::{config::Config, error::AppError, state::AppState};

/// Starts the calendar scheduler
///
/// Runs one cleanup sweep immediately, then schedules:
/// - The thread pass, opening discussion threads for upcoming occurrences
/// - The cleanup sweep, removing past events and stale occurrence threads
///
/// Job failures are logged and never stop the scheduler.
///
/// # Arguments
/// - `state`: Shared application state
/// - `config`: Provides the cron expressions of both jobs
///
/// # Returns
/// - `Ok(JobScheduler)`: The running scheduler, to be shut down on exit
/// - `Err(AppError::SchedulerErr)`: A cron expression was invalid or the scheduler failed
pub async fn start_scheduler(state: AppState, config: &Config) -> Result<JobScheduler, AppError> {
    run_cleanup(&state).await;

    let scheduler = JobScheduler::new().await?;

    let thread_state = state.clone();
    let thread_job = Job::new_async(config.thread_schedule.as_str(), move |_uuid, _lock| {
        let state = thread_state.clone();

        Box::pin(async move {
            run_thread_pass(&state).await;
        })
    })?;

    let cleanup_state = state.clone();
    let cleanup_job = Job::new_async(config.cleanup_schedule.as_str(), move |_uuid, _lock| {
        let state = cleanup_state.clone();

        Box::pin(async move {
            run_cleanup(&state).await;
        })
    })?;

    scheduler.add(thread_job).await?;
    scheduler.add(cleanup_job).await?;
    scheduler.start().await?;

    tracing::info!(
        "Calendar scheduler started (threads: '{}', cleanup: '{}')",
        config.thread_schedule,
        config.cleanup_schedule
    );

    Ok(scheduler)
}

async fn run_thread_pass(state: &AppState) {
    if let Err(e) = state.thread_service().run(Utc::now()).await {
        tracing::error!("Error running thread pass: {}", e);
    }
}

async fn run_cleanup(state: &AppState) {
    if let Err(e) = state.cleanup_service().run(Utc::now()).await {
        tracing::error!("Error running cleanup: {}", e);
    }
}
