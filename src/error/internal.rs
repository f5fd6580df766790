use thiserror::Error;

/// Internal issues with the codebase indicating unexpected behavior & possible bugs
#[derive(Error, Debug)]
pub enum InternalError {
    /// A slash command arrived with an option shape the registration never declared.
    #[error("Unexpected command options for /{command}: {reason}")]
    UnexpectedCommandShape { command: String, reason: String },
}
