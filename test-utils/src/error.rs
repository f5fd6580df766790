use thiserror::Error;

/// Errors that can occur while preparing or inspecting a test environment.
#[derive(Error, Debug)]
pub enum TestError {
    /// Failed to create the temporary directory or read/write a seeded file.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Failed to serialize seeded data or parse a document written by the code under test.
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}
