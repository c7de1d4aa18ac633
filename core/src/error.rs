use thiserror::Error;
use uuid::Uuid;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Validation error: {0}")]
    Validation(String),
    #[error("No sprite registered for clip {0}")]
    MissingMapping(Uuid),
    #[error("Render engine error: {0}")]
    Engine(String),
    #[error("Playback error: {0}")]
    Playback(String),
    #[error("Export already in progress")]
    ExportInProgress,
    #[error("Project error: {0}")]
    Project(String),
    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Runtime error: {0}")]
    Runtime(String),
}
