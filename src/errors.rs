use thiserror::Error;

/// Engine-level faults. Per-item remote failures are never represented here;
/// they are contained inside the run and recorded as `Failed` outcome entries.
#[derive(Debug, Error)]
pub enum MigrationError {
    #[error("Setup error: {message}")]
    Setup { message: String },

    #[error("Verification query failed for {source_id}: {message}")]
    Verification { source_id: String, message: String },
}

impl MigrationError {
    pub fn setup(message: impl Into<String>) -> Self {
        MigrationError::Setup {
            message: message.into(),
        }
    }
}

pub type MigrationResult<T> = Result<T, MigrationError>;
