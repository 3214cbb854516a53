use thiserror::Error;

use uuid::Uuid;

use crate::models::ReporterIden;

#[derive(Error, Debug)]
pub enum GeneralError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),
}

/// Rejected submissions. Raised synchronously by the change-set builder,
/// before anything is written or sent.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("missing required fields: {}", .0.join(", "))]
    MissingFields(Vec<&'static str>),

    #[error("cannot target an update without a record identifier")]
    MissingIdentifier,
}

impl ValidationError {
    pub fn missing_fields(&self) -> &[&'static str] {
        match self {
            Self::MissingFields(fields) => fields,
            Self::MissingIdentifier => &[],
        }
    }
}

#[derive(Error, Debug)]
pub enum RecordError {
    #[error("Record with ID {0} not found")]
    NotFound(Uuid),

    #[error("Invalid submission: {0}")]
    Validation(#[from] ValidationError),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

#[derive(Error, Debug)]
pub enum AuthError {
    #[error("Reporter with {0} not found")]
    NotFound(ReporterIden),

    #[error("Reporter with {0} already exists")]
    AlreadyExists(ReporterIden),

    #[error("No active login code for {0}")]
    ChallengeMissing(ReporterIden),

    #[error("Login code has expired")]
    CodeExpired,

    #[error("Login code does not match")]
    CodeMismatch,

    #[error("Too many login attempts, try again later")]
    Throttled,

    #[error("Code hashing failed: {0}")]
    Hashing(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}
