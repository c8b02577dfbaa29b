use thiserror::Error;

/// Errors raised by the team domain, its service and its storage adapters
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TeamError {
    #[error("{0}")]
    InvalidInput(String),

    #[error("No property '{0}' found for type 'Team'")]
    InvalidSortField(String),

    #[error("Persistence error: {0}")]
    Persistence(String),
}

impl From<sqlx::Error> for TeamError {
    fn from(err: sqlx::Error) -> Self {
        TeamError::Persistence(err.to_string())
    }
}

impl From<sqlx::migrate::MigrateError> for TeamError {
    fn from(err: sqlx::migrate::MigrateError) -> Self {
        TeamError::Persistence(err.to_string())
    }
}

pub type TeamResult<T> = Result<T, TeamError>;
