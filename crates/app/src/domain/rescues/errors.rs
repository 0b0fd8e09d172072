//! Rescue requests service errors.

use reprieve::{InvalidTransition, RescueStatus};
use sqlx::{
    Error,
    error::{DatabaseError, ErrorKind},
};
use thiserror::Error;

use crate::database::is_statement_timeout;

#[derive(Debug, Error)]
pub enum RescueRequestsServiceError {
    #[error("rescue request not found")]
    NotFound,

    /// Another collector claimed the request first.
    #[error("rescue request has already been claimed and is {current}")]
    Conflict { current: RescueStatus },

    #[error(transparent)]
    InvalidTransition(#[from] InvalidTransition),

    #[error("collector not found")]
    CollectorNotFound,

    #[error("scheduled pickup must be in the future")]
    InvalidPickupTime,

    /// The claim did not finish within the configured timeout. Nothing was changed.
    #[error("claim timed out")]
    TimedOut,

    #[error("invalid data")]
    InvalidData,

    #[error("storage error")]
    Sql(#[source] Error),
}

impl From<Error> for RescueRequestsServiceError {
    fn from(error: Error) -> Self {
        if matches!(error, Error::RowNotFound) {
            return Self::NotFound;
        }

        if matches!(error, Error::ColumnDecode { .. }) {
            return Self::InvalidData;
        }

        if is_statement_timeout(&error) {
            return Self::TimedOut;
        }

        match error.as_database_error().map(DatabaseError::kind) {
            // collector_uuid is the only reference a transition can write
            Some(ErrorKind::ForeignKeyViolation) => Self::CollectorNotFound,
            Some(ErrorKind::CheckViolation | ErrorKind::NotNullViolation) => Self::InvalidData,
            _ => Self::Sql(error),
        }
    }
}
