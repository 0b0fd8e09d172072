//! Cascade service errors.

use reprieve::{DiscountError, TotalsError};
use sqlx::{
    Error,
    error::{DatabaseError, ErrorKind},
};
use thiserror::Error;

use crate::domain::items::records::ItemUuid;

#[derive(Debug, Error)]
pub enum CascadeServiceError {
    #[error("location not found")]
    LocationNotFound,

    /// The item left the unflagged state after it was read. The run was rolled back.
    #[error("item {0} was flagged by another writer during the run")]
    Conflict(ItemUuid),

    #[error(transparent)]
    Discount(#[from] DiscountError),

    #[error(transparent)]
    Totals(#[from] TotalsError),

    #[error("invalid data")]
    InvalidData,

    #[error("storage error")]
    Sql(#[source] Error),
}

impl From<Error> for CascadeServiceError {
    fn from(error: Error) -> Self {
        // the location lookup is the only single-row fetch in a run
        if matches!(error, Error::RowNotFound) {
            return Self::LocationNotFound;
        }

        if matches!(error, Error::ColumnDecode { .. }) {
            return Self::InvalidData;
        }

        match error.as_database_error().map(DatabaseError::kind) {
            Some(ErrorKind::CheckViolation | ErrorKind::NotNullViolation) => Self::InvalidData,
            _ => Self::Sql(error),
        }
    }
}
