//! Column conversions shared by the repositories.

use std::{error::Error as StdError, str::FromStr};

use sqlx::{Row, postgres::PgRow};

pub(crate) fn column_error<E>(index: &str, error: E) -> sqlx::Error
where
    E: StdError + Send + Sync + 'static,
{
    sqlx::Error::ColumnDecode {
        index: index.to_string(),
        source: Box::new(error),
    }
}

/// Money is stored as `BIGINT` minor units.
pub(crate) fn try_get_amount(row: &PgRow, index: &str) -> sqlx::Result<u64> {
    let amount: i64 = row.try_get(index)?;

    u64::try_from(amount).map_err(|e| column_error(index, e))
}

pub(crate) fn amount_to_i64(index: &str, amount: u64) -> sqlx::Result<i64> {
    i64::try_from(amount).map_err(|e| column_error(index, e))
}

/// Decode a `TEXT` column through the type's `FromStr`.
pub(crate) fn try_get_parsed<T>(row: &PgRow, index: &str) -> sqlx::Result<T>
where
    T: FromStr,
    T::Err: StdError + Send + Sync + 'static,
{
    let raw: String = row.try_get(index)?;

    raw.parse().map_err(|e| column_error(index, e))
}
