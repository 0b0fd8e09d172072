//! Errors

use salvo::http::StatusError;
use tracing::error;

use reprieve_app::domain::cascade::CascadeServiceError;

pub(crate) fn into_status_error(error: CascadeServiceError) -> StatusError {
    match error {
        CascadeServiceError::LocationNotFound => {
            StatusError::not_found().brief("Location not found")
        }
        CascadeServiceError::Conflict(item) => StatusError::conflict().brief(format!(
            "Item {item} was flagged by a concurrent run, nothing was changed"
        )),
        CascadeServiceError::InvalidData => {
            error!("cascade read inventory it cannot price");

            StatusError::internal_server_error()
        }
        CascadeServiceError::Discount(source) => {
            error!("cascade produced an invalid discount: {source}");

            StatusError::internal_server_error()
        }
        CascadeServiceError::Totals(source) => {
            error!("cascade could not total an offer: {source}");

            StatusError::internal_server_error()
        }
        CascadeServiceError::Sql(source) => {
            error!("failed to run cascade: {source}");

            StatusError::internal_server_error()
        }
    }
}
