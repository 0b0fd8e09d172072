//! Errors

use salvo::http::StatusError;
use tracing::error;

use reprieve_app::domain::rescues::RescueRequestsServiceError;

pub(crate) fn into_status_error(error: RescueRequestsServiceError) -> StatusError {
    match error {
        RescueRequestsServiceError::NotFound => {
            StatusError::not_found().brief("Rescue request not found")
        }
        RescueRequestsServiceError::CollectorNotFound => {
            StatusError::not_found().brief("Collector not found")
        }
        RescueRequestsServiceError::Conflict { current } => {
            StatusError::conflict().brief(format!("Rescue request is already {current}"))
        }
        RescueRequestsServiceError::TimedOut => {
            StatusError::conflict().brief("Rescue request is busy, try again")
        }
        RescueRequestsServiceError::InvalidTransition(invalid) => {
            StatusError::unprocessable_entity().brief(invalid.to_string())
        }
        RescueRequestsServiceError::InvalidPickupTime => {
            StatusError::bad_request().brief("scheduled_pickup_at must be in the future")
        }
        RescueRequestsServiceError::InvalidData => {
            StatusError::bad_request().brief("Invalid rescue request data")
        }
        RescueRequestsServiceError::Sql(source) => {
            error!("rescue request storage error: {source}");

            StatusError::internal_server_error()
        }
    }
}
