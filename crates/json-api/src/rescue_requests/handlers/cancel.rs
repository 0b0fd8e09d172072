//! Cancel Rescue Request Handler

use salvo::{oapi::extract::PathParam, prelude::*};
use tracing::info;
use uuid::Uuid;

use crate::{
    extensions::*,
    rescue_requests::{errors::into_status_error, models::RescueRequestResponse},
};

/// Cancel Rescue Request Handler
///
/// Withdraws a pending or accepted offer and releases any collector holding it.
#[endpoint(
    tags("rescue-requests"),
    summary = "Cancel Rescue Request",
    responses(
        (status_code = StatusCode::OK, description = "Rescue request cancelled"),
        (status_code = StatusCode::NOT_FOUND, description = "Rescue request not found"),
        (status_code = StatusCode::UNPROCESSABLE_ENTITY, description = "Request can no longer be cancelled"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    uuid: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<RescueRequestResponse>, StatusError> {
    let state = depot.state()?;

    let request = state
        .app
        .rescues
        .cancel(uuid.into_inner().into())
        .await
        .map_err(into_status_error)?;

    info!(rescue_request_uuid = %request.uuid, "rescue request cancelled");

    Ok(Json(request.into()))
}
