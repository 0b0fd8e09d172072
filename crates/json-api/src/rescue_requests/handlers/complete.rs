//! Complete Rescue Request Handler

use jiff::Timestamp;
use salvo::{oapi::extract::PathParam, prelude::*};
use tracing::info;
use uuid::Uuid;

use crate::{
    extensions::*,
    rescue_requests::{errors::into_status_error, models::RescueRequestResponse},
};

/// Complete Rescue Request Handler
///
/// Records the pickup as finished. Accepted and in-progress requests may complete.
#[endpoint(
    tags("rescue-requests"),
    summary = "Complete Rescue Request",
    responses(
        (status_code = StatusCode::OK, description = "Pickup completed"),
        (status_code = StatusCode::NOT_FOUND, description = "Rescue request not found"),
        (status_code = StatusCode::UNPROCESSABLE_ENTITY, description = "Request has not been accepted"),
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
        .complete(uuid.into_inner().into(), Timestamp::now())
        .await
        .map_err(into_status_error)?;

    info!(rescue_request_uuid = %request.uuid, "rescue request completed");

    Ok(Json(request.into()))
}
