//! Get Rescue Request Handler

use salvo::{oapi::extract::PathParam, prelude::*};
use uuid::Uuid;

use crate::{
    extensions::*,
    rescue_requests::{errors::into_status_error, models::RescueRequestResponse},
};

/// Get Rescue Request Handler
#[endpoint(
    tags("rescue-requests"),
    summary = "Get Rescue Request",
    responses(
        (status_code = StatusCode::OK, description = "The rescue request"),
        (status_code = StatusCode::NOT_FOUND, description = "Rescue request not found"),
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
        .get_rescue_request(uuid.into_inner().into())
        .await
        .map_err(into_status_error)?;

    Ok(Json(request.into()))
}
