//! Accept Rescue Request Handler

use jiff::Timestamp;
use salvo::{
    oapi::{
        ToSchema,
        extract::{JsonBody, PathParam},
    },
    prelude::*,
};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use reprieve_app::domain::rescues::{RescueRequestsServiceError, data::Claim};

use crate::{
    extensions::*,
    observability::{ClaimOutcome, observe_claim},
    rescue_requests::{errors::into_status_error, models::RescueRequestResponse},
};

/// Accept Rescue Request Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct AcceptRescueRequest {
    /// The collector claiming the offer
    pub collector_uuid: Uuid,

    /// RFC 3339 pickup time, which must lie in the future
    pub scheduled_pickup_at: String,
}

fn claim_outcome<T>(result: &Result<T, RescueRequestsServiceError>) -> ClaimOutcome {
    match result {
        Ok(_) => ClaimOutcome::Accepted,
        Err(RescueRequestsServiceError::Conflict { .. }) => ClaimOutcome::Conflict,
        Err(RescueRequestsServiceError::TimedOut) => ClaimOutcome::TimedOut,
        Err(_) => ClaimOutcome::Rejected,
    }
}

/// Accept Rescue Request Handler
///
/// Claims a pending offer for a collector. When two collectors race, exactly one wins;
/// the other receives `409` naming the status it lost to.
#[endpoint(
    tags("rescue-requests"),
    summary = "Accept Rescue Request",
    responses(
        (status_code = StatusCode::OK, description = "Claim recorded"),
        (status_code = StatusCode::BAD_REQUEST, description = "Malformed or past pickup time"),
        (status_code = StatusCode::NOT_FOUND, description = "Rescue request or collector not found"),
        (status_code = StatusCode::CONFLICT, description = "Already claimed, or the claim timed out"),
        (status_code = StatusCode::UNPROCESSABLE_ENTITY, description = "Request can no longer be accepted"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    uuid: PathParam<Uuid>,
    json: JsonBody<AcceptRescueRequest>,
    depot: &mut Depot,
) -> Result<Json<RescueRequestResponse>, StatusError> {
    let state = depot.state()?;
    let body = json.into_inner();

    let claim = Claim {
        collector_uuid: body.collector_uuid.into(),
        scheduled_pickup_at: body
            .scheduled_pickup_at
            .parse::<Timestamp>()
            .or_400("could not parse \"scheduled_pickup_at\"")?,
    };

    let result = state
        .app
        .rescues
        .accept(uuid.into_inner().into(), claim, Timestamp::now())
        .await;

    observe_claim(claim_outcome(&result));

    let request = result.map_err(into_status_error)?;

    info!(
        rescue_request_uuid = %request.uuid,
        collector_uuid = %claim.collector_uuid,
        "rescue request accepted"
    );

    Ok(Json(request.into()))
}
