//! Rescue Request Index Handler

use salvo::{oapi::extract::QueryParam, prelude::*};
use uuid::Uuid;

use reprieve::RescueStatus;
use reprieve_app::domain::rescues::data::RescueRequestFilter;

use crate::{
    extensions::*,
    rescue_requests::{errors::into_status_error, models::RescueRequestsResponse},
};

/// Rescue Request Index Handler
///
/// Lists rescue requests, newest first. Requests whose items have all been removed from
/// the catalog are left out.
#[endpoint(
    tags("rescue-requests"),
    summary = "List Rescue Requests",
    responses(
        (status_code = StatusCode::OK, description = "Matching rescue requests"),
        (status_code = StatusCode::BAD_REQUEST, description = "Unknown status filter"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    location: QueryParam<Uuid, false>,
    collector: QueryParam<Uuid, false>,
    status: QueryParam<String, false>,
    depot: &mut Depot,
) -> Result<Json<RescueRequestsResponse>, StatusError> {
    let state = depot.state()?;

    let filter = RescueRequestFilter {
        location_uuid: location.into_inner().map(Into::into),
        collector_uuid: collector.into_inner().map(Into::into),
        status: status
            .into_inner()
            .map(|status| status.parse::<RescueStatus>())
            .transpose()
            .or_400("could not parse \"status\" query parameter")?,
    };

    let requests = state
        .app
        .rescues
        .list_rescue_requests(filter)
        .await
        .map_err(into_status_error)?;

    Ok(Json(RescueRequestsResponse {
        rescue_requests: requests.into_iter().map(Into::into).collect(),
    }))
}
