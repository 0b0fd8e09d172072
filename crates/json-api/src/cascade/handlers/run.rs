//! Run Cascade Handler

use std::collections::BTreeMap;

use jiff::Timestamp;
use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use reprieve_app::domain::{cascade::CascadeSummary, locations::records::LocationUuid};

use crate::{cascade::errors::into_status_error, extensions::*, observability::observe_cascade};

/// Run Cascade Request
#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
pub(crate) struct RunCascadeRequest {
    /// Location to scan. Falls back to the server's default location when omitted.
    #[serde(default)]
    pub location_uuid: Option<Uuid>,
}

/// Cascade Run Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CascadeRunResponse {
    /// The location that was scanned
    pub location_uuid: Uuid,

    /// Items flagged per stage, keyed `"1"` to `"4"`
    pub per_stage_counts: BTreeMap<String, usize>,

    /// Candidates read from the inventory snapshot
    pub items_scanned: usize,

    /// Candidates that reached a stage
    pub items_rescued: usize,

    /// Donation offers created
    pub offers_created: usize,
}

impl CascadeRunResponse {
    fn new(location: LocationUuid, summary: &CascadeSummary) -> Self {
        Self {
            location_uuid: location.into_uuid(),
            per_stage_counts: summary
                .per_stage()
                .map(|(stage, count)| (stage.to_string(), count))
                .collect(),
            items_scanned: summary.items_scanned,
            items_rescued: summary.items_rescued,
            offers_created: summary.offers_created,
        }
    }
}

/// Run Cascade Handler
///
/// Classifies the location's unflagged perishable stock and commits every resulting
/// discount, flag and donation offer in one transaction.
#[endpoint(
    tags("cascade"),
    summary = "Run Cascade",
    responses(
        (status_code = StatusCode::OK, description = "Cascade run committed"),
        (status_code = StatusCode::BAD_REQUEST, description = "No location given and no default configured"),
        (status_code = StatusCode::NOT_FOUND, description = "Location not found"),
        (status_code = StatusCode::CONFLICT, description = "Concurrent run flagged an item first"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<RunCascadeRequest>,
    depot: &mut Depot,
) -> Result<Json<CascadeRunResponse>, StatusError> {
    let state = depot.state()?;

    let location = json
        .into_inner()
        .location_uuid
        .map(LocationUuid::from)
        .or(state.default_location)
        .ok_or_else(|| {
            StatusError::bad_request()
                .brief("location_uuid is required when no default location is configured")
        })?;

    let summary = state
        .app
        .cascade
        .run_cascade(location, Timestamp::now())
        .await
        .map_err(into_status_error)?;

    observe_cascade(&summary);

    info!(
        location_uuid = %location,
        items_scanned = summary.items_scanned,
        items_rescued = summary.items_rescued,
        offers_created = summary.offers_created,
        "cascade run committed"
    );

    Ok(Json(CascadeRunResponse::new(location, &summary)))
}
