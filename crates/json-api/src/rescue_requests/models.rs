//! Rescue Request Models

use std::string::ToString;

use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use reprieve_app::domain::rescues::records::RescueRequestRecord;

/// Rescue Request Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct RescueRequestResponse {
    /// The unique identifier of the rescue request
    pub uuid: Uuid,

    /// The location offering the stock
    pub location_uuid: Uuid,

    /// The collector holding the claim, if any
    pub collector_uuid: Option<Uuid>,

    /// One of `pending`, `accepted`, `in_progress`, `completed` or `cancelled`
    pub status: String,

    /// The cascade stage that created the offer
    pub stage: u8,

    /// Whole days until expiry when the offer was created
    pub days_until_expiration: i32,

    /// Agreed pickup time
    pub scheduled_pickup_at: Option<String>,

    /// When the pickup finished
    pub completed_at: Option<String>,

    /// Estimated weight of the offered stock, as a decimal string
    pub total_weight_kg: String,

    /// Base-price value of the offered stock, in minor units
    pub total_value: u64,

    /// Estimated waste avoided, as a decimal string
    pub estimated_impact_kg: String,

    /// Offered items still present in the catalog
    pub items: Vec<Uuid>,

    /// The date and time the request was created
    pub created_at: String,

    /// The date and time the request was last updated
    pub updated_at: String,
}

impl From<RescueRequestRecord> for RescueRequestResponse {
    fn from(request: RescueRequestRecord) -> Self {
        Self {
            uuid: request.uuid.into_uuid(),
            location_uuid: request.location_uuid.into_uuid(),
            collector_uuid: request.collector_uuid.map(Into::into),
            status: request.status.to_string(),
            stage: request.stage.number(),
            days_until_expiration: request.days_until_expiration,
            scheduled_pickup_at: request.scheduled_pickup_at.as_ref().map(ToString::to_string),
            completed_at: request.completed_at.as_ref().map(ToString::to_string),
            total_weight_kg: request.total_weight_kg.to_string(),
            total_value: request.total_value,
            estimated_impact_kg: request.estimated_impact_kg.to_string(),
            items: request.items.into_iter().map(Into::into).collect(),
            created_at: request.created_at.to_string(),
            updated_at: request.updated_at.to_string(),
        }
    }
}

/// Rescue Requests Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct RescueRequestsResponse {
    /// Matching requests, newest first
    pub rescue_requests: Vec<RescueRequestResponse>,
}
