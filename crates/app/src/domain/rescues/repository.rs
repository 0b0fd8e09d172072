//! Rescue Requests Repository

use jiff::Timestamp;
use jiff_sqlx::Timestamp as SqlxTimestamp;
use reprieve::{CascadeStage, RescueStatus, RescueTransition};
use rust_decimal::Decimal;
use sqlx::{
    FromRow, Postgres, Row, Transaction,
    postgres::{PgArguments, PgRow},
    query, query::QueryAs, query_as, query_scalar,
};
use uuid::Uuid;

use crate::domain::{
    collectors::records::CollectorUuid,
    columns::{amount_to_i64, column_error, try_get_amount, try_get_parsed},
    items::records::ItemUuid,
    locations::records::LocationUuid,
    rescues::{
        data::{Claim, NewRescueRequest, RescueRequestFilter},
        records::{RescueRequestRecord, RescueRequestUuid},
    },
};

const CREATE_RESCUE_REQUEST_SQL: &str = include_str!("sql/create_rescue_request.sql");
const CREATE_RESCUE_REQUEST_ITEMS_SQL: &str = include_str!("sql/create_rescue_request_items.sql");
const GET_RESCUE_REQUEST_SQL: &str = include_str!("sql/get_rescue_request.sql");
const GET_RESCUE_REQUEST_STATUS_SQL: &str = include_str!("sql/get_rescue_request_status.sql");
const GET_ACTIVE_COLLECTOR_SQL: &str = include_str!("sql/get_active_collector.sql");
const LIST_RESCUE_REQUESTS_SQL: &str = include_str!("sql/list_rescue_requests.sql");
const CLAIM_RESCUE_REQUEST_SQL: &str = include_str!("sql/claim_rescue_request.sql");
const START_RESCUE_REQUEST_SQL: &str = include_str!("sql/start_rescue_request.sql");
const COMPLETE_RESCUE_REQUEST_SQL: &str = include_str!("sql/complete_rescue_request.sql");
const CANCEL_RESCUE_REQUEST_SQL: &str = include_str!("sql/cancel_rescue_request.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgRescueRequestsRepository;

impl PgRescueRequestsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn create_rescue_request(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        request: NewRescueRequest,
    ) -> Result<RescueRequestRecord, sqlx::Error> {
        let total_value = amount_to_i64("total_value", request.totals.total_value)?;

        query(CREATE_RESCUE_REQUEST_SQL)
            .bind(request.uuid.into_uuid())
            .bind(request.location_uuid.into_uuid())
            .bind(i16::from(request.stage.number()))
            .bind(request.days_until_expiration)
            .bind(request.totals.total_weight_kg)
            .bind(total_value)
            .bind(request.totals.estimated_impact_kg)
            .execute(&mut **tx)
            .await?;

        let items: Vec<Uuid> = request.items.iter().map(|item| item.into_uuid()).collect();

        query(CREATE_RESCUE_REQUEST_ITEMS_SQL)
            .bind(request.uuid.into_uuid())
            .bind(items)
            .execute(&mut **tx)
            .await?;

        self.get_rescue_request(tx, request.uuid).await
    }

    pub(crate) async fn get_rescue_request(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        request: RescueRequestUuid,
    ) -> Result<RescueRequestRecord, sqlx::Error> {
        query_as::<Postgres, RescueRequestRecord>(GET_RESCUE_REQUEST_SQL)
            .bind(request.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }

    /// `None` when the request is missing or none of its items survive.
    pub(crate) async fn get_status(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        request: RescueRequestUuid,
    ) -> Result<Option<RescueStatus>, sqlx::Error> {
        let status: Option<String> = query_scalar(GET_RESCUE_REQUEST_STATUS_SQL)
            .bind(request.into_uuid())
            .fetch_optional(&mut **tx)
            .await?;

        status
            .map(|status| status.parse().map_err(|e| column_error("status", e)))
            .transpose()
    }

    /// Whether `collector` exists and has not been soft deleted.
    pub(crate) async fn collector_is_active(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        collector: CollectorUuid,
    ) -> Result<bool, sqlx::Error> {
        query_scalar(GET_ACTIVE_COLLECTOR_SQL)
            .bind(collector.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn list_rescue_requests(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        filter: RescueRequestFilter,
    ) -> Result<Vec<RescueRequestRecord>, sqlx::Error> {
        query_as::<Postgres, RescueRequestRecord>(LIST_RESCUE_REQUESTS_SQL)
            .bind(filter.location_uuid.map(LocationUuid::into_uuid))
            .bind(filter.collector_uuid.map(CollectorUuid::into_uuid))
            .bind(filter.status.map(RescueStatus::as_str))
            .fetch_all(&mut **tx)
            .await
    }

    /// Accept the request for `claim.collector_uuid` if it is still pending.
    ///
    /// Returns `None` when no row matched; the caller decides why. Requests with no
    /// surviving items and soft-deleted collectors never match.
    pub(crate) async fn claim(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        request: RescueRequestUuid,
        claim: Claim,
    ) -> Result<Option<RescueRequestRecord>, sqlx::Error> {
        guarded(CLAIM_RESCUE_REQUEST_SQL, request, RescueTransition::Accept)
            .bind(claim.collector_uuid.into_uuid())
            .bind(SqlxTimestamp::from(claim.scheduled_pickup_at))
            .fetch_optional(&mut **tx)
            .await
    }

    pub(crate) async fn start(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        request: RescueRequestUuid,
    ) -> Result<Option<RescueRequestRecord>, sqlx::Error> {
        guarded(START_RESCUE_REQUEST_SQL, request, RescueTransition::Start)
            .fetch_optional(&mut **tx)
            .await
    }

    pub(crate) async fn complete(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        request: RescueRequestUuid,
        completed_at: Timestamp,
    ) -> Result<Option<RescueRequestRecord>, sqlx::Error> {
        guarded(COMPLETE_RESCUE_REQUEST_SQL, request, RescueTransition::Complete)
            .bind(SqlxTimestamp::from(completed_at))
            .fetch_optional(&mut **tx)
            .await
    }

    pub(crate) async fn cancel(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        request: RescueRequestUuid,
    ) -> Result<Option<RescueRequestRecord>, sqlx::Error> {
        guarded(CANCEL_RESCUE_REQUEST_SQL, request, RescueTransition::Cancel)
            .fetch_optional(&mut **tx)
            .await
    }
}

/// Binds `$1` request, `$2` target status and `$3` the statuses the transition may leave.
fn guarded(
    sql: &str,
    request: RescueRequestUuid,
    transition: RescueTransition,
) -> QueryAs<'_, Postgres, RescueRequestRecord, PgArguments> {
    let sources: Vec<&'static str> = transition
        .sources()
        .iter()
        .map(|status| status.as_str())
        .collect();

    query_as::<Postgres, RescueRequestRecord>(sql)
        .bind(request.into_uuid())
        .bind(transition.target().as_str())
        .bind(sources)
}

impl<'r> FromRow<'r, PgRow> for RescueRequestRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        let stage: i16 = row.try_get("stage")?;
        let stage =
            CascadeStage::try_from(i64::from(stage)).map_err(|e| column_error("stage", e))?;

        let items: Vec<Uuid> = row.try_get("item_uuids")?;

        Ok(Self {
            uuid: RescueRequestUuid::from_uuid(row.try_get("uuid")?),
            location_uuid: LocationUuid::from_uuid(row.try_get("location_uuid")?),
            collector_uuid: row
                .try_get::<Option<Uuid>, _>("collector_uuid")?
                .map(CollectorUuid::from_uuid),
            status: try_get_parsed::<RescueStatus>(row, "status")?,
            stage,
            days_until_expiration: row.try_get("days_until_expiration")?,
            scheduled_pickup_at: row
                .try_get::<Option<SqlxTimestamp>, _>("scheduled_pickup_at")?
                .map(SqlxTimestamp::to_jiff),
            completed_at: row
                .try_get::<Option<SqlxTimestamp>, _>("completed_at")?
                .map(SqlxTimestamp::to_jiff),
            total_weight_kg: row.try_get::<Decimal, _>("total_weight_kg")?,
            total_value: try_get_amount(row, "total_value")?,
            estimated_impact_kg: row.try_get::<Decimal, _>("estimated_impact_kg")?,
            items: items.into_iter().map(ItemUuid::from_uuid).collect(),
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
        })
    }
}
