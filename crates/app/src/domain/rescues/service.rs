//! Rescue requests service.

use std::time::Duration;

use async_trait::async_trait;
use jiff::Timestamp;
use mockall::automock;
use reprieve::{RescueStatus, RescueTransition};
use tracing::{info, warn};

use crate::{
    database::Db,
    domain::rescues::{
        data::{Claim, RescueRequestFilter},
        errors::RescueRequestsServiceError,
        records::{RescueRequestRecord, RescueRequestUuid},
        repository::PgRescueRequestsRepository,
    },
};

#[derive(Debug, Clone)]
pub struct PgRescueRequestsService {
    db: Db,
    repository: PgRescueRequestsRepository,
    claim_timeout: Duration,
}

impl PgRescueRequestsService {
    /// `claim_timeout` bounds how long an accept may wait on a contended row before it
    /// gives up with [`RescueRequestsServiceError::TimedOut`].
    #[must_use]
    pub fn new(db: Db, claim_timeout: Duration) -> Self {
        Self {
            db,
            repository: PgRescueRequestsRepository::new(),
            claim_timeout,
        }
    }
}

/// Explain why a guarded update matched no row, given the status read back afterwards.
fn rejection(
    current: Option<RescueStatus>,
    transition: RescueTransition,
) -> RescueRequestsServiceError {
    let Some(current) = current else {
        return RescueRequestsServiceError::NotFound;
    };

    if transition == RescueTransition::Accept
        && matches!(current, RescueStatus::Accepted | RescueStatus::InProgress)
    {
        return RescueRequestsServiceError::Conflict { current };
    }

    match current.transition(transition) {
        Err(invalid) => invalid.into(),
        // status moved between the update and the read
        Ok(_) => RescueRequestsServiceError::Conflict { current },
    }
}

#[async_trait]
impl RescueRequestsService for PgRescueRequestsService {
    async fn get_rescue_request(
        &self,
        request: RescueRequestUuid,
    ) -> Result<RescueRequestRecord, RescueRequestsServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let record = self.repository.get_rescue_request(&mut tx, request).await?;

        tx.commit().await?;

        if record.items.is_empty() {
            return Err(RescueRequestsServiceError::NotFound);
        }

        Ok(record)
    }

    #[tracing::instrument(
        name = "rescue_requests.service.list_rescue_requests",
        skip(self),
        fields(returned = tracing::field::Empty, dropped = tracing::field::Empty),
        err
    )]
    async fn list_rescue_requests(
        &self,
        filter: RescueRequestFilter,
    ) -> Result<Vec<RescueRequestRecord>, RescueRequestsServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let records = self.repository.list_rescue_requests(&mut tx, filter).await?;

        tx.commit().await?;

        let total = records.len();

        let resolvable: Vec<RescueRequestRecord> = records
            .into_iter()
            .filter(|record| {
                if record.items.is_empty() {
                    warn!(
                        rescue_request_uuid = %record.uuid,
                        "skipping rescue request whose items no longer exist"
                    );

                    return false;
                }

                true
            })
            .collect();

        let span = tracing::Span::current();

        span.record("returned", resolvable.len());
        span.record("dropped", total - resolvable.len());

        Ok(resolvable)
    }

    #[tracing::instrument(
        name = "rescue_requests.service.accept",
        skip(self, claim),
        fields(
            rescue_request_uuid = %request,
            collector_uuid = %claim.collector_uuid,
            scheduled_pickup_at = %claim.scheduled_pickup_at
        ),
        err
    )]
    async fn accept(
        &self,
        request: RescueRequestUuid,
        claim: Claim,
        now: Timestamp,
    ) -> Result<RescueRequestRecord, RescueRequestsServiceError> {
        if claim.scheduled_pickup_at <= now {
            return Err(RescueRequestsServiceError::InvalidPickupTime);
        }

        let mut tx = self.db.begin_claim_transaction(self.claim_timeout).await?;

        let Some(accepted) = self.repository.claim(&mut tx, request, claim).await? else {
            let current = self.repository.get_status(&mut tx, request).await?;

            if current == Some(RescueStatus::Pending)
                && !self
                    .repository
                    .collector_is_active(&mut tx, claim.collector_uuid)
                    .await?
            {
                return Err(RescueRequestsServiceError::CollectorNotFound);
            }

            return Err(rejection(current, RescueTransition::Accept));
        };

        tx.commit().await?;

        info!(
            rescue_request_uuid = %request,
            collector_uuid = %claim.collector_uuid,
            "accepted rescue request"
        );

        Ok(accepted)
    }

    #[tracing::instrument(
        name = "rescue_requests.service.start",
        skip(self),
        fields(rescue_request_uuid = %request),
        err
    )]
    async fn start(
        &self,
        request: RescueRequestUuid,
    ) -> Result<RescueRequestRecord, RescueRequestsServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let Some(started) = self.repository.start(&mut tx, request).await? else {
            let current = self.repository.get_status(&mut tx, request).await?;

            return Err(rejection(current, RescueTransition::Start));
        };

        tx.commit().await?;

        info!(rescue_request_uuid = %request, "started rescue pickup");

        Ok(started)
    }

    #[tracing::instrument(
        name = "rescue_requests.service.complete",
        skip(self),
        fields(rescue_request_uuid = %request),
        err
    )]
    async fn complete(
        &self,
        request: RescueRequestUuid,
        now: Timestamp,
    ) -> Result<RescueRequestRecord, RescueRequestsServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let Some(completed) = self.repository.complete(&mut tx, request, now).await? else {
            let current = self.repository.get_status(&mut tx, request).await?;

            return Err(rejection(current, RescueTransition::Complete));
        };

        tx.commit().await?;

        info!(rescue_request_uuid = %request, "completed rescue pickup");

        Ok(completed)
    }

    #[tracing::instrument(
        name = "rescue_requests.service.cancel",
        skip(self),
        fields(rescue_request_uuid = %request),
        err
    )]
    async fn cancel(
        &self,
        request: RescueRequestUuid,
    ) -> Result<RescueRequestRecord, RescueRequestsServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let Some(cancelled) = self.repository.cancel(&mut tx, request).await? else {
            let current = self.repository.get_status(&mut tx, request).await?;

            return Err(rejection(current, RescueTransition::Cancel));
        };

        tx.commit().await?;

        info!(rescue_request_uuid = %request, "cancelled rescue request");

        Ok(cancelled)
    }
}

#[automock]
#[async_trait]
/// Lifecycle of donation offers, from `pending` to a completed or cancelled pickup.
pub trait RescueRequestsService: Send + Sync {
    /// Retrieve a single request.
    ///
    /// Requests whose items have all been deleted from the catalog are reported as
    /// [`RescueRequestsServiceError::NotFound`].
    async fn get_rescue_request(
        &self,
        request: RescueRequestUuid,
    ) -> Result<RescueRequestRecord, RescueRequestsServiceError>;

    /// Newest first. Requests with no resolvable items are left out.
    async fn list_rescue_requests(
        &self,
        filter: RescueRequestFilter,
    ) -> Result<Vec<RescueRequestRecord>, RescueRequestsServiceError>;

    /// Claim a pending request for a collector.
    ///
    /// At most one accept succeeds per request. A caller that loses the race receives
    /// [`RescueRequestsServiceError::Conflict`] carrying the status it lost to.
    async fn accept(
        &self,
        request: RescueRequestUuid,
        claim: Claim,
        now: Timestamp,
    ) -> Result<RescueRequestRecord, RescueRequestsServiceError>;

    /// Mark an accepted request as being picked up.
    async fn start(
        &self,
        request: RescueRequestUuid,
    ) -> Result<RescueRequestRecord, RescueRequestsServiceError>;

    /// Finish a pickup, stamping `completed_at` with `now`.
    async fn complete(
        &self,
        request: RescueRequestUuid,
        now: Timestamp,
    ) -> Result<RescueRequestRecord, RescueRequestsServiceError>;

    /// Withdraw a pending or accepted request, releasing any collector.
    async fn cancel(
        &self,
        request: RescueRequestUuid,
    ) -> Result<RescueRequestRecord, RescueRequestsServiceError>;
}
