//! Cascade service.

use std::sync::Arc;

use async_trait::async_trait;
use jiff::Timestamp;
use mockall::automock;
use reprieve::CategoryHeuristics;
use tracing::{Span, debug, info};

use crate::{
    database::Db,
    domain::{
        cascade::{
            errors::CascadeServiceError, inventory::PgInventoryRepository, plan::plan_item,
            summary::CascadeSummary,
        },
        locations::{records::LocationUuid, repository::PgLocationsRepository},
        rescues::repository::PgRescueRequestsRepository,
    },
};

#[derive(Debug, Clone)]
pub struct PgCascadeService {
    db: Db,
    locations: PgLocationsRepository,
    inventory: PgInventoryRepository,
    rescues: PgRescueRequestsRepository,
    heuristics: Arc<CategoryHeuristics>,
}

impl PgCascadeService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            locations: PgLocationsRepository::new(),
            inventory: PgInventoryRepository::new(),
            rescues: PgRescueRequestsRepository::new(),
            heuristics: Arc::new(CategoryHeuristics::default()),
        }
    }

    /// Size donation offers with `heuristics` instead of the default table.
    #[must_use]
    pub fn with_heuristics(mut self, heuristics: CategoryHeuristics) -> Self {
        self.heuristics = Arc::new(heuristics);
        self
    }
}

#[async_trait]
impl CascadeService for PgCascadeService {
    #[tracing::instrument(
        name = "cascade.service.run_cascade",
        skip(self),
        fields(
            location_uuid = %location,
            items_scanned = tracing::field::Empty,
            items_rescued = tracing::field::Empty,
            offers_created = tracing::field::Empty
        ),
        err
    )]
    async fn run_cascade(
        &self,
        location: LocationUuid,
        now: Timestamp,
    ) -> Result<CascadeSummary, CascadeServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        self.locations.get_location(&mut tx, location).await?;

        let snapshot = self.inventory.snapshot(&mut tx, location).await?;

        let mut summary = CascadeSummary::scanned(snapshot.len());

        for item in &snapshot {
            let Some(plan) = plan_item(item, now, &self.heuristics)? else {
                continue;
            };

            let flagged = self.inventory.flag_item(&mut tx, plan.flag).await?;

            if flagged == 0 {
                return Err(CascadeServiceError::Conflict(item.uuid));
            }

            let created_offer = plan.offer.is_some();

            if let Some(offer) = plan.offer {
                let request = self.rescues.create_rescue_request(&mut tx, offer).await?;

                debug!(
                    item_uuid = %item.uuid,
                    rescue_request_uuid = %request.uuid,
                    "created rescue request"
                );
            }

            debug!(
                item_uuid = %item.uuid,
                stage = %plan.stage,
                rescue_state = %plan.flag.rescue_state,
                "flagged item"
            );

            summary.record(plan.stage, created_offer);
        }

        tx.commit().await?;

        let span = Span::current();

        span.record("items_scanned", summary.items_scanned);
        span.record("items_rescued", summary.items_rescued);
        span.record("offers_created", summary.offers_created);

        info!(
            location_uuid = %location,
            items_scanned = summary.items_scanned,
            items_rescued = summary.items_rescued,
            offers_created = summary.offers_created,
            "completed cascade run"
        );

        Ok(summary)
    }
}

#[automock]
#[async_trait]
/// Runs the rescue cascade over a location's perishable stock.
pub trait CascadeService: Send + Sync {
    /// Classify every unflagged, in-stock item with a known expiry at `location` as of
    /// `now`, and commit the resulting flags and donation offers together.
    ///
    /// Any failure rolls the whole run back. Items flagged by an earlier run are never
    /// revisited.
    async fn run_cascade(
        &self,
        location: LocationUuid,
        now: Timestamp,
    ) -> Result<CascadeSummary, CascadeServiceError>;
}

#[cfg(test)]
mod tests {
    use jiff::SignedDuration;
    use reprieve::{
        CascadeStage, Category, DiscountPercent, RescueState, RescueStatus, UnitHeuristic,
    };
    use rust_decimal::Decimal;
    use testresult::TestResult;

    use crate::{
        domain::{
            items::{ItemsService, ItemsServiceError},
            rescues::{
                RescueRequestsService, RescueRequestsServiceError,
                data::{Claim, RescueRequestFilter},
            },
        },
        test::{
            TestContext,
            helpers::{create_expiring_item, create_item, now},
        },
    };

    use super::*;

    fn hours(hours: i64) -> SignedDuration {
        SignedDuration::from_hours(hours)
    }

    async fn requests_at(
        ctx: &TestContext,
        location: LocationUuid,
    ) -> Vec<crate::domain::rescues::records::RescueRequestRecord> {
        ctx.rescues
            .list_rescue_requests(RescueRequestFilter {
                location_uuid: Some(location),
                ..RescueRequestFilter::default()
            })
            .await
            .expect("Failed to list rescue requests")
    }

    #[tokio::test]
    async fn run_cascade_flags_each_stage() -> TestResult {
        let ctx = TestContext::new().await;
        let now = now();

        let stage_one = create_expiring_item(&ctx, now, hours(24 * 6)).await?;
        let stage_two = create_expiring_item(&ctx, now, hours(24 * 3)).await?;
        let stage_three = create_expiring_item(&ctx, now, hours(36)).await?;
        let stage_four = create_expiring_item(&ctx, now, hours(-6)).await?;
        let fresh = create_expiring_item(&ctx, now, hours(24 * 10)).await?;
        let expired = create_expiring_item(&ctx, now, hours(-30)).await?;

        let summary = ctx.cascade.run_cascade(ctx.location_uuid, now).await?;

        assert_eq!(summary.items_scanned, 6);
        assert_eq!(summary.items_rescued, 4);
        assert_eq!(summary.offers_created, 1);

        for stage in CascadeStage::ALL {
            assert_eq!(summary.count(stage), 1, "stage {stage}");
        }

        let one = ctx.items.get_item(stage_one.uuid).await?;

        assert_eq!(one.rescue_state, RescueState::PriceReduced);
        assert_eq!(one.discount, DiscountPercent::TEN);
        assert_eq!(one.current_price, 450);
        assert_eq!(one.flagged_at, Some(now));

        let two = ctx.items.get_item(stage_two.uuid).await?;

        assert_eq!(two.rescue_state, RescueState::PriceReduced);
        assert_eq!(two.discount, DiscountPercent::THIRTY);
        assert_eq!(two.current_price, 350);

        let three = ctx.items.get_item(stage_three.uuid).await?;

        assert_eq!(three.rescue_state, RescueState::DonationOffered);
        assert_eq!(three.discount, DiscountPercent::ZERO);
        assert_eq!(three.current_price, 500);

        let four = ctx.items.get_item(stage_four.uuid).await?;

        assert_eq!(four.rescue_state, RescueState::FinalSale);
        assert_eq!(four.discount, DiscountPercent::SEVENTY);
        assert_eq!(four.current_price, 150);

        assert_eq!(ctx.items.get_item(fresh.uuid).await?, fresh);
        assert_eq!(ctx.items.get_item(expired.uuid).await?, expired);

        Ok(())
    }

    #[tokio::test]
    async fn run_cascade_creates_one_pending_request_for_donation_stage() -> TestResult {
        let ctx = TestContext::new().await;
        let now = now();

        let item = create_expiring_item(&ctx, now, hours(36)).await?;

        ctx.cascade.run_cascade(ctx.location_uuid, now).await?;

        let requests = requests_at(&ctx, ctx.location_uuid).await;

        assert_eq!(requests.len(), 1);

        let request = requests.first().ok_or("expected a request")?;

        assert_eq!(request.status, RescueStatus::Pending);
        assert_eq!(request.stage, CascadeStage::Three);
        assert_eq!(request.days_until_expiration, 2);
        assert_eq!(request.items.as_slice(), &[item.uuid]);
        assert_eq!(request.collector_uuid, None);
        assert_eq!(request.scheduled_pickup_at, None);
        assert_eq!(request.completed_at, None);
        assert_eq!(request.total_value, 2_000);
        assert_eq!(request.total_weight_kg, Decimal::from(4));
        assert_eq!(request.estimated_impact_kg, Decimal::from(10));

        Ok(())
    }

    #[tokio::test]
    async fn run_cascade_skips_out_of_stock_undated_and_deleted_items() -> TestResult {
        let ctx = TestContext::new().await;
        let now = now();

        let out_of_stock =
            create_item(&ctx, ctx.location_uuid, Category::Meat, 0, Some(now + hours(36))).await?;
        let undated = create_item(&ctx, ctx.location_uuid, Category::Deli, 3, None).await?;
        let deleted = create_expiring_item(&ctx, now, hours(36)).await?;

        ctx.items.delete_item(deleted.uuid).await?;

        let summary = ctx.cascade.run_cascade(ctx.location_uuid, now).await?;

        assert_eq!(summary, CascadeSummary::default());
        assert_eq!(ctx.items.get_item(out_of_stock.uuid).await?, out_of_stock);
        assert_eq!(ctx.items.get_item(undated.uuid).await?, undated);
        assert!(requests_at(&ctx, ctx.location_uuid).await.is_empty());

        Ok(())
    }

    #[tokio::test]
    async fn second_run_does_not_reprocess_flagged_items() -> TestResult {
        let ctx = TestContext::new().await;
        let now = now();

        let reduced = create_expiring_item(&ctx, now, hours(24 * 5)).await?;
        let donated = create_expiring_item(&ctx, now, hours(24)).await?;

        ctx.cascade.run_cascade(ctx.location_uuid, now).await?;

        let reduced = ctx.items.get_item(reduced.uuid).await?;
        let donated = ctx.items.get_item(donated.uuid).await?;

        // a day later the reduced item would classify as stage two
        let later = now + hours(24 * 2);
        let summary = ctx.cascade.run_cascade(ctx.location_uuid, later).await?;

        assert_eq!(summary.items_scanned, 0);
        assert_eq!(summary.items_rescued, 0);
        assert_eq!(ctx.items.get_item(reduced.uuid).await?, reduced);
        assert_eq!(ctx.items.get_item(donated.uuid).await?, donated);
        assert_eq!(requests_at(&ctx, ctx.location_uuid).await.len(), 1);

        Ok(())
    }

    #[tokio::test]
    async fn run_cascade_stays_within_location() -> TestResult {
        let ctx = TestContext::new().await;
        let now = now();

        let elsewhere = ctx.create_location("Elsewhere").await;
        let other =
            create_item(&ctx, elsewhere, Category::Seafood, 2, Some(now + hours(36))).await?;

        let summary = ctx.cascade.run_cascade(ctx.location_uuid, now).await?;

        assert_eq!(summary.items_scanned, 0);
        assert_eq!(ctx.items.get_item(other.uuid).await?, other);

        Ok(())
    }

    #[tokio::test]
    async fn run_cascade_unknown_location_returns_location_not_found() {
        let ctx = TestContext::new().await;

        let result = ctx.cascade.run_cascade(LocationUuid::new(), now()).await;

        assert!(
            matches!(result, Err(CascadeServiceError::LocationNotFound)),
            "expected LocationNotFound, got {result:?}"
        );
    }

    #[tokio::test]
    async fn failed_run_leaves_items_and_requests_untouched() -> TestResult {
        let ctx = TestContext::new().await;
        let now = now();

        let reduced = create_expiring_item(&ctx, now, hours(24 * 6)).await?;
        let donated = create_expiring_item(&ctx, now, hours(36)).await?;

        sqlx::query(
            "CREATE FUNCTION reject_rescue_request() RETURNS trigger AS $$ \
             BEGIN RAISE EXCEPTION 'rescue requests are read-only'; END $$ LANGUAGE plpgsql",
        )
        .execute(ctx.db.pool())
        .await?;

        sqlx::query(
            "CREATE TRIGGER reject_rescue_request BEFORE INSERT ON rescue_requests \
             FOR EACH ROW EXECUTE FUNCTION reject_rescue_request()",
        )
        .execute(ctx.db.pool())
        .await?;

        let result = ctx.cascade.run_cascade(ctx.location_uuid, now).await;

        assert!(
            matches!(result, Err(CascadeServiceError::Sql(_))),
            "expected Sql, got {result:?}"
        );

        assert_eq!(ctx.items.get_item(reduced.uuid).await?, reduced);
        assert_eq!(ctx.items.get_item(donated.uuid).await?, donated);
        assert!(requests_at(&ctx, ctx.location_uuid).await.is_empty());

        Ok(())
    }

    #[tokio::test]
    async fn concurrent_runs_flag_each_item_once() -> TestResult {
        let ctx = TestContext::new().await;
        let now = now();

        for offset in [24, 36, 40, 44, 24 * 3, 24 * 6] {
            create_expiring_item(&ctx, now, hours(offset)).await?;
        }

        let (first, second) = tokio::join!(
            ctx.cascade.run_cascade(ctx.location_uuid, now),
            ctx.cascade.run_cascade(ctx.location_uuid, now),
        );

        let (first, second) = (first?, second?);

        assert_eq!(first.items_rescued + second.items_rescued, 6);
        assert_eq!(first.offers_created + second.offers_created, 4);
        assert_eq!(requests_at(&ctx, ctx.location_uuid).await.len(), 4);

        Ok(())
    }

    #[tokio::test]
    async fn with_heuristics_sizes_offers_from_custom_table() -> TestResult {
        let ctx = TestContext::new().await;
        let now = now();

        let heuristics = CategoryHeuristics::default().with_category(
            Category::Dairy,
            UnitHeuristic {
                weight_kg: Decimal::new(2, 0),
                impact_kg: Decimal::new(15, 1),
            },
        );

        let cascade = PgCascadeService::new(Db::new(ctx.db.pool().clone()))
            .with_heuristics(heuristics);

        create_expiring_item(&ctx, now, hours(36)).await?;

        cascade.run_cascade(ctx.location_uuid, now).await?;

        let requests = requests_at(&ctx, ctx.location_uuid).await;
        let request = requests.first().ok_or("expected a request")?;

        assert_eq!(request.total_weight_kg, Decimal::from(8));
        assert_eq!(request.estimated_impact_kg, Decimal::from(6));

        Ok(())
    }

    #[tokio::test]
    async fn deleted_item_hides_its_request() -> TestResult {
        let ctx = TestContext::new().await;
        let now = now();

        let item = create_expiring_item(&ctx, now, hours(36)).await?;

        ctx.cascade.run_cascade(ctx.location_uuid, now).await?;

        let request = requests_at(&ctx, ctx.location_uuid)
            .await
            .into_iter()
            .next()
            .ok_or("expected a request")?;

        ctx.items.delete_item(item.uuid).await?;

        assert!(requests_at(&ctx, ctx.location_uuid).await.is_empty());

        let result = ctx.rescues.get_rescue_request(request.uuid).await;

        assert!(
            matches!(
                result,
                Err(RescueRequestsServiceError::NotFound)
            ),
            "expected NotFound, got {result:?}"
        );

        let missing = ctx.items.get_item(item.uuid).await;

        assert!(
            matches!(missing, Err(ItemsServiceError::NotFound)),
            "expected NotFound, got {missing:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn dangling_request_cannot_be_accepted() -> TestResult {
        let ctx = TestContext::new().await;
        let now = now();
        let collector = ctx.create_collector("Collector").await?;

        let item = create_expiring_item(&ctx, now, hours(36)).await?;

        ctx.cascade.run_cascade(ctx.location_uuid, now).await?;

        let request = requests_at(&ctx, ctx.location_uuid)
            .await
            .into_iter()
            .next()
            .ok_or("expected a request")?;

        ctx.items.delete_item(item.uuid).await?;

        let claim = Claim {
            collector_uuid: collector,
            scheduled_pickup_at: now + hours(4),
        };

        let accepted = ctx.rescues.accept(request.uuid, claim, now).await;

        assert!(
            matches!(accepted, Err(RescueRequestsServiceError::NotFound)),
            "expected NotFound, got {accepted:?}"
        );

        let completed = ctx.rescues.complete(request.uuid, now).await;

        assert!(
            matches!(completed, Err(RescueRequestsServiceError::NotFound)),
            "expected NotFound, got {completed:?}"
        );

        Ok(())
    }
}
