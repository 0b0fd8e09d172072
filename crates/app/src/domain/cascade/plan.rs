//! Per-item cascade decisions, computed before anything is written.

use jiff::Timestamp;
use reprieve::{CascadeStage, CategoryHeuristics, RescueState, classify};
use smallvec::smallvec;

use crate::domain::{
    cascade::{data::ItemFlag, errors::CascadeServiceError},
    items::records::ItemRecord,
    rescues::{data::NewRescueRequest, records::RescueRequestUuid},
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ItemPlan {
    pub(crate) stage: CascadeStage,
    pub(crate) flag: ItemFlag,
    pub(crate) offer: Option<NewRescueRequest>,
}

/// Decide what happens to `item` at `now`.
///
/// Returns `None` for items outside the cascade window, including expired ones. Price
/// fields are only rewritten for stages that carry a discount.
pub(crate) fn plan_item(
    item: &ItemRecord,
    now: Timestamp,
    heuristics: &CategoryHeuristics,
) -> Result<Option<ItemPlan>, CascadeServiceError> {
    let Some(expires_at) = item.expires_at else {
        return Ok(None);
    };

    let Some(classification) = classify(now, expires_at) else {
        return Ok(None);
    };

    let (discount, current_price) = if classification.changes_price() {
        (
            classification.discount,
            classification.discount.apply(item.base_price)?,
        )
    } else {
        (item.discount, item.current_price)
    };

    let offer = if classification.action.creates_offer() {
        let days_until_expiration = i32::try_from(classification.days_left)
            .map_err(|_| CascadeServiceError::InvalidData)?;

        Some(NewRescueRequest {
            uuid: RescueRequestUuid::new(),
            location_uuid: item.location_uuid,
            stage: classification.stage,
            days_until_expiration,
            items: smallvec![item.uuid],
            totals: heuristics.totals(item.category, item.quantity_on_hand, item.base_price)?,
        })
    } else {
        None
    };

    Ok(Some(ItemPlan {
        stage: classification.stage,
        flag: ItemFlag {
            item_uuid: item.uuid,
            rescue_state: RescueState::from(classification.action),
            discount,
            current_price,
            flagged_at: now,
        },
        offer,
    }))
}

#[cfg(test)]
mod tests {
    use jiff::SignedDuration;
    use reprieve::{Category, DiscountPercent};
    use rust_decimal::Decimal;
    use testresult::TestResult;

    use crate::domain::{items::records::ItemUuid, locations::records::LocationUuid};

    use super::*;

    fn item(now: Timestamp, expires_in: SignedDuration) -> ItemRecord {
        ItemRecord {
            uuid: ItemUuid::new(),
            location_uuid: LocationUuid::new(),
            name: "Sourdough".to_string(),
            category: Category::Bakery,
            quantity_on_hand: 8,
            expires_at: Some(now + expires_in),
            base_price: 450,
            current_price: 450,
            discount: DiscountPercent::ZERO,
            rescue_state: RescueState::None,
            flagged_at: None,
            created_at: now,
            updated_at: now,
            deleted_at: None,
        }
    }

    #[test]
    fn six_days_out_reduces_price_by_ten_percent() -> TestResult {
        let now = Timestamp::now();
        let item = item(now, SignedDuration::from_hours(24 * 6));

        let plan = plan_item(&item, now, &CategoryHeuristics::default())?
            .ok_or("expected a plan")?;

        assert_eq!(plan.stage, CascadeStage::One);
        assert_eq!(plan.flag.rescue_state, RescueState::PriceReduced);
        assert_eq!(plan.flag.discount, DiscountPercent::TEN);
        assert_eq!(plan.flag.current_price, 405);
        assert_eq!(plan.flag.flagged_at, now);
        assert!(plan.offer.is_none());

        Ok(())
    }

    #[test]
    fn thirty_six_hours_out_offers_donation_without_repricing() -> TestResult {
        let now = Timestamp::now();
        let item = item(now, SignedDuration::from_hours(36));

        let plan = plan_item(&item, now, &CategoryHeuristics::default())?
            .ok_or("expected a plan")?;

        assert_eq!(plan.stage, CascadeStage::Three);
        assert_eq!(plan.flag.rescue_state, RescueState::DonationOffered);
        assert_eq!(plan.flag.discount, DiscountPercent::ZERO);
        assert_eq!(plan.flag.current_price, 450);

        let offer = plan.offer.ok_or("expected an offer")?;

        assert_eq!(offer.stage, CascadeStage::Three);
        assert_eq!(offer.days_until_expiration, 2);
        assert_eq!(offer.location_uuid, item.location_uuid);
        assert_eq!(offer.items.as_slice(), &[item.uuid]);
        assert_eq!(offer.totals.total_value, 3_600);
        assert_eq!(offer.totals.total_weight_kg, Decimal::from(8));
        assert_eq!(offer.totals.estimated_impact_kg, Decimal::from(20));

        Ok(())
    }

    #[test]
    fn expired_within_the_day_is_final_sale_at_seventy_percent() -> TestResult {
        let now = Timestamp::now();
        let item = item(now, SignedDuration::from_hours(-6));

        let plan = plan_item(&item, now, &CategoryHeuristics::default())?
            .ok_or("expected a plan")?;

        assert_eq!(plan.stage, CascadeStage::Four);
        assert_eq!(plan.flag.rescue_state, RescueState::FinalSale);
        assert_eq!(plan.flag.current_price, 135);
        assert!(plan.offer.is_none());

        Ok(())
    }

    #[test]
    fn items_outside_window_are_left_alone() -> TestResult {
        let now = Timestamp::now();
        let heuristics = CategoryHeuristics::default();

        let fresh = item(now, SignedDuration::from_hours(24 * 9));
        let expired = item(now, SignedDuration::from_hours(-30));

        let mut undated = item(now, SignedDuration::ZERO);
        undated.expires_at = None;

        assert!(plan_item(&fresh, now, &heuristics)?.is_none());
        assert!(plan_item(&expired, now, &heuristics)?.is_none());
        assert!(plan_item(&undated, now, &heuristics)?.is_none());

        Ok(())
    }

    #[test]
    fn produce_offers_use_lighter_unit_weight() -> TestResult {
        let now = Timestamp::now();

        let mut item = item(now, SignedDuration::from_hours(24));
        item.category = Category::Produce;
        item.quantity_on_hand = 10;

        let plan = plan_item(&item, now, &CategoryHeuristics::default())?
            .ok_or("expected a plan")?;

        let offer = plan.offer.ok_or("expected an offer")?;

        assert_eq!(offer.totals.total_weight_kg, Decimal::from(5));

        Ok(())
    }
}
