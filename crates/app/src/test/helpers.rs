//! Test Helpers

use jiff::{SignedDuration, Timestamp};
use reprieve::Category;

use crate::{
    domain::{
        cascade::CascadeService,
        items::{
            ItemsService, ItemsServiceError,
            data::NewItem,
            records::{ItemRecord, ItemUuid},
        },
        locations::records::LocationUuid,
        rescues::{
            RescueRequestsService,
            data::RescueRequestFilter,
            records::RescueRequestRecord,
        },
    },
    test::TestContext,
};

/// The current time truncated to whole seconds, so values survive a round trip through
/// `TIMESTAMPTZ` unchanged.
pub(crate) fn now() -> Timestamp {
    Timestamp::from_second(Timestamp::now().as_second()).expect("current time is in range")
}

pub(crate) async fn create_item(
    ctx: &TestContext,
    location: LocationUuid,
    category: Category,
    quantity_on_hand: u32,
    expires_at: Option<Timestamp>,
) -> Result<ItemRecord, ItemsServiceError> {
    ctx.items
        .create_item(NewItem {
            uuid: ItemUuid::new(),
            location_uuid: location,
            name: format!("{category} item"),
            category,
            quantity_on_hand,
            expires_at,
            base_price: 500,
        })
        .await
}

/// Create an item `expires_in` from `now` at the default test location.
pub(crate) async fn create_expiring_item(
    ctx: &TestContext,
    now: Timestamp,
    expires_in: SignedDuration,
) -> Result<ItemRecord, ItemsServiceError> {
    create_item(ctx, ctx.location_uuid, Category::Dairy, 4, Some(now + expires_in)).await
}

/// Run a cascade over a single item 36 hours from expiry and return the offer it produced.
pub(crate) async fn create_pending_request(
    ctx: &TestContext,
    now: Timestamp,
) -> (ItemRecord, RescueRequestRecord) {
    let item = create_expiring_item(ctx, now, SignedDuration::from_hours(36))
        .await
        .expect("Failed to create donation-stage item");

    ctx.cascade
        .run_cascade(ctx.location_uuid, now)
        .await
        .expect("Failed to run cascade");

    let requests = ctx
        .rescues
        .list_rescue_requests(RescueRequestFilter {
            location_uuid: Some(ctx.location_uuid),
            ..RescueRequestFilter::default()
        })
        .await
        .expect("Failed to list rescue requests");

    let request = requests
        .into_iter()
        .find(|request| request.items.contains(&item.uuid))
        .expect("cascade did not create a request for the item");

    (item, request)
}
