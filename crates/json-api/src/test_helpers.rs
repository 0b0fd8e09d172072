//! Test helpers.

use std::{iter, sync::Arc};

use jiff::Timestamp;
use reprieve::{CascadeStage, RescueStatus};
use rust_decimal::Decimal;
use salvo::{affix_state::inject, prelude::*};

use reprieve_app::{
    context::AppContext,
    domain::{
        cascade::MockCascadeService,
        collectors::{MockCollectorsService, records::CollectorUuid},
        items::{MockItemsService, records::ItemUuid},
        locations::{MockLocationsService, records::LocationUuid},
        rescues::{
            MockRescueRequestsService,
            records::{RescueRequestRecord, RescueRequestUuid},
        },
    },
};

use crate::state::State;

fn strict_locations_mock() -> MockLocationsService {
    let mut locations = MockLocationsService::new();

    locations.expect_create_location().never();
    locations.expect_get_location().never();

    locations
}

fn strict_collectors_mock() -> MockCollectorsService {
    let mut collectors = MockCollectorsService::new();

    collectors.expect_create_collector().never();
    collectors.expect_get_collector().never();

    collectors
}

fn strict_items_mock() -> MockItemsService {
    let mut items = MockItemsService::new();

    items.expect_create_item().never();
    items.expect_get_item().never();
    items.expect_list_items().never();
    items.expect_delete_item().never();
    items.expect_restock_item().never();

    items
}

fn strict_cascade_mock() -> MockCascadeService {
    let mut cascade = MockCascadeService::new();

    cascade.expect_run_cascade().never();

    cascade
}

fn strict_rescues_mock() -> MockRescueRequestsService {
    let mut rescues = MockRescueRequestsService::new();

    rescues.expect_get_rescue_request().never();
    rescues.expect_list_rescue_requests().never();
    rescues.expect_accept().never();
    rescues.expect_start().never();
    rescues.expect_complete().never();
    rescues.expect_cancel().never();

    rescues
}

fn app_context(cascade: MockCascadeService, rescues: MockRescueRequestsService) -> AppContext {
    AppContext {
        locations: Arc::new(strict_locations_mock()),
        collectors: Arc::new(strict_collectors_mock()),
        items: Arc::new(strict_items_mock()),
        cascade: Arc::new(cascade),
        rescues: Arc::new(rescues),
    }
}

fn service(state: Arc<State>, route: Router) -> Service {
    Service::new(Router::new().hoop(inject(state)).push(route))
}

pub(crate) fn cascade_service(
    cascade: MockCascadeService,
    default_location: Option<LocationUuid>,
    route: Router,
) -> Service {
    service(
        State::shared(app_context(cascade, strict_rescues_mock()), default_location),
        route,
    )
}

pub(crate) fn rescues_service(rescues: MockRescueRequestsService, route: Router) -> Service {
    service(
        State::shared(app_context(strict_cascade_mock(), rescues), None),
        route,
    )
}

/// A single-item stage 3 offer. Claimed statuses carry a collector and pickup time.
pub(crate) fn make_rescue_request(status: RescueStatus) -> RescueRequestRecord {
    let claimed = status.has_collector();

    RescueRequestRecord {
        uuid: RescueRequestUuid::new(),
        location_uuid: LocationUuid::new(),
        collector_uuid: claimed.then(CollectorUuid::new),
        status,
        stage: CascadeStage::Three,
        days_until_expiration: 1,
        scheduled_pickup_at: claimed.then_some(Timestamp::UNIX_EPOCH),
        completed_at: None,
        total_weight_kg: Decimal::new(20, 1),
        total_value: 2_000,
        estimated_impact_kg: Decimal::new(20, 1),
        items: iter::once(ItemUuid::new()).collect(),
        created_at: Timestamp::UNIX_EPOCH,
        updated_at: Timestamp::UNIX_EPOCH,
    }
}
