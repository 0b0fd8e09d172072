//! Test context for service-level integration tests.

use std::time::Duration;

use crate::{
    database::Db,
    domain::{
        cascade::PgCascadeService,
        collectors::{
            CollectorsService, CollectorsServiceError, PgCollectorsService,
            data::NewCollector,
            records::CollectorUuid,
        },
        items::PgItemsService,
        locations::{
            LocationsService, PgLocationsService, data::NewLocation, records::LocationUuid,
        },
        rescues::PgRescueRequestsService,
    },
};

use super::db::TestDb;

pub(crate) const TEST_CLAIM_TIMEOUT: Duration = Duration::from_secs(5);

pub struct TestContext {
    pub db: TestDb,
    pub location_uuid: LocationUuid,
    pub locations: PgLocationsService,
    pub collectors: PgCollectorsService,
    pub items: PgItemsService,
    pub cascade: PgCascadeService,
    pub rescues: PgRescueRequestsService,
}

impl TestContext {
    pub async fn new() -> Self {
        let test_db = TestDb::new().await;
        let db = Db::new(test_db.pool().clone());

        let locations = PgLocationsService::new(db.clone());
        let location_uuid = LocationUuid::new();

        locations
            .create_location(NewLocation {
                uuid: location_uuid,
                name: "Test Location".to_string(),
            })
            .await
            .expect("Failed to create default test location");

        Self {
            location_uuid,
            locations,
            collectors: PgCollectorsService::new(db.clone()),
            items: PgItemsService::new(db.clone()),
            cascade: PgCascadeService::new(db.clone()),
            rescues: PgRescueRequestsService::new(db, TEST_CLAIM_TIMEOUT),
            db: test_db,
        }
    }

    /// Create an additional location, e.g. to check that cascades stay scoped.
    pub async fn create_location(&self, name: &str) -> LocationUuid {
        let uuid = LocationUuid::new();

        self.locations
            .create_location(NewLocation {
                uuid,
                name: name.to_string(),
            })
            .await
            .expect("Failed to create test location");

        uuid
    }

    pub async fn create_collector(
        &self,
        name: &str,
    ) -> Result<CollectorUuid, CollectorsServiceError> {
        let uuid = CollectorUuid::new();

        self.collectors
            .create_collector(NewCollector {
                uuid,
                name: name.to_string(),
            })
            .await?;

        Ok(uuid)
    }
}
