//! Locations service.

use async_trait::async_trait;
use mockall::automock;

use crate::{
    database::Db,
    domain::locations::{
        data::NewLocation,
        errors::LocationsServiceError,
        records::{LocationRecord, LocationUuid},
        repository::PgLocationsRepository,
    },
};

#[derive(Debug, Clone)]
pub struct PgLocationsService {
    db: Db,
    repository: PgLocationsRepository,
}

impl PgLocationsService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgLocationsRepository::new(),
        }
    }
}

#[async_trait]
impl LocationsService for PgLocationsService {
    async fn create_location(
        &self,
        location: NewLocation,
    ) -> Result<LocationRecord, LocationsServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let created = self.repository.create_location(&mut tx, location).await?;

        tx.commit().await?;

        Ok(created)
    }

    async fn get_location(
        &self,
        location: LocationUuid,
    ) -> Result<LocationRecord, LocationsServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let location = self.repository.get_location(&mut tx, location).await?;

        tx.commit().await?;

        Ok(location)
    }
}

#[automock]
#[async_trait]
/// Location persistence operations.
pub trait LocationsService: Send + Sync {
    /// Creates a new location.
    async fn create_location(
        &self,
        location: NewLocation,
    ) -> Result<LocationRecord, LocationsServiceError>;

    /// Retrieve a single location.
    async fn get_location(
        &self,
        location: LocationUuid,
    ) -> Result<LocationRecord, LocationsServiceError>;
}
