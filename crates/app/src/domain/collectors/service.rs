//! Collectors service.

use async_trait::async_trait;
use mockall::automock;

use crate::{
    database::Db,
    domain::collectors::{
        data::NewCollector,
        errors::CollectorsServiceError,
        records::{CollectorRecord, CollectorUuid},
        repository::PgCollectorsRepository,
    },
};

#[derive(Debug, Clone)]
pub struct PgCollectorsService {
    db: Db,
    repository: PgCollectorsRepository,
}

impl PgCollectorsService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgCollectorsRepository::new(),
        }
    }
}

#[async_trait]
impl CollectorsService for PgCollectorsService {
    async fn create_collector(
        &self,
        collector: NewCollector,
    ) -> Result<CollectorRecord, CollectorsServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let created = self.repository.create_collector(&mut tx, collector).await?;

        tx.commit().await?;

        Ok(created)
    }

    async fn get_collector(
        &self,
        collector: CollectorUuid,
    ) -> Result<CollectorRecord, CollectorsServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let collector = self.repository.get_collector(&mut tx, collector).await?;

        tx.commit().await?;

        Ok(collector)
    }
}

#[automock]
#[async_trait]
/// Collector persistence operations.
pub trait CollectorsService: Send + Sync {
    /// Creates a new collector.
    async fn create_collector(
        &self,
        collector: NewCollector,
    ) -> Result<CollectorRecord, CollectorsServiceError>;

    /// Retrieve a single collector.
    async fn get_collector(
        &self,
        collector: CollectorUuid,
    ) -> Result<CollectorRecord, CollectorsServiceError>;
}
