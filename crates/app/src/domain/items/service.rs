//! Items service.

use async_trait::async_trait;
use mockall::automock;
use tracing::info;

use crate::{
    database::Db,
    domain::{
        items::{
            data::{NewItem, Restock},
            errors::ItemsServiceError,
            records::{ItemRecord, ItemUuid},
            repository::PgItemsRepository,
        },
        locations::records::LocationUuid,
    },
};

#[derive(Debug, Clone)]
pub struct PgItemsService {
    db: Db,
    repository: PgItemsRepository,
}

impl PgItemsService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgItemsRepository::new(),
        }
    }
}

#[async_trait]
impl ItemsService for PgItemsService {
    #[tracing::instrument(
        name = "items.service.create_item",
        skip(self, item),
        fields(item_uuid = %item.uuid, location_uuid = %item.location_uuid),
        err
    )]
    async fn create_item(&self, item: NewItem) -> Result<ItemRecord, ItemsServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let created = self.repository.create_item(&mut tx, item).await?;

        tx.commit().await?;

        info!(item_uuid = %created.uuid, "created item");

        Ok(created)
    }

    async fn get_item(&self, item: ItemUuid) -> Result<ItemRecord, ItemsServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let item = self.repository.get_item(&mut tx, item).await?;

        tx.commit().await?;

        Ok(item)
    }

    async fn list_items(
        &self,
        location: LocationUuid,
    ) -> Result<Vec<ItemRecord>, ItemsServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let items = self.repository.list_items(&mut tx, location).await?;

        tx.commit().await?;

        Ok(items)
    }

    #[tracing::instrument(
        name = "items.service.delete_item",
        skip(self),
        fields(item_uuid = %item),
        err
    )]
    async fn delete_item(&self, item: ItemUuid) -> Result<(), ItemsServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let rows_affected = self.repository.delete_item(&mut tx, item).await?;

        if rows_affected == 0 {
            return Err(ItemsServiceError::NotFound);
        }

        tx.commit().await?;

        info!(item_uuid = %item, "deleted item");

        Ok(())
    }

    #[tracing::instrument(
        name = "items.service.restock_item",
        skip(self, restock),
        fields(item_uuid = %item, quantity_on_hand = restock.quantity_on_hand),
        err
    )]
    async fn restock_item(
        &self,
        item: ItemUuid,
        restock: Restock,
    ) -> Result<ItemRecord, ItemsServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let restocked = self.repository.restock_item(&mut tx, item, restock).await?;

        tx.commit().await?;

        info!(item_uuid = %item, "restocked item");

        Ok(restocked)
    }
}

#[automock]
#[async_trait]
/// Catalog operations on perishable items.
pub trait ItemsService: Send + Sync {
    /// Adds an item to a location's catalog.
    async fn create_item(&self, item: NewItem) -> Result<ItemRecord, ItemsServiceError>;

    /// Retrieve a single item, unless it has been deleted.
    async fn get_item(&self, item: ItemUuid) -> Result<ItemRecord, ItemsServiceError>;

    /// Lists the live items of a location in UUID order.
    async fn list_items(
        &self,
        location: LocationUuid,
    ) -> Result<Vec<ItemRecord>, ItemsServiceError>;

    /// Soft-deletes an item.
    async fn delete_item(&self, item: ItemUuid) -> Result<(), ItemsServiceError>;

    /// Replaces the stock on hand with a fresh lot and clears any rescue flag.
    async fn restock_item(
        &self,
        item: ItemUuid,
        restock: Restock,
    ) -> Result<ItemRecord, ItemsServiceError>;
}
