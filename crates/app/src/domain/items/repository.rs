//! Items Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use reprieve::{Category, DiscountPercent, RescueState};
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as};

use crate::domain::{
    columns::{amount_to_i64, column_error, try_get_amount, try_get_parsed},
    items::{
        data::{NewItem, Restock},
        records::{ItemRecord, ItemUuid},
    },
    locations::records::LocationUuid,
};

const CREATE_ITEM_SQL: &str = include_str!("sql/create_item.sql");
const GET_ITEM_SQL: &str = include_str!("sql/get_item.sql");
const LIST_ITEMS_SQL: &str = include_str!("sql/list_items.sql");
const DELETE_ITEM_SQL: &str = include_str!("sql/delete_item.sql");
const RESTOCK_ITEM_SQL: &str = include_str!("sql/restock_item.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgItemsRepository;

impl PgItemsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn create_item(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        item: NewItem,
    ) -> Result<ItemRecord, sqlx::Error> {
        let quantity = quantity_to_i32(item.quantity_on_hand)?;
        let base_price = amount_to_i64("base_price", item.base_price)?;

        query_as::<Postgres, ItemRecord>(CREATE_ITEM_SQL)
            .bind(item.uuid.into_uuid())
            .bind(item.location_uuid.into_uuid())
            .bind(item.name)
            .bind(item.category.as_str())
            .bind(quantity)
            .bind(item.expires_at.map(SqlxTimestamp::from))
            .bind(base_price)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn get_item(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        item: ItemUuid,
    ) -> Result<ItemRecord, sqlx::Error> {
        query_as::<Postgres, ItemRecord>(GET_ITEM_SQL)
            .bind(item.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn list_items(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        location: LocationUuid,
    ) -> Result<Vec<ItemRecord>, sqlx::Error> {
        query_as::<Postgres, ItemRecord>(LIST_ITEMS_SQL)
            .bind(location.into_uuid())
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn delete_item(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        item: ItemUuid,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(DELETE_ITEM_SQL)
            .bind(item.into_uuid())
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }

    pub(crate) async fn restock_item(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        item: ItemUuid,
        restock: Restock,
    ) -> Result<ItemRecord, sqlx::Error> {
        let quantity = quantity_to_i32(restock.quantity_on_hand)?;

        query_as::<Postgres, ItemRecord>(RESTOCK_ITEM_SQL)
            .bind(item.into_uuid())
            .bind(quantity)
            .bind(restock.expires_at.map(SqlxTimestamp::from))
            .fetch_one(&mut **tx)
            .await
    }
}

fn quantity_to_i32(quantity: u32) -> sqlx::Result<i32> {
    i32::try_from(quantity).map_err(|e| column_error("quantity_on_hand", e))
}

impl<'r> FromRow<'r, PgRow> for ItemRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        let quantity: i32 = row.try_get("quantity_on_hand")?;
        let quantity_on_hand =
            u32::try_from(quantity).map_err(|e| column_error("quantity_on_hand", e))?;

        let discount: i16 = row.try_get("discount_percent")?;
        let discount = u16::try_from(discount)
            .map_err(|e| column_error("discount_percent", e))
            .and_then(|percent| {
                DiscountPercent::new(percent).map_err(|e| column_error("discount_percent", e))
            })?;

        Ok(Self {
            uuid: ItemUuid::from_uuid(row.try_get("uuid")?),
            location_uuid: LocationUuid::from_uuid(row.try_get("location_uuid")?),
            name: row.try_get("name")?,
            category: try_get_parsed::<Category>(row, "category")?,
            quantity_on_hand,
            expires_at: row
                .try_get::<Option<SqlxTimestamp>, _>("expires_at")?
                .map(SqlxTimestamp::to_jiff),
            base_price: try_get_amount(row, "base_price")?,
            current_price: try_get_amount(row, "current_price")?,
            discount,
            rescue_state: try_get_parsed::<RescueState>(row, "rescue_state")?,
            flagged_at: row
                .try_get::<Option<SqlxTimestamp>, _>("flagged_at")?
                .map(SqlxTimestamp::to_jiff),
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
            deleted_at: row
                .try_get::<Option<SqlxTimestamp>, _>("deleted_at")?
                .map(SqlxTimestamp::to_jiff),
        })
    }
}
