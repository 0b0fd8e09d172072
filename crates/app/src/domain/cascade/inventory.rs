//! Inventory snapshot and item flagging for cascade runs.

use jiff_sqlx::Timestamp as SqlxTimestamp;
use reprieve::RescueState;
use sqlx::{Postgres, Transaction, query, query_as};

use crate::domain::{
    cascade::data::ItemFlag,
    columns::amount_to_i64,
    items::records::ItemRecord,
    locations::records::LocationUuid,
};

const SNAPSHOT_INVENTORY_SQL: &str = include_str!("sql/snapshot_inventory.sql");
const FLAG_ITEM_SQL: &str = include_str!("sql/flag_item.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgInventoryRepository;

impl PgInventoryRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    /// Unflagged, in-stock items with a known expiry, locked for the rest of `tx`.
    ///
    /// Rows already locked by a concurrent run are skipped rather than waited on, so two
    /// runs over the same location never see the same item.
    #[tracing::instrument(
        name = "cascade.inventory.snapshot",
        skip(self, tx),
        fields(location_uuid = %location, candidates = tracing::field::Empty)
    )]
    pub(crate) async fn snapshot(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        location: LocationUuid,
    ) -> Result<Vec<ItemRecord>, sqlx::Error> {
        let items = query_as::<Postgres, ItemRecord>(SNAPSHOT_INVENTORY_SQL)
            .bind(location.into_uuid())
            .bind(RescueState::None.as_str())
            .fetch_all(&mut **tx)
            .await?;

        tracing::Span::current().record("candidates", items.len());

        Ok(items)
    }

    /// Applies `flag` only while the item is still unflagged. Returns the rows affected.
    pub(crate) async fn flag_item(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        flag: ItemFlag,
    ) -> Result<u64, sqlx::Error> {
        let current_price = amount_to_i64("current_price", flag.current_price)?;

        let rows_affected = query(FLAG_ITEM_SQL)
            .bind(flag.item_uuid.into_uuid())
            .bind(flag.rescue_state.as_str())
            .bind(i16::from(flag.discount.value()))
            .bind(current_price)
            .bind(SqlxTimestamp::from(flag.flagged_at))
            .bind(RescueState::None.as_str())
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }
}
