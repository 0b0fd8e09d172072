//! Collectors Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query_as};

use crate::domain::collectors::{
    data::NewCollector,
    records::{CollectorRecord, CollectorUuid},
};

const CREATE_COLLECTOR_SQL: &str = include_str!("sql/create_collector.sql");
const GET_COLLECTOR_SQL: &str = include_str!("sql/get_collector.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgCollectorsRepository;

impl PgCollectorsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn create_collector(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        collector: NewCollector,
    ) -> Result<CollectorRecord, sqlx::Error> {
        query_as::<Postgres, CollectorRecord>(CREATE_COLLECTOR_SQL)
            .bind(collector.uuid.into_uuid())
            .bind(collector.name)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn get_collector(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        collector: CollectorUuid,
    ) -> Result<CollectorRecord, sqlx::Error> {
        query_as::<Postgres, CollectorRecord>(GET_COLLECTOR_SQL)
            .bind(collector.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }
}

impl<'r> FromRow<'r, PgRow> for CollectorRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: CollectorUuid::from_uuid(row.try_get("uuid")?),
            name: row.try_get("name")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
            deleted_at: row
                .try_get::<Option<SqlxTimestamp>, _>("deleted_at")?
                .map(SqlxTimestamp::to_jiff),
        })
    }
}
