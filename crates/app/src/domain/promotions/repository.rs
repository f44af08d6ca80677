//! Promotions Repository

use jiff::civil::Date;
use sqlx::{FromRow, QueryBuilder, Row, Sqlite, Transaction, query, sqlite::SqliteRow};

use crate::domain::{
    promotions::records::{PromotionId, PromotionRecord},
    stores::Store,
};

const CREATE_PROMOTIONS_TABLE_SQL: &str = include_str!("sql/create_promotions_table.sql");
const CREATE_PROMOTIONS_INDEX_SQL: &str = include_str!("sql/create_promotions_index.sql");
const DELETE_STORE_PROMOTIONS_SQL: &str = include_str!("sql/delete_store_promotions.sql");
const INSERT_PROMOTION_SQL: &str = include_str!("sql/insert_promotion.sql");

const LIST_PROMOTIONS_SQL: &str =
    "SELECT id, name, store, captured_on FROM promotions WHERE captured_on = ";

#[derive(Debug, Clone, Default)]
pub(crate) struct SqlitePromotionsRepository;

impl SqlitePromotionsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn create_schema(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
    ) -> Result<(), sqlx::Error> {
        query(CREATE_PROMOTIONS_TABLE_SQL)
            .execute(&mut **tx)
            .await?;

        query(CREATE_PROMOTIONS_INDEX_SQL)
            .execute(&mut **tx)
            .await?;

        Ok(())
    }

    pub(crate) async fn delete_store_promotions(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
        store: Store,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(DELETE_STORE_PROMOTIONS_SQL)
            .bind(store.as_str())
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }

    pub(crate) async fn insert_promotion(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
        store: Store,
        name: &str,
        captured_on: Date,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(INSERT_PROMOTION_SQL)
            .bind(name)
            .bind(store.as_str())
            .bind(captured_on.to_string())
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }

    pub(crate) async fn list_promotions(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
        stores: &[Store],
        captured_on: Date,
    ) -> Result<Vec<PromotionRecord>, sqlx::Error> {
        let mut builder = QueryBuilder::<Sqlite>::new(LIST_PROMOTIONS_SQL);

        builder.push_bind(captured_on.to_string());

        if !stores.is_empty() {
            builder.push(" AND store IN (");

            let mut separated = builder.separated(", ");

            for store in stores {
                separated.push_bind(store.as_str());
            }

            separated.push_unseparated(")");
        }

        builder.push(" ORDER BY id");

        builder
            .build_query_as::<PromotionRecord>()
            .fetch_all(&mut **tx)
            .await
    }
}

impl<'r> FromRow<'r, SqliteRow> for PromotionRecord {
    fn from_row(row: &'r SqliteRow) -> sqlx::Result<Self> {
        let store: String = row.try_get("store")?;
        let captured_on: String = row.try_get("captured_on")?;

        Ok(Self {
            id: PromotionId::from_i64(row.try_get("id")?),
            name: row.try_get("name")?,
            store: store.parse::<Store>().map_err(|e| sqlx::Error::ColumnDecode {
                index: "store".to_string(),
                source: Box::new(e),
            })?,
            captured_on: captured_on
                .parse::<Date>()
                .map_err(|e| sqlx::Error::ColumnDecode {
                    index: "captured_on".to_string(),
                    source: Box::new(e),
                })?,
        })
    }
}
