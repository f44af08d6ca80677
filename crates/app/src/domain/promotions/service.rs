//! Promotions service.

use async_trait::async_trait;
use mockall::automock;
use tracing::{debug, info};

use crate::{
    calendar,
    database::Db,
    domain::{
        promotions::{
            data::{NewPromotion, ReplaceOutcome},
            errors::PromotionsServiceError,
            records::PromotionRecord,
            repository::SqlitePromotionsRepository,
        },
        stores::Store,
    },
};

#[derive(Debug, Clone)]
pub struct SqlitePromotionsService {
    db: Db,
    repository: SqlitePromotionsRepository,
}

impl SqlitePromotionsService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: SqlitePromotionsRepository::new(),
        }
    }
}

#[async_trait]
impl PromotionsService for SqlitePromotionsService {
    async fn ensure_schema(&self) -> Result<(), PromotionsServiceError> {
        let mut tx = self.db.begin().await?;

        self.repository.create_schema(&mut tx).await?;

        tx.commit().await?;

        info!(
            event = "promotions.schema_ready",
            "promotions table checked/created"
        );

        Ok(())
    }

    async fn replace_store_promotions(
        &self,
        store: Store,
        promotions: Vec<NewPromotion>,
    ) -> Result<ReplaceOutcome, PromotionsServiceError> {
        let names: Vec<String> = promotions
            .into_iter()
            .filter_map(NewPromotion::into_trimmed_name)
            .collect();

        if names.is_empty() {
            debug!(%store, "no promotions to write, keeping cached snapshot");

            return Ok(ReplaceOutcome::Skipped);
        }

        let captured_on = calendar::today();
        let mut tx = self.db.begin().await?;

        let removed = self
            .repository
            .delete_store_promotions(&mut tx, store)
            .await?;

        let mut inserted = 0;

        for name in &names {
            inserted += self
                .repository
                .insert_promotion(&mut tx, store, name, captured_on)
                .await?;
        }

        tx.commit().await?;

        info!(
            %store,
            %captured_on,
            removed,
            inserted,
            "replaced cached promotions"
        );

        Ok(ReplaceOutcome::Replaced { removed, inserted })
    }

    async fn read_promotions(
        &self,
        stores: Vec<Store>,
    ) -> Result<Vec<PromotionRecord>, PromotionsServiceError> {
        let mut tx = self.db.begin().await?;

        let promotions = self
            .repository
            .list_promotions(&mut tx, &stores, calendar::today())
            .await?;

        tx.commit().await?;

        Ok(promotions)
    }
}

#[automock]
#[async_trait]
pub trait PromotionsService: Send + Sync {
    /// Creates the promotions table and its index when they are missing.
    async fn ensure_schema(&self) -> Result<(), PromotionsServiceError>;

    /// Swaps a store's cached snapshot for `promotions`, dated today.
    ///
    /// An empty (or all-blank) listing leaves the existing snapshot untouched.
    async fn replace_store_promotions(
        &self,
        store: Store,
        promotions: Vec<NewPromotion>,
    ) -> Result<ReplaceOutcome, PromotionsServiceError>;

    /// Reads today's promotions, restricted to `stores` unless it is empty.
    async fn read_promotions(
        &self,
        stores: Vec<Store>,
    ) -> Result<Vec<PromotionRecord>, PromotionsServiceError>;
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::{
        calendar,
        test::{TestContext, helpers::names},
    };

    use super::*;

    fn listing(names: &[&str]) -> Vec<NewPromotion> {
        names.iter().copied().map(NewPromotion::new).collect()
    }

    #[tokio::test]
    async fn ensure_schema_is_idempotent() -> TestResult {
        let ctx = TestContext::new().await;

        ctx.promotions.ensure_schema().await?;
        ctx.promotions.ensure_schema().await?;

        assert!(ctx.promotions.read_promotions(vec![]).await?.is_empty());

        Ok(())
    }

    #[tokio::test]
    async fn replace_writes_exactly_the_fetched_names_dated_today() -> TestResult {
        let ctx = TestContext::new().await;

        let outcome = ctx
            .promotions
            .replace_store_promotions(Store::Kaufland, listing(&["Milk", "Bread"]))
            .await?;

        let promotions = ctx.promotions.read_promotions(vec![Store::Kaufland]).await?;

        assert_eq!(
            outcome,
            ReplaceOutcome::Replaced {
                removed: 0,
                inserted: 2
            }
        );
        assert_eq!(names(&promotions), vec!["Milk", "Bread"]);
        assert!(
            promotions
                .iter()
                .all(|p| p.captured_on == calendar::today() && p.store == Store::Kaufland),
            "every record should be dated today and tagged with its store"
        );

        Ok(())
    }

    #[tokio::test]
    async fn replace_with_empty_listing_keeps_existing_snapshot() -> TestResult {
        let ctx = TestContext::new().await;

        ctx.promotions
            .replace_store_promotions(Store::Lidl, listing(&["Cheese"]))
            .await?;

        let before = ctx.promotions.read_promotions(vec![Store::Lidl]).await?;

        let outcome = ctx
            .promotions
            .replace_store_promotions(Store::Lidl, vec![])
            .await?;

        let after = ctx.promotions.read_promotions(vec![Store::Lidl]).await?;

        assert_eq!(outcome, ReplaceOutcome::Skipped);
        assert_eq!(before, after);

        Ok(())
    }

    #[tokio::test]
    async fn replace_with_blank_names_only_is_skipped() -> TestResult {
        let ctx = TestContext::new().await;

        ctx.promotions
            .replace_store_promotions(Store::Lidl, listing(&["Cheese"]))
            .await?;

        let outcome = ctx
            .promotions
            .replace_store_promotions(Store::Lidl, listing(&["", "   "]))
            .await?;

        let promotions = ctx.promotions.read_promotions(vec![Store::Lidl]).await?;

        assert_eq!(outcome, ReplaceOutcome::Skipped);
        assert_eq!(names(&promotions), vec!["Cheese"]);

        Ok(())
    }

    #[tokio::test]
    async fn replace_purges_previous_days_for_that_store_only() -> TestResult {
        let ctx = TestContext::new().await;
        let yesterday = calendar::today().yesterday()?;

        ctx.db
            .insert_promotion(Store::Kaufland, "Old Butter", yesterday)
            .await;
        ctx.db
            .insert_promotion(Store::Lidl, "Old Apples", yesterday)
            .await;

        let outcome = ctx
            .promotions
            .replace_store_promotions(Store::Kaufland, listing(&["Fresh Butter"]))
            .await?;

        assert_eq!(
            outcome,
            ReplaceOutcome::Replaced {
                removed: 1,
                inserted: 1
            }
        );
        assert_eq!(
            ctx.db.captured_dates(Store::Kaufland).await,
            vec![calendar::today().to_string()]
        );
        assert_eq!(
            ctx.db.captured_dates(Store::Lidl).await,
            vec![yesterday.to_string()]
        );

        Ok(())
    }

    #[tokio::test]
    async fn replacing_twice_in_one_day_does_not_duplicate() -> TestResult {
        let ctx = TestContext::new().await;

        ctx.promotions
            .replace_store_promotions(Store::Kaufland, listing(&["Milk", "Bread"]))
            .await?;

        ctx.promotions
            .replace_store_promotions(Store::Kaufland, listing(&["Milk", "Yoghurt"]))
            .await?;

        let promotions = ctx.promotions.read_promotions(vec![Store::Kaufland]).await?;

        assert_eq!(names(&promotions), vec!["Milk", "Yoghurt"]);

        Ok(())
    }

    #[tokio::test]
    async fn read_ignores_records_from_other_days() -> TestResult {
        let ctx = TestContext::new().await;

        ctx.db
            .insert_promotion(Store::Lidl, "Stale Pears", calendar::today().yesterday()?)
            .await;

        assert!(ctx.promotions.read_promotions(vec![]).await?.is_empty());

        Ok(())
    }

    #[tokio::test]
    async fn read_without_filter_returns_union_and_filter_restricts() -> TestResult {
        let ctx = TestContext::new().await;

        ctx.promotions
            .replace_store_promotions(Store::Kaufland, listing(&["Milk"]))
            .await?;

        ctx.promotions
            .replace_store_promotions(Store::Lidl, listing(&["Pasta", "Olive Oil"]))
            .await?;

        let all = ctx.promotions.read_promotions(vec![]).await?;
        let lidl = ctx.promotions.read_promotions(vec![Store::Lidl]).await?;
        let both = ctx
            .promotions
            .read_promotions(vec![Store::Kaufland, Store::Lidl])
            .await?;

        assert_eq!(names(&all), vec!["Milk", "Pasta", "Olive Oil"]);
        assert_eq!(names(&lidl), vec!["Pasta", "Olive Oil"]);
        assert_eq!(all, both);
        assert!(
            all.windows(2).all(|pair| matches!(pair, [a, b] if a.id < b.id)),
            "records come back in insertion order"
        );

        Ok(())
    }
}
