//! # Global Discount Repository
//!
//! The storewide discount is a single row (id pinned to 1), not a history.
//! The back office upserts it; the storefront reads it on every price
//! display. A missing row reads as an inactive discount so callers never
//! have to special-case first boot.

use sqlx::SqlitePool;
use tracing::debug;

use crate::error::DbResult;
use drplanet_core::GlobalDiscount;

/// Repository for the storewide discount record.
#[derive(Debug, Clone)]
pub struct DiscountRepository {
    pool: SqlitePool,
}

impl DiscountRepository {
    /// Creates a new DiscountRepository.
    pub fn new(pool: SqlitePool) -> Self {
        DiscountRepository { pool }
    }

    /// Reads the storewide discount.
    ///
    /// Returns an inactive record when none has ever been saved.
    pub async fn get(&self) -> DbResult<GlobalDiscount> {
        let discount = sqlx::query_as::<_, GlobalDiscount>(
            "SELECT is_active, percentage_bps, starts_at, ends_at, updated_at \
             FROM global_discount WHERE id = 1",
        )
        .fetch_optional(&self.pool)
        .await?;

        Ok(discount.unwrap_or_else(|| GlobalDiscount::inactive(chrono::Utc::now())))
    }

    /// Saves the storewide discount, replacing whatever was there.
    ///
    /// Field validation (percentage range, date ordering) happens at the
    /// HTTP boundary before this runs.
    pub async fn upsert(&self, discount: &GlobalDiscount) -> DbResult<()> {
        sqlx::query(
            "INSERT INTO global_discount \
                 (id, is_active, percentage_bps, starts_at, ends_at, updated_at) \
             VALUES (1, ?1, ?2, ?3, ?4, ?5) \
             ON CONFLICT(id) DO UPDATE SET \
                 is_active = excluded.is_active, \
                 percentage_bps = excluded.percentage_bps, \
                 starts_at = excluded.starts_at, \
                 ends_at = excluded.ends_at, \
                 updated_at = excluded.updated_at",
        )
        .bind(discount.is_active)
        .bind(discount.percentage_bps)
        .bind(discount.starts_at)
        .bind(discount.ends_at)
        .bind(discount.updated_at)
        .execute(&self.pool)
        .await?;

        debug!(
            is_active = discount.is_active,
            percentage_bps = discount.percentage_bps,
            "Storewide discount saved"
        );

        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};
    use chrono::{Duration, Utc};

    async fn test_db() -> Database {
        Database::new(DbConfig::in_memory()).await.unwrap()
    }

    #[tokio::test]
    async fn test_unset_reads_as_inactive() {
        let db = test_db().await;

        let discount = db.discount().get().await.unwrap();

        assert!(!discount.is_active);
        assert_eq!(discount.percentage_bps, 0);
        assert!(!discount.is_in_effect(Utc::now()));
    }

    #[tokio::test]
    async fn test_upsert_then_get_round_trip() {
        let db = test_db().await;
        let now = Utc::now();

        let discount = GlobalDiscount {
            is_active: true,
            percentage_bps: 1_500,
            starts_at: Some(now - Duration::days(1)),
            ends_at: Some(now + Duration::days(7)),
            updated_at: now,
        };
        db.discount().upsert(&discount).await.unwrap();

        let loaded = db.discount().get().await.unwrap();
        assert!(loaded.is_active);
        assert_eq!(loaded.percentage_bps, 1_500);
        assert_eq!(loaded.starts_at, discount.starts_at);
        assert!(loaded.is_in_effect(now));
    }

    #[tokio::test]
    async fn test_upsert_replaces_singleton() {
        let db = test_db().await;
        let now = Utc::now();

        db.discount()
            .upsert(&GlobalDiscount {
                is_active: true,
                percentage_bps: 2_000,
                starts_at: None,
                ends_at: None,
                updated_at: now,
            })
            .await
            .unwrap();

        db.discount()
            .upsert(&GlobalDiscount {
                is_active: false,
                percentage_bps: 500,
                starts_at: None,
                ends_at: None,
                updated_at: now,
            })
            .await
            .unwrap();

        let loaded = db.discount().get().await.unwrap();
        assert!(!loaded.is_active);
        assert_eq!(loaded.percentage_bps, 500);
    }
}
