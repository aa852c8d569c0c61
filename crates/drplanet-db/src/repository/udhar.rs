//! # Udhar Repository
//!
//! Credit ("udhar") payment receipts. Regular customers buy on credit and
//! settle later; each settlement is recorded here and counts as realized
//! revenue at `created_at`. There is no balance ledger, only receipts -
//! the shop keeps the running khata on paper.

use chrono::Utc;
use sqlx::SqlitePool;
use tracing::debug;
use uuid::Uuid;

use crate::error::DbResult;
use drplanet_core::{Money, UdharPayment};

/// Repository for udhar payment operations.
#[derive(Debug, Clone)]
pub struct UdharRepository {
    pool: SqlitePool,
}

impl UdharRepository {
    /// Creates a new UdharRepository.
    pub fn new(pool: SqlitePool) -> Self {
        UdharRepository { pool }
    }

    /// Records a credit payment.
    ///
    /// The amount is assumed positive; the HTTP layer rejects anything
    /// else before it gets here.
    pub async fn record(
        &self,
        customer_name: Option<&str>,
        amount: Money,
        notes: Option<&str>,
    ) -> DbResult<UdharPayment> {
        let payment = UdharPayment {
            id: Uuid::new_v4().to_string(),
            customer_name: customer_name.map(str::to_string),
            amount_paisa: amount.paisa(),
            notes: notes.map(str::to_string),
            created_at: Utc::now(),
        };

        sqlx::query(
            "INSERT INTO udhar_payments (id, customer_name, amount_paisa, notes, created_at) \
             VALUES (?1, ?2, ?3, ?4, ?5)",
        )
        .bind(&payment.id)
        .bind(&payment.customer_name)
        .bind(payment.amount_paisa)
        .bind(&payment.notes)
        .bind(payment.created_at)
        .execute(&self.pool)
        .await?;

        debug!(
            payment_id = %payment.id,
            amount_paisa = payment.amount_paisa,
            "Udhar payment recorded"
        );

        Ok(payment)
    }

    /// Lists the most recent payments, newest first.
    pub async fn list_recent(&self, limit: u32) -> DbResult<Vec<UdharPayment>> {
        let payments = sqlx::query_as::<_, UdharPayment>(
            "SELECT id, customer_name, amount_paisa, notes, created_at \
             FROM udhar_payments ORDER BY created_at DESC, id LIMIT ?1",
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(payments)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
