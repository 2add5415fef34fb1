//! Purchase repository for database operations.
//!
//! Purchases are append-only history rows written at checkout.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;

use bazaar_core::{Price, ProductId, PurchaseId, UserId};

use super::RepositoryError;
use crate::models::PurchaseLine;

// =============================================================================
// Internal Row Types
// =============================================================================

/// Internal row type for purchase history queries (joined with product).
#[derive(Debug, sqlx::FromRow)]
struct PurchaseLineRow {
    id: i32,
    product_id: i32,
    title: String,
    price: Decimal,
    image_path: Option<String>,
    quantity: i32,
    purchased_at: DateTime<Utc>,
}

impl From<PurchaseLineRow> for PurchaseLine {
    fn from(row: PurchaseLineRow) -> Self {
        Self {
            id: PurchaseId::new(row.id),
            product_id: ProductId::new(row.product_id),
            title: row.title,
            price: Price::new(row.price),
            image_path: row.image_path,
            quantity: row.quantity,
            purchased_at: row.purchased_at,
        }
    }
}

// =============================================================================
// Repository
// =============================================================================

/// Repository for purchase database operations.
pub struct PurchaseRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> PurchaseRepository<'a> {
    /// Create a new purchase repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Convert a user's entire cart into purchases, atomically.
    ///
    /// Inside one transaction: one purchase row is inserted per cart line,
    /// carrying (user, product, quantity), then all of the user's cart
    /// lines are deleted. Returns the number of purchases created; `0`
    /// means the cart was empty and nothing was written.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if any statement fails; the
    /// transaction is rolled back and the cart is left untouched.
    pub async fn checkout_cart(&self, user_id: UserId) -> Result<u64, RepositoryError> {
        let mut tx = self.pool.begin().await?;

        let inserted = sqlx::query(
            r#"
            INSERT INTO bazaar.purchase (user_id, product_id, quantity)
            SELECT user_id, product_id, quantity
            FROM bazaar.cart_item
            WHERE user_id = $1
            "#,
        )
        .bind(user_id.as_i32())
        .execute(&mut *tx)
        .await?
        .rows_affected();

        if inserted == 0 {
            // Empty cart: nothing to convert, nothing to delete.
            return Ok(0);
        }

        sqlx::query(
            r#"
            DELETE FROM bazaar.cart_item
            WHERE user_id = $1
            "#,
        )
        .bind(user_id.as_i32())
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(inserted)
    }

    /// List a user's purchase history, most recent first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_for_user(
        &self,
        user_id: UserId,
    ) -> Result<Vec<PurchaseLine>, RepositoryError> {
        let rows = sqlx::query_as::<_, PurchaseLineRow>(
            r#"
            SELECT pu.id, pu.product_id, p.title, p.price, p.image_path,
                   pu.quantity, pu.purchased_at
            FROM bazaar.purchase pu
            JOIN bazaar.product p ON p.id = pu.product_id
            WHERE pu.user_id = $1
            ORDER BY pu.purchased_at DESC, pu.id DESC
            "#,
        )
        .bind(user_id.as_i32())
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }
}
