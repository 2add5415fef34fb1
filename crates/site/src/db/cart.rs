//! Cart repository for database operations.
//!
//! The cart has at most one row per (user, product) pair; a repeated add
//! is an atomic quantity increment on the existing row.

use rust_decimal::Decimal;
use sqlx::PgPool;

use bazaar_core::{CartItemId, Price, ProductId, UserId};

use super::RepositoryError;
use crate::models::CartLine;

// =============================================================================
// Internal Row Types
// =============================================================================

/// Internal row type for cart line queries (joined with product).
#[derive(Debug, sqlx::FromRow)]
struct CartLineRow {
    id: i32,
    product_id: i32,
    title: String,
    price: Decimal,
    image_path: Option<String>,
    quantity: i32,
}

impl From<CartLineRow> for CartLine {
    fn from(row: CartLineRow) -> Self {
        Self {
            id: CartItemId::new(row.id),
            product_id: ProductId::new(row.product_id),
            title: row.title,
            price: Price::new(row.price),
            image_path: row.image_path,
            quantity: row.quantity,
        }
    }
}

// =============================================================================
// Repository
// =============================================================================

/// Repository for cart database operations.
pub struct CartRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> CartRepository<'a> {
    /// Create a new cart repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Add one unit of a product to a user's cart.
    ///
    /// Creates the (user, product) row with quantity 1, or atomically
    /// increments the quantity of the existing row. The unique constraint
    /// on (`user_id`, `product_id`) guarantees a single row per pair even
    /// under concurrent adds.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the upsert fails (e.g., the
    /// product no longer exists).
    pub async fn add_product(
        &self,
        user_id: UserId,
        product_id: ProductId,
    ) -> Result<CartItemId, RepositoryError> {
        let id = sqlx::query_scalar::<_, i32>(
            r#"
            INSERT INTO bazaar.cart_item (user_id, product_id)
            VALUES ($1, $2)
            ON CONFLICT (user_id, product_id)
            DO UPDATE SET quantity = cart_item.quantity + 1
            RETURNING id
            "#,
        )
        .bind(user_id.as_i32())
        .bind(product_id.as_i32())
        .fetch_one(self.pool)
        .await?;

        Ok(CartItemId::new(id))
    }

    /// List a user's cart lines, oldest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_for_user(&self, user_id: UserId) -> Result<Vec<CartLine>, RepositoryError> {
        let rows = sqlx::query_as::<_, CartLineRow>(
            r#"
            SELECT ci.id, ci.product_id, p.title, p.price, p.image_path, ci.quantity
            FROM bazaar.cart_item ci
            JOIN bazaar.product p ON p.id = ci.product_id
            WHERE ci.user_id = $1
            ORDER BY ci.created_at ASC, ci.id ASC
            "#,
        )
        .bind(user_id.as_i32())
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    /// Remove a cart line owned by `user_id`.
    ///
    /// The delete is scoped by owner, so another user's cart item (or a
    /// nonexistent one) yields `NotFound` and nothing is changed.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if no matching row was deleted.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn remove(
        &self,
        user_id: UserId,
        cart_item_id: CartItemId,
    ) -> Result<(), RepositoryError> {
        let result = sqlx::query(
            r#"
            DELETE FROM bazaar.cart_item
            WHERE id = $1 AND user_id = $2
            "#,
        )
        .bind(cart_item_id.as_i32())
        .bind(user_id.as_i32())
        .execute(self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }
}
