//! Product repository for database operations.
//!
//! Listings are joined with the seller's username so callers always get a
//! fully materialized [`Product`] (no lazy relationship traversal).

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;

use bazaar_core::{Price, ProductId, UserId, Username};

use super::RepositoryError;
use crate::models::Product;

// =============================================================================
// Internal Row Types
// =============================================================================

/// Internal row type for `PostgreSQL` product queries (joined with seller).
#[derive(Debug, sqlx::FromRow)]
struct ProductRow {
    id: i32,
    seller_id: i32,
    seller_username: String,
    title: String,
    description: String,
    price: Decimal,
    image_path: Option<String>,
    created_at: DateTime<Utc>,
}

impl TryFrom<ProductRow> for Product {
    type Error = RepositoryError;

    fn try_from(row: ProductRow) -> Result<Self, Self::Error> {
        let seller = Username::parse(&row.seller_username).map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid username in database: {e}"))
        })?;

        Ok(Self {
            id: ProductId::new(row.id),
            seller_id: UserId::new(row.seller_id),
            seller,
            title: row.title,
            description: row.description,
            price: Price::new(row.price),
            image_path: row.image_path,
            created_at: row.created_at,
        })
    }
}

const PRODUCT_SELECT: &str = r#"
    SELECT p.id, p.seller_id, u.username AS seller_username,
           p.title, p.description, p.price, p.image_path, p.created_at
    FROM bazaar.product p
    JOIN bazaar."user" u ON u.id = p.seller_id
"#;

// =============================================================================
// Repository
// =============================================================================

/// Repository for product database operations.
pub struct ProductRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> ProductRepository<'a> {
    /// Create a new product repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Create a new product attributed to `seller_id`.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails.
    pub async fn create(
        &self,
        seller_id: UserId,
        title: &str,
        description: &str,
        price: Price,
        image_path: Option<&str>,
    ) -> Result<ProductId, RepositoryError> {
        let id = sqlx::query_scalar::<_, i32>(
            r#"
            INSERT INTO bazaar.product (seller_id, title, description, price, image_path)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id
            "#,
        )
        .bind(seller_id.as_i32())
        .bind(title)
        .bind(description)
        .bind(price)
        .bind(image_path)
        .fetch_one(self.pool)
        .await?;

        Ok(ProductId::new(id))
    }

    /// Get a single product by ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if the joined data is invalid.
    pub async fn get_by_id(&self, id: ProductId) -> Result<Option<Product>, RepositoryError> {
        let row = sqlx::query_as::<_, ProductRow>(&format!("{PRODUCT_SELECT} WHERE p.id = $1"))
            .bind(id.as_i32())
            .fetch_optional(self.pool)
            .await?;

        row.map(TryInto::try_into).transpose()
    }

    /// List all products across all sellers, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if the joined data is invalid.
    pub async fn list_all(&self) -> Result<Vec<Product>, RepositoryError> {
        let rows = sqlx::query_as::<_, ProductRow>(&format!(
            "{PRODUCT_SELECT} ORDER BY p.created_at DESC, p.id DESC"
        ))
        .fetch_all(self.pool)
        .await?;

        rows.into_iter().map(TryInto::try_into).collect()
    }

    /// List one seller's products, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if the joined data is invalid.
    pub async fn list_by_seller(&self, seller_id: UserId) -> Result<Vec<Product>, RepositoryError> {
        let rows = sqlx::query_as::<_, ProductRow>(&format!(
            "{PRODUCT_SELECT} WHERE p.seller_id = $1 ORDER BY p.created_at DESC, p.id DESC"
        ))
        .bind(seller_id.as_i32())
        .fetch_all(self.pool)
        .await?;

        rows.into_iter().map(TryInto::try_into).collect()
    }
}
