//! Product domain types.

use chrono::{DateTime, Utc};

use bazaar_core::{Price, ProductId, UserId, Username};

/// A marketplace listing (domain type).
///
/// Immutable after creation; the seller is attribution only and grants
/// no special access.
#[derive(Debug, Clone)]
pub struct Product {
    /// Unique product ID.
    pub id: ProductId,
    /// ID of the user who listed this product.
    pub seller_id: UserId,
    /// Username of the seller (joined for display).
    pub seller: Username,
    /// Listing title.
    pub title: String,
    /// Listing description.
    pub description: String,
    /// Unit price.
    pub price: Price,
    /// Path of the uploaded image, relative to the media directory.
    pub image_path: Option<String>,
    /// When the product was listed.
    pub created_at: DateTime<Utc>,
}
