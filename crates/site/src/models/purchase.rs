//! Purchase domain types.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use bazaar_core::{Price, ProductId, PurchaseId};

/// A purchase history line: an immutable record written at checkout,
/// joined with the product fields needed for display.
///
/// Fully decoupled from the cart item it was converted from.
#[derive(Debug, Clone)]
pub struct PurchaseLine {
    /// ID of the purchase row.
    pub id: PurchaseId,
    /// ID of the purchased product.
    pub product_id: ProductId,
    /// Product title.
    pub title: String,
    /// Unit price at the time of display (products are immutable, so this
    /// is also the price at purchase time).
    pub price: Price,
    /// Product image path, if any.
    pub image_path: Option<String>,
    /// Number of units purchased.
    pub quantity: i32,
    /// When the purchase was made.
    pub purchased_at: DateTime<Utc>,
}

impl PurchaseLine {
    /// Total paid for this line: unit price × quantity.
    #[must_use]
    pub fn subtotal(&self) -> Decimal {
        self.price.line_total(self.quantity)
    }
}
