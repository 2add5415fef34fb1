//! Cart domain types.

use rust_decimal::Decimal;

use bazaar_core::{CartItemId, Price, ProductId};

/// A cart line: one (user, product) pair with its quantity, joined with
/// the product fields needed for display.
#[derive(Debug, Clone)]
pub struct CartLine {
    /// ID of the cart item row.
    pub id: CartItemId,
    /// ID of the product in the cart.
    pub product_id: ProductId,
    /// Product title.
    pub title: String,
    /// Unit price.
    pub price: Price,
    /// Product image path, if any.
    pub image_path: Option<String>,
    /// Number of units, always >= 1.
    pub quantity: i32,
}

impl CartLine {
    /// Line subtotal: unit price × quantity.
    #[must_use]
    pub fn subtotal(&self) -> Decimal {
        self.price.line_total(self.quantity)
    }
}

/// Grand total of a cart: the sum of line subtotals.
#[must_use]
pub fn cart_total(lines: &[CartLine]) -> Decimal {
    lines.iter().map(CartLine::subtotal).sum()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn line(id: i32, price: &str, quantity: i32) -> CartLine {
        CartLine {
            id: CartItemId::new(id),
            product_id: ProductId::new(id),
            title: format!("item {id}"),
            price: Price::parse(price).unwrap(),
            image_path: None,
            quantity,
        }
    }

    #[test]
    fn test_subtotal_multiplies_quantity() {
        // 10.00 × 2 = 20.00
        assert_eq!(line(1, "10.00", 2).subtotal(), Decimal::new(2000, 2));
    }

    #[test]
    fn test_subtotal_single_unit() {
        let l = line(1, "19.99", 1);
        assert_eq!(l.subtotal(), l.price.amount());
    }

    #[test]
    fn test_cart_total_sums_lines() {
        let lines = vec![line(1, "10.00", 2), line(2, "0.50", 3)];
        assert_eq!(cart_total(&lines), Decimal::new(2150, 2));
    }

    #[test]
    fn test_cart_total_empty() {
        assert_eq!(cart_total(&[]), Decimal::ZERO);
    }
}
