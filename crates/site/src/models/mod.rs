//! Domain models for the site.
//!
//! These types represent validated domain objects separate from database
//! row types. Listing types (`CartLine`, `PurchaseLine`) are fully
//! materialized join results carrying the referenced product's fields.

pub mod cart;
pub mod product;
pub mod purchase;
pub mod session;
pub mod user;

pub use cart::{CartLine, cart_total};
pub use product::Product;
pub use purchase::PurchaseLine;
pub use session::{CurrentUser, session_keys};
pub use user::User;
