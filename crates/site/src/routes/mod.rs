//! HTTP route handlers for the site.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                 - Health check
//!
//! # Auth
//! GET  /login                  - Login page (`next` honored on submit)
//! POST /login                  - Login action
//! GET  /signup                 - Signup page
//! POST /signup                 - Signup action (auto-login)
//! POST /logout                 - Logout action
//!
//! # Products (auth required)
//! GET  /                       - Feed: all products, newest first
//! GET  /add-product            - Add-product form
//! POST /add-product            - Create product (multipart, image upload)
//! GET  /my-listings            - Current user's products
//! GET  /product/{id}           - Product detail
//!
//! # Dashboard (auth required)
//! GET  /dashboard              - Placeholder landing page
//!
//! # Cart (auth required)
//! GET  /cart                   - Cart with line subtotals and grand total
//! POST /cart/add/{product_id}  - Add product to cart (or bump quantity)
//! POST /cart/remove/{cart_item_id} - Remove own cart line
//! POST /checkout               - Convert cart to purchases
//!
//! # Purchases (auth required)
//! GET  /purchases              - Purchase history, most recent first
//! ```
//!
//! All auth-required routes redirect unauthenticated visitors to `/login`
//! with the requested path preserved as the `next` parameter.

pub mod auth;
pub mod cart;
pub mod dashboard;
pub mod products;
pub mod purchases;

use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

/// Create the auth routes router.
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/login", get(auth::login_page).post(auth::login))
        .route("/signup", get(auth::signup_page).post(auth::signup))
        .route("/logout", post(auth::logout))
}

/// Create the product routes router.
pub fn product_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(products::feed))
        .route(
            "/add-product",
            get(products::new_product).post(products::create_product),
        )
        .route("/my-listings", get(products::my_listings))
        .route("/product/{id}", get(products::show))
}

/// Create the cart and checkout routes router.
pub fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/cart", get(cart::show))
        .route("/cart/add/{product_id}", post(cart::add))
        .route("/cart/remove/{cart_item_id}", post(cart::remove))
        .route("/checkout", post(cart::checkout))
}

/// Create all routes for the site.
pub fn routes() -> Router<AppState> {
    Router::new()
        .merge(product_routes())
        .merge(cart_routes())
        .route("/dashboard", get(dashboard::dashboard))
        .route("/purchases", get(purchases::index))
        .merge(auth_routes())
}
