//! Cart route handlers.
//!
//! Viewing the cart, adding and removing lines, and checkout. Every
//! mutation redirects back to a cart or history page with a flash.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Path, State},
    response::{IntoResponse, Redirect, Response},
};
use rust_decimal::Decimal;
use tower_sessions::Session;

use bazaar_core::{CartItemId, ProductId};

use crate::error::{AppError, Result};
use crate::filters;
use crate::middleware::{Flash, RequireAuth, TakeFlash, push_flash};
use crate::models::{CartLine, cart_total};
use crate::state::AppState;

// =============================================================================
// View Types
// =============================================================================

/// Cart line display data for templates.
#[derive(Clone)]
pub struct CartLineView {
    pub id: i32,
    pub product_id: i32,
    pub title: String,
    pub price: bazaar_core::Price,
    pub quantity: i32,
    pub subtotal: Decimal,
    pub image_url: Option<String>,
}

impl From<&CartLine> for CartLineView {
    fn from(line: &CartLine) -> Self {
        Self {
            id: line.id.as_i32(),
            product_id: line.product_id.as_i32(),
            title: line.title.clone(),
            price: line.price,
            quantity: line.quantity,
            subtotal: line.subtotal(),
            image_url: line.image_path.as_ref().map(|p| format!("/media/{p}")),
        }
    }
}

// =============================================================================
// Templates
// =============================================================================

/// Cart page template.
#[derive(Template, WebTemplate)]
#[template(path = "cart/show.html")]
pub struct CartShowTemplate {
    pub lines: Vec<CartLineView>,
    pub total: Decimal,
    pub flash: Option<Flash>,
}

// =============================================================================
// Routes
// =============================================================================

/// Display the cart with per-line subtotals and the grand total.
pub async fn show(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    TakeFlash(flash): TakeFlash,
) -> Result<Response> {
    let lines = crate::db::CartRepository::new(state.pool())
        .list_for_user(user.id)
        .await?;

    Ok(CartShowTemplate {
        total: cart_total(&lines),
        lines: lines.iter().map(Into::into).collect(),
        flash,
    }
    .into_response())
}

/// Add one unit of a product to the cart.
///
/// A first add creates the line with quantity 1; adding the same product
/// again increments the existing line by exactly 1. An unknown product
/// is a 404.
pub async fn add(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    session: Session,
    Path(product_id): Path<i32>,
) -> Result<Response> {
    let product = crate::db::ProductRepository::new(state.pool())
        .get_by_id(ProductId::new(product_id))
        .await?
        .ok_or_else(|| AppError::NotFound(format!("product {product_id}")))?;

    crate::db::CartRepository::new(state.pool())
        .add_product(user.id, product.id)
        .await?;

    push_flash(&session, Flash::success(format!("{} added to cart!", product.title))).await?;

    Ok(Redirect::to("/cart").into_response())
}

/// Remove a cart line.
///
/// The lookup is scoped to the current user, so a line owned by someone
/// else is a 404, never a cross-user deletion.
pub async fn remove(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    session: Session,
    Path(cart_item_id): Path<i32>,
) -> Result<Response> {
    crate::db::CartRepository::new(state.pool())
        .remove(user.id, CartItemId::new(cart_item_id))
        .await
        .map_err(|e| match e {
            crate::db::RepositoryError::NotFound => {
                AppError::NotFound(format!("cart item {cart_item_id}"))
            }
            other => AppError::Database(other),
        })?;

    push_flash(&session, Flash::info("Item removed from cart.")).await?;

    Ok(Redirect::to("/cart").into_response())
}

/// Convert the cart into purchases.
///
/// An empty cart produces no purchases and bounces back to the cart with
/// a warning. Otherwise every line becomes one purchase record in a
/// single transaction and the cart is left empty.
pub async fn checkout(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    session: Session,
) -> Result<Response> {
    let converted = crate::db::PurchaseRepository::new(state.pool())
        .checkout_cart(user.id)
        .await?;

    if converted == 0 {
        push_flash(&session, Flash::warning("Your cart is empty.")).await?;
        return Ok(Redirect::to("/cart").into_response());
    }

    tracing::info!(user = %user.username, lines = converted, "checkout complete");
    push_flash(
        &session,
        Flash::success("Checkout complete! Thank you for your purchase."),
    )
    .await?;

    Ok(Redirect::to("/purchases").into_response())
}
