//! Purchase history route handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::State,
    response::{IntoResponse, Response},
};
use rust_decimal::Decimal;

use crate::error::Result;
use crate::filters;
use crate::middleware::{Flash, RequireAuth, TakeFlash};
use crate::models::PurchaseLine;
use crate::state::AppState;

/// Purchase display data for templates.
#[derive(Clone)]
pub struct PurchaseView {
    pub product_id: i32,
    pub title: String,
    pub price: bazaar_core::Price,
    pub quantity: i32,
    pub subtotal: Decimal,
    pub purchased: String,
}

impl From<&PurchaseLine> for PurchaseView {
    fn from(line: &PurchaseLine) -> Self {
        Self {
            product_id: line.product_id.as_i32(),
            title: line.title.clone(),
            price: line.price,
            quantity: line.quantity,
            subtotal: line.subtotal(),
            purchased: line.purchased_at.format("%b %e, %Y %H:%M").to_string(),
        }
    }
}

/// Purchase history page template.
#[derive(Template, WebTemplate)]
#[template(path = "purchases/index.html")]
pub struct PurchasesTemplate {
    pub purchases: Vec<PurchaseView>,
    pub flash: Option<Flash>,
}

/// Display the current user's purchase history, most recent first.
pub async fn index(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    TakeFlash(flash): TakeFlash,
) -> Result<Response> {
    let purchases = crate::db::PurchaseRepository::new(state.pool())
        .list_for_user(user.id)
        .await?;

    Ok(PurchasesTemplate {
        purchases: purchases.iter().map(Into::into).collect(),
        flash,
    }
    .into_response())
}
