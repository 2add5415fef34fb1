//! Dashboard route handler.
//!
//! A placeholder landing page for logged-in users.

use askama::Template;
use askama_web::WebTemplate;
use axum::response::IntoResponse;

use crate::filters;
use crate::middleware::{Flash, RequireAuth, TakeFlash};

/// Dashboard page template.
#[derive(Template, WebTemplate)]
#[template(path = "dashboard.html")]
pub struct DashboardTemplate {
    pub username: String,
    pub flash: Option<Flash>,
}

/// Display the dashboard.
pub async fn dashboard(
    RequireAuth(user): RequireAuth,
    TakeFlash(flash): TakeFlash,
) -> impl IntoResponse {
    DashboardTemplate {
        username: user.username.to_string(),
        flash,
    }
}
