//! Authentication route handlers.
//!
//! Handles login, signup (with auto-login), and logout.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Query, State},
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use tower_sessions::Session;

use crate::error::Result;
use crate::filters;
use crate::middleware::{
    Flash, OptionalAuth, TakeFlash, clear_current_user, push_flash, set_current_user,
};
use crate::models::CurrentUser;
use crate::services::auth::{AuthError, AuthService, MIN_PASSWORD_LENGTH};
use crate::state::AppState;

use bazaar_core::Username;

// =============================================================================
// Form Types
// =============================================================================

/// Login form data.
#[derive(Debug, Deserialize)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
    #[serde(default)]
    pub next: String,
}

/// Signup form data.
#[derive(Debug, Deserialize)]
pub struct SignupForm {
    pub username: String,
    pub password1: String,
    pub password2: String,
}

/// Query parameters carrying the intended destination.
#[derive(Debug, Deserialize)]
pub struct NextQuery {
    pub next: Option<String>,
}

// =============================================================================
// Templates
// =============================================================================

/// Login page template.
#[derive(Template, WebTemplate)]
#[template(path = "auth/login.html")]
pub struct LoginTemplate {
    pub error: Option<String>,
    pub next: String,
    pub flash: Option<Flash>,
}

/// Field-level signup errors.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct SignupErrors {
    pub username: Option<String>,
    pub password: Option<String>,
}

impl SignupErrors {
    /// True if no field has an error.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.username.is_none() && self.password.is_none()
    }
}

/// Signup page template.
#[derive(Template, WebTemplate)]
#[template(path = "auth/signup.html")]
pub struct SignupTemplate {
    pub username: String,
    pub errors: SignupErrors,
    pub flash: Option<Flash>,
}

// =============================================================================
// Validation
// =============================================================================

/// The `next` target, if it is safe to redirect to.
///
/// Only local paths are honored, so the login form cannot be used as an
/// open redirect.
fn safe_next_target(next: &str) -> Option<&str> {
    if next.starts_with('/') && !next.starts_with("//") {
        Some(next)
    } else {
        None
    }
}

/// Validate a signup form, returning field-level errors.
fn validate_signup(form: &SignupForm) -> SignupErrors {
    let mut errors = SignupErrors::default();

    if let Err(e) = Username::parse(&form.username) {
        errors.username = Some(e.to_string());
    }

    if form.password1.len() < MIN_PASSWORD_LENGTH {
        errors.password = Some(format!(
            "password must be at least {MIN_PASSWORD_LENGTH} characters"
        ));
    } else if form.password1 != form.password2 {
        errors.password = Some("passwords do not match".to_string());
    }

    errors
}

// =============================================================================
// Login Routes
// =============================================================================

/// Display the login page.
///
/// Already-authenticated visitors are sent to the feed without re-prompting.
pub async fn login_page(
    OptionalAuth(user): OptionalAuth,
    TakeFlash(flash): TakeFlash,
    Query(query): Query<NextQuery>,
) -> Response {
    if user.is_some() {
        return Redirect::to("/").into_response();
    }

    LoginTemplate {
        error: None,
        next: query.next.unwrap_or_default(),
        flash,
    }
    .into_response()
}

/// Handle login form submission.
///
/// On success establishes a session and redirects to the caller-supplied
/// `next` target or the feed. On failure re-renders the form with a
/// generic error, without revealing which field was wrong.
pub async fn login(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<LoginForm>,
) -> Result<Response> {
    let auth = AuthService::new(state.pool());

    match auth.login(&form.username, &form.password).await {
        Ok(user) => {
            let current_user = CurrentUser {
                id: user.id,
                username: user.username.clone(),
            };
            set_current_user(&session, &current_user).await?;
            push_flash(&session, Flash::success(format!("Welcome back, {}!", user.username)))
                .await?;

            let target = safe_next_target(&form.next).unwrap_or("/");
            Ok(Redirect::to(target).into_response())
        }
        Err(AuthError::InvalidCredentials) => {
            tracing::warn!(username = %form.username, "login failed");
            Ok(LoginTemplate {
                error: Some("Invalid username or password.".to_string()),
                next: form.next,
                flash: None,
            }
            .into_response())
        }
        Err(e) => Err(e.into()),
    }
}

// =============================================================================
// Signup Routes
// =============================================================================

/// Display the signup page.
///
/// Already-authenticated visitors are sent to the feed.
pub async fn signup_page(
    OptionalAuth(user): OptionalAuth,
    TakeFlash(flash): TakeFlash,
) -> Response {
    if user.is_some() {
        return Redirect::to("/").into_response();
    }

    SignupTemplate {
        username: String::new(),
        errors: SignupErrors::default(),
        flash,
    }
    .into_response()
}

/// Handle signup form submission.
///
/// On success creates the account, establishes a session for it
/// (auto-login) and redirects to the feed. On validation failure
/// re-renders the form with field-level errors and no state change.
pub async fn signup(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<SignupForm>,
) -> Result<Response> {
    let errors = validate_signup(&form);
    if !errors.is_empty() {
        return Ok(SignupTemplate {
            username: form.username,
            errors,
            flash: None,
        }
        .into_response());
    }

    let auth = AuthService::new(state.pool());

    match auth.register(&form.username, &form.password1).await {
        Ok(user) => {
            let current_user = CurrentUser {
                id: user.id,
                username: user.username.clone(),
            };
            set_current_user(&session, &current_user).await?;
            push_flash(&session, Flash::success(format!("Welcome, {}!", user.username))).await?;

            Ok(Redirect::to("/").into_response())
        }
        Err(AuthError::UserAlreadyExists) => Ok(SignupTemplate {
            username: form.username,
            errors: SignupErrors {
                username: Some("That username is already taken.".to_string()),
                password: None,
            },
            flash: None,
        }
        .into_response()),
        Err(e) => Err(e.into()),
    }
}

// =============================================================================
// Logout Route
// =============================================================================

/// Handle logout.
///
/// Clears the authenticated user unconditionally and rotates the session
/// ID before redirecting to the login page.
pub async fn logout(session: Session) -> Result<Response> {
    clear_current_user(&session).await?;
    if let Err(e) = session.cycle_id().await {
        tracing::error!("Failed to cycle session id: {e}");
    }
    push_flash(&session, Flash::info("You have been logged out.")).await?;

    Ok(Redirect::to("/login").into_response())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(username: &str, p1: &str, p2: &str) -> SignupForm {
        SignupForm {
            username: username.to_string(),
            password1: p1.to_string(),
            password2: p2.to_string(),
        }
    }

    #[test]
    fn test_safe_next_target_local_path() {
        assert_eq!(safe_next_target("/cart"), Some("/cart"));
        assert_eq!(safe_next_target("/product/7?ref=feed"), Some("/product/7?ref=feed"));
    }

    #[test]
    fn test_safe_next_target_rejects_external() {
        assert_eq!(safe_next_target("https://evil.example"), None);
        assert_eq!(safe_next_target("//evil.example"), None);
        assert_eq!(safe_next_target(""), None);
    }

    #[test]
    fn test_validate_signup_ok() {
        let errors = validate_signup(&form("ada", "long enough", "long enough"));
        assert!(errors.is_empty());
    }

    #[test]
    fn test_validate_signup_bad_username() {
        let errors = validate_signup(&form("ada lovelace", "long enough", "long enough"));
        assert!(errors.username.is_some());
        assert!(errors.password.is_none());
    }

    #[test]
    fn test_validate_signup_short_password() {
        let errors = validate_signup(&form("ada", "short", "short"));
        assert!(errors.password.is_some());
    }

    #[test]
    fn test_validate_signup_mismatched_passwords() {
        let errors = validate_signup(&form("ada", "long enough", "different!"));
        assert_eq!(errors.password.as_deref(), Some("passwords do not match"));
    }
}
