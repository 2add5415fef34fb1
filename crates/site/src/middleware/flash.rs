//! One-shot flash messages.
//!
//! A flash is an explicit notification value stored under a single session
//! key by the handler that produced it, and removed by the [`TakeFlash`]
//! extractor on the next rendered page, so it is shown exactly once.

use axum::{extract::FromRequestParts, http::request::Parts};
use serde::{Deserialize, Serialize};
use tower_sessions::Session;

use crate::models::session_keys;

/// Severity of a flash message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FlashLevel {
    Success,
    Info,
    Warning,
    Error,
}

impl FlashLevel {
    /// CSS class suffix for the message banner.
    #[must_use]
    pub const fn css_class(&self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Info => "info",
            Self::Warning => "warning",
            Self::Error => "error",
        }
    }
}

/// A one-shot user-visible status message.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Flash {
    /// Message severity, mapped to a banner style.
    pub level: FlashLevel,
    /// Message text.
    pub message: String,
}

impl Flash {
    /// A success message.
    #[must_use]
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: FlashLevel::Success,
            message: message.into(),
        }
    }

    /// An informational message.
    #[must_use]
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            level: FlashLevel::Info,
            message: message.into(),
        }
    }

    /// A warning message.
    #[must_use]
    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            level: FlashLevel::Warning,
            message: message.into(),
        }
    }

    /// An error message.
    #[must_use]
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: FlashLevel::Error,
            message: message.into(),
        }
    }
}

/// Store a flash message in the session, replacing any pending one.
///
/// # Errors
///
/// Returns an error if the session cannot be modified.
pub async fn push_flash(
    session: &Session,
    flash: Flash,
) -> Result<(), tower_sessions::session::Error> {
    session.insert(session_keys::FLASH, flash).await
}

/// Extractor that takes the pending flash message, if any.
///
/// Taking removes the message from the session, so a flash renders on
/// exactly one page.
pub struct TakeFlash(pub Option<Flash>);

impl<S> FromRequestParts<S> for TakeFlash
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let flash = match parts.extensions.get::<Session>() {
            Some(session) => session
                .remove::<Flash>(session_keys::FLASH)
                .await
                .ok()
                .flatten(),
            None => None,
        };

        Ok(Self(flash))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_css_classes() {
        assert_eq!(FlashLevel::Success.css_class(), "success");
        assert_eq!(FlashLevel::Info.css_class(), "info");
        assert_eq!(FlashLevel::Warning.css_class(), "warning");
        assert_eq!(FlashLevel::Error.css_class(), "error");
    }

    #[test]
    fn test_constructors_set_level() {
        assert_eq!(Flash::success("ok").level, FlashLevel::Success);
        assert_eq!(Flash::info("i").level, FlashLevel::Info);
        assert_eq!(Flash::warning("w").level, FlashLevel::Warning);
        assert_eq!(Flash::error("e").level, FlashLevel::Error);
    }

    #[test]
    fn test_serde_roundtrip() {
        let flash = Flash::warning("Your cart is empty.");
        let json = serde_json::to_string(&flash).unwrap();
        let parsed: Flash = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.level, FlashLevel::Warning);
        assert_eq!(parsed.message, "Your cart is empty.");
    }
}
