//! Custom Askama template filters.

#![allow(clippy::unnecessary_wraps)]

use std::fmt::Display;

use rust_decimal::Decimal;

/// Returns the current year.
///
/// Usage in templates: `{{ ""|current_year }}`
#[allow(clippy::unnecessary_wraps)]
#[askama::filter_fn]
pub fn current_year(_value: impl Display, _env: &dyn askama::Values) -> askama::Result<i32> {
    use chrono::Datelike;
    Ok(chrono::Utc::now().year())
}

/// Formats a decimal amount as a dollar price, e.g. `20.5` -> `$20.50`.
///
/// Usage in templates: `{{ total|money }}`
#[allow(clippy::unnecessary_wraps)]
#[askama::filter_fn]
pub fn money(value: impl Display, _env: &dyn askama::Values) -> askama::Result<String> {
    Ok(format_money(&value.to_string()))
}

/// Format a raw decimal string as a dollar amount with two fraction digits.
fn format_money(raw: &str) -> String {
    raw.parse::<Decimal>()
        .map_or_else(|_| format!("${raw}"), |amount| format!("${amount:.2}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_money_pads_cents() {
        assert_eq!(format_money("20.5"), "$20.50");
        assert_eq!(format_money("20"), "$20.00");
        assert_eq!(format_money("19.99"), "$19.99");
    }

    #[test]
    fn test_format_money_passes_through_non_numeric() {
        assert_eq!(format_money("n/a"), "$n/a");
    }
}
