//! Custom Askama template filters.

use std::fmt::Display;

/// Returns the current year.
///
/// Usage in templates: `{{ ""|current_year }}`
#[allow(clippy::unnecessary_wraps)]
#[askama::filter_fn]
pub fn current_year(_value: impl Display, _env: &dyn askama::Values) -> askama::Result<i32> {
    use chrono::Datelike;
    Ok(chrono::Utc::now().year())
}

/// Renders an empty value as a dash.
///
/// Used for optional columns so blank cells still read as "no value".
/// Usage in templates: `{{ shoe.name|dash }}`
#[allow(clippy::unnecessary_wraps)]
#[askama::filter_fn]
pub fn dash(value: impl Display, _env: &dyn askama::Values) -> askama::Result<String> {
    let rendered = value.to_string();
    if rendered.is_empty() {
        Ok("\u{2013}".to_string())
    } else {
        Ok(rendered)
    }
}
