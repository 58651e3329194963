//! # Preference Commands
//!
//! Locale get/set for the UI shell.

use tracing::debug;

use mercato_core::Locale;
use mercato_db::Database;

use crate::error::ApiError;

/// The stored locale (default when unset or unrecognized).
pub async fn get_locale(db: &Database) -> Result<Locale, ApiError> {
    Ok(db.prefs().locale().await?)
}

/// Persists the locale preference.
pub async fn set_locale(db: &Database, locale: Locale) -> Result<Locale, ApiError> {
    debug!(locale = locale.as_str(), "set_locale command");

    db.prefs().set_locale(locale).await?;
    Ok(locale)
}
