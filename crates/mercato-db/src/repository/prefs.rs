//! # Preferences Repository
//!
//! Scalar UI preferences. Currently just the locale.

use sqlx::SqlitePool;

use mercato_core::Locale;

use crate::error::DbResult;
use crate::keys;
use crate::repository::storage::StorageRepository;

/// Repository for scalar preferences.
#[derive(Debug, Clone)]
pub struct PrefsRepository {
    storage: StorageRepository,
}

impl PrefsRepository {
    pub fn new(pool: SqlitePool) -> Self {
        PrefsRepository {
            storage: StorageRepository::new(pool),
        }
    }

    /// The stored locale; an absent or unrecognized value is the default.
    pub async fn locale(&self) -> DbResult<Locale> {
        self.storage.load_or_reset(keys::LOCALE).await
    }

    pub async fn set_locale(&self, locale: Locale) -> DbResult<()> {
        self.storage.put_json(keys::LOCALE, &locale).await
    }
}
