//! # Voucher Repository
//!
//! Persistence for the confirmed voucher selection.
//!
//! The details array and its count mirror are written in one transaction,
//! and a confirm always replaces the entire persisted set; there is no
//! partial merge with a prior selection.

use sqlx::SqlitePool;

use mercato_core::VoucherSelection;

use crate::error::DbResult;
use crate::keys;
use crate::repository::storage::{self, StorageRepository};

/// Repository for voucher-selection persistence.
#[derive(Debug, Clone)]
pub struct VoucherRepository {
    storage: StorageRepository,
}

impl VoucherRepository {
    pub fn new(pool: SqlitePool) -> Self {
        VoucherRepository {
            storage: StorageRepository::new(pool),
        }
    }

    /// Replaces the persisted selection atomically (details + count).
    pub async fn save_selection(&self, selections: &[VoucherSelection]) -> DbResult<()> {
        let details = serde_json::to_string(&selections)?;
        let count = serde_json::to_string(&selections.len())?;

        let mut tx = self.storage.pool().begin().await?;
        storage::upsert(&mut *tx, keys::SELECTED_VOUCHERS_DETAILS, &details).await?;
        storage::upsert(&mut *tx, keys::SELECTED_VOUCHER_USER_COUNT, &count).await?;
        tx.commit().await?;
        Ok(())
    }

    /// Loads the persisted selection, recovering to empty on a bad blob.
    pub async fn load_selection(&self) -> DbResult<Vec<VoucherSelection>> {
        self.storage
            .load_or_reset(keys::SELECTED_VOUCHERS_DETAILS)
            .await
    }

    /// The persisted count mirror.
    pub async fn selection_count(&self) -> DbResult<i64> {
        self.storage
            .load_or_reset(keys::SELECTED_VOUCHER_USER_COUNT)
            .await
    }

    /// Removes the selection and its count mirror together.
    pub async fn clear_selection(&self) -> DbResult<()> {
        let mut tx = self.storage.pool().begin().await?;
        storage::delete(&mut *tx, keys::SELECTED_VOUCHERS_DETAILS).await?;
        storage::delete(&mut *tx, keys::SELECTED_VOUCHER_USER_COUNT).await?;
        tx.commit().await?;
        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
