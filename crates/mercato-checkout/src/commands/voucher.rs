//! # Voucher Commands
//!
//! Session commands for the voucher sheet: load the working list, toggle
//! entries, and confirm the selection into storage.

use tracing::debug;

use mercato_core::{CoreResult, Voucher, VoucherList, VoucherSelection};
use mercato_db::Database;

use crate::error::ApiError;
use crate::state::VoucherState;

/// Opens the voucher sheet with a catalog, replacing the working list.
pub fn load_vouchers(state: &VoucherState, catalog: Vec<Voucher>) -> Vec<Voucher> {
    debug!(count = catalog.len(), "load_vouchers command");

    state.replace(VoucherList::from_catalog(catalog));
    state.with_list(|l| l.vouchers().to_vec())
}

/// Toggles one voucher's selection state.
///
/// Unavailable vouchers are rejected with a business-rule notice and the
/// working list is unchanged.
pub fn toggle_voucher(state: &VoucherState, voucher_id: &str) -> Result<Vec<Voucher>, ApiError> {
    debug!(voucher_id = %voucher_id, "toggle_voucher command");

    let result: CoreResult<Vec<Voucher>> = state.with_list_mut(|l| {
        l.toggle(voucher_id)?;
        Ok(l.vouchers().to_vec())
    });
    result.map_err(ApiError::from)
}

/// Confirms the working selection into storage.
///
/// Filters to available-and-selected, projects to the persisted shape,
/// and replaces the entire persisted set atomically.
pub async fn confirm_vouchers(
    db: &Database,
    state: &VoucherState,
) -> Result<Vec<VoucherSelection>, ApiError> {
    let selections = state.with_list(|l| l.confirm());
    debug!(count = selections.len(), "confirm_vouchers command");

    db.vouchers().save_selection(&selections).await?;
    Ok(selections)
}

/// The currently persisted selection.
pub async fn selected_vouchers(db: &Database) -> Result<Vec<VoucherSelection>, ApiError> {
    Ok(db.vouchers().load_selection().await?)
}

// =============================================================================
// Unit Tests
// =============================================================================
