//! # Voucher Session State
//!
//! Holds the voucher sheet's working list. The catalog arrives from the
//! product/shop context when the sheet opens and never reaches storage;
//! only a confirmed projection is persisted.

use std::sync::{Arc, Mutex};

use mercato_core::VoucherList;

/// Session-managed voucher working list.
#[derive(Debug, Default)]
pub struct VoucherState {
    list: Arc<Mutex<VoucherList>>,
}

impl VoucherState {
    pub fn new() -> Self {
        VoucherState {
            list: Arc::new(Mutex::new(VoucherList::default())),
        }
    }

    /// Replaces the working list (voucher sheet opened with a catalog).
    pub fn replace(&self, list: VoucherList) {
        let mut guard = self.list.lock().expect("Voucher mutex poisoned");
        *guard = list;
    }

    /// Executes a function with read access to the list.
    pub fn with_list<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&VoucherList) -> R,
    {
        let list = self.list.lock().expect("Voucher mutex poisoned");
        f(&list)
    }

    /// Executes a function with write access to the list.
    pub fn with_list_mut<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut VoucherList) -> R,
    {
        let mut list = self.list.lock().expect("Voucher mutex poisoned");
        f(&mut list)
    }
}
