//! # State Module
//!
//! Session state for the checkout engine, one state type per concern:
//! commands declare exactly what they need, and independent state does
//! not contend on a shared lock.

mod cart;
mod vouchers;

pub use cart::CartState;
pub use vouchers::VoucherState;
