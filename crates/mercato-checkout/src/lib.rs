//! # mercato-checkout: Session Layer for Mercato
//!
//! The layer a storefront shell drives. It owns the in-memory session
//! state (current cart, working voucher list) and exposes command
//! functions that enforce reconciliation invariants and read/write the
//! storage namespace through an injected [`mercato_db::Database`].
//!
//! ## Module Organization
//! ```text
//! mercato_checkout/
//! ├── lib.rs          ◄─── You are here
//! ├── state/
//! │   ├── cart.rs     ◄─── Cart session state (Arc<Mutex<Cart>>)
//! │   └── vouchers.rs ◄─── Voucher working list state
//! ├── commands/
//! │   ├── cart.rs     ◄─── Cart manipulation commands
//! │   ├── address.rs  ◄─── Address book commands
//! │   ├── voucher.rs  ◄─── Voucher sheet commands
//! │   ├── order.rs    ◄─── Checkout / confirmation commands
//! │   └── prefs.rs    ◄─── Locale preference commands
//! └── error.rs        ◄─── ApiError envelope for the shell
//! ```
//!
//! ## Concurrency Model
//! Single-writer, event-driven: mutations happen in response to discrete
//! UI events and run to completion before the next is processed. The
//! mutexes exist because the shell's runtime may hop threads, not because
//! two commands ever interleave on the same collection.

pub mod commands;
pub mod error;
pub mod state;

pub use commands::{AddressBookResponse, AddressForm, CartResponse, CheckoutRequest};
pub use error::{ApiError, ErrorCode};
pub use state::{CartState, VoucherState};
