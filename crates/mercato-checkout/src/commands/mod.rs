//! # Command Module
//!
//! The session commands the UI shell invokes. Each command runs to
//! completion before the next is processed; a read-modify-write cycle
//! against storage happens within one command, so no handler observes an
//! intermediate state.

pub mod address;
pub mod cart;
pub mod order;
pub mod prefs;
pub mod voucher;

pub use address::{AddressBookResponse, AddressForm};
pub use cart::CartResponse;
pub use order::CheckoutRequest;
