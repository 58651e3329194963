//! # mercato-core: Pure Business Logic for Mercato
//!
//! This crate is the heart of the Mercato cart & checkout engine. It
//! contains all business logic as pure functions with zero I/O
//! dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                      Mercato Architecture                           │
//! │                                                                     │
//! │  ┌─────────────────────────────────────────────────────────────┐   │
//! │  │                 Storefront Shell (TypeScript)                │   │
//! │  │   Cart page ──► Checkout ──► Payment ──► Confirmation        │   │
//! │  └────────────────────────────┬────────────────────────────────┘   │
//! │                               │                                     │
//! │  ┌────────────────────────────▼────────────────────────────────┐   │
//! │  │              mercato-checkout (session layer)               │   │
//! │  │   command functions, session state, error envelope          │   │
//! │  └────────────────────────────┬────────────────────────────────┘   │
//! │                               │                                     │
//! │  ┌────────────────────────────▼────────────────────────────────┐   │
//! │  │              ★ mercato-core (THIS CRATE) ★                  │   │
//! │  │                                                             │   │
//! │  │   ┌─────────┐ ┌─────────┐ ┌─────────┐ ┌─────────┐          │   │
//! │  │   │  types  │ │ variant │ │  cart   │ │ address │          │   │
//! │  │   │  money  │ │ parser  │ │  rules  │ │ voucher │          │   │
//! │  │   └─────────┘ └─────────┘ └─────────┘ └─────────┘          │   │
//! │  │                                                             │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS        │   │
//! │  └────────────────────────────┬────────────────────────────────┘   │
//! │                               │                                     │
//! │  ┌────────────────────────────▼────────────────────────────────┐   │
//! │  │              mercato-db (storage layer)                     │   │
//! │  │        SQLite-backed key→JSON blob namespace                │   │
//! │  └─────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (CartItem, ShippingAddress, Voucher, ...)
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`variant`] - Variant label → color/size descriptor parser
//! - [`cart`] - Cart collection rules and derived totals
//! - [`address`] - Address book with the single-default invariant
//! - [`voucher`] - Voucher working list and discount evaluation
//! - [`validation`] - Form-level input validation
//! - [`error`] - Domain error types

// =============================================================================
// Module Declarations
// =============================================================================

pub mod address;
pub mod cart;
pub mod error;
pub mod money;
pub mod types;
pub mod validation;
pub mod variant;
pub mod voucher;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use address::AddressBook;
pub use cart::{Cart, CartTotals};
pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use types::*;
pub use variant::{SizeLexicon, VariantDescriptor, VariantOptions};
pub use voucher::VoucherList;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Minimum quantity of a single line item.
pub const MIN_ITEM_QUANTITY: i64 = 1;

/// Maximum quantity of a single line item.
///
/// Requests outside `[MIN_ITEM_QUANTITY, MAX_ITEM_QUANTITY]` are rejected
/// with a limit notice and the stored quantity is left unchanged.
pub const MAX_ITEM_QUANTITY: i64 = 99;
