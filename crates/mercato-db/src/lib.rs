//! # mercato-db: Storage Layer for Mercato
//!
//! This crate provides local storage for the Mercato cart & checkout
//! engine: a single SQLite table of key→JSON blobs shared by every screen
//! of the storefront shell.
//!
//! ## Data Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │  Session command (mercato-checkout)                                 │
//! │       │                                                             │
//! │       ▼                                                             │
//! │  ┌─────────────────────────────────────────────────────────────┐   │
//! │  │                   mercato-db (THIS CRATE)                   │   │
//! │  │                                                             │   │
//! │  │   ┌─────────────┐   ┌──────────────────┐   ┌────────────┐  │   │
//! │  │   │  Database   │   │   Repositories   │   │ Migrations │  │   │
//! │  │   │  (pool.rs)  │◄──│ storage/address/ │   │ (embedded) │  │   │
//! │  │   │             │   │ voucher/order/   │   │            │  │   │
//! │  │   │ SqlitePool  │   │ prefs            │   │ 001_init   │  │   │
//! │  │   └─────────────┘   └──────────────────┘   └────────────┘  │   │
//! │  └─────────────────────────────────────────────────────────────┘   │
//! │       │                                                             │
//! │       ▼                                                             │
//! │  storage table: one row per key, value JSON-encoded                 │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`pool`] - Connection pool creation and configuration
//! - [`migrations`] - Embedded database migrations
//! - [`keys`] - The storage key namespace
//! - [`error`] - Storage error types
//! - [`repository`] - Repository implementations

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod keys;
pub mod migrations;
pub mod pool;
pub mod repository;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::DbError;
pub use pool::{Database, DbConfig};

// Repository re-exports for convenience
pub use repository::addresses::AddressRepository;
pub use repository::orders::OrderRepository;
pub use repository::prefs::PrefsRepository;
pub use repository::storage::StorageRepository;
pub use repository::vouchers::VoucherRepository;
