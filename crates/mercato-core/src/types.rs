//! # Domain Types
//!
//! Core domain types used throughout Mercato.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                │
//! │                                                                     │
//! │  ┌─────────────────┐   ┌──────────────────┐   ┌─────────────────┐  │
//! │  │    CartItem     │   │ ShippingAddress  │   │    Voucher      │  │
//! │  │  ─────────────  │   │  ──────────────  │   │  ─────────────  │  │
//! │  │  id             │   │  id (unique)     │   │  id             │  │
//! │  │  price (units)  │   │  phone           │   │  discount_value │  │
//! │  │  quantity       │   │  is_default      │   │  is_available   │  │
//! │  │  selected       │   │  address_type    │   │  is_selected    │  │
//! │  └─────────────────┘   └──────────────────┘   └─────────────────┘  │
//! │                                                                     │
//! │  OrderHandoff: one-shot checkout → confirmation value object        │
//! │  VoucherSelection: persisted projection of a confirmed Voucher      │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! All serialized shapes are camelCase; these field names ARE the storage
//! blob format, so renames here are storage migrations.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;

// =============================================================================
// Cart Item
// =============================================================================

/// A line item in the shopping cart.
///
/// Prices are frozen copies of the product data at the time the item was
/// added; catalog updates do not reach items already in the cart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    /// Product (or product-variant) identifier.
    pub id: String,

    /// Display name at time of adding (frozen).
    pub name: String,

    /// Unit price in whole currency units (frozen).
    pub price: i64,

    /// Pre-discount list price, when the product is on sale.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_price: Option<i64>,

    /// Brand / shop identity. Shop-level selection toggles group by this.
    pub brand: String,

    /// Product image for display.
    pub image_url: String,

    /// Raw variant label, e.g. "Đỏ, M". Parsed on demand, never stored
    /// in structured form.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub variant: Option<String>,

    /// Available stock, when the catalog exposes it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stock: Option<i64>,

    /// Quantity in cart. Invariant: within `[1, 99]`.
    pub quantity: i64,

    /// Whether this line participates in totals and checkout.
    pub selected: bool,
}

impl CartItem {
    /// Returns the unit price as Money.
    #[inline]
    pub fn unit_price(&self) -> Money {
        Money::from_units(self.price)
    }

    /// Line total (unit price × quantity).
    #[inline]
    pub fn line_total(&self) -> Money {
        self.unit_price().multiply_quantity(self.quantity)
    }
}

// =============================================================================
// Shipping Address
// =============================================================================

/// Where an address is delivered to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "lowercase")]
pub enum AddressType {
    Home,
    Office,
}

impl Default for AddressType {
    fn default() -> Self {
        AddressType::Home
    }
}

/// A shipping address in the user's address book.
///
/// ## Invariant
/// Across the whole collection at most one record has `is_default = true`;
/// when the collection is non-empty, exactly one must. [`crate::address::AddressBook`]
/// is the sole writer and enforces this.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct ShippingAddress {
    /// Unique identifier.
    pub id: String,

    /// Recipient name.
    pub name: String,

    /// Recipient phone, stored normalized (see validation).
    pub phone: String,

    pub province: String,
    pub district: String,
    pub ward: String,
    pub street_address: String,

    /// Flagged for pre-selection at checkout.
    pub is_default: bool,

    #[serde(default)]
    pub address_type: AddressType,
}

// =============================================================================
// Vouchers
// =============================================================================

/// How a voucher's discount value is applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "lowercase")]
pub enum DiscountType {
    /// Flat amount in whole currency units.
    Fixed,
    /// Whole percent of the merchandise subtotal.
    Percentage,
}

/// A voucher catalog entry as shown on the selection sheet.
///
/// Working state only: the full catalog entry (including availability and
/// the in-progress `is_selected` flag) lives in session memory and is never
/// persisted. Only the [`VoucherSelection`] projection reaches storage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Voucher {
    pub id: String,
    pub title: String,
    pub discount_value: i64,
    pub discount_type: DiscountType,

    /// Display metadata.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_spend: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(as = "Option<String>")]
    pub expires_at: Option<DateTime<Utc>>,

    /// Only available vouchers may be toggled into the selection.
    pub is_available: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unavailable_reason: Option<String>,

    /// In-progress selection state on the voucher sheet.
    #[serde(default)]
    pub is_selected: bool,
}

/// Persisted projection of a confirmed voucher.
///
/// ## Invariant
/// Only vouchers with `is_available = true` may appear in a persisted
/// selection; [`crate::voucher::VoucherList::confirm`] enforces this.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct VoucherSelection {
    pub id: String,
    pub title: String,
    pub discount_value: i64,
    pub discount_type: DiscountType,
}

impl From<&Voucher> for VoucherSelection {
    fn from(voucher: &Voucher) -> Self {
        VoucherSelection {
            id: voucher.id.clone(),
            title: voucher.title.clone(),
            discount_value: voucher.discount_value,
            discount_type: voucher.discount_type,
        }
    }
}

// =============================================================================
// Order Handoff
// =============================================================================

/// One-shot handoff record passed from checkout to the confirmation
/// screen, consumed exactly once.
///
/// Written by the checkout command; the confirmation screen reads it and
/// deletes it in the same storage transaction. A confirmation load that
/// finds no handoff is a missing-required-state error, not a crash.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct OrderHandoff {
    /// Snapshot of the selected cart lines at checkout time.
    pub items: Vec<CartItem>,

    /// Σ price × quantity over the selected lines.
    pub merchandise_subtotal: i64,

    pub shipping_cost: i64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub loyalty_points_discount: Option<i64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub voucher_discount_total: Option<i64>,

    /// subtotal + shipping − discounts, never below zero.
    pub total_amount: i64,

    #[ts(as = "String")]
    pub placed_at: DateTime<Utc>,
}

// =============================================================================
// Locale
// =============================================================================

/// UI language preference, persisted as a scalar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    En,
    Vi,
}

impl Locale {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Locale::En => "en",
            Locale::Vi => "vi",
        }
    }

    /// Parses the stored scalar form. Unknown values are `None`; the
    /// storage layer resets those to the default.
    pub fn from_str_opt(value: &str) -> Option<Self> {
        match value {
            "en" => Some(Locale::En),
            "vi" => Some(Locale::Vi),
            _ => None,
        }
    }
}

impl Default for Locale {
    fn default() -> Self {
        Locale::En
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
