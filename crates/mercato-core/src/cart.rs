//! # Cart Logic
//!
//! Pure cart collection rules: line management, selection state, and
//! derived totals.
//!
//! ## Cart Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                    Cart Operations                                  │
//! │                                                                     │
//! │  UI Action                 Operation              Collection Change │
//! │  ─────────                 ─────────              ───────────────── │
//! │  Tap product        ────►  add_item()      ────►  items.push / +qty │
//! │  Change quantity    ────►  update_quantity ────►  items[i].qty = n  │
//! │  Tick one line      ────►  set_selected()  ────►  items[i].selected │
//! │  Tick "all"         ────►  select_all()    ────►  every flag        │
//! │  Tick a shop header ────►  select_shop()   ────►  flags by brand    │
//! │  Tap remove         ────►  remove_item()   ────►  items.remove(i)   │
//! │                                                                     │
//! │  Totals are recomputed from current selection on every read;        │
//! │  unselected lines contribute zero.                                  │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Invariants
//! - Quantities stay within `[1, 99]`; requests outside the range are
//!   rejected with [`CoreError::QuantityOutOfRange`] and the stored value
//!   is left unchanged — never silently clamped.
//! - Items are unique by `id` (adding the same id merges quantities).

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::types::CartItem;
use crate::{MAX_ITEM_QUANTITY, MIN_ITEM_QUANTITY};

// =============================================================================
// Cart
// =============================================================================

/// The shopping cart.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cart {
    /// Items in the cart.
    pub items: Vec<CartItem>,
}

impl Cart {
    /// Creates a new empty cart.
    pub fn new() -> Self {
        Cart { items: Vec::new() }
    }

    /// Rebuilds a cart from a persisted item list.
    pub fn from_items(items: Vec<CartItem>) -> Self {
        Cart { items }
    }

    fn quantity_in_range(quantity: i64) -> CoreResult<()> {
        if !(MIN_ITEM_QUANTITY..=MAX_ITEM_QUANTITY).contains(&quantity) {
            return Err(CoreError::QuantityOutOfRange {
                requested: quantity,
                min: MIN_ITEM_QUANTITY,
                max: MAX_ITEM_QUANTITY,
            });
        }
        Ok(())
    }

    /// Adds an item, merging by id.
    ///
    /// ## Behavior
    /// - Item already present: quantities are summed (the merged quantity
    ///   must still fit the allowed range, otherwise the add is rejected
    ///   and the existing line is untouched).
    /// - New item: appended as-is after a range check.
    pub fn add_item(&mut self, item: CartItem) -> CoreResult<()> {
        Self::quantity_in_range(item.quantity)?;

        if let Some(existing) = self.items.iter_mut().find(|i| i.id == item.id) {
            let merged = existing.quantity + item.quantity;
            Self::quantity_in_range(merged)?;
            existing.quantity = merged;
            return Ok(());
        }

        self.items.push(item);
        Ok(())
    }

    /// Sets the quantity of an existing line.
    ///
    /// Requests outside `[1, 99]` are rejected with the prior value kept;
    /// the caller surfaces the limit notice.
    pub fn update_quantity(&mut self, item_id: &str, quantity: i64) -> CoreResult<()> {
        Self::quantity_in_range(quantity)?;

        let item = self
            .items
            .iter_mut()
            .find(|i| i.id == item_id)
            .ok_or_else(|| CoreError::ItemNotFound(item_id.to_string()))?;
        item.quantity = quantity;
        Ok(())
    }

    /// Removes a line by item id.
    pub fn remove_item(&mut self, item_id: &str) -> CoreResult<()> {
        let initial_len = self.items.len();
        self.items.retain(|i| i.id != item_id);

        if self.items.len() == initial_len {
            Err(CoreError::ItemNotFound(item_id.to_string()))
        } else {
            Ok(())
        }
    }

    /// Clears all items from the cart.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    // =========================================================================
    // Selection
    // =========================================================================

    /// Sets one line's selection flag.
    pub fn set_selected(&mut self, item_id: &str, selected: bool) -> CoreResult<()> {
        let item = self
            .items
            .iter_mut()
            .find(|i| i.id == item_id)
            .ok_or_else(|| CoreError::ItemNotFound(item_id.to_string()))?;
        item.selected = selected;
        Ok(())
    }

    /// Sets every line's selection flag identically.
    pub fn select_all(&mut self, selected: bool) {
        for item in &mut self.items {
            item.selected = selected;
        }
    }

    /// Sets the flag on every line sharing a brand/shop identity.
    pub fn select_shop(&mut self, brand: &str, selected: bool) {
        for item in self.items.iter_mut().filter(|i| i.brand == brand) {
            item.selected = selected;
        }
    }

    /// Whether any line is selected. Checkout is only permitted when true.
    pub fn any_selected(&self) -> bool {
        self.items.iter().any(|i| i.selected)
    }

    /// Snapshot of the selected lines (checkout order).
    pub fn selected_items(&self) -> Vec<CartItem> {
        self.items.iter().filter(|i| i.selected).cloned().collect()
    }

    // =========================================================================
    // Derived Totals
    // =========================================================================

    /// Number of lines in the cart.
    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    /// Total quantity across all lines.
    pub fn total_quantity(&self) -> i64 {
        self.items.iter().map(|i| i.quantity).sum()
    }

    /// Total quantity across selected lines.
    pub fn selected_quantity(&self) -> i64 {
        self.items
            .iter()
            .filter(|i| i.selected)
            .map(|i| i.quantity)
            .sum()
    }

    /// Merchandise subtotal: Σ price × quantity over selected lines only.
    pub fn merchandise_subtotal(&self) -> Money {
        self.items
            .iter()
            .filter(|i| i.selected)
            .fold(Money::zero(), |acc, i| acc + i.line_total())
    }

    /// Checks if the cart is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Totals summary for UI responses.
    pub fn totals(&self) -> CartTotals {
        CartTotals::from(self)
    }
}

// =============================================================================
// Cart Totals
// =============================================================================

/// Cart totals summary for UI responses.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CartTotals {
    pub item_count: usize,
    pub total_quantity: i64,
    pub selected_quantity: i64,
    pub merchandise_subtotal: i64,
    pub any_selected: bool,
}

impl From<&Cart> for CartTotals {
    fn from(cart: &Cart) -> Self {
        CartTotals {
            item_count: cart.item_count(),
            total_quantity: cart.total_quantity(),
            selected_quantity: cart.selected_quantity(),
            merchandise_subtotal: cart.merchandise_subtotal().units(),
            any_selected: cart.any_selected(),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
