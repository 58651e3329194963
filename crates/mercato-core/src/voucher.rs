//! # Voucher Logic
//!
//! Working-list selection rules and discount evaluation.
//!
//! The full catalog (availability flags, display metadata, in-progress
//! selection) stays in session memory. Confirming a selection filters it
//! down to available-and-selected entries, projects those to
//! [`VoucherSelection`], and the storage layer replaces the persisted set
//! with that projection atomically.

use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::types::{DiscountType, Voucher, VoucherSelection};

// =============================================================================
// Working List
// =============================================================================

/// The voucher sheet's working list.
#[derive(Debug, Clone, Default)]
pub struct VoucherList {
    vouchers: Vec<Voucher>,
}

impl VoucherList {
    pub fn from_catalog(vouchers: Vec<Voucher>) -> Self {
        VoucherList { vouchers }
    }

    pub fn vouchers(&self) -> &[Voucher] {
        &self.vouchers
    }

    pub fn is_empty(&self) -> bool {
        self.vouchers.is_empty()
    }

    /// Toggles one voucher's selection state, returning the new state.
    ///
    /// Unavailable vouchers cannot enter the selection; the toggle is
    /// rejected and the list is unchanged.
    pub fn toggle(&mut self, voucher_id: &str) -> CoreResult<bool> {
        let voucher = self
            .vouchers
            .iter_mut()
            .find(|v| v.id == voucher_id)
            .ok_or_else(|| CoreError::VoucherNotFound(voucher_id.to_string()))?;

        if !voucher.is_available {
            return Err(CoreError::VoucherUnavailable {
                id: voucher_id.to_string(),
            });
        }

        voucher.is_selected = !voucher.is_selected;
        Ok(voucher.is_selected)
    }

    pub fn selected_count(&self) -> usize {
        self.vouchers
            .iter()
            .filter(|v| v.is_available && v.is_selected)
            .count()
    }

    /// Filters down to `is_available && is_selected` and projects to the
    /// persisted shape. The result replaces any prior persisted set whole.
    pub fn confirm(&self) -> Vec<VoucherSelection> {
        self.vouchers
            .iter()
            .filter(|v| v.is_available && v.is_selected)
            .map(VoucherSelection::from)
            .collect()
    }
}

// =============================================================================
// Discount Evaluation
// =============================================================================

impl VoucherSelection {
    /// The discount this voucher grants against a merchandise subtotal.
    pub fn discount_for(&self, subtotal: Money) -> Money {
        match self.discount_type {
            DiscountType::Fixed => Money::from_units(self.discount_value),
            DiscountType::Percentage => subtotal.percentage_of(self.discount_value),
        }
    }
}

/// Total discount over a persisted selection.
///
/// Each voucher evaluates independently against the subtotal; the sum is
/// saturated at the subtotal so the discount never exceeds the goods value.
pub fn total_discount(selections: &[VoucherSelection], subtotal: Money) -> Money {
    let sum = selections
        .iter()
        .fold(Money::zero(), |acc, s| acc + s.discount_for(subtotal));
    sum.min(subtotal)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn voucher(id: &str, available: bool, selected: bool) -> Voucher {
        Voucher {
            id: id.to_string(),
            title: format!("Voucher {}", id),
            discount_value: 30_000,
            discount_type: DiscountType::Fixed,
            description: None,
            min_spend: None,
            expires_at: None,
            is_available: available,
            unavailable_reason: (!available).then(|| "Expired".to_string()),
            is_selected: selected,
        }
    }

    #[test]
    fn test_confirm_drops_unavailable() {
        let list = VoucherList::from_catalog(vec![
            voucher("a", true, true),
            voucher("b", false, true),
            voucher("c", true, false),
        ]);

        let confirmed = list.confirm();
        assert_eq!(confirmed.len(), 1);
        assert_eq!(confirmed[0].id, "a");
    }

    #[test]
    fn test_toggle_unavailable_rejected() {
        let mut list = VoucherList::from_catalog(vec![voucher("b", false, false)]);

        assert!(matches!(
            list.toggle("b").unwrap_err(),
            CoreError::VoucherUnavailable { .. }
        ));
        assert!(!list.vouchers()[0].is_selected);
    }

    #[test]
    fn test_toggle_flips_state() {
        let mut list = VoucherList::from_catalog(vec![voucher("a", true, false)]);

        assert!(list.toggle("a").unwrap());
        assert!(!list.toggle("a").unwrap());
        assert!(matches!(
            list.toggle("zz").unwrap_err(),
            CoreError::VoucherNotFound(_)
        ));
    }

    #[test]
    fn test_fixed_and_percentage_discounts() {
        let subtotal = Money::from_units(400_000);

        let fixed = VoucherSelection {
            id: "f".to_string(),
            title: "30k off".to_string(),
            discount_value: 30_000,
            discount_type: DiscountType::Fixed,
        };
        let percentage = VoucherSelection {
            id: "p".to_string(),
            title: "10% off".to_string(),
            discount_value: 10,
            discount_type: DiscountType::Percentage,
        };

        assert_eq!(fixed.discount_for(subtotal).units(), 30_000);
        assert_eq!(percentage.discount_for(subtotal).units(), 40_000);
        assert_eq!(
            total_discount(&[fixed, percentage], subtotal).units(),
            70_000
        );
    }

    #[test]
    fn test_total_discount_saturates_at_subtotal() {
        let subtotal = Money::from_units(20_000);
        let big = VoucherSelection {
            id: "f".to_string(),
            title: "50k off".to_string(),
            discount_value: 50_000,
            discount_type: DiscountType::Fixed,
        };

        assert_eq!(total_discount(&[big], subtotal).units(), 20_000);
        assert_eq!(total_discount(&[], subtotal).units(), 0);
    }
}
