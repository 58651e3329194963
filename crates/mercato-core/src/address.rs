//! # Address Book Logic
//!
//! Maintains the user's shipping-address collection and its single-default
//! invariant.
//!
//! ## The Default-Address Invariant
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │  Empty collection      → no default required                        │
//! │  Non-empty collection  → exactly one entry has is_default = true    │
//! │                                                                     │
//! │  ensure_default()  promotes the first entry when none is flagged    │
//! │  add()             a new default clears every other flag            │
//! │  edit()            demoting the default elects a replacement:       │
//! │                    the previous holder if it still exists and       │
//! │                    differs from the edited entry, else the first    │
//! │                    entry in order                                   │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The book is the sole writer of the collection; callers load it from
//! storage, mutate through these operations, and persist the entries back.
//! Entries are edited in place by id; there is no delete operation.

use crate::error::{CoreError, CoreResult};
use crate::types::ShippingAddress;

/// The shipping-address collection with invariant enforcement.
///
/// Tracks which entry held the default flag before the most recent default
/// change, to support replacement election on [`AddressBook::edit`].
#[derive(Debug, Clone, Default)]
pub struct AddressBook {
    entries: Vec<ShippingAddress>,
    previous_default: Option<String>,
}

impl AddressBook {
    /// Rebuilds a book from the persisted collection.
    pub fn from_entries(entries: Vec<ShippingAddress>) -> Self {
        AddressBook {
            entries,
            previous_default: None,
        }
    }

    /// The collection in its current order.
    pub fn entries(&self) -> &[ShippingAddress] {
        &self.entries
    }

    /// Consumes the book, yielding the collection for persistence.
    pub fn into_entries(self) -> Vec<ShippingAddress> {
        self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Looks up an entry by id.
    pub fn get(&self, id: &str) -> Option<&ShippingAddress> {
        self.entries.iter().find(|a| a.id == id)
    }

    /// The entry currently flagged default, if any.
    pub fn default_entry(&self) -> Option<&ShippingAddress> {
        self.entries.iter().find(|a| a.is_default)
    }

    /// Enforces the invariant after a load.
    ///
    /// Non-empty collection with no flagged entry → the first entry (in
    /// current order) is promoted. Returns `true` when the collection was
    /// modified and needs a write-back.
    pub fn ensure_default(&mut self) -> bool {
        if self.entries.is_empty() || self.entries.iter().any(|a| a.is_default) {
            return false;
        }
        if let Some(first) = self.entries.first_mut() {
            first.is_default = true;
        }
        true
    }

    /// Inserts a new address.
    ///
    /// The first address always becomes the default. Inserting an entry
    /// flagged default clears every other flag in the same operation.
    pub fn add(&mut self, mut address: ShippingAddress) {
        if self.entries.is_empty() {
            address.is_default = true;
        } else if address.is_default {
            self.remember_current_default();
            self.clear_defaults();
        }
        self.entries.push(address);
    }

    /// Edits an existing address in place, identified by `updated.id`.
    ///
    /// ## Default-flag transitions
    /// - Gaining the flag: every other entry's flag is cleared.
    /// - Losing the flag: a replacement is elected immediately — the entry
    ///   that held default before this one, if it still exists and is not
    ///   the edited entry; otherwise the first entry in order (the edited
    ///   entry itself when it is the only one).
    pub fn edit(&mut self, updated: ShippingAddress) -> CoreResult<()> {
        let position = self
            .entries
            .iter()
            .position(|a| a.id == updated.id)
            .ok_or_else(|| CoreError::AddressNotFound(updated.id.clone()))?;

        let was_default = self.entries[position].is_default;

        if updated.is_default && !was_default {
            self.remember_current_default();
            self.clear_defaults();
            self.entries[position] = updated;
        } else if was_default && !updated.is_default {
            let edited_id = updated.id.clone();
            self.entries[position] = updated;
            self.elect_replacement(&edited_id);
            self.previous_default = Some(edited_id);
        } else {
            // Flag unchanged; plain field update.
            let keep_default = was_default;
            self.entries[position] = updated;
            self.entries[position].is_default = keep_default;
        }

        Ok(())
    }

    fn remember_current_default(&mut self) {
        if let Some(id) = self.default_entry().map(|a| a.id.clone()) {
            self.previous_default = Some(id);
        }
    }

    fn clear_defaults(&mut self) {
        for entry in &mut self.entries {
            entry.is_default = false;
        }
    }

    /// Promotes a replacement default after the holder was demoted.
    fn elect_replacement(&mut self, demoted_id: &str) {
        let preferred = self
            .previous_default
            .as_deref()
            .filter(|id| *id != demoted_id)
            .and_then(|id| self.entries.iter().position(|a| a.id == id));

        let fallback = self
            .entries
            .iter()
            .position(|a| a.id != demoted_id)
            .or_else(|| (!self.entries.is_empty()).then_some(0));

        if let Some(position) = preferred.or(fallback) {
            self.entries[position].is_default = true;
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::AddressType;

    fn address(id: &str, is_default: bool) -> ShippingAddress {
        ShippingAddress {
            id: id.to_string(),
            name: format!("Recipient {}", id),
            phone: "0912345678".to_string(),
            province: "Hà Nội".to_string(),
            district: "Cầu Giấy".to_string(),
            ward: "Dịch Vọng".to_string(),
            street_address: format!("{} Trần Thái Tông", id),
            is_default,
            address_type: AddressType::Home,
        }
    }

    fn default_count(book: &AddressBook) -> usize {
        book.entries().iter().filter(|a| a.is_default).count()
    }

    #[test]
    fn test_empty_book_needs_no_default() {
        let mut book = AddressBook::default();
        assert!(!book.ensure_default());
        assert!(book.default_entry().is_none());
    }

    #[test]
    fn test_ensure_default_promotes_first() {
        let mut book = AddressBook::from_entries(vec![address("a", false), address("b", false)]);

        assert!(book.ensure_default());
        assert_eq!(book.default_entry().unwrap().id, "a");
        assert_eq!(default_count(&book), 1);

        // Already satisfied: no further write-back signalled.
        assert!(!book.ensure_default());
    }

    #[test]
    fn test_first_add_becomes_default() {
        let mut book = AddressBook::default();
        book.add(address("a", false));

        assert_eq!(book.default_entry().unwrap().id, "a");
    }

    #[test]
    fn test_add_default_clears_others() {
        let mut book = AddressBook::default();
        book.add(address("a", false));
        book.add(address("b", true));

        assert_eq!(book.default_entry().unwrap().id, "b");
        assert_eq!(default_count(&book), 1);
    }

    #[test]
    fn test_add_non_default_keeps_existing() {
        let mut book = AddressBook::default();
        book.add(address("a", false));
        book.add(address("b", false));

        assert_eq!(book.default_entry().unwrap().id, "a");
        assert_eq!(default_count(&book), 1);
    }

    #[test]
    fn test_edit_demote_promotes_other_in_two_address_book() {
        let mut book = AddressBook::from_entries(vec![address("a", true), address("b", false)]);

        book.edit(address("a", false)).unwrap();

        assert_eq!(book.default_entry().unwrap().id, "b");
        assert_eq!(default_count(&book), 1);
    }

    #[test]
    fn test_edit_demote_prefers_previous_holder() {
        // "a" holds the flag but is not first, so the previous-holder
        // preference is observable against the first-entry fallback.
        let mut book = AddressBook::from_entries(vec![
            address("b", false),
            address("a", true),
            address("c", false),
        ]);

        // "c" takes the flag from "a", then gives it up again.
        book.edit(address("c", true)).unwrap();
        assert_eq!(book.default_entry().unwrap().id, "c");

        book.edit(address("c", false)).unwrap();
        assert_eq!(book.default_entry().unwrap().id, "a");
        assert_eq!(default_count(&book), 1);
    }

    #[test]
    fn test_edit_demote_single_address_keeps_default() {
        let mut book = AddressBook::from_entries(vec![address("a", true)]);

        book.edit(address("a", false)).unwrap();

        // Sole entry of a non-empty book must stay the default.
        assert_eq!(book.default_entry().unwrap().id, "a");
    }

    #[test]
    fn test_edit_plain_field_update_keeps_flag() {
        let mut book = AddressBook::from_entries(vec![address("a", true), address("b", false)]);

        let mut updated = address("b", false);
        updated.ward = "Nghĩa Đô".to_string();
        book.edit(updated).unwrap();

        assert_eq!(book.get("b").unwrap().ward, "Nghĩa Đô");
        assert_eq!(book.default_entry().unwrap().id, "a");
    }

    #[test]
    fn test_edit_unknown_id_is_rejected() {
        let mut book = AddressBook::from_entries(vec![address("a", true)]);
        assert!(matches!(
            book.edit(address("zz", false)).unwrap_err(),
            CoreError::AddressNotFound(_)
        ));
    }

    #[test]
    fn test_invariant_holds_after_operation_sequences() {
        let mut book = AddressBook::default();
        book.add(address("a", false));
        book.add(address("b", true));
        book.add(address("c", false));
        book.edit(address("b", false)).unwrap();
        book.edit(address("c", true)).unwrap();
        book.edit(address("a", true)).unwrap();

        assert_eq!(default_count(&book), 1);
        assert_eq!(book.default_entry().unwrap().id, "a");
    }
}
