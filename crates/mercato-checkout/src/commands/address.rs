//! # Address Commands
//!
//! Session commands for the address book: load, add, edit, and
//! select-for-checkout.
//!
//! ## Reconciliation on Every Mutation
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │  load ──► ensure_default (promote first if none flagged)            │
//! │             │ collection rewritten? ──► write back                  │
//! │             ▼                                                       │
//! │           reconcile pointer                                         │
//! │             ├── book empty            → pointer cleared             │
//! │             ├── pointer dangling/none → pointer := default's id     │
//! │             ├── pointed entry demoted → pointer := new default's id │
//! │             └── otherwise             → pointer kept                │
//! │                                                                     │
//! │  Selecting a non-default address for one checkout session never     │
//! │  moves the default flag.                                            │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

use mercato_core::validation::{validate_address, validate_phone};
use mercato_core::{AddressBook, AddressType, ShippingAddress};
use mercato_db::Database;

use crate::error::ApiError;

/// Add-address form data. The id is assigned here, not by the form.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddressForm {
    pub name: String,
    pub phone: String,
    pub province: String,
    pub district: String,
    pub ward: String,
    pub street_address: String,
    #[serde(default)]
    pub is_default: bool,
    #[serde(default)]
    pub address_type: AddressType,
}

/// Address book response: the collection plus the checkout pointer.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AddressBookResponse {
    pub addresses: Vec<ShippingAddress>,
    pub selected_id: Option<String>,
}

/// Loads the address book, enforcing the default invariant and
/// reconciling the checkout pointer.
pub async fn load_address_book(db: &Database) -> Result<AddressBookResponse, ApiError> {
    debug!("load_address_book command");

    let mut book = AddressBook::from_entries(db.addresses().load().await?);
    if book.ensure_default() {
        db.addresses().save(book.entries()).await?;
    }

    let selected_id = reconcile_pointer(db, &book, None).await?;

    Ok(AddressBookResponse {
        addresses: book.entries().to_vec(),
        selected_id,
    })
}

/// Adds a new address.
///
/// A new default clears every other default flag in the same operation;
/// the first address always becomes the default.
pub async fn add_address(
    db: &Database,
    form: AddressForm,
) -> Result<AddressBookResponse, ApiError> {
    debug!(name = %form.name, "add_address command");

    let mut address = ShippingAddress {
        id: Uuid::new_v4().to_string(),
        name: form.name,
        phone: form.phone,
        province: form.province,
        district: form.district,
        ward: form.ward,
        street_address: form.street_address,
        is_default: form.is_default,
        address_type: form.address_type,
    };
    validate_address(&address)?;
    address.phone = validate_phone(&address.phone)?;

    let mut book = AddressBook::from_entries(db.addresses().load().await?);
    book.ensure_default();
    book.add(address);
    db.addresses().save(book.entries()).await?;

    let selected_id = reconcile_pointer(db, &book, None).await?;

    Ok(AddressBookResponse {
        addresses: book.entries().to_vec(),
        selected_id,
    })
}

/// Edits an existing address in place, identified by `updated.id`.
///
/// Demoting the current default elects a replacement immediately, and a
/// pointer that referenced the demoted entry follows the new default.
pub async fn edit_address(
    db: &Database,
    mut updated: ShippingAddress,
) -> Result<AddressBookResponse, ApiError> {
    debug!(address_id = %updated.id, "edit_address command");

    validate_address(&updated)?;
    updated.phone = validate_phone(&updated.phone)?;

    let mut book = AddressBook::from_entries(db.addresses().load().await?);
    book.ensure_default();

    let was_default = book.get(&updated.id).map(|a| a.is_default).unwrap_or(false);
    let demoted = (was_default && !updated.is_default).then(|| updated.id.clone());

    book.edit(updated)?;
    db.addresses().save(book.entries()).await?;

    let selected_id = reconcile_pointer(db, &book, demoted.as_deref()).await?;

    Ok(AddressBookResponse {
        addresses: book.entries().to_vec(),
        selected_id,
    })
}

/// Selects an address for this checkout session.
///
/// Pointer only: the default flag stays where it is.
pub async fn select_address(db: &Database, address_id: &str) -> Result<(), ApiError> {
    debug!(address_id = %address_id, "select_address command");

    let book = AddressBook::from_entries(db.addresses().load().await?);
    if book.get(address_id).is_none() {
        return Err(ApiError::not_found("Address", address_id));
    }

    db.addresses().set_selected_id(Some(address_id)).await?;
    Ok(())
}

/// Brings the pointer back in line with the collection.
///
/// `demoted` names an entry whose default flag was just removed; a pointer
/// referencing it is moved to the new default rather than kept.
async fn reconcile_pointer(
    db: &Database,
    book: &AddressBook,
    demoted: Option<&str>,
) -> Result<Option<String>, ApiError> {
    let repo = db.addresses();
    let current = repo.selected_id().await?;

    if book.is_empty() {
        if current.is_some() {
            repo.set_selected_id(None).await?;
        }
        return Ok(None);
    }

    if let Some(id) = &current {
        let still_valid = Some(id.as_str()) != demoted && book.get(id).is_some();
        if still_valid {
            return Ok(current);
        }
    }

    let default_id = book.default_entry().map(|a| a.id.clone());
    repo.set_selected_id(default_id.as_deref()).await?;
    Ok(default_id)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use mercato_db::{Database, DbConfig};

    async fn db() -> Database {
        Database::new(DbConfig::in_memory()).await.unwrap()
    }

    fn form(name: &str, is_default: bool) -> AddressForm {
        AddressForm {
            name: name.to_string(),
            phone: "091 234 5678".to_string(),
            province: "Hà Nội".to_string(),
            district: "Cầu Giấy".to_string(),
            ward: "Dịch Vọng".to_string(),
            street_address: "144 Xuân Thủy".to_string(),
            is_default,
            address_type: AddressType::Home,
        }
    }

    #[tokio::test]
    async fn test_first_add_sets_default_and_pointer() {
        let db = db().await;

        let response = add_address(&db, form("An", false)).await.unwrap();

        assert_eq!(response.addresses.len(), 1);
        assert!(response.addresses[0].is_default);
        // Phone stored normalized.
        assert_eq!(response.addresses[0].phone, "0912345678");
        assert_eq!(response.selected_id, Some(response.addresses[0].id.clone()));
    }

    #[tokio::test]
    async fn test_load_promotes_first_and_persists() {
        let db = db().await;

        // Persisted collection with no flagged default.
        let entries = vec![
            ShippingAddress {
                id: "a".to_string(),
                name: "An".to_string(),
                phone: "0912345678".to_string(),
                province: "Hà Nội".to_string(),
                district: "Cầu Giấy".to_string(),
                ward: "Dịch Vọng".to_string(),
                street_address: "144 Xuân Thủy".to_string(),
                is_default: false,
                address_type: AddressType::Home,
            },
            ShippingAddress {
                id: "b".to_string(),
                name: "Bình".to_string(),
                phone: "0912345679".to_string(),
                province: "Hà Nội".to_string(),
                district: "Hai Bà Trưng".to_string(),
                ward: "Bách Khoa".to_string(),
                street_address: "1 Đại Cồ Việt".to_string(),
                is_default: false,
                address_type: AddressType::Office,
            },
        ];
        db.addresses().save(&entries).await.unwrap();

        let response = load_address_book(&db).await.unwrap();
        assert!(response.addresses[0].is_default);
        assert_eq!(response.selected_id.as_deref(), Some("a"));

        // The promotion was written back, not just computed.
        let persisted = db.addresses().load().await.unwrap();
        assert!(persisted[0].is_default);
    }

    #[tokio::test]
    async fn test_edit_demote_promotes_other_and_moves_pointer() {
        let db = db().await;

        let response = add_address(&db, form("An", false)).await.unwrap();
        let first = response.addresses[0].clone();
        let response = add_address(&db, form("Bình", false)).await.unwrap();
        let second = response.addresses[1].clone();

        // Pointer sits on the default ("An").
        assert_eq!(response.selected_id, Some(first.id.clone()));

        let mut demoted = first.clone();
        demoted.is_default = false;
        let response = edit_address(&db, demoted).await.unwrap();

        let defaults: Vec<_> = response
            .addresses
            .iter()
            .filter(|a| a.is_default)
            .collect();
        assert_eq!(defaults.len(), 1);
        assert_eq!(defaults[0].id, second.id);
        assert_eq!(response.selected_id, Some(second.id.clone()));
    }

    #[tokio::test]
    async fn test_select_non_default_keeps_flags() {
        let db = db().await;

        add_address(&db, form("An", false)).await.unwrap();
        let response = add_address(&db, form("Bình", false)).await.unwrap();
        let non_default = response
            .addresses
            .iter()
            .find(|a| !a.is_default)
            .unwrap()
            .clone();

        select_address(&db, &non_default.id).await.unwrap();

        let response = load_address_book(&db).await.unwrap();
        assert_eq!(response.selected_id, Some(non_default.id.clone()));
        // The flag did not move with the selection.
        assert!(
            response
                .addresses
                .iter()
                .find(|a| a.is_default)
                .map(|a| a.id.clone())
                != Some(non_default.id)
        );
    }

    #[tokio::test]
    async fn test_select_unknown_address_is_rejected() {
        let db = db().await;
        add_address(&db, form("An", false)).await.unwrap();

        let err = select_address(&db, "zz").await.unwrap_err();
        assert_eq!(err.code, ErrorCode::NotFound);
    }

    #[tokio::test]
    async fn test_stale_pointer_with_empty_book_is_cleared() {
        let db = db().await;

        db.addresses().set_selected_id(Some("ghost")).await.unwrap();

        let response = load_address_book(&db).await.unwrap();
        assert!(response.addresses.is_empty());
        assert_eq!(response.selected_id, None);
        assert_eq!(db.addresses().selected_id().await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_corrupted_collection_loads_as_empty() {
        let db = db().await;

        db.storage()
            .put_raw(mercato_db::keys::USER_SHIPPING_ADDRESSES, "\"oops\"")
            .await
            .unwrap();

        let response = load_address_book(&db).await.unwrap();
        assert!(response.addresses.is_empty());
    }

    #[tokio::test]
    async fn test_invalid_form_is_rejected_without_writes() {
        let db = db().await;

        let mut bad = form("An", false);
        bad.phone = "12345".to_string();

        let err = add_address(&db, bad).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);
        assert!(db.addresses().load().await.unwrap().is_empty());
    }
}
