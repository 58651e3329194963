//! # Address Repository
//!
//! Persistence for the shipping-address collection and the
//! selected-address pointer.
//!
//! The collection is stored whole under one key; the session layer loads
//! it into an [`mercato_core::AddressBook`], mutates, and saves the
//! entries back. A malformed collection (wrong JSON type, element missing
//! its id) loads as empty and the key is reset.

use sqlx::SqlitePool;
use tracing::warn;

use mercato_core::ShippingAddress;

use crate::error::DbResult;
use crate::keys;
use crate::repository::storage::StorageRepository;

/// Repository for address persistence.
#[derive(Debug, Clone)]
pub struct AddressRepository {
    storage: StorageRepository,
}

impl AddressRepository {
    pub fn new(pool: SqlitePool) -> Self {
        AddressRepository {
            storage: StorageRepository::new(pool),
        }
    }

    /// Loads the collection, recovering to empty on a malformed blob.
    pub async fn load(&self) -> DbResult<Vec<ShippingAddress>> {
        self.storage
            .load_or_reset(keys::USER_SHIPPING_ADDRESSES)
            .await
    }

    /// Persists the whole collection (last write wins).
    pub async fn save(&self, entries: &[ShippingAddress]) -> DbResult<()> {
        self.storage
            .put_json(keys::USER_SHIPPING_ADDRESSES, &entries)
            .await
    }

    /// The checkout-selection pointer, if set and well-formed.
    pub async fn selected_id(&self) -> DbResult<Option<String>> {
        let Some(raw) = self
            .storage
            .get_raw(keys::SELECTED_SHIPPING_ADDRESS_ID)
            .await?
        else {
            return Ok(None);
        };

        match serde_json::from_str::<String>(&raw) {
            Ok(id) => Ok(Some(id)),
            Err(err) => {
                warn!(error = %err, "Malformed selected-address pointer, clearing");
                self.storage
                    .delete(keys::SELECTED_SHIPPING_ADDRESS_ID)
                    .await?;
                Ok(None)
            }
        }
    }

    /// Sets or clears the checkout-selection pointer.
    pub async fn set_selected_id(&self, id: Option<&str>) -> DbResult<()> {
        match id {
            Some(id) => {
                self.storage
                    .put_json(keys::SELECTED_SHIPPING_ADDRESS_ID, &id)
                    .await
            }
            None => {
                self.storage
                    .delete(keys::SELECTED_SHIPPING_ADDRESS_ID)
                    .await
            }
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use crate::pool::{Database, DbConfig};
    use mercato_core::{AddressType, ShippingAddress};

    fn address(id: &str, is_default: bool) -> ShippingAddress {
        ShippingAddress {
            id: id.to_string(),
            name: "Nguyen Van A".to_string(),
            phone: "0912345678".to_string(),
            province: "Hà Nội".to_string(),
            district: "Cầu Giấy".to_string(),
            ward: "Dịch Vọng".to_string(),
            street_address: "1 Trần Thái Tông".to_string(),
            is_default,
            address_type: AddressType::Home,
        }
    }

    #[tokio::test]
    async fn test_save_load_round_trip() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let repo = db.addresses();

        repo.save(&[address("a", true), address("b", false)])
            .await
            .unwrap();

        let loaded = repo.load().await.unwrap();
        assert_eq!(loaded.len(), 2);
        assert_eq!(loaded[0].id, "a");
        assert!(loaded[0].is_default);
    }

    #[tokio::test]
    async fn test_corrupted_collection_resets_to_empty() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();

        // A JSON string instead of an array.
        db.storage()
            .put_raw(crate::keys::USER_SHIPPING_ADDRESSES, "\"not an array\"")
            .await
            .unwrap();

        let loaded = db.addresses().load().await.unwrap();
        assert!(loaded.is_empty());

        let raw = db
            .storage()
            .get_raw(crate::keys::USER_SHIPPING_ADDRESSES)
            .await
            .unwrap();
        assert_eq!(raw.as_deref(), Some("[]"));
    }

    #[tokio::test]
    async fn test_element_missing_id_resets_to_empty() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();

        db.storage()
            .put_raw(
                crate::keys::USER_SHIPPING_ADDRESSES,
                r#"[{"name":"no identifying field"}]"#,
            )
            .await
            .unwrap();

        let loaded = db.addresses().load().await.unwrap();
        assert!(loaded.is_empty());
    }

    #[tokio::test]
    async fn test_selected_pointer_set_clear() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let repo = db.addresses();

        assert_eq!(repo.selected_id().await.unwrap(), None);

        repo.set_selected_id(Some("a")).await.unwrap();
        assert_eq!(repo.selected_id().await.unwrap().as_deref(), Some("a"));

        repo.set_selected_id(None).await.unwrap();
        assert_eq!(repo.selected_id().await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_malformed_pointer_clears() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();

        db.storage()
            .put_raw(crate::keys::SELECTED_SHIPPING_ADDRESS_ID, "{broken")
            .await
            .unwrap();

        assert_eq!(db.addresses().selected_id().await.unwrap(), None);
        assert_eq!(
            db.storage()
                .get_raw(crate::keys::SELECTED_SHIPPING_ADDRESS_ID)
                .await
                .unwrap(),
            None
        );
    }
}
