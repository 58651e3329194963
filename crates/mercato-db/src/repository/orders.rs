//! # Order Repository
//!
//! Persistence for the checkout → confirmation handoff.
//!
//! ## One-Shot Handoff
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │  Checkout                          Confirmation                     │
//! │  ────────                          ────────────                     │
//! │  record_checkout(handoff)          take_handoff()                   │
//! │    ├─ finalOrderDetailsForPayment    ├─ read + delete, one tx       │
//! │    └─ checkoutItems (mirror)         └─ Some(handoff) exactly once  │
//! │                                                                     │
//! │  A second take observes absence — the caller reports missing        │
//! │  state and routes the user to a safe screen.                        │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```

use sqlx::SqlitePool;

use mercato_core::{CartItem, OrderHandoff};

use crate::error::DbResult;
use crate::keys;
use crate::repository::storage::{self, StorageRepository};

/// Repository for the order handoff and the checkout-items mirror.
#[derive(Debug, Clone)]
pub struct OrderRepository {
    storage: StorageRepository,
}

impl OrderRepository {
    pub fn new(pool: SqlitePool) -> Self {
        OrderRepository {
            storage: StorageRepository::new(pool),
        }
    }

    /// Writes the handoff record and the checkout-items mirror together.
    pub async fn record_checkout(&self, handoff: &OrderHandoff) -> DbResult<()> {
        let handoff_json = serde_json::to_string(handoff)?;
        let items_json = serde_json::to_string(&handoff.items)?;

        let mut tx = self.storage.pool().begin().await?;
        storage::upsert(&mut *tx, keys::FINAL_ORDER_DETAILS_FOR_PAYMENT, &handoff_json).await?;
        storage::upsert(&mut *tx, keys::CHECKOUT_ITEMS, &items_json).await?;
        tx.commit().await?;
        Ok(())
    }

    /// Consumes the handoff record: read and delete in one transaction.
    pub async fn take_handoff(&self) -> DbResult<Option<OrderHandoff>> {
        self.storage
            .take_json(keys::FINAL_ORDER_DETAILS_FOR_PAYMENT)
            .await
    }

    /// The staged cart mirror, recovering to empty on a bad blob.
    pub async fn checkout_items(&self) -> DbResult<Vec<CartItem>> {
        self.storage.load_or_reset(keys::CHECKOUT_ITEMS).await
    }

    /// Clears the staged cart mirror.
    pub async fn clear_checkout_items(&self) -> DbResult<()> {
        self.storage.delete(keys::CHECKOUT_ITEMS).await
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use crate::pool::{Database, DbConfig};
    use chrono::Utc;
    use mercato_core::{CartItem, OrderHandoff};

    fn handoff() -> OrderHandoff {
        let item = CartItem {
            id: "p1".to_string(),
            name: "Áo thun".to_string(),
            price: 120_000,
            original_price: Some(150_000),
            brand: "Shop A".to_string(),
            image_url: String::new(),
            variant: Some("Đỏ, M".to_string()),
            stock: None,
            quantity: 2,
            selected: true,
        };
        OrderHandoff {
            items: vec![item],
            merchandise_subtotal: 240_000,
            shipping_cost: 30_000,
            loyalty_points_discount: None,
            voucher_discount_total: Some(30_000),
            total_amount: 240_000,
            placed_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_record_then_take_exactly_once() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let repo = db.orders();

        repo.record_checkout(&handoff()).await.unwrap();

        let taken = repo.take_handoff().await.unwrap().unwrap();
        assert_eq!(taken.total_amount, 240_000);
        assert_eq!(taken.items.len(), 1);

        // Consumed: the second take observes absence.
        assert!(repo.take_handoff().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_checkout_items_mirror() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let repo = db.orders();

        repo.record_checkout(&handoff()).await.unwrap();

        let items = repo.checkout_items().await.unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].variant.as_deref(), Some("Đỏ, M"));

        repo.clear_checkout_items().await.unwrap();
        assert!(repo.checkout_items().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_take_without_record_is_absent() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        assert!(db.orders().take_handoff().await.unwrap().is_none());
    }
}
