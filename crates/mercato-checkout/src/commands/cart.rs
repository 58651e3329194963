//! # Cart Commands
//!
//! Session commands for cart manipulation. All synchronous: the cart is
//! session state, not storage; it only reaches storage as the checkout
//! mirror when an order is placed.

use serde::{Deserialize, Serialize};
use tracing::debug;

use mercato_core::{Cart, CartItem, CartTotals, CoreResult};

use crate::error::ApiError;
use crate::state::CartState;

/// Cart response including items and recomputed totals.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartResponse {
    pub items: Vec<CartItem>,
    pub totals: CartTotals,
}

impl From<&Cart> for CartResponse {
    fn from(cart: &Cart) -> Self {
        CartResponse {
            items: cart.items.clone(),
            totals: cart.totals(),
        }
    }
}

/// Gets the current cart contents.
pub fn get_cart(cart: &CartState) -> CartResponse {
    debug!("get_cart command");
    cart.with_cart(|c| CartResponse::from(c))
}

/// Adds an item to the cart (merging by id).
pub fn add_to_cart(cart: &CartState, item: CartItem) -> Result<CartResponse, ApiError> {
    debug!(item_id = %item.id, quantity = %item.quantity, "add_to_cart command");

    let result: CoreResult<CartResponse> = cart.with_cart_mut(|c| {
        c.add_item(item)?;
        Ok(CartResponse::from(&*c))
    });
    result.map_err(ApiError::from)
}

/// Sets the quantity of an item in the cart.
///
/// ## Behavior
/// Requests outside the allowed range are rejected with a
/// `QUANTITY_LIMIT` notice and the stored quantity stays unchanged.
pub fn update_quantity(
    cart: &CartState,
    item_id: &str,
    quantity: i64,
) -> Result<CartResponse, ApiError> {
    debug!(item_id = %item_id, quantity = %quantity, "update_quantity command");

    let result: CoreResult<CartResponse> = cart.with_cart_mut(|c| {
        c.update_quantity(item_id, quantity)?;
        Ok(CartResponse::from(&*c))
    });
    result.map_err(ApiError::from)
}

/// Removes an item from the cart.
pub fn remove_from_cart(cart: &CartState, item_id: &str) -> Result<CartResponse, ApiError> {
    debug!(item_id = %item_id, "remove_from_cart command");

    let result: CoreResult<CartResponse> = cart.with_cart_mut(|c| {
        c.remove_item(item_id)?;
        Ok(CartResponse::from(&*c))
    });
    result.map_err(ApiError::from)
}

/// Clears all items from the cart.
pub fn clear_cart(cart: &CartState) -> CartResponse {
    debug!("clear_cart command");

    cart.with_cart_mut(|c| {
        c.clear();
        CartResponse::from(&*c)
    })
}

/// Sets one line's selection flag.
pub fn set_item_selected(
    cart: &CartState,
    item_id: &str,
    selected: bool,
) -> Result<CartResponse, ApiError> {
    debug!(item_id = %item_id, selected = %selected, "set_item_selected command");

    let result: CoreResult<CartResponse> = cart.with_cart_mut(|c| {
        c.set_selected(item_id, selected)?;
        Ok(CartResponse::from(&*c))
    });
    result.map_err(ApiError::from)
}

/// Sets every line's selection flag identically ("select all").
pub fn select_all(cart: &CartState, selected: bool) -> CartResponse {
    debug!(selected = %selected, "select_all command");

    cart.with_cart_mut(|c| {
        c.select_all(selected);
        CartResponse::from(&*c)
    })
}

/// Toggles every line of one shop ("shop header tick").
pub fn select_shop(cart: &CartState, brand: &str, selected: bool) -> CartResponse {
    debug!(brand = %brand, selected = %selected, "select_shop command");

    cart.with_cart_mut(|c| {
        c.select_shop(brand, selected);
        CartResponse::from(&*c)
    })
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;

    fn item(id: &str, brand: &str, price: i64, quantity: i64) -> CartItem {
        CartItem {
            id: id.to_string(),
            name: format!("Item {}", id),
            price,
            original_price: None,
            brand: brand.to_string(),
            image_url: String::new(),
            variant: None,
            stock: None,
            quantity,
            selected: false,
        }
    }

    fn state() -> CartState {
        let cart = CartState::new();
        add_to_cart(&cart, item("1", "Shop A", 100_000, 2)).unwrap();
        add_to_cart(&cart, item("2", "Shop B", 50_000, 1)).unwrap();
        cart
    }

    #[test]
    fn test_quantity_limit_rejection_is_typed_and_nonmutating() {
        let cart = state();

        let err = update_quantity(&cart, "1", 100).unwrap_err();
        assert_eq!(err.code, ErrorCode::QuantityLimit);

        let response = get_cart(&cart);
        let line = response.items.iter().find(|i| i.id == "1").unwrap();
        assert_eq!(line.quantity, 2);
    }

    #[test]
    fn test_select_all_then_totals() {
        let cart = state();

        let response = select_all(&cart, true);
        assert_eq!(response.totals.merchandise_subtotal, 250_000);
        assert!(response.totals.any_selected);

        let response = select_all(&cart, false);
        assert_eq!(response.totals.merchandise_subtotal, 0);
        assert!(!response.totals.any_selected);
    }

    #[test]
    fn test_select_shop_only_touches_that_brand() {
        let cart = state();

        let response = select_shop(&cart, "Shop A", true);
        assert_eq!(response.totals.merchandise_subtotal, 200_000);
        assert!(!response.items.iter().find(|i| i.id == "2").unwrap().selected);
    }

    #[test]
    fn test_unknown_item_is_not_found() {
        let cart = state();
        let err = set_item_selected(&cart, "zz", true).unwrap_err();
        assert_eq!(err.code, ErrorCode::NotFound);
    }

    #[test]
    fn test_clear_cart() {
        let cart = state();
        let response = clear_cart(&cart);
        assert!(response.items.is_empty());
        assert_eq!(response.totals.item_count, 0);
    }
}
