//! # Order Commands
//!
//! Checkout and confirmation: the one-shot handoff between the payment
//! step and the post-payment summary screen.
//!
//! ## Order Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                    Order Lifecycle                                  │
//! │                                                                     │
//! │  ┌──────────┐     ┌───────────┐     ┌──────────┐     ┌──────────┐   │
//! │  │ Cart     │────►│ Checkout  │────►│ Payment  │────►│ Summary  │   │
//! │  │ (select) │     │ screen    │     │ (mock)   │     │ screen   │   │
//! │  └──────────┘     └───────────┘     └──────────┘     └──────────┘   │
//! │                        │                                  │         │
//! │                   place_order()                    confirm_order()  │
//! │                   writes handoff +                 takes handoff    │
//! │                   checkoutItems mirror             exactly once,    │
//! │                                                    clears mirror +  │
//! │                                                    voucher keys     │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::Utc;
use serde::Deserialize;
use tracing::debug;

use mercato_core::voucher::total_discount;
use mercato_core::{CoreError, Money, OrderHandoff};
use mercato_db::Database;

use crate::error::ApiError;
use crate::state::CartState;

/// Checkout parameters the checkout screen collects.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutRequest {
    /// Shipping cost quoted for the selected address.
    pub shipping_cost: i64,

    /// Loyalty points applied as a flat discount, if any.
    #[serde(default)]
    pub loyalty_points_discount: Option<i64>,
}

/// Places the order: computes totals over the selected lines and writes
/// the handoff record plus the checkout-items mirror.
///
/// Rejected with a notice when nothing is selected; no state is written.
pub async fn place_order(
    db: &Database,
    cart: &CartState,
    request: CheckoutRequest,
) -> Result<OrderHandoff, ApiError> {
    debug!(shipping_cost = request.shipping_cost, "place_order command");

    let (items, subtotal, any_selected) = cart.with_cart(|c| {
        (
            c.selected_items(),
            c.merchandise_subtotal(),
            c.any_selected(),
        )
    });

    if !any_selected {
        return Err(CoreError::NothingSelected.into());
    }

    let selections = db.vouchers().load_selection().await?;
    let voucher_discount = total_discount(&selections, subtotal);
    let loyalty_discount = request.loyalty_points_discount.unwrap_or(0);

    let total = (subtotal + Money::from_units(request.shipping_cost)
        - voucher_discount
        - Money::from_units(loyalty_discount))
    .clamp_at_zero();

    let handoff = OrderHandoff {
        items,
        merchandise_subtotal: subtotal.units(),
        shipping_cost: request.shipping_cost,
        loyalty_points_discount: request.loyalty_points_discount,
        voucher_discount_total: (!selections.is_empty()).then(|| voucher_discount.units()),
        total_amount: total.units(),
        placed_at: Utc::now(),
    };

    db.orders().record_checkout(&handoff).await?;
    Ok(handoff)
}

/// Consumes the handoff for the post-payment summary screen.
///
/// Exactly-once: a second call (or a confirmation visit with no prior
/// checkout) reports missing state, which the shell maps to a notice and
/// a redirect to a safe starting screen. A successful read also clears
/// the checkout-items mirror and the persisted voucher selection.
pub async fn confirm_order(db: &Database) -> Result<OrderHandoff, ApiError> {
    debug!("confirm_order command");

    let Some(handoff) = db.orders().take_handoff().await? else {
        return Err(ApiError::missing_state("order handoff"));
    };

    db.orders().clear_checkout_items().await?;
    db.vouchers().clear_selection().await?;

    Ok(handoff)
}

// =============================================================================
// Unit Tests
// =============================================================================
