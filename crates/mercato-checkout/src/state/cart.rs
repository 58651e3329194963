//! # Cart Session State
//!
//! Holds the current cart for the session.
//!
//! ## Thread Safety
//! The cart sits behind `Arc<Mutex<T>>`: commands run one at a time per
//! the event model, but the shell's runtime may dispatch them from
//! different threads, so access still goes through the lock.

use std::sync::{Arc, Mutex};

use mercato_core::Cart;

/// Session-managed cart state.
#[derive(Debug, Default)]
pub struct CartState {
    cart: Arc<Mutex<Cart>>,
}

impl CartState {
    /// Creates a new empty cart state.
    pub fn new() -> Self {
        CartState {
            cart: Arc::new(Mutex::new(Cart::new())),
        }
    }

    /// Creates cart state from an existing cart (e.g. a persisted mirror).
    pub fn from_cart(cart: Cart) -> Self {
        CartState {
            cart: Arc::new(Mutex::new(cart)),
        }
    }

    /// Executes a function with read access to the cart.
    ///
    /// ## Usage
    /// ```rust,ignore
    /// let totals = cart_state.with_cart(|cart| cart.totals());
    /// ```
    pub fn with_cart<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&Cart) -> R,
    {
        let cart = self.cart.lock().expect("Cart mutex poisoned");
        f(&cart)
    }

    /// Executes a function with write access to the cart.
    ///
    /// ## Usage
    /// ```rust,ignore
    /// cart_state.with_cart_mut(|cart| cart.select_all(true));
    /// ```
    pub fn with_cart_mut<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut Cart) -> R,
    {
        let mut cart = self.cart.lock().expect("Cart mutex poisoned");
        f(&mut cart)
    }
}
