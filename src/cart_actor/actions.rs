//! Custom actions for the Cart actor.
//!
//! This module defines the operations a customer performs on the
//! [`Cart`](crate::model::Cart). They are handled by
//! [`ActorEntity::handle_action`](crate::framework::ActorEntity::handle_action).

use crate::model::{Cart, CheckoutReceipt, ItemId, MenuItem};

/// Custom actions for Cart entities.
#[derive(Debug, Clone)]
pub enum CartAction {
    /// Adds one unit: bumps the existing line or appends a new one.
    AddItem(MenuItem),
    /// Adjusts a line's quantity. A result of zero or less removes the line.
    ChangeQuantity { item_id: ItemId, delta: i32 },
    /// Drops a line whatever its quantity.
    RemoveItem(ItemId),
    /// Clears the cart and returns what was in it.
    ///
    /// # Errors
    /// Fails with [`CartError::EmptyCart`](super::CartError::EmptyCart) on an empty cart.
    Checkout,
}

/// Results from CartActions.
#[derive(Debug, Clone)]
pub enum CartActionResult {
    /// Result of every mutating action: the cart as it now stands.
    Updated(Cart),
    /// Result of `Checkout`.
    CheckedOut(CheckoutReceipt),
}
