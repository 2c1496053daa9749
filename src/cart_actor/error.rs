//! Error types for the Cart actor.

use crate::model::ItemId;
use thiserror::Error;

/// Errors that can occur during cart operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum CartError {
    /// Checkout was attempted with nothing in the cart. Shown to the customer as is.
    #[error("Your cart is empty. Add some dishes before placing the order.")]
    EmptyCart,

    /// The cart has no line for this item.
    #[error("Item not in cart: {0}")]
    LineNotFound(ItemId),

    /// The menu has no such item in that category.
    #[error("Unknown menu item {item_id} in category {category}")]
    UnknownItem { category: String, item_id: ItemId },

    /// An error occurred while communicating with the actor system.
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}
