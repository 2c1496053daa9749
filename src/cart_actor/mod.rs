//! # Cart Actor
//!
//! The shopping cart: one line per distinct menu item, in the order items were
//! first added, with a total recomputed after every change.
//!
//! ## Structure
//!
//! - [`entity`] - [`ActorEntity`](crate::framework::ActorEntity) implementation for [`Cart`]
//! - [`actions`] - [`CartAction`] and [`CartActionResult`]
//! - [`error`] - [`CartError`] type for type-safe error handling
//! - [`new()`] - Factory function that creates the actor and client
//!
//! ## Custom Actions
//!
//! ```rust,ignore
//! cart_client.add_from_menu("hot-drinks", &"latte".into()).await?;
//! cart_client.change_quantity(&"latte".into(), -1).await?;
//! let receipt = cart_client.checkout().await?;
//! ```

pub mod actions;
pub mod entity;
pub mod error;

pub use actions::*;
pub use error::*;

use crate::framework::{ResourceActor, ResourceClient};
use crate::model::Cart;

/// Creates a new Cart actor and its generic client.
pub fn new(buffer_size: usize) -> (ResourceActor<Cart>, ResourceClient<Cart>) {
    ResourceActor::new(buffer_size)
}
