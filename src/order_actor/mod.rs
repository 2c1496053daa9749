//! # Order Actor
//!
//! The internal order queue: every submitted order is registered here with status
//! `InProcess` and settled later by its scheduled completion.
//!
//! ## Structure
//!
//! - [`entity`] - [`ActorEntity`](crate::framework::ActorEntity) implementation for [`Order`]
//! - [`actions`] - [`OrderAction`] status transitions
//! - [`kitchen`] - the [`Kitchen`] preparation step and its [`SimulatedKitchen`] default
//! - [`error`] - [`OrderError`] type for type-safe error handling
//! - [`new()`] - Factory function that creates the actor and client
//!
//! ## Key Features
//!
//! - **Sequential IDs**: 1, 2, 3, … in submission order
//! - **Single transition**: an order settles exactly once
//! - **Events**: `OrderReceived` and `OrderStatusChanged` go out on the injected
//!   [`EventBus`](crate::events::EventBus)

pub mod actions;
pub mod entity;
pub mod error;
pub mod kitchen;

pub use actions::*;
pub use error::*;
pub use kitchen::*;

use crate::framework::{ResourceActor, ResourceClient};
use crate::model::Order;

/// Creates a new Order actor and its generic client.
pub fn new(buffer_size: usize) -> (ResourceActor<Order>, ResourceClient<Order>) {
    ResourceActor::new(buffer_size)
}
