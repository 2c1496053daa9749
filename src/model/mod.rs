//! Pure data structures implementing the [`ActorEntity`](crate::framework::ActorEntity) trait,
//! plus the static menu catalog.

pub mod cart;
pub mod menu;
pub mod order;

pub use cart::*;
pub use menu::*;
pub use order::*;
