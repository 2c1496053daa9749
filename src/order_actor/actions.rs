//! Status transitions for the Order actor.
//!
//! These are handled by
//! [`ActorEntity::handle_action`](crate::framework::ActorEntity::handle_action)
//! on [`Order`](crate::model::Order). Both are one-way: an order settles once.

/// Custom actions for Order entities.
#[derive(Debug, Clone, PartialEq)]
pub enum OrderAction {
    /// Preparation finished; the order becomes `Completed`.
    Complete,
    /// Preparation failed with the given reason; the order becomes `Error`.
    Fail(String),
}
