//! Error types for the Order actor.

use crate::model::{OrderId, OrderStatus};
use thiserror::Error;

/// Errors that can occur during order operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum OrderError {
    /// The requested order was not found.
    #[error("Order not found: {0}")]
    NotFound(String),

    /// The simulated preparation step failed.
    /// Recorded on the order as `OrderStatus::Error`; never retried.
    #[error("Order preparation failed: {0}")]
    PreparationFailed(String),

    /// The order already reached a final status and cannot transition again.
    #[error("Order {id} already settled as {status}")]
    AlreadySettled { id: OrderId, status: OrderStatus },

    /// An error occurred while communicating with the actor system.
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}
