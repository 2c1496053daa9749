//! The simulated preparation step that runs when an order's delay elapses.

use crate::model::OrderId;
use crate::order_actor::OrderError;
use async_trait::async_trait;
use tracing::debug;

/// Prepares an order. An `Err` marks the order as failed.
#[async_trait]
pub trait Kitchen: Send + Sync {
    async fn prepare(&self, id: OrderId) -> Result<(), OrderError>;
}

/// Kitchen that always succeeds. The delay before preparation is the whole simulation.
#[derive(Debug, Clone, Copy, Default)]
pub struct SimulatedKitchen;

#[async_trait]
impl Kitchen for SimulatedKitchen {
    async fn prepare(&self, id: OrderId) -> Result<(), OrderError> {
        debug!(%id, "Order prepared");
        Ok(())
    }
}
