//! Entity trait implementation for the Order domain type.
//!
//! This module contains the [`ActorEntity`] trait implementation
//! that enables [`Order`] to be managed by the generic [`crate::framework::ResourceActor`].

use super::actions::OrderAction;
use super::error::OrderError;
use crate::events::{CafeteriaEvent, EventBus};
use crate::framework::ActorEntity;
use crate::model::{Order, OrderCreate, OrderId, OrderStatus};
use async_trait::async_trait;

#[async_trait]
impl ActorEntity for Order {
    type Id = OrderId;
    type Create = OrderCreate;
    type Action = OrderAction;
    type ActionResult = OrderStatus;
    type Context = EventBus;
    type Error = OrderError;

    /// Every new order starts `InProcess`.
    fn from_create_params(id: OrderId, _params: OrderCreate) -> Result<Self, Self::Error> {
        Ok(Self::new(id))
    }

    async fn on_create(&mut self, events: &EventBus) -> Result<(), Self::Error> {
        events.publish(CafeteriaEvent::OrderReceived { id: self.id });
        Ok(())
    }

    /// Settles the order.
    ///
    /// # Actions
    /// - `Complete`: `InProcess` → `Completed`
    /// - `Fail(reason)`: `InProcess` → `Error(reason)`
    ///
    /// A settled order rejects both with [`OrderError::AlreadySettled`].
    async fn handle_action(
        &mut self,
        action: OrderAction,
        events: &EventBus,
    ) -> Result<OrderStatus, Self::Error> {
        if self.status.is_settled() {
            return Err(OrderError::AlreadySettled {
                id: self.id,
                status: self.status.clone(),
            });
        }

        self.status = match action {
            OrderAction::Complete => OrderStatus::Completed,
            OrderAction::Fail(reason) => OrderStatus::Error(reason),
        };
        events.publish(CafeteriaEvent::OrderStatusChanged {
            id: self.id,
            status: self.status.clone(),
        });
        Ok(self.status.clone())
    }
}
