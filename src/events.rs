//! # Change Notifications
//!
//! Entities publish a [`CafeteriaEvent`] after every state change; the presentation
//! layer (or any other observer) subscribes instead of polling the actors.
//!
//! The bus is a Tokio broadcast channel. Publishing with no subscriber is not an
//! error, and a subscriber that falls behind by more than the channel capacity
//! skips the oldest events (`RecvError::Lagged`).

use crate::model::{Cart, CheckoutReceipt, OrderId, OrderStatus};
use tokio::sync::broadcast;
use tracing::trace;

#[derive(Debug, Clone, PartialEq)]
pub enum CafeteriaEvent {
    /// A new order entered the queue.
    OrderReceived { id: OrderId },
    /// An order settled.
    OrderStatusChanged { id: OrderId, status: OrderStatus },
    /// The cart changed; carries the new contents.
    CartUpdated(Cart),
    /// The cart was checked out and cleared.
    CheckoutCompleted(CheckoutReceipt),
}

#[derive(Debug, Clone)]
pub struct EventBus {
    sender: broadcast::Sender<CafeteriaEvent>,
}

impl EventBus {
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity.max(1));
        Self { sender }
    }

    pub fn publish(&self, event: CafeteriaEvent) {
        let delivered = self.sender.send(event).unwrap_or(0);
        trace!(delivered, "Event published");
    }

    pub fn subscribe(&self) -> broadcast::Receiver<CafeteriaEvent> {
        self.sender.subscribe()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_subscribers_see_events_in_order() {
        let bus = EventBus::new(8);
        let mut rx = bus.subscribe();

        bus.publish(CafeteriaEvent::OrderReceived { id: OrderId(1) });
        bus.publish(CafeteriaEvent::OrderStatusChanged {
            id: OrderId(1),
            status: OrderStatus::Completed,
        });

        assert_eq!(
            rx.recv().await.unwrap(),
            CafeteriaEvent::OrderReceived { id: OrderId(1) }
        );
        assert!(matches!(
            rx.recv().await.unwrap(),
            CafeteriaEvent::OrderStatusChanged { status: OrderStatus::Completed, .. }
        ));
    }

    #[test]
    fn test_publish_without_subscribers_is_fine() {
        let bus = EventBus::default();
        bus.publish(CafeteriaEvent::OrderReceived { id: OrderId(7) });
    }
}
