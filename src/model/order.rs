//! Represents one simulated preparation request in the internal order queue.
//!
//! # Actor Framework
//! This struct implements the [`ActorEntity`](crate::framework::ActorEntity) trait,
//! allowing it to be managed by a [`ResourceActor`](crate::framework::ResourceActor).
//!
//! See [`impl ActorEntity for Order`](#impl-ActorEntity-for-Order) for details on:
//! - Creation parameters ([`OrderCreate`])
//! - Status transitions ([`OrderAction`](crate::order_actor::OrderAction))
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Type-safe identifier for Orders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct OrderId(pub u32);

impl From<u32> for OrderId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl Display for OrderId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "order_{}", self.0)
    }
}

/// Lifecycle of an order: `InProcess` until it settles as `Completed` or `Error`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum OrderStatus {
    InProcess,
    Completed,
    /// Preparation failed; carries the reason.
    Error(String),
}

impl OrderStatus {
    /// Human-readable label shown next to the order.
    pub fn label(&self) -> &'static str {
        match self {
            OrderStatus::InProcess => "In Process",
            OrderStatus::Completed => "Completed",
            OrderStatus::Error(_) => "Error",
        }
    }

    /// The single CSS class for this status.
    ///
    /// A status change replaces the previous class outright; classes never accumulate.
    pub fn css_class(&self) -> &'static str {
        match self {
            OrderStatus::InProcess => "status-in-process",
            OrderStatus::Completed => "status-completed",
            OrderStatus::Error(_) => "status-error",
        }
    }

    pub fn is_settled(&self) -> bool {
        !matches!(self, OrderStatus::InProcess)
    }
}

impl Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Order {
    pub id: OrderId,
    pub status: OrderStatus,
}

/// Payload for submitting a new order. Orders carry no data beyond their ID yet.
#[derive(Debug, Clone, Default)]
pub struct OrderCreate;

impl Order {
    /// Creates a new order in the `InProcess` state.
    pub fn new(id: OrderId) -> Self {
        Self {
            id,
            status: OrderStatus::InProcess,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_order_is_in_process() {
        let order = Order::new(OrderId(1));
        assert_eq!(order.status, OrderStatus::InProcess);
        assert!(!order.status.is_settled());
    }

    #[test]
    fn test_each_status_has_one_class() {
        assert_eq!(OrderStatus::InProcess.css_class(), "status-in-process");
        assert_eq!(OrderStatus::Completed.css_class(), "status-completed");
        assert_eq!(OrderStatus::Error("burnt".into()).css_class(), "status-error");
    }

    #[test]
    fn test_status_labels() {
        assert_eq!(OrderStatus::InProcess.to_string(), "In Process");
        assert_eq!(OrderStatus::Completed.to_string(), "Completed");
        assert_eq!(OrderStatus::Error("burnt".into()).to_string(), "Error");
    }

    #[test]
    fn test_order_id_ordering_follows_allocation() {
        assert!(OrderId(1) < OrderId(2));
        assert_eq!(OrderId(3).to_string(), "order_3");
    }

    #[test]
    fn test_order_status_serialization() {
        let status = OrderStatus::Error("oven down".into());
        let json = serde_json::to_string(&status).unwrap();
        let deserialized: OrderStatus = serde_json::from_str(&json).unwrap();
        assert_eq!(status, deserialized);
    }
}
