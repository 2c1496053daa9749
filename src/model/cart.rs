//! The shopping cart and its lines.
//!
//! # Actor Framework
//! [`Cart`] implements the [`ActorEntity`](crate::framework::ActorEntity) trait.
//! See [`impl ActorEntity for Cart`](#impl-ActorEntity-for-Cart) for the
//! [`CartAction`](crate::cart_actor::CartAction)s it accepts.

use crate::model::{ItemId, MenuItem};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Type-safe identifier for Carts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CartId(pub u32);

impl From<u32> for CartId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl Display for CartId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "cart_{}", self.0)
    }
}

/// One distinct menu item and how many of it are in the cart. Quantity is at least 1.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartLine {
    pub item: MenuItem,
    pub quantity: u32,
}

impl CartLine {
    pub fn new(item: MenuItem) -> Self {
        Self { item, quantity: 1 }
    }

    pub fn subtotal(&self) -> Decimal {
        self.item.price * Decimal::from(self.quantity)
    }
}

/// Lines in insertion order, which is also display order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cart {
    pub id: CartId,
    pub(crate) lines: Vec<CartLine>,
}

/// Payload for opening a new cart.
#[derive(Debug, Clone, Default)]
pub struct CartCreate;

impl Cart {
    pub fn new(id: CartId) -> Self {
        Self {
            id,
            lines: Vec::new(),
        }
    }

    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    pub fn line(&self, item_id: &ItemId) -> Option<&CartLine> {
        self.lines.iter().find(|line| &line.item.id == item_id)
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Number of units across all lines.
    pub fn item_count(&self) -> u32 {
        self.lines.iter().map(|line| line.quantity).sum()
    }

    /// Σ price × quantity, rounded to 2 decimal places.
    pub fn total(&self) -> Decimal {
        self.lines
            .iter()
            .map(CartLine::subtotal)
            .sum::<Decimal>()
            .round_dp(2)
    }
}

/// What a successful checkout hands back: the lines that were ordered and their total.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckoutReceipt {
    pub cart_id: CartId,
    pub lines: Vec<CartLine>,
    pub total: Decimal,
}
