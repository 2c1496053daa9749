//! Entity trait implementation for the Cart domain type.
//!
//! Every successful action publishes the new cart contents so the total on display
//! is recomputed after each mutation.

use super::actions::{CartAction, CartActionResult};
use super::error::CartError;
use crate::events::{CafeteriaEvent, EventBus};
use crate::framework::ActorEntity;
use crate::model::{Cart, CartCreate, CartId, CartLine, CheckoutReceipt, ItemId, MenuItem};
use async_trait::async_trait;

impl Cart {
    fn position(&self, item_id: &ItemId) -> Result<usize, CartError> {
        self.lines
            .iter()
            .position(|line| &line.item.id == item_id)
            .ok_or_else(|| CartError::LineNotFound(item_id.clone()))
    }

    fn add_item(&mut self, item: MenuItem) {
        match self.lines.iter_mut().find(|line| line.item.id == item.id) {
            Some(line) => line.quantity = line.quantity.saturating_add(1),
            None => self.lines.push(CartLine::new(item)),
        }
    }

    fn change_quantity(&mut self, item_id: &ItemId, delta: i32) -> Result<(), CartError> {
        let index = self.position(item_id)?;
        let quantity = i64::from(self.lines[index].quantity) + i64::from(delta);
        if quantity <= 0 {
            self.lines.remove(index);
        } else {
            self.lines[index].quantity = u32::try_from(quantity).unwrap_or(u32::MAX);
        }
        Ok(())
    }

    fn remove_item(&mut self, item_id: &ItemId) -> Result<(), CartError> {
        let index = self.position(item_id)?;
        self.lines.remove(index);
        Ok(())
    }

    fn checkout(&mut self) -> Result<CheckoutReceipt, CartError> {
        if self.is_empty() {
            return Err(CartError::EmptyCart);
        }
        let total = self.total();
        Ok(CheckoutReceipt {
            cart_id: self.id,
            lines: std::mem::take(&mut self.lines),
            total,
        })
    }
}

#[async_trait]
impl ActorEntity for Cart {
    type Id = CartId;
    type Create = CartCreate;
    type Action = CartAction;
    type ActionResult = CartActionResult;
    type Context = EventBus;
    type Error = CartError;

    /// Opens an empty cart.
    fn from_create_params(id: CartId, _params: CartCreate) -> Result<Self, Self::Error> {
        Ok(Self::new(id))
    }

    /// Handles customer actions on the cart.
    ///
    /// # Actions
    /// - `AddItem`: one more unit of the item
    /// - `ChangeQuantity`: +/- on a line, removing it at zero
    /// - `RemoveItem`: drops the line
    /// - `Checkout`: empties the cart into a receipt
    async fn handle_action(
        &mut self,
        action: CartAction,
        events: &EventBus,
    ) -> Result<CartActionResult, Self::Error> {
        let result = match action {
            CartAction::AddItem(item) => {
                self.add_item(item);
                CartActionResult::Updated(self.clone())
            }
            CartAction::ChangeQuantity { item_id, delta } => {
                self.change_quantity(&item_id, delta)?;
                CartActionResult::Updated(self.clone())
            }
            CartAction::RemoveItem(item_id) => {
                self.remove_item(&item_id)?;
                CartActionResult::Updated(self.clone())
            }
            CartAction::Checkout => {
                let receipt = self.checkout()?;
                events.publish(CafeteriaEvent::CheckoutCompleted(receipt.clone()));
                CartActionResult::CheckedOut(receipt)
            }
        };
        events.publish(CafeteriaEvent::CartUpdated(self.clone()));
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    fn latte() -> MenuItem {
        MenuItem::new("latte", "Latte", Decimal::new(4500, 2))
    }

    fn espresso() -> MenuItem {
        MenuItem::new("espresso", "Espresso", Decimal::new(3000, 2))
    }

    #[test]
    fn test_add_same_item_bumps_quantity() {
        let mut cart = Cart::new(CartId(1));
        cart.add_item(latte());
        cart.add_item(latte());

        assert_eq!(cart.lines().len(), 1);
        assert_eq!(cart.lines()[0].quantity, 2);
        assert_eq!(cart.total(), Decimal::new(9000, 2));
        assert_eq!(format!("{:.2}", cart.total()), "90.00");
    }

    #[test]
    fn test_lines_keep_insertion_order() {
        let mut cart = Cart::new(CartId(1));
        cart.add_item(espresso());
        cart.add_item(latte());
        cart.add_item(espresso());

        let ids: Vec<_> = cart.lines().iter().map(|l| l.item.id.0.as_str()).collect();
        assert_eq!(ids, vec!["espresso", "latte"]);
        let quantities: Vec<_> = cart.lines().iter().map(|l| l.quantity).collect();
        assert_eq!(quantities, vec![2, 1]);
    }

    #[test]
    fn test_decrement_at_one_removes_line() {
        let mut cart = Cart::new(CartId(1));
        cart.add_item(latte());
        cart.change_quantity(&"latte".into(), -1).unwrap();
        assert!(cart.line(&"latte".into()).is_none());
        assert!(cart.is_empty());
    }

    #[test]
    fn test_large_negative_delta_removes_instead_of_going_negative() {
        let mut cart = Cart::new(CartId(1));
        cart.add_item(latte());
        cart.add_item(latte());
        cart.change_quantity(&"latte".into(), -5).unwrap();
        assert!(cart.is_empty());
    }

    #[test]
    fn test_unknown_line_leaves_cart_unchanged() {
        let mut cart = Cart::new(CartId(1));
        cart.add_item(latte());
        let before = cart.clone();

        assert_eq!(
            cart.change_quantity(&"mocha".into(), 1),
            Err(CartError::LineNotFound("mocha".into()))
        );
        assert_eq!(
            cart.remove_item(&"mocha".into()),
            Err(CartError::LineNotFound("mocha".into()))
        );
        assert_eq!(cart, before);
    }

    #[test]
    fn test_remove_ignores_quantity() {
        let mut cart = Cart::new(CartId(1));
        for _ in 0..4 {
            cart.add_item(latte());
        }
        cart.add_item(espresso());
        cart.remove_item(&"latte".into()).unwrap();
        assert_eq!(cart.lines().len(), 1);
        assert_eq!(cart.total(), Decimal::new(3000, 2));
    }

    #[tokio::test]
    async fn test_checkout_empty_cart_is_rejected() {
        let bus = EventBus::new(8);
        let mut rx = bus.subscribe();
        let mut cart = Cart::new(CartId(1));

        let result = cart.handle_action(CartAction::Checkout, &bus).await;
        assert!(matches!(result, Err(CartError::EmptyCart)));
        assert!(cart.is_empty());
        // Nothing changed, nothing published
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_checkout_clears_cart_and_publishes() {
        let bus = EventBus::new(8);
        let mut rx = bus.subscribe();
        let mut cart = Cart::new(CartId(1));
        cart.add_item(latte());
        cart.add_item(espresso());

        let result = cart.handle_action(CartAction::Checkout, &bus).await.unwrap();
        let receipt = match result {
            CartActionResult::CheckedOut(receipt) => receipt,
            other => panic!("Expected CheckedOut, got {:?}", other),
        };
        assert_eq!(receipt.total, Decimal::new(7500, 2));
        assert_eq!(receipt.lines.len(), 2);
        assert!(cart.is_empty());

        assert!(matches!(
            rx.recv().await.unwrap(),
            CafeteriaEvent::CheckoutCompleted(_)
        ));
        match rx.recv().await.unwrap() {
            CafeteriaEvent::CartUpdated(snapshot) => assert!(snapshot.is_empty()),
            other => panic!("Expected CartUpdated, got {:?}", other),
        }
    }
}
