//! Plain-text rendering of the widget's three panels: order queue, menu and cart.
//!
//! Renderers are pure functions of a snapshot. [`OrderBoard`] is the only stateful
//! piece: it follows [`CafeteriaEvent`]s so the order panel can be redrawn without
//! asking the order actor.

use crate::cart_actor::CartError;
use crate::events::CafeteriaEvent;
use crate::model::{Cart, CheckoutReceipt, Menu, Order, OrderId, OrderStatus};
use rust_decimal::Decimal;
use std::collections::BTreeMap;
use std::fmt::Write;

pub const EMPTY_CATEGORY: &str = "No dishes in this category.";
pub const EMPTY_CART: &str = "The cart is empty.";
pub const CHECKOUT_OK: &str = "Online order placed! (The cart has been emptied)";

/// `$` followed by the amount with exactly two decimals.
pub fn format_money(amount: Decimal) -> String {
    format!("${:.2}", amount.round_dp(2))
}

/// One order row: id, CSS class and label.
pub fn render_order(id: OrderId, status: &OrderStatus) -> String {
    let mut row = format!("Order #{} [{}] {}", id.0, status.css_class(), status.label());
    if let OrderStatus::Error(reason) = status {
        let _ = write!(row, ": {}", reason);
    }
    row
}

pub fn render_orders(orders: &[Order]) -> String {
    orders
        .iter()
        .map(|order| render_order(order.id, &order.status))
        .collect::<Vec<_>>()
        .join("\n")
}

/// The dishes of one category, or [`EMPTY_CATEGORY`].
pub fn render_menu(menu: &Menu, category: &str) -> String {
    let items = menu.items(category);
    if items.is_empty() {
        return EMPTY_CATEGORY.to_string();
    }

    let mut out = String::new();
    if let Some(c) = menu.category(category) {
        let _ = writeln!(out, "== {} ==", c.title);
    }
    for item in items {
        let price = format_money(item.price);
        let _ = writeln!(out, "{} {} [{}/{}]", item.name, price, category, item.id);
        if !item.description.is_empty() {
            let _ = writeln!(out, "  {}", item.description);
        }
    }
    out.truncate(out.trim_end().len());
    out
}

/// Each line with unit price, quantity and subtotal, then the grand total.
pub fn render_cart(cart: &Cart) -> String {
    let mut out = String::new();
    if cart.is_empty() {
        let _ = writeln!(out, "{}", EMPTY_CART);
    }
    for line in cart.lines() {
        let _ = writeln!(
            out,
            "{} ({} each) x{} = {}",
            line.item.name,
            format_money(line.item.price),
            line.quantity,
            format_money(line.subtotal())
        );
    }
    let _ = write!(out, "Total: {}", format_money(cart.total()));
    out
}

/// The checkout button is disabled while the cart is empty.
pub fn checkout_enabled(cart: &Cart) -> bool {
    !cart.is_empty()
}

/// What the customer is told after pressing checkout.
pub fn checkout_message(outcome: &Result<CheckoutReceipt, CartError>) -> String {
    match outcome {
        Ok(receipt) => format!("{} Total: {}", CHECKOUT_OK, format_money(receipt.total)),
        Err(e) => e.to_string(),
    }
}

/// Order panel state rebuilt from events.
///
/// Holds one status per order, so a status change replaces the row's class instead
/// of adding to it.
#[derive(Debug, Default)]
pub struct OrderBoard {
    rows: BTreeMap<OrderId, OrderStatus>,
}

impl OrderBoard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Folds one event in. Returns the redrawn row for order events, `None` otherwise.
    pub fn apply(&mut self, event: &CafeteriaEvent) -> Option<String> {
        let (id, status) = match event {
            CafeteriaEvent::OrderReceived { id } => (*id, OrderStatus::InProcess),
            CafeteriaEvent::OrderStatusChanged { id, status } => (*id, status.clone()),
            _ => return None,
        };
        let row = render_order(id, &status);
        self.rows.insert(id, status);
        Some(row)
    }

    pub fn class_of(&self, id: OrderId) -> Option<&'static str> {
        self.rows.get(&id).map(OrderStatus::css_class)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn render(&self) -> String {
        self.rows
            .iter()
            .map(|(id, status)| render_order(*id, status))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{CartId, CartLine};

    fn latte_cart(quantity: u32) -> Cart {
        let menu = Menu::cafeteria();
        let mut cart = Cart::new(CartId(1));
        cart.lines.push(CartLine {
            item: menu.find("hot-drinks", &"latte".into()).unwrap().clone(),
            quantity,
        });
        cart
    }

    #[test]
    fn test_money_has_two_decimals() {
        assert_eq!(format_money(Decimal::new(90, 0)), "$90.00");
        assert_eq!(format_money(Decimal::new(12346, 3)), "$12.35");
        assert_eq!(format_money(Decimal::ZERO), "$0.00");
    }

    #[test]
    fn test_cart_shows_subtotal_and_total() {
        let rendered = render_cart(&latte_cart(2));
        assert_eq!(rendered, "Latte ($45.00 each) x2 = $90.00\nTotal: $90.00");
    }

    #[test]
    fn test_empty_cart_message_and_disabled_checkout() {
        let cart = Cart::new(CartId(1));
        assert_eq!(render_cart(&cart), "The cart is empty.\nTotal: $0.00");
        assert!(!checkout_enabled(&cart));
        assert!(checkout_enabled(&latte_cart(1)));
    }

    #[test]
    fn test_unknown_category_renders_placeholder() {
        let menu = Menu::cafeteria();
        assert_eq!(render_menu(&menu, "soups"), EMPTY_CATEGORY);
        let drinks = render_menu(&menu, "hot-drinks");
        assert!(drinks.starts_with("== Hot Drinks =="));
        assert!(drinks.contains("Latte $45.00 [hot-drinks/latte]"));
    }

    #[test]
    fn test_checkout_messages() {
        assert_eq!(
            checkout_message(&Err(CartError::EmptyCart)),
            "Your cart is empty. Add some dishes before placing the order."
        );
        let receipt = CheckoutReceipt {
            cart_id: CartId(1),
            lines: latte_cart(2).lines,
            total: Decimal::new(9000, 2),
        };
        assert_eq!(
            checkout_message(&Ok(receipt)),
            "Online order placed! (The cart has been emptied) Total: $90.00"
        );
    }

    #[test]
    fn test_board_replaces_status_class() {
        let mut board = OrderBoard::new();
        let id = OrderId(1);

        board.apply(&CafeteriaEvent::OrderReceived { id });
        assert_eq!(board.class_of(id), Some("status-in-process"));

        let row = board.apply(&CafeteriaEvent::OrderStatusChanged {
            id,
            status: OrderStatus::Completed,
        });
        assert_eq!(row.as_deref(), Some("Order #1 [status-completed] Completed"));
        assert_eq!(board.class_of(id), Some("status-completed"));
        assert_eq!(board.len(), 1);
        assert!(!board.render().contains("status-in-process"));
    }

    #[test]
    fn test_board_ignores_cart_events() {
        let mut board = OrderBoard::new();
        assert!(board.apply(&CafeteriaEvent::CartUpdated(latte_cart(1))).is_none());
        assert!(board.is_empty());
    }

    #[test]
    fn test_error_row_carries_reason() {
        let row = render_order(OrderId(4), &OrderStatus::Error("oven down".into()));
        assert_eq!(row, "Order #4 [status-error] Error: oven down");
    }
}
