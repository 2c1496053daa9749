//! # Cart Client
//!
//! Provides a high‑level API for the customer's cart.
//! It wraps a `ResourceClient<Cart>` bound to one open cart and the menu it sells from.
use crate::cart_actor::{CartAction, CartActionResult, CartError};
use crate::clients::actor_client::ActorClient;
use crate::framework::{FrameworkError, ResourceClient};
use crate::model::{Cart, CartCreate, CartId, CheckoutReceipt, ItemId, Menu, MenuItem};
use async_trait::async_trait;
use rust_decimal::Decimal;
use std::sync::Arc;
use tracing::{debug, info, instrument};

/// Client for interacting with the Cart actor.
#[derive(Clone)]
pub struct CartClient {
    inner: ResourceClient<Cart>,
    cart_id: CartId,
    menu: Arc<Menu>,
}

impl CartClient {
    pub fn new(inner: ResourceClient<Cart>, cart_id: CartId, menu: Arc<Menu>) -> Self {
        Self {
            inner,
            cart_id,
            menu,
        }
    }

    /// Opens a fresh cart on the actor and returns a client bound to it.
    #[instrument(skip(inner, menu))]
    pub async fn open(inner: ResourceClient<Cart>, menu: Arc<Menu>) -> Result<Self, CartError> {
        let cart_id = inner.create(CartCreate).await.map_err(Self::map_error)?;
        info!(%cart_id, "Cart opened");
        Ok(Self::new(inner, cart_id, menu))
    }

    pub fn cart_id(&self) -> CartId {
        self.cart_id
    }

    /// Adds one unit of `item`.
    #[instrument(skip(self, item), fields(item_id = %item.id))]
    pub async fn add_item(&self, item: MenuItem) -> Result<Cart, CartError> {
        debug!("Sending request");
        self.update(CartAction::AddItem(item)).await
    }

    /// The "add to cart" button: looks the item up in `category` and adds it.
    #[instrument(skip(self))]
    pub async fn add_from_menu(&self, category: &str, item_id: &ItemId) -> Result<Cart, CartError> {
        let item = self
            .menu
            .find(category, item_id)
            .cloned()
            .ok_or_else(|| CartError::UnknownItem {
                category: category.to_string(),
                item_id: item_id.clone(),
            })?;
        self.add_item(item).await
    }

    /// Adjusts a line by `delta`; the line disappears when it reaches zero.
    #[instrument(skip(self))]
    pub async fn change_quantity(&self, item_id: &ItemId, delta: i32) -> Result<Cart, CartError> {
        debug!("Sending request");
        self.update(CartAction::ChangeQuantity {
            item_id: item_id.clone(),
            delta,
        })
        .await
    }

    /// The "+" button on a line.
    pub async fn increase(&self, item_id: &ItemId) -> Result<Cart, CartError> {
        self.change_quantity(item_id, 1).await
    }

    /// The "-" button on a line.
    pub async fn decrease(&self, item_id: &ItemId) -> Result<Cart, CartError> {
        self.change_quantity(item_id, -1).await
    }

    #[instrument(skip(self))]
    pub async fn remove_item(&self, item_id: &ItemId) -> Result<Cart, CartError> {
        debug!("Sending request");
        self.update(CartAction::RemoveItem(item_id.clone())).await
    }

    /// Current contents of the cart.
    pub async fn cart(&self) -> Result<Cart, CartError> {
        self.get(self.cart_id)
            .await?
            .ok_or_else(|| CartError::ActorCommunicationError(format!("{} is gone", self.cart_id)))
    }

    /// Σ price × quantity over all lines, rounded to 2 decimal places.
    pub async fn compute_total(&self) -> Result<Decimal, CartError> {
        Ok(self.cart().await?.total())
    }

    /// Places the order: clears the cart and returns what was in it.
    ///
    /// Fails with [`CartError::EmptyCart`] when there is nothing to order; the cart is
    /// left untouched in that case.
    #[instrument(skip(self))]
    pub async fn checkout(&self) -> Result<CheckoutReceipt, CartError> {
        debug!("Sending request");
        match self
            .inner
            .perform_action(self.cart_id, CartAction::Checkout)
            .await
        {
            Ok(CartActionResult::CheckedOut(receipt)) => {
                info!(total = %receipt.total, lines = receipt.lines.len(), "Checked out");
                Ok(receipt)
            }
            Ok(_) => unreachable!("Checkout action must return CheckedOut result"),
            Err(e) => Err(Self::map_error(e)),
        }
    }

    async fn update(&self, action: CartAction) -> Result<Cart, CartError> {
        match self.inner.perform_action(self.cart_id, action).await {
            Ok(CartActionResult::Updated(cart)) => Ok(cart),
            Ok(_) => unreachable!("Mutating cart actions must return Updated result"),
            Err(e) => Err(Self::map_error(e)),
        }
    }
}

#[async_trait]
impl ActorClient<Cart> for CartClient {
    type Error = CartError;

    fn inner(&self) -> &ResourceClient<Cart> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> Self::Error {
        match e.into_entity_error::<CartError>() {
            Ok(cart_error) => cart_error,
            Err(other) => CartError::ActorCommunicationError(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::framework::mock::{create_mock_client, expect_action, expect_get};

    fn client_for(inner: ResourceClient<Cart>) -> CartClient {
        CartClient::new(inner, CartId(1), Arc::new(Menu::cafeteria()))
    }

    #[tokio::test]
    async fn test_add_from_menu_sends_catalog_item() {
        let (client, mut receiver) = create_mock_client::<Cart>(10);
        let cart_client = client_for(client);

        let add_task = tokio::spawn(async move {
            cart_client
                .add_from_menu("hot-drinks", &"latte".into())
                .await
        });

        let (id, action, responder) = expect_action(&mut receiver)
            .await
            .expect("Expected Action request");
        assert_eq!(id, CartId(1));
        match action {
            CartAction::AddItem(item) => {
                assert_eq!(item.name, "Latte");
                assert_eq!(item.price, Decimal::new(4500, 2));
            }
            other => panic!("Expected AddItem action, got {:?}", other),
        }

        responder
            .send(Ok(CartActionResult::Updated(Cart::new(CartId(1)))))
            .unwrap();
        assert!(add_task.await.unwrap().is_ok());
    }

    #[tokio::test]
    async fn test_add_unknown_item_never_reaches_actor() {
        let (client, mut receiver) = create_mock_client::<Cart>(10);
        let cart_client = client_for(client);

        let result = cart_client.add_from_menu("desserts", &"latte".into()).await;
        assert_eq!(
            result,
            Err(CartError::UnknownItem {
                category: "desserts".into(),
                item_id: "latte".into(),
            })
        );

        drop(cart_client);
        assert!(receiver.recv().await.is_none());
    }

    #[tokio::test]
    async fn test_empty_checkout_surfaces_typed_error() {
        let (client, mut receiver) = create_mock_client::<Cart>(10);
        let cart_client = client_for(client);

        let checkout_task = tokio::spawn(async move { cart_client.checkout().await });

        let (_id, action, responder) = expect_action(&mut receiver)
            .await
            .expect("Expected Action request");
        assert!(matches!(action, CartAction::Checkout));
        responder
            .send(Err(FrameworkError::EntityError(Box::new(CartError::EmptyCart))))
            .unwrap();

        let result = checkout_task.await.unwrap();
        assert_eq!(result, Err(CartError::EmptyCart));
    }

    #[tokio::test]
    async fn test_decrease_sends_negative_delta() {
        let (client, mut receiver) = create_mock_client::<Cart>(10);
        let cart_client = client_for(client);

        let task = tokio::spawn(async move { cart_client.decrease(&"latte".into()).await });

        let (_id, action, responder) = expect_action(&mut receiver)
            .await
            .expect("Expected Action request");
        match action {
            CartAction::ChangeQuantity { item_id, delta } => {
                assert_eq!(item_id, ItemId::from("latte"));
                assert_eq!(delta, -1);
            }
            other => panic!("Expected ChangeQuantity action, got {:?}", other),
        }
        responder
            .send(Ok(CartActionResult::Updated(Cart::new(CartId(1)))))
            .unwrap();
        assert!(task.await.unwrap().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_cart_reads_its_own_cart() {
        let (client, mut receiver) = create_mock_client::<Cart>(10);
        let cart_client = client_for(client);

        let read_task = tokio::spawn(async move { cart_client.cart().await });

        let (id, responder) = expect_get(&mut receiver)
            .await
            .expect("Expected Get request");
        assert_eq!(id, CartId(1));
        responder.send(Ok(None)).unwrap();

        // A cart that vanished from the actor is a communication failure
        let result = read_task.await.unwrap();
        assert!(matches!(result, Err(CartError::ActorCommunicationError(_))));
    }
}
