//! # Order Client
//!
//! Provides a high‑level API for the internal order queue.
//! It wraps a `ResourceClient<Order>` and schedules each order's completion.
use crate::clients::actor_client::ActorClient;
use crate::framework::{FrameworkError, ResourceClient, ScheduledTask, Scheduler};
use crate::model::{Order, OrderCreate, OrderId, OrderStatus};
use crate::order_actor::{Kitchen, OrderAction, OrderError};
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, instrument, warn};

/// Handle returned by [`OrderClient::submit_order`].
///
/// The order is already registered as `InProcess`; the completion runs on its own
/// task whether or not the ticket is kept.
#[derive(Debug)]
pub struct OrderTicket {
    id: OrderId,
    completion: ScheduledTask<Result<OrderStatus, OrderError>>,
}

impl OrderTicket {
    pub fn id(&self) -> OrderId {
        self.id
    }

    /// How long the order waits before preparation runs.
    pub fn delay(&self) -> Duration {
        self.completion.delay()
    }

    /// Waits for the order to settle and returns its final status.
    pub async fn wait(self) -> Result<OrderStatus, OrderError> {
        match self.completion.join().await {
            Ok(Some(settled)) => settled,
            Ok(None) => Err(OrderError::ActorCommunicationError(format!(
                "completion of {} was cancelled",
                self.id
            ))),
            Err(e) => Err(OrderError::ActorCommunicationError(e.to_string())),
        }
    }
}

/// Client for interacting with the Order actor.
///
/// Submitting returns as soon as the order is registered. Completion is a
/// scheduled job that runs the [`Kitchen`] and reports the outcome back to the
/// actor. Jobs of different orders run independently and finish in any order.
#[derive(Clone)]
pub struct OrderClient {
    inner: ResourceClient<Order>,
    scheduler: Scheduler,
    kitchen: Arc<dyn Kitchen>,
}

impl OrderClient {
    pub fn new(
        inner: ResourceClient<Order>,
        scheduler: Scheduler,
        kitchen: Arc<dyn Kitchen>,
    ) -> Self {
        Self {
            inner,
            scheduler,
            kitchen,
        }
    }

    /// Registers a new order and schedules its completion. Does not wait for it.
    #[instrument(skip(self))]
    pub async fn submit_order(&self) -> Result<OrderTicket, OrderError> {
        debug!("submit_order called");
        let id = self
            .inner
            .create(OrderCreate)
            .await
            .map_err(Self::map_error)?;

        // The job holds a client clone, so the actor outlives every pending completion.
        let client = self.clone();
        let completion = self
            .scheduler
            .schedule(move || async move { client.complete_order(id).await });
        info!(%id, delay_ms = completion.delay().as_millis() as u64, "Order received");

        Ok(OrderTicket { id, completion })
    }

    /// Runs the preparation step for an order and records the outcome.
    ///
    /// A preparation failure is not returned as an error: it becomes the order's
    /// `Error` status.
    #[instrument(skip(self))]
    pub async fn complete_order(&self, id: OrderId) -> Result<OrderStatus, OrderError> {
        let action = match self.kitchen.prepare(id).await {
            Ok(()) => OrderAction::Complete,
            Err(e) => {
                warn!(%id, error = %e, "Preparation failed");
                OrderAction::Fail(e.to_string())
            }
        };

        let status = self
            .inner
            .perform_action(id, action)
            .await
            .map_err(Self::map_error)?;
        info!(%id, %status, "Order settled");
        Ok(status)
    }

    /// Current status of one order.
    #[instrument(skip(self))]
    pub async fn status(&self, id: OrderId) -> Result<OrderStatus, OrderError> {
        self.get(id)
            .await?
            .map(|order| order.status)
            .ok_or_else(|| OrderError::NotFound(id.to_string()))
    }

    /// All orders of the session, oldest first.
    pub async fn orders(&self) -> Result<Vec<Order>, OrderError> {
        self.list().await
    }
}

#[async_trait]
impl ActorClient<Order> for OrderClient {
    type Error = OrderError;

    fn inner(&self) -> &ResourceClient<Order> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> Self::Error {
        match e.into_entity_error::<OrderError>() {
            Ok(order_error) => order_error,
            Err(FrameworkError::NotFound(id)) => OrderError::NotFound(id),
            Err(other) => OrderError::ActorCommunicationError(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::framework::mock::{create_mock_client, expect_action, expect_create, expect_list};
    use crate::framework::FixedDelay;
    use crate::order_actor::SimulatedKitchen;

    struct BrokenOven;

    #[async_trait]
    impl Kitchen for BrokenOven {
        async fn prepare(&self, _id: OrderId) -> Result<(), OrderError> {
            Err(OrderError::PreparationFailed("oven down".into()))
        }
    }

    fn scheduler() -> Scheduler {
        Scheduler::new(FixedDelay(Duration::from_millis(2500)))
    }

    #[tokio::test(start_paused = true)]
    async fn test_submit_returns_before_completion() {
        let (client, mut receiver) = create_mock_client::<Order>(10);
        let order_client = OrderClient::new(client, scheduler(), Arc::new(SimulatedKitchen));

        let submit = tokio::spawn(async move { order_client.submit_order().await });

        let (_params, responder) = expect_create(&mut receiver)
            .await
            .expect("Expected Create request");
        responder.send(Ok(OrderId(1))).unwrap();

        // The ticket comes back while the completion is still pending
        let ticket = submit.await.unwrap().unwrap();
        assert_eq!(ticket.id(), OrderId(1));
        assert_eq!(ticket.delay(), Duration::from_millis(2500));

        let (id, action, responder) = expect_action(&mut receiver)
            .await
            .expect("Expected Action request");
        assert_eq!(id, OrderId(1));
        assert_eq!(action, OrderAction::Complete);
        responder.send(Ok(OrderStatus::Completed)).unwrap();

        assert_eq!(ticket.wait().await.unwrap(), OrderStatus::Completed);
    }

    #[tokio::test]
    async fn test_failed_preparation_marks_order_error() {
        let (client, mut receiver) = create_mock_client::<Order>(10);
        let order_client = OrderClient::new(client, scheduler(), Arc::new(BrokenOven));

        let complete = tokio::spawn(async move { order_client.complete_order(OrderId(3)).await });

        let (id, action, responder) = expect_action(&mut receiver)
            .await
            .expect("Expected Action request");
        assert_eq!(id, OrderId(3));
        assert_eq!(
            action,
            OrderAction::Fail("Order preparation failed: oven down".into())
        );
        responder
            .send(Ok(OrderStatus::Error("Order preparation failed: oven down".into())))
            .unwrap();

        let status = complete.await.unwrap().unwrap();
        assert_eq!(status.css_class(), "status-error");
    }

    #[test]
    fn test_map_error_recovers_order_error() {
        let wrapped = FrameworkError::EntityError(Box::new(OrderError::AlreadySettled {
            id: OrderId(1),
            status: OrderStatus::Completed,
        }));
        assert!(matches!(
            OrderClient::map_error(wrapped),
            OrderError::AlreadySettled { .. }
        ));
        assert_eq!(
            OrderClient::map_error(FrameworkError::NotFound("order_9".into())),
            OrderError::NotFound("order_9".into())
        );
        assert!(matches!(
            OrderClient::map_error(FrameworkError::ActorClosed),
            OrderError::ActorCommunicationError(_)
        ));
    }

    #[tokio::test]
    async fn test_orders_lists_every_order() {
        let (client, mut receiver) = create_mock_client::<Order>(10);
        let order_client = OrderClient::new(client, scheduler(), Arc::new(SimulatedKitchen));

        let list_task = tokio::spawn(async move { order_client.orders().await });

        let responder = expect_list(&mut receiver)
            .await
            .expect("Expected List request");
        let mut done = Order::new(OrderId(1));
        done.status = OrderStatus::Completed;
        responder.send(Ok(vec![done, Order::new(OrderId(2))])).unwrap();

        let orders = list_task.await.unwrap().unwrap();
        let statuses: Vec<_> = orders.iter().map(|o| o.status.clone()).collect();
        assert_eq!(statuses, vec![OrderStatus::Completed, OrderStatus::InProcess]);
    }
}
