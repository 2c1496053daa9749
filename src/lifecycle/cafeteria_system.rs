use crate::cart_actor::CartError;
use crate::clients::{CartClient, OrderClient};
use crate::events::{CafeteriaEvent, EventBus};
use crate::framework::Scheduler;
use crate::lifecycle::config::{CafeteriaConfig, ConfigError};
use crate::model::Menu;
use crate::order_actor::{Kitchen, OrderError, SimulatedKitchen};
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::broadcast;
use tokio::task::JoinHandle;
use tracing::{error, info};

#[derive(Debug, Error)]
pub enum SystemError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Cart(#[from] CartError),

    #[error(transparent)]
    Order(#[from] OrderError),

    #[error("Actor task failed: {0}")]
    ActorFailed(String),
}

/// Starts the cafeteria's actors and wires them together.
///
/// Two actors run, each in its own Tokio task:
/// - **Order actor**: the order queue. Its completions are scheduled by [`OrderClient`].
/// - **Cart actor**: the customer's cart, opened once at startup.
///
/// Both publish on the same [`EventBus`], injected as their context.
///
/// # Example
///
/// ```ignore
/// let system = CafeteriaSystem::start(CafeteriaConfig::load()?).await?;
/// let mut events = system.subscribe();
///
/// let ticket = system.order_client.submit_order().await?;
/// system.cart_client.add_from_menu("hot-drinks", &"latte".into()).await?;
///
/// system.shutdown().await?;
/// ```
pub struct CafeteriaSystem {
    pub order_client: OrderClient,
    pub cart_client: CartClient,
    pub menu: Arc<Menu>,
    events: EventBus,
    handles: Vec<JoinHandle<()>>,
}

impl CafeteriaSystem {
    /// Starts with the configured random delay and the always-succeeding kitchen.
    pub async fn start(config: CafeteriaConfig) -> Result<Self, SystemError> {
        let scheduler = Scheduler::new(config.delay_policy());
        Self::start_with(config, scheduler, Arc::new(SimulatedKitchen)).await
    }

    /// Starts with an explicit scheduler and kitchen. Tests pass a `FixedDelay`.
    ///
    /// The config is validated before any actor is spawned.
    pub async fn start_with(
        config: CafeteriaConfig,
        scheduler: Scheduler,
        kitchen: Arc<dyn Kitchen>,
    ) -> Result<Self, SystemError> {
        config.validate()?;
        let events = EventBus::new(config.event_capacity);
        let menu = Arc::new(Menu::cafeteria());

        let (order_actor, order_resource) = crate::order_actor::new(config.actor_buffer);
        let (cart_actor, cart_resource) = crate::cart_actor::new(config.actor_buffer);

        let order_handle = tokio::spawn(order_actor.run(events.clone()));
        let cart_handle = tokio::spawn(cart_actor.run(events.clone()));

        let order_client = OrderClient::new(order_resource, scheduler, kitchen);
        let cart_client = CartClient::open(cart_resource, menu.clone()).await?;

        info!(cart_id = %cart_client.cart_id(), "Cafeteria open");
        Ok(Self {
            order_client,
            cart_client,
            menu,
            events,
            handles: vec![order_handle, cart_handle],
        })
    }

    /// A new receiver for state-change events, starting from now.
    pub fn subscribe(&self) -> broadcast::Receiver<CafeteriaEvent> {
        self.events.subscribe()
    }

    /// Drops the system's clients and waits for both actors to stop.
    ///
    /// Pending order completions hold their own client, so the order actor stays up
    /// until the last of them has settled. Clones of the clients held elsewhere keep
    /// their actor running too.
    pub async fn shutdown(self) -> Result<(), SystemError> {
        info!("Shutting down cafeteria...");

        drop(self.order_client);
        drop(self.cart_client);

        for handle in self.handles {
            if let Err(e) = handle.await {
                error!(error = ?e, "Actor task failed");
                return Err(SystemError::ActorFailed(e.to_string()));
            }
        }

        info!("Cafeteria closed.");
        Ok(())
    }
}
