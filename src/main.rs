//! # Cafeteria
//!
//! Scripted session against the cafeteria core:
//! 1. Starts the [`CafeteriaSystem`] from `cafeteria.toml` / `CAFETERIA_*` settings.
//! 2. Submits three orders and lets them settle in the background.
//! 3. Fills the cart, adjusts quantities and checks out (first empty, then for real).
//!
//! A presenter task renders every event it receives, the way the widget's panels would.

use cafeteria::events::CafeteriaEvent;
use cafeteria::lifecycle::{setup_tracing, CafeteriaConfig, CafeteriaSystem, SystemError};
use cafeteria::presentation::{self, OrderBoard};
use tokio::sync::broadcast::error::RecvError;
use tracing::{info, warn, Instrument};

#[tokio::main]
async fn main() -> Result<(), SystemError> {
    setup_tracing();

    let config = CafeteriaConfig::load()?;
    let system = CafeteriaSystem::start(config).await?;

    let mut events = system.subscribe();
    let presenter = tokio::spawn(
        async move {
            let mut board = OrderBoard::new();
            loop {
                match events.recv().await {
                    Ok(CafeteriaEvent::CartUpdated(cart)) => {
                        info!(
                            checkout_enabled = presentation::checkout_enabled(&cart),
                            "\n{}",
                            presentation::render_cart(&cart)
                        );
                    }
                    Ok(CafeteriaEvent::CheckoutCompleted(receipt)) => {
                        info!(
                            total = %presentation::format_money(receipt.total),
                            lines = receipt.lines.len(),
                            "Checkout"
                        );
                    }
                    Ok(event) => {
                        if let Some(row) = board.apply(&event) {
                            info!("{}", row);
                        }
                    }
                    Err(RecvError::Lagged(skipped)) => warn!(skipped, "Presenter fell behind"),
                    Err(RecvError::Closed) => break,
                }
            }
            board
        }
        .instrument(tracing::info_span!("presenter")),
    );

    info!("\n{}", presentation::render_menu(&system.menu, "hot-drinks"));

    // Orders settle on their own; the tickets are only kept to report the outcome.
    let mut tickets = Vec::new();
    for _ in 0..3 {
        tickets.push(system.order_client.submit_order().await?);
    }

    let cart = &system.cart_client;
    let empty = cart.checkout().await;
    info!("{}", presentation::checkout_message(&empty));

    cart.add_from_menu("hot-drinks", &"latte".into()).await?;
    cart.add_from_menu("hot-drinks", &"latte".into()).await?;
    cart.add_from_menu("desserts", &"cheesecake".into()).await?;
    cart.add_from_menu("ice-cream", &"vanilla-ice-cream".into()).await?;
    cart.decrease(&"vanilla-ice-cream".into()).await?;
    cart.increase(&"cheesecake".into()).await?;
    cart.remove_item(&"cheesecake".into()).await?;

    info!(total = %presentation::format_money(cart.compute_total().await?), "Before checkout");
    let placed = cart.checkout().await;
    info!("{}", presentation::checkout_message(&placed));

    for ticket in tickets {
        let id = ticket.id();
        let status = ticket.wait().await?;
        info!(%id, %status, "Ticket closed");
    }

    info!("\n{}", presentation::render_orders(&system.order_client.orders().await?));

    system.shutdown().await?;

    match presenter.await {
        Ok(board) => info!(orders = board.len(), "Presenter done"),
        Err(e) => warn!(error = %e, "Presenter task failed"),
    }
    Ok(())
}
