//! # Observability & Tracing
//!
//! [`setup_tracing`] installs a compact `tracing-subscriber` formatter filtered by
//! `RUST_LOG`. Module paths are hidden (`with_target(false)`); the generic actor tags
//! its lines with `entity_type` instead.
//!
//! ```bash
//! RUST_LOG=info cargo run                       # lifecycle and settled orders
//! RUST_LOG=debug cargo run                      # plus every request payload
//! RUST_LOG=cafeteria::framework=debug cargo run # only the actor loop
//! ```
//!
//! With `RUST_LOG=info` a submitted order reads:
//!
//! ```text
//! INFO submit_order: Created entity_type="Order" id=order_1 size=1
//! INFO submit_order: Order received id=order_1 delay_ms=3412
//! INFO complete_order{id=OrderId(1)}: Action ok entity_type="Order" id=order_1
//! INFO complete_order{id=OrderId(1)}: Order settled id=order_1 status=Completed
//! ```

/// Initializes the global subscriber. Call once, at the top of `main`.
pub fn setup_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false)
        .compact()
        .init();
}
