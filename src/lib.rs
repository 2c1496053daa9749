//! # Cafeteria
//!
//! Core of a cafeteria ordering widget: an order queue whose orders settle after a
//! simulated preparation delay, a static menu, and a shopping cart with checkout.
//!
//! Each mutable collection lives in its own actor. The actors share nothing; they
//! publish state changes on an [`EventBus`](events::EventBus) that the display layer
//! subscribes to.
//!
//! ## Architecture Notes
//!
//! ### 1. Type-Safe Error Handling
//! Each actor defines its own error type ([`OrderError`](order_actor::OrderError),
//! [`CartError`](cart_actor::CartError)). The generic actor boxes it and the domain
//! client downcasts it back, so callers can match on `CartError::EmptyCart` directly.
//!
//! ### 2. Async Context Injection
//! Dependencies are injected at runtime via `run()`, not at construction time. Both
//! actors receive the event bus this way.
//!
//! ### 3. Concurrency Model
//! Each `ResourceActor` runs in its own Tokio task and processes messages one at a
//! time, so entity state needs no locks. Order completions run as independent
//! scheduled tasks and may settle in any order.
//!
//! ### 4. Observability
//! `tracing` everywhere with structured fields. See [`lifecycle::tracing`].
//!
//! ## Module Tour
//!
//! - [`framework`]: the generic `ResourceActor<T>`, its client, the mock client and
//!   the delayed-job [`Scheduler`](framework::Scheduler).
//! - [`model`]: plain data: [`Order`](model::Order), [`Menu`](model::Menu),
//!   [`Cart`](model::Cart).
//! - [`order_actor`], [`cart_actor`]: the `ActorEntity` implementations.
//! - [`clients`]: [`OrderClient`](clients::OrderClient) and
//!   [`CartClient`](clients::CartClient), the API the UI buttons map to.
//! - [`events`], [`presentation`]: change notifications and their text rendering.
//! - [`lifecycle`]: configuration, startup and shutdown of the whole system.
//!
//! ```bash
//! RUST_LOG=info cargo run
//! cargo test
//! ```

pub mod cart_actor;
pub mod clients;
pub mod events;
pub mod framework;
pub mod lifecycle;
pub mod model;
pub mod order_actor;
pub mod presentation;
