//! Runtime orchestration and lifecycle management.
//!
//! - [`CafeteriaSystem`] - starts the actors, wires the event bus, shuts everything down
//! - [`CafeteriaConfig`] - delay window and channel sizes, from file and environment
//! - [`setup_tracing`] - initializes the tracing subscriber

pub mod cafeteria_system;
pub mod config;
pub mod tracing;

pub use self::cafeteria_system::*;
pub use self::config::*;
pub use self::tracing::*;
