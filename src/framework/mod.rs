//! Generic actor framework for the cafeteria's in-memory registries.
//!
//! # Main Components
//!
//! - [`ActorEntity`] - Trait that resource types implement to be managed by actors
//! - [`ResourceActor`] - Generic actor that owns a registry of entities
//! - [`ResourceClient`] - Type-safe handle for sending requests to an actor
//! - [`FrameworkError`] - Common error types
//! - [`scheduler`] - Delayed jobs with cancellation tokens
//!
//! # Testing
//!
//! See [`mock`] module for utilities to test clients without spawning full actors.

pub mod core;
pub mod mock;
pub mod scheduler;

// Re-export core types for convenience
pub use self::core::*;
pub use self::scheduler::{
    CancellationToken, DelayPolicy, FixedDelay, ScheduledTask, Scheduler, UniformDelay,
};
