//! # System Lifecycle
//!
//! Starting, wiring and shutting down the stores.
//!
//! ## The OrderSystem Pattern
//!
//! 1. **Actor Creation** - one [`ResourceActor`](store_actor::ResourceActor) per store,
//!    sized by [`SystemConfig`]
//! 2. **Start** - each actor runs in its own Tokio task
//! 3. **Injection** - the [`CreateOrderService`](crate::workflow::CreateOrderService)
//!    receives clones of the three clients at construction
//! 4. **Graceful Shutdown** - drop all clients, then await the actor tasks
//!
//! The stores do not depend on each other, so the dependency graph is acyclic and
//! closing the channels is enough to stop every actor. Clones handed out to other tasks
//! keep their store alive until they are dropped too.
//!
//! ## Configuration
//!
//! [`SystemConfig::from_env`] reads `ORDER_SERVICE_CHANNEL_BUFFER` (default 32).
//!
//! ## Observability
//!
//! Call [`store_actor::tracing::setup_tracing`] once at startup; see that module for
//! log levels and sample output.

pub mod config;
pub mod order_system;

pub use config::*;
pub use order_system::*;
