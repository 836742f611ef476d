//! # Observability & Tracing
//!
//! [`setup_tracing`] initializes structured logging for every store and the services
//! built on top of them.
//!
//! ## Configuration
//!
//! - **Log levels** via the `RUST_LOG` environment variable, `info` when unset or invalid
//! - **Compact format** with inline spans (e.g. `create_order:execute`)
//! - **No targets** (`with_target(false)`): store logs carry an `entity_type` field instead
//!
//! ```bash
//! RUST_LOG=info cargo run      # Compact logs
//! RUST_LOG=debug cargo run     # Full payloads (Create params, actions, batches)
//! RUST_LOG=store_actor=debug,order_service=info cargo run
//! ```
//!
//! ## What Gets Traced
//!
//! - **Actor Lifecycle**: startup, shutdown and final store size
//! - **Store Operations**: Create, Get, GetMany, Update, Delete, Action, BatchAction
//! - **Errors**: entity ids and failure reasons at `warn`
//!
//! With `RUST_LOG=info` a successful order looks like:
//!
//! ```text
//! INFO Created entity_type="Customer" id=customer_1 size=1
//! INFO Created entity_type="Product" id=product_1 size=1
//! INFO order_processing:execute: Created entity_type="Order" id=order_1 size=1
//! INFO order_processing:execute: Batch committed entity_type="Product" applied=1 touched=1
//! INFO order_processing:execute: Order created order_id=order_1 line_items=1
//! ```

use tracing_subscriber::EnvFilter;

/// Installs the global subscriber. Calling it again (e.g. from several tests) is a no-op.
pub fn setup_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false) // entity_type replaces module paths
        .compact()
        .try_init();
}
