//! # Domain Clients
//!
//! Typed wrappers around each store's `ResourceClient`. They implement
//! [`ActorClient`](store_actor::ActorClient) for the shared CRUD calls, the store traits
//! from [`crate::store`] for the workflow, and domain-specific methods on top.

pub mod customer_client;
pub mod order_client;
pub mod product_client;

pub use customer_client::CustomerClient;
pub use order_client::OrderClient;
pub use product_client::ProductClient;
