//! # Product Actor
//!
//! The product catalog and its inventory, with custom actions for stock management.
//!
//! ## Structure
//!
//! - [`entity`] - [`ActorEntity`](store_actor::ActorEntity) implementation for [`Product`]
//! - [`error`] - [`ProductError`] type for type-safe error handling
//! - [`actions`] - [`ProductAction`] and [`ProductActionResult`] for stock management
//! - [`new()`] - Factory function that creates the actor and client
//!
//! ## Custom Actions
//!
//! ```rust,ignore
//! // Check current stock level (read-only)
//! let stock = product_client.check_stock(product_id).await?;
//!
//! // Decrement several products at once; fails as a whole if any would go negative
//! product_client.update_quantity(vec![ProductQuantity::new(product_id, 3)]).await?;
//! ```
//!
//! ## Usage
//!
//! ```rust
//! use order_service::model::{ProductCreate, ProductQuantity};
//! use order_service::product_actor;
//! use order_service::store::ProductStore;
//! use rust_decimal_macros::dec;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let (actor, client) = product_actor::new(32);
//!     tokio::spawn(actor.run(()));
//!
//!     let widget = client
//!         .create_product(ProductCreate {
//!             name: "Widget".to_string(),
//!             price: dec!(29.99),
//!             quantity: 100,
//!         })
//!         .await?;
//!
//!     client
//!         .update_quantity(vec![ProductQuantity::new(widget.id, 5)])
//!         .await?;
//!     assert_eq!(client.check_stock(widget.id).await?, 95);
//!     Ok(())
//! }
//! ```

pub mod actions;
pub mod entity;
pub mod error;

pub use actions::*;
pub use error::*;

use crate::clients::ProductClient;
use crate::model::Product;
use store_actor::ResourceActor;

/// Creates a new Product actor and its client.
pub fn new(buffer_size: usize) -> (ResourceActor<Product>, ProductClient) {
    let (actor, generic_client) = ResourceActor::new(buffer_size);
    (actor, ProductClient::new(generic_client))
}
