//! # Order Actor
//!
//! Stores orders together with the line items they own.
//!
//! Unlike a workflow step, the Order actor checks nothing outside its own data: it has no
//! context dependencies. Customer and stock validation happen in
//! [`CreateOrderService`](crate::workflow::CreateOrderService) before the order reaches
//! this store.
//!
//! ## Structure
//!
//! - [`entity`] - [`ActorEntity`](store_actor::ActorEntity) implementation for [`Order`]
//! - [`error`] - [`OrderError`] type for type-safe error handling
//! - [`new()`] - Factory function that creates the actor and client

pub mod entity;
pub mod error;

pub use error::*;

use crate::clients::OrderClient;
use crate::model::Order;
use store_actor::ResourceActor;

/// Creates a new Order actor and its client.
pub fn new(buffer_size: usize) -> (ResourceActor<Order>, OrderClient) {
    let (actor, generic_client) = ResourceActor::new(buffer_size);
    (actor, OrderClient::new(generic_client))
}
