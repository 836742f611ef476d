//! # Store Actor
//!
//! Generic, in-memory resource stores built on the **Actor Model**. Every entity type
//! (Customer, Product, Order, …) gets one [`ResourceActor`] that owns its state and
//! processes requests one at a time, and any number of cheap [`ResourceClient`] handles
//! that talk to it over a channel.
//!
//! ## Why actors for a store?
//!
//! - Isolated state (no shared memory, no locks)
//! - Message-passing concurrency
//! - Sequential processing: every request is atomic with respect to every other request
//!   on the same store, which makes conditional updates such as
//!   [`ResourceClient::perform_batch`] safe under concurrent callers
//!
//! **Further Reading**:
//! - [Actor Model (Wikipedia)](https://en.wikipedia.org/wiki/Actor_model)
//! - [Actors in Rust](https://ryhl.io/blog/actors-with-tokio/) - Practical guide to implementing actors with Tokio
//!
//! ## Architecture Overview
//!
//! 1. **Entity Layer** ([`ActorEntity`]) - domain models, validation, uniqueness and actions
//! 2. **Runtime Layer** ([`ResourceActor`]) - message processing and storage
//! 3. **Interface Layer** ([`ResourceClient`], [`ActorClient`]) - type-safe communication
//!
//! ## Example
//!
//! ```rust
//! use store_actor::{ActorEntity, FrameworkError, ResourceActor};
//! use async_trait::async_trait;
//!
//! #[derive(Clone, Debug)]
//! struct Item { id: u32, name: String, stock: u32 }
//!
//! #[derive(Debug)] struct ItemCreate { name: String, stock: u32 }
//! #[derive(Debug)] struct ItemUpdate { name: Option<String> }
//! #[derive(Debug)] enum ItemAction { Take(u32) }
//!
//! #[derive(Debug, thiserror::Error)]
//! #[error("only {available} left")]
//! struct ItemError { available: u32 }
//!
//! #[async_trait]
//! impl ActorEntity for Item {
//!     type Id = u32;
//!     type Create = ItemCreate;
//!     type Update = ItemUpdate;
//!     type Action = ItemAction;
//!     type ActionResult = u32;
//!     type Context = ();
//!     type Error = ItemError;
//!
//!     fn id(&self) -> &u32 { &self.id }
//!
//!     fn from_create_params(id: u32, params: ItemCreate) -> Result<Self, Self::Error> {
//!         Ok(Self { id, name: params.name, stock: params.stock })
//!     }
//!
//!     fn conflicts_with(&self, other: &Self) -> bool { self.name == other.name }
//!
//!     async fn on_update(&mut self, update: ItemUpdate, _ctx: &()) -> Result<(), Self::Error> {
//!         if let Some(name) = update.name { self.name = name; }
//!         Ok(())
//!     }
//!
//!     async fn handle_action(&mut self, action: ItemAction, _ctx: &()) -> Result<u32, Self::Error> {
//!         let ItemAction::Take(n) = action;
//!         if n > self.stock {
//!             return Err(ItemError { available: self.stock });
//!         }
//!         self.stock -= n;
//!         Ok(self.stock)
//!     }
//! }
//!
//! #[tokio::main]
//! async fn main() {
//!     let (actor, client) = ResourceActor::<Item>::new(10);
//!     tokio::spawn(actor.run(()));
//!
//!     let bolt = client.create(ItemCreate { name: "bolt".into(), stock: 5 }).await.unwrap();
//!     let nut = client.create(ItemCreate { name: "nut".into(), stock: 1 }).await.unwrap();
//!
//!     // Names are unique
//!     let dup = client.create(ItemCreate { name: "bolt".into(), stock: 1 }).await;
//!     assert!(matches!(dup, Err(FrameworkError::Conflict(_))));
//!
//!     // All-or-nothing: the second action fails, so the first is not applied either
//!     let batch = client.perform_batch(vec![(bolt.id, ItemAction::Take(2)), (nut.id, ItemAction::Take(3))]).await;
//!     assert!(batch.is_err());
//!     assert_eq!(client.get(bolt.id).await.unwrap().unwrap().stock, 5);
//! }
//! ```
//!
//! ## Context Injection
//!
//! Dependencies are injected when the actor starts (`actor.run(context)`), not when it
//! is constructed, so stores can be created first and wired afterwards.
//!
//! ## Testing
//!
//! [`mock::MockClient`] hands out a real [`ResourceClient`] answered from scripted
//! expectations, for testing domain clients and workflows without spawning actors.

pub mod actor;
pub mod client;
pub mod client_trait;
pub mod entity;
pub mod error;
pub mod message;
pub mod mock;
pub mod tracing;

// Re-export core types for convenience
pub use actor::ResourceActor;
pub use client::ResourceClient;
pub use client_trait::ActorClient;
pub use entity::ActorEntity;
pub use error::FrameworkError;
pub use message::{BatchResult, Predicate, ResourceRequest, Response};
