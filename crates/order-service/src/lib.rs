//! # Order Service
//!
//! A small order-management backend on top of [`store_actor`]: products, customers
//! and orders, with stock validation and line-item prices captured at purchase time.
//!
//! - **[model]**: entities, ids and DTOs ([`Customer`](model::Customer),
//!   [`Product`](model::Product), [`Order`](model::Order))
//! - **[customer_actor] / [product_actor] / [order_actor]**: the
//!   [`ActorEntity`](store_actor::ActorEntity) implementations and error types
//! - **[clients]**: typed clients over each store
//! - **[store]**: the store traits the workflow is written against
//! - **[workflow]**: [`CreateOrderService`](workflow::CreateOrderService)
//! - **[lifecycle]**: [`OrderSystem`](lifecycle::OrderSystem) wiring and configuration

pub mod clients;
pub mod customer_actor;
pub mod lifecycle;
pub mod model;
pub mod order_actor;
pub mod product_actor;
pub mod store;
pub mod workflow;
