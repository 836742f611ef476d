//! # Store Interfaces
//!
//! The operations the order workflow needs from each store, as traits. The clients in
//! [`crate::clients`] implement them over the actor stores; tests can substitute their
//! own implementations or mock-backed clients.

use crate::customer_actor::CustomerError;
use crate::model::{Customer, CustomerId, NewOrder, Order, OrderId, Product, ProductId, ProductQuantity};
use crate::order_actor::OrderError;
use crate::product_actor::ProductError;
use async_trait::async_trait;

#[async_trait]
pub trait CustomerStore: Send + Sync {
    async fn find_by_id(&self, id: CustomerId) -> Result<Option<Customer>, CustomerError>;
}

#[async_trait]
pub trait ProductStore: Send + Sync {
    /// Batched lookup. Only matches are returned; unknown ids are dropped.
    async fn find_all_by_id(&self, ids: Vec<ProductId>) -> Result<Vec<Product>, ProductError>;

    /// Subtracts each quantity from its product's stock in one all-or-nothing update.
    ///
    /// Quantities for the same id are summed. If any product would go below zero
    /// nothing changes and [`ProductError::InsufficientStock`] is returned. Unknown ids
    /// are dropped. Returns the updated products.
    async fn update_quantity(&self, updates: Vec<ProductQuantity>) -> Result<Vec<Product>, ProductError>;

    /// Adds each quantity back to its product's stock. Inverse of
    /// [`update_quantity`](ProductStore::update_quantity).
    async fn restore_quantity(&self, updates: Vec<ProductQuantity>) -> Result<Vec<Product>, ProductError>;
}

#[async_trait]
pub trait OrderStore: Send + Sync {
    /// Persists the order together with its line items.
    async fn create(&self, order: NewOrder) -> Result<Order, OrderError>;

    async fn remove(&self, id: OrderId) -> Result<(), OrderError>;
}
