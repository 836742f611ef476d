//! # Order Client
//!
//! Provides a high‑level API for interacting with the `Order` actor.
//! Orchestration (customer checks, stock) lives in
//! [`CreateOrderService`](crate::workflow::CreateOrderService), not here.
use crate::model::{NewOrder, Order, OrderId};
use crate::order_actor::OrderError;
use crate::store::OrderStore;
use async_trait::async_trait;
use store_actor::{ActorClient, FrameworkError, ResourceClient};
use tracing::{debug, info, instrument};

/// Client for interacting with the Order actor.
#[derive(Clone)]
pub struct OrderClient {
    inner: ResourceClient<Order>,
}

impl OrderClient {
    pub fn new(inner: ResourceClient<Order>) -> Self {
        Self { inner }
    }

    /// Every stored order, by id.
    #[instrument(skip(self))]
    pub async fn list_orders(&self) -> Result<Vec<Order>, OrderError> {
        debug!("Sending request");
        self.inner.list().await.map_err(Self::map_error)
    }
}

#[async_trait]
impl ActorClient<Order> for OrderClient {
    type Error = OrderError;

    fn inner(&self) -> &ResourceClient<Order> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> Self::Error {
        e.into_entity_error::<OrderError>()
            .unwrap_or_else(|other| OrderError::ActorCommunicationError(other.to_string()))
    }
}

#[async_trait]
impl OrderStore for OrderClient {
    #[instrument(skip(self, order), fields(customer_id = %order.customer_id, line_items = order.items.len()))]
    async fn create(&self, order: NewOrder) -> Result<Order, OrderError> {
        debug!(?order, "create called");
        info!("Sending create to order store");
        self.inner.create(order).await.map_err(Self::map_error)
    }

    #[instrument(skip(self))]
    async fn remove(&self, id: OrderId) -> Result<(), OrderError> {
        self.inner.delete(id).await.map_err(|e| match e {
            FrameworkError::NotFound(_) => OrderError::NotFound(id),
            other => Self::map_error(other),
        })
    }
}
