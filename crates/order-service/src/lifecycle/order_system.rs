use super::config::SystemConfig;
use crate::clients::{CustomerClient, OrderClient, ProductClient};
use crate::workflow::CreateOrderService;
use thiserror::Error;
use tokio::task::JoinError;
use tracing::{error, info};

/// The order workflow wired to the stores it runs against.
pub type OrderService = CreateOrderService<CustomerClient, ProductClient, OrderClient>;

#[derive(Debug, Error)]
#[error("Actor task failed: {0}")]
pub struct ShutdownError(#[from] JoinError);

/// The runtime orchestrator: starts the three stores and the order workflow and shuts
/// them down again.
///
/// # Example
///
/// ```ignore
/// let system = OrderSystem::new();
///
/// let customer = system.customer_client.create_customer(customer_data).await?;
/// let product = system.product_client.create_product(product_data).await?;
/// let order = system.create_order.execute(request).await?;
///
/// // Gracefully shut down when done
/// system.shutdown().await?;
/// ```
pub struct OrderSystem {
    pub customer_client: CustomerClient,
    pub product_client: ProductClient,
    pub order_client: OrderClient,

    /// The order creation workflow, holding its own clones of the clients.
    pub create_order: OrderService,

    /// Task handles for all running actors (used for graceful shutdown)
    handles: Vec<tokio::task::JoinHandle<()>>,
}

impl Default for OrderSystem {
    fn default() -> Self {
        Self::new()
    }
}

impl OrderSystem {
    /// Starts the system with [`SystemConfig::default`].
    pub fn new() -> Self {
        Self::with_config(SystemConfig::default())
    }

    /// Spawns one actor task per store and wires the workflow to their clients.
    ///
    /// Must be called within a Tokio runtime.
    pub fn with_config(config: SystemConfig) -> Self {
        let buffer = config.channel_buffer.max(1);

        // 1. Create actors (no dependencies between stores)
        let (customer_actor, customer_client) = crate::customer_actor::new(buffer);
        let (product_actor, product_client) = crate::product_actor::new(buffer);
        let (order_actor, order_client) = crate::order_actor::new(buffer);

        // 2. Start actors (Context = () for all of them)
        let handles = vec![
            tokio::spawn(customer_actor.run(())),
            tokio::spawn(product_actor.run(())),
            tokio::spawn(order_actor.run(())),
        ];

        // 3. Construction-time injection for the workflow
        let create_order = CreateOrderService::new(
            customer_client.clone(),
            product_client.clone(),
            order_client.clone(),
        );

        info!(channel_buffer = buffer, "Order system started");
        Self {
            customer_client,
            product_client,
            order_client,
            create_order,
            handles,
        }
    }

    /// Gracefully shuts down the entire system.
    ///
    /// Drops every client owned by the system, which closes the channels once no other
    /// clones remain, then waits for each actor task to finish.
    pub async fn shutdown(self) -> Result<(), ShutdownError> {
        info!("Shutting down system...");

        let Self {
            customer_client,
            product_client,
            order_client,
            create_order,
            handles,
        } = self;
        drop(create_order);
        drop(customer_client);
        drop(product_client);
        drop(order_client);

        for handle in handles {
            if let Err(e) = handle.await {
                error!(error = %e, "Actor task failed");
                return Err(e.into());
            }
        }

        info!("System shutdown complete.");
        Ok(())
    }
}
