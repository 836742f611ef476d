//! # Order Service Demo
//!
//! Starts the [`OrderSystem`], registers a customer and two products, places an order,
//! then shows that a second order exceeding the remaining stock is rejected without
//! changing anything.
//!
//! ```bash
//! RUST_LOG=debug ORDER_SERVICE_CHANNEL_BUFFER=64 cargo run -p order-service
//! ```

use order_service::lifecycle::{OrderSystem, SystemConfig};
use order_service::model::{CustomerCreate, ProductCreate, ProductQuantity};
use order_service::workflow::CreateOrderRequest;
use rust_decimal_macros::dec;
use store_actor::tracing::setup_tracing;
use tracing::{error, info, Instrument};

#[tokio::main]
async fn main() -> Result<(), String> {
    // Setup tracing once for the entire application
    setup_tracing();

    let config = SystemConfig::from_env();
    info!(?config, "Starting order system");
    let system = OrderSystem::with_config(config);

    let span = tracing::info_span!("catalog_setup");
    let (customer, widget, gadget) = async {
        info!("Creating customer and products");
        let customer = system
            .customer_client
            .create_customer(CustomerCreate {
                name: "Alice".to_string(),
                email: "alice@example.com".to_string(),
            })
            .await
            .map_err(|e| e.to_string())?;
        let widget = system
            .product_client
            .create_product(ProductCreate {
                name: "Widget".to_string(),
                price: dec!(19.99),
                quantity: 10,
            })
            .await
            .map_err(|e| e.to_string())?;
        let gadget = system
            .product_client
            .create_product(ProductCreate {
                name: "Gadget".to_string(),
                price: dec!(5.25),
                quantity: 2,
            })
            .await
            .map_err(|e| e.to_string())?;
        Ok::<_, String>((customer, widget, gadget))
    }
    .instrument(span)
    .await?;

    info!(customer_id = %customer.id, widget = %widget.id, gadget = %gadget.id, "Catalog ready");

    // This order flows through all three stores
    let span = tracing::info_span!("order_processing");
    let order = async {
        info!("Placing order");
        system
            .create_order
            .execute(CreateOrderRequest {
                customer_id: customer.id,
                products: vec![
                    ProductQuantity::new(widget.id, 3),
                    ProductQuantity::new(gadget.id, 1),
                ],
            })
            .await
            .map_err(|e| e.to_string())
    }
    .instrument(span)
    .await?;

    info!(order_id = %order.id, total = %order.total(), "Order processed successfully");

    // Only one Gadget is left, so this one must fail and leave the stock alone
    let span = tracing::info_span!("order_processing");
    let rejected = async {
        system
            .create_order
            .execute(CreateOrderRequest {
                customer_id: customer.id,
                products: vec![
                    ProductQuantity::new(widget.id, 1),
                    ProductQuantity::new(gadget.id, 5),
                ],
            })
            .await
    }
    .instrument(span)
    .await;

    match rejected {
        Ok(order) => error!(order_id = %order.id, "Oversized order was accepted"),
        Err(e) => info!(kind = ?e.kind(), error = %e, "Oversized order rejected"),
    }

    let widget_stock = system
        .product_client
        .check_stock(widget.id)
        .await
        .map_err(|e| e.to_string())?;
    let gadget_stock = system
        .product_client
        .check_stock(gadget.id)
        .await
        .map_err(|e| e.to_string())?;
    info!(widget_stock, gadget_stock, "Final stock");

    // Shutdown system gracefully
    system.shutdown().await.map_err(|e| e.to_string())?;

    info!("Application completed successfully");
    Ok(())
}
