use order_service::lifecycle::{OrderSystem, SystemConfig};
use order_service::model::{
    Customer, CustomerCreate, CustomerId, Product, ProductCreate, ProductId, ProductQuantity, ProductUpdate,
};
use order_service::product_actor::ProductError;
use order_service::workflow::{CreateOrderError, CreateOrderRequest, ErrorKind};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use store_actor::ActorClient;

async fn customer(system: &OrderSystem, email: &str) -> Customer {
    system
        .customer_client
        .create_customer(CustomerCreate {
            name: "Alice".to_string(),
            email: email.to_string(),
        })
        .await
        .expect("Failed to create customer")
}

async fn product(system: &OrderSystem, name: &str, price: Decimal, quantity: u32) -> Product {
    system
        .product_client
        .create_product(ProductCreate {
            name: name.to_string(),
            price,
            quantity,
        })
        .await
        .expect("Failed to create product")
}

fn request(customer_id: CustomerId, lines: &[(ProductId, u32)]) -> CreateOrderRequest {
    CreateOrderRequest {
        customer_id,
        products: lines
            .iter()
            .map(|&(id, quantity)| ProductQuantity::new(id, quantity))
            .collect(),
    }
}

async fn stock(system: &OrderSystem, id: ProductId) -> u32 {
    system
        .product_client
        .check_stock(id)
        .await
        .expect("Failed to check stock")
}

/// Full end-to-end integration test with all real actors.
#[tokio::test]
async fn test_order_captures_price_and_takes_stock() {
    let system = OrderSystem::new();
    let alice = customer(&system, "alice@example.com").await;
    let widget = product(&system, "Widget", dec!(19.99), 10).await;

    let order = system
        .create_order
        .execute(request(alice.id, &[(widget.id, 3)]))
        .await
        .expect("Failed to create order");

    assert_eq!(order.customer_id, alice.id);
    assert_eq!(order.items.len(), 1);
    let line = &order.items[0];
    assert_eq!(line.product_id, widget.id);
    assert_eq!(line.price, dec!(19.99));
    assert_eq!(line.quantity, 3);
    assert_eq!(line.order_id, order.id);
    assert_eq!(order.total(), dec!(59.97));

    assert_eq!(stock(&system, widget.id).await, 7);

    // The stored order is the one returned
    let stored = system
        .order_client
        .get(order.id)
        .await
        .expect("Failed to get order")
        .expect("Order not found");
    assert_eq!(stored, order);

    system.shutdown().await.expect("Failed to shutdown system");
}

#[tokio::test]
async fn test_insufficient_stock_changes_nothing() {
    let system = OrderSystem::new();
    let alice = customer(&system, "alice@example.com").await;
    let plenty = product(&system, "Plenty", dec!(1.00), 50).await;
    let scarce = product(&system, "Scarce", dec!(2.00), 2).await;

    let result = system
        .create_order
        .execute(request(alice.id, &[(plenty.id, 1), (scarce.id, 5)]))
        .await;

    assert_eq!(
        result.unwrap_err(),
        CreateOrderError::InsufficientStock {
            product_id: scarce.id,
            requested: 5,
            available: 2,
        }
    );
    assert_eq!(stock(&system, plenty.id).await, 50);
    assert_eq!(stock(&system, scarce.id).await, 2);
    assert!(system.order_client.list_orders().await.unwrap().is_empty());

    system.shutdown().await.unwrap();
}

/// The workflow is not idempotent: the same request twice is two orders.
#[tokio::test]
async fn test_identical_requests_create_two_orders() {
    let system = OrderSystem::new();
    let alice = customer(&system, "alice@example.com").await;
    let widget = product(&system, "Widget", dec!(19.99), 10).await;

    let first = system
        .create_order
        .execute(request(alice.id, &[(widget.id, 3)]))
        .await
        .unwrap();
    let second = system
        .create_order
        .execute(request(alice.id, &[(widget.id, 3)]))
        .await
        .unwrap();

    assert_ne!(first.id, second.id);
    assert_ne!(first.items[0].id, second.items[0].id);
    assert_eq!(stock(&system, widget.id).await, 4);
    assert_eq!(system.order_client.list_orders().await.unwrap().len(), 2);

    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_validation_failures_write_nothing() {
    let system = OrderSystem::new();
    let alice = customer(&system, "alice@example.com").await;
    let widget = product(&system, "Widget", dec!(19.99), 10).await;

    let unknown_customer = system
        .create_order
        .execute(request(CustomerId(99), &[(widget.id, 1)]))
        .await;
    assert_eq!(
        unknown_customer.unwrap_err(),
        CreateOrderError::CustomerNotFound(CustomerId(99))
    );

    let nothing_found = system
        .create_order
        .execute(request(alice.id, &[(ProductId(42), 1)]))
        .await;
    assert_eq!(nothing_found.unwrap_err().kind(), ErrorKind::NoProductsFound);

    let partly_found = system
        .create_order
        .execute(request(alice.id, &[(widget.id, 1), (ProductId(42), 1)]))
        .await;
    assert_eq!(
        partly_found.unwrap_err(),
        CreateOrderError::ProductNotFound(ProductId(42))
    );

    let empty = system.create_order.execute(request(alice.id, &[])).await;
    assert_eq!(empty.unwrap_err(), CreateOrderError::NoProductsFound);

    let zero = system
        .create_order
        .execute(request(alice.id, &[(widget.id, 0)]))
        .await;
    assert_eq!(zero.unwrap_err(), CreateOrderError::InvalidQuantity(widget.id));

    assert_eq!(stock(&system, widget.id).await, 10);
    assert!(system.order_client.list_orders().await.unwrap().is_empty());

    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_duplicate_lines_are_merged_before_the_stock_check() {
    let system = OrderSystem::new();
    let alice = customer(&system, "alice@example.com").await;
    let widget = product(&system, "Widget", dec!(3.00), 5).await;

    // 3 + 3 exceeds the stock even though each line alone would fit
    let over = system
        .create_order
        .execute(request(alice.id, &[(widget.id, 3), (widget.id, 3)]))
        .await;
    assert_eq!(over.unwrap_err().kind(), ErrorKind::InsufficientStock);

    let order = system
        .create_order
        .execute(request(alice.id, &[(widget.id, 2), (widget.id, 3)]))
        .await
        .unwrap();
    assert_eq!(order.items.len(), 1);
    assert_eq!(order.items[0].quantity, 5);
    assert_eq!(stock(&system, widget.id).await, 0);

    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_line_price_is_a_snapshot() {
    let system = OrderSystem::new();
    let alice = customer(&system, "alice@example.com").await;
    let widget = product(&system, "Widget", dec!(19.99), 10).await;

    let order = system
        .create_order
        .execute(request(alice.id, &[(widget.id, 1)]))
        .await
        .unwrap();

    let repriced = system
        .product_client
        .update_product(
            widget.id,
            ProductUpdate {
                price: Some(dec!(24.50)),
                quantity: None,
            },
        )
        .await
        .unwrap();
    assert_eq!(repriced.price, dec!(24.50));

    let stored = system.order_client.get(order.id).await.unwrap().unwrap();
    assert_eq!(stored.items[0].price, dec!(19.99));

    let next = system
        .create_order
        .execute(request(alice.id, &[(widget.id, 1)]))
        .await
        .unwrap();
    assert_eq!(next.items[0].price, dec!(24.50));

    system.shutdown().await.unwrap();
}

/// Concurrent orders for the same product interleave, but can never oversell.
#[tokio::test]
async fn test_concurrent_orders_never_oversell() {
    let system = OrderSystem::with_config(SystemConfig { channel_buffer: 8 });
    let bob = customer(&system, "bob@example.com").await;
    let limited = product(&system, "Limited Widget", dec!(10.00), 20).await;

    let mut handles = vec![];
    for _ in 0..15 {
        let service = system.create_order.clone();
        let req = request(bob.id, &[(limited.id, 3)]);
        handles.push(tokio::spawn(async move { service.execute(req).await }));
    }

    let mut successful = 0;
    for handle in handles {
        match handle.await.unwrap() {
            Ok(_) => successful += 1,
            Err(e) => assert_eq!(e.kind(), ErrorKind::InsufficientStock),
        }
    }

    // 20 stock / 3 per order
    assert_eq!(successful, 6);
    assert_eq!(stock(&system, limited.id).await, 2);
    // Orders that lost the race were removed again
    assert_eq!(system.order_client.list_orders().await.unwrap().len(), 6);

    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_catalog_uniqueness_and_lookup_by_name() {
    let system = OrderSystem::new();
    customer(&system, "alice@example.com").await;
    let widget = product(&system, "Widget", dec!(19.99), 10).await;

    let duplicate = system
        .product_client
        .create_product(ProductCreate {
            name: "Widget".to_string(),
            price: dec!(1.00),
            quantity: 1,
        })
        .await;
    assert_eq!(duplicate.unwrap_err(), ProductError::AlreadyExists("Widget".into()));

    let same_email = system
        .customer_client
        .create_customer(CustomerCreate {
            name: "Another Alice".to_string(),
            email: "Alice@Example.com".to_string(),
        })
        .await;
    assert!(same_email.is_err());

    let found = system.product_client.find_by_name("Widget").await.unwrap();
    assert_eq!(found.map(|p| p.id), Some(widget.id));
    let padded = system.product_client.find_by_name("  Widget ").await.unwrap();
    assert_eq!(padded.map(|p| p.id), Some(widget.id));
    assert!(system.product_client.find_by_name("Gizmo").await.unwrap().is_none());

    system.shutdown().await.unwrap();
}
