use super::error::CreateOrderError;
use crate::model::{CustomerId, NewLineItem, NewOrder, Order, Product, ProductId, ProductQuantity};
use crate::store::{CustomerStore, OrderStore, ProductStore};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use tracing::{debug, error, info, instrument, warn};

/// One requested line: a product id and how many units to buy.
pub type RequestedProduct = ProductQuantity;

/// Input of [`CreateOrderService::execute`].
///
/// Deserializes from `{"customer_id": 1, "products": [{"id": 1, "quantity": 3}]}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateOrderRequest {
    pub customer_id: CustomerId,
    pub products: Vec<RequestedProduct>,
}

/// Places orders: validates the customer and the requested products, persists the
/// order with price snapshots, then takes the stock.
///
/// The stores are passed in at construction, so tests can swap any of them.
///
/// Not idempotent: every successful call creates a new order and takes stock again.
#[derive(Clone)]
pub struct CreateOrderService<C, P, O> {
    customers: C,
    products: P,
    orders: O,
}

impl<C, P, O> CreateOrderService<C, P, O>
where
    C: CustomerStore,
    P: ProductStore,
    O: OrderStore,
{
    pub fn new(customers: C, products: P, orders: O) -> Self {
        Self {
            customers,
            products,
            orders,
        }
    }

    /// Creates an order for `request`, or fails without leaving an order or a stock
    /// change behind.
    ///
    /// Requested lines for the same product are merged. Checks run in this order:
    /// quantities, customer, product existence, stock. Stock is taken in one conditional
    /// update after the order is stored. If that update fails (another order took the
    /// stock first) the order is removed again.
    #[instrument(skip(self, request), fields(customer_id = %request.customer_id))]
    pub async fn execute(&self, request: CreateOrderRequest) -> Result<Order, CreateOrderError> {
        debug!(?request, "execute called");
        let CreateOrderRequest {
            customer_id,
            products,
        } = request;
        let requested = validate_quantities(products)?;

        let customer = self
            .customers
            .find_by_id(customer_id)
            .await?
            .ok_or(CreateOrderError::CustomerNotFound(customer_id))?;

        let ids = requested.iter().map(|line| line.id).collect();
        let resolved = self.products.find_all_by_id(ids).await?;
        let items = build_line_items(&requested, &resolved)?;

        let order = self
            .orders
            .create(NewOrder {
                customer_id: customer.id,
                items,
            })
            .await?;
        debug!(order_id = %order.id, "Order stored, taking stock");

        self.take_stock(&order).await?;

        info!(
            order_id = %order.id,
            line_items = order.items.len(),
            total = %order.total(),
            "Order created"
        );
        Ok(order)
    }

    async fn take_stock(&self, order: &Order) -> Result<(), CreateOrderError> {
        let decrements: Vec<ProductQuantity> = order
            .items
            .iter()
            .map(|item| ProductQuantity::new(item.product_id, item.quantity))
            .collect();

        match self.products.update_quantity(decrements.clone()).await {
            Ok(updated) => {
                // The store skips products deleted since the lookup.
                let updated: HashSet<ProductId> = updated.iter().map(|p| p.id).collect();
                let (taken, missing): (Vec<_>, Vec<_>) =
                    decrements.into_iter().partition(|d| updated.contains(&d.id));
                if let Some(gone) = missing.first() {
                    warn!(order_id = %order.id, product_id = %gone.id, "Product vanished during order");
                    self.roll_back(order, taken).await;
                    return Err(CreateOrderError::ProductNotFound(gone.id));
                }
                Ok(())
            }
            Err(e) => {
                warn!(order_id = %order.id, error = %e, "Stock update failed, removing order");
                self.roll_back(order, Vec::new()).await;
                Err(e.into())
            }
        }
    }

    /// Undoes a stored order: puts `restock` back and removes the order. Failures are
    /// logged; the caller still reports the original error.
    async fn roll_back(&self, order: &Order, restock: Vec<ProductQuantity>) {
        if !restock.is_empty() {
            if let Err(e) = self.products.restore_quantity(restock).await {
                error!(order_id = %order.id, error = %e, "Failed to restore stock");
            }
        }
        if let Err(e) = self.orders.remove(order.id).await {
            error!(order_id = %order.id, error = %e, "Failed to remove order");
        }
    }
}

fn validate_quantities(products: Vec<RequestedProduct>) -> Result<Vec<ProductQuantity>, CreateOrderError> {
    if let Some(line) = products.iter().find(|line| line.quantity == 0) {
        return Err(CreateOrderError::InvalidQuantity(line.id));
    }
    Ok(ProductQuantity::merge(products))
}

/// Checks `resolved` against `requested` and snapshots one line item per resolved
/// product. Every check compares against the same stock snapshot.
fn build_line_items(
    requested: &[ProductQuantity],
    resolved: &[Product],
) -> Result<Vec<NewLineItem>, CreateOrderError> {
    if resolved.is_empty() {
        return Err(CreateOrderError::NoProductsFound);
    }

    let by_id: HashMap<ProductId, &Product> = resolved.iter().map(|p| (p.id, p)).collect();
    if let Some(line) = requested.iter().find(|line| !by_id.contains_key(&line.id)) {
        return Err(CreateOrderError::ProductNotFound(line.id));
    }
    for line in requested {
        if let Some(product) = by_id.get(&line.id) {
            if line.quantity > product.quantity {
                return Err(CreateOrderError::InsufficientStock {
                    product_id: line.id,
                    requested: line.quantity,
                    available: product.quantity,
                });
            }
        }
    }

    let quantities: HashMap<ProductId, u32> = requested.iter().map(|line| (line.id, line.quantity)).collect();
    resolved
        .iter()
        .map(|product| {
            let quantity = quantities.get(&product.id).copied().ok_or_else(|| {
                CreateOrderError::Invariant(format!("{} was resolved but never requested", product.id))
            })?;
            Ok(NewLineItem {
                product_id: product.id,
                price: product.price,
                quantity,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn product(id: u32, quantity: u32) -> Product {
        Product {
            id: ProductId(id),
            name: format!("P{id}"),
            price: dec!(19.99),
            quantity,
        }
    }

    fn line(id: u32, quantity: u32) -> ProductQuantity {
        ProductQuantity::new(ProductId(id), quantity)
    }

    #[test]
    fn zero_quantity_is_rejected_before_merging() {
        let result = validate_quantities(vec![line(1, 2), line(2, 0)]);
        assert_eq!(result, Err(CreateOrderError::InvalidQuantity(ProductId(2))));

        let merged = validate_quantities(vec![line(1, 2), line(1, 1)]).unwrap();
        assert_eq!(merged, vec![line(1, 3)]);
    }

    #[test]
    fn line_items_snapshot_price_and_requested_quantity() {
        let items = build_line_items(&[line(1, 3)], &[product(1, 10)]).unwrap();
        assert_eq!(
            items,
            vec![NewLineItem {
                product_id: ProductId(1),
                price: dec!(19.99),
                quantity: 3,
            }]
        );
    }

    #[test]
    fn empty_lookup_means_no_products_found() {
        assert_eq!(build_line_items(&[line(1, 1)], &[]), Err(CreateOrderError::NoProductsFound));
        assert_eq!(build_line_items(&[], &[]), Err(CreateOrderError::NoProductsFound));
    }

    #[test]
    fn missing_product_wins_over_insufficient_stock() {
        // Product 1 is short, product 2 does not exist
        let result = build_line_items(&[line(1, 50), line(2, 1)], &[product(1, 10)]);
        assert_eq!(result, Err(CreateOrderError::ProductNotFound(ProductId(2))));
    }

    #[test]
    fn stock_is_checked_for_every_line() {
        let result = build_line_items(&[line(1, 1), line(2, 5)], &[product(1, 10), product(2, 2)]);
        assert_eq!(
            result,
            Err(CreateOrderError::InsufficientStock {
                product_id: ProductId(2),
                requested: 5,
                available: 2,
            })
        );
    }

    #[test]
    fn unrequested_product_is_an_invariant_violation() {
        let result = build_line_items(&[line(1, 1)], &[product(1, 10), product(9, 10)]);
        assert!(matches!(result, Err(CreateOrderError::Invariant(_))));
    }

    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        /// What the checks must report for `requested` against `catalog`, where the
        /// lookup returned the requested products that exist, in request order.
        fn expected_error(requested: &[ProductQuantity], catalog: &[Product]) -> Option<CreateOrderError> {
            let stock = |id: ProductId| catalog.iter().find(|p| p.id == id).map(|p| p.quantity);
            if requested.iter().all(|line| stock(line.id).is_none()) {
                return Some(CreateOrderError::NoProductsFound);
            }
            if let Some(line) = requested.iter().find(|line| stock(line.id).is_none()) {
                return Some(CreateOrderError::ProductNotFound(line.id));
            }
            requested.iter().find_map(|line| {
                let available = stock(line.id)?;
                (line.quantity > available).then_some(CreateOrderError::InsufficientStock {
                    product_id: line.id,
                    requested: line.quantity,
                    available,
                })
            })
        }

        proptest! {
            #![proptest_config(ProptestConfig {
                cases: 500,
                ..ProptestConfig::default()
            })]

            /// Property: every failure is the first violated check, and a success has one
            /// line per requested product with the requested quantity and catalog price.
            #[test]
            fn line_items_follow_the_check_order(
                stock in prop::collection::vec(0u32..20, 1..6),
                lines in prop::collection::vec((1u32..9, 1u32..30), 0..8)
            ) {
                let catalog: Vec<Product> = stock
                    .iter()
                    .enumerate()
                    .map(|(i, &quantity)| product(i as u32 + 1, quantity))
                    .collect();
                let requested = validate_quantities(
                    lines.iter().map(|&(id, quantity)| line(id, quantity)).collect(),
                )
                .unwrap();
                let resolved: Vec<Product> = requested
                    .iter()
                    .filter_map(|line| catalog.iter().find(|p| p.id == line.id).cloned())
                    .collect();

                let result = build_line_items(&requested, &resolved);
                match expected_error(&requested, &catalog) {
                    Some(expected) => {
                        let err = result.unwrap_err();
                        prop_assert_eq!(err.kind(), expected.kind());
                        prop_assert_eq!(err, expected);
                    }
                    None => {
                        let items = result.unwrap();
                        prop_assert_eq!(items.len(), requested.len());
                        for (item, line) in items.iter().zip(&requested) {
                            prop_assert_eq!(item.product_id, line.id);
                            prop_assert_eq!(item.quantity, line.quantity);
                            prop_assert_eq!(item.price, dec!(19.99));
                        }
                    }
                }
            }

            /// Property: merging never changes the total per product and leaves one line
            /// per distinct id.
            #[test]
            fn merged_quantities_keep_their_totals(
                lines in prop::collection::vec((1u32..5, 1u32..100), 1..12)
            ) {
                let merged = validate_quantities(
                    lines.iter().map(|&(id, quantity)| line(id, quantity)).collect(),
                )
                .unwrap();

                let ids: HashSet<ProductId> = merged.iter().map(|line| line.id).collect();
                prop_assert_eq!(ids.len(), merged.len());
                for merged_line in &merged {
                    let total: u32 = lines
                        .iter()
                        .filter(|&&(id, _)| ProductId(id) == merged_line.id)
                        .map(|&(_, quantity)| quantity)
                        .sum();
                    prop_assert_eq!(merged_line.quantity, total);
                }
            }
        }
    }
}
