//! [`ActorEntity`] implementation for [`Order`].
//!
//! An order and all of its line items are built from one [`NewOrder`] inside a single
//! store request, so they are stored together or not at all. Orders carry no actions;
//! the only update is touching `updated_at`.

use super::error::OrderError;
use crate::model::{NewOrder, Order, OrderId, OrderLineItem};
use async_trait::async_trait;
use chrono::Utc;
use store_actor::ActorEntity;
use uuid::Uuid;

#[async_trait]
impl ActorEntity for Order {
    type Id = OrderId;
    type Create = NewOrder;
    type Update = ();
    type Action = ();
    type ActionResult = ();
    type Context = ();
    type Error = OrderError;

    fn id(&self) -> &OrderId {
        &self.id
    }

    fn from_create_params(id: OrderId, params: NewOrder) -> Result<Self, Self::Error> {
        if params.items.is_empty() {
            return Err(OrderError::Validation("an order needs at least one line item".into()));
        }
        if let Some(item) = params.items.iter().find(|item| item.quantity == 0) {
            return Err(OrderError::Validation(format!(
                "line item for {} has quantity 0",
                item.product_id
            )));
        }

        let now = Utc::now();
        let items = params
            .items
            .into_iter()
            .map(|item| OrderLineItem {
                id: Uuid::now_v7(),
                order_id: id,
                product_id: item.product_id,
                price: item.price,
                quantity: item.quantity,
            })
            .collect();

        Ok(Self {
            id,
            customer_id: params.customer_id,
            created_at: now,
            updated_at: now,
            items,
        })
    }

    async fn on_update(&mut self, _update: (), _ctx: &()) -> Result<(), Self::Error> {
        self.updated_at = Utc::now();
        Ok(())
    }

    async fn handle_action(&mut self, _action: (), _ctx: &()) -> Result<(), Self::Error> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{CustomerId, NewLineItem, ProductId};
    use rust_decimal_macros::dec;

    fn new_order(items: Vec<NewLineItem>) -> NewOrder {
        NewOrder {
            customer_id: CustomerId(1),
            items,
        }
    }

    #[test]
    fn line_items_belong_to_the_order() {
        let order = Order::from_create_params(
            OrderId(4),
            new_order(vec![
                NewLineItem {
                    product_id: ProductId(1),
                    price: dec!(19.99),
                    quantity: 3,
                },
                NewLineItem {
                    product_id: ProductId(2),
                    price: dec!(5.00),
                    quantity: 1,
                },
            ]),
        )
        .unwrap();

        assert_eq!(order.created_at, order.updated_at);
        assert!(order.items.iter().all(|item| item.order_id == OrderId(4)));
        assert_ne!(order.items[0].id, order.items[1].id);
        assert_eq!(order.items[0].price, dec!(19.99));
    }

    #[test]
    fn empty_or_zero_quantity_orders_are_rejected() {
        let empty = Order::from_create_params(OrderId(1), new_order(vec![]));
        assert!(matches!(empty, Err(OrderError::Validation(_))));

        let zero = Order::from_create_params(
            OrderId(1),
            new_order(vec![NewLineItem {
                product_id: ProductId(1),
                price: dec!(1.00),
                quantity: 0,
            }]),
        );
        assert!(matches!(zero, Err(OrderError::Validation(_))));
    }
}
