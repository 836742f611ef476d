/// Represents a customer order and the line items it owns.
///
/// # Store
/// Implements [`ActorEntity`](store_actor::ActorEntity) in
/// [`order_actor`](crate::order_actor). An order is created together with all of its
/// line items in a single store request ([`NewOrder`]).
use crate::model::{CustomerId, ProductId};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use uuid::Uuid;

/// Type-safe identifier for Orders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderId(pub u32);

impl From<u32> for OrderId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl Display for OrderId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "order_{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: OrderId,
    pub customer_id: CustomerId,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub items: Vec<OrderLineItem>,
}

impl Order {
    /// Sum of all line totals.
    pub fn total(&self) -> Decimal {
        self.items.iter().map(OrderLineItem::total).sum()
    }

    pub fn item_for(&self, product_id: ProductId) -> Option<&OrderLineItem> {
        self.items.iter().find(|item| item.product_id == product_id)
    }
}

/// One product line of an order.
///
/// `price` is the unit price captured when the order was placed. It does not follow
/// later catalog changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderLineItem {
    pub id: Uuid,
    pub order_id: OrderId,
    pub product_id: ProductId,
    pub price: Decimal,
    pub quantity: u32,
}

impl OrderLineItem {
    pub fn total(&self) -> Decimal {
        self.price * Decimal::from(self.quantity)
    }
}

/// Payload for creating a new order with its line items.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewOrder {
    pub customer_id: CustomerId,
    pub items: Vec<NewLineItem>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewLineItem {
    pub product_id: ProductId,
    pub price: Decimal,
    pub quantity: u32,
}
