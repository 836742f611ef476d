//! A product in the catalog.
//!
//! # Store
//! [`Product`] implements the [`ActorEntity`](store_actor::ActorEntity) trait,
//! allowing it to be managed by a [`ResourceActor`](store_actor::ResourceActor).
//!
//! See [`product_actor`](crate::product_actor) for details on:
//! - Creation parameters ([`ProductCreate`])
//! - Update parameters ([`ProductUpdate`])
//! - Stock actions ([`ProductAction`](crate::product_actor::ProductAction))
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt::Display;

/// Type-safe identifier for Products.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(pub u32);

impl From<u32> for ProductId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl Display for ProductId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "product_{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    /// Unit price with two fractional digits.
    pub price: Decimal,
    /// Quantity on hand.
    pub quantity: u32,
}

/// DTOs for Product creation and updates.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductCreate {
    pub name: String,
    pub price: Decimal,
    pub quantity: u32,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProductUpdate {
    pub price: Option<Decimal>,
    pub quantity: Option<u32>,
}

/// A (product, quantity) pair: a requested order line or a stock adjustment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductQuantity {
    pub id: ProductId,
    pub quantity: u32,
}

impl ProductQuantity {
    pub fn new(id: ProductId, quantity: u32) -> Self {
        Self { id, quantity }
    }

    /// Sums the quantities of repeated ids, keeping the order in which each id first
    /// appears.
    pub fn merge(entries: impl IntoIterator<Item = ProductQuantity>) -> Vec<ProductQuantity> {
        let mut merged: Vec<ProductQuantity> = Vec::new();
        let mut index: HashMap<ProductId, usize> = HashMap::new();
        for entry in entries {
            match index.get(&entry.id) {
                Some(&at) => {
                    merged[at].quantity = merged[at].quantity.saturating_add(entry.quantity)
                }
                None => {
                    index.insert(entry.id, merged.len());
                    merged.push(entry);
                }
            }
        }
        merged
    }
}
