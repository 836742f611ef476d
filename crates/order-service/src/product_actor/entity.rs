//! [`ActorEntity`] implementation for [`Product`].
//!
//! Prices are normalized to two fractional digits and must not be negative. Product
//! names are unique and may not be blank. Stock changes go through
//! [`ProductAction`].

use super::actions::{ProductAction, ProductActionResult};
use super::error::ProductError;
use crate::model::{Product, ProductCreate, ProductId, ProductUpdate};
use async_trait::async_trait;
use rust_decimal::Decimal;
use store_actor::ActorEntity;

fn normalize_price(price: Decimal) -> Result<Decimal, ProductError> {
    if price.is_sign_negative() && !price.is_zero() {
        return Err(ProductError::InvalidPrice(price));
    }
    Ok(price.round_dp(2))
}

#[async_trait]
impl ActorEntity for Product {
    type Id = ProductId;
    type Create = ProductCreate;
    type Update = ProductUpdate;
    type Action = ProductAction;
    type ActionResult = ProductActionResult;
    type Context = ();
    type Error = ProductError;

    fn id(&self) -> &ProductId {
        &self.id
    }

    fn from_create_params(id: ProductId, params: ProductCreate) -> Result<Self, Self::Error> {
        let name = params.name.trim().to_string();
        if name.is_empty() {
            return Err(ProductError::InvalidName);
        }
        Ok(Self {
            id,
            name,
            price: normalize_price(params.price)?,
            quantity: params.quantity,
        })
    }

    fn conflicts_with(&self, other: &Self) -> bool {
        self.name == other.name
    }

    /// # Fields Updated
    /// - `price`: catalog price; existing order lines keep the price they captured
    /// - `quantity`: stock on hand, set absolutely
    async fn on_update(&mut self, update: ProductUpdate, _ctx: &()) -> Result<(), Self::Error> {
        if let Some(price) = update.price {
            self.price = normalize_price(price)?;
        }
        if let Some(quantity) = update.quantity {
            self.quantity = quantity;
        }
        Ok(())
    }

    async fn handle_action(
        &mut self,
        action: ProductAction,
        _ctx: &(),
    ) -> Result<ProductActionResult, Self::Error> {
        match action {
            ProductAction::CheckStock => Ok(ProductActionResult::CheckStock(self.quantity)),
            ProductAction::ReserveStock(requested) => {
                let remaining = self.quantity.checked_sub(requested).ok_or(
                    ProductError::InsufficientStock {
                        product_id: self.id,
                        requested,
                        available: self.quantity,
                    },
                )?;
                self.quantity = remaining;
                Ok(ProductActionResult::ReserveStock(remaining))
            }
            ProductAction::Restock(amount) => {
                self.quantity = self
                    .quantity
                    .checked_add(amount)
                    .ok_or(ProductError::StockOverflow(self.id))?;
                Ok(ProductActionResult::Restock(self.quantity))
            }
        }
    }
}
