//! Error types for the order creation workflow.

use crate::customer_actor::CustomerError;
use crate::model::{CustomerId, ProductId};
use crate::order_actor::OrderError;
use crate::product_actor::ProductError;
use thiserror::Error;

/// Why an order could not be created.
///
/// Validation failures are detected before any write. Store failures are passed through
/// unchanged in the `Customer`, `Product` and `Order` variants.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum CreateOrderError {
    #[error("Customer not found: {0}")]
    CustomerNotFound(CustomerId),

    /// None of the requested products exist (also returned for an empty product list).
    #[error("No products found")]
    NoProductsFound,

    #[error("Product not found: {0}")]
    ProductNotFound(ProductId),

    #[error("Insufficient stock for {product_id}: requested {requested}, available {available}")]
    InsufficientStock {
        product_id: ProductId,
        requested: u32,
        available: u32,
    },

    #[error("Invalid quantity for {0}: must be at least 1")]
    InvalidQuantity(ProductId),

    /// An internal consistency check failed. Indicates a bug, not bad input.
    #[error("Invariant violated: {0}")]
    Invariant(String),

    #[error(transparent)]
    Customer(#[from] CustomerError),

    #[error(transparent)]
    Product(ProductError),

    #[error(transparent)]
    Order(#[from] OrderError),
}

impl From<ProductError> for CreateOrderError {
    fn from(e: ProductError) -> Self {
        match e {
            ProductError::InsufficientStock {
                product_id,
                requested,
                available,
            } => CreateOrderError::InsufficientStock {
                product_id,
                requested,
                available,
            },
            other => CreateOrderError::Product(other),
        }
    }
}

/// The closed set of failure kinds callers branch on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    CustomerNotFound,
    NoProductsFound,
    ProductNotFound,
    InsufficientStock,
    InvalidRequest,
    Internal,
    Store,
}

impl CreateOrderError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            CreateOrderError::CustomerNotFound(_) => ErrorKind::CustomerNotFound,
            CreateOrderError::NoProductsFound => ErrorKind::NoProductsFound,
            CreateOrderError::ProductNotFound(_) => ErrorKind::ProductNotFound,
            CreateOrderError::InsufficientStock { .. } => ErrorKind::InsufficientStock,
            CreateOrderError::InvalidQuantity(_) => ErrorKind::InvalidRequest,
            CreateOrderError::Invariant(_) => ErrorKind::Internal,
            CreateOrderError::Customer(_)
            | CreateOrderError::Product(_)
            | CreateOrderError::Order(_) => ErrorKind::Store,
        }
    }
}
