//! Custom actions for the Product actor.
//!
//! Stock operations beyond CRUD, handled by
//! [`ActorEntity::handle_action`](store_actor::ActorEntity::handle_action). Sent through
//! [`ResourceClient::perform_batch`](store_actor::ResourceClient::perform_batch) they
//! form one conditional update across several products.

/// Custom actions for Product entities.
#[derive(Debug, Clone, PartialEq)]
pub enum ProductAction {
    /// Reads the current stock level without modifying it.
    CheckStock,
    /// Takes the given amount out of stock.
    ///
    /// # Errors
    /// Fails with [`ProductError::InsufficientStock`](super::ProductError::InsufficientStock)
    /// and leaves the product untouched if the amount exceeds the stock on hand.
    ReserveStock(u32),
    /// Puts the given amount back into stock.
    Restock(u32),
}

/// Results from ProductActions - variants match 1:1 with ProductAction.
/// Every variant carries the stock level after the action.
#[derive(Debug, Clone, PartialEq)]
pub enum ProductActionResult {
    CheckStock(u32),
    ReserveStock(u32),
    Restock(u32),
}
