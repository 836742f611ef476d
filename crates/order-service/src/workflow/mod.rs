//! # Order Creation Workflow
//!
//! [`CreateOrderService`] coordinates the three stores to place an order:
//!
//! ```text
//! execute(request)
//!   ├─ CustomerStore::find_by_id         → CustomerNotFound
//!   ├─ ProductStore::find_all_by_id      → NoProductsFound / ProductNotFound / InsufficientStock
//!   ├─ OrderStore::create                (order + line items, price snapshots)
//!   └─ ProductStore::update_quantity     (one conditional batch; on failure the order is removed)
//! ```
//!
//! Every failure before `OrderStore::create` leaves all stores untouched. The stock
//! update is checked and applied inside the product store in one step, so concurrent
//! orders can never drive stock below zero.

pub mod create_order;
pub mod error;

pub use create_order::*;
pub use error::*;
