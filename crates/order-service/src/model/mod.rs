//! Plain data structures for the stored entities, their ids and their DTOs.

pub mod customer;
pub mod order;
pub mod product;

pub use customer::*;
pub use order::*;
pub use product::*;
