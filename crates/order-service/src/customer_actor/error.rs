//! Error types for the Customer actor.

use crate::model::CustomerId;
use thiserror::Error;

/// Errors that can occur during customer operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum CustomerError {
    /// The requested customer was not found.
    #[error("Customer not found: {0}")]
    NotFound(CustomerId),

    /// Another customer is already registered with this email.
    #[error("Customer already exists: {0}")]
    AlreadyExists(String),

    /// The customer data provided is invalid.
    #[error("Customer validation error: {0}")]
    Validation(String),

    /// An error occurred while communicating with the actor system.
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}
