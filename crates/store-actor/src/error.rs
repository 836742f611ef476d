//! # Store Errors
//!
//! Errors raised by the store engine itself, independent of any entity type.
//! Entity-specific failures travel inside [`FrameworkError::EntityError`] and can be
//! recovered with [`FrameworkError::into_entity_error`].

/// Errors that can occur within the store engine.
#[derive(Debug, thiserror::Error)]
pub enum FrameworkError {
    #[error("Actor closed")]
    ActorClosed,
    #[error("Actor dropped response channel")]
    ActorDropped,
    #[error("Item not found: {0}")]
    NotFound(String),
    /// A uniqueness constraint was violated by the entity with this id.
    #[error("Conflicts with existing item: {0}")]
    Conflict(String),
    /// Every id the store can hand out has been used.
    #[error("Id space exhausted")]
    IdsExhausted,
    #[error("Entity error: {0}")]
    EntityError(Box<dyn std::error::Error + Send + Sync>),
}

impl FrameworkError {
    /// Recovers the typed entity error carried by [`FrameworkError::EntityError`].
    ///
    /// Returns `Err(self)` unchanged when the error is not an entity error or when the
    /// boxed error is of a different type.
    pub fn into_entity_error<E>(self) -> Result<E, Self>
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        match self {
            FrameworkError::EntityError(inner) => inner
                .downcast::<E>()
                .map(|e| *e)
                .map_err(FrameworkError::EntityError),
            other => Err(other),
        }
    }
}
