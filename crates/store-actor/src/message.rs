//! # Generic Messages
//!
//! Request types sent from a [`ResourceClient`](crate::ResourceClient) to its
//! [`ResourceActor`](crate::ResourceActor).

use crate::entity::ActorEntity;
use crate::error::FrameworkError;
use std::fmt;
use tokio::sync::oneshot;

/// Type alias for the one-shot response channel used by actors.
pub type Response<T> = oneshot::Sender<Result<T, FrameworkError>>;

/// A boxed filter evaluated inside the actor against each stored entity.
pub struct Predicate<T>(Box<dyn Fn(&T) -> bool + Send + Sync>);

impl<T> Predicate<T> {
    pub fn new(f: impl Fn(&T) -> bool + Send + Sync + 'static) -> Self {
        Self(Box::new(f))
    }

    pub fn matches(&self, item: &T) -> bool {
        (self.0)(item)
    }
}

impl<T> fmt::Debug for Predicate<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Predicate(..)")
    }
}

/// Outcome of a committed [`ResourceRequest::BatchAction`].
#[derive(Debug)]
pub struct BatchResult<T: ActorEntity> {
    /// One entry per applied action, in request order.
    pub results: Vec<(T::Id, T::ActionResult)>,
    /// The committed state of every touched entity, in first-touched order.
    pub entities: Vec<T>,
}

/// Internal message type sent to the actor to request operations.
///
/// # The CRUD Pattern
/// The variants map to standard CRUD operations plus the queries and actions a
/// resource store needs:
///
/// - **Create**: Uses [`ActorEntity::Create`] to initialize and store a new resource.
/// - **Get / GetMany / FindFirst / List**: Reads. `GetMany` is the batched lookup and
///   only returns matches.
/// - **Update**: State mutation via [`ActorEntity::Update`].
/// - **Delete**: Lifecycle end.
/// - **Action**: Executes a custom [`ActorEntity::Action`] on one resource.
/// - **BatchAction**: Executes several actions as one all-or-nothing unit.
#[derive(Debug)]
pub enum ResourceRequest<T: ActorEntity> {
    Create {
        params: T::Create,
        respond_to: Response<T>,
    },
    Get {
        id: T::Id,
        respond_to: Response<Option<T>>,
    },
    GetMany {
        ids: Vec<T::Id>,
        respond_to: Response<Vec<T>>,
    },
    FindFirst {
        predicate: Predicate<T>,
        respond_to: Response<Option<T>>,
    },
    List {
        respond_to: Response<Vec<T>>,
    },
    Update {
        id: T::Id,
        update: T::Update,
        respond_to: Response<T>,
    },
    Delete {
        id: T::Id,
        respond_to: Response<()>,
    },
    Action {
        id: T::Id,
        action: T::Action,
        respond_to: Response<T::ActionResult>,
    },
    BatchAction {
        actions: Vec<(T::Id, T::Action)>,
        respond_to: Response<BatchResult<T>>,
    },
}
