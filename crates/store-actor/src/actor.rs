//! # Generic Actor Server
//!
//! This module defines the `ResourceActor`, the component that owns the state of one
//! entity type. It processes messages sequentially, so every request is atomic with
//! respect to every other request on the same store.

use crate::client::ResourceClient;
use crate::entity::ActorEntity;
use crate::error::FrameworkError;
use crate::message::{BatchResult, Predicate, ResourceRequest};
use std::collections::hash_map::Entry;
use std::collections::{HashMap, HashSet};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

/// The generic actor that manages a collection of entities.
///
/// This struct is the "Server" half of the actor. It owns the `store` and the receiver
/// end of the channel, and runs in its own Tokio task. No `Mutex` is needed around the
/// store because only this task touches it.
///
/// # Usage Pattern
///
/// 1.  **Create**: Call `ResourceActor::new()` to get the `actor` (server) and `client` (interface).
/// 2.  **Wire**: Pass dependencies (other clients) into `actor.run(context)`.
/// 3.  **Run**: Spawn the actor's run loop in a background task.
///
/// ```rust
/// use store_actor::{ActorEntity, ResourceActor};
/// use async_trait::async_trait;
///
/// #[derive(Clone, Debug)] struct Counter { id: u32, value: u32 }
/// #[derive(Debug)] struct CounterCreate;
/// #[derive(Debug)] struct CounterUpdate;
/// #[derive(Debug)] enum CounterAction {}
/// #[derive(Debug, thiserror::Error)] #[error("counter error")] struct CounterError;
///
/// #[async_trait]
/// impl ActorEntity for Counter {
///     type Id = u32;
///     type Create = CounterCreate;
///     type Update = CounterUpdate;
///     type Action = CounterAction;
///     type ActionResult = ();
///     type Context = ();
///     type Error = CounterError;
///
///     fn id(&self) -> &u32 { &self.id }
///     fn from_create_params(id: u32, _: CounterCreate) -> Result<Self, Self::Error> {
///         Ok(Self { id, value: 0 })
///     }
///     async fn on_update(&mut self, _: CounterUpdate, _: &()) -> Result<(), Self::Error> { Ok(()) }
///     async fn handle_action(&mut self, _: CounterAction, _: &()) -> Result<(), Self::Error> { Ok(()) }
/// }
///
/// #[tokio::main]
/// async fn main() {
///     let (actor, client) = ResourceActor::<Counter>::new(10);
///     tokio::spawn(actor.run(()));
///
///     let counter = client.create(CounterCreate).await.unwrap();
///     assert_eq!(counter.id, 1);
/// }
/// ```
///
/// # Operations
///
/// * **Create**: next id from the internal counter (advanced only on success), `from_create_params`, `on_create`,
///   uniqueness check via `conflicts_with`, insert. Responds with the stored entity.
/// * **Get / GetMany / FindFirst / List**: clones out of the store. `GetMany` drops
///   unknown and repeated ids and keeps the first-seen order.
/// * **Update**: `on_update` on a copy, same uniqueness check as create, then commit.
/// * **Delete / Action**: run the matching hook on the stored entity.
/// * **BatchAction**: runs every action against working copies and commits them only
///   if all of them succeed. Ids that are not stored are skipped.
pub struct ResourceActor<T: ActorEntity> {
    receiver: mpsc::Receiver<ResourceRequest<T>>,
    store: HashMap<T::Id, T>,
    /// `None` once `u32::MAX` has been handed out.
    next_id: Option<u32>,
}

impl<T: ActorEntity> ResourceActor<T> {
    /// Creates a new `ResourceActor` and its associated `ResourceClient`.
    ///
    /// `buffer_size` is the capacity of the MPSC channel. When it is full, clients
    /// wait until there is space.
    pub fn new(buffer_size: usize) -> (Self, ResourceClient<T>) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let actor = Self {
            receiver,
            store: HashMap::new(),
            next_id: Some(1),
        };
        let client = ResourceClient::new(sender);
        (actor, client)
    }

    /// Runs the actor's event loop, processing messages until the channel closes.
    ///
    /// The `context` argument is injected into every entity hook.
    pub async fn run(mut self, context: T::Context) {
        // Just the type name, e.g. "Product"
        let entity_type = std::any::type_name::<T>()
            .split("::")
            .last()
            .unwrap_or("Unknown");
        info!(entity_type, "Actor started");

        while let Some(msg) = self.receiver.recv().await {
            match msg {
                ResourceRequest::Create { params, respond_to } => {
                    debug!(entity_type, ?params, "Create");
                    let result = self.create(params, &context).await;
                    match &result {
                        Ok(item) => {
                            info!(entity_type, id = %item.id(), size = self.store.len(), "Created")
                        }
                        Err(e) => warn!(entity_type, error = %e, "Create failed"),
                    }
                    let _ = respond_to.send(result);
                }
                ResourceRequest::Get { id, respond_to } => {
                    let item = self.store.get(&id).cloned();
                    let found = item.is_some();
                    debug!(entity_type, %id, found, "Get");
                    let _ = respond_to.send(Ok(item));
                }
                ResourceRequest::GetMany { ids, respond_to } => {
                    let requested = ids.len();
                    let items = self.get_many(ids);
                    debug!(entity_type, requested, found = items.len(), "GetMany");
                    let _ = respond_to.send(Ok(items));
                }
                ResourceRequest::FindFirst {
                    predicate,
                    respond_to,
                } => {
                    let item = self.find_first(&predicate);
                    debug!(entity_type, found = item.is_some(), "FindFirst");
                    let _ = respond_to.send(Ok(item));
                }
                ResourceRequest::List { respond_to } => {
                    let mut items: Vec<T> = self.store.values().cloned().collect();
                    items.sort_by(|a, b| a.id().cmp(b.id()));
                    debug!(entity_type, size = items.len(), "List");
                    let _ = respond_to.send(Ok(items));
                }
                ResourceRequest::Update {
                    id,
                    update,
                    respond_to,
                } => {
                    debug!(entity_type, %id, ?update, "Update");
                    let result = self.update(&id, update, &context).await;
                    match &result {
                        Ok(_) => info!(entity_type, %id, "Updated"),
                        Err(e) => warn!(entity_type, %id, error = %e, "Update failed"),
                    }
                    let _ = respond_to.send(result);
                }
                ResourceRequest::Delete { id, respond_to } => {
                    debug!(entity_type, %id, "Delete");
                    if let Some(item) = self.store.get(&id) {
                        if let Err(e) = item.on_delete(&context).await {
                            warn!(entity_type, %id, error = %e, "on_delete failed");
                            let _ = respond_to.send(Err(FrameworkError::EntityError(Box::new(e))));
                            continue;
                        }
                        self.store.remove(&id);
                        info!(entity_type, %id, size = self.store.len(), "Deleted");
                        let _ = respond_to.send(Ok(()));
                    } else {
                        warn!(entity_type, %id, "Not found");
                        let _ = respond_to.send(Err(FrameworkError::NotFound(id.to_string())));
                    }
                }
                ResourceRequest::Action {
                    id,
                    action,
                    respond_to,
                } => {
                    debug!(entity_type, %id, ?action, "Action");
                    if let Some(item) = self.store.get_mut(&id) {
                        let result = item
                            .handle_action(action, &context)
                            .await
                            .map_err(|e| FrameworkError::EntityError(Box::new(e)));
                        match &result {
                            Ok(_) => info!(entity_type, %id, "Action ok"),
                            Err(e) => warn!(entity_type, %id, error = %e, "Action failed"),
                        }
                        let _ = respond_to.send(result);
                    } else {
                        warn!(entity_type, %id, "Not found");
                        let _ = respond_to.send(Err(FrameworkError::NotFound(id.to_string())));
                    }
                }
                ResourceRequest::BatchAction {
                    actions,
                    respond_to,
                } => {
                    debug!(entity_type, ?actions, "BatchAction");
                    let result = self.batch(actions, &context).await;
                    match &result {
                        Ok(batch) => info!(
                            entity_type,
                            applied = batch.results.len(),
                            touched = batch.entities.len(),
                            "Batch committed"
                        ),
                        Err(e) => warn!(entity_type, error = %e, "Batch rolled back"),
                    }
                    let _ = respond_to.send(result);
                }
            }
        }

        info!(entity_type, size = self.store.len(), "Shutdown");
    }

    async fn create(&mut self, params: T::Create, context: &T::Context) -> Result<T, FrameworkError> {
        let raw = self.next_id.ok_or(FrameworkError::IdsExhausted)?;
        let id = T::Id::from(raw);

        let mut item = T::from_create_params(id.clone(), params)
            .map_err(|e| FrameworkError::EntityError(Box::new(e)))?;
        item.on_create(context)
            .await
            .map_err(|e| FrameworkError::EntityError(Box::new(e)))?;

        if let Some(existing) = self.store.values().find(|other| item.conflicts_with(other)) {
            return Err(FrameworkError::Conflict(existing.id().to_string()));
        }

        self.store.insert(id, item.clone());
        // Failed creates leave the counter where it was
        self.next_id = raw.checked_add(1);
        Ok(item)
    }

    /// Applies `update` to a copy and commits it only if the hook succeeds and the
    /// result does not conflict with any other stored entity.
    async fn update(
        &mut self,
        id: &T::Id,
        update: T::Update,
        context: &T::Context,
    ) -> Result<T, FrameworkError> {
        let mut item = self
            .store
            .get(id)
            .cloned()
            .ok_or_else(|| FrameworkError::NotFound(id.to_string()))?;
        item.on_update(update, context)
            .await
            .map_err(|e| FrameworkError::EntityError(Box::new(e)))?;

        if let Some(existing) = self
            .store
            .values()
            .find(|other| other.id() != id && item.conflicts_with(other))
        {
            return Err(FrameworkError::Conflict(existing.id().to_string()));
        }

        self.store.insert(id.clone(), item.clone());
        Ok(item)
    }

    fn get_many(&self, ids: Vec<T::Id>) -> Vec<T> {
        let mut seen = HashSet::with_capacity(ids.len());
        ids.into_iter()
            .filter(|id| seen.insert(id.clone()))
            .filter_map(|id| self.store.get(&id).cloned())
            .collect()
    }

    fn find_first(&self, predicate: &Predicate<T>) -> Option<T> {
        self.store
            .values()
            .filter(|item| predicate.matches(item))
            .min_by(|a, b| a.id().cmp(b.id()))
            .cloned()
    }

    async fn batch(
        &mut self,
        actions: Vec<(T::Id, T::Action)>,
        context: &T::Context,
    ) -> Result<BatchResult<T>, FrameworkError> {
        let mut staged: HashMap<T::Id, T> = HashMap::new();
        let mut order: Vec<T::Id> = Vec::new();
        let mut results = Vec::with_capacity(actions.len());

        for (id, action) in actions {
            let item = match staged.entry(id.clone()) {
                Entry::Occupied(entry) => entry.into_mut(),
                Entry::Vacant(entry) => match self.store.get(&id) {
                    Some(current) => {
                        order.push(id.clone());
                        entry.insert(current.clone())
                    }
                    None => {
                        debug!(%id, "Skipping unknown id in batch");
                        continue;
                    }
                },
            };
            let result = item
                .handle_action(action, context)
                .await
                .map_err(|e| FrameworkError::EntityError(Box::new(e)))?;
            results.push((id, result));
        }

        // Every action succeeded: commit the working copies.
        let mut entities = Vec::with_capacity(order.len());
        for id in order {
            if let Some(item) = staged.remove(&id) {
                entities.push(item.clone());
                self.store.insert(id, item);
            }
        }

        Ok(BatchResult { results, entities })
    }
}
