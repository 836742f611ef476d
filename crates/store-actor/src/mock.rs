//! # Mock Stores & Testing Guide
//!
//! `MockClient<T>` hands out a real `ResourceClient<T>` whose requests are answered
//! from a queue of expectations instead of by a `ResourceActor`. It lets you test the
//! logic *around* a store (domain clients, workflows) without spawning any actors, and
//! makes store failures trivial to inject.
//!
//! ## When to use Mocks vs Real Actors
//!
//! | Feature | MockClient | Real Actor |
//! |---------|------------|------------|
//! | **Determinism** | Fixed responses | Real state |
//! | **Use Case** | Logic around the client | The store itself, full system |
//! | **Error Injection** | Easy (`return_err`) | Requires specific state |
//!
//! ## Testing Strategies
//!
//! 1. **Client logic (pure mock)**: wrap `mock.client()` in a domain client and assert
//!    on what it returns.
//! 2. **Single actor**: spawn one `ResourceActor` and drive it via its client.
//! 3. **Workflow with mocked stores**: build the workflow over mock-backed clients and
//!    check both the outcome and that no unexpected write reached a store
//!    (an unexpected request fails the call and `verify` reports leftovers).
//! 4. **Full system**: spawn every store and run end-to-end flows.
//!
//! ```rust
//! use store_actor::mock::MockClient;
//! use store_actor::{ActorEntity, FrameworkError};
//! use async_trait::async_trait;
//!
//! #[derive(Clone, Debug)] struct Customer { id: u32 }
//! #[derive(Debug)] struct CustomerCreate;
//! #[derive(Debug)] struct CustomerUpdate;
//! #[derive(Debug)] enum CustomerAction {}
//! #[derive(Debug, thiserror::Error)] #[error("Err")] struct CustomerError;
//!
//! #[async_trait]
//! impl ActorEntity for Customer {
//!     type Id = u32; type Create = CustomerCreate; type Update = CustomerUpdate;
//!     type Action = CustomerAction; type ActionResult = (); type Context = (); type Error = CustomerError;
//!     fn id(&self) -> &u32 { &self.id }
//!     fn from_create_params(id: u32, _: CustomerCreate) -> Result<Self, Self::Error> { Ok(Self { id }) }
//!     async fn on_update(&mut self, _: CustomerUpdate, _: &()) -> Result<(), Self::Error> { Ok(()) }
//!     async fn handle_action(&mut self, _: CustomerAction, _: &()) -> Result<(), Self::Error> { Ok(()) }
//! }
//!
//! #[tokio::main]
//! async fn main() {
//!     let mut mock = MockClient::<Customer>::new();
//!     let client = mock.client();
//!
//!     // Simulate a downstream failure
//!     mock.expect_get(1).return_err(FrameworkError::ActorClosed);
//!
//!     let result = client.get(1).await;
//!     assert!(matches!(result, Err(FrameworkError::ActorClosed)));
//!     mock.verify();
//! }
//! ```
//!
//! ## Channel-level Helpers
//!
//! Use [`create_mock_client`] to get a client and the raw receiver, then the
//! `expect_*` functions to pull requests off it and answer them by hand.

use crate::client::ResourceClient;
use crate::entity::ActorEntity;
use crate::error::FrameworkError;
use crate::message::{BatchResult, Predicate, ResourceRequest};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tokio::sync::{mpsc, oneshot};

// =============================================================================
// EXPECTATION BUILDER API
// =============================================================================

/// An expected request and the response to send back.
enum Expectation<T: ActorEntity> {
    Get {
        id: T::Id,
        response: Result<Option<T>, FrameworkError>,
    },
    GetMany {
        response: Result<Vec<T>, FrameworkError>,
    },
    Create {
        response: Result<T, FrameworkError>,
    },
    Delete {
        id: T::Id,
        response: Result<(), FrameworkError>,
    },
    Action {
        id: T::Id,
        response: Result<T::ActionResult, FrameworkError>,
    },
    Batch {
        response: Result<BatchResult<T>, FrameworkError>,
    },
}

type Queue<T> = Arc<Mutex<VecDeque<Expectation<T>>>>;

fn lock<T: ActorEntity>(queue: &Queue<T>) -> MutexGuard<'_, VecDeque<Expectation<T>>> {
    queue.lock().unwrap_or_else(PoisonError::into_inner)
}

/// A mock store with expectation tracking for fluent testing.
///
/// Expectations are consumed in FIFO order. A request that does not match the next
/// expectation (wrong kind or wrong id) is dropped without a response, so the caller
/// sees [`FrameworkError::ActorDropped`], and the mismatch is recorded for
/// [`verify`](MockClient::verify).
///
/// # Example
/// ```ignore
/// let mut mock = MockClient::<Customer>::new();
/// mock.expect_get(CustomerId(1)).return_ok(Some(customer));
///
/// let client = mock.client();
/// // Use client in tests...
/// mock.verify(); // Ensures all expectations were met
/// ```
pub struct MockClient<T: ActorEntity> {
    client: ResourceClient<T>,
    expectations: Queue<T>,
    mismatches: Arc<Mutex<Vec<String>>>,
    _handle: tokio::task::JoinHandle<()>,
}

impl<T: ActorEntity> Default for MockClient<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: ActorEntity> MockClient<T> {
    /// Creates a new mock client with no expectations.
    pub fn new() -> Self {
        let (sender, mut receiver) = mpsc::channel::<ResourceRequest<T>>(100);
        let expectations: Queue<T> = Arc::new(Mutex::new(VecDeque::new()));
        let mismatches = Arc::new(Mutex::new(Vec::new()));
        let queue = expectations.clone();
        let seen = mismatches.clone();

        let handle = tokio::spawn(async move {
            while let Some(request) = receiver.recv().await {
                let expectation = lock(&queue).pop_front();
                // Recorded before the request (and its responder) is dropped.
                match mismatch(&request, expectation.as_ref()) {
                    Some(reason) => seen
                        .lock()
                        .unwrap_or_else(PoisonError::into_inner)
                        .push(reason),
                    None => {
                        if let Some(expectation) = expectation {
                            answer(request, expectation);
                        }
                    }
                }
            }
        });

        Self {
            client: ResourceClient::new(sender),
            expectations,
            mismatches,
            _handle: handle,
        }
    }

    /// Returns the client for use in tests.
    pub fn client(&self) -> ResourceClient<T> {
        self.client.clone()
    }

    /// Expects a `get` operation for `id`.
    pub fn expect_get(&mut self, id: T::Id) -> GetExpectationBuilder<T> {
        GetExpectationBuilder {
            id,
            expectations: self.expectations.clone(),
        }
    }

    /// Expects a `get_many` operation.
    pub fn expect_get_many(&mut self) -> ResponseBuilder<T, Vec<T>> {
        ResponseBuilder::new(self.expectations.clone(), |response| {
            Expectation::GetMany { response }
        })
    }

    /// Expects a `create` operation.
    pub fn expect_create(&mut self) -> ResponseBuilder<T, T> {
        ResponseBuilder::new(self.expectations.clone(), |response| {
            Expectation::Create { response }
        })
    }

    /// Expects a `delete` operation for `id`.
    pub fn expect_delete(&mut self, id: T::Id) -> ResponseBuilder<T, ()> {
        ResponseBuilder::new(self.expectations.clone(), move |response| {
            Expectation::Delete { id, response }
        })
    }

    /// Expects an `action` operation for `id`.
    pub fn expect_action(&mut self, id: T::Id) -> ResponseBuilder<T, T::ActionResult> {
        ResponseBuilder::new(self.expectations.clone(), move |response| {
            Expectation::Action { id, response }
        })
    }

    /// Expects a `perform_batch` operation.
    pub fn expect_batch(&mut self) -> ResponseBuilder<T, BatchResult<T>> {
        ResponseBuilder::new(self.expectations.clone(), |response| {
            Expectation::Batch { response }
        })
    }

    /// Verifies that all expectations were met and no unexpected request arrived.
    pub fn verify(&self) {
        let mismatches = self
            .mismatches
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        if !mismatches.is_empty() {
            panic!("Unexpected requests: {}", mismatches.join("; "));
        }
        let remaining = lock(&self.expectations).len();
        if remaining != 0 {
            panic!("Not all expectations were met. {} remaining", remaining);
        }
    }
}

fn reply<R>(respond_to: oneshot::Sender<Result<R, FrameworkError>>, response: Result<R, FrameworkError>) {
    let _ = respond_to.send(response);
}

fn check_id<Id: PartialEq + std::fmt::Debug>(op: &str, expected: &Id, actual: &Id) -> Option<String> {
    (expected != actual).then(|| format!("{op}: expected id {expected:?}, got {actual:?}"))
}

/// Returns why `request` does not satisfy `expectation`, if it doesn't.
fn mismatch<T: ActorEntity>(
    request: &ResourceRequest<T>,
    expectation: Option<&Expectation<T>>,
) -> Option<String> {
    match (request, expectation) {
        (ResourceRequest::Get { id, .. }, Some(Expectation::Get { id: expected, .. })) => {
            check_id("get", expected, id)
        }
        (ResourceRequest::Delete { id, .. }, Some(Expectation::Delete { id: expected, .. })) => {
            check_id("delete", expected, id)
        }
        (ResourceRequest::Action { id, .. }, Some(Expectation::Action { id: expected, .. })) => {
            check_id("action", expected, id)
        }
        (ResourceRequest::GetMany { .. }, Some(Expectation::GetMany { .. }))
        | (ResourceRequest::Create { .. }, Some(Expectation::Create { .. }))
        | (ResourceRequest::BatchAction { .. }, Some(Expectation::Batch { .. })) => None,
        (request, None) => Some(format!("no expectation left for {}", describe(request))),
        (request, Some(_)) => Some(format!("expectation mismatch for {}", describe(request))),
    }
}

/// Sends the expected response. Callers check [`mismatch`] first.
fn answer<T: ActorEntity>(request: ResourceRequest<T>, expectation: Expectation<T>) {
    match (request, expectation) {
        (ResourceRequest::Get { respond_to, .. }, Expectation::Get { response, .. }) => {
            reply(respond_to, response)
        }
        (ResourceRequest::GetMany { respond_to, .. }, Expectation::GetMany { response }) => {
            reply(respond_to, response)
        }
        (ResourceRequest::Create { respond_to, .. }, Expectation::Create { response }) => {
            reply(respond_to, response)
        }
        (ResourceRequest::Delete { respond_to, .. }, Expectation::Delete { response, .. }) => {
            reply(respond_to, response)
        }
        (ResourceRequest::Action { respond_to, .. }, Expectation::Action { response, .. }) => {
            reply(respond_to, response)
        }
        (ResourceRequest::BatchAction { respond_to, .. }, Expectation::Batch { response }) => {
            reply(respond_to, response)
        }
        _ => {}
    }
}

fn describe<T: ActorEntity>(request: &ResourceRequest<T>) -> &'static str {
    match request {
        ResourceRequest::Create { .. } => "create",
        ResourceRequest::Get { .. } => "get",
        ResourceRequest::GetMany { .. } => "get_many",
        ResourceRequest::FindFirst { .. } => "find_first",
        ResourceRequest::List { .. } => "list",
        ResourceRequest::Update { .. } => "update",
        ResourceRequest::Delete { .. } => "delete",
        ResourceRequest::Action { .. } => "action",
        ResourceRequest::BatchAction { .. } => "batch",
    }
}

/// Builder for `get` expectations.
pub struct GetExpectationBuilder<T: ActorEntity> {
    id: T::Id,
    expectations: Queue<T>,
}

impl<T: ActorEntity> GetExpectationBuilder<T> {
    /// Sets the expectation to return a successful result.
    pub fn return_ok(self, value: Option<T>) {
        lock(&self.expectations).push_back(Expectation::Get {
            id: self.id,
            response: Ok(value),
        });
    }

    /// Sets the expectation to return an error.
    pub fn return_err(self, error: FrameworkError) {
        lock(&self.expectations).push_back(Expectation::Get {
            id: self.id,
            response: Err(error),
        });
    }
}

/// Builder for every other expectation kind.
pub struct ResponseBuilder<T: ActorEntity, R> {
    expectations: Queue<T>,
    wrap: Box<dyn FnOnce(Result<R, FrameworkError>) -> Expectation<T> + Send>,
}

impl<T: ActorEntity, R> ResponseBuilder<T, R> {
    fn new(
        expectations: Queue<T>,
        wrap: impl FnOnce(Result<R, FrameworkError>) -> Expectation<T> + Send + 'static,
    ) -> Self {
        Self {
            expectations,
            wrap: Box::new(wrap),
        }
    }

    /// Sets the expectation to return a successful result.
    pub fn return_ok(self, value: R) {
        let expectation = (self.wrap)(Ok(value));
        lock(&self.expectations).push_back(expectation);
    }

    /// Sets the expectation to return an error.
    pub fn return_err(self, error: FrameworkError) {
        let expectation = (self.wrap)(Err(error));
        lock(&self.expectations).push_back(expectation);
    }
}

// =============================================================================
// CHANNEL-LEVEL HELPERS
// =============================================================================

/// Creates a client and the receiver its requests arrive on.
///
/// Pull requests with the `expect_*` helpers below, inspect their payloads and answer
/// through the returned responder.
pub fn create_mock_client<T: ActorEntity>(
    buffer_size: usize,
) -> (ResourceClient<T>, mpsc::Receiver<ResourceRequest<T>>) {
    let (sender, receiver) = mpsc::channel(buffer_size);
    (ResourceClient::new(sender), receiver)
}

/// Helper to verify that the next message is a Create request
pub async fn expect_create<T: ActorEntity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(T::Create, oneshot::Sender<Result<T, FrameworkError>>)> {
    match receiver.recv().await {
        Some(ResourceRequest::Create { params, respond_to }) => Some((params, respond_to)),
        _ => None,
    }
}

/// Helper to verify that the next message is a Get request
pub async fn expect_get<T: ActorEntity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(T::Id, oneshot::Sender<Result<Option<T>, FrameworkError>>)> {
    match receiver.recv().await {
        Some(ResourceRequest::Get { id, respond_to }) => Some((id, respond_to)),
        _ => None,
    }
}

/// Helper to verify that the next message is a GetMany request
pub async fn expect_get_many<T: ActorEntity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(Vec<T::Id>, oneshot::Sender<Result<Vec<T>, FrameworkError>>)> {
    match receiver.recv().await {
        Some(ResourceRequest::GetMany { ids, respond_to }) => Some((ids, respond_to)),
        _ => None,
    }
}

/// Helper to verify that the next message is a FindFirst request
pub async fn expect_find_first<T: ActorEntity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(Predicate<T>, oneshot::Sender<Result<Option<T>, FrameworkError>>)> {
    match receiver.recv().await {
        Some(ResourceRequest::FindFirst {
            predicate,
            respond_to,
        }) => Some((predicate, respond_to)),
        _ => None,
    }
}

/// Helper to verify that the next message is an Action request
pub async fn expect_action<T: ActorEntity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(
    T::Id,
    T::Action,
    oneshot::Sender<Result<T::ActionResult, FrameworkError>>,
)> {
    match receiver.recv().await {
        Some(ResourceRequest::Action {
            id,
            action,
            respond_to,
        }) => Some((id, action, respond_to)),
        _ => None,
    }
}

/// Helper to verify that the next message is a BatchAction request
pub async fn expect_batch<T: ActorEntity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(
    Vec<(T::Id, T::Action)>,
    oneshot::Sender<Result<BatchResult<T>, FrameworkError>>,
)> {
    match receiver.recv().await {
        Some(ResourceRequest::BatchAction {
            actions,
            respond_to,
        }) => Some((actions, respond_to)),
        _ => None,
    }
}
