//! # Customer Client
//!
//! Provides a high‑level API for interacting with the `Customer` actor.
use crate::customer_actor::CustomerError;
use crate::model::{Customer, CustomerCreate, CustomerId, CustomerUpdate};
use crate::store::CustomerStore;
use async_trait::async_trait;
use store_actor::{ActorClient, FrameworkError, ResourceClient};
use tracing::{debug, instrument};

/// Client for interacting with the Customer actor.
#[derive(Clone)]
pub struct CustomerClient {
    inner: ResourceClient<Customer>,
}

impl CustomerClient {
    pub fn new(inner: ResourceClient<Customer>) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl ActorClient<Customer> for CustomerClient {
    type Error = CustomerError;

    fn inner(&self) -> &ResourceClient<Customer> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> Self::Error {
        e.into_entity_error::<CustomerError>()
            .unwrap_or_else(|other| CustomerError::ActorCommunicationError(other.to_string()))
    }
}

impl CustomerClient {
    /// Registers a customer. Fails with [`CustomerError::AlreadyExists`] if the email is
    /// taken.
    #[instrument(skip(self))]
    pub async fn create_customer(&self, params: CustomerCreate) -> Result<Customer, CustomerError> {
        debug!("Sending request");
        let email = params.email.trim().to_string();
        self.inner.create(params).await.map_err(|e| match e {
            FrameworkError::Conflict(_) => CustomerError::AlreadyExists(email),
            other => Self::map_error(other),
        })
    }

    #[instrument(skip(self))]
    pub async fn update_customer(
        &self,
        id: CustomerId,
        update: CustomerUpdate,
    ) -> Result<Customer, CustomerError> {
        debug!("Sending request");
        let email = update.email.as_deref().map(str::trim).map(str::to_string);
        self.inner.update(id, update).await.map_err(|e| match e {
            FrameworkError::NotFound(_) => CustomerError::NotFound(id),
            FrameworkError::Conflict(_) => CustomerError::AlreadyExists(email.unwrap_or_default()),
            other => Self::map_error(other),
        })
    }
}

#[async_trait]
impl CustomerStore for CustomerClient {
    async fn find_by_id(&self, id: CustomerId) -> Result<Option<Customer>, CustomerError> {
        self.get(id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use store_actor::mock::{create_mock_client, expect_get, MockClient};

    fn alice() -> Customer {
        Customer {
            id: CustomerId(1),
            name: "Alice".into(),
            email: "alice@example.com".into(),
        }
    }

    #[tokio::test]
    async fn test_find_by_id_passes_through() {
        let mut mock = MockClient::<Customer>::new();
        mock.expect_get(CustomerId(1)).return_ok(Some(alice()));
        mock.expect_get(CustomerId(2)).return_ok(None);
        let client = CustomerClient::new(mock.client());

        assert_eq!(client.find_by_id(CustomerId(1)).await.unwrap(), Some(alice()));
        assert_eq!(client.find_by_id(CustomerId(2)).await.unwrap(), None);
        mock.verify();
    }

    #[tokio::test]
    async fn test_find_by_id_sends_a_single_get() {
        let (client, mut receiver) = create_mock_client::<Customer>(10);
        let customer_client = CustomerClient::new(client);

        let task = tokio::spawn(async move { customer_client.find_by_id(CustomerId(1)).await });

        let (id, responder) = expect_get(&mut receiver).await.expect("Expected Get request");
        assert_eq!(id, CustomerId(1));
        responder.send(Ok(Some(alice()))).unwrap();

        assert_eq!(task.await.unwrap().unwrap(), Some(alice()));
    }

    #[tokio::test]
    async fn test_duplicate_email_maps_to_already_exists() {
        let mut mock = MockClient::<Customer>::new();
        mock.expect_create()
            .return_err(FrameworkError::Conflict("customer_1".into()));
        let client = CustomerClient::new(mock.client());

        let result = client
            .create_customer(CustomerCreate {
                name: "Alice Again".into(),
                email: "  alice@example.com ".into(),
            })
            .await;
        assert_eq!(
            result.unwrap_err(),
            CustomerError::AlreadyExists("alice@example.com".into())
        );
        mock.verify();
    }

    #[tokio::test]
    async fn test_entity_errors_keep_their_type() {
        let mut mock = MockClient::<Customer>::new();
        mock.expect_create()
            .return_err(FrameworkError::EntityError(Box::new(CustomerError::Validation(
                "name must not be empty".into(),
            ))));
        mock.expect_get(CustomerId(1))
            .return_err(FrameworkError::ActorClosed);
        let client = CustomerClient::new(mock.client());

        let invalid = client
            .create_customer(CustomerCreate {
                name: "".into(),
                email: "x@example.com".into(),
            })
            .await;
        assert!(matches!(invalid, Err(CustomerError::Validation(_))));

        let closed = client.find_by_id(CustomerId(1)).await;
        assert!(matches!(closed, Err(CustomerError::ActorCommunicationError(_))));
    }
}
