//! # Product Client
//!
//! Provides a high‑level API for interacting with the `Product` actor.
//! It wraps a `ResourceClient<Product>` and exposes catalog and stock methods.
use crate::model::{Product, ProductCreate, ProductId, ProductQuantity, ProductUpdate};
use crate::product_actor::{ProductAction, ProductActionResult, ProductError};
use crate::store::ProductStore;
use async_trait::async_trait;
use store_actor::{ActorClient, FrameworkError, ResourceClient};
use tracing::{debug, instrument};

/// Client for interacting with the Product actor.
#[derive(Clone)]
pub struct ProductClient {
    inner: ResourceClient<Product>,
}

impl ProductClient {
    pub fn new(inner: ResourceClient<Product>) -> Self {
        Self { inner }
    }

    /// Like [`ActorClient::map_error`], but reports a missing entity as `id`.
    fn map_error_for(id: ProductId) -> impl FnOnce(FrameworkError) -> ProductError {
        move |e| match e {
            FrameworkError::NotFound(_) => ProductError::NotFound(id),
            other => Self::map_error(other),
        }
    }

    async fn apply_batch(&self, actions: Vec<(ProductId, ProductAction)>) -> Result<Vec<Product>, ProductError> {
        let batch = self
            .inner
            .perform_batch(actions)
            .await
            .map_err(Self::map_error)?;
        Ok(batch.entities)
    }
}

#[async_trait]
impl ActorClient<Product> for ProductClient {
    type Error = ProductError;

    fn inner(&self) -> &ResourceClient<Product> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> Self::Error {
        e.into_entity_error::<ProductError>()
            .unwrap_or_else(|other| ProductError::ActorCommunicationError(other.to_string()))
    }
}

impl ProductClient {
    /// Adds a product to the catalog. Fails with [`ProductError::AlreadyExists`] if the
    /// name is taken.
    #[instrument(skip(self))]
    pub async fn create_product(&self, params: ProductCreate) -> Result<Product, ProductError> {
        debug!("Sending request");
        let name = params.name.trim().to_string();
        self.inner.create(params).await.map_err(|e| match e {
            FrameworkError::Conflict(_) => ProductError::AlreadyExists(name),
            other => Self::map_error(other),
        })
    }

    /// Looks a product up by name. Surrounding whitespace in `name` is ignored, the
    /// same way it is when the product is created.
    #[instrument(skip(self))]
    pub async fn find_by_name(&self, name: &str) -> Result<Option<Product>, ProductError> {
        debug!("Sending request");
        let name = name.trim().to_string();
        self.inner
            .find_first(move |product: &Product| product.name == name)
            .await
            .map_err(Self::map_error)
    }

    /// Changes the catalog price and/or the stock on hand.
    #[instrument(skip(self))]
    pub async fn update_product(&self, id: ProductId, update: ProductUpdate) -> Result<Product, ProductError> {
        debug!("Sending request");
        self.inner
            .update(id, update)
            .await
            .map_err(Self::map_error_for(id))
    }

    /// Check the current stock level for a product.
    #[instrument(skip(self))]
    pub async fn check_stock(&self, id: ProductId) -> Result<u32, ProductError> {
        debug!("Checking stock for product {}", id);
        match self
            .inner
            .perform_action(id, ProductAction::CheckStock)
            .await
            .map_err(Self::map_error_for(id))?
        {
            ProductActionResult::CheckStock(level) => Ok(level),
            other => Err(ProductError::ActorCommunicationError(format!(
                "unexpected result for CheckStock: {other:?}"
            ))),
        }
    }
}

#[async_trait]
impl ProductStore for ProductClient {
    #[instrument(skip(self))]
    async fn find_all_by_id(&self, ids: Vec<ProductId>) -> Result<Vec<Product>, ProductError> {
        self.get_many(ids).await
    }

    #[instrument(skip(self))]
    async fn update_quantity(&self, updates: Vec<ProductQuantity>) -> Result<Vec<Product>, ProductError> {
        let actions = ProductQuantity::merge(updates)
            .into_iter()
            .map(|u| (u.id, ProductAction::ReserveStock(u.quantity)))
            .collect();
        self.apply_batch(actions).await
    }

    #[instrument(skip(self))]
    async fn restore_quantity(&self, updates: Vec<ProductQuantity>) -> Result<Vec<Product>, ProductError> {
        let actions = ProductQuantity::merge(updates)
            .into_iter()
            .map(|u| (u.id, ProductAction::Restock(u.quantity)))
            .collect();
        self.apply_batch(actions).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use store_actor::mock::{
        create_mock_client, expect_action, expect_batch, expect_find_first, expect_get_many, MockClient,
    };
    use store_actor::BatchResult;

    fn product(id: u32, quantity: u32) -> Product {
        Product {
            id: ProductId(id),
            name: format!("Widget {id}"),
            price: dec!(10.00),
            quantity,
        }
    }

    #[tokio::test]
    async fn test_check_stock_returns_correct_level() {
        let (client, mut receiver) = create_mock_client::<Product>(10);
        let product_client = ProductClient::new(client);

        let check_task = tokio::spawn(async move { product_client.check_stock(ProductId(1)).await });

        let (id, action, responder) = expect_action(&mut receiver)
            .await
            .expect("Expected Action request");
        assert_eq!(id, ProductId(1));
        assert_eq!(action, ProductAction::CheckStock);

        responder
            .send(Ok(ProductActionResult::CheckStock(42)))
            .unwrap();

        assert_eq!(check_task.await.unwrap().unwrap(), 42);
    }

    #[tokio::test]
    async fn test_find_all_by_id_sends_one_lookup() {
        let (client, mut receiver) = create_mock_client::<Product>(10);
        let product_client = ProductClient::new(client);

        let task = tokio::spawn(async move {
            product_client
                .find_all_by_id(vec![ProductId(2), ProductId(1)])
                .await
        });

        let (ids, responder) = expect_get_many(&mut receiver)
            .await
            .expect("Expected GetMany request");
        assert_eq!(ids, vec![ProductId(2), ProductId(1)]);
        responder.send(Ok(vec![product(2, 4)])).unwrap();

        assert_eq!(task.await.unwrap().unwrap(), vec![product(2, 4)]);
    }

    #[tokio::test]
    async fn test_find_by_name_ignores_surrounding_whitespace() {
        let (client, mut receiver) = create_mock_client::<Product>(10);
        let product_client = ProductClient::new(client);

        let task = tokio::spawn(async move { product_client.find_by_name("  Widget 1 ").await });

        let (predicate, responder) = expect_find_first(&mut receiver)
            .await
            .expect("Expected FindFirst request");
        assert!(predicate.matches(&product(1, 3)));
        assert!(!predicate.matches(&product(2, 3)));
        responder.send(Ok(Some(product(1, 3)))).unwrap();

        assert_eq!(task.await.unwrap().unwrap(), Some(product(1, 3)));
    }

    #[tokio::test]
    async fn test_update_quantity_sends_one_merged_batch() {
        let (client, mut receiver) = create_mock_client::<Product>(10);
        let product_client = ProductClient::new(client);

        let task = tokio::spawn(async move {
            product_client
                .update_quantity(vec![
                    ProductQuantity::new(ProductId(1), 2),
                    ProductQuantity::new(ProductId(2), 1),
                    ProductQuantity::new(ProductId(1), 3),
                ])
                .await
        });

        let (actions, responder) = expect_batch(&mut receiver)
            .await
            .expect("Expected BatchAction request");
        assert_eq!(
            actions,
            vec![
                (ProductId(1), ProductAction::ReserveStock(5)),
                (ProductId(2), ProductAction::ReserveStock(1)),
            ]
        );

        responder
            .send(Ok(BatchResult {
                results: vec![
                    (ProductId(1), ProductActionResult::ReserveStock(5)),
                    (ProductId(2), ProductActionResult::ReserveStock(0)),
                ],
                entities: vec![product(1, 5), product(2, 0)],
            }))
            .unwrap();

        let updated = task.await.unwrap().unwrap();
        assert_eq!(updated, vec![product(1, 5), product(2, 0)]);
    }

    #[tokio::test]
    async fn test_update_quantity_insufficient_stock_keeps_its_type() {
        let mut mock = MockClient::<Product>::new();
        let shortage = ProductError::InsufficientStock {
            product_id: ProductId(1),
            requested: 5,
            available: 2,
        };
        mock.expect_batch()
            .return_err(FrameworkError::EntityError(Box::new(shortage.clone())));
        let client = ProductClient::new(mock.client());

        let result = client
            .update_quantity(vec![ProductQuantity::new(ProductId(1), 5)])
            .await;
        assert_eq!(result.unwrap_err(), shortage);
        mock.verify();
    }

    #[tokio::test]
    async fn test_missing_product_is_reported_by_id() {
        let mut mock = MockClient::<Product>::new();
        mock.expect_action(ProductId(7))
            .return_err(FrameworkError::NotFound("product_7".into()));
        mock.expect_create()
            .return_err(FrameworkError::Conflict("product_1".into()));
        let client = ProductClient::new(mock.client());

        assert_eq!(
            client.check_stock(ProductId(7)).await,
            Err(ProductError::NotFound(ProductId(7)))
        );

        let duplicate = client
            .create_product(ProductCreate {
                name: " Widget 1 ".into(),
                price: dec!(1.00),
                quantity: 1,
            })
            .await;
        assert_eq!(duplicate, Err(ProductError::AlreadyExists("Widget 1".into())));
        mock.verify();
    }
}
