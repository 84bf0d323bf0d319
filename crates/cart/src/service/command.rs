use crate::{
    abstract_trait::{
        repository::{DynCartCommandRepository, DynCartQueryRepository},
        service::CartCommandServiceTrait,
    },
    domain::{requests::cart::ReplaceCartItemsRequest, response::cart::CartResponse},
};
use async_trait::async_trait;
use product::abstract_trait::repository::DynProductQueryRepository;
use prometheus_client::registry::Registry;
use shared::{
    domain::responses::ApiResponse,
    errors::ServiceError,
    utils::{Method, Metrics, Status},
};
use tokio::time::Instant;
use tracing::{error, info};

#[derive(Clone)]
pub struct CartCommandService {
    query: DynCartQueryRepository,
    command: DynCartCommandRepository,
    products: DynProductQueryRepository,
    metrics: Metrics,
}

impl CartCommandService {
    pub fn new(
        query: DynCartQueryRepository,
        command: DynCartCommandRepository,
        products: DynProductQueryRepository,
        registry: &mut Registry,
    ) -> Self {
        let metrics = Metrics::new();
        metrics.register("cart_command", registry);

        Self {
            query,
            command,
            products,
            metrics,
        }
    }

    fn observe(&self, method: Method, status: Status, started: Instant) {
        self.metrics
            .record(method, status, started.elapsed().as_secs_f64());
    }

    async fn require_cart(&self, cart_id: i32) -> Result<(), ServiceError> {
        if self.query.exists(cart_id).await? {
            Ok(())
        } else {
            info!("❌ Cart not found with ID: {cart_id}");
            Err(ServiceError::CartNotFound)
        }
    }

    async fn require_product(&self, product_id: i32) -> Result<(), ServiceError> {
        if self.products.find_by_id(product_id).await?.is_some() {
            Ok(())
        } else {
            info!("❌ Product not found with ID: {product_id}");
            Err(ServiceError::ProductNotFound)
        }
    }

    async fn refreshed(&self, cart_id: i32) -> Result<CartResponse, ServiceError> {
        let cart = self
            .query
            .find_by_id(cart_id)
            .await?
            .ok_or(ServiceError::CartNotFound)?;

        Ok(CartResponse::from(cart))
    }
}

#[async_trait]
impl CartCommandServiceTrait for CartCommandService {
    async fn create(&self) -> Result<ApiResponse<CartResponse>, ServiceError> {
        info!("📦 Creating cart");

        let started = Instant::now();

        let cart = self.command.create().await.map_err(|e| {
            error!("❌ Failed to create cart: {e:?}");
            self.observe(Method::Post, Status::Error, started);
            ServiceError::Repo(e)
        })?;

        self.observe(Method::Post, Status::Success, started);

        Ok(ApiResponse::with_message(
            "Cart created successfully",
            CartResponse::from(cart),
        ))
    }

    async fn add_product(
        &self,
        cart_id: i32,
        product_id: i32,
    ) -> Result<ApiResponse<CartResponse>, ServiceError> {
        info!("🔄 Adding product {product_id} to cart {cart_id}");

        let started = Instant::now();

        let result = async {
            self.require_cart(cart_id).await?;
            self.require_product(product_id).await?;
            self.command
                .increment_or_insert_item(cart_id, product_id)
                .await?;
            self.refreshed(cart_id).await
        }
        .await;

        match result {
            Ok(cart) => {
                self.observe(Method::Post, Status::Success, started);
                Ok(ApiResponse::with_message("Product added to cart", cart))
            }
            Err(e) => {
                self.observe(Method::Post, Status::Error, started);
                Err(e)
            }
        }
    }

    async fn remove_product(
        &self,
        cart_id: i32,
        product_id: i32,
    ) -> Result<ApiResponse<CartResponse>, ServiceError> {
        info!("🗑️ Removing product {product_id} from cart {cart_id}");

        let started = Instant::now();

        let result = async {
            self.require_cart(cart_id).await?;

            if self.command.remove_item(cart_id, product_id).await? == 0 {
                info!("❌ Product {product_id} is not in cart {cart_id}");
                return Err(ServiceError::ProductNotInCart);
            }

            self.refreshed(cart_id).await
        }
        .await;

        match result {
            Ok(cart) => {
                self.observe(Method::Delete, Status::Success, started);
                Ok(ApiResponse::with_message("Product removed from cart", cart))
            }
            Err(e) => {
                self.observe(Method::Delete, Status::Error, started);
                Err(e)
            }
        }
    }

    async fn replace_products(
        &self,
        cart_id: i32,
        req: &ReplaceCartItemsRequest,
    ) -> Result<ApiResponse<CartResponse>, ServiceError> {
        info!(
            "🔄 Replacing items of cart {cart_id} with {} entries",
            req.products.len()
        );

        let started = Instant::now();

        // Every entry is checked before anything is written so a bad item
        // leaves the cart exactly as it was.
        let result = async {
            self.require_cart(cart_id).await?;

            for item in &req.products {
                if item.quantity < 1 {
                    return Err(ServiceError::Validation(vec![format!(
                        "quantity must be >= 1 for product {}",
                        item.product_id
                    )]));
                }
                self.require_product(item.product_id).await?;
            }

            self.command.replace_items(cart_id, &req.products).await?;
            self.refreshed(cart_id).await
        }
        .await;

        match result {
            Ok(cart) => {
                self.observe(Method::Put, Status::Success, started);
                Ok(ApiResponse::with_message("Cart updated successfully", cart))
            }
            Err(e) => {
                self.observe(Method::Put, Status::Error, started);
                Err(e)
            }
        }
    }

    async fn set_quantity(
        &self,
        cart_id: i32,
        product_id: i32,
        quantity: i32,
    ) -> Result<ApiResponse<CartResponse>, ServiceError> {
        info!("🔄 Setting quantity of product {product_id} in cart {cart_id} to {quantity}");

        let started = Instant::now();

        let result = async {
            if quantity < 1 {
                return Err(ServiceError::Validation(vec![
                    "quantity must be >= 1".to_string(),
                ]));
            }

            self.require_cart(cart_id).await?;

            if self
                .command
                .set_quantity(cart_id, product_id, quantity)
                .await?
                == 0
            {
                info!("❌ Product {product_id} is not in cart {cart_id}");
                return Err(ServiceError::ProductNotInCart);
            }

            self.refreshed(cart_id).await
        }
        .await;

        match result {
            Ok(cart) => {
                self.observe(Method::Put, Status::Success, started);
                Ok(ApiResponse::with_message("Quantity updated", cart))
            }
            Err(e) => {
                self.observe(Method::Put, Status::Error, started);
                Err(e)
            }
        }
    }

    async fn clear(&self, cart_id: i32) -> Result<ApiResponse<CartResponse>, ServiceError> {
        info!("🗑️ Clearing cart {cart_id}");

        let started = Instant::now();

        let result = async {
            self.require_cart(cart_id).await?;
            self.command.clear(cart_id).await?;
            self.refreshed(cart_id).await
        }
        .await;

        match result {
            Ok(cart) => {
                self.observe(Method::Delete, Status::Success, started);
                Ok(ApiResponse::with_message("Cart cleared", cart))
            }
            Err(e) => {
                self.observe(Method::Delete, Status::Error, started);
                Err(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::requests::cart::CartItemRequest;
    use crate::service::test_support::{MockCartRepo, MockProductLookup, sample_product};
    use std::sync::Arc;

    fn service(
        repo: Arc<MockCartRepo>,
        products: Arc<MockProductLookup>,
    ) -> CartCommandService {
        let mut registry = Registry::default();
        CartCommandService::new(repo.clone(), repo, products, &mut registry)
    }

    fn setup() -> (Arc<MockCartRepo>, Arc<MockProductLookup>) {
        let products = Arc::new(MockProductLookup::new());
        let repo = Arc::new(MockCartRepo::new(products.clone()));
        (repo, products)
    }

    #[tokio::test]
    async fn create_returns_empty_cart() {
        let (repo, products) = setup();
        let service = service(repo, products);

        let response = service.create().await.unwrap();

        assert!(response.data.products.is_empty());
        assert_eq!(response.message.as_deref(), Some("Cart created successfully"));
    }

    #[tokio::test]
    async fn adding_same_product_twice_merges_into_one_line() {
        let (repo, products) = setup();
        products.insert(sample_product(10, "A1"));
        let cart_id = repo.seed_cart();
        let service = service(repo.clone(), products);

        service.add_product(cart_id, 10).await.unwrap();
        let cart = service.add_product(cart_id, 10).await.unwrap().data;

        assert_eq!(cart.products.len(), 1);
        assert_eq!(cart.products[0].quantity, 2);
        assert_eq!(repo.items_of(cart_id).len(), 1);
    }

    #[tokio::test]
    async fn adding_unknown_product_leaves_cart_untouched() {
        let (repo, products) = setup();
        products.insert(sample_product(10, "A1"));
        let cart_id = repo.seed_cart();
        repo.seed_item(cart_id, 10, 1);
        let service = service(repo.clone(), products);

        let err = service.add_product(cart_id, 999).await.unwrap_err();

        assert!(matches!(err, ServiceError::ProductNotFound));
        assert_eq!(repo.items_of(cart_id).len(), 1);
        assert_eq!(repo.items_of(cart_id)[0].quantity, 1);
    }

    #[tokio::test]
    async fn adding_to_unknown_cart_is_cart_not_found() {
        let (repo, products) = setup();
        products.insert(sample_product(10, "A1"));
        let service = service(repo, products);

        assert!(matches!(
            service.add_product(42, 10).await,
            Err(ServiceError::CartNotFound)
        ));
    }

    #[tokio::test]
    async fn removing_product_not_in_cart_is_an_error() {
        let (repo, products) = setup();
        let cart_id = repo.seed_cart();
        let service = service(repo, products);

        assert!(matches!(
            service.remove_product(cart_id, 10).await,
            Err(ServiceError::ProductNotInCart)
        ));
    }

    #[tokio::test]
    async fn remove_deletes_the_whole_line_item() {
        let (repo, products) = setup();
        let cart_id = repo.seed_cart();
        repo.seed_item(cart_id, 10, 4);
        let service = service(repo.clone(), products);

        let cart = service.remove_product(cart_id, 10).await.unwrap().data;

        assert!(cart.products.is_empty());
        assert!(repo.items_of(cart_id).is_empty());
    }

    #[tokio::test]
    async fn replace_with_unknown_product_changes_nothing() {
        let (repo, products) = setup();
        products.insert(sample_product(10, "A1"));
        let cart_id = repo.seed_cart();
        repo.seed_item(cart_id, 10, 2);
        let service = service(repo.clone(), products);

        let req = ReplaceCartItemsRequest {
            products: vec![
                CartItemRequest {
                    product_id: 10,
                    quantity: 1,
                },
                CartItemRequest {
                    product_id: 999,
                    quantity: 1,
                },
            ],
        };

        let err = service.replace_products(cart_id, &req).await.unwrap_err();

        assert!(matches!(err, ServiceError::ProductNotFound));
        let items = repo.items_of(cart_id);
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].quantity, 2);
    }

    #[tokio::test]
    async fn replace_keeps_duplicate_product_references() {
        let (repo, products) = setup();
        products.insert(sample_product(10, "A1"));
        let cart_id = repo.seed_cart();
        let service = service(repo.clone(), products);

        let req = ReplaceCartItemsRequest {
            products: vec![
                CartItemRequest {
                    product_id: 10,
                    quantity: 1,
                },
                CartItemRequest {
                    product_id: 10,
                    quantity: 3,
                },
            ],
        };

        let cart = service.replace_products(cart_id, &req).await.unwrap().data;

        assert_eq!(cart.products.len(), 2);
        assert_eq!(cart.products[0].quantity, 1);
        assert_eq!(cart.products[1].quantity, 3);
    }

    #[tokio::test]
    async fn zero_quantity_is_rejected_before_any_write() {
        let (repo, products) = setup();
        products.insert(sample_product(10, "A1"));
        let cart_id = repo.seed_cart();
        repo.seed_item(cart_id, 10, 2);
        let service = service(repo.clone(), products);

        let req = ReplaceCartItemsRequest {
            products: vec![CartItemRequest {
                product_id: 10,
                quantity: 0,
            }],
        };

        assert!(matches!(
            service.replace_products(cart_id, &req).await,
            Err(ServiceError::Validation(_))
        ));
        assert!(matches!(
            service.set_quantity(cart_id, 10, 0).await,
            Err(ServiceError::Validation(_))
        ));
        assert_eq!(repo.items_of(cart_id)[0].quantity, 2);
    }

    #[tokio::test]
    async fn set_quantity_on_absent_line_item_is_an_error() {
        let (repo, products) = setup();
        let cart_id = repo.seed_cart();
        let service = service(repo, products);

        assert!(matches!(
            service.set_quantity(cart_id, 10, 5).await,
            Err(ServiceError::ProductNotInCart)
        ));
    }

    #[tokio::test]
    async fn set_quantity_overwrites_the_count() {
        let (repo, products) = setup();
        let cart_id = repo.seed_cart();
        repo.seed_item(cart_id, 10, 2);
        let service = service(repo, products);

        let cart = service.set_quantity(cart_id, 10, 7).await.unwrap().data;

        assert_eq!(cart.products[0].quantity, 7);
    }

    #[tokio::test]
    async fn clear_empties_the_cart_but_keeps_it() {
        let (repo, products) = setup();
        let cart_id = repo.seed_cart();
        repo.seed_item(cart_id, 10, 2);
        repo.seed_item(cart_id, 11, 1);
        let service = service(repo, products);

        let cart = service.clear(cart_id).await.unwrap().data;

        assert_eq!(cart.id, cart_id);
        assert!(cart.products.is_empty());
    }
}
