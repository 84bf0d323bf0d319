use crate::{
    abstract_trait::{repository::DynCartQueryRepository, service::CartQueryServiceTrait},
    domain::response::cart::{CartDetailResponse, CartResponse},
};
use async_trait::async_trait;
use prometheus_client::registry::Registry;
use shared::{
    domain::responses::ApiResponse,
    errors::ServiceError,
    utils::{Method, Metrics, Status},
};
use tokio::time::Instant;
use tracing::{error, info};

#[derive(Clone)]
pub struct CartQueryService {
    query: DynCartQueryRepository,
    metrics: Metrics,
}

impl CartQueryService {
    pub fn new(query: DynCartQueryRepository, registry: &mut Registry) -> Self {
        let metrics = Metrics::new();
        metrics.register("cart_query", registry);

        Self { query, metrics }
    }
}

#[async_trait]
impl CartQueryServiceTrait for CartQueryService {
    async fn find_all(&self) -> Result<ApiResponse<Vec<CartResponse>>, ServiceError> {
        info!("🔍 Fetching all carts");

        let started = Instant::now();

        let carts = self.query.find_all().await.map_err(|e| {
            error!("❌ Failed to fetch carts: {e:?}");
            self.metrics
                .record(Method::Get, Status::Error, started.elapsed().as_secs_f64());
            ServiceError::Repo(e)
        })?;

        self.metrics
            .record(Method::Get, Status::Success, started.elapsed().as_secs_f64());

        Ok(ApiResponse::new(
            carts.into_iter().map(CartResponse::from).collect(),
        ))
    }

    async fn find_by_id(&self, cart_id: i32) -> Result<ApiResponse<CartResponse>, ServiceError> {
        info!("🆔 Finding cart by ID: {cart_id}");

        let started = Instant::now();

        let cart = match self.query.find_by_id(cart_id).await {
            Ok(Some(cart)) => cart,
            Ok(None) => {
                info!("❌ Cart not found with ID: {cart_id}");
                self.metrics
                    .record(Method::Get, Status::Error, started.elapsed().as_secs_f64());
                return Err(ServiceError::CartNotFound);
            }
            Err(e) => {
                error!("❌ Database error while finding cart ID {cart_id}: {e:?}");
                self.metrics
                    .record(Method::Get, Status::Error, started.elapsed().as_secs_f64());
                return Err(ServiceError::Repo(e));
            }
        };

        self.metrics
            .record(Method::Get, Status::Success, started.elapsed().as_secs_f64());

        Ok(ApiResponse::new(CartResponse::from(cart)))
    }

    async fn find_by_id_detailed(
        &self,
        cart_id: i32,
    ) -> Result<ApiResponse<CartDetailResponse>, ServiceError> {
        info!("🆔 Finding cart by ID: {cart_id} (with products)");

        let started = Instant::now();

        let cart = match self.query.find_by_id_expanded(cart_id).await {
            Ok(Some(cart)) => cart,
            Ok(None) => {
                info!("❌ Cart not found with ID: {cart_id}");
                self.metrics
                    .record(Method::Get, Status::Error, started.elapsed().as_secs_f64());
                return Err(ServiceError::CartNotFound);
            }
            Err(e) => {
                error!("❌ Database error while finding cart ID {cart_id}: {e:?}");
                self.metrics
                    .record(Method::Get, Status::Error, started.elapsed().as_secs_f64());
                return Err(ServiceError::Repo(e));
            }
        };

        self.metrics
            .record(Method::Get, Status::Success, started.elapsed().as_secs_f64());

        Ok(ApiResponse::new(CartDetailResponse::from(cart)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::service::test_support::{MockCartRepo, MockProductLookup, sample_product};
    use std::sync::Arc;

    fn service(repo: Arc<MockCartRepo>) -> CartQueryService {
        let mut registry = Registry::default();
        CartQueryService::new(repo, &mut registry)
    }

    #[tokio::test]
    async fn find_all_groups_items_per_cart() {
        let products = Arc::new(MockProductLookup::new());
        let repo = Arc::new(MockCartRepo::new(products));
        let first = repo.seed_cart();
        let second = repo.seed_cart();
        repo.seed_item(first, 10, 2);
        repo.seed_item(first, 11, 1);
        repo.seed_item(second, 10, 5);

        let carts = service(repo).find_all().await.unwrap().data;

        assert_eq!(carts.len(), 2);
        assert_eq!(carts[0].products.len(), 2);
        assert_eq!(carts[1].products.len(), 1);
        assert_eq!(carts[1].products[0].quantity, 5);
    }

    #[tokio::test]
    async fn find_by_id_missing_is_cart_not_found() {
        let products = Arc::new(MockProductLookup::new());
        let repo = Arc::new(MockCartRepo::new(products));

        assert!(matches!(
            service(repo).find_by_id(99).await,
            Err(ServiceError::CartNotFound)
        ));
    }

    #[tokio::test]
    async fn detailed_view_embeds_live_products() {
        let products = Arc::new(MockProductLookup::new());
        products.insert(sample_product(10, "A1"));
        let repo = Arc::new(MockCartRepo::new(products));
        let cart_id = repo.seed_cart();
        repo.seed_item(cart_id, 10, 3);

        let cart = service(repo).find_by_id_detailed(cart_id).await.unwrap().data;

        assert_eq!(cart.products.len(), 1);
        let item = &cart.products[0];
        assert_eq!(item.quantity, 3);
        assert_eq!(item.product.as_ref().unwrap().code, "A1");
    }

    #[tokio::test]
    async fn detailed_view_keeps_line_for_deleted_product() {
        let products = Arc::new(MockProductLookup::new());
        let repo = Arc::new(MockCartRepo::new(products));
        let cart_id = repo.seed_cart();
        repo.seed_item(cart_id, 77, 1);

        let cart = service(repo).find_by_id_detailed(cart_id).await.unwrap().data;

        assert_eq!(cart.products.len(), 1);
        assert_eq!(cart.products[0].product_id, 77);
        assert!(cart.products[0].product.is_none());
    }
}
