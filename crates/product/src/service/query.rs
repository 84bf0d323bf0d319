use crate::{
    abstract_trait::{repository::DynProductQueryRepository, service::ProductQueryServiceTrait},
    domain::{
        requests::product::FindAllProducts,
        response::{
            page::{ProductPage, build_page_links},
            product::ProductResponse,
        },
    },
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

const PRODUCTS_BASE_URL: &str = "/api/products";

#[derive(Clone)]
pub struct ProductQueryService {
    query: DynProductQueryRepository,
    metrics: Metrics,
}

impl ProductQueryService {
    pub fn new(query: DynProductQueryRepository, registry: &mut Registry) -> Self {
        let metrics = Metrics::new();
        metrics.register("product_query", registry);

        Self { query, metrics }
    }
}

#[async_trait]
impl ProductQueryServiceTrait for ProductQueryService {
    async fn find_all(
        &self,
        req: &FindAllProducts,
    ) -> Result<ApiResponse<ProductPage>, ServiceError> {
        info!(
            "🔍 Finding products | page: {}, size: {}, category: {:?}, status: {:?}, sort: {:?}",
            req.page, req.page_size, req.category, req.status, req.sort
        );

        if req.page < 1 || req.page_size < 1 {
            return Err(ServiceError::Validation(vec![
                "page and page_size must be >= 1".to_string(),
            ]));
        }

        let started = Instant::now();

        let (products, total) = match self.query.find_all(req).await {
            Ok(res) => res,
            Err(e) => {
                error!("❌ Failed to fetch products: {e:?}");
                self.metrics
                    .record(Method::Get, Status::Error, started.elapsed().as_secs_f64());
                return Err(ServiceError::Repo(e));
            }
        };

        let page_size = i64::from(req.page_size);
        let total_pages = if total == 0 {
            0
        } else {
            (total + page_size - 1) / page_size
        };

        let (prev_link, next_link) = build_page_links(PRODUCTS_BASE_URL, req, total_pages);

        let page = ProductPage {
            items: products.into_iter().map(ProductResponse::from).collect(),
            total_pages,
            page: req.page,
            has_prev: req.page > 1,
            has_next: i64::from(req.page) < total_pages,
            prev_link,
            next_link,
        };

        self.metrics
            .record(Method::Get, Status::Success, started.elapsed().as_secs_f64());

        info!(
            "✅ Found {} products (total: {total}, pages: {total_pages})",
            page.items.len()
        );

        Ok(ApiResponse::new(page))
    }

    async fn find_by_id(&self, id: i32) -> Result<ApiResponse<ProductResponse>, ServiceError> {
        info!("🆔 Finding product by ID: {id}");

        let started = Instant::now();

        let product = match self.query.find_by_id(id).await {
            Ok(Some(product)) => product,
            Ok(None) => {
                info!("❌ Product not found with ID: {id}");
                self.metrics
                    .record(Method::Get, Status::Error, started.elapsed().as_secs_f64());
                return Err(ServiceError::ProductNotFound);
            }
            Err(e) => {
                error!("❌ Database error while finding product ID {id}: {e:?}");
                self.metrics
                    .record(Method::Get, Status::Error, started.elapsed().as_secs_f64());
                return Err(ServiceError::Repo(e));
            }
        };

        self.metrics
            .record(Method::Get, Status::Success, started.elapsed().as_secs_f64());

        Ok(ApiResponse::new(ProductResponse::from(product)))
    }

    async fn list_all(&self) -> Result<Vec<ProductResponse>, ServiceError> {
        let products = self.query.find_unpaged().await.map_err(|e| {
            error!("❌ Failed to fetch full product list: {e:?}");
            ServiceError::Repo(e)
        })?;

        Ok(products.into_iter().map(ProductResponse::from).collect())
    }
}
