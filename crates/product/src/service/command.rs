use crate::{
    abstract_trait::{
        repository::{DynProductCommandRepository, DynProductQueryRepository},
        service::ProductCommandServiceTrait,
    },
    domain::{
        requests::product::{CreateProductRequest, UpdateProductRequest},
        response::product::ProductResponse,
    },
};
use async_trait::async_trait;
use prometheus_client::registry::Registry;
use shared::{
    domain::responses::ApiResponse,
    errors::{RepositoryError, ServiceError},
    utils::{Method, Metrics, Status},
};
use tokio::time::Instant;
use tracing::{error, info};

#[derive(Clone)]
pub struct ProductCommandService {
    query: DynProductQueryRepository,
    command: DynProductCommandRepository,
    metrics: Metrics,
}

impl ProductCommandService {
    pub fn new(
        query: DynProductQueryRepository,
        command: DynProductCommandRepository,
        registry: &mut Registry,
    ) -> Self {
        let metrics = Metrics::new();
        metrics.register("product_command", registry);

        Self {
            query,
            command,
            metrics,
        }
    }
}

#[async_trait]
impl ProductCommandServiceTrait for ProductCommandService {
    async fn create(
        &self,
        req: &CreateProductRequest,
    ) -> Result<ApiResponse<ProductResponse>, ServiceError> {
        info!("📦 Creating product with code '{}'", req.code);

        let started = Instant::now();

        // Codes are stored case-normalized so 'x1' collides with 'X1'.
        let mut req = req.clone();
        req.code = req.code.trim().to_uppercase();

        if self.query.find_by_code(&req.code, None).await?.is_some() {
            info!("❌ Product code '{}' already exists", req.code);
            self.metrics
                .record(Method::Post, Status::Error, started.elapsed().as_secs_f64());
            return Err(ServiceError::DuplicateCode(req.code));
        }

        let product = self.command.create(&req).await.map_err(|e| {
            self.metrics
                .record(Method::Post, Status::Error, started.elapsed().as_secs_f64());
            match e {
                RepositoryError::AlreadyExists(_) => ServiceError::DuplicateCode(req.code.clone()),
                other => {
                    error!("❌ Failed to create product: {other:?}");
                    ServiceError::Repo(other)
                }
            }
        })?;

        self.metrics
            .record(Method::Post, Status::Success, started.elapsed().as_secs_f64());

        Ok(ApiResponse::with_message(
            "Product created successfully",
            ProductResponse::from(product),
        ))
    }

    async fn update(
        &self,
        id: i32,
        req: &UpdateProductRequest,
    ) -> Result<ApiResponse<ProductResponse>, ServiceError> {
        info!("🔄 Updating product ID {id}");

        if req.is_empty() {
            return Err(ServiceError::Validation(vec![
                "at least one updatable field must be provided".to_string(),
            ]));
        }

        let started = Instant::now();

        let mut req = req.clone();
        if let Some(code) = &req.code {
            let normalized = code.trim().to_uppercase();

            if self
                .query
                .find_by_code(&normalized, Some(id))
                .await?
                .is_some()
            {
                info!("❌ Product code '{normalized}' already taken by another product");
                self.metrics
                    .record(Method::Put, Status::Error, started.elapsed().as_secs_f64());
                return Err(ServiceError::DuplicateCode(normalized));
            }

            req.code = Some(normalized);
        }

        let product = match self.command.update(id, &req).await {
            Ok(Some(product)) => product,
            Ok(None) => {
                info!("❌ Product not found with ID: {id}");
                self.metrics
                    .record(Method::Put, Status::Error, started.elapsed().as_secs_f64());
                return Err(ServiceError::ProductNotFound);
            }
            Err(RepositoryError::AlreadyExists(_)) => {
                self.metrics
                    .record(Method::Put, Status::Error, started.elapsed().as_secs_f64());
                return Err(ServiceError::DuplicateCode(
                    req.code.unwrap_or_default(),
                ));
            }
            Err(e) => {
                error!("❌ Failed to update product ID {id}: {e:?}");
                self.metrics
                    .record(Method::Put, Status::Error, started.elapsed().as_secs_f64());
                return Err(ServiceError::Repo(e));
            }
        };

        self.metrics
            .record(Method::Put, Status::Success, started.elapsed().as_secs_f64());

        Ok(ApiResponse::with_message(
            "Product updated successfully",
            ProductResponse::from(product),
        ))
    }

    async fn delete(&self, id: i32) -> Result<ApiResponse<ProductResponse>, ServiceError> {
        info!("🗑️ Deleting product ID {id}");

        let started = Instant::now();

        let product = match self.command.delete(id).await {
            Ok(Some(product)) => product,
            Ok(None) => {
                info!("❌ Product not found with ID: {id}");
                self.metrics.record(
                    Method::Delete,
                    Status::Error,
                    started.elapsed().as_secs_f64(),
                );
                return Err(ServiceError::ProductNotFound);
            }
            Err(e) => {
                error!("❌ Failed to delete product ID {id}: {e:?}");
                self.metrics.record(
                    Method::Delete,
                    Status::Error,
                    started.elapsed().as_secs_f64(),
                );
                return Err(ServiceError::Repo(e));
            }
        };

        self.metrics.record(
            Method::Delete,
            Status::Success,
            started.elapsed().as_secs_f64(),
        );

        Ok(ApiResponse::with_message(
            "Product deleted successfully",
            ProductResponse::from(product),
        ))
    }
}
