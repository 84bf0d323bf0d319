use crate::{
    abstract_trait::repository::ProductCommandRepositoryTrait,
    domain::requests::product::{CreateProductRequest, UpdateProductRequest},
    model::product::Product as ProductModel,
};
use async_trait::async_trait;
use shared::{config::ConnectionPool, errors::RepositoryError};
use tracing::{error, info};

const PRODUCT_COLUMNS: &str =
    "product_id, title, description, price, code, stock, category, status, created_at, updated_at";

#[derive(Clone)]
pub struct ProductCommandRepository {
    db: ConnectionPool,
}

impl ProductCommandRepository {
    pub fn new(db: ConnectionPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ProductCommandRepositoryTrait for ProductCommandRepository {
    async fn create(&self, req: &CreateProductRequest) -> Result<ProductModel, RepositoryError> {
        let mut conn = self.db.acquire().await.map_err(RepositoryError::from)?;

        // New products always start active; the unique index on `code` backs
        // up the service-level duplicate check under concurrency.
        let product = sqlx::query_as::<_, ProductModel>(&format!(
            "INSERT INTO products (title, description, price, code, stock, category, status, created_at, updated_at) \
             VALUES ($1, $2, $3, $4, $5, $6, true, current_timestamp, current_timestamp) \
             RETURNING {PRODUCT_COLUMNS}"
        ))
        .bind(&req.title)
        .bind(&req.description)
        .bind(req.price)
        .bind(&req.code)
        .bind(req.stock)
        .bind(&req.category)
        .fetch_one(&mut *conn)
        .await
        .map_err(|e| {
            error!("❌ Failed to create product '{}': {:?}", req.title, e);
            RepositoryError::from_sqlx_unique(
                e,
                format!("Product code '{}' already exists", req.code),
            )
        })?;

        info!(
            "✅ Created product ID {} with code '{}'",
            product.product_id, product.code
        );
        Ok(product)
    }

    async fn update(
        &self,
        id: i32,
        req: &UpdateProductRequest,
    ) -> Result<Option<ProductModel>, RepositoryError> {
        let mut conn = self.db.acquire().await.map_err(RepositoryError::from)?;

        let product = sqlx::query_as::<_, ProductModel>(&format!(
            "UPDATE products SET \
                title       = COALESCE($2, title), \
                description = COALESCE($3, description), \
                price       = COALESCE($4, price), \
                code        = COALESCE($5, code), \
                stock       = COALESCE($6, stock), \
                category    = COALESCE($7, category), \
                status      = COALESCE($8, status), \
                updated_at  = current_timestamp \
             WHERE product_id = $1 \
             RETURNING {PRODUCT_COLUMNS}"
        ))
        .bind(id)
        .bind(&req.title)
        .bind(&req.description)
        .bind(req.price)
        .bind(&req.code)
        .bind(req.stock)
        .bind(&req.category)
        .bind(req.status)
        .fetch_optional(&mut *conn)
        .await
        .map_err(|e| {
            error!("❌ Failed to update product ID {id}: {:?}", e);
            RepositoryError::from_sqlx_unique(
                e,
                format!(
                    "Product code '{}' already exists",
                    req.code.as_deref().unwrap_or_default()
                ),
            )
        })?;

        if product.is_some() {
            info!("🔄 Updated product ID {id}");
        }
        Ok(product)
    }

    async fn delete(&self, id: i32) -> Result<Option<ProductModel>, RepositoryError> {
        info!("❌ Hard deleting product: {id}");

        let mut conn = self.db.acquire().await.map_err(RepositoryError::from)?;

        let product = sqlx::query_as::<_, ProductModel>(&format!(
            "DELETE FROM products WHERE product_id = $1 RETURNING {PRODUCT_COLUMNS}"
        ))
        .bind(id)
        .fetch_optional(&mut *conn)
        .await
        .map_err(|e| {
            error!("❌ Failed to delete product {id}: {:?}", e);
            RepositoryError::from(e)
        })?;

        Ok(product)
    }
}
