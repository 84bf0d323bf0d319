use crate::{
    abstract_trait::repository::ProductQueryRepositoryTrait,
    domain::requests::product::{FindAllProducts, ProductSort},
    model::product::Product as ProductModel,
};
use async_trait::async_trait;
use shared::{config::ConnectionPool, errors::RepositoryError};
use sqlx::{Postgres, QueryBuilder};
use tracing::{error, info};

const PRODUCT_COLUMNS: &str =
    "product_id, title, description, price, code, stock, category, status, created_at, updated_at";

#[derive(Clone)]
pub struct ProductQueryRepository {
    db: ConnectionPool,
}

impl ProductQueryRepository {
    pub fn new(db: ConnectionPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ProductQueryRepositoryTrait for ProductQueryRepository {
    async fn find_all(
        &self,
        req: &FindAllProducts,
    ) -> Result<(Vec<ProductModel>, i64), RepositoryError> {
        info!(
            "🔍 Fetching products | page: {}, size: {}, category: {:?}, status: {:?}, sort: {:?}",
            req.page, req.page_size, req.category, req.status, req.sort
        );

        let mut conn = self.db.acquire().await.map_err(|e| {
            error!("❌ Failed to acquire DB connection: {:?}", e);
            RepositoryError::from(e)
        })?;

        let mut count_query =
            QueryBuilder::<Postgres>::new("SELECT COUNT(*) FROM products WHERE 1 = 1");
        if let Some(category) = &req.category {
            count_query.push(" AND category = ").push_bind(category);
        }
        if let Some(status) = req.status {
            count_query.push(" AND status = ").push_bind(status);
        }

        let total: i64 = count_query
            .build_query_scalar()
            .fetch_one(&mut *conn)
            .await
            .map_err(|e| {
                error!("❌ Failed to count products: {:?}", e);
                RepositoryError::from(e)
            })?;

        let limit = i64::from(req.page_size);
        let offset = i64::from((req.page - 1).max(0)) * i64::from(req.page_size);

        let mut query = QueryBuilder::<Postgres>::new(format!(
            "SELECT {PRODUCT_COLUMNS} FROM products WHERE 1 = 1"
        ));
        if let Some(category) = &req.category {
            query.push(" AND category = ").push_bind(category);
        }
        if let Some(status) = req.status {
            query.push(" AND status = ").push_bind(status);
        }
        match req.sort {
            Some(ProductSort::Asc) => query.push(" ORDER BY price ASC, product_id ASC"),
            Some(ProductSort::Desc) => query.push(" ORDER BY price DESC, product_id ASC"),
            None => query.push(" ORDER BY product_id ASC"),
        };
        query.push(" LIMIT ").push_bind(limit);
        query.push(" OFFSET ").push_bind(offset);

        let products = query
            .build_query_as::<ProductModel>()
            .fetch_all(&mut *conn)
            .await
            .map_err(|e| {
                error!("❌ Failed to fetch products: {:?}", e);
                RepositoryError::from(e)
            })?;

        Ok((products, total))
    }

    async fn find_unpaged(&self) -> Result<Vec<ProductModel>, RepositoryError> {
        let mut conn = self.db.acquire().await.map_err(RepositoryError::from)?;

        let products = sqlx::query_as::<_, ProductModel>(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM products ORDER BY product_id"
        ))
        .fetch_all(&mut *conn)
        .await
        .map_err(|e| {
            error!("❌ Failed to fetch full product list: {:?}", e);
            RepositoryError::from(e)
        })?;

        Ok(products)
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<ProductModel>, RepositoryError> {
        info!("🆔 Fetching product by ID: {id}");

        let mut conn = self.db.acquire().await.map_err(RepositoryError::from)?;

        let result = sqlx::query_as::<_, ProductModel>(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM products WHERE product_id = $1"
        ))
        .bind(id)
        .fetch_optional(&mut *conn)
        .await
        .map_err(RepositoryError::from)?;

        Ok(result)
    }

    async fn find_by_code(
        &self,
        code: &str,
        exclude_id: Option<i32>,
    ) -> Result<Option<ProductModel>, RepositoryError> {
        let mut conn = self.db.acquire().await.map_err(RepositoryError::from)?;

        let result = sqlx::query_as::<_, ProductModel>(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM products \
             WHERE code = $1 AND ($2::INT4 IS NULL OR product_id <> $2)"
        ))
        .bind(code)
        .bind(exclude_id)
        .fetch_optional(&mut *conn)
        .await
        .map_err(RepositoryError::from)?;

        Ok(result)
    }
}
