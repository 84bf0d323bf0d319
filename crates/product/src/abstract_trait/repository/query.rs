use crate::{domain::requests::product::FindAllProducts, model::product::Product};
use async_trait::async_trait;
use shared::errors::RepositoryError;
use std::sync::Arc;

pub type DynProductQueryRepository = Arc<dyn ProductQueryRepositoryTrait + Send + Sync>;

#[async_trait]
pub trait ProductQueryRepositoryTrait {
    /// Filtered, sorted, paginated listing plus the total match count.
    async fn find_all(&self, req: &FindAllProducts)
    -> Result<(Vec<Product>, i64), RepositoryError>;

    /// Full unpaginated listing, used by the realtime channel.
    async fn find_unpaged(&self) -> Result<Vec<Product>, RepositoryError>;

    async fn find_by_id(&self, id: i32) -> Result<Option<Product>, RepositoryError>;

    /// Lookup by normalized code, optionally excluding one record (update path).
    async fn find_by_code(
        &self,
        code: &str,
        exclude_id: Option<i32>,
    ) -> Result<Option<Product>, RepositoryError>;
}
