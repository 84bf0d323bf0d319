use crate::domain::{
    requests::product::FindAllProducts,
    response::{page::ProductPage, product::ProductResponse},
};
use async_trait::async_trait;
use shared::{domain::responses::ApiResponse, errors::ServiceError};
use std::sync::Arc;

pub type DynProductQueryService = Arc<dyn ProductQueryServiceTrait + Send + Sync>;

#[async_trait]
pub trait ProductQueryServiceTrait {
    async fn find_all(
        &self,
        req: &FindAllProducts,
    ) -> Result<ApiResponse<ProductPage>, ServiceError>;

    async fn find_by_id(&self, id: i32) -> Result<ApiResponse<ProductResponse>, ServiceError>;

    /// Full product list for the realtime channel, no envelope.
    async fn list_all(&self) -> Result<Vec<ProductResponse>, ServiceError>;
}
