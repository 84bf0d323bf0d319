use std::sync::Arc;

use async_trait::async_trait;
use shared::domain::responses::ApiResponse;
use shared::errors::ServiceError;

use crate::domain::response::cart::{CartDetailResponse, CartResponse};

pub type DynCartQueryService = Arc<dyn CartQueryServiceTrait + Send + Sync>;

#[async_trait]
pub trait CartQueryServiceTrait {
    async fn find_all(&self) -> Result<ApiResponse<Vec<CartResponse>>, ServiceError>;
    async fn find_by_id(&self, cart_id: i32) -> Result<ApiResponse<CartResponse>, ServiceError>;
    async fn find_by_id_detailed(
        &self,
        cart_id: i32,
    ) -> Result<ApiResponse<CartDetailResponse>, ServiceError>;
}
