use std::sync::Arc;

use async_trait::async_trait;
use shared::domain::responses::ApiResponse;
use shared::errors::ServiceError;

use crate::domain::requests::cart::ReplaceCartItemsRequest;
use crate::domain::response::cart::CartResponse;

pub type DynCartCommandService = Arc<dyn CartCommandServiceTrait + Send + Sync>;

#[async_trait]
pub trait CartCommandServiceTrait {
    async fn create(&self) -> Result<ApiResponse<CartResponse>, ServiceError>;
    async fn add_product(
        &self,
        cart_id: i32,
        product_id: i32,
    ) -> Result<ApiResponse<CartResponse>, ServiceError>;
    async fn remove_product(
        &self,
        cart_id: i32,
        product_id: i32,
    ) -> Result<ApiResponse<CartResponse>, ServiceError>;
    async fn replace_products(
        &self,
        cart_id: i32,
        req: &ReplaceCartItemsRequest,
    ) -> Result<ApiResponse<CartResponse>, ServiceError>;
    async fn set_quantity(
        &self,
        cart_id: i32,
        product_id: i32,
        quantity: i32,
    ) -> Result<ApiResponse<CartResponse>, ServiceError>;
    async fn clear(&self, cart_id: i32) -> Result<ApiResponse<CartResponse>, ServiceError>;
}
