use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Serialize, Deserialize, Validate, Clone, ToSchema)]
pub struct CartItemRequest {
    #[validate(range(min = 1))]
    pub product_id: i32,

    #[validate(range(min = 1))]
    pub quantity: i32,
}

/// Replaces the whole line-item list. Duplicate product references are kept
/// as-is, not merged.
#[derive(Debug, Serialize, Deserialize, Validate, Clone, ToSchema)]
pub struct ReplaceCartItemsRequest {
    #[validate(nested)]
    pub products: Vec<CartItemRequest>,
}

#[derive(Debug, Serialize, Deserialize, Validate, Clone, ToSchema)]
pub struct UpdateQuantityRequest {
    #[validate(range(min = 1))]
    pub quantity: i32,
}
