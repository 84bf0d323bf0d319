use product::domain::response::product::ProductResponse;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::model::cart::{
    Cart, CartItem, CartItemExpanded, CartWithItems, CartWithItemsExpanded,
};

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CartItemResponse {
    pub product_id: i32,
    pub quantity: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CartResponse {
    pub id: i32,
    pub products: Vec<CartItemResponse>,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

/// Line item with the referenced product embedded. `product` is null when
/// the product was deleted after being added to the cart.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CartItemDetailResponse {
    pub product_id: i32,
    pub quantity: i32,
    pub product: Option<ProductResponse>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CartDetailResponse {
    pub id: i32,
    pub products: Vec<CartItemDetailResponse>,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

impl From<&CartItem> for CartItemResponse {
    fn from(item: &CartItem) -> Self {
        CartItemResponse {
            product_id: item.product_id,
            quantity: item.quantity,
        }
    }
}

impl From<CartWithItems> for CartResponse {
    fn from(value: CartWithItems) -> Self {
        CartResponse {
            id: value.cart.cart_id,
            products: value.items.iter().map(CartItemResponse::from).collect(),
            created_at: value.cart.created_at.map(|dt| dt.to_string()),
            updated_at: value.cart.updated_at.map(|dt| dt.to_string()),
        }
    }
}

impl From<&CartItemExpanded> for CartItemDetailResponse {
    fn from(item: &CartItemExpanded) -> Self {
        let product = match (
            item.p_product_id,
            &item.p_title,
            &item.p_description,
            item.p_price,
            &item.p_code,
            item.p_stock,
            &item.p_category,
            item.p_status,
        ) {
            (
                Some(id),
                Some(title),
                Some(description),
                Some(price),
                Some(code),
                Some(stock),
                Some(category),
                Some(status),
            ) => Some(ProductResponse {
                id,
                title: title.clone(),
                description: description.clone(),
                price,
                code: code.clone(),
                stock,
                category: category.clone(),
                status,
                created_at: item.p_created_at.map(|dt| dt.to_string()),
                updated_at: item.p_updated_at.map(|dt| dt.to_string()),
            }),
            _ => None,
        };

        CartItemDetailResponse {
            product_id: item.product_id,
            quantity: item.quantity,
            product,
        }
    }
}

impl From<CartWithItemsExpanded> for CartDetailResponse {
    fn from(value: CartWithItemsExpanded) -> Self {
        CartDetailResponse {
            id: value.cart.cart_id,
            products: value
                .items
                .iter()
                .map(CartItemDetailResponse::from)
                .collect(),
            created_at: value.cart.created_at.map(|dt| dt.to_string()),
            updated_at: value.cart.updated_at.map(|dt| dt.to_string()),
        }
    }
}

impl From<Cart> for CartResponse {
    fn from(cart: Cart) -> Self {
        CartResponse {
            id: cart.cart_id,
            products: Vec::new(),
            created_at: cart.created_at.map(|dt| dt.to_string()),
            updated_at: cart.updated_at.map(|dt| dt.to_string()),
        }
    }
}
