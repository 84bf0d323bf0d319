use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Cart {
    pub cart_id: i32,
    pub created_at: Option<NaiveDateTime>,
    pub updated_at: Option<NaiveDateTime>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct CartItem {
    pub cart_item_id: i32,
    pub cart_id: i32,
    pub product_id: i32,
    pub quantity: i32,
}

/// Line item joined against the products table; the product columns are all
/// optional because the referenced product may have been deleted since it was
/// added to the cart.
#[derive(Debug, Clone, FromRow)]
pub struct CartItemExpanded {
    pub cart_item_id: i32,
    pub cart_id: i32,
    pub product_id: i32,
    pub quantity: i32,
    pub p_product_id: Option<i32>,
    pub p_title: Option<String>,
    pub p_description: Option<String>,
    pub p_price: Option<f64>,
    pub p_code: Option<String>,
    pub p_stock: Option<i32>,
    pub p_category: Option<String>,
    pub p_status: Option<bool>,
    pub p_created_at: Option<NaiveDateTime>,
    pub p_updated_at: Option<NaiveDateTime>,
}

#[derive(Debug, Clone)]
pub struct CartWithItems {
    pub cart: Cart,
    pub items: Vec<CartItem>,
}

#[derive(Debug, Clone)]
pub struct CartWithItemsExpanded {
    pub cart: Cart,
    pub items: Vec<CartItemExpanded>,
}
