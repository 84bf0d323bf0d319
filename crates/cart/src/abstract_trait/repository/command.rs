use std::sync::Arc;

use async_trait::async_trait;
use shared::errors::RepositoryError;

use crate::domain::requests::cart::CartItemRequest;
use crate::model::cart::Cart;

pub type DynCartCommandRepository = Arc<dyn CartCommandRepositoryTrait + Send + Sync>;

#[async_trait]
pub trait CartCommandRepositoryTrait {
    async fn create(&self) -> Result<Cart, RepositoryError>;

    /// Bumps the quantity of an existing line item by one, or inserts a new
    /// line item with quantity 1 when none matches.
    async fn increment_or_insert_item(
        &self,
        cart_id: i32,
        product_id: i32,
    ) -> Result<(), RepositoryError>;

    /// Returns the number of line items deleted (0 when the product was not
    /// in the cart).
    async fn remove_item(&self, cart_id: i32, product_id: i32) -> Result<u64, RepositoryError>;

    /// Atomically swaps the cart's line items for the given list.
    async fn replace_items(
        &self,
        cart_id: i32,
        items: &[CartItemRequest],
    ) -> Result<(), RepositoryError>;

    /// Returns the number of line items updated (0 when the product was not
    /// in the cart).
    async fn set_quantity(
        &self,
        cart_id: i32,
        product_id: i32,
        quantity: i32,
    ) -> Result<u64, RepositoryError>;

    async fn clear(&self, cart_id: i32) -> Result<(), RepositoryError>;
}
