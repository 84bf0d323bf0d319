use std::sync::Arc;

use async_trait::async_trait;
use shared::errors::RepositoryError;

use crate::model::cart::{CartWithItems, CartWithItemsExpanded};

pub type DynCartQueryRepository = Arc<dyn CartQueryRepositoryTrait + Send + Sync>;

#[async_trait]
pub trait CartQueryRepositoryTrait {
    async fn find_all(&self) -> Result<Vec<CartWithItems>, RepositoryError>;
    async fn find_by_id(&self, cart_id: i32) -> Result<Option<CartWithItems>, RepositoryError>;
    async fn find_by_id_expanded(
        &self,
        cart_id: i32,
    ) -> Result<Option<CartWithItemsExpanded>, RepositoryError>;
    async fn exists(&self, cart_id: i32) -> Result<bool, RepositoryError>;
}
