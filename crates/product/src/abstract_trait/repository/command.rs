use crate::{
    domain::requests::product::{CreateProductRequest, UpdateProductRequest},
    model::product::Product,
};
use async_trait::async_trait;
use shared::errors::RepositoryError;
use std::sync::Arc;

pub type DynProductCommandRepository = Arc<dyn ProductCommandRepositoryTrait + Send + Sync>;

#[async_trait]
pub trait ProductCommandRepositoryTrait {
    async fn create(&self, req: &CreateProductRequest) -> Result<Product, RepositoryError>;

    /// Partial update; `None` when the record does not exist.
    async fn update(
        &self,
        id: i32,
        req: &UpdateProductRequest,
    ) -> Result<Option<Product>, RepositoryError>;

    /// Permanent delete, returning the removed record.
    async fn delete(&self, id: i32) -> Result<Option<Product>, RepositoryError>;
}
