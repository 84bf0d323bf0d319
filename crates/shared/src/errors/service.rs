use crate::errors::repository::RepositoryError;
use thiserror::Error;

/// Domain-level failures. Cart mutations deliberately distinguish the missing
/// cart, the missing product and the product-not-a-line-item cases instead of
/// collapsing them into a single not-satisfiable signal.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("Repository error: {0}")]
    Repo(#[from] RepositoryError),

    #[error("Validation failed: {0:?}")]
    Validation(Vec<String>),

    #[error("Invalid id: {0}")]
    InvalidId(String),

    #[error("Product not found")]
    ProductNotFound,

    #[error("Cart not found")]
    CartNotFound,

    #[error("Product is not in the cart")]
    ProductNotInCart,

    #[error("Product code already exists: {0}")]
    DuplicateCode(String),

    #[error("Internal error: {0}")]
    Internal(String),
}
