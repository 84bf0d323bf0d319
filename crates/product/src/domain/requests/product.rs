use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

#[derive(Debug, Serialize, Deserialize, ToSchema, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ProductSort {
    Asc,
    Desc,
}

impl ProductSort {
    pub fn as_str(self) -> &'static str {
        match self {
            ProductSort::Asc => "asc",
            ProductSort::Desc => "desc",
        }
    }
}

fn default_page() -> i32 {
    1
}

fn default_page_size() -> i32 {
    10
}

#[derive(Debug, Serialize, Deserialize, Validate, Clone, IntoParams)]
pub struct FindAllProducts {
    #[validate(range(min = 1))]
    #[serde(default = "default_page")]
    pub page: i32,

    #[validate(range(min = 1, max = 100))]
    #[serde(default = "default_page_size", rename = "page_size")]
    pub page_size: i32,

    /// Price ordering, `asc` or `desc`; unsorted when absent.
    pub sort: Option<ProductSort>,

    /// Exact category match.
    pub category: Option<String>,

    pub status: Option<bool>,
}

impl Default for FindAllProducts {
    fn default() -> Self {
        Self {
            page: default_page(),
            page_size: default_page_size(),
            sort: None,
            category: None,
            status: None,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Validate, Clone, ToSchema)]
pub struct CreateProductRequest {
    #[validate(length(min = 1))]
    pub title: String,

    #[validate(length(min = 1))]
    pub description: String,

    #[validate(range(exclusive_min = 0.0))]
    pub price: f64,

    #[validate(length(min = 1))]
    pub code: String,

    #[validate(range(min = 0))]
    pub stock: i32,

    #[validate(length(min = 1))]
    pub category: String,
}

/// Partial update; the field set doubles as the allow-list, any other key is
/// rejected by serde.
#[derive(Debug, Serialize, Deserialize, Validate, Clone, Default, ToSchema)]
#[serde(deny_unknown_fields)]
pub struct UpdateProductRequest {
    #[validate(length(min = 1))]
    pub title: Option<String>,

    #[validate(length(min = 1))]
    pub description: Option<String>,

    #[validate(range(exclusive_min = 0.0))]
    pub price: Option<f64>,

    #[validate(length(min = 1))]
    pub code: Option<String>,

    #[validate(range(min = 0))]
    pub stock: Option<i32>,

    #[validate(length(min = 1))]
    pub category: Option<String>,

    pub status: Option<bool>,
}

impl UpdateProductRequest {
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.price.is_none()
            && self.code.is_none()
            && self.stock.is_none()
            && self.category.is_none()
            && self.status.is_none()
    }
}
