use crate::domain::requests::product::FindAllProducts;
use crate::domain::response::product::ProductResponse;
use serde::{Deserialize, Serialize};
use url::form_urlencoded;
use utoipa::ToSchema;

/// One page of the product listing:
/// `{items, totalPages, page, hasPrev, hasNext, prevLink, nextLink}`.
#[derive(Debug, Serialize, Deserialize, ToSchema, Clone)]
#[serde(rename_all = "camelCase")]
pub struct ProductPage {
    pub items: Vec<ProductResponse>,
    pub total_pages: i64,
    pub page: i32,
    pub has_prev: bool,
    pub has_next: bool,
    pub prev_link: Option<String>,
    pub next_link: Option<String>,
}

fn serialize_params(req: &FindAllProducts, page: i32) -> String {
    let mut params = form_urlencoded::Serializer::new(String::new());

    // Defaults are left out so links stay minimal.
    if req.page_size != 10 {
        params.append_pair("page_size", &req.page_size.to_string());
    }
    if let Some(sort) = req.sort {
        params.append_pair("sort", sort.as_str());
    }
    if let Some(category) = &req.category {
        params.append_pair("category", category);
    }
    if let Some(status) = req.status {
        params.append_pair("status", if status { "true" } else { "false" });
    }
    params.append_pair("page", &page.to_string());

    params.finish()
}

/// Links to the adjacent pages, `None` when no such page exists.
pub fn build_page_links(
    base_url: &str,
    req: &FindAllProducts,
    total_pages: i64,
) -> (Option<String>, Option<String>) {
    let page = i64::from(req.page);

    let prev_link = (page > 1 && page <= total_pages)
        .then(|| format!("{base_url}?{}", serialize_params(req, req.page - 1)));

    let next_link =
        (page < total_pages).then(|| format!("{base_url}?{}", serialize_params(req, req.page + 1)));

    (prev_link, next_link)
}
