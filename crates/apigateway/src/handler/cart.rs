use crate::{middleware::validate::SimpleValidatedJson, state::AppState};
use axum::{
    Json,
    extract::{Extension, Path, Query},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{delete, get, post, put},
};
use cart::{
    abstract_trait::service::{DynCartCommandService, DynCartQueryService},
    domain::{
        requests::cart::{ReplaceCartItemsRequest, UpdateQuantityRequest},
        response::cart::{CartDetailResponse, CartResponse},
    },
};
use serde::Deserialize;
use shared::{domain::responses::ApiResponse, errors::HttpError};
use std::sync::Arc;
use utoipa::IntoParams;
use utoipa_axum::router::OpenApiRouter;

use super::parse_id;

fn default_expand() -> bool {
    true
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct CartViewParams {
    /// Embed full product records in each line item. Defaults to true.
    #[serde(default = "default_expand")]
    pub expand: bool,
}

#[utoipa::path(
    get,
    path = "/api/carts",
    tag = "Cart",
    responses(
        (status = 200, description = "All carts", body = ApiResponse<Vec<CartResponse>>),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn get_carts(
    Extension(service): Extension<DynCartQueryService>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.find_all().await?;
    Ok((StatusCode::OK, Json(response)))
}

#[utoipa::path(
    get,
    path = "/api/carts/{id}",
    tag = "Cart",
    params(("id" = i32, Path, description = "Cart ID"), CartViewParams),
    responses(
        (status = 200, description = "Cart contents", body = ApiResponse<CartDetailResponse>),
        (status = 400, description = "Invalid id"),
        (status = 404, description = "Cart not found")
    )
)]
pub async fn get_cart(
    Extension(service): Extension<DynCartQueryService>,
    Path(id): Path<String>,
    Query(params): Query<CartViewParams>,
) -> Result<Response, HttpError> {
    let id = parse_id(&id)?;

    if params.expand {
        let response = service.find_by_id_detailed(id).await?;
        Ok((StatusCode::OK, Json(response)).into_response())
    } else {
        let response = service.find_by_id(id).await?;
        Ok((StatusCode::OK, Json(response)).into_response())
    }
}

#[utoipa::path(
    post,
    path = "/api/carts",
    tag = "Cart",
    responses(
        (status = 201, description = "Empty cart created", body = ApiResponse<CartResponse>),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn create_cart(
    Extension(service): Extension<DynCartCommandService>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.create().await?;
    Ok((StatusCode::CREATED, Json(response)))
}

#[utoipa::path(
    post,
    path = "/api/carts/{id}/product/{product_id}",
    tag = "Cart",
    params(
        ("id" = i32, Path, description = "Cart ID"),
        ("product_id" = i32, Path, description = "Product ID")
    ),
    responses(
        (status = 200, description = "Product added or its quantity bumped", body = ApiResponse<CartResponse>),
        (status = 400, description = "Invalid id"),
        (status = 404, description = "Cart or product not found")
    )
)]
pub async fn add_product_to_cart(
    Extension(service): Extension<DynCartCommandService>,
    Path((id, product_id)): Path<(String, String)>,
) -> Result<impl IntoResponse, HttpError> {
    let id = parse_id(&id)?;
    let product_id = parse_id(&product_id)?;

    let response = service.add_product(id, product_id).await?;
    Ok((StatusCode::OK, Json(response)))
}

#[utoipa::path(
    put,
    path = "/api/carts/{id}",
    tag = "Cart",
    params(("id" = i32, Path, description = "Cart ID")),
    request_body = ReplaceCartItemsRequest,
    responses(
        (status = 200, description = "Cart contents replaced", body = ApiResponse<CartResponse>),
        (status = 400, description = "Invalid id or item list"),
        (status = 404, description = "Cart or product not found")
    )
)]
pub async fn replace_cart_products(
    Extension(service): Extension<DynCartCommandService>,
    Path(id): Path<String>,
    SimpleValidatedJson(body): SimpleValidatedJson<ReplaceCartItemsRequest>,
) -> Result<impl IntoResponse, HttpError> {
    let id = parse_id(&id)?;

    let response = service.replace_products(id, &body).await?;
    Ok((StatusCode::OK, Json(response)))
}

#[utoipa::path(
    put,
    path = "/api/carts/{id}/products/{product_id}",
    tag = "Cart",
    params(
        ("id" = i32, Path, description = "Cart ID"),
        ("product_id" = i32, Path, description = "Product ID")
    ),
    request_body = UpdateQuantityRequest,
    responses(
        (status = 200, description = "Line item quantity updated", body = ApiResponse<CartResponse>),
        (status = 400, description = "Invalid id or quantity"),
        (status = 404, description = "Cart not found or product not in cart")
    )
)]
pub async fn set_cart_quantity(
    Extension(service): Extension<DynCartCommandService>,
    Path((id, product_id)): Path<(String, String)>,
    SimpleValidatedJson(body): SimpleValidatedJson<UpdateQuantityRequest>,
) -> Result<impl IntoResponse, HttpError> {
    let id = parse_id(&id)?;
    let product_id = parse_id(&product_id)?;

    let response = service.set_quantity(id, product_id, body.quantity).await?;
    Ok((StatusCode::OK, Json(response)))
}

#[utoipa::path(
    delete,
    path = "/api/carts/{id}/products/{product_id}",
    tag = "Cart",
    params(
        ("id" = i32, Path, description = "Cart ID"),
        ("product_id" = i32, Path, description = "Product ID")
    ),
    responses(
        (status = 200, description = "Line item removed", body = ApiResponse<CartResponse>),
        (status = 400, description = "Invalid id"),
        (status = 404, description = "Cart not found or product not in cart")
    )
)]
pub async fn remove_product_from_cart(
    Extension(service): Extension<DynCartCommandService>,
    Path((id, product_id)): Path<(String, String)>,
) -> Result<impl IntoResponse, HttpError> {
    let id = parse_id(&id)?;
    let product_id = parse_id(&product_id)?;

    let response = service.remove_product(id, product_id).await?;
    Ok((StatusCode::OK, Json(response)))
}

#[utoipa::path(
    delete,
    path = "/api/carts/{id}",
    tag = "Cart",
    params(("id" = i32, Path, description = "Cart ID")),
    responses(
        (status = 200, description = "Cart emptied", body = ApiResponse<CartResponse>),
        (status = 400, description = "Invalid id"),
        (status = 404, description = "Cart not found")
    )
)]
pub async fn clear_cart(
    Extension(service): Extension<DynCartCommandService>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, HttpError> {
    let id = parse_id(&id)?;

    let response = service.clear(id).await?;
    Ok((StatusCode::OK, Json(response)))
}

pub fn cart_routes(app_state: Arc<AppState>) -> OpenApiRouter {
    OpenApiRouter::new()
        .route("/api/carts", get(get_carts))
        .route("/api/carts", post(create_cart))
        .route("/api/carts/{id}", get(get_cart))
        .route("/api/carts/{id}", put(replace_cart_products))
        .route("/api/carts/{id}", delete(clear_cart))
        .route("/api/carts/{id}/product/{product_id}", post(add_product_to_cart))
        .route("/api/carts/{id}/products/{product_id}", put(set_cart_quantity))
        .route(
            "/api/carts/{id}/products/{product_id}",
            delete(remove_product_from_cart),
        )
        .layer(Extension(app_state.di_container.cart_query.clone()))
        .layer(Extension(app_state.di_container.cart_command.clone()))
}
