//! Handlers for the `/products` resource and its variants subresource.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use storefront_core::error::CoreError;
use storefront_core::inventory_import::validate_sku;
use storefront_core::types::DbId;
use storefront_db::models::product::{CreateProduct, Product, UpdateProduct};
use storefront_db::models::variant::{CreateProductVariant, ProductVariant};
use storefront_db::repositories::{ProductRepo, VariantRepo};

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

/// Query parameters for listing products.
#[derive(Debug, Deserialize)]
pub struct ListParams {
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// POST /api/v1/products
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<CreateProduct>,
) -> AppResult<(StatusCode, Json<DataResponse<Product>>)> {
    validate_sku(&input.sku).map_err(AppError::BadRequest)?;

    let product = ProductRepo::create(&state.pool, &input).await?;

    tracing::info!(product_id = product.id, sku = %product.sku, "Product created");

    Ok((StatusCode::CREATED, Json(DataResponse { data: product })))
}

/// GET /api/v1/products
pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> AppResult<Json<DataResponse<Vec<Product>>>> {
    let products = ProductRepo::list(&state.pool, params.limit, params.offset).await?;
    Ok(Json(DataResponse { data: products }))
}

/// GET /api/v1/products/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Product>>> {
    let product = ProductRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Product",
            id,
        }))?;
    Ok(Json(DataResponse { data: product }))
}

/// PUT /api/v1/products/{id}
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateProduct>,
) -> AppResult<Json<DataResponse<Product>>> {
    let product = ProductRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Product",
            id,
        }))?;
    Ok(Json(DataResponse { data: product }))
}

/// DELETE /api/v1/products/{id}
pub async fn delete(State(state): State<AppState>, Path(id): Path<DbId>) -> AppResult<StatusCode> {
    let deleted = ProductRepo::delete(&state.pool, id).await?;
    if deleted {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::NotFound {
            entity: "Product",
            id,
        }))
    }
}

/// POST /api/v1/products/{id}/variants
pub async fn create_variant(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<CreateProductVariant>,
) -> AppResult<(StatusCode, Json<DataResponse<ProductVariant>>)> {
    validate_sku(&input.sku).map_err(AppError::BadRequest)?;

    // The parent must exist; a missing product is a 404, not a FK error.
    ProductRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Product",
            id,
        }))?;

    let variant = VariantRepo::create(&state.pool, id, &input).await?;

    tracing::info!(
        product_id = id,
        variant_id = variant.id,
        sku = %variant.sku,
        "Variant created"
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: variant })))
}

/// GET /api/v1/products/{id}/variants
pub async fn list_variants(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Vec<ProductVariant>>>> {
    ProductRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Product",
            id,
        }))?;

    let variants = VariantRepo::list_by_product(&state.pool, id).await?;
    Ok(Json(DataResponse { data: variants }))
}
