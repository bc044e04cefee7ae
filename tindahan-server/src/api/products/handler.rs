//! Product API Handlers

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use validator::Validate;

use crate::api::owner_store;
use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::models::{Product, ProductCreate, ProductUpdate};
use crate::db::repository::{ProductRepository, parse_record_id};
use crate::utils::{AppError, AppResponse, AppResult, ok_with_message};

/// GET /api/products - 店铺的全部在售商品
pub async fn list(
    State(state): State<ServerState>,
    user: CurrentUser,
) -> AppResult<Json<Vec<Product>>> {
    let (_, store_id) = owner_store(&state, &user).await?;

    let products = ProductRepository::new(state.db.clone())
        .find_all(&store_id)
        .await?;
    Ok(Json(products))
}

/// GET /api/products/{id} - 获取单个商品
pub async fn get_by_id(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<String>,
) -> AppResult<Json<Product>> {
    let (_, store_id) = owner_store(&state, &user).await?;

    let rid = parse_record_id("product", &id)?;
    let product = ProductRepository::new(state.db.clone())
        .find_by_id(&rid)
        .await?
        .filter(|p| p.store == store_id)
        .ok_or_else(|| AppError::not_found(format!("Product {} not found", id)))?;
    Ok(Json(product))
}

/// POST /api/products - 创建商品
pub async fn create(
    State(state): State<ServerState>,
    user: CurrentUser,
    Json(payload): Json<ProductCreate>,
) -> AppResult<(StatusCode, Json<Product>)> {
    payload
        .validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    let (_, store_id) = owner_store(&state, &user).await?;

    let product = ProductRepository::new(state.db.clone())
        .create(&store_id, payload)
        .await?;

    tracing::info!(product = %product.product_name, "Product created");
    Ok((StatusCode::CREATED, Json(product)))
}

/// PUT /api/products/{id} - 更新商品
pub async fn update(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<String>,
    Json(payload): Json<ProductUpdate>,
) -> AppResult<Json<Product>> {
    payload
        .validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    let (_, store_id) = owner_store(&state, &user).await?;

    let repo = ProductRepository::new(state.db.clone());
    let rid = parse_record_id("product", &id)?;
    repo.find_by_id(&rid)
        .await?
        .filter(|p| p.store == store_id && !p.is_delete)
        .ok_or_else(|| AppError::not_found(format!("Product {} not found", id)))?;

    let product = repo.update(&rid, payload).await?;
    Ok(Json(product))
}

/// DELETE /api/products/{id} - 软删除商品
pub async fn delete(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<String>,
) -> AppResult<Json<AppResponse<()>>> {
    let (_, store_id) = owner_store(&state, &user).await?;

    let repo = ProductRepository::new(state.db.clone());
    let rid = parse_record_id("product", &id)?;
    repo.find_by_id(&rid)
        .await?
        .filter(|p| p.store == store_id && !p.is_delete)
        .ok_or_else(|| AppError::not_found(format!("Product {} not found", id)))?;

    repo.soft_delete(&rid).await?;

    tracing::info!(product = %rid, "Product deleted");
    Ok(ok_with_message((), "Product deleted"))
}
