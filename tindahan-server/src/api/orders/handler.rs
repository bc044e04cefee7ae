//! Order API Handlers
//!
//! 下单路径分两段：handler 先做无副作用的前置校验 (商品存在、店铺归属、
//! 库存充足、总额核对)，全部通过后才进入
//! [`OrderRepository::create_with_ledger`] 的原子事务 — 事务内以当时
//! 库存为准重新校验，任何一行失败整单回滚。

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use chrono::Utc;
use surrealdb::RecordId;
use validator::Validate;

use crate::api::owner_store;
use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::models::{Order, OrderCreate, OrderType};
use crate::db::repository::{
    OrderRepository, ProductRepository, RepoError, parse_record_id, user_record_id,
};
use crate::money;
use crate::utils::{AppError, AppResponse, AppResult, ok_with_message};

/// 订单列表响应
#[derive(Debug, serde::Serialize)]
pub struct OrderListResponse {
    pub orders: Vec<Order>,
    #[serde(rename = "totalOrderPrice")]
    pub total_order_price: f64,
}

/// POST /api/orders - 下单
pub async fn create(
    State(state): State<ServerState>,
    user: CurrentUser,
    Json(payload): Json<OrderCreate>,
) -> AppResult<(StatusCode, Json<Order>)> {
    payload
        .validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    // 客户信息只属于线上订单
    if payload.order_type == OrderType::WalkIn && payload.order_online_details.is_some() {
        return Err(AppError::validation(
            "Customer details are only allowed for online orders",
        ));
    }

    let (_, store_id) = owner_store(&state, &user).await?;

    // 前置校验 — 检测到任何问题都在落库之前中止，无副作用
    let product_repo = ProductRepository::new(state.db.clone());
    let mut lines: Vec<(RecordId, i64)> = Vec::with_capacity(payload.order_items.len());
    let mut price_lines: Vec<(i64, f64)> = Vec::with_capacity(payload.order_items.len());

    for line in &payload.order_items {
        let rid = parse_record_id("product", &line.product)?;
        let product = product_repo
            .find_by_id(&rid)
            .await?
            .filter(|p| !p.is_delete && p.store == store_id)
            .ok_or_else(|| AppError::ProductNotFound(rid.to_string()))?;

        if product.quantity < line.quantity {
            return Err(AppError::InsufficientStock(rid.to_string()));
        }

        price_lines.push((line.quantity, product.price));
        lines.push((rid, line.quantity));
    }

    if !money::order_total_matches(&price_lines, payload.order_total) {
        return Err(AppError::validation(
            "order_total does not match the line totals",
        ));
    }

    let order = OrderRepository::new(state.db.clone())
        .create_with_ledger(
            &store_id,
            &user_record_id(&user.id),
            &lines,
            payload.order_type,
            payload.order_online_details,
            Utc::now().timestamp_millis(),
        )
        .await?;

    tracing::info!(
        order = %order.id.as_ref().map(|id| id.to_string()).unwrap_or_default(),
        total = order.order_total,
        "Order created"
    );
    Ok((StatusCode::CREATED, Json(order)))
}

/// GET /api/orders - 订单列表 + 累计销售额
pub async fn list(
    State(state): State<ServerState>,
    user: CurrentUser,
) -> AppResult<Json<OrderListResponse>> {
    let (_, store_id) = owner_store(&state, &user).await?;

    let repo = OrderRepository::new(state.db.clone());
    let orders = repo.find_all(&store_id).await?;
    let total_order_price = repo.total_sales(&store_id).await?;

    Ok(Json(OrderListResponse {
        orders,
        total_order_price,
    }))
}

/// GET /api/orders/{id} - 获取单个订单
pub async fn get_by_id(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<String>,
) -> AppResult<Json<Order>> {
    let (_, store_id) = owner_store(&state, &user).await?;

    let rid = parse_record_id("order", &id)?;
    let order = OrderRepository::new(state.db.clone())
        .find_by_id(&rid)
        .await?
        .filter(|o| o.store == store_id)
        .ok_or_else(|| AppError::not_found(format!("Order {} not found", id)))?;
    Ok(Json(order))
}

/// DELETE /api/orders/{id} - 成对删除订单与其流水
///
/// 订单与流水都必须存在；流水缺失说明账本配对被破坏 —
/// 记录 error 日志并按契约回 404，订单保持原样。
pub async fn delete(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<String>,
) -> AppResult<Json<AppResponse<()>>> {
    let (_, store_id) = owner_store(&state, &user).await?;

    let repo = OrderRepository::new(state.db.clone());
    let rid = parse_record_id("order", &id)?;
    repo.find_by_id(&rid)
        .await?
        .filter(|o| o.store == store_id)
        .ok_or_else(|| AppError::not_found(format!("Order {} not found", id)))?;

    match repo.delete_with_ledger(&rid).await {
        Ok(()) => {
            tracing::info!(order = %rid, "Order and transaction deleted");
            Ok(ok_with_message((), "Order and transaction deleted successfully"))
        }
        Err(RepoError::Inconsistent(msg)) => {
            tracing::error!(order = %rid, error = %msg, "Ledger inconsistency detected on delete");
            Err(AppError::not_found(format!(
                "Transaction for order {} not found",
                id
            )))
        }
        Err(e) => Err(e.into()),
    }
}
