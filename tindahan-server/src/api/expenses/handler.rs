//! Expense API Handlers
//!
//! 支出创建时镜像账本流水；软删除/编辑只动支出本身 —
//! 流水作为只追加的审计记录保留 (与订单删除的成对语义刻意不对称)。

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use validator::Validate;

use crate::api::owner_store;
use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::models::{Expense, ExpenseCreate, ExpenseUpdate};
use crate::db::repository::{ExpenseRepository, parse_record_id, user_record_id};
use crate::utils::{AppError, AppResponse, AppResult, ok_with_message};

/// 支出列表响应
#[derive(Debug, serde::Serialize)]
pub struct ExpenseListResponse {
    pub expenses: Vec<Expense>,
    #[serde(rename = "totalExpensesPrice")]
    pub total_expenses_price: f64,
}

/// POST /api/expenses - 录入支出 (同时镜像流水)
pub async fn create(
    State(state): State<ServerState>,
    user: CurrentUser,
    Json(payload): Json<ExpenseCreate>,
) -> AppResult<(StatusCode, Json<Expense>)> {
    payload
        .validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    let (_, store_id) = owner_store(&state, &user).await?;

    let expense = ExpenseRepository::new(state.db.clone())
        .create_with_ledger(&store_id, &user_record_id(&user.id), payload)
        .await?;

    tracing::info!(
        expense = %expense.id.as_ref().map(|id| id.to_string()).unwrap_or_default(),
        price = expense.expenses_price,
        "Expense created"
    );
    Ok((StatusCode::CREATED, Json(expense)))
}

/// GET /api/expenses - 支出列表 + 累计支出
pub async fn list(
    State(state): State<ServerState>,
    user: CurrentUser,
) -> AppResult<Json<ExpenseListResponse>> {
    let (_, store_id) = owner_store(&state, &user).await?;

    let repo = ExpenseRepository::new(state.db.clone());
    let expenses = repo.find_all(&store_id).await?;
    let total_expenses_price = repo.total_expenses(&store_id).await?;

    Ok(Json(ExpenseListResponse {
        expenses,
        total_expenses_price,
    }))
}

/// GET /api/expenses/{id} - 获取单条支出
pub async fn get_by_id(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<String>,
) -> AppResult<Json<Expense>> {
    let (_, store_id) = owner_store(&state, &user).await?;

    let rid = parse_record_id("expense", &id)?;
    let expense = ExpenseRepository::new(state.db.clone())
        .find_by_id(&rid)
        .await?
        .filter(|e| e.store == store_id)
        .ok_or_else(|| AppError::not_found(format!("Expense {} not found", id)))?;
    Ok(Json(expense))
}

/// PUT /api/expenses/{id} - 更新支出 (流水不回写)
pub async fn update(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<String>,
    Json(payload): Json<ExpenseUpdate>,
) -> AppResult<Json<Expense>> {
    payload
        .validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    let (_, store_id) = owner_store(&state, &user).await?;

    let repo = ExpenseRepository::new(state.db.clone());
    let rid = parse_record_id("expense", &id)?;
    repo.find_by_id(&rid)
        .await?
        .filter(|e| e.store == store_id && !e.is_delete)
        .ok_or_else(|| AppError::not_found(format!("Expense {} not found", id)))?;

    let expense = repo.update(&rid, payload).await?;
    Ok(Json(expense))
}

/// DELETE /api/expenses/{id} - 软删除支出 (流水保留)
pub async fn delete(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<String>,
) -> AppResult<Json<AppResponse<()>>> {
    let (_, store_id) = owner_store(&state, &user).await?;

    let repo = ExpenseRepository::new(state.db.clone());
    let rid = parse_record_id("expense", &id)?;
    repo.find_by_id(&rid)
        .await?
        .filter(|e| e.store == store_id && !e.is_delete)
        .ok_or_else(|| AppError::not_found(format!("Expense {} not found", id)))?;

    repo.soft_delete(&rid).await?;

    tracing::info!(expense = %rid, "Expense deleted (ledger entry retained)");
    Ok(ok_with_message((), "Expense deleted"))
}
