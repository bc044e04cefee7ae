//! Transaction API Handlers
//!
//! 统一账本的只读查询 — 流水没有任何写入口。

use axum::{
    Json,
    extract::{Query, State},
};
use serde::Deserialize;

use crate::api::owner_store;
use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::models::Transaction;
use crate::db::repository::TransactionRepository;
use crate::reports::timeframe::{day_end_millis, day_start_millis};
use crate::utils::{AppError, AppResult};

/// Query params for listing transactions
#[derive(Debug, Deserialize)]
pub struct ListQuery {
    #[serde(rename = "startDate")]
    pub start_date: Option<String>,
    #[serde(rename = "endDate")]
    pub end_date: Option<String>,
}

/// 流水列表响应
#[derive(Debug, serde::Serialize)]
pub struct TransactionListResponse {
    pub transactions: Vec<Transaction>,
}

/// 解析日期参数 — 接受 RFC3339 时刻或 YYYY-MM-DD 日期
///
/// 纯日期按营业时区取当日起点/终点。
fn parse_date_param(value: &str, end_of_day: bool, tz: chrono_tz::Tz) -> AppResult<i64> {
    if let Ok(instant) = chrono::DateTime::parse_from_rfc3339(value) {
        return Ok(instant.timestamp_millis());
    }

    let date = chrono::NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map_err(|_| AppError::validation(format!("Invalid date: {}", value)))?;

    Ok(if end_of_day {
        day_end_millis(date, tz)
    } else {
        day_start_millis(date, tz)
    })
}

/// GET /api/transactions - 店铺账本流水，可选时间窗口
pub async fn list(
    State(state): State<ServerState>,
    user: CurrentUser,
    Query(query): Query<ListQuery>,
) -> AppResult<Json<TransactionListResponse>> {
    let (_, store_id) = owner_store(&state, &user).await?;

    // 起止都给才过滤 (与前端日期区间组件的提交行为一致)
    let range = match (query.start_date.as_deref(), query.end_date.as_deref()) {
        (Some(start), Some(end)) => {
            let tz = state.config.timezone;
            Some((
                parse_date_param(start, false, tz)?,
                parse_date_param(end, true, tz)?,
            ))
        }
        _ => None,
    };

    let transactions = TransactionRepository::new(state.db.clone())
        .find_all(&store_id, range)
        .await?;

    Ok(Json(TransactionListResponse { transactions }))
}
