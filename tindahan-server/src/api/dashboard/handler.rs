//! Dashboard API Handlers

use axum::{
    Json,
    extract::{Query, State},
};
use chrono::Utc;
use serde::Deserialize;

use crate::api::owner_store;
use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::reports::dashboard::{DashboardReport, build_dashboard};
use crate::reports::timeframe::Timeframe;
use crate::utils::{AppError, AppResult};

/// Query params for the dashboard
#[derive(Debug, Deserialize)]
pub struct DashboardQuery {
    pub timeframe: Option<String>,
}

/// GET /api/dashboard - 时间窗口内的收入/支出/结余 + 图表 + 畅销榜
pub async fn get_dashboard(
    State(state): State<ServerState>,
    user: CurrentUser,
    Query(query): Query<DashboardQuery>,
) -> AppResult<Json<DashboardReport>> {
    let timeframe_param = query.timeframe.as_deref().unwrap_or("this month");
    let timeframe = Timeframe::parse(timeframe_param)
        .ok_or_else(|| AppError::validation(format!("Unknown timeframe: {}", timeframe_param)))?;

    let (_, store_id) = owner_store(&state, &user).await?;

    let report = build_dashboard(
        &state.db,
        &store_id,
        timeframe,
        Utc::now(),
        state.config.timezone,
    )
    .await?;

    Ok(Json(report))
}
