//! Expense Model

use serde::{Deserialize, Serialize};
use surrealdb::RecordId;
use validator::Validate;

use super::serde_helpers;

/// Expense entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Expense {
    #[serde(default, with = "serde_helpers::option_record_id")]
    pub id: Option<RecordId>,
    #[serde(with = "serde_helpers::record_id")]
    pub store: RecordId,
    /// 录入支出的用户 (外部身份)
    #[serde(with = "serde_helpers::record_id")]
    pub user: RecordId,
    pub expenses_title: String,
    pub expenses_description: String,
    pub expenses_price: f64,
    /// 支出发生日期 (用户提供)，Unix millis
    pub expenses_date: i64,
    #[serde(default)]
    pub is_delete: bool,
    /// 录入时间，Unix millis — 仪表盘支出窗口按此字段过滤
    #[serde(default)]
    pub created_at: i64,
}

/// 创建支出请求
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ExpenseCreate {
    #[validate(length(min = 1, max = 120))]
    pub expenses_title: String,
    #[validate(length(min = 1, max = 2000))]
    pub expenses_description: String,
    #[validate(range(min = 0.0, max = 1_000_000.0))]
    pub expenses_price: f64,
    /// Unix millis
    pub expenses_date: i64,
}

/// 更新支出请求 (缺省字段保持不变)
///
/// 账本流水是只追加投影 — 支出编辑不回写流水。
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ExpenseUpdate {
    #[validate(length(min = 1, max = 120))]
    pub expenses_title: Option<String>,
    #[validate(length(min = 1, max = 2000))]
    pub expenses_description: Option<String>,
    #[validate(range(min = 0.0, max = 1_000_000.0))]
    pub expenses_price: Option<f64>,
    pub expenses_date: Option<i64>,
}
