//! Transaction Model (统一账本)
//!
//! 每笔订单和每笔支出都镜像出恰好一条流水，与源记录在同一存储事务内写入。
//! 流水是只追加的派生投影 — 永不独立编辑；订单删除时成对删除，
//! 支出软删除时流水保留 (审计用途的不对称，见 DESIGN.md)。

use serde::{Deserialize, Serialize};
use surrealdb::RecordId;

use super::order::{CustomerDetails, OrderItem};
use super::serde_helpers;

/// 流水类型 — 镜像源记录的订单类型，支出统一记 "expenses"
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum TransactionType {
    #[serde(rename = "walk-in")]
    WalkIn,
    #[serde(rename = "online")]
    Online,
    #[serde(rename = "expenses")]
    Expenses,
}

/// Ledger transaction entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transaction {
    #[serde(default, with = "serde_helpers::option_record_id")]
    pub id: Option<RecordId>,
    #[serde(with = "serde_helpers::record_id")]
    pub user: RecordId,
    #[serde(with = "serde_helpers::record_id")]
    pub store: RecordId,
    /// 源记录引用 — 订单或支出的 RecordId
    #[serde(with = "serde_helpers::record_id")]
    pub order_ref: RecordId,
    pub order_items: Vec<OrderItem>,
    pub order_total: f64,
    /// Unix millis
    pub order_date: i64,
    pub order_type: TransactionType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order_online_details: Option<CustomerDetails>,
    #[serde(default)]
    pub created_at: i64,
}
