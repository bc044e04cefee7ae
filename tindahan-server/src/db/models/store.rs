//! Store Model
//!
//! 店铺是多租户边界 — 每条业务数据都归属唯一店铺，
//! 所有查询都必须带店铺范围。店铺/用户的管理界面属于外部系统，
//! 这里只保留读取路径。

use serde::{Deserialize, Serialize};
use surrealdb::RecordId;

use super::serde_helpers;

/// Store model
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Store {
    #[serde(default, with = "serde_helpers::option_record_id")]
    pub id: Option<RecordId>,
    /// Record link to the owning user (external identity)
    #[serde(with = "serde_helpers::record_id")]
    pub owner: RecordId,
    pub store_name: String,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub store_logo: String,
    pub phone_number: String,
    #[serde(default)]
    pub is_delete: bool,
    #[serde(default)]
    pub created_at: i64,
}
