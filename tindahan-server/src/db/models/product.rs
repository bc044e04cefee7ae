//! Product Model

use serde::{Deserialize, Serialize};
use surrealdb::RecordId;
use validator::Validate;

use super::serde_helpers;

/// 商品默认图片 (与前端占位图一致)
pub const DEFAULT_PRODUCT_IMAGE: &str =
    "https://res.cloudinary.com/de6w2afj5/image/upload/v1735005475/11749787_bouvxl.png";

/// Product model
///
/// `quantity` 是唯一权威的当前库存值 — 没有单独的"原始库存"字段，
/// 历史在手数量由订单扫描推导 (见 reports::inventory)。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    #[serde(default, with = "serde_helpers::option_record_id")]
    pub id: Option<RecordId>,
    /// Record link to the owning store
    #[serde(with = "serde_helpers::record_id")]
    pub store: RecordId,
    pub price: f64,
    /// 当前可售库存，只由确认的订单递减，恒 >= 0
    pub quantity: i64,
    pub product_name: String,
    pub product_description: String,
    #[serde(default)]
    pub product_image: String,
    #[serde(default)]
    pub is_delete: bool,
    #[serde(default)]
    pub created_at: i64,
    #[serde(default)]
    pub updated_at: i64,
}

/// 创建商品请求
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ProductCreate {
    #[validate(range(min = 0.0, max = 1_000_000.0))]
    pub price: f64,
    #[validate(range(min = 0, max = 1_000_000))]
    pub quantity: i64,
    #[validate(length(min = 1, max = 120))]
    pub product_name: String,
    #[validate(length(min = 1, max = 2000))]
    pub product_description: String,
    pub product_image: Option<String>,
}

/// 更新商品请求 (缺省字段保持不变)
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ProductUpdate {
    #[validate(range(min = 0.0, max = 1_000_000.0))]
    pub price: Option<f64>,
    #[validate(range(min = 0, max = 1_000_000))]
    pub quantity: Option<i64>,
    #[validate(length(min = 1, max = 120))]
    pub product_name: Option<String>,
    #[validate(length(min = 1, max = 2000))]
    pub product_description: Option<String>,
    pub product_image: Option<String>,
}
