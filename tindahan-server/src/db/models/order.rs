//! Order Model
//!
//! 订单一经创建即不可变 — 行项目里的单价/名称/图片是下单时刻的快照，
//! 与之后的商品编辑解耦。快照由服务端在库存扣减事务内从商品记录取值，
//! 不信任客户端提交的价格。

use serde::{Deserialize, Serialize};
use surrealdb::RecordId;
use validator::{Validate, ValidationError};

use super::serde_helpers;

/// Order type enum
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum OrderType {
    #[serde(rename = "walk-in")]
    WalkIn,
    #[serde(rename = "online")]
    Online,
}

/// 订单行项目 — 商品引用 + 数量 + 下单时刻快照
///
/// 同一结构同时嵌入订单和账本流水 (transaction.order_items)。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderItem {
    #[serde(with = "serde_helpers::record_id")]
    pub product: RecordId,
    pub quantity: i64,
    /// Unit price snapshot at order time
    pub price: f64,
    pub product_name: String,
    #[serde(default)]
    pub product_image: String,
}

/// 线上订单的客户信息 (仅 order_type = online)
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CustomerDetails {
    #[validate(length(max = 120))]
    pub customer_name: Option<String>,
    #[validate(custom(function = validate_ph_phone))]
    pub customer_phone: Option<String>,
    #[validate(length(max = 300))]
    pub customer_address: Option<String>,
}

/// 校验菲律宾手机号格式: +639xxxxxxxxx 或 09xxxxxxxxx
fn validate_ph_phone(phone: &str) -> Result<(), ValidationError> {
    let digits = phone
        .strip_prefix("+639")
        .or_else(|| phone.strip_prefix("09"));

    match digits {
        Some(rest) if rest.len() == 9 && rest.chars().all(|c| c.is_ascii_digit()) => Ok(()),
        _ => Err(ValidationError::new("invalid_phone_number")),
    }
}

/// Order entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    #[serde(default, with = "serde_helpers::option_record_id")]
    pub id: Option<RecordId>,
    /// 下单用户 (外部身份)
    #[serde(with = "serde_helpers::record_id")]
    pub user: RecordId,
    #[serde(with = "serde_helpers::record_id")]
    pub store: RecordId,
    pub order_items: Vec<OrderItem>,
    pub order_total: f64,
    /// Unix millis
    pub order_date: i64,
    pub order_type: OrderType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order_online_details: Option<CustomerDetails>,
    #[serde(default)]
    pub is_delete: bool,
    #[serde(default)]
    pub created_at: i64,
}

/// 下单请求里的一行 — 只带商品引用和数量，价格由服务端快照
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct OrderLineInput {
    /// Product id ("product:xxx" 或裸 key)
    #[validate(length(min = 1))]
    pub product: String,
    #[validate(range(min = 1, max = 9999))]
    pub quantity: i64,
}

/// 创建订单请求
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct OrderCreate {
    #[validate(length(min = 1), nested)]
    pub order_items: Vec<OrderLineInput>,
    /// 客户端视角的订单总额 — 服务端按当前价格核对后才入库
    #[validate(range(min = 0.0))]
    pub order_total: f64,
    pub order_type: OrderType,
    #[validate(nested)]
    pub order_online_details: Option<CustomerDetails>,
}
