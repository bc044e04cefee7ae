//! API 路由模块
//!
//! # 结构
//!
//! - [`health`] - 健康检查 (公共)
//! - [`products`] - 商品管理接口
//! - [`orders`] - 订单接口 (下单 / 查询 / 成对删除)
//! - [`expenses`] - 支出接口
//! - [`transactions`] - 账本流水查询接口
//! - [`dashboard`] - 仪表盘聚合接口
//! - [`inventories`] - 库存重建接口
//!
//! 除 health 外所有路由都要求 owner 角色，并以店铺为范围。

use axum::Router;
use surrealdb::RecordId;

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::models::Store;
use crate::db::repository::StoreRepository;
use crate::utils::{AppError, AppResult};

pub mod dashboard;
pub mod expenses;
pub mod health;
pub mod inventories;
pub mod orders;
pub mod products;
pub mod transactions;

/// 组装全部 API 路由
pub fn router() -> Router<ServerState> {
    Router::new()
        .merge(health::router())
        .merge(products::router())
        .merge(orders::router())
        .merge(expenses::router())
        .merge(transactions::router())
        .merge(dashboard::router())
        .merge(inventories::router())
}

/// 解析认证主体绑定的店铺 — 店铺范围从这里建立
///
/// 无店铺绑定返回 404。
pub(crate) async fn owner_store(
    state: &ServerState,
    user: &CurrentUser,
) -> AppResult<(Store, RecordId)> {
    let store = StoreRepository::new(state.db.clone())
        .require_for_owner(&user.id)
        .await?;
    let store_id = store
        .id
        .clone()
        .ok_or_else(|| AppError::internal("Store record missing id"))?;
    Ok((store, store_id))
}
