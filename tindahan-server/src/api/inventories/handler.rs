//! Inventory API Handlers

use axum::{Json, extract::State};

use crate::api::owner_store;
use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::reports::inventory::{InventoryLine, build_inventory};
use crate::utils::AppResult;

/// GET /api/inventories - 每个商品的历史库存重建报表
pub async fn list(
    State(state): State<ServerState>,
    user: CurrentUser,
) -> AppResult<Json<Vec<InventoryLine>>> {
    let (_, store_id) = owner_store(&state, &user).await?;

    let inventories = build_inventory(&state.db, &store_id).await?;
    Ok(Json(inventories))
}
