//! Transaction API 模块 (统一账本查询)

mod handler;

use axum::{
    Router, middleware,
    routing::get,
};

use crate::auth::require_owner;
use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/transactions", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/", get(handler::list))
        .layer(middleware::from_fn(require_owner))
}
