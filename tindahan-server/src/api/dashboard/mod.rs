//! Dashboard API 模块 (经营概览)

mod handler;

use axum::{
    Router, middleware,
    routing::get,
};

use crate::auth::require_owner;
use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/dashboard", routes())
}

fn routes() -> Router<ServerState> {
    // 报表查看：店主专属
    Router::new()
        .route("/", get(handler::get_dashboard))
        .layer(middleware::from_fn(require_owner))
}
