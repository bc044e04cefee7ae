//! Database Module
//!
//! 嵌入式 SurrealDB (RocksDB 引擎) 连接与 schema 定义。
//!
//! 存储句柄在启动时构造一次，经 [`crate::core::ServerState`] 注入共享，
//! 各 repository 只接收 `Surreal<Db>` 的克隆。

pub mod models;
pub mod repository;

use std::path::Path;

use surrealdb::Surreal;
use surrealdb::engine::local::{Db, RocksDb};

use crate::utils::AppError;

/// Database service — owns the embedded SurrealDB handle
#[derive(Clone)]
pub struct DbService {
    pub db: Surreal<Db>,
}

impl DbService {
    /// Create a new database service backed by RocksDB at `db_path`
    pub async fn new(db_path: &Path) -> Result<Self, AppError> {
        let db: Surreal<Db> = Surreal::new::<RocksDb>(db_path)
            .await
            .map_err(|e| AppError::database(format!("Failed to open database: {e}")))?;

        db.use_ns("tindahan")
            .use_db("store")
            .await
            .map_err(|e| AppError::database(format!("Failed to select namespace: {e}")))?;

        tracing::info!(path = %db_path.display(), "Database connection established (SurrealDB RocksDB)");

        define_schema(&db).await?;
        tracing::info!("Database schema applied");

        Ok(Self { db })
    }
}

/// Schema 定义 (幂等，启动时执行)
///
/// 表保持 SCHEMALESS — 文档结构由模型层约定；索引覆盖店铺范围查询、
/// 账本配对查询和报表时间窗口查询。
pub async fn define_schema(db: &Surreal<Db>) -> Result<(), AppError> {
    db.query(
        r#"
        DEFINE TABLE IF NOT EXISTS store SCHEMALESS;
        DEFINE INDEX IF NOT EXISTS store_owner ON TABLE store COLUMNS owner;

        DEFINE TABLE IF NOT EXISTS product SCHEMALESS;
        DEFINE INDEX IF NOT EXISTS product_store ON TABLE product COLUMNS store;

        DEFINE TABLE IF NOT EXISTS order SCHEMALESS;
        DEFINE INDEX IF NOT EXISTS order_store_date ON TABLE order COLUMNS store, order_date;

        DEFINE TABLE IF NOT EXISTS expense SCHEMALESS;
        DEFINE INDEX IF NOT EXISTS expense_store ON TABLE expense COLUMNS store;

        DEFINE TABLE IF NOT EXISTS transaction SCHEMALESS;
        DEFINE INDEX IF NOT EXISTS transaction_order ON TABLE transaction COLUMNS order_ref;
        DEFINE INDEX IF NOT EXISTS transaction_store ON TABLE transaction COLUMNS store;
        "#,
    )
    .await
    .map_err(|e| AppError::database(format!("Failed to define schema: {e}")))?
    .check()
    .map_err(|e| AppError::database(format!("Failed to define schema: {e}")))?;

    Ok(())
}
