//! Repository Module
//!
//! Provides store-scoped CRUD and aggregation operations on SurrealDB tables.
//!
//! # 账本写入约定
//!
//! 订单/支出与其镜像流水的多文档写入全部走 SurrealQL
//! `BEGIN TRANSACTION … COMMIT TRANSACTION`，事务内校验失败用 `THROW`
//! 抛出哨兵错误 (如 `insufficient_stock:product:xyz`)，由
//! [`RepoError::from_db_message`] 解析回类型化错误。

pub mod expense;
pub mod order;
pub mod product;
pub mod store;
pub mod transaction;

// Re-exports
pub use expense::ExpenseRepository;
pub use order::OrderRepository;
pub use product::ProductRepository;
pub use store::StoreRepository;
pub use transaction::TransactionRepository;

use ring::rand::{SecureRandom, SystemRandom};
use surrealdb::engine::local::Db;
use surrealdb::{RecordId, Surreal};
use thiserror::Error;

/// Repository error types
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Duplicate: {0}")]
    Duplicate(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Product not found: {0}")]
    ProductNotFound(String),

    #[error("Insufficient stock for product {0}")]
    InsufficientStock(String),

    #[error("Ledger inconsistency: {0}")]
    Inconsistent(String),

    #[error("Database error: {0}")]
    Database(String),
}

impl From<surrealdb::Error> for RepoError {
    fn from(err: surrealdb::Error) -> Self {
        RepoError::from_db_message(err.to_string())
    }
}

impl RepoError {
    /// 将数据库错误消息映射回类型化错误
    ///
    /// 事务内 `THROW` 的哨兵格式：`<code>` 或 `<code>:<record-id>`。
    pub fn from_db_message(msg: String) -> Self {
        if let Some(id) = sentinel_suffix(&msg, "insufficient_stock:") {
            return RepoError::InsufficientStock(id);
        }
        if let Some(id) = sentinel_suffix(&msg, "product_not_found:") {
            return RepoError::ProductNotFound(id);
        }
        if msg.contains("order_not_found") {
            return RepoError::NotFound("Order not found".to_string());
        }
        if msg.contains("transaction_not_found") {
            return RepoError::Inconsistent(
                "order exists without its paired ledger transaction".to_string(),
            );
        }
        RepoError::Database(msg)
    }
}

/// 提取哨兵错误后缀的 record id (到空白/引号为止)
fn sentinel_suffix(msg: &str, prefix: &str) -> Option<String> {
    msg.find(prefix).map(|idx| {
        msg[idx + prefix.len()..]
            .chars()
            .take_while(|c| !c.is_whitespace() && *c != '"' && *c != '\'' && *c != '`')
            .collect()
    })
}

/// Result type for repository operations
pub type RepoResult<T> = Result<T, RepoError>;

/// Base repository with database reference
#[derive(Clone)]
pub struct BaseRepository {
    db: Surreal<Db>,
}

impl BaseRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self { db }
    }

    pub fn db(&self) -> &Surreal<Db> {
        &self.db
    }
}

// =============================================================================
// ID Convention: 全栈统一使用 "table:id" 格式
// =============================================================================
//
// 使用 surrealdb::RecordId 处理所有 ID：
//   - 解析: let id: RecordId = "product:abc".parse()?;
//   - 创建: let id = RecordId::from_table_key("product", "abc");
//   - CRUD: db.select(id) / db.delete(id) 直接使用 RecordId

/// 解析 API 传入的 record id — 接受 "table:key" 或裸 key
pub fn parse_record_id(table: &str, id: &str) -> RepoResult<RecordId> {
    if id.is_empty() {
        return Err(RepoError::Validation("Empty record id".to_string()));
    }

    if id.contains(':') {
        let rid: RecordId = id
            .parse()
            .map_err(|_| RepoError::Validation(format!("Invalid ID: {}", id)))?;
        if rid.table() != table {
            return Err(RepoError::Validation(format!(
                "Expected {} id, got: {}",
                table, id
            )));
        }
        Ok(rid)
    } else {
        Ok(RecordId::from_table_key(table, id))
    }
}

/// JWT 主体 ID → 用户 RecordId ("user:key" 或裸 key)
pub fn user_record_id(id: &str) -> RecordId {
    if id.contains(':') {
        id.parse()
            .unwrap_or_else(|_| RecordId::from_table_key("user", id))
    } else {
        RecordId::from_table_key("user", id)
    }
}

/// 生成新记录的 key (20 位小写字母数字，与 SurrealDB 默认风格一致)
///
/// 订单/流水需要在事务提交前确定双方 ID，所以 key 在 Rust 侧预生成，
/// 查询里用 `type::thing(table, $key)` 构造。
pub fn new_record_key() -> String {
    const ALPHABET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

    let rng = SystemRandom::new();
    let mut bytes = [0u8; 20];
    // 随机数失败时回退到时间戳 key (仅理论路径)
    if rng.fill(&mut bytes).is_err() {
        return format!("k{}", chrono::Utc::now().timestamp_nanos_opt().unwrap_or(0));
    }

    bytes
        .iter()
        .map(|b| ALPHABET[(*b as usize) % ALPHABET.len()] as char)
        .collect()
}
