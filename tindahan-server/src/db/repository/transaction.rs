//! Transaction Repository (统一账本)
//!
//! Read-only access — 流水只在订单/支出的写事务内成对产生，
//! 这里不提供任何独立写入口。

use surrealdb::engine::local::Db;
use surrealdb::{RecordId, Surreal};

use super::{BaseRepository, RepoResult};
use crate::db::models::Transaction;

#[derive(Clone)]
pub struct TransactionRepository {
    base: BaseRepository,
}

impl TransactionRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// 店铺流水，可选录入时间窗口 (含边界)，新的在前
    pub async fn find_all(
        &self,
        store: &RecordId,
        range: Option<(i64, i64)>,
    ) -> RepoResult<Vec<Transaction>> {
        let transactions: Vec<Transaction> = match range {
            Some((start, end)) => {
                self.base
                    .db()
                    .query(
                        "SELECT * FROM transaction \
                         WHERE store = $store AND created_at >= $start AND created_at <= $end \
                         ORDER BY created_at DESC",
                    )
                    .bind(("store", store.clone()))
                    .bind(("start", start))
                    .bind(("end", end))
                    .await?
                    .take(0)?
            }
            None => {
                self.base
                    .db()
                    .query(
                        "SELECT * FROM transaction WHERE store = $store ORDER BY created_at DESC",
                    )
                    .bind(("store", store.clone()))
                    .await?
                    .take(0)?
            }
        };
        Ok(transactions)
    }

    /// 按源记录查找配对流水 (订单或支出)
    pub async fn find_by_source(&self, source: &RecordId) -> RepoResult<Option<Transaction>> {
        let mut result = self
            .base
            .db()
            .query("SELECT * FROM transaction WHERE order_ref = $source LIMIT 1")
            .bind(("source", source.clone()))
            .await?;
        let transactions: Vec<Transaction> = result.take(0)?;
        Ok(transactions.into_iter().next())
    }
}
