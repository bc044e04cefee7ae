//! Expense Repository
//!
//! 支出创建时在同一事务内镜像一条账本流水 (order_type = "expenses"，
//! 单行：支出自身，数量 1，标题作名称)。软删除只隐藏支出本身 —
//! 流水作为审计记录保留。

use surrealdb::engine::local::Db;
use surrealdb::{RecordId, Surreal};

use super::{BaseRepository, RepoError, RepoResult, new_record_key};
use crate::db::models::{Expense, ExpenseCreate, ExpenseUpdate};

#[derive(Clone)]
pub struct ExpenseRepository {
    base: BaseRepository,
}

impl ExpenseRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// 创建支出 + 镜像流水 (同一存储事务)
    pub async fn create_with_ledger(
        &self,
        store: &RecordId,
        user: &RecordId,
        data: ExpenseCreate,
    ) -> RepoResult<Expense> {
        let expense_key = new_record_key();
        let txn_key = new_record_key();
        let now = chrono::Utc::now().timestamp_millis();

        self.base
            .db()
            .query(
                r#"
                BEGIN TRANSACTION;
                LET $expense = CREATE ONLY type::thing('expense', $expense_key) CONTENT {
                    store: $store,
                    user: $user,
                    expenses_title: $title,
                    expenses_description: $description,
                    expenses_price: $price,
                    expenses_date: $date,
                    is_delete: false,
                    created_at: $now
                };
                CREATE type::thing('transaction', $txn_key) CONTENT {
                    user: $user,
                    store: $store,
                    order_ref: $expense.id,
                    order_items: [{
                        product: $expense.id,
                        quantity: 1,
                        price: $price,
                        product_name: $title,
                        product_image: ""
                    }],
                    order_total: $price,
                    order_date: $date,
                    order_type: 'expenses',
                    created_at: $now
                };
                COMMIT TRANSACTION;
                "#,
            )
            .bind(("store", store.clone()))
            .bind(("user", user.clone()))
            .bind(("title", data.expenses_title))
            .bind(("description", data.expenses_description))
            .bind(("price", data.expenses_price))
            .bind(("date", data.expenses_date))
            .bind(("now", now))
            .bind(("expense_key", expense_key.clone()))
            .bind(("txn_key", txn_key))
            .await?
            .check()?;

        let expense_id = RecordId::from_table_key("expense", expense_key);
        self.find_by_id(&expense_id)
            .await?
            .ok_or_else(|| RepoError::Database("Expense missing after create".to_string()))
    }

    /// Find expense by id
    pub async fn find_by_id(&self, id: &RecordId) -> RepoResult<Option<Expense>> {
        let expense: Option<Expense> = self.base.db().select(id.clone()).await?;
        Ok(expense)
    }

    /// Find all non-deleted expenses of a store, newest first
    pub async fn find_all(&self, store: &RecordId) -> RepoResult<Vec<Expense>> {
        let expenses: Vec<Expense> = self
            .base
            .db()
            .query(
                "SELECT * FROM expense WHERE store = $store AND is_delete = false ORDER BY created_at DESC",
            )
            .bind(("store", store.clone()))
            .await?
            .take(0)?;
        Ok(expenses)
    }

    /// 店铺累计支出 (非删除支出的 expenses_price 合计)
    pub async fn total_expenses(&self, store: &RecordId) -> RepoResult<f64> {
        let mut result = self
            .base
            .db()
            .query(
                "LET $totals = (SELECT VALUE expenses_price FROM expense WHERE store = $store AND is_delete = false);\n\
                 RETURN math::sum($totals) OR 0;",
            )
            .bind(("store", store.clone()))
            .await?;
        let total: Option<f64> = result.take(1)?;
        Ok(total.unwrap_or(0.0))
    }

    /// 时间窗口内的支出合计 (按录入时间 created_at 过滤，含边界)
    pub async fn total_in_range(
        &self,
        store: &RecordId,
        start: i64,
        end: i64,
    ) -> RepoResult<f64> {
        let mut result = self
            .base
            .db()
            .query(
                "LET $totals = (SELECT VALUE expenses_price FROM expense \
                 WHERE store = $store AND is_delete = false \
                 AND created_at >= $start AND created_at <= $end);\n\
                 RETURN math::sum($totals) OR 0;",
            )
            .bind(("store", store.clone()))
            .bind(("start", start))
            .bind(("end", end))
            .await?;
        let total: Option<f64> = result.take(1)?;
        Ok(total.unwrap_or(0.0))
    }

    /// Update an expense (缺省字段保持不变；流水不回写)
    pub async fn update(&self, id: &RecordId, data: ExpenseUpdate) -> RepoResult<Expense> {
        let mut sets: Vec<&str> = Vec::new();
        if data.expenses_title.is_some() {
            sets.push("expenses_title = $title");
        }
        if data.expenses_description.is_some() {
            sets.push("expenses_description = $description");
        }
        if data.expenses_price.is_some() {
            sets.push("expenses_price = $price");
        }
        if data.expenses_date.is_some() {
            sets.push("expenses_date = $date");
        }

        if sets.is_empty() {
            return self
                .find_by_id(id)
                .await?
                .ok_or_else(|| RepoError::NotFound(format!("Expense {} not found", id)));
        }

        let sql = format!("UPDATE $id SET {} RETURN AFTER", sets.join(", "));
        let mut query = self.base.db().query(sql).bind(("id", id.clone()));
        if let Some(title) = data.expenses_title {
            query = query.bind(("title", title));
        }
        if let Some(description) = data.expenses_description {
            query = query.bind(("description", description));
        }
        if let Some(price) = data.expenses_price {
            query = query.bind(("price", price));
        }
        if let Some(date) = data.expenses_date {
            query = query.bind(("date", date));
        }

        let mut result = query.await?;
        let updated: Option<Expense> = result.take(0)?;
        updated.ok_or_else(|| RepoError::NotFound(format!("Expense {} not found", id)))
    }

    /// Soft-delete an expense (流水保留)
    pub async fn soft_delete(&self, id: &RecordId) -> RepoResult<()> {
        let mut result = self
            .base
            .db()
            .query("UPDATE $id SET is_delete = true RETURN AFTER")
            .bind(("id", id.clone()))
            .await?;
        let updated: Option<Expense> = result.take(0)?;
        updated
            .map(|_| ())
            .ok_or_else(|| RepoError::NotFound(format!("Expense {} not found", id)))
    }
}
