//! Order Repository
//!
//! 订单写路径承担两件必须原子完成的事：
//!
//! 1. **库存扣减** — 每行商品 "校验并扣减"。先读后写的竞态窗口通过把
//!    校验和扣减放进同一个 SurrealQL 事务关闭：并发订单要么看到扣减后
//!    的库存要么冲突重来，库存永不为负。
//! 2. **账本镜像** — 订单与其流水 (transaction) 在同一事务内成对创建/
//!    成对删除，不存在只写了一半的状态。
//!
//! 事务内校验失败用 `THROW` 哨兵中止整个事务，映射见
//! [`RepoError::from_db_message`](super::RepoError::from_db_message)。

use surrealdb::engine::local::Db;
use surrealdb::{RecordId, Surreal};

use super::{BaseRepository, RepoError, RepoResult, new_record_key};
use crate::db::models::{CustomerDetails, Order, OrderType};

#[derive(Clone)]
pub struct OrderRepository {
    base: BaseRepository,
}

impl OrderRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// 创建订单 + 镜像流水，并原子扣减每行库存
    ///
    /// `lines` 为 (商品, 数量) 对。单价/名称/图片快照在事务内
    /// 直接取自商品记录；`order_total` 由快照行合计派生，
    /// 不采用客户端提交值。
    ///
    /// # 错误
    ///
    /// - [`RepoError::ProductNotFound`] — 商品不存在或已删除，整单回滚
    /// - [`RepoError::InsufficientStock`] — 任一行库存不足，整单回滚
    pub async fn create_with_ledger(
        &self,
        store: &RecordId,
        user: &RecordId,
        lines: &[(RecordId, i64)],
        order_type: OrderType,
        details: Option<CustomerDetails>,
        order_date: i64,
    ) -> RepoResult<Order> {
        if lines.is_empty() {
            return Err(RepoError::Validation("Order has no items".to_string()));
        }

        let order_key = new_record_key();
        let txn_key = new_record_key();

        let mut sql = String::from("BEGIN TRANSACTION;\n");

        // Per line: load product, validate, decrement
        for i in 0..lines.len() {
            sql.push_str(&format!(
                "LET $p{i} = (SELECT * FROM $pid{i})[0];\n\
                 IF $p{i} IS NONE OR $p{i}.is_delete {{ THROW \"product_not_found:\" + <string>$pid{i} }};\n\
                 IF $p{i}.quantity < $qty{i} {{ THROW \"insufficient_stock:\" + <string>$pid{i} }};\n\
                 UPDATE $pid{i} SET quantity -= $qty{i}, updated_at = $now;\n",
            ));
        }

        let item_exprs: Vec<String> = (0..lines.len())
            .map(|i| {
                format!(
                    "{{ product: $p{i}.id, quantity: $qty{i}, price: $p{i}.price, \
                     product_name: $p{i}.product_name, product_image: $p{i}.product_image }}"
                )
            })
            .collect();
        let total_exprs: Vec<String> = (0..lines.len())
            .map(|i| format!("$qty{i} * $p{i}.price"))
            .collect();

        sql.push_str(&format!(
            "LET $order = CREATE ONLY type::thing('order', $order_key) CONTENT {{\n\
                 user: $user,\n\
                 store: $store,\n\
                 order_items: [{items}],\n\
                 order_total: math::sum([{totals}]),\n\
                 order_date: $order_date,\n\
                 order_type: $order_type,\n\
                 order_online_details: $details,\n\
                 is_delete: false,\n\
                 created_at: $now\n\
             }};\n",
            items = item_exprs.join(", "),
            totals = total_exprs.join(", "),
        ));

        sql.push_str(
            "CREATE type::thing('transaction', $txn_key) CONTENT {\n\
                 user: $user,\n\
                 store: $store,\n\
                 order_ref: $order.id,\n\
                 order_items: $order.order_items,\n\
                 order_total: $order.order_total,\n\
                 order_date: $order_date,\n\
                 order_type: $order_type,\n\
                 order_online_details: $details,\n\
                 created_at: $now\n\
             };\n\
             COMMIT TRANSACTION;",
        );

        let now = chrono::Utc::now().timestamp_millis();
        let mut query = self
            .base
            .db()
            .query(sql)
            .bind(("user", user.clone()))
            .bind(("store", store.clone()))
            .bind(("order_date", order_date))
            .bind(("order_type", order_type))
            .bind(("details", details))
            .bind(("now", now))
            .bind(("order_key", order_key.clone()))
            .bind(("txn_key", txn_key));
        for (i, (product, quantity)) in lines.iter().enumerate() {
            query = query
                .bind((format!("pid{i}"), product.clone()))
                .bind((format!("qty{i}"), *quantity));
        }

        // check() 把事务内 THROW 的哨兵错误带出来
        query.await?.check()?;

        let order_id = RecordId::from_table_key("order", order_key);
        self.find_by_id(&order_id)
            .await?
            .ok_or_else(|| RepoError::Database("Order missing after create".to_string()))
    }

    /// 成对删除订单与其流水
    ///
    /// 两者都必须存在：订单缺失 → NotFound；订单在而流水缺失 →
    /// [`RepoError::Inconsistent`] (账本配对被破坏，订单保持原样)。
    pub async fn delete_with_ledger(&self, id: &RecordId) -> RepoResult<()> {
        self.base
            .db()
            .query(
                r#"
                BEGIN TRANSACTION;
                LET $o = (SELECT * FROM $oid)[0];
                IF $o IS NONE { THROW "order_not_found" };
                LET $t = (SELECT * FROM transaction WHERE order_ref = $oid);
                IF array::len($t) == 0 { THROW "transaction_not_found" };
                DELETE $oid;
                DELETE transaction WHERE order_ref = $oid;
                COMMIT TRANSACTION;
                "#,
            )
            .bind(("oid", id.clone()))
            .await?
            .check()?;
        Ok(())
    }

    /// Find order by id
    pub async fn find_by_id(&self, id: &RecordId) -> RepoResult<Option<Order>> {
        let order: Option<Order> = self.base.db().select(id.clone()).await?;
        Ok(order)
    }

    /// Find all non-deleted orders of a store, newest first
    pub async fn find_all(&self, store: &RecordId) -> RepoResult<Vec<Order>> {
        let orders: Vec<Order> = self
            .base
            .db()
            .query(
                "SELECT * FROM order WHERE store = $store AND is_delete = false ORDER BY created_at DESC",
            )
            .bind(("store", store.clone()))
            .await?
            .take(0)?;
        Ok(orders)
    }

    /// 时间窗口内的非删除订单 (order_date ∈ [start, end]，含边界)
    pub async fn find_in_range(
        &self,
        store: &RecordId,
        start: i64,
        end: i64,
    ) -> RepoResult<Vec<Order>> {
        let orders: Vec<Order> = self
            .base
            .db()
            .query(
                "SELECT * FROM order \
                 WHERE store = $store AND is_delete = false \
                 AND order_date >= $start AND order_date <= $end \
                 ORDER BY order_date",
            )
            .bind(("store", store.clone()))
            .bind(("start", start))
            .bind(("end", end))
            .await?
            .take(0)?;
        Ok(orders)
    }

    /// 店铺累计销售额 (非删除订单的 order_total 合计)
    pub async fn total_sales(&self, store: &RecordId) -> RepoResult<f64> {
        let mut result = self
            .base
            .db()
            .query(
                "LET $totals = (SELECT VALUE order_total FROM order WHERE store = $store AND is_delete = false);\n\
                 RETURN math::sum($totals) OR 0;",
            )
            .bind(("store", store.clone()))
            .await?;
        let total: Option<f64> = result.take(1)?;
        Ok(total.unwrap_or(0.0))
    }
}
