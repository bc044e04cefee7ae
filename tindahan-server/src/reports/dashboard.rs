//! 仪表盘聚合引擎
//!
//! 对一个时间窗口内的订单/支出做收入、支出、结余、畅销榜和
//! 销售图表的汇总。收入与图表出自同一批取回的订单 —
//! 桶合计与 totalIncome 结构上不可能失配。
//!
//! 窗口内全量扫描是这里的既定契约；扫描成本的权衡记录在 DESIGN.md。

use std::cmp::Ordering;
use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use rust_decimal::Decimal;
use serde::Serialize;
use surrealdb::engine::local::Db;
use surrealdb::{RecordId, Surreal};

use super::chart::{ChartPoint, chart_data};
use super::timeframe::Timeframe;
use crate::db::models::Order;
use crate::db::repository::{ExpenseRepository, OrderRepository, RepoResult};
use crate::money::{line_total, to_decimal, to_f64};

/// 畅销商品条目 (窗口内按销售额排序)
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BestSeller {
    pub name: String,
    pub image: String,
    pub total_sold: i64,
    pub total_amount: f64,
}

/// 仪表盘响应
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardReport {
    pub total_income: f64,
    pub total_expenses: f64,
    pub total_balance: f64,
    pub chart_data: Vec<ChartPoint>,
    pub top_best_seller: Vec<BestSeller>,
}

/// 聚合窗口内订单行项目，按销售额取前 5 名
///
/// 按商品聚合数量与金额；金额相同的并列项按名称排序保证输出稳定。
pub fn top_best_sellers(orders: &[Order]) -> Vec<BestSeller> {
    struct Acc {
        name: String,
        image: String,
        sold: i64,
        amount: Decimal,
    }

    let mut sales: BTreeMap<String, Acc> = BTreeMap::new();

    for order in orders {
        for item in &order.order_items {
            let acc = sales.entry(item.product.to_string()).or_insert_with(|| Acc {
                name: item.product_name.clone(),
                image: item.product_image.clone(),
                sold: 0,
                amount: Decimal::ZERO,
            });
            acc.sold += item.quantity;
            acc.amount += line_total(item.quantity, item.price);
        }
    }

    let mut ranked: Vec<BestSeller> = sales
        .into_values()
        .map(|acc| BestSeller {
            name: acc.name,
            image: acc.image,
            total_sold: acc.sold,
            total_amount: to_f64(acc.amount),
        })
        .collect();

    ranked.sort_by(|a, b| {
        b.total_amount
            .partial_cmp(&a.total_amount)
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.name.cmp(&b.name))
    });
    ranked.truncate(5);
    ranked
}

/// 构建仪表盘报表
///
/// `now` 由调用方注入 (handler 用 `Utc::now()`，测试用固定时刻)。
pub async fn build_dashboard(
    db: &Surreal<Db>,
    store: &RecordId,
    timeframe: Timeframe,
    now: DateTime<Utc>,
    tz: Tz,
) -> RepoResult<DashboardReport> {
    let (start, end) = timeframe.range(now, tz);

    tracing::debug!(
        timeframe = timeframe.as_str(),
        start,
        end,
        "Building dashboard report"
    );

    let orders = OrderRepository::new(db.clone())
        .find_in_range(store, start, end)
        .await?;
    let total_expenses = ExpenseRepository::new(db.clone())
        .total_in_range(store, start, end)
        .await?;

    let income: Decimal = orders.iter().map(|o| to_decimal(o.order_total)).sum();
    let expenses = to_decimal(total_expenses);

    let date_totals: Vec<(i64, f64)> = orders
        .iter()
        .map(|o| (o.order_date, o.order_total))
        .collect();

    Ok(DashboardReport {
        total_income: to_f64(income),
        total_expenses: to_f64(expenses),
        total_balance: to_f64(income - expenses),
        chart_data: chart_data(timeframe, now, tz, &date_totals),
        top_best_seller: top_best_sellers(&orders),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::models::{OrderItem, OrderType};

    fn item(key: &str, name: &str, quantity: i64, price: f64) -> OrderItem {
        OrderItem {
            product: RecordId::from_table_key("product", key),
            quantity,
            price,
            product_name: name.to_string(),
            product_image: String::new(),
        }
    }

    fn order(items: Vec<OrderItem>) -> Order {
        let total = items.iter().map(|i| i.quantity as f64 * i.price).sum();
        Order {
            id: None,
            user: RecordId::from_table_key("user", "u1"),
            store: RecordId::from_table_key("store", "s1"),
            order_items: items,
            order_total: total,
            order_date: 0,
            order_type: OrderType::WalkIn,
            order_online_details: None,
            is_delete: false,
            created_at: 0,
        }
    }

    #[test]
    fn ranks_by_total_amount_descending() {
        let orders = vec![
            order(vec![item("a", "Sardinas", 2, 30.0), item("b", "Bigas", 1, 100.0)]),
            order(vec![item("a", "Sardinas", 3, 30.0)]),
        ];

        let top = top_best_sellers(&orders);
        assert_eq!(top.len(), 2);
        // Sardinas: 5 × 30 = 150, Bigas: 1 × 100 = 100
        assert_eq!(top[0].name, "Sardinas");
        assert_eq!(top[0].total_sold, 5);
        assert_eq!(top[0].total_amount, 150.0);
        assert_eq!(top[1].name, "Bigas");
    }

    #[test]
    fn caps_the_list_at_five() {
        let orders: Vec<Order> = (0..8)
            .map(|i| {
                order(vec![item(
                    &format!("p{i}"),
                    &format!("Product {i}"),
                    1,
                    (i + 1) as f64,
                )])
            })
            .collect();

        let top = top_best_sellers(&orders);
        assert_eq!(top.len(), 5);
        // Highest amounts first: 8, 7, 6, 5, 4
        assert_eq!(top[0].total_amount, 8.0);
        assert_eq!(top[4].total_amount, 4.0);
    }

    #[test]
    fn ties_are_ordered_by_name_for_stable_output() {
        let orders = vec![
            order(vec![item("b", "Suka", 1, 10.0)]),
            order(vec![item("a", "Asin", 1, 10.0)]),
        ];

        let top = top_best_sellers(&orders);
        assert_eq!(top[0].name, "Asin");
        assert_eq!(top[1].name, "Suka");
    }
}
