//! 库存重建引擎
//!
//! 商品只记当前可售数量 — 历史在手数量不落库，由订单全量扫描推导：
//! `quantity_onhand = available_stock + quantity_sold`。
//!
//! 这个推导假设库存只被消耗、创建后不再补货；补货会让在手数量
//! 静默失真 (见 DESIGN.md 的未决问题记录)。

use rust_decimal::Decimal;
use serde::Serialize;
use surrealdb::engine::local::Db;
use surrealdb::{RecordId, Surreal};

use crate::db::models::{Order, Product};
use crate::db::repository::{OrderRepository, ProductRepository, RepoResult};
use crate::money::{to_decimal, to_f64};

/// 单个商品的库存重建行
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct InventoryLine {
    pub product: String,
    pub price: f64,
    pub quantity_onhand: i64,
    pub quantity_sold: i64,
    pub inventory_value: f64,
    pub sales_value: f64,
    pub available_stock: i64,
    pub status: &'static str,
}

/// 库存状态分级
pub fn stock_status(available_stock: i64) -> &'static str {
    if available_stock == 0 {
        "Out of Stock"
    } else if available_stock < 10 {
        "Low Stock"
    } else {
        "In Stock"
    }
}

/// 从商品 + 订单历史重建库存报表行
///
/// `orders` 必须已排除软删除订单；每个商品对所有订单行做全量累加。
pub fn reconstruct_lines(products: &[Product], orders: &[Order]) -> Vec<InventoryLine> {
    products
        .iter()
        .map(|product| {
            let quantity_sold: i64 = orders
                .iter()
                .flat_map(|order| order.order_items.iter())
                .filter(|item| Some(&item.product) == product.id.as_ref())
                .map(|item| item.quantity)
                .sum();

            let available_stock = product.quantity;
            let quantity_onhand = available_stock + quantity_sold;

            let price = to_decimal(product.price);
            let inventory_value = Decimal::from(quantity_onhand) * price;
            let sales_value = Decimal::from(quantity_sold) * price;

            InventoryLine {
                product: product.product_name.clone(),
                price: product.price,
                quantity_onhand,
                quantity_sold,
                inventory_value: to_f64(inventory_value),
                sales_value: to_f64(sales_value),
                available_stock,
                status: stock_status(available_stock),
            }
        })
        .collect()
}

/// 构建店铺库存报表
pub async fn build_inventory(db: &Surreal<Db>, store: &RecordId) -> RepoResult<Vec<InventoryLine>> {
    let products = ProductRepository::new(db.clone()).find_all(store).await?;
    let orders = OrderRepository::new(db.clone()).find_all(store).await?;

    Ok(reconstruct_lines(&products, &orders))
}
