//! 集成测试共用工具 — 临时目录里的嵌入式数据库 + 种子店铺
#![allow(dead_code)]

use surrealdb::engine::local::Db;
use surrealdb::{RecordId, Surreal};
use tempfile::TempDir;

use tindahan_server::db::DbService;
use tindahan_server::db::models::{Order, OrderType, Product, ProductCreate};
use tindahan_server::db::repository::{OrderRepository, ProductRepository, StoreRepository};

pub struct TestContext {
    pub db: Surreal<Db>,
    pub store_id: RecordId,
    pub user_id: RecordId,
    // Keeps the database directory alive for the test's duration
    _tmp: TempDir,
}

/// 新建临时数据库 + 一个种子店铺
pub async fn setup() -> TestContext {
    let tmp = tempfile::tempdir().unwrap();
    let service = DbService::new(&tmp.path().join("tindahan.db")).await.unwrap();
    let db = service.db;

    let user_id = RecordId::from_table_key("user", "owner1");
    let store = StoreRepository::new(db.clone())
        .create(&user_id, "Aling Nena Tindahan", "09171234567")
        .await
        .unwrap();

    TestContext {
        db,
        store_id: store.id.unwrap(),
        user_id,
        _tmp: tmp,
    }
}

/// 种入一个商品，返回其 id
pub async fn seed_product(ctx: &TestContext, name: &str, price: f64, quantity: i64) -> RecordId {
    let product = ProductRepository::new(ctx.db.clone())
        .create(
            &ctx.store_id,
            ProductCreate {
                price,
                quantity,
                product_name: name.to_string(),
                product_description: format!("{} (seeded)", name),
                product_image: None,
            },
        )
        .await
        .unwrap();
    product.id.unwrap()
}

/// 走柜台订单快捷下单
pub async fn place_order(
    ctx: &TestContext,
    lines: &[(RecordId, i64)],
    order_date: i64,
) -> Order {
    OrderRepository::new(ctx.db.clone())
        .create_with_ledger(
            &ctx.store_id,
            &ctx.user_id,
            lines,
            OrderType::WalkIn,
            None,
            order_date,
        )
        .await
        .unwrap()
}

/// 读回商品当前状态
pub async fn reload_product(ctx: &TestContext, id: &RecordId) -> Product {
    ProductRepository::new(ctx.db.clone())
        .find_by_id(id)
        .await
        .unwrap()
        .unwrap()
}
