//! 库存重建的集成测试
//!
//! Run: cargo test -p tindahan-server --test inventory_report

mod common;

use common::{place_order, reload_product, seed_product, setup};
use tindahan_server::db::models::OrderType;
use tindahan_server::db::repository::{OrderRepository, ProductRepository, RepoError};
use tindahan_server::reports::inventory::build_inventory;

#[tokio::test]
async fn worked_scenario_reconstructs_the_history() {
    let ctx = setup().await;
    // Product P starts at quantity 20, price 100
    let p = seed_product(&ctx, "P", 100.0, 20).await;

    // Order A: 5 units → ok
    let order_a = place_order(&ctx, &[(p.clone(), 5)], 1_000).await;
    assert_eq!(order_a.order_total, 500.0);
    assert_eq!(reload_product(&ctx, &p).await.quantity, 15);

    // Order B: 20 units → insufficient, stock remains 15
    let err = OrderRepository::new(ctx.db.clone())
        .create_with_ledger(
            &ctx.store_id,
            &ctx.user_id,
            &[(p.clone(), 20)],
            OrderType::WalkIn,
            None,
            2_000,
        )
        .await
        .unwrap_err();
    assert!(matches!(err, RepoError::InsufficientStock(_)));
    assert_eq!(reload_product(&ctx, &p).await.quantity, 15);

    let lines = build_inventory(&ctx.db, &ctx.store_id).await.unwrap();
    assert_eq!(lines.len(), 1);
    let line = &lines[0];
    assert_eq!(line.product, "P");
    assert_eq!(line.available_stock, 15);
    assert_eq!(line.quantity_sold, 5);
    assert_eq!(line.quantity_onhand, 20);
    assert_eq!(line.inventory_value, 2000.0);
    assert_eq!(line.sales_value, 500.0);
    assert_eq!(line.status, "In Stock");
}

#[tokio::test]
async fn onhand_equals_stock_plus_sold_across_histories() {
    let ctx = setup().await;
    let bigas = seed_product(&ctx, "Bigas 5kg", 100.0, 30).await;
    let toyo = seed_product(&ctx, "Toyo", 25.0, 12).await;

    place_order(&ctx, &[(bigas.clone(), 4), (toyo.clone(), 3)], 1_000).await;
    place_order(&ctx, &[(bigas.clone(), 6)], 2_000).await;
    place_order(&ctx, &[(toyo.clone(), 4)], 3_000).await;

    let lines = build_inventory(&ctx.db, &ctx.store_id).await.unwrap();
    for line in &lines {
        assert_eq!(
            line.quantity_onhand,
            line.available_stock + line.quantity_sold,
            "derivation invariant broken for {}",
            line.product
        );
    }

    let bigas_line = lines.iter().find(|l| l.product == "Bigas 5kg").unwrap();
    assert_eq!(bigas_line.quantity_sold, 10);
    assert_eq!(bigas_line.available_stock, 20);
}

#[tokio::test]
async fn stock_status_tracks_remaining_quantity() {
    let ctx = setup().await;
    let ubos = seed_product(&ctx, "Ubos", 10.0, 4).await;
    let konti = seed_product(&ctx, "Konti", 10.0, 12).await;

    // Ubos down to 0, Konti down to 9
    place_order(&ctx, &[(ubos, 4), (konti, 3)], 1_000).await;

    let lines = build_inventory(&ctx.db, &ctx.store_id).await.unwrap();
    let ubos_line = lines.iter().find(|l| l.product == "Ubos").unwrap();
    let konti_line = lines.iter().find(|l| l.product == "Konti").unwrap();

    assert_eq!(ubos_line.status, "Out of Stock");
    assert_eq!(konti_line.status, "Low Stock");
}

#[tokio::test]
async fn deleted_orders_no_longer_count_as_sold() {
    let ctx = setup().await;
    let bigas = seed_product(&ctx, "Bigas 5kg", 100.0, 20).await;
    let order = place_order(&ctx, &[(bigas.clone(), 5)], 1_000).await;

    OrderRepository::new(ctx.db.clone())
        .delete_with_ledger(&order.id.unwrap())
        .await
        .unwrap();

    // 删除订单不回补库存 — 推导出的在手数量随之下移
    let lines = build_inventory(&ctx.db, &ctx.store_id).await.unwrap();
    assert_eq!(lines[0].quantity_sold, 0);
    assert_eq!(lines[0].available_stock, 15);
    assert_eq!(lines[0].quantity_onhand, 15);
}

#[tokio::test]
async fn soft_deleted_products_are_not_reported() {
    let ctx = setup().await;
    seed_product(&ctx, "Visible", 10.0, 5).await;
    let hidden = seed_product(&ctx, "Hidden", 10.0, 5).await;

    ProductRepository::new(ctx.db.clone())
        .soft_delete(&hidden)
        .await
        .unwrap();

    let lines = build_inventory(&ctx.db, &ctx.store_id).await.unwrap();
    assert_eq!(lines.len(), 1);
    assert_eq!(lines[0].product, "Visible");
}

#[tokio::test]
async fn repeated_reads_are_identical() {
    let ctx = setup().await;
    let bigas = seed_product(&ctx, "Bigas 5kg", 100.0, 20).await;
    place_order(&ctx, &[(bigas, 5)], 1_000).await;

    let first = build_inventory(&ctx.db, &ctx.store_id).await.unwrap();
    let second = build_inventory(&ctx.db, &ctx.store_id).await.unwrap();
    assert_eq!(first, second);
}
