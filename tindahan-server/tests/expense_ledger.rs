//! 支出与账本流水的集成测试
//!
//! 支出软删除刻意不回收流水 — 账本保留审计记录 (见 DESIGN.md)。
//!
//! Run: cargo test -p tindahan-server --test expense_ledger

mod common;

use common::setup;
use tindahan_server::db::models::{ExpenseCreate, ExpenseUpdate, TransactionType};
use tindahan_server::db::repository::{ExpenseRepository, TransactionRepository};

fn sample_expense(price: f64) -> ExpenseCreate {
    ExpenseCreate {
        expenses_title: "Kuryente".to_string(),
        expenses_description: "Monthly electricity bill".to_string(),
        expenses_price: price,
        expenses_date: 1_000,
    }
}

#[tokio::test]
async fn expense_mirrors_a_ledger_transaction() {
    let ctx = setup().await;

    let expense = ExpenseRepository::new(ctx.db.clone())
        .create_with_ledger(&ctx.store_id, &ctx.user_id, sample_expense(750.0))
        .await
        .unwrap();

    let expense_id = expense.id.clone().unwrap();
    let txn = TransactionRepository::new(ctx.db.clone())
        .find_by_source(&expense_id)
        .await
        .unwrap()
        .expect("expense must have a paired transaction");

    assert_eq!(txn.order_type, TransactionType::Expenses);
    assert_eq!(txn.order_total, 750.0);
    assert_eq!(txn.order_date, expense.expenses_date);
    // 单行：支出自身，数量 1，标题作名称
    assert_eq!(txn.order_items.len(), 1);
    assert_eq!(txn.order_items[0].quantity, 1);
    assert_eq!(txn.order_items[0].price, 750.0);
    assert_eq!(txn.order_items[0].product_name, "Kuryente");
    assert_eq!(txn.order_items[0].product, expense_id);
}

#[tokio::test]
async fn soft_delete_hides_expense_but_keeps_ledger_entry() {
    let ctx = setup().await;
    let repo = ExpenseRepository::new(ctx.db.clone());

    let expense = repo
        .create_with_ledger(&ctx.store_id, &ctx.user_id, sample_expense(300.0))
        .await
        .unwrap();
    let expense_id = expense.id.unwrap();

    repo.soft_delete(&expense_id).await.unwrap();

    // 从列表与合计中消失
    assert!(repo.find_all(&ctx.store_id).await.unwrap().is_empty());
    assert_eq!(repo.total_expenses(&ctx.store_id).await.unwrap(), 0.0);

    // 但记录本身与流水都还在
    let hidden = repo.find_by_id(&expense_id).await.unwrap().unwrap();
    assert!(hidden.is_delete);
    assert!(
        TransactionRepository::new(ctx.db.clone())
            .find_by_source(&expense_id)
            .await
            .unwrap()
            .is_some(),
        "ledger entry must survive expense soft-delete"
    );
}

#[tokio::test]
async fn expense_update_does_not_rewrite_the_ledger() {
    let ctx = setup().await;
    let repo = ExpenseRepository::new(ctx.db.clone());

    let expense = repo
        .create_with_ledger(&ctx.store_id, &ctx.user_id, sample_expense(300.0))
        .await
        .unwrap();
    let expense_id = expense.id.unwrap();

    let updated = repo
        .update(
            &expense_id,
            ExpenseUpdate {
                expenses_title: None,
                expenses_description: None,
                expenses_price: Some(450.0),
                expenses_date: None,
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.expenses_price, 450.0);

    // 流水是只追加投影，保持创建时的金额
    let txn = TransactionRepository::new(ctx.db.clone())
        .find_by_source(&expense_id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(txn.order_total, 300.0);
}

#[tokio::test]
async fn totals_only_count_live_expenses() {
    let ctx = setup().await;
    let repo = ExpenseRepository::new(ctx.db.clone());

    repo.create_with_ledger(&ctx.store_id, &ctx.user_id, sample_expense(100.0))
        .await
        .unwrap();
    let doomed = repo
        .create_with_ledger(&ctx.store_id, &ctx.user_id, sample_expense(40.0))
        .await
        .unwrap();
    repo.soft_delete(&doomed.id.unwrap()).await.unwrap();

    assert_eq!(repo.total_expenses(&ctx.store_id).await.unwrap(), 100.0);
    assert_eq!(repo.find_all(&ctx.store_id).await.unwrap().len(), 1);
}
