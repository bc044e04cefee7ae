//! Product Repository
//!
//! 商品目录的店铺范围 CRUD。库存扣减不在这里 — 扣减只发生在
//! [`OrderRepository::create_with_ledger`](super::OrderRepository::create_with_ledger)
//! 的事务内。

use surrealdb::engine::local::Db;
use surrealdb::{RecordId, Surreal};

use super::{BaseRepository, RepoError, RepoResult};
use crate::db::models::{DEFAULT_PRODUCT_IMAGE, Product, ProductCreate, ProductUpdate};

#[derive(Clone)]
pub struct ProductRepository {
    base: BaseRepository,
}

impl ProductRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Find all non-deleted products of a store
    pub async fn find_all(&self, store: &RecordId) -> RepoResult<Vec<Product>> {
        let products: Vec<Product> = self
            .base
            .db()
            .query(
                "SELECT * FROM product WHERE store = $store AND is_delete = false ORDER BY product_name",
            )
            .bind(("store", store.clone()))
            .await?
            .take(0)?;
        Ok(products)
    }

    /// Find product by id
    pub async fn find_by_id(&self, id: &RecordId) -> RepoResult<Option<Product>> {
        let product: Option<Product> = self.base.db().select(id.clone()).await?;
        Ok(product)
    }

    /// Find a non-deleted product by name within a store
    pub async fn find_by_name(&self, store: &RecordId, name: &str) -> RepoResult<Option<Product>> {
        let mut result = self
            .base
            .db()
            .query(
                "SELECT * FROM product WHERE store = $store AND product_name = $name AND is_delete = false LIMIT 1",
            )
            .bind(("store", store.clone()))
            .bind(("name", name.to_string()))
            .await?;
        let products: Vec<Product> = result.take(0)?;
        Ok(products.into_iter().next())
    }

    /// Create a new product
    pub async fn create(&self, store: &RecordId, data: ProductCreate) -> RepoResult<Product> {
        // 同店铺内商品名唯一
        if self.find_by_name(store, &data.product_name).await?.is_some() {
            return Err(RepoError::Duplicate(format!(
                "Product '{}' already exists",
                data.product_name
            )));
        }

        let image = match data.product_image {
            Some(image) if !image.is_empty() => image,
            _ => DEFAULT_PRODUCT_IMAGE.to_string(),
        };
        let now = chrono::Utc::now().timestamp_millis();

        let mut result = self
            .base
            .db()
            .query(
                r#"CREATE product SET
                    store = $store,
                    price = $price,
                    quantity = $quantity,
                    product_name = $product_name,
                    product_description = $product_description,
                    product_image = $product_image,
                    is_delete = false,
                    created_at = $now,
                    updated_at = $now
                RETURN AFTER"#,
            )
            .bind(("store", store.clone()))
            .bind(("price", data.price))
            .bind(("quantity", data.quantity))
            .bind(("product_name", data.product_name))
            .bind(("product_description", data.product_description))
            .bind(("product_image", image))
            .bind(("now", now))
            .await?;

        let created: Option<Product> = result.take(0)?;
        created.ok_or_else(|| RepoError::Database("Failed to create product".to_string()))
    }

    /// Update a product (缺省字段保持不变)
    pub async fn update(&self, id: &RecordId, data: ProductUpdate) -> RepoResult<Product> {
        let mut sets: Vec<&str> = Vec::new();
        if data.price.is_some() {
            sets.push("price = $price");
        }
        if data.quantity.is_some() {
            sets.push("quantity = $quantity");
        }
        if data.product_name.is_some() {
            sets.push("product_name = $product_name");
        }
        if data.product_description.is_some() {
            sets.push("product_description = $product_description");
        }
        if data.product_image.is_some() {
            sets.push("product_image = $product_image");
        }
        sets.push("updated_at = $now");

        let sql = format!("UPDATE $id SET {} RETURN AFTER", sets.join(", "));
        let now = chrono::Utc::now().timestamp_millis();

        let mut query = self
            .base
            .db()
            .query(sql)
            .bind(("id", id.clone()))
            .bind(("now", now));
        if let Some(price) = data.price {
            query = query.bind(("price", price));
        }
        if let Some(quantity) = data.quantity {
            query = query.bind(("quantity", quantity));
        }
        if let Some(product_name) = data.product_name {
            query = query.bind(("product_name", product_name));
        }
        if let Some(product_description) = data.product_description {
            query = query.bind(("product_description", product_description));
        }
        if let Some(product_image) = data.product_image {
            query = query.bind(("product_image", product_image));
        }

        let mut result = query.await?;
        let updated: Option<Product> = result.take(0)?;
        updated.ok_or_else(|| RepoError::NotFound(format!("Product {} not found", id)))
    }

    /// Soft-delete a product (记录保留，从列表/聚合中隐藏)
    pub async fn soft_delete(&self, id: &RecordId) -> RepoResult<()> {
        let now = chrono::Utc::now().timestamp_millis();
        let mut result = self
            .base
            .db()
            .query("UPDATE $id SET is_delete = true, updated_at = $now RETURN AFTER")
            .bind(("id", id.clone()))
            .bind(("now", now))
            .await?;
        let updated: Option<Product> = result.take(0)?;
        updated
            .map(|_| ())
            .ok_or_else(|| RepoError::NotFound(format!("Product {} not found", id)))
    }
}
