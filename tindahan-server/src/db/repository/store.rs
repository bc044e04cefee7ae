//! Store Repository
//!
//! 店铺管理界面属于外部系统 — 这里只有按 owner 查找的读路径，
//! 外加种子/引导用的创建方法。

use surrealdb::engine::local::Db;
use surrealdb::{RecordId, Surreal};

use super::{BaseRepository, RepoError, RepoResult, user_record_id};
use crate::db::models::Store;

#[derive(Clone)]
pub struct StoreRepository {
    base: BaseRepository,
}

impl StoreRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Find the store owned by a user
    pub async fn find_by_owner(&self, owner: &RecordId) -> RepoResult<Option<Store>> {
        let mut result = self
            .base
            .db()
            .query("SELECT * FROM store WHERE owner = $owner AND is_delete = false LIMIT 1")
            .bind(("owner", owner.clone()))
            .await?;
        let stores: Vec<Store> = result.take(0)?;
        Ok(stores.into_iter().next())
    }

    /// 根据认证主体取其店铺，无店铺绑定时返回 NotFound
    ///
    /// 每个受保护接口的第一步 — 店铺范围从这里建立。
    pub async fn require_for_owner(&self, user_id: &str) -> RepoResult<Store> {
        let owner = user_record_id(user_id);
        self.find_by_owner(&owner)
            .await?
            .ok_or_else(|| RepoError::NotFound("Store not found".to_string()))
    }

    /// Create a store (seed/bootstrap path)
    pub async fn create(
        &self,
        owner: &RecordId,
        store_name: &str,
        phone_number: &str,
    ) -> RepoResult<Store> {
        let now = chrono::Utc::now().timestamp_millis();
        let mut result = self
            .base
            .db()
            .query(
                r#"CREATE store SET
                    owner = $owner,
                    store_name = $store_name,
                    address = NONE,
                    store_logo = "",
                    phone_number = $phone_number,
                    is_delete = false,
                    created_at = $now
                RETURN AFTER"#,
            )
            .bind(("owner", owner.clone()))
            .bind(("store_name", store_name.to_string()))
            .bind(("phone_number", phone_number.to_string()))
            .bind(("now", now))
            .await?;

        let created: Option<Store> = result.take(0)?;
        created.ok_or_else(|| RepoError::Database("Failed to create store".to_string()))
    }
}
