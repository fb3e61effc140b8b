// Copyright (c) 2025 Citers Contributors
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::score::CrawlCacheEntry;
use crate::domain::repositories::crawl_cache_repository::CrawlCacheRepository;
use crate::domain::repositories::job_repository::RepositoryError;
use crate::infrastructure::database::entities::crawl_cache as cache_entity;
use async_trait::async_trait;
use sea_orm::{
    sea_query::OnConflict, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set,
};
use std::sync::Arc;

/// 爬取缓存仓库实现
///
/// 基于SeaORM实现的缓存数据访问层。条目在
/// (domain, month)上唯一，冲突时静默忽略，写入保持幂等。
#[derive(Clone)]
pub struct CrawlCacheRepositoryImpl {
    /// 数据库连接
    db: Arc<DatabaseConnection>,
}

impl CrawlCacheRepositoryImpl {
    /// 创建新的缓存仓库实例
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

impl From<cache_entity::Model> for CrawlCacheEntry {
    fn from(model: cache_entity::Model) -> Self {
        Self {
            id: model.id,
            domain: model.domain,
            month: model.month,
            records_scanned: model.records_scanned,
            created_at: model.created_at,
        }
    }
}

#[async_trait]
impl CrawlCacheRepository for CrawlCacheRepositoryImpl {
    async fn find(
        &self,
        domain: &str,
        month: &str,
    ) -> Result<Option<CrawlCacheEntry>, RepositoryError> {
        let model = cache_entity::Entity::find()
            .filter(cache_entity::Column::Domain.eq(domain))
            .filter(cache_entity::Column::Month.eq(month))
            .one(self.db.as_ref())
            .await?;

        Ok(model.map(Into::into))
    }

    async fn insert(&self, entry: &CrawlCacheEntry) -> Result<(), RepositoryError> {
        let model = cache_entity::ActiveModel {
            id: Set(entry.id),
            domain: Set(entry.domain.clone()),
            month: Set(entry.month.clone()),
            records_scanned: Set(entry.records_scanned),
            created_at: Set(entry.created_at),
        };

        cache_entity::Entity::insert(model)
            .on_conflict(
                OnConflict::columns([cache_entity::Column::Domain, cache_entity::Column::Month])
                    .do_nothing()
                    .to_owned(),
            )
            .exec_without_returning(self.db.as_ref())
            .await?;

        Ok(())
    }
}
