// Copyright (c) 2025 Citers Contributors
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::score::CrawlCacheEntry;
use crate::domain::repositories::job_repository::RepositoryError;
use async_trait::async_trait;

/// 爬取缓存仓库特质
///
/// 缓存条目是纯备忘录：命中即跳过存档扫描，
/// 但引用内容始终从引用存储重新读取。
#[async_trait]
pub trait CrawlCacheRepository: Send + Sync {
    /// 查找某(domain, month)的缓存条目
    async fn find(
        &self,
        domain: &str,
        month: &str,
    ) -> Result<Option<CrawlCacheEntry>, RepositoryError>;
    /// 写入缓存条目；同键重复写入保持幂等
    async fn insert(&self, entry: &CrawlCacheEntry) -> Result<(), RepositoryError>;
}
