// Copyright (c) 2025 Citers Contributors
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::citation::{Citation, Sentiment};
use crate::domain::repositories::job_repository::RepositoryError;
use async_trait::async_trait;
use chrono::NaiveDate;
use uuid::Uuid;

/// 引用仓库特质
///
/// 定义引用数据访问接口。写入一律采用以自然标识
/// (user_id, domain, source_url, citation_text)为键的upsert，
/// 使重复发现与重跑保持幂等。
#[async_trait]
pub trait CitationRepository: Send + Sync {
    /// 按自然标识upsert一条引用，返回持久化后的行
    async fn upsert(&self, citation: &Citation) -> Result<Citation, RepositoryError>;
    /// 查找某(user, domain)下的全部引用
    async fn find_by_domain(
        &self,
        user_id: Uuid,
        domain: &str,
    ) -> Result<Vec<Citation>, RepositoryError>;
    /// 查找爬取日期落在给定窗口内的引用
    async fn find_by_date_range(
        &self,
        user_id: Uuid,
        domain: &str,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<Citation>, RepositoryError>;
    /// 回写情感与主题
    async fn update_classification(
        &self,
        id: Uuid,
        sentiment: Sentiment,
        topics: &[String],
    ) -> Result<(), RepositoryError>;
    /// 统计某(user, domain)下的引用数量
    async fn count_by_domain(&self, user_id: Uuid, domain: &str) -> Result<u64, RepositoryError>;
}
