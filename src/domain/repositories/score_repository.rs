// Copyright (c) 2025 Citers Contributors
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::score::{CitationScore, MonthlyCitationSummary};
use crate::domain::repositories::job_repository::RepositoryError;
use async_trait::async_trait;
use uuid::Uuid;

/// 评分仓库特质
///
/// 管理月度评分与月度摘要两类派生行。两者在
/// (user_id, domain, month)上唯一，重算同一月份时
/// upsert覆盖而不产生重复。
#[async_trait]
pub trait ScoreRepository: Send + Sync {
    /// upsert一条月度评分
    async fn upsert_score(&self, score: &CitationScore) -> Result<(), RepositoryError>;
    /// upsert一条月度摘要
    async fn upsert_summary(
        &self,
        summary: &MonthlyCitationSummary,
    ) -> Result<(), RepositoryError>;
    /// 查找某(user, domain)下的全部月度评分，按月份升序
    async fn find_scores_by_domain(
        &self,
        user_id: Uuid,
        domain: &str,
    ) -> Result<Vec<CitationScore>, RepositoryError>;
    /// 查找某(user, domain)下的全部月度摘要，按月份升序
    async fn find_summaries_by_domain(
        &self,
        user_id: Uuid,
        domain: &str,
    ) -> Result<Vec<MonthlyCitationSummary>, RepositoryError>;
}
