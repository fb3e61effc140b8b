// Copyright (c) 2025 Citers Contributors
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::score::{CitationScore, MonthlyCitationSummary};
use crate::domain::repositories::job_repository::RepositoryError;
use crate::domain::repositories::score_repository::ScoreRepository;
use crate::infrastructure::database::entities::citation_score as score_entity;
use crate::infrastructure::database::entities::monthly_summary as summary_entity;
use async_trait::async_trait;
use sea_orm::{
    sea_query::OnConflict, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder,
    Set,
};
use std::sync::Arc;
use uuid::Uuid;

/// 评分仓库实现
///
/// 基于SeaORM实现的评分与月度摘要数据访问层。两张表
/// 都在(user_id, domain, month)上唯一，重算同一月份时
/// upsert覆盖旧行。
#[derive(Clone)]
pub struct ScoreRepositoryImpl {
    /// 数据库连接
    db: Arc<DatabaseConnection>,
}

impl ScoreRepositoryImpl {
    /// 创建新的评分仓库实例
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

impl From<score_entity::Model> for CitationScore {
    fn from(model: score_entity::Model) -> Self {
        Self {
            id: model.id,
            user_id: model.user_id,
            domain: model.domain,
            month: model.month,
            total_citations: model.total_citations,
            link_count: model.link_count,
            mention_count: model.mention_count,
            unique_domains: model.unique_domains,
            positive_count: model.positive_count,
            neutral_count: model.neutral_count,
            negative_count: model.negative_count,
            topics: serde_json::from_value(model.topics).unwrap_or_default(),
            score: model.score,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

impl From<summary_entity::Model> for MonthlyCitationSummary {
    fn from(model: summary_entity::Model) -> Self {
        Self {
            id: model.id,
            user_id: model.user_id,
            domain: model.domain,
            month: model.month,
            citation_count: model.citation_count,
            link_count: model.link_count,
            mention_count: model.mention_count,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

#[async_trait]
impl ScoreRepository for ScoreRepositoryImpl {
    async fn upsert_score(&self, score: &CitationScore) -> Result<(), RepositoryError> {
        let model = score_entity::ActiveModel {
            id: Set(score.id),
            user_id: Set(score.user_id),
            domain: Set(score.domain.clone()),
            month: Set(score.month.clone()),
            total_citations: Set(score.total_citations),
            link_count: Set(score.link_count),
            mention_count: Set(score.mention_count),
            unique_domains: Set(score.unique_domains),
            positive_count: Set(score.positive_count),
            neutral_count: Set(score.neutral_count),
            negative_count: Set(score.negative_count),
            topics: Set(serde_json::json!(score.topics)),
            score: Set(score.score),
            created_at: Set(score.created_at),
            updated_at: Set(score.updated_at),
        };

        score_entity::Entity::insert(model)
            .on_conflict(
                OnConflict::columns([
                    score_entity::Column::UserId,
                    score_entity::Column::Domain,
                    score_entity::Column::Month,
                ])
                .update_columns([
                    score_entity::Column::TotalCitations,
                    score_entity::Column::LinkCount,
                    score_entity::Column::MentionCount,
                    score_entity::Column::UniqueDomains,
                    score_entity::Column::PositiveCount,
                    score_entity::Column::NeutralCount,
                    score_entity::Column::NegativeCount,
                    score_entity::Column::Topics,
                    score_entity::Column::Score,
                    score_entity::Column::UpdatedAt,
                ])
                .to_owned(),
            )
            .exec_without_returning(self.db.as_ref())
            .await?;

        Ok(())
    }

    async fn upsert_summary(
        &self,
        summary: &MonthlyCitationSummary,
    ) -> Result<(), RepositoryError> {
        let model = summary_entity::ActiveModel {
            id: Set(summary.id),
            user_id: Set(summary.user_id),
            domain: Set(summary.domain.clone()),
            month: Set(summary.month.clone()),
            citation_count: Set(summary.citation_count),
            link_count: Set(summary.link_count),
            mention_count: Set(summary.mention_count),
            created_at: Set(summary.created_at),
            updated_at: Set(summary.updated_at),
        };

        summary_entity::Entity::insert(model)
            .on_conflict(
                OnConflict::columns([
                    summary_entity::Column::UserId,
                    summary_entity::Column::Domain,
                    summary_entity::Column::Month,
                ])
                .update_columns([
                    summary_entity::Column::CitationCount,
                    summary_entity::Column::LinkCount,
                    summary_entity::Column::MentionCount,
                    summary_entity::Column::UpdatedAt,
                ])
                .to_owned(),
            )
            .exec_without_returning(self.db.as_ref())
            .await?;

        Ok(())
    }

    async fn find_scores_by_domain(
        &self,
        user_id: Uuid,
        domain: &str,
    ) -> Result<Vec<CitationScore>, RepositoryError> {
        let models = score_entity::Entity::find()
            .filter(score_entity::Column::UserId.eq(user_id))
            .filter(score_entity::Column::Domain.eq(domain))
            .order_by_asc(score_entity::Column::Month)
            .all(self.db.as_ref())
            .await?;

        Ok(models.into_iter().map(Into::into).collect())
    }

    async fn find_summaries_by_domain(
        &self,
        user_id: Uuid,
        domain: &str,
    ) -> Result<Vec<MonthlyCitationSummary>, RepositoryError> {
        let models = summary_entity::Entity::find()
            .filter(summary_entity::Column::UserId.eq(user_id))
            .filter(summary_entity::Column::Domain.eq(domain))
            .order_by_asc(summary_entity::Column::Month)
            .all(self.db.as_ref())
            .await?;

        Ok(models.into_iter().map(Into::into).collect())
    }
}
