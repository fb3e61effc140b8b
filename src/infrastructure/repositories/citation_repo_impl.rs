// Copyright (c) 2025 Citers Contributors
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::citation::{Citation, Sentiment};
use crate::domain::repositories::citation_repository::CitationRepository;
use crate::domain::repositories::job_repository::RepositoryError;
use crate::infrastructure::database::entities::citation as citation_entity;
use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use sea_orm::{
    sea_query::OnConflict, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, Set,
};
use std::sync::Arc;
use uuid::Uuid;

/// 引用仓库实现
///
/// 基于SeaORM实现的引用数据访问层。写入走
/// (user_id, domain, source_url, citation_text)唯一索引上的
/// upsert，重复发现时刷新上下文而不新增行；爬取日期保持
/// 首次发现时的月份锚点，行的月份归属不随重复发现漂移。
#[derive(Clone)]
pub struct CitationRepositoryImpl {
    /// 数据库连接
    db: Arc<DatabaseConnection>,
}

impl CitationRepositoryImpl {
    /// 创建新的引用仓库实例
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

impl From<citation_entity::Model> for Citation {
    fn from(model: citation_entity::Model) -> Self {
        Self {
            id: model.id,
            user_id: model.user_id,
            domain: model.domain,
            source_url: model.source_url,
            source_domain: model.source_domain,
            citation_type: model
                .citation_type
                .parse()
                .unwrap_or(crate::domain::models::citation::CitationType::Mention),
            citation_text: model.citation_text,
            anchor_text: model.anchor_text,
            context_before: model.context_before,
            context_after: model.context_after,
            dofollow: model.dofollow,
            crawl_date: model.crawl_date,
            sentiment: model.sentiment.parse().unwrap_or_default(),
            topics: serde_json::from_value(model.topics).unwrap_or_default(),
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

impl From<Citation> for citation_entity::ActiveModel {
    fn from(citation: Citation) -> Self {
        Self {
            id: Set(citation.id),
            user_id: Set(citation.user_id),
            domain: Set(citation.domain.clone()),
            source_url: Set(citation.source_url.clone()),
            source_domain: Set(citation.source_domain.clone()),
            citation_type: Set(citation.citation_type.to_string()),
            citation_text: Set(citation.citation_text.clone()),
            anchor_text: Set(citation.anchor_text.clone()),
            context_before: Set(citation.context_before.clone()),
            context_after: Set(citation.context_after.clone()),
            dofollow: Set(citation.dofollow),
            crawl_date: Set(citation.crawl_date),
            sentiment: Set(citation.sentiment.to_string()),
            topics: Set(serde_json::json!(citation.topics)),
            created_at: Set(citation.created_at),
            updated_at: Set(citation.updated_at),
        }
    }
}

#[async_trait]
impl CitationRepository for CitationRepositoryImpl {
    async fn upsert(&self, citation: &Citation) -> Result<Citation, RepositoryError> {
        let model: citation_entity::ActiveModel = citation.clone().into();

        citation_entity::Entity::insert(model)
            .on_conflict(
                OnConflict::columns([
                    citation_entity::Column::UserId,
                    citation_entity::Column::Domain,
                    citation_entity::Column::SourceUrl,
                    citation_entity::Column::CitationText,
                ])
                .update_columns([
                    citation_entity::Column::SourceDomain,
                    citation_entity::Column::CitationType,
                    citation_entity::Column::AnchorText,
                    citation_entity::Column::ContextBefore,
                    citation_entity::Column::ContextAfter,
                    citation_entity::Column::Dofollow,
                    citation_entity::Column::UpdatedAt,
                ])
                .to_owned(),
            )
            .exec_without_returning(self.db.as_ref())
            .await?;

        // 冲突时保留原行的id，按自然标识取回持久化结果
        let persisted = citation_entity::Entity::find()
            .filter(citation_entity::Column::UserId.eq(citation.user_id))
            .filter(citation_entity::Column::Domain.eq(citation.domain.as_str()))
            .filter(citation_entity::Column::SourceUrl.eq(citation.source_url.as_str()))
            .filter(citation_entity::Column::CitationText.eq(citation.citation_text.as_str()))
            .one(self.db.as_ref())
            .await?
            .ok_or(RepositoryError::NotFound)?;

        Ok(persisted.into())
    }

    async fn find_by_domain(
        &self,
        user_id: Uuid,
        domain: &str,
    ) -> Result<Vec<Citation>, RepositoryError> {
        let models = citation_entity::Entity::find()
            .filter(citation_entity::Column::UserId.eq(user_id))
            .filter(citation_entity::Column::Domain.eq(domain))
            .order_by_asc(citation_entity::Column::CrawlDate)
            .all(self.db.as_ref())
            .await?;

        Ok(models.into_iter().map(Into::into).collect())
    }

    async fn find_by_date_range(
        &self,
        user_id: Uuid,
        domain: &str,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<Citation>, RepositoryError> {
        let models = citation_entity::Entity::find()
            .filter(citation_entity::Column::UserId.eq(user_id))
            .filter(citation_entity::Column::Domain.eq(domain))
            .filter(citation_entity::Column::CrawlDate.gte(from))
            .filter(citation_entity::Column::CrawlDate.lte(to))
            .order_by_asc(citation_entity::Column::CrawlDate)
            .all(self.db.as_ref())
            .await?;

        Ok(models.into_iter().map(Into::into).collect())
    }

    async fn update_classification(
        &self,
        id: Uuid,
        sentiment: Sentiment,
        topics: &[String],
    ) -> Result<(), RepositoryError> {
        let model = citation_entity::ActiveModel {
            id: Set(id),
            sentiment: Set(sentiment.to_string()),
            topics: Set(serde_json::json!(topics)),
            updated_at: Set(Utc::now().into()),
            ..Default::default()
        };

        citation_entity::Entity::update(model)
            .exec(self.db.as_ref())
            .await
            .map_err(|e| match e {
                DbErr::RecordNotUpdated => RepositoryError::NotFound,
                e => RepositoryError::Database(e),
            })?;

        Ok(())
    }

    async fn count_by_domain(&self, user_id: Uuid, domain: &str) -> Result<u64, RepositoryError> {
        let count = citation_entity::Entity::find()
            .filter(citation_entity::Column::UserId.eq(user_id))
            .filter(citation_entity::Column::Domain.eq(domain))
            .count(self.db.as_ref())
            .await?;

        Ok(count)
    }
}
