// Copyright (c) 2025 Citers Contributors
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::job::Job;
use crate::domain::repositories::job_repository::{JobRepository, RepositoryError};
use crate::infrastructure::database::entities::job as job_entity;
use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{ActiveModelTrait, DatabaseConnection, DbErr, EntityTrait, Set};
use std::sync::Arc;
use uuid::Uuid;

/// 作业仓库实现
///
/// 基于SeaORM实现的作业数据访问层
#[derive(Clone)]
pub struct JobRepositoryImpl {
    /// 数据库连接
    db: Arc<DatabaseConnection>,
}

impl JobRepositoryImpl {
    /// 创建新的作业仓库实例
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

impl From<job_entity::Model> for Job {
    fn from(model: job_entity::Model) -> Self {
        Self {
            id: model.id,
            user_id: model.user_id,
            domain: model.domain,
            kind: model.job_kind.parse().unwrap_or_default(),
            status: model.status.parse().unwrap_or_default(),
            months: serde_json::from_value(model.months).unwrap_or_default(),
            progress: model.progress,
            total_citations: model.total_citations,
            error_message: model.error_message,
            requested_by_domain: model.requested_by_domain,
            started_at: model.started_at,
            completed_at: model.completed_at,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

impl From<Job> for job_entity::ActiveModel {
    fn from(job: Job) -> Self {
        Self {
            id: Set(job.id),
            user_id: Set(job.user_id),
            domain: Set(job.domain.clone()),
            job_kind: Set(job.kind.to_string()),
            status: Set(job.status.to_string()),
            months: Set(serde_json::json!(job.months)),
            progress: Set(job.progress),
            total_citations: Set(job.total_citations),
            error_message: Set(job.error_message.clone()),
            requested_by_domain: Set(job.requested_by_domain.clone()),
            started_at: Set(job.started_at),
            completed_at: Set(job.completed_at),
            created_at: Set(job.created_at),
            updated_at: Set(job.updated_at),
        }
    }
}

#[async_trait]
impl JobRepository for JobRepositoryImpl {
    async fn create(&self, job: &Job) -> Result<Job, RepositoryError> {
        let model: job_entity::ActiveModel = job.clone().into();

        model.insert(self.db.as_ref()).await?;
        Ok(job.clone())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Job>, RepositoryError> {
        let model = job_entity::Entity::find_by_id(id)
            .one(self.db.as_ref())
            .await?;

        Ok(model.map(Into::into))
    }

    async fn update(&self, job: &Job) -> Result<Job, RepositoryError> {
        let mut model: job_entity::ActiveModel = job.clone().into();
        model.updated_at = Set(Utc::now().into());

        let updated = job_entity::Entity::update(model)
            .exec(self.db.as_ref())
            .await
            .map_err(|e| match e {
                DbErr::RecordNotUpdated => RepositoryError::NotFound,
                e => RepositoryError::Database(e),
            })?;

        Ok(updated.into())
    }

    async fn update_progress(
        &self,
        id: Uuid,
        progress: i32,
        total_citations: i32,
    ) -> Result<(), RepositoryError> {
        let model = job_entity::ActiveModel {
            id: Set(id),
            progress: Set(progress),
            total_citations: Set(total_citations),
            updated_at: Set(Utc::now().into()),
            ..Default::default()
        };

        job_entity::Entity::update(model)
            .exec(self.db.as_ref())
            .await
            .map_err(|e| match e {
                DbErr::RecordNotUpdated => RepositoryError::NotFound,
                e => RepositoryError::Database(e),
            })?;

        Ok(())
    }
}
