// Copyright (c) 2025 Citers Contributors
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::job::{Job, JobStatus};
use async_trait::async_trait;
use sea_orm::DbErr;
use thiserror::Error;
use uuid::Uuid;

/// 仓库错误类型
#[derive(Error, Debug)]
pub enum RepositoryError {
    /// 数据库错误
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
    /// 记录未找到
    #[error("Record not found")]
    NotFound,
}

/// 作业仓库特质
///
/// 定义作业数据访问接口。持久化的作业表是作业状态的
/// 唯一事实来源，进程内不保留权威副本。
#[async_trait]
pub trait JobRepository: Send + Sync {
    /// 创建新作业
    async fn create(&self, job: &Job) -> Result<Job, RepositoryError>;
    /// 根据ID查找作业
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Job>, RepositoryError>;
    /// 更新作业
    async fn update(&self, job: &Job) -> Result<Job, RepositoryError>;
    /// 更新作业进度与累计引用数
    async fn update_progress(
        &self,
        id: Uuid,
        progress: i32,
        total_citations: i32,
    ) -> Result<(), RepositoryError>;
}
