// Copyright (c) 2025 Citers Contributors
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::application::dto::analyze_request::AnalyzeRequestDto;
use crate::application::dto::job_response::JobResultsResponseDto;
use crate::domain::models::job::{Job, JobKind, JobStatus};
use crate::domain::repositories::citation_repository::CitationRepository;
use crate::domain::repositories::job_repository::{JobRepository, RepositoryError};
use crate::domain::repositories::score_repository::ScoreRepository;
use crate::workers::runner::JobRunner;
use std::sync::Arc;
use thiserror::Error;
use tracing::info;
use uuid::Uuid;
use validator::Validate;

/// 分析用例错误类型
#[derive(Error, Debug)]
pub enum AnalyzeUseCaseError {
    /// 请求校验失败
    #[error("Validation failed: {0}")]
    Validation(String),
    /// 仓库错误
    #[error("Repository error: {0}")]
    Repository(#[from] RepositoryError),
    /// 作业不存在
    #[error("Job not found")]
    NotFound,
    /// 作业尚未完成
    #[error("Job is still {0}")]
    NotCompleted(String),
}

/// 引用分析用例
///
/// 受理分析请求、查询作业状态与读取完整结果。
/// 提交与执行解耦：创建请求只落库并投递，从不等待。
pub struct AnalyzeUseCase<J, C, S>
where
    J: JobRepository,
    C: CitationRepository,
    S: ScoreRepository,
{
    job_repo: Arc<J>,
    citation_repo: Arc<C>,
    score_repo: Arc<S>,
    runner: Arc<dyn JobRunner>,
}

impl<J, C, S> AnalyzeUseCase<J, C, S>
where
    J: JobRepository,
    C: CitationRepository,
    S: ScoreRepository,
{
    /// 创建新的分析用例实例
    pub fn new(
        job_repo: Arc<J>,
        citation_repo: Arc<C>,
        score_repo: Arc<S>,
        runner: Arc<dyn JobRunner>,
    ) -> Self {
        Self {
            job_repo,
            citation_repo,
            score_repo,
            runner,
        }
    }

    /// 发起一次引用分析
    ///
    /// 创建作业行并投递后台任务，立即返回作业标识
    pub async fn start_analysis(
        &self,
        dto: AnalyzeRequestDto,
    ) -> Result<Job, AnalyzeUseCaseError> {
        dto.validate()
            .map_err(|e| AnalyzeUseCaseError::Validation(e.to_string()))?;

        let job = Job::new(
            dto.user_id,
            dto.domain.to_lowercase(),
            JobKind::Initial,
            dto.months,
            None,
        );
        let job = self.job_repo.create(&job).await?;
        self.runner.spawn(job.clone());

        info!(job_id = %job.id, domain = %job.domain, "Analysis job accepted");
        Ok(job)
    }

    /// 查询作业状态
    pub async fn job_status(&self, id: Uuid) -> Result<Job, AnalyzeUseCaseError> {
        self.job_repo
            .find_by_id(id)
            .await?
            .ok_or(AnalyzeUseCaseError::NotFound)
    }

    /// 读取已完成作业的全部结果
    pub async fn job_results(
        &self,
        id: Uuid,
    ) -> Result<JobResultsResponseDto, AnalyzeUseCaseError> {
        let job = self
            .job_repo
            .find_by_id(id)
            .await?
            .ok_or(AnalyzeUseCaseError::NotFound)?;

        if job.status != JobStatus::Completed {
            return Err(AnalyzeUseCaseError::NotCompleted(job.status.to_string()));
        }

        let citations = self
            .citation_repo
            .find_by_domain(job.user_id, &job.domain)
            .await?;
        let scores = self
            .score_repo
            .find_scores_by_domain(job.user_id, &job.domain)
            .await?;
        let monthly_summaries = self
            .score_repo
            .find_summaries_by_domain(job.user_id, &job.domain)
            .await?;

        Ok(JobResultsResponseDto {
            job_id: job.id,
            domain: job.domain,
            total_citations: job.total_citations,
            citations,
            scores,
            monthly_summaries,
        })
    }
}
