// Copyright (c) 2025 Citers Contributors
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use axum::{
    extract::{Extension, Path},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde_json::json;
use std::sync::Arc;
use uuid::Uuid;

use crate::{
    application::{
        dto::analyze_request::{AnalyzeRequestDto, AnalyzeResponseDto},
        dto::compare_request::CompareRequestDto,
        dto::job_response::JobStatusResponseDto,
        use_cases::{AnalyzeUseCase, AnalyzeUseCaseError, CompareUseCase, CompareUseCaseError},
    },
    domain::repositories::{
        citation_repository::CitationRepository, job_repository::JobRepository,
        score_repository::ScoreRepository,
    },
    domain::services::classifier_service::ClassifierService,
    workers::runner::JobRunner,
};

impl From<AnalyzeUseCaseError> for (StatusCode, String) {
    fn from(e: AnalyzeUseCaseError) -> Self {
        match e {
            AnalyzeUseCaseError::Validation(msg) => (StatusCode::BAD_REQUEST, msg),
            AnalyzeUseCaseError::NotFound => (StatusCode::NOT_FOUND, "Job not found".to_string()),
            AnalyzeUseCaseError::NotCompleted(status) => (
                StatusCode::CONFLICT,
                format!("Job is still {status}, results not available yet"),
            ),
            AnalyzeUseCaseError::Repository(e) => {
                (StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
            }
        }
    }
}

impl From<CompareUseCaseError> for (StatusCode, String) {
    fn from(e: CompareUseCaseError) -> Self {
        match e {
            CompareUseCaseError::Validation(msg) => (StatusCode::BAD_REQUEST, msg),
            CompareUseCaseError::Repository(e) => {
                (StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
            }
        }
    }
}

/// 发起引用分析
///
/// 受理后立即返回202与作业标识，执行在后台进行
pub async fn start_analysis<J, C, S>(
    Extension(job_repo): Extension<Arc<J>>,
    Extension(citation_repo): Extension<Arc<C>>,
    Extension(score_repo): Extension<Arc<S>>,
    Extension(runner): Extension<Arc<dyn JobRunner>>,
    Json(payload): Json<AnalyzeRequestDto>,
) -> impl IntoResponse
where
    J: JobRepository + 'static,
    C: CitationRepository + 'static,
    S: ScoreRepository + 'static,
{
    let use_case = AnalyzeUseCase::new(job_repo, citation_repo, score_repo, runner);
    match use_case.start_analysis(payload).await {
        Ok(job) => (
            StatusCode::ACCEPTED,
            Json(AnalyzeResponseDto {
                job_id: job.id,
                status: job.status.to_string(),
            }),
        )
            .into_response(),
        Err(e) => {
            let (status, msg): (StatusCode, String) = e.into();
            (status, Json(json!({ "error": msg }))).into_response()
        }
    }
}

/// 查询作业状态
pub async fn job_status<J, C, S>(
    Extension(job_repo): Extension<Arc<J>>,
    Extension(citation_repo): Extension<Arc<C>>,
    Extension(score_repo): Extension<Arc<S>>,
    Extension(runner): Extension<Arc<dyn JobRunner>>,
    Path(job_id): Path<Uuid>,
) -> impl IntoResponse
where
    J: JobRepository + 'static,
    C: CitationRepository + 'static,
    S: ScoreRepository + 'static,
{
    let use_case = AnalyzeUseCase::new(job_repo, citation_repo, score_repo, runner);
    match use_case.job_status(job_id).await {
        Ok(job) => (StatusCode::OK, Json(JobStatusResponseDto::from(&job))).into_response(),
        Err(e) => {
            let (status, msg): (StatusCode, String) = e.into();
            (status, Json(json!({ "error": msg }))).into_response()
        }
    }
}

/// 读取已完成作业的结果
pub async fn job_results<J, C, S>(
    Extension(job_repo): Extension<Arc<J>>,
    Extension(citation_repo): Extension<Arc<C>>,
    Extension(score_repo): Extension<Arc<S>>,
    Extension(runner): Extension<Arc<dyn JobRunner>>,
    Path(job_id): Path<Uuid>,
) -> impl IntoResponse
where
    J: JobRepository + 'static,
    C: CitationRepository + 'static,
    S: ScoreRepository + 'static,
{
    let use_case = AnalyzeUseCase::new(job_repo, citation_repo, score_repo, runner);
    match use_case.job_results(job_id).await {
        Ok(results) => (StatusCode::OK, Json(results)).into_response(),
        Err(e) => {
            let (status, msg): (StatusCode, String) = e.into();
            (status, Json(json!({ "error": msg }))).into_response()
        }
    }
}

/// 竞争对手比较
pub async fn compare<J, C, S>(
    Extension(job_repo): Extension<Arc<J>>,
    Extension(citation_repo): Extension<Arc<C>>,
    Extension(score_repo): Extension<Arc<S>>,
    Extension(classifier): Extension<Arc<dyn ClassifierService>>,
    Extension(runner): Extension<Arc<dyn JobRunner>>,
    Json(payload): Json<CompareRequestDto>,
) -> impl IntoResponse
where
    J: JobRepository + 'static,
    C: CitationRepository + 'static,
    S: ScoreRepository + 'static,
{
    let use_case = CompareUseCase::new(job_repo, citation_repo, score_repo, classifier, runner);
    match use_case.compare(payload).await {
        Ok(comparison) => (StatusCode::OK, Json(comparison)).into_response(),
        Err(e) => {
            let (status, msg): (StatusCode, String) = e.into();
            (status, Json(json!({ "error": msg }))).into_response()
        }
    }
}
