// Copyright (c) 2025 Citers Contributors
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::citation::Citation;
use crate::domain::models::job::Job;
use crate::domain::models::score::{CitationScore, MonthlyCitationSummary};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// 作业状态查询响应
#[derive(Debug, Serialize, Deserialize)]
pub struct JobStatusResponseDto {
    pub job_id: Uuid,
    pub domain: String,
    pub status: String,
    pub progress: i32,
    pub total_citations: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl From<&Job> for JobStatusResponseDto {
    fn from(job: &Job) -> Self {
        Self {
            job_id: job.id,
            domain: job.domain.clone(),
            status: job.status.to_string(),
            progress: job.progress,
            total_citations: job.total_citations,
            error: job.error_message.clone(),
        }
    }
}

/// 作业结果查询响应
///
/// 仅在作业完成后可用，包含全部引用、月度评分与摘要
#[derive(Debug, Serialize, Deserialize)]
pub struct JobResultsResponseDto {
    pub job_id: Uuid,
    pub domain: String,
    pub total_citations: i32,
    pub citations: Vec<Citation>,
    pub scores: Vec<CitationScore>,
    pub monthly_summaries: Vec<MonthlyCitationSummary>,
}
