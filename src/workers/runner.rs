// Copyright (c) 2025 Citers Contributors
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::job::Job;
use crate::domain::repositories::citation_repository::CitationRepository;
use crate::domain::repositories::crawl_cache_repository::CrawlCacheRepository;
use crate::domain::repositories::job_repository::JobRepository;
use crate::domain::repositories::score_repository::ScoreRepository;
use crate::workers::analysis_worker::AnalysisWorker;
use std::sync::Arc;
use tracing::debug;

/// 作业投递特质
///
/// 发射后不管的后台执行边界。提交方只持久化作业行
/// 并投递，从不等待结果；作业进展只能通过仓库观察。
pub trait JobRunner: Send + Sync {
    /// 将作业投递到后台执行
    fn spawn(&self, job: Job);
}

/// 基于Tokio任务的作业投递实现
pub struct TokioJobRunner<J, C, K, S>
where
    J: JobRepository + 'static,
    C: CitationRepository + 'static,
    K: CrawlCacheRepository + 'static,
    S: ScoreRepository + 'static,
{
    worker: Arc<AnalysisWorker<J, C, K, S>>,
}

impl<J, C, K, S> TokioJobRunner<J, C, K, S>
where
    J: JobRepository + 'static,
    C: CitationRepository + 'static,
    K: CrawlCacheRepository + 'static,
    S: ScoreRepository + 'static,
{
    /// 创建新的作业投递器
    pub fn new(worker: Arc<AnalysisWorker<J, C, K, S>>) -> Self {
        Self { worker }
    }
}

impl<J, C, K, S> JobRunner for TokioJobRunner<J, C, K, S>
where
    J: JobRepository + 'static,
    C: CitationRepository + 'static,
    K: CrawlCacheRepository + 'static,
    S: ScoreRepository + 'static,
{
    fn spawn(&self, job: Job) {
        debug!(job_id = %job.id, domain = %job.domain, "Spawning analysis job");
        let worker = self.worker.clone();
        tokio::spawn(async move {
            worker.process_job(job).await;
        });
    }
}
