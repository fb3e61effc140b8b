// Copyright (c) 2025 Citers Contributors
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::citation::{Citation, Sentiment};
use crate::domain::models::job::{DomainError, Job, JobStatus};
use crate::domain::models::score::{CitationScore, CrawlCacheEntry, MonthlyCitationSummary};
use crate::domain::repositories::citation_repository::CitationRepository;
use crate::domain::repositories::crawl_cache_repository::CrawlCacheRepository;
use crate::domain::repositories::job_repository::{JobRepository, RepositoryError};
use crate::domain::repositories::score_repository::ScoreRepository;
use crate::domain::services::extraction_service::ExtractionService;
use crate::domain::services::classifier_service::ClassifierService;
use crate::domain::services::scoring_service::ScoringService;
use crate::infrastructure::archive::{ArchiveContentFetcher, ArchiveError, ArchiveIndexClient};
use crate::utils::month::{crawl_anchor_date, month_bounds};
use chrono::{DateTime, Datelike, FixedOffset, Utc};
use std::collections::{BTreeMap, HashSet};
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, error, info, warn};
use uuid::Uuid;

/// 单月最多实际抓取的索引记录数
const FETCH_LIMIT_PER_MONTH: usize = 10;
/// 相邻内容抓取之间的延迟（毫秒）
const FETCH_DELAY_MS: u64 = 200;
/// 参与情感分类的引用上限，之后的引用直接取中性
const SENTIMENT_LIMIT: usize = 30;
/// 相邻分类器调用之间的延迟（毫秒）
const CLASSIFY_DELAY_MS: u64 = 500;
/// 主题提取的样本上限
const TOPIC_SAMPLE_LIMIT: usize = 20;

/// 工作器错误类型
#[derive(Error, Debug)]
pub enum WorkerError {
    /// 仓库错误
    #[error("Repository error: {0}")]
    Repository(#[from] RepositoryError),
    /// 存档访问错误
    #[error("Archive error: {0}")]
    Archive(#[from] ArchiveError),
    /// 领域错误
    #[error("Domain error: {0}")]
    Domain(#[from] DomainError),
    /// 无效的月份字符串
    #[error("Invalid month: {0}")]
    InvalidMonth(String),
}

/// 引用分析工作器
///
/// 驱动一个作业走完完整管道：逐月爬取（经缓存短路）、
/// 主题与情感分类、月度聚合与评分、终态落库。
/// 作业状态只通过仓库持久化，进程内不保留权威副本。
pub struct AnalysisWorker<J, C, K, S>
where
    J: JobRepository,
    C: CitationRepository,
    K: CrawlCacheRepository,
    S: ScoreRepository,
{
    job_repo: Arc<J>,
    citation_repo: Arc<C>,
    cache_repo: Arc<K>,
    score_repo: Arc<S>,
    index_client: Arc<dyn ArchiveIndexClient>,
    content_fetcher: Arc<dyn ArchiveContentFetcher>,
    classifier: Arc<dyn ClassifierService>,
}

impl<J, C, K, S> AnalysisWorker<J, C, K, S>
where
    J: JobRepository,
    C: CitationRepository,
    K: CrawlCacheRepository,
    S: ScoreRepository,
{
    /// 创建新的分析工作器
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        job_repo: Arc<J>,
        citation_repo: Arc<C>,
        cache_repo: Arc<K>,
        score_repo: Arc<S>,
        index_client: Arc<dyn ArchiveIndexClient>,
        content_fetcher: Arc<dyn ArchiveContentFetcher>,
        classifier: Arc<dyn ClassifierService>,
    ) -> Self {
        Self {
            job_repo,
            citation_repo,
            cache_repo,
            score_repo,
            index_client,
            content_fetcher,
            classifier,
        }
    }

    /// 处理一个作业直至终态
    ///
    /// 管道级错误将作业置为Failed并原样记录错误信息；
    /// 已持久化的部分数据保留。
    pub async fn process_job(&self, job: Job) {
        let job_id = job.id;
        if let Err(e) = self.run_pipeline(job).await {
            error!(job_id = %job_id, error = %e, "Analysis job failed");
            if let Ok(Some(current)) = self.job_repo.find_by_id(job_id).await {
                if !current.is_terminal() {
                    if let Ok(failed) = current.fail(e.to_string()) {
                        if let Err(e) = self.job_repo.update(&failed).await {
                            error!(job_id = %job_id, error = %e, "Failed to persist job failure");
                        }
                    }
                }
            }
        }
    }

    async fn run_pipeline(&self, mut job: Job) -> Result<(), WorkerError> {
        if job.status == JobStatus::Pending {
            job = self.job_repo.update(&job.start()?).await?;
        }

        info!(
            job_id = %job.id,
            domain = %job.domain,
            months = job.months.len(),
            "Starting citation analysis"
        );

        // 爬取阶段，整体进度映射到0-50
        let total_months = job.months.len().max(1);
        let mut citations: Vec<Citation> = Vec::new();
        // 重复发现合并进同一持久化行，聚合按行去重计数
        let mut seen: HashSet<Uuid> = HashSet::new();
        for (idx, month) in job.months.clone().iter().enumerate() {
            match self.crawl_month(&job, month).await {
                Ok(found) => {
                    for citation in found {
                        if seen.insert(citation.id) {
                            citations.push(citation);
                        }
                    }
                }
                Err(e) => {
                    warn!(job_id = %job.id, month, error = %e, "Month crawl failed, continuing")
                }
            }
            let progress = (((idx + 1) as f64 / total_months as f64) * 50.0).round() as i32;
            self.job_repo
                .update_progress(job.id, progress, citations.len() as i32)
                .await?;
        }

        // 主题提取，整个作业只调用一次
        let topics = if citations.is_empty() {
            Vec::new()
        } else {
            let samples: Vec<String> = citations
                .iter()
                .take(TOPIC_SAMPLE_LIMIT)
                .map(|c| c.context())
                .collect();
            match self.classifier.extract_topics(&samples).await {
                Ok(topics) => topics,
                Err(e) => {
                    warn!(job_id = %job.id, error = %e, "Topic extraction failed, using empty list");
                    Vec::new()
                }
            }
        };

        // 情感分类阶段，整体进度映射到50-100
        let classify_count = citations.len().min(SENTIMENT_LIMIT);
        for idx in 0..citations.len() {
            let sentiment = if idx < classify_count {
                if idx > 0 {
                    tokio::time::sleep(Duration::from_millis(CLASSIFY_DELAY_MS)).await;
                }
                match self.classifier.classify_sentiment(&citations[idx].context()).await {
                    Ok(sentiment) => sentiment,
                    Err(e) => {
                        warn!(job_id = %job.id, error = %e, "Sentiment call failed, defaulting to neutral");
                        Sentiment::Neutral
                    }
                }
            } else {
                Sentiment::Neutral
            };

            citations[idx].sentiment = sentiment;
            citations[idx].topics = topics.clone();
            self.citation_repo
                .update_classification(citations[idx].id, sentiment, &topics)
                .await?;

            if idx < classify_count {
                let pct = ((idx + 1) as f64 / classify_count as f64) * 100.0;
                let progress = 50 + (pct / 2.0).round() as i32;
                self.job_repo
                    .update_progress(job.id, progress, citations.len() as i32)
                    .await?;
            }
        }

        // 月度聚合与评分
        let mut by_month: BTreeMap<String, Vec<Citation>> = BTreeMap::new();
        for citation in &citations {
            let key = format!(
                "{:04}-{:02}",
                citation.crawl_date.year(),
                citation.crawl_date.month()
            );
            by_month.entry(key).or_default().push(citation.clone());
        }

        for (month, group) in &by_month {
            let stats = ScoringService::stats(group);
            let score = ScoringService::score_from_stats(&stats);
            let now: DateTime<FixedOffset> = Utc::now().into();

            self.score_repo
                .upsert_score(&CitationScore {
                    id: Uuid::new_v4(),
                    user_id: job.user_id,
                    domain: job.domain.clone(),
                    month: month.clone(),
                    total_citations: stats.total as i32,
                    link_count: stats.links as i32,
                    mention_count: stats.mentions as i32,
                    unique_domains: stats.unique_domains as i32,
                    positive_count: stats.positive as i32,
                    neutral_count: stats.neutral as i32,
                    negative_count: stats.negative as i32,
                    topics: topics.clone(),
                    score,
                    created_at: now,
                    updated_at: now,
                })
                .await?;

            self.score_repo
                .upsert_summary(&MonthlyCitationSummary {
                    id: Uuid::new_v4(),
                    user_id: job.user_id,
                    domain: job.domain.clone(),
                    month: month.clone(),
                    citation_count: stats.total as i32,
                    link_count: stats.links as i32,
                    mention_count: stats.mentions as i32,
                    created_at: now,
                    updated_at: now,
                })
                .await?;
        }

        let total = citations.len() as i32;
        let completed = job.complete(total)?;
        self.job_repo.update(&completed).await?;
        info!(job_id = %completed.id, total_citations = total, "Citation analysis completed");
        Ok(())
    }

    /// 爬取单个月份
    ///
    /// 缓存命中时完全跳过存档访问，改为回读该月窗口内
    /// 已存储的引用；未命中时走索引、取回、提取、upsert，
    /// 最后写缓存条目。
    async fn crawl_month(&self, job: &Job, month: &str) -> Result<Vec<Citation>, WorkerError> {
        let (from, to) =
            month_bounds(month).ok_or_else(|| WorkerError::InvalidMonth(month.to_string()))?;

        if self.cache_repo.find(&job.domain, month).await?.is_some() {
            debug!(job_id = %job.id, month, "Crawl cache hit, re-reading stored citations");
            return Ok(self
                .citation_repo
                .find_by_date_range(job.user_id, &job.domain, from, to)
                .await?);
        }

        let crawl_date =
            crawl_anchor_date(month).ok_or_else(|| WorkerError::InvalidMonth(month.to_string()))?;
        let records = self.index_client.query_month(&job.domain, month).await?;
        let considered = records.len().min(FETCH_LIMIT_PER_MONTH);

        let mut found = Vec::new();
        for (idx, record) in records.iter().take(FETCH_LIMIT_PER_MONTH).enumerate() {
            if idx > 0 {
                tokio::time::sleep(Duration::from_millis(FETCH_DELAY_MS)).await;
            }
            let Some(html) = self.content_fetcher.fetch_record(record).await? else {
                continue;
            };
            for draft in ExtractionService::extract(&html, &job.domain) {
                let citation =
                    Citation::from_draft(draft, job.user_id, &job.domain, &record.url, crawl_date);
                found.push(self.citation_repo.upsert(&citation).await?);
            }
        }

        self.cache_repo
            .insert(&CrawlCacheEntry::new(&job.domain, month, considered as i32))
            .await?;
        debug!(job_id = %job.id, month, citations = found.len(), "Month crawl finished");
        Ok(found)
    }
}
