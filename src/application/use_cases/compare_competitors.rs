// Copyright (c) 2025 Citers Contributors
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::application::dto::compare_request::{
    CompareRequestDto, CompareResponseDto, DomainComparisonDto,
};
use crate::domain::models::citation::{CitationType, Sentiment};
use crate::domain::models::job::{Job, JobKind};
use crate::domain::repositories::citation_repository::CitationRepository;
use crate::domain::repositories::job_repository::{JobRepository, RepositoryError};
use crate::domain::repositories::score_repository::ScoreRepository;
use crate::domain::services::classifier_service::ClassifierService;
use crate::utils::month::recent_months;
use crate::workers::runner::JobRunner;
use serde_json::json;
use std::collections::HashSet;
use std::sync::Arc;
use thiserror::Error;
use tracing::{info, warn};
use uuid::Uuid;
use validator::Validate;

/// 缺省比较窗口覆盖的完整月份数
const DEFAULT_COMPARE_MONTHS: u32 = 3;

/// 比较用例错误类型
#[derive(Error, Debug)]
pub enum CompareUseCaseError {
    /// 请求校验失败
    #[error("Validation failed: {0}")]
    Validation(String),
    /// 仓库错误
    #[error("Repository error: {0}")]
    Repository(#[from] RepositoryError),
}

/// 竞争对手比较用例
///
/// 对本方域名与每个竞争对手产出一份并列侧写。已有数据的
/// 竞争对手直接读库；没有数据的为其创建pending竞争对手
/// 作业并立即投递，响应中报告为pending而不阻塞。
pub struct CompareUseCase<J, C, S>
where
    J: JobRepository,
    C: CitationRepository,
    S: ScoreRepository,
{
    job_repo: Arc<J>,
    citation_repo: Arc<C>,
    score_repo: Arc<S>,
    classifier: Arc<dyn ClassifierService>,
    runner: Arc<dyn JobRunner>,
}

impl<J, C, S> CompareUseCase<J, C, S>
where
    J: JobRepository,
    C: CitationRepository,
    S: ScoreRepository,
{
    /// 创建新的比较用例实例
    pub fn new(
        job_repo: Arc<J>,
        citation_repo: Arc<C>,
        score_repo: Arc<S>,
        classifier: Arc<dyn ClassifierService>,
        runner: Arc<dyn JobRunner>,
    ) -> Self {
        Self {
            job_repo,
            citation_repo,
            score_repo,
            classifier,
            runner,
        }
    }

    /// 执行一次竞争对手比较
    pub async fn compare(
        &self,
        dto: CompareRequestDto,
    ) -> Result<CompareResponseDto, CompareUseCaseError> {
        dto.validate()
            .map_err(|e| CompareUseCaseError::Validation(e.to_string()))?;

        let mine_domain = dto.domain.to_lowercase();
        let months = if dto.months.is_empty() {
            recent_months(DEFAULT_COMPARE_MONTHS)
        } else {
            dto.months.clone()
        };

        let mine = self.domain_profile(dto.user_id, &mine_domain).await?;

        let mut competitors = Vec::with_capacity(dto.competitors.len());
        for competitor in &dto.competitors {
            let competitor = competitor.to_lowercase();
            let count = self
                .citation_repo
                .count_by_domain(dto.user_id, &competitor)
                .await?;

            if count > 0 {
                competitors.push(self.domain_profile(dto.user_id, &competitor).await?);
            } else {
                let job = Job::new(
                    dto.user_id,
                    competitor.clone(),
                    JobKind::Competitor,
                    months.clone(),
                    Some(mine_domain.clone()),
                );
                let job = self.job_repo.create(&job).await?;
                self.runner.spawn(job.clone());
                info!(
                    job_id = %job.id,
                    domain = %competitor,
                    requested_by = %mine_domain,
                    "Competitor analysis job created"
                );
                competitors.push(DomainComparisonDto {
                    domain: competitor,
                    status: "pending".to_string(),
                    job_id: Some(job.id),
                    citation_count: 0,
                    link_count: 0,
                    mention_count: 0,
                    positive_count: 0,
                    unique_domains: 0,
                    latest_score: None,
                });
            }
        }

        let narrative = self.narrative(&mine, &competitors).await;

        Ok(CompareResponseDto {
            mine,
            competitors,
            narrative,
        })
    }

    /// 由已存储的引用与评分构建一个域名的侧写
    async fn domain_profile(
        &self,
        user_id: Uuid,
        domain: &str,
    ) -> Result<DomainComparisonDto, CompareUseCaseError> {
        let citations = self.citation_repo.find_by_domain(user_id, domain).await?;
        let scores = self.score_repo.find_scores_by_domain(user_id, domain).await?;

        let mut links = 0;
        let mut mentions = 0;
        let mut positives = 0;
        let mut sources = HashSet::new();
        for citation in &citations {
            match citation.citation_type {
                CitationType::Link => links += 1,
                CitationType::Mention => mentions += 1,
            }
            if citation.sentiment == Sentiment::Positive {
                positives += 1;
            }
            sources.insert(citation.source_domain.as_str());
        }

        Ok(DomainComparisonDto {
            domain: domain.to_string(),
            status: "ok".to_string(),
            job_id: None,
            citation_count: citations.len() as i32,
            link_count: links,
            mention_count: mentions,
            positive_count: positives,
            unique_domains: sources.len() as i32,
            // find_scores_by_domain返回按月份升序
            latest_score: scores.last().map(|s| s.score),
        })
    }

    /// 生成叙述性比较
    ///
    /// 只覆盖已有数据的竞争对手；摘要能力失败时整段省略，
    /// 比较结果本身照常返回
    async fn narrative(
        &self,
        mine: &DomainComparisonDto,
        competitors: &[DomainComparisonDto],
    ) -> Option<String> {
        let with_data: Vec<&DomainComparisonDto> =
            competitors.iter().filter(|c| c.status == "ok").collect();
        if with_data.is_empty() {
            return None;
        }

        let stats = json!({
            "mine": comparison_stats(mine),
            "competitors": with_data.iter().map(|c| comparison_stats(c)).collect::<Vec<_>>(),
        });

        match self.classifier.summarize(&stats).await {
            Ok(text) => Some(text),
            Err(e) => {
                warn!(error = %e, "Comparison narrative failed, omitting");
                None
            }
        }
    }
}

fn comparison_stats(profile: &DomainComparisonDto) -> serde_json::Value {
    json!({
        "domain": profile.domain,
        "citation_count": profile.citation_count,
        "link_count": profile.link_count,
        "mention_count": profile.mention_count,
        "positive_count": profile.positive_count,
        "unique_domains": profile.unique_domains,
        "latest_score": profile.latest_score,
    })
}
