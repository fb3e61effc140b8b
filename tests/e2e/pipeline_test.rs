// Copyright (c) 2025 Citers Contributors
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::e2e::{test_db, StubClassifier};
use citers::config::settings::ArchiveSettings;
use citers::domain::models::citation::{CitationType, Sentiment};
use citers::domain::models::job::{Job, JobKind, JobStatus};
use citers::domain::repositories::citation_repository::CitationRepository;
use citers::domain::repositories::crawl_cache_repository::CrawlCacheRepository;
use citers::domain::repositories::job_repository::JobRepository;
use citers::domain::repositories::score_repository::ScoreRepository;
use citers::infrastructure::archive::{CdxIndexClient, WarcContentFetcher};
use citers::infrastructure::repositories::{
    CitationRepositoryImpl, CrawlCacheRepositoryImpl, JobRepositoryImpl, ScoreRepositoryImpl,
};
use citers::workers::AnalysisWorker;
use std::collections::HashMap;
use std::sync::Arc;
use uuid::Uuid;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

// 链接与裸提及之间留出足够距离，避免提及落入链接上下文窗口被去重
const PAGE: &str = r#"<html><body>
<p>We recommend <a href="https://example.com/docs">the official guide</a> for setup.</p>
<p>Archive crawls are sampled monthly and the corpus keeps growing, so any
single snapshot only reflects part of the web. Treat counts as a lower bound
and compare runs against the same collection when tracking movement across
months rather than absolute totals between different collections.</p>
<p>Many teams rely on example.com every day for archival lookups.</p>
</body></html>"#;

fn archive_settings(server: &MockServer) -> ArchiveSettings {
    ArchiveSettings {
        index_base_url: server.uri(),
        data_base_url: server.uri(),
        default_collection: "CC-MAIN-2024-33".to_string(),
        collections: HashMap::new(),
        request_timeout: Some(5),
    }
}

async fn mount_archive(server: &MockServer) {
    let lines = concat!(
        r#"{"url":"https://blog.example.org/post","filename":"c/one.warc.gz","offset":"0","length":"512"}"#,
        "\n",
        r#"{"url":"https://news.example.net/story","filename":"c/two.warc.gz","offset":"0","length":"512"}"#,
    );

    Mock::given(method("GET"))
        .and(path("/CC-MAIN-2024-33-index"))
        .and(query_param("page", "0"))
        .respond_with(ResponseTemplate::new(200).set_body_string(lines))
        .mount(server)
        .await;
    Mock::given(method("GET"))
        .and(path("/CC-MAIN-2024-33-index"))
        .and(query_param("page", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_string(""))
        .mount(server)
        .await;
    Mock::given(method("GET"))
        .and(path("/c/one.warc.gz"))
        .respond_with(ResponseTemplate::new(206).set_body_string(PAGE))
        .mount(server)
        .await;
    // 第二条记录不可用，按软缺失跳过
    Mock::given(method("GET"))
        .and(path("/c/two.warc.gz"))
        .respond_with(ResponseTemplate::new(404))
        .mount(server)
        .await;
}

struct Pipeline {
    job_repo: Arc<JobRepositoryImpl>,
    citation_repo: Arc<CitationRepositoryImpl>,
    cache_repo: Arc<CrawlCacheRepositoryImpl>,
    score_repo: Arc<ScoreRepositoryImpl>,
    worker: AnalysisWorker<
        JobRepositoryImpl,
        CitationRepositoryImpl,
        CrawlCacheRepositoryImpl,
        ScoreRepositoryImpl,
    >,
}

async fn pipeline(server: &MockServer) -> Pipeline {
    let db = Arc::new(test_db().await);
    let job_repo = Arc::new(JobRepositoryImpl::new(db.clone()));
    let citation_repo = Arc::new(CitationRepositoryImpl::new(db.clone()));
    let cache_repo = Arc::new(CrawlCacheRepositoryImpl::new(db.clone()));
    let score_repo = Arc::new(ScoreRepositoryImpl::new(db.clone()));
    let settings = archive_settings(server);

    let worker = AnalysisWorker::new(
        job_repo.clone(),
        citation_repo.clone(),
        cache_repo.clone(),
        score_repo.clone(),
        Arc::new(CdxIndexClient::new(&settings)),
        Arc::new(WarcContentFetcher::new(&settings)),
        Arc::new(StubClassifier {
            sentiment: Sentiment::Positive,
            topics: vec!["archives".to_string()],
        }),
    );

    Pipeline {
        job_repo,
        citation_repo,
        cache_repo,
        score_repo,
        worker,
    }
}

#[tokio::test]
async fn full_pipeline_persists_citations_scores_and_cache() {
    let server = MockServer::start().await;
    mount_archive(&server).await;
    let p = pipeline(&server).await;

    let user_id = Uuid::new_v4();
    let job = Job::new(
        user_id,
        "example.com".to_string(),
        JobKind::Initial,
        vec!["2024-08".to_string()],
        None,
    );
    p.job_repo.create(&job).await.unwrap();
    p.worker.process_job(job.clone()).await;

    let final_job = p.job_repo.find_by_id(job.id).await.unwrap().unwrap();
    assert_eq!(final_job.status, JobStatus::Completed);
    assert_eq!(final_job.progress, 100);
    assert_eq!(final_job.total_citations, 2);
    assert!(final_job.completed_at.is_some());

    let citations = p
        .citation_repo
        .find_by_domain(user_id, "example.com")
        .await
        .unwrap();
    assert_eq!(citations.len(), 2);

    let link = citations
        .iter()
        .find(|c| c.citation_type == CitationType::Link)
        .expect("link citation");
    assert_eq!(link.anchor_text.as_deref(), Some("the official guide"));
    assert_eq!(link.dofollow, Some(true));
    assert_eq!(link.source_domain, "blog.example.org");
    assert_eq!(link.sentiment, Sentiment::Positive);
    assert_eq!(link.topics, vec!["archives".to_string()]);

    let mention = citations
        .iter()
        .find(|c| c.citation_type == CitationType::Mention)
        .expect("mention citation");
    assert!(mention.dofollow.is_none());
    assert!(mention.anchor_text.is_none());

    let scores = p
        .score_repo
        .find_scores_by_domain(user_id, "example.com")
        .await
        .unwrap();
    assert_eq!(scores.len(), 1);
    let score = &scores[0];
    assert_eq!(score.month, "2024-08");
    assert_eq!(score.total_citations, 2);
    assert_eq!(score.link_count, 1);
    assert_eq!(score.mention_count, 1);
    assert_eq!(score.unique_domains, 1);
    assert_eq!(score.positive_count, 2);
    // 0.2 + 10 + 20 + 0.2，四舍五入
    assert_eq!(score.score, 30);

    let summaries = p
        .score_repo
        .find_summaries_by_domain(user_id, "example.com")
        .await
        .unwrap();
    assert_eq!(summaries.len(), 1);
    assert_eq!(summaries[0].citation_count, 2);

    let cache = p
        .cache_repo
        .find("example.com", "2024-08")
        .await
        .unwrap()
        .expect("cache entry");
    assert_eq!(cache.records_scanned, 2);
}

#[tokio::test]
async fn second_run_reuses_the_cache_without_touching_the_archive() {
    let server = MockServer::start().await;
    mount_archive(&server).await;
    let p = pipeline(&server).await;

    let user_id = Uuid::new_v4();
    let first = Job::new(
        user_id,
        "example.com".to_string(),
        JobKind::Initial,
        vec!["2024-08".to_string()],
        None,
    );
    p.job_repo.create(&first).await.unwrap();
    p.worker.process_job(first).await;

    let requests_after_first = server.received_requests().await.unwrap().len();

    let second = Job::new(
        user_id,
        "example.com".to_string(),
        JobKind::Initial,
        vec!["2024-08".to_string()],
        None,
    );
    p.job_repo.create(&second).await.unwrap();
    p.worker.process_job(second.clone()).await;

    let requests_after_second = server.received_requests().await.unwrap().len();
    assert_eq!(requests_after_first, requests_after_second);

    let final_job = p.job_repo.find_by_id(second.id).await.unwrap().unwrap();
    assert_eq!(final_job.status, JobStatus::Completed);
    assert_eq!(final_job.total_citations, 2);

    // 重跑不产生重复行
    let citations = p
        .citation_repo
        .find_by_domain(user_id, "example.com")
        .await
        .unwrap();
    assert_eq!(citations.len(), 2);
    let scores = p
        .score_repo
        .find_scores_by_domain(user_id, "example.com")
        .await
        .unwrap();
    assert_eq!(scores.len(), 1);
}
