// Copyright (c) 2025 Citers Contributors
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::e2e::{test_db, StubClassifier};
use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::{Extension, Router};
use citers::domain::models::citation::Sentiment;
use citers::domain::models::job::{Job, JobKind};
use citers::domain::services::classifier_service::ClassifierService;
use citers::infrastructure::repositories::{
    CitationRepositoryImpl, JobRepositoryImpl, ScoreRepositoryImpl,
};
use citers::presentation::routes::routes;
use citers::workers::JobRunner;
use serde_json::{json, Value};
use std::sync::{Arc, Mutex};
use tower::ServiceExt;
use uuid::Uuid;

/// 记录被派发的作业而不执行它们
struct CapturingRunner {
    spawned: Mutex<Vec<Job>>,
}

impl CapturingRunner {
    fn new() -> Self {
        Self {
            spawned: Mutex::new(Vec::new()),
        }
    }

    fn jobs(&self) -> Vec<Job> {
        self.spawned.lock().unwrap().clone()
    }
}

impl JobRunner for CapturingRunner {
    fn spawn(&self, job: Job) {
        self.spawned.lock().unwrap().push(job);
    }
}

async fn app() -> (Router, Arc<CapturingRunner>) {
    let db = Arc::new(test_db().await);
    let runner = Arc::new(CapturingRunner::new());
    let classifier: Arc<dyn ClassifierService> = Arc::new(StubClassifier {
        sentiment: Sentiment::Neutral,
        topics: Vec::new(),
    });

    let router = routes()
        .layer(Extension(Arc::new(JobRepositoryImpl::new(db.clone()))))
        .layer(Extension(Arc::new(CitationRepositoryImpl::new(db.clone()))))
        .layer(Extension(Arc::new(ScoreRepositoryImpl::new(db.clone()))))
        .layer(Extension(classifier))
        .layer(Extension(runner.clone() as Arc<dyn JobRunner>));

    (router, runner)
}

async fn post_json(router: &Router, uri: &str, body: Value) -> (StatusCode, Value) {
    let response = router
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, value)
}

async fn get_json(router: &Router, uri: &str) -> (StatusCode, Value) {
    let response = router
        .clone()
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, value)
}

#[tokio::test]
async fn analyze_accepts_the_job_and_spawns_it() {
    let (router, runner) = app().await;
    let user_id = Uuid::new_v4();

    let (status, body) = post_json(
        &router,
        "/v1/citations/analyze",
        json!({
            "user_id": user_id,
            "domain": "Example.COM",
            "months": ["2024-07", "2024-08"]
        }),
    )
    .await;

    assert_eq!(status, StatusCode::ACCEPTED);
    assert_eq!(body["status"], "processing");
    let job_id = body["job_id"].as_str().expect("job_id").to_string();

    let spawned = runner.jobs();
    assert_eq!(spawned.len(), 1);
    assert_eq!(spawned[0].id.to_string(), job_id);
    assert_eq!(spawned[0].domain, "example.com");
    assert_eq!(spawned[0].kind, JobKind::Initial);

    // 新作业立即可查询
    let (status, body) = get_json(&router, &format!("/v1/citations/jobs/{}", job_id)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "processing");
    assert_eq!(body["progress"], 0);
    assert_eq!(body["domain"], "example.com");
}

#[tokio::test]
async fn analyze_rejects_invalid_input() {
    let (router, runner) = app().await;
    let user_id = Uuid::new_v4();

    let (status, body) = post_json(
        &router,
        "/v1/citations/analyze",
        json!({
            "user_id": user_id,
            "domain": "https://example.com/page",
            "months": ["2024-08"]
        }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());

    let (status, _) = post_json(
        &router,
        "/v1/citations/analyze",
        json!({
            "user_id": user_id,
            "domain": "example.com",
            "months": ["August 2024"]
        }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    assert!(runner.jobs().is_empty());
}

#[tokio::test]
async fn unknown_job_returns_not_found() {
    let (router, _) = app().await;

    let (status, _) = get_json(
        &router,
        &format!("/v1/citations/jobs/{}", Uuid::new_v4()),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = get_json(
        &router,
        &format!("/v1/citations/jobs/{}/results", Uuid::new_v4()),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn results_are_unavailable_while_the_job_is_running() {
    let (router, _) = app().await;
    let user_id = Uuid::new_v4();

    let (_, body) = post_json(
        &router,
        "/v1/citations/analyze",
        json!({
            "user_id": user_id,
            "domain": "example.com",
            "months": ["2024-08"]
        }),
    )
    .await;
    let job_id = body["job_id"].as_str().unwrap().to_string();

    let (status, body) = get_json(
        &router,
        &format!("/v1/citations/jobs/{}/results", job_id),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn compare_reports_unknown_competitors_as_pending() {
    let (router, runner) = app().await;
    let user_id = Uuid::new_v4();

    let (status, body) = post_json(
        &router,
        "/v1/citations/compare",
        json!({
            "user_id": user_id,
            "domain": "example.com",
            "competitors": ["rival.com"]
        }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["mine"]["domain"], "example.com");
    assert_eq!(body["mine"]["status"], "ok");
    assert_eq!(body["mine"]["citation_count"], 0);

    let competitor = &body["competitors"][0];
    assert_eq!(competitor["domain"], "rival.com");
    assert_eq!(competitor["status"], "pending");
    let job_id = competitor["job_id"].as_str().expect("job_id");

    // 没有可比数据时不生成叙述
    assert!(body["narrative"].is_null());

    let spawned = runner.jobs();
    assert_eq!(spawned.len(), 1);
    assert_eq!(spawned[0].id.to_string(), job_id);
    assert_eq!(spawned[0].kind, JobKind::Competitor);
    assert_eq!(
        spawned[0].requested_by_domain.as_deref(),
        Some("example.com")
    );
    assert_eq!(spawned[0].months.len(), 3);
}

#[tokio::test]
async fn compare_rejects_an_empty_competitor_list() {
    let (router, runner) = app().await;

    let (status, _) = post_json(
        &router,
        "/v1/citations/compare",
        json!({
            "user_id": Uuid::new_v4(),
            "domain": "example.com",
            "competitors": []
        }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(runner.jobs().is_empty());
}
