// Copyright (c) 2025 Citers Contributors
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::e2e::test_db;
use chrono::NaiveDate;
use citers::domain::models::citation::{Citation, CitationDraft, CitationType, Sentiment};
use citers::domain::models::score::CrawlCacheEntry;
use citers::domain::repositories::citation_repository::CitationRepository;
use citers::domain::repositories::crawl_cache_repository::CrawlCacheRepository;
use citers::domain::repositories::job_repository::RepositoryError;
use citers::infrastructure::repositories::{CitationRepositoryImpl, CrawlCacheRepositoryImpl};
use std::sync::Arc;
use uuid::Uuid;

fn citation(user_id: Uuid, crawl_date: NaiveDate, context_before: &str) -> Citation {
    Citation::from_draft(
        CitationDraft {
            citation_type: CitationType::Link,
            citation_text: "https://example.com/docs".to_string(),
            anchor_text: Some("docs".to_string()),
            context_before: context_before.to_string(),
            context_after: "for details".to_string(),
            dofollow: Some(true),
        },
        user_id,
        "example.com",
        "https://blog.example.org/post",
        crawl_date,
    )
}

#[tokio::test]
async fn repeated_upsert_of_the_same_identity_keeps_one_row() {
    let db = Arc::new(test_db().await);
    let repo = CitationRepositoryImpl::new(db);
    let user_id = Uuid::new_v4();
    let date = NaiveDate::from_ymd_opt(2024, 8, 15).unwrap();

    let first = repo.upsert(&citation(user_id, date, "see")).await.unwrap();

    // 同一(user, domain, source_url, citation_text)再次发现，上下文已变化
    let later_date = NaiveDate::from_ymd_opt(2024, 9, 15).unwrap();
    let second = repo
        .upsert(&citation(user_id, later_date, "refer to"))
        .await
        .unwrap();

    assert_eq!(second.id, first.id);
    assert_eq!(second.context_before, "refer to");
    // 月份锚点不随重复发现漂移
    assert_eq!(second.crawl_date, date);

    let rows = repo.find_by_domain(user_id, "example.com").await.unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(repo.count_by_domain(user_id, "example.com").await.unwrap(), 1);
}

#[tokio::test]
async fn same_citation_text_for_different_users_stays_separate() {
    let db = Arc::new(test_db().await);
    let repo = CitationRepositoryImpl::new(db);
    let date = NaiveDate::from_ymd_opt(2024, 8, 15).unwrap();

    let a = Uuid::new_v4();
    let b = Uuid::new_v4();
    repo.upsert(&citation(a, date, "see")).await.unwrap();
    repo.upsert(&citation(b, date, "see")).await.unwrap();

    assert_eq!(repo.count_by_domain(a, "example.com").await.unwrap(), 1);
    assert_eq!(repo.count_by_domain(b, "example.com").await.unwrap(), 1);
}

#[tokio::test]
async fn classification_writeback_requires_an_existing_row() {
    let db = Arc::new(test_db().await);
    let repo = CitationRepositoryImpl::new(db);

    let err = repo
        .update_classification(Uuid::new_v4(), Sentiment::Positive, &[])
        .await
        .unwrap_err();
    assert!(matches!(err, RepositoryError::NotFound));
}

#[tokio::test]
async fn crawl_cache_insert_is_idempotent() {
    let db = Arc::new(test_db().await);
    let repo = CrawlCacheRepositoryImpl::new(db);

    repo.insert(&CrawlCacheEntry::new("example.com", "2024-08", 7))
        .await
        .unwrap();
    // 重复写入保持首个条目，不报错
    repo.insert(&CrawlCacheEntry::new("example.com", "2024-08", 3))
        .await
        .unwrap();

    let entry = repo.find("example.com", "2024-08").await.unwrap().unwrap();
    assert_eq!(entry.records_scanned, 7);

    assert!(repo.find("example.com", "2024-07").await.unwrap().is_none());
}
