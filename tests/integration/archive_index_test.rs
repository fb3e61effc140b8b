// Copyright (c) 2025 Citers Contributors
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use citers::config::settings::ArchiveSettings;
use citers::infrastructure::archive::{ArchiveIndexClient, CdxIndexClient};
use std::collections::HashMap;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn settings(server: &MockServer) -> ArchiveSettings {
    ArchiveSettings {
        index_base_url: server.uri(),
        data_base_url: server.uri(),
        default_collection: "CC-MAIN-2024-33".to_string(),
        collections: HashMap::new(),
        request_timeout: Some(5),
    }
}

fn index_line(url: &str, offset: u64) -> String {
    format!(
        r#"{{"url":"{url}","filename":"crawl/segment-00.warc.gz","offset":"{offset}","length":"2048","status":"200"}}"#
    )
}

#[tokio::test]
async fn paginates_until_an_empty_page() {
    let server = MockServer::start().await;

    let page0: String = (0..100)
        .map(|i| index_line(&format!("https://blog{i}.example.org/post"), i * 2048))
        .collect::<Vec<_>>()
        .join("\n");
    let page1 = index_line("https://last.example.org/post", 500_000);

    Mock::given(method("GET"))
        .and(path("/CC-MAIN-2024-33-index"))
        .and(query_param("page", "0"))
        .respond_with(ResponseTemplate::new(200).set_body_string(page0))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/CC-MAIN-2024-33-index"))
        .and(query_param("page", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_string(page1))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/CC-MAIN-2024-33-index"))
        .and(query_param("page", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_string(""))
        .mount(&server)
        .await;

    let client = CdxIndexClient::new(&settings(&server));
    // 未知月份回退到默认集合
    let records = client.query_month("example.com", "2030-01").await.unwrap();

    assert_eq!(records.len(), 101);
    assert_eq!(records[100].url, "https://last.example.org/post");
    assert_eq!(records[100].offset, 500_000);
}

#[tokio::test]
async fn non_success_status_keeps_accumulated_records() {
    let server = MockServer::start().await;

    let page0 = index_line("https://only.example.org/post", 0);
    Mock::given(method("GET"))
        .and(path("/CC-MAIN-2024-33-index"))
        .and(query_param("page", "0"))
        .respond_with(ResponseTemplate::new(200).set_body_string(page0))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/CC-MAIN-2024-33-index"))
        .and(query_param("page", "1"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let client = CdxIndexClient::new(&settings(&server));
    let records = client.query_month("example.com", "2030-01").await.unwrap();

    assert_eq!(records.len(), 1);
    assert_eq!(records[0].url, "https://only.example.org/post");
}

#[tokio::test]
async fn immediate_miss_yields_an_empty_list_without_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/CC-MAIN-2024-33-index"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let client = CdxIndexClient::new(&settings(&server));
    let records = client.query_month("example.com", "2030-01").await.unwrap();
    assert!(records.is_empty());
}

#[tokio::test]
async fn configured_collection_override_changes_the_endpoint() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/CC-MAIN-CUSTOM-index"))
        .and(query_param("page", "0"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(index_line("https://a.example.org/x", 10)),
        )
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/CC-MAIN-CUSTOM-index"))
        .and(query_param("page", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_string(""))
        .mount(&server)
        .await;

    let mut settings = settings(&server);
    settings
        .collections
        .insert("2024-01".to_string(), "CC-MAIN-CUSTOM".to_string());

    let client = CdxIndexClient::new(&settings);
    let records = client.query_month("example.com", "2024-01").await.unwrap();
    assert_eq!(records.len(), 1);
}
