// Copyright (c) 2025 Citers Contributors
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use citers::config::settings::ArchiveSettings;
use citers::infrastructure::archive::{ArchiveContentFetcher, IndexRecord, WarcContentFetcher};
use std::collections::HashMap;
use wiremock::matchers::{header, method, path};
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

fn record() -> IndexRecord {
    IndexRecord {
        filename: "crawl/segment-00.warc.gz".to_string(),
        offset: 4096,
        length: 1024,
        url: "https://blog.example.org/post".to_string(),
    }
}

#[tokio::test]
async fn sends_the_exact_byte_range_and_isolates_markup() {
    let server = MockServer::start().await;

    let body = "WARC/1.0\r\nWARC-Type: response\r\n\r\n\
                HTTP/1.1 200 OK\r\n\r\n\
                <html><body><p>archived page</p></body></html>\r\n";
    Mock::given(method("GET"))
        .and(path("/crawl/segment-00.warc.gz"))
        .and(header("Range", "bytes=4096-5119"))
        .respond_with(ResponseTemplate::new(206).set_body_string(body))
        .mount(&server)
        .await;

    let fetcher = WarcContentFetcher::new(&settings(&server));
    let html = fetcher.fetch_record(&record()).await.unwrap();

    assert_eq!(
        html.as_deref(),
        Some("<html><body><p>archived page</p></body></html>")
    );
}

#[tokio::test]
async fn non_success_status_is_a_soft_miss() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/crawl/segment-00.warc.gz"))
        .respond_with(ResponseTemplate::new(403))
        .mount(&server)
        .await;

    let fetcher = WarcContentFetcher::new(&settings(&server));
    let html = fetcher.fetch_record(&record()).await.unwrap();
    assert!(html.is_none());
}

#[tokio::test]
async fn response_without_html_markup_is_a_soft_miss() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/crawl/segment-00.warc.gz"))
        .respond_with(ResponseTemplate::new(206).set_body_string("WARC/1.0\r\nbinary payload"))
        .mount(&server)
        .await;

    let fetcher = WarcContentFetcher::new(&settings(&server));
    let html = fetcher.fetch_record(&record()).await.unwrap();
    assert!(html.is_none());
}

#[tokio::test]
async fn zero_length_record_is_a_soft_miss_without_a_request() {
    let server = MockServer::start().await;

    // 无字节可取的记录不应发出任何范围请求
    let fetcher = WarcContentFetcher::new(&settings(&server));
    let html = fetcher
        .fetch_record(&IndexRecord {
            length: 0,
            ..record()
        })
        .await
        .unwrap();

    assert!(html.is_none());
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn invalid_utf8_bytes_are_decoded_lossily() {
    let server = MockServer::start().await;

    let mut body = b"junk \xff\xfe before <html><p>caf\xc3\xa9</p></html>".to_vec();
    body.extend_from_slice(b" trailing \xff");
    Mock::given(method("GET"))
        .and(path("/crawl/segment-00.warc.gz"))
        .respond_with(ResponseTemplate::new(206).set_body_bytes(body))
        .mount(&server)
        .await;

    let fetcher = WarcContentFetcher::new(&settings(&server));
    let html = fetcher.fetch_record(&record()).await.unwrap().unwrap();
    assert!(html.contains("café"));
}
