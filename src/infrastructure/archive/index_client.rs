// Copyright (c) 2025 Citers Contributors
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::config::settings::ArchiveSettings;
use crate::infrastructure::archive::{ArchiveError, ArchiveIndexClient, IndexRecord};
use async_trait::async_trait;
use once_cell::sync::Lazy;
use serde::Deserialize;
use std::collections::HashMap;
use std::time::Duration;
use tracing::{debug, warn};

/// 每页返回的索引记录数
const PAGE_SIZE: usize = 100;
/// 单月累计记录的硬上限
const MAX_RECORDS_PER_MONTH: usize = 1000;
/// 相邻分页请求之间的延迟（毫秒）
const PAGE_DELAY_MS: u64 = 100;

/// 内置的月份到索引集合映射表
///
/// 存档代次按不规则节奏发布，一个集合可能覆盖多个
/// 日历月。未命中的月份回退到配置的默认集合。
static BUILTIN_COLLECTIONS: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    HashMap::from([
        ("2023-01", "CC-MAIN-2023-06"),
        ("2023-02", "CC-MAIN-2023-06"),
        ("2023-03", "CC-MAIN-2023-14"),
        ("2023-04", "CC-MAIN-2023-14"),
        ("2023-05", "CC-MAIN-2023-23"),
        ("2023-06", "CC-MAIN-2023-23"),
        ("2023-07", "CC-MAIN-2023-40"),
        ("2023-08", "CC-MAIN-2023-40"),
        ("2023-09", "CC-MAIN-2023-40"),
        ("2023-10", "CC-MAIN-2023-40"),
        ("2023-11", "CC-MAIN-2023-50"),
        ("2023-12", "CC-MAIN-2023-50"),
        ("2024-01", "CC-MAIN-2024-10"),
        ("2024-02", "CC-MAIN-2024-10"),
        ("2024-03", "CC-MAIN-2024-10"),
        ("2024-04", "CC-MAIN-2024-18"),
        ("2024-05", "CC-MAIN-2024-22"),
        ("2024-06", "CC-MAIN-2024-26"),
        ("2024-07", "CC-MAIN-2024-30"),
        ("2024-08", "CC-MAIN-2024-33"),
        ("2024-09", "CC-MAIN-2024-38"),
        ("2024-10", "CC-MAIN-2024-42"),
        ("2024-11", "CC-MAIN-2024-46"),
        ("2024-12", "CC-MAIN-2024-51"),
        ("2025-01", "CC-MAIN-2025-05"),
        ("2025-02", "CC-MAIN-2025-08"),
        ("2025-03", "CC-MAIN-2025-13"),
        ("2025-04", "CC-MAIN-2025-18"),
        ("2025-05", "CC-MAIN-2025-21"),
        ("2025-06", "CC-MAIN-2025-26"),
        ("2025-07", "CC-MAIN-2025-30"),
        ("2025-08", "CC-MAIN-2025-33"),
    ])
});

/// 单条索引响应行
///
/// 索引服务以JSON行返回，偏移与长度是十进制字符串
#[derive(Debug, Deserialize)]
struct RawIndexLine {
    url: String,
    filename: String,
    offset: String,
    length: String,
}

/// CDX风格存档索引客户端
///
/// 对索引服务按集合分页查询域名下的全部捕获记录。
/// 分页之间固定延迟，非2xx响应或空页视为自然结束
/// 而不是错误，已累计的记录照常返回。
pub struct CdxIndexClient {
    client: reqwest::Client,
    index_base_url: String,
    default_collection: String,
    overrides: HashMap<String, String>,
}

impl CdxIndexClient {
    /// 根据存档配置创建索引客户端
    pub fn new(settings: &ArchiveSettings) -> Self {
        let timeout = settings.request_timeout.unwrap_or(10);
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout))
            .build()
            .unwrap_or_default();

        Self {
            client,
            index_base_url: settings.index_base_url.trim_end_matches('/').to_string(),
            default_collection: settings.default_collection.clone(),
            overrides: settings.collections.clone(),
        }
    }

    /// 将月份解析为索引集合标识
    ///
    /// 配置覆盖优先于内置表，均未命中时使用默认集合
    pub fn resolve_collection(&self, month: &str) -> String {
        if let Some(id) = self.overrides.get(month) {
            return id.clone();
        }
        if let Some(id) = BUILTIN_COLLECTIONS.get(month) {
            return (*id).to_string();
        }
        self.default_collection.clone()
    }

    fn parse_page(body: &str) -> Vec<IndexRecord> {
        body.lines()
            .filter(|line| !line.trim().is_empty())
            .filter_map(|line| {
                let raw: RawIndexLine = serde_json::from_str(line).ok()?;
                Some(IndexRecord {
                    filename: raw.filename,
                    offset: raw.offset.parse().ok()?,
                    length: raw.length.parse().ok()?,
                    url: raw.url,
                })
            })
            .collect()
    }
}

#[async_trait]
impl ArchiveIndexClient for CdxIndexClient {
    async fn query_month(
        &self,
        domain: &str,
        month: &str,
    ) -> Result<Vec<IndexRecord>, ArchiveError> {
        let collection = self.resolve_collection(month);
        let endpoint = format!("{}/{}-index", self.index_base_url, collection);
        let mut records: Vec<IndexRecord> = Vec::new();
        let mut page = 0u32;

        loop {
            let response = self
                .client
                .get(&endpoint)
                .query(&[
                    ("url", format!("{}/*", domain)),
                    ("output", "json".to_string()),
                    ("limit", PAGE_SIZE.to_string()),
                    ("page", page.to_string()),
                ])
                .send()
                .await;

            let response = match response {
                Ok(resp) => resp,
                Err(e) => {
                    warn!(domain, month, page, error = %e, "Index page request failed, stopping pagination");
                    break;
                }
            };

            if !response.status().is_success() {
                debug!(domain, month, page, status = %response.status(), "Index pagination ended");
                break;
            }

            let body = response.text().await.unwrap_or_default();
            let page_records = Self::parse_page(&body);
            if page_records.is_empty() {
                break;
            }

            records.extend(page_records);
            if records.len() >= MAX_RECORDS_PER_MONTH {
                records.truncate(MAX_RECORDS_PER_MONTH);
                break;
            }

            page += 1;
            tokio::time::sleep(Duration::from_millis(PAGE_DELAY_MS)).await;
        }

        debug!(
            domain,
            month,
            collection,
            count = records.len(),
            "Archive index query finished"
        );
        Ok(records)
    }
}
