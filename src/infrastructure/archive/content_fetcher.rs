// Copyright (c) 2025 Citers Contributors
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::config::settings::ArchiveSettings;
use crate::infrastructure::archive::{ArchiveContentFetcher, ArchiveError, IndexRecord};
use async_trait::async_trait;
use once_cell::sync::Lazy;
use regex::Regex;
use reqwest::header::RANGE;
use std::time::Duration;
use tracing::debug;

static HTML_SPAN_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?is)<html.*?</html\s*>").expect("valid html span regex"));

/// 从原始字节文本中隔离第一个html片段
///
/// 范围读取返回的是WARC记录片段，页面标记前后混有
/// 协议头与元数据。未找到完整片段时返回None。
pub(crate) fn isolate_html(raw: &str) -> Option<String> {
    HTML_SPAN_RE.find(raw).map(|m| m.as_str().to_string())
}

/// WARC容器内容读取器
///
/// 对数据服务做单次字节范围GET取回一条存档记录，
/// 失败一律归于软缺失而不是错误。
pub struct WarcContentFetcher {
    client: reqwest::Client,
    data_base_url: String,
}

impl WarcContentFetcher {
    /// 根据存档配置创建内容读取器
    pub fn new(settings: &ArchiveSettings) -> Self {
        let timeout = settings.request_timeout.unwrap_or(10);
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout))
            .build()
            .unwrap_or_default();

        Self {
            client,
            data_base_url: settings.data_base_url.trim_end_matches('/').to_string(),
        }
    }
}

#[async_trait]
impl ArchiveContentFetcher for WarcContentFetcher {
    async fn fetch_record(&self, record: &IndexRecord) -> Result<Option<String>, ArchiveError> {
        // 索引偶尔会给出零长度记录，无字节可取
        if record.length == 0 {
            debug!(filename = %record.filename, "Zero-length index record, treating as soft miss");
            return Ok(None);
        }

        let url = format!("{}/{}", self.data_base_url, record.filename);
        let range = format!("bytes={}-{}", record.offset, record.offset + record.length - 1);

        let response = match self.client.get(&url).header(RANGE, range).send().await {
            Ok(resp) => resp,
            Err(e) => {
                debug!(url, error = %e, "Range request failed, treating as soft miss");
                return Ok(None);
            }
        };

        if !response.status().is_success() {
            debug!(url, status = %response.status(), "Range request rejected");
            return Ok(None);
        }

        let bytes = match response.bytes().await {
            Ok(bytes) => bytes,
            Err(_) => return Ok(None),
        };

        // 存档容器内可能混入任意字节序列，按损耗方式解码
        let text = String::from_utf8_lossy(&bytes);
        Ok(isolate_html(&text))
    }
}
