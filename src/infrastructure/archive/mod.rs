// Copyright (c) 2025 Citers Contributors
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 存档内容范围读取
pub mod content_fetcher;
/// 存档索引查询
pub mod index_client;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use content_fetcher::WarcContentFetcher;
pub use index_client::CdxIndexClient;

/// 存档索引记录
///
/// 指向存档容器文件内某个页面捕获的最小定位信息
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexRecord {
    /// 容器文件名（相对于数据服务基础URL）
    pub filename: String,
    /// 容器内字节偏移
    pub offset: u64,
    /// 记录字节长度
    pub length: u64,
    /// 被捕获页面的原始URL
    pub url: String,
}

/// 存档访问错误类型
#[derive(Error, Debug)]
pub enum ArchiveError {
    /// HTTP请求错误
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),
}

/// 存档索引客户端特质
///
/// 将(domain, month)解析为一组索引记录。实现负责
/// 分页、限流与记录上限，调用方只看到最终列表。
#[async_trait]
pub trait ArchiveIndexClient: Send + Sync {
    /// 查询某域名在某月份存档索引中的全部记录
    async fn query_month(
        &self,
        domain: &str,
        month: &str,
    ) -> Result<Vec<IndexRecord>, ArchiveError>;
}

/// 存档内容读取特质
///
/// 按索引记录做单次字节范围读取并隔离页面标记。
/// 读取失败或未找到页面标记时返回None，视为软缺失。
#[async_trait]
pub trait ArchiveContentFetcher: Send + Sync {
    /// 获取索引记录对应的页面标记
    async fn fetch_record(&self, record: &IndexRecord) -> Result<Option<String>, ArchiveError>;
}
