// Copyright (c) 2025 Citers Contributors
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use chrono::{DateTime, FixedOffset, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// 月度引用评分
///
/// 一个(user, domain, month)键上的完整汇总，包含计数、
/// 情感分布、主题与0-100的综合权威评分。
/// 可由同键下的引用集合完整重算，重算保持幂等。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CitationScore {
    /// 记录唯一标识符
    pub id: Uuid,
    /// 所属用户ID
    pub user_id: Uuid,
    /// 目标域名
    pub domain: String,
    /// 月份（YYYY-MM）
    pub month: String,
    /// 引用总数
    pub total_citations: i32,
    /// 链接数量
    pub link_count: i32,
    /// 提及数量
    pub mention_count: i32,
    /// 去重后的来源域名数量
    pub unique_domains: i32,
    /// 正面情感数量
    pub positive_count: i32,
    /// 中性情感数量
    pub neutral_count: i32,
    /// 负面情感数量
    pub negative_count: i32,
    /// 共享主题标签
    pub topics: Vec<String>,
    /// 综合评分（0-100）
    pub score: i32,
    /// 创建时间
    pub created_at: DateTime<FixedOffset>,
    /// 最后更新时间
    pub updated_at: DateTime<FixedOffset>,
}

/// 月度引用摘要
///
/// 供趋势图使用的轻量(user, domain, month)记录，
/// 与CitationScore遵循相同的upsert唯一性约束。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonthlyCitationSummary {
    /// 记录唯一标识符
    pub id: Uuid,
    /// 所属用户ID
    pub user_id: Uuid,
    /// 目标域名
    pub domain: String,
    /// 月份（YYYY-MM）
    pub month: String,
    /// 引用数量
    pub citation_count: i32,
    /// 链接数量
    pub link_count: i32,
    /// 提及数量
    pub mention_count: i32,
    /// 创建时间
    pub created_at: DateTime<FixedOffset>,
    /// 最后更新时间
    pub updated_at: DateTime<FixedOffset>,
}

/// 爬取缓存条目
///
/// 标记某个(domain, month)已被扫描过的备忘录。
/// 只写一次、从不更新；缓存命中月份的引用内容
/// 从引用存储重新读取，而非来自缓存本身。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CrawlCacheEntry {
    /// 记录唯一标识符
    pub id: Uuid,
    /// 目标域名
    pub domain: String,
    /// 月份（YYYY-MM）
    pub month: String,
    /// 本次扫描考虑过的存档记录数量
    pub records_scanned: i32,
    /// 创建时间
    pub created_at: DateTime<FixedOffset>,
}

impl CrawlCacheEntry {
    /// 创建新的缓存条目
    pub fn new(domain: &str, month: &str, records_scanned: i32) -> Self {
        Self {
            id: Uuid::new_v4(),
            domain: domain.to_string(),
            month: month.to_string(),
            records_scanned,
            created_at: Utc::now().into(),
        }
    }
}
