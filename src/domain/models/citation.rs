// Copyright (c) 2025 Citers Contributors
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use chrono::{DateTime, FixedOffset, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// 引用实体
///
/// 表示在存档的第三方页面内容中发现的一处对目标域名的引用，
/// 可以是超链接或纯文本提及。自然标识为
/// (user_id, domain, source_url, citation_text)，
/// 重复发现合并到同一行而不产生重复记录。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Citation {
    /// 引用唯一标识符
    pub id: Uuid,
    /// 所属用户ID
    pub user_id: Uuid,
    /// 被引用的目标域名
    pub domain: String,
    /// 引用所在页面的URL
    pub source_url: String,
    /// 引用来源域名（从source_url推导）
    pub source_domain: String,
    /// 引用类型
    pub citation_type: CitationType,
    /// 匹配到的原始文本
    pub citation_text: String,
    /// 锚文本（仅链接）
    pub anchor_text: Option<String>,
    /// 引用前的上下文窗口
    pub context_before: String,
    /// 引用后的上下文窗口
    pub context_after: String,
    /// dofollow标记（仅链接，提及为None）
    pub dofollow: Option<bool>,
    /// 爬取日期，固定为所代表月份的15日
    pub crawl_date: NaiveDate,
    /// 情感分类，分类前默认为Neutral
    pub sentiment: Sentiment,
    /// 主题标签，同一次作业的所有引用共享
    pub topics: Vec<String>,
    /// 创建时间
    pub created_at: DateTime<FixedOffset>,
    /// 最后更新时间
    pub updated_at: DateTime<FixedOffset>,
}

/// 引用类型枚举
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CitationType {
    /// 超链接引用
    Link,
    /// 纯文本提及
    Mention,
}

impl fmt::Display for CitationType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            CitationType::Link => write!(f, "link"),
            CitationType::Mention => write!(f, "mention"),
        }
    }
}

impl FromStr for CitationType {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "link" => Ok(CitationType::Link),
            "mention" => Ok(CitationType::Mention),
            _ => Err(()),
        }
    }
}

/// 情感分类枚举
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Sentiment {
    /// 正面
    Positive,
    /// 中性
    #[default]
    Neutral,
    /// 负面
    Negative,
}

impl fmt::Display for Sentiment {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Sentiment::Positive => write!(f, "positive"),
            Sentiment::Neutral => write!(f, "neutral"),
            Sentiment::Negative => write!(f, "negative"),
        }
    }
}

impl FromStr for Sentiment {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "positive" => Ok(Sentiment::Positive),
            "neutral" => Ok(Sentiment::Neutral),
            "negative" => Ok(Sentiment::Negative),
            _ => Err(()),
        }
    }
}

/// 引用草稿
///
/// 提取器的输出，尚未持久化，不携带归属信息。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CitationDraft {
    /// 引用类型
    pub citation_type: CitationType,
    /// 匹配到的原始文本
    pub citation_text: String,
    /// 锚文本（仅链接）
    pub anchor_text: Option<String>,
    /// 引用前的上下文窗口
    pub context_before: String,
    /// 引用后的上下文窗口
    pub context_after: String,
    /// dofollow标记（仅链接）
    pub dofollow: Option<bool>,
}

impl Citation {
    /// 由草稿构建完整引用
    ///
    /// 补齐归属信息与爬取日期；情感默认为中性，主题为空，
    /// 留待分类阶段回写。
    pub fn from_draft(
        draft: CitationDraft,
        user_id: Uuid,
        domain: &str,
        source_url: &str,
        crawl_date: NaiveDate,
    ) -> Self {
        let now: DateTime<FixedOffset> = Utc::now().into();
        Self {
            id: Uuid::new_v4(),
            user_id,
            domain: domain.to_string(),
            source_url: source_url.to_string(),
            source_domain: extract_source_domain(source_url),
            citation_type: draft.citation_type,
            citation_text: draft.citation_text,
            anchor_text: draft.anchor_text,
            context_before: draft.context_before,
            context_after: draft.context_after,
            dofollow: draft.dofollow,
            crawl_date,
            sentiment: Sentiment::Neutral,
            topics: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// 拼接分类用的上下文文本
    pub fn context(&self) -> String {
        format!(
            "{} {} {}",
            self.context_before, self.citation_text, self.context_after
        )
        .trim()
        .to_string()
    }
}

/// 从URL中提取来源域名
///
/// 无法解析时退回到原始字符串的host部分近似值
pub fn extract_source_domain(source_url: &str) -> String {
    match url::Url::parse(source_url) {
        Ok(u) => u.host_str().unwrap_or_default().to_string(),
        Err(_) => source_url
            .trim_start_matches("http://")
            .trim_start_matches("https://")
            .split('/')
            .next()
            .unwrap_or_default()
            .to_string(),
    }
}
