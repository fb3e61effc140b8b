// Copyright (c) 2025 Citers Contributors
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::application::dto::analyze_request::{validate_months, DOMAIN_RE};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::{Validate, ValidationError};

/// 校验竞争对手域名列表
pub fn validate_competitors(competitors: &[String]) -> Result<(), ValidationError> {
    for domain in competitors {
        if !DOMAIN_RE.is_match(domain) {
            let mut err = ValidationError::new("domain_format");
            err.message = Some(format!("invalid competitor domain '{domain}'").into());
            return Err(err);
        }
    }
    Ok(())
}

/// 竞争对手比较请求体
///
/// months仅用于为缺少数据的竞争对手创建分析作业，
/// 省略时回退到最近三个完整月份
#[derive(Debug, Deserialize, Serialize, Validate)]
pub struct CompareRequestDto {
    pub user_id: Uuid,
    #[validate(regex(path = *DOMAIN_RE, message = "invalid domain"))]
    pub domain: String,
    #[validate(
        length(min = 1, max = 10, message = "between 1 and 10 competitors"),
        custom(function = validate_competitors)
    )]
    pub competitors: Vec<String>,
    #[validate(length(max = 24), custom(function = validate_months))]
    #[serde(default)]
    pub months: Vec<String>,
}

/// 单个域名的比较侧写
#[derive(Debug, Serialize, Deserialize)]
pub struct DomainComparisonDto {
    pub domain: String,
    /// `ok`表示已有数据，`pending`表示分析作业刚被创建
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub job_id: Option<Uuid>,
    pub citation_count: i32,
    pub link_count: i32,
    pub mention_count: i32,
    pub positive_count: i32,
    pub unique_domains: i32,
    /// 最近一个月度评分
    pub latest_score: Option<i32>,
}

/// 竞争对手比较响应
#[derive(Debug, Serialize, Deserialize)]
pub struct CompareResponseDto {
    pub mine: DomainComparisonDto,
    pub competitors: Vec<DomainComparisonDto>,
    /// 对有数据竞争对手的叙述性比较，生成失败时省略
    #[serde(skip_serializing_if = "Option::is_none")]
    pub narrative: Option<String>,
}
