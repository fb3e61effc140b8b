// Copyright (c) 2025 Citers Contributors
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::{Validate, ValidationError};

/// 域名格式校验正则
///
/// 裸域名，不接受scheme、路径或端口
pub static DOMAIN_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?i)[a-z0-9]([a-z0-9-]{0,61}[a-z0-9])?(\.[a-z0-9]([a-z0-9-]{0,61}[a-z0-9])?)+$")
        .expect("valid domain regex")
});

static MONTH_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d{4}-(0[1-9]|1[0-2])$").expect("valid month regex"));

/// 校验月份列表中每个元素都是YYYY-MM
pub fn validate_months(months: &[String]) -> Result<(), ValidationError> {
    for month in months {
        if !MONTH_RE.is_match(month) {
            let mut err = ValidationError::new("month_format");
            err.message = Some(format!("invalid month '{month}', expected YYYY-MM").into());
            return Err(err);
        }
    }
    Ok(())
}

/// 发起引用分析的请求体
#[derive(Debug, Deserialize, Serialize, Validate)]
pub struct AnalyzeRequestDto {
    pub user_id: Uuid,
    #[validate(regex(path = *DOMAIN_RE, message = "invalid domain"))]
    pub domain: String,
    #[validate(
        length(min = 1, max = 24, message = "between 1 and 24 months"),
        custom(function = validate_months)
    )]
    pub months: Vec<String>,
}

/// 分析请求的受理响应
#[derive(Debug, Serialize, Deserialize)]
pub struct AnalyzeResponseDto {
    pub job_id: Uuid,
    pub status: String,
}
