// Copyright (c) 2025 Citers Contributors
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::citation::{Citation, CitationType, Sentiment};
use std::collections::HashSet;

/// 评分服务
///
/// 将一个(domain, month)的引用集合折算为0-100的综合权威评分。
/// 评分由四个独立封顶的分量求和后取整并钳制：
/// - 数量：min(count/10, 40)，400条引用封顶
/// - 链接占比：(links/count)*20
/// - 正面情感占比：(positives/count)*20
/// - 来源多样性：min(unique_domains/5, 20)，5个来源域名封顶
///
/// 空集合得0分。分量封顶顺序不可改变，保证评分确定可复现。
pub struct ScoringService;

/// 月度统计量
///
/// 聚合器与评分共用的中间计数
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MonthlyStats {
    pub total: usize,
    pub links: usize,
    pub mentions: usize,
    pub unique_domains: usize,
    pub positive: usize,
    pub neutral: usize,
    pub negative: usize,
}

impl ScoringService {
    /// 统计一个引用集合的月度计数
    pub fn stats(citations: &[Citation]) -> MonthlyStats {
        let mut stats = MonthlyStats {
            total: citations.len(),
            ..Default::default()
        };

        let mut domains = HashSet::new();
        for citation in citations {
            match citation.citation_type {
                CitationType::Link => stats.links += 1,
                CitationType::Mention => stats.mentions += 1,
            }
            match citation.sentiment {
                Sentiment::Positive => stats.positive += 1,
                Sentiment::Neutral => stats.neutral += 1,
                Sentiment::Negative => stats.negative += 1,
            }
            domains.insert(citation.source_domain.as_str());
        }
        stats.unique_domains = domains.len();
        stats
    }

    /// 计算综合评分
    pub fn score(citations: &[Citation]) -> i32 {
        Self::score_from_stats(&Self::stats(citations))
    }

    /// 由统计量计算综合评分
    pub fn score_from_stats(stats: &MonthlyStats) -> i32 {
        if stats.total == 0 {
            return 0;
        }

        let count = stats.total as f64;
        let volume = (count / 10.0).min(40.0);
        let link_ratio = (stats.links as f64 / count) * 20.0;
        let sentiment_ratio = (stats.positive as f64 / count) * 20.0;
        let diversity = (stats.unique_domains as f64 / 5.0).min(20.0);

        let total = volume + link_ratio + sentiment_ratio + diversity;
        (total.round() as i32).clamp(0, 100)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::citation::CitationDraft;
    use chrono::NaiveDate;
    use uuid::Uuid;

    fn citation(
        source_url: &str,
        citation_type: CitationType,
        sentiment: Sentiment,
    ) -> Citation {
        let draft = CitationDraft {
            citation_type,
            citation_text: "example.com".to_string(),
            anchor_text: None,
            context_before: String::new(),
            context_after: String::new(),
            dofollow: matches!(citation_type, CitationType::Link).then_some(true),
        };
        let mut c = Citation::from_draft(
            draft,
            Uuid::nil(),
            "example.com",
            source_url,
            NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
        );
        c.sentiment = sentiment;
        c
    }

    #[test]
    fn empty_set_scores_zero() {
        assert_eq!(ScoringService::score(&[]), 0);
    }

    #[test]
    fn saturated_set_scores_one_hundred() {
        // All four components at their caps: 40 + 20 + 20 + 20
        let citations: Vec<Citation> = (0..500)
            .map(|i| {
                citation(
                    &format!("https://site{}.com/page{}", i, i),
                    CitationType::Link,
                    Sentiment::Positive,
                )
            })
            .collect();
        assert_eq!(ScoringService::score(&citations), 100);
    }

    #[test]
    fn example_scenario_scores_twenty_seven() {
        // 2 positive links from distinct domains plus 1 neutral mention:
        // 0.3 + 13.33 + 13.33 + 0.8 -> 27 rounded
        let citations = vec![
            citation("https://siteA.com/a", CitationType::Link, Sentiment::Positive),
            citation("https://siteB.com/b", CitationType::Link, Sentiment::Positive),
            citation("https://siteA.com/c", CitationType::Mention, Sentiment::Neutral),
        ];
        let stats = ScoringService::stats(&citations);
        assert_eq!(stats.links, 2);
        assert_eq!(stats.mentions, 1);
        assert_eq!(stats.unique_domains, 2);
        assert_eq!(ScoringService::score(&citations), 27);
    }

    #[test]
    fn score_is_always_bounded() {
        for n in [1usize, 7, 50, 399, 400, 1000] {
            let citations: Vec<Citation> = (0..n)
                .map(|i| {
                    citation(
                        &format!("https://s{}.com/p", i),
                        CitationType::Link,
                        Sentiment::Positive,
                    )
                })
                .collect();
            let score = ScoringService::score(&citations);
            assert!((0..=100).contains(&score), "score {} out of range", score);
        }
    }

    #[test]
    fn volume_saturates_at_four_hundred() {
        let make = |n: usize| -> Vec<Citation> {
            (0..n)
                .map(|i| {
                    citation(
                        &format!("https://s{}.com/p{}", i % 3, i),
                        CitationType::Mention,
                        Sentiment::Neutral,
                    )
                })
                .collect()
        };
        // Only volume and diversity contribute here; diversity is equal
        let at_cap = ScoringService::score(&make(400));
        let past_cap = ScoringService::score(&make(600));
        assert_eq!(at_cap, past_cap);
    }
}
