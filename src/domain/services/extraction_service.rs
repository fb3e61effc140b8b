// Copyright (c) 2025 Citers Contributors
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::domain::models::citation::{CitationDraft, CitationType};
use crate::utils::text::{first_chars, last_chars, safe_byte_slice, strip_html};

/// 链接上下文窗口大小（字符）
const LINK_CONTEXT_CHARS: usize = 200;
/// 提及上下文窗口大小（字符）
const MENTION_CONTEXT_CHARS: usize = 100;
/// 提取上下文前截取的原始HTML窗口（字节），留出标签被剥除的余量
const RAW_WINDOW_BYTES: usize = 800;

static ANCHOR_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?is)<a\b([^>]*)>(.*?)</a>").expect("valid regex"));

static HREF_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"(?i)href\s*=\s*["']([^"']*)["']"#).expect("valid regex"));

static NOFOLLOW_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"(?i)rel\s*=\s*["'][^"']*nofollow[^"']*["']"#).expect("valid regex"));

/// 提取服务
///
/// 从存档页面的原始标记中提取对目标域名的引用。
/// 纯函数、无状态，对畸形标记保持容错：单个匹配出现
/// 解析异常时跳过该匹配并继续处理其余内容。
pub struct ExtractionService;

impl ExtractionService {
    /// 提取页面中对目标域名的全部引用草稿
    ///
    /// 先执行链接遍历，再在剥离标签后的纯文本上执行提及遍历；
    /// 已落入链接上下文窗口内的提及会被去重丢弃。
    pub fn extract(html: &str, target_domain: &str) -> Vec<CitationDraft> {
        let mut drafts = Self::extract_links(html, target_domain);
        let link_contexts: Vec<String> = drafts
            .iter()
            .map(|d| {
                normalize_ws(&format!(
                    "{} {} {}",
                    d.context_before,
                    d.anchor_text.as_deref().unwrap_or(""),
                    d.context_after
                ))
            })
            .collect();

        drafts.extend(Self::extract_mentions(html, target_domain, &link_contexts));
        drafts
    }

    /// 链接遍历
    ///
    /// 捕获href包含目标域名的锚元素：锚文本、前后各200字符的
    /// 去标签上下文，以及dofollow标记（仅显式rel="nofollow"为false）。
    fn extract_links(html: &str, target_domain: &str) -> Vec<CitationDraft> {
        let domain_lower = target_domain.to_lowercase();
        let mut drafts = Vec::new();

        for caps in ANCHOR_RE.captures_iter(html) {
            let full = match caps.get(0) {
                Some(m) => m,
                None => continue,
            };
            let attrs = caps.get(1).map(|m| m.as_str()).unwrap_or("");
            let inner = caps.get(2).map(|m| m.as_str()).unwrap_or("");

            let href = match HREF_RE.captures(attrs).and_then(|c| c.get(1)) {
                Some(m) => m.as_str(),
                None => continue,
            };
            if !href.to_lowercase().contains(&domain_lower) {
                continue;
            }

            let anchor_text = strip_html(inner);
            let dofollow = !NOFOLLOW_RE.is_match(attrs);

            let raw_before = safe_byte_slice(
                html,
                full.start().saturating_sub(RAW_WINDOW_BYTES),
                full.start(),
            );
            let raw_after = safe_byte_slice(html, full.end(), full.end() + RAW_WINDOW_BYTES);
            let context_before = last_chars(&strip_html(raw_before), LINK_CONTEXT_CHARS);
            let context_after = first_chars(&strip_html(raw_after), LINK_CONTEXT_CHARS);

            drafts.push(CitationDraft {
                citation_type: CitationType::Link,
                citation_text: href.to_string(),
                anchor_text: Some(anchor_text),
                context_before,
                context_after,
                dofollow: Some(dofollow),
            });
        }

        drafts
    }

    /// 提及遍历
    ///
    /// 在剥离script/style与标签后的纯文本上查找域名的全词出现。
    /// 某个提及的邻近片段若已出现在先前捕获的链接上下文窗口中，
    /// 该提及被视为同一引用而丢弃。
    fn extract_mentions(
        html: &str,
        target_domain: &str,
        link_contexts: &[String],
    ) -> Vec<CitationDraft> {
        let plain = strip_html(html);
        let word_re = match Regex::new(&format!(r"(?i)\b{}\b", regex::escape(target_domain))) {
            Ok(re) => re,
            Err(_) => return Vec::new(),
        };

        let mut drafts = Vec::new();
        for m in word_re.find_iter(&plain) {
            let raw_before =
                safe_byte_slice(&plain, m.start().saturating_sub(RAW_WINDOW_BYTES), m.start());
            let raw_after = safe_byte_slice(&plain, m.end(), m.end() + RAW_WINDOW_BYTES);
            let context_before = last_chars(raw_before.trim(), MENTION_CONTEXT_CHARS)
                .trim()
                .to_string();
            let context_after = first_chars(raw_after.trim(), MENTION_CONTEXT_CHARS)
                .trim()
                .to_string();

            // Signature: the match plus a short slice of surrounding text,
            // compared against the already-captured link windows
            let signature = normalize_ws(&format!(
                "{} {} {}",
                last_chars(&context_before, 30),
                m.as_str(),
                first_chars(&context_after, 30)
            ));
            if link_contexts.iter().any(|ctx| ctx.contains(&signature)) {
                continue;
            }

            drafts.push(CitationDraft {
                citation_type: CitationType::Mention,
                citation_text: m.as_str().to_string(),
                anchor_text: None,
                context_before,
                context_after,
                dofollow: None,
            });
        }

        drafts
    }
}

fn normalize_ws(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}
