// Copyright (c) 2025 Citers Contributors
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use once_cell::sync::Lazy;
use regex::Regex;

static SCRIPT_STYLE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?is)<(script|style)\b[^>]*>.*?</(script|style)>").expect("valid regex")
});

static TAG_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?s)<[^>]*>").expect("valid regex"));

static WHITESPACE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("valid regex"));

/// 移除script/style块与全部HTML标签
///
/// 解码HTML实体并把连续空白折叠为单个空格
pub fn strip_html(input: &str) -> String {
    let without_blocks = SCRIPT_STYLE_RE.replace_all(input, " ");
    let without_tags = TAG_RE.replace_all(&without_blocks, " ");
    let decoded = html_escape::decode_html_entities(without_tags.as_ref()).to_string();
    WHITESPACE_RE.replace_all(&decoded, " ").trim().to_string()
}

/// 按字符边界安全地截取字节区间
///
/// 起止位置落在多字节字符中间时向内收缩，绝不panic
pub fn safe_byte_slice(s: &str, start: usize, end: usize) -> &str {
    let len = s.len();
    let mut start = start.min(len);
    let mut end = end.min(len);
    while start < len && !s.is_char_boundary(start) {
        start += 1;
    }
    while end > 0 && !s.is_char_boundary(end) {
        end -= 1;
    }
    if start >= end {
        ""
    } else {
        &s[start..end]
    }
}

/// 取字符串末尾最多n个字符
pub fn last_chars(s: &str, n: usize) -> String {
    let count = s.chars().count();
    if count <= n {
        return s.to_string();
    }
    s.chars().skip(count - n).collect()
}

/// 取字符串开头最多n个字符
pub fn first_chars(s: &str, n: usize) -> String {
    s.chars().take(n).collect()
}
