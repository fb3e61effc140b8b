// Copyright (c) 2025 Citers Contributors
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use anyhow::{Context, Result};
use async_trait::async_trait;
use serde_json::{json, Value};
use std::time::Duration;

use crate::config::settings::ClassifierSettings;
use crate::domain::models::citation::Sentiment;

/// 分类器特质
///
/// 外部文本分类能力的抽象边界。三个操作相互独立，
/// 任何一个失败时调用方必须使用安全默认值，绝不致命。
#[async_trait]
pub trait ClassifierService: Send + Sync {
    /// 对单条上下文进行情感分类
    async fn classify_sentiment(&self, context: &str) -> Result<Sentiment>;
    /// 从一批上下文样本中提取5-10个主题标签
    async fn extract_topics(&self, contexts: &[String]) -> Result<Vec<String>>;
    /// 基于统计数据生成对比叙述
    async fn summarize(&self, stats: &Value) -> Result<String>;
}

/// LLM分类器 - 处理与LLM提供商的交互
///
/// # 功能
///
/// 通过OpenAI兼容的chat completions接口实现情感分类、
/// 主题提取与对比摘要。响应按严格模式校验：
/// 形状不符一律视为分类器失败，由调用方回退到安全默认值。
///
/// # 配置
///
/// 通过`classifier`配置节进行配置：
/// - `api_key` - API密钥
/// - `model` - 使用的模型名称（默认为 gpt-4o-mini）
/// - `api_base_url` - API基础URL
pub struct LlmClassifier {
    api_key: Option<String>,
    model: String,
    api_base_url: String,
    client: reqwest::Client,
}

impl LlmClassifier {
    pub fn new(settings: &ClassifierSettings) -> Self {
        Self {
            api_key: settings.api_key.clone(),
            model: settings.model.clone(),
            api_base_url: settings.api_base_url.clone(),
            client: reqwest::Client::builder()
                .timeout(Duration::from_secs(30))
                .build()
                .unwrap_or_default(),
        }
    }

    /// 调用chat completions并返回首个choice的内容
    async fn chat(&self, system: &str, user: &str) -> Result<String> {
        let api_key = self
            .api_key
            .as_ref()
            .ok_or_else(|| anyhow::anyhow!("Classifier API key not configured"))?;

        let request_body = json!({
            "model": self.model,
            "messages": [
                { "role": "system", "content": system },
                { "role": "user", "content": user }
            ],
            "temperature": 0.0
        });

        let url = format!("{}/chat/completions", self.api_base_url);
        let response = self
            .client
            .post(url)
            .header("Authorization", format!("Bearer {}", api_key))
            .json(&request_body)
            .send()
            .await
            .context("Failed to send request to classifier API")?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            return Err(anyhow::anyhow!(
                "Classifier API returned error: {} - {}",
                status,
                error_text
            ));
        }

        let body: Value = response
            .json()
            .await
            .context("Failed to parse classifier API response")?;

        let content = body["choices"][0]["message"]["content"]
            .as_str()
            .ok_or_else(|| anyhow::anyhow!("Invalid response format from classifier API"))?;

        // Clean up potential markdown code blocks
        Ok(content
            .trim()
            .trim_start_matches("```json")
            .trim_start_matches("```")
            .trim_end_matches("```")
            .trim()
            .to_string())
    }
}

#[async_trait]
impl ClassifierService for LlmClassifier {
    async fn classify_sentiment(&self, context: &str) -> Result<Sentiment> {
        let content = self
            .chat(
                "You classify the sentiment of a text mentioning a brand. \
                 Answer with exactly one word: positive, neutral or negative.",
                context,
            )
            .await?;

        // Strict: anything but the three allowed words is a failure
        content
            .trim()
            .to_lowercase()
            .parse::<Sentiment>()
            .map_err(|_| anyhow::anyhow!("Unexpected sentiment label: {}", content))
    }

    async fn extract_topics(&self, contexts: &[String]) -> Result<Vec<String>> {
        let samples = contexts.join("\n---\n");
        let content = self
            .chat(
                "You extract the main topics from brand citations. \
                 Return ONLY a JSON array of 5 to 10 short topic labels, no markdown.",
                &samples,
            )
            .await?;

        let parsed: Value =
            serde_json::from_str(&content).context("Failed to parse topics response")?;
        let array = parsed
            .as_array()
            .ok_or_else(|| anyhow::anyhow!("Topics response is not a JSON array"))?;

        let topics: Vec<String> = array
            .iter()
            .map(|v| {
                v.as_str()
                    .map(|s| s.trim().to_string())
                    .ok_or_else(|| anyhow::anyhow!("Topic entry is not a string"))
            })
            .collect::<Result<_>>()?;

        Ok(topics)
    }

    async fn summarize(&self, stats: &Value) -> Result<String> {
        self.chat(
            "You are an SEO analyst. Given citation statistics for two domains, \
             write a short comparison narrative in plain prose (3-4 sentences).",
            &stats.to_string(),
        )
        .await
    }
}
