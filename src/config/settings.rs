// Copyright (c) 2025 Citers Contributors
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::collections::HashMap;

/// 应用程序配置设置
///
/// 包含数据库、服务器、存档源与分类器等所有配置项
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    /// 数据库配置
    pub database: DatabaseSettings,
    /// 服务器配置
    pub server: ServerSettings,
    /// 存档源配置
    pub archive: ArchiveSettings,
    /// 分类器配置
    pub classifier: ClassifierSettings,
}

/// 数据库配置设置
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseSettings {
    /// 数据库连接URL
    pub url: String,
    /// 最大连接数
    pub max_connections: Option<u32>,
    /// 最小连接数
    pub min_connections: Option<u32>,
    /// 连接超时时间（秒）
    pub connect_timeout: Option<u64>,
    /// 空闲连接超时时间（秒）
    pub idle_timeout: Option<u64>,
}

/// 服务器配置设置
#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    /// 服务器监听主机地址
    pub host: String,
    /// 服务器监听端口
    pub port: u16,
}

/// 存档源配置设置
#[derive(Debug, Clone, Deserialize)]
pub struct ArchiveSettings {
    /// 存档索引服务基础URL
    pub index_base_url: String,
    /// 存档内容服务基础URL
    pub data_base_url: String,
    /// 未知月份的默认索引集合
    pub default_collection: String,
    /// 月份到索引集合的映射覆盖，合并在内置表之上，
    /// 使新的存档代次无需改代码即可接入
    #[serde(default)]
    pub collections: HashMap<String, String>,
    /// 单次HTTP请求超时时间（秒）
    pub request_timeout: Option<u64>,
}

/// 分类器配置设置
#[derive(Debug, Clone, Deserialize)]
pub struct ClassifierSettings {
    /// API密钥，未配置时分类调用失败并回退到安全默认值
    pub api_key: Option<String>,
    /// 使用的模型名称
    pub model: String,
    /// API基础URL
    pub api_base_url: String,
}

impl Settings {
    /// 创建新的配置实例
    ///
    /// 从环境变量加载配置，支持默认值
    ///
    /// # Returns
    ///
    /// * `Ok(Settings)` - 成功加载的配置
    /// * `Err(ConfigError)` - 配置加载失败
    pub fn new() -> Result<Self, ConfigError> {
        let env = std::env::var("APP_ENVIRONMENT").unwrap_or_else(|_| "default".to_string());
        let builder = Config::builder()
            // Start with default settings
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 3000)?
            // Default DB pool settings
            .set_default("database.max_connections", 100)?
            .set_default("database.min_connections", 10)?
            .set_default("database.connect_timeout", 10)?
            .set_default("database.idle_timeout", 300)?
            // Default archive settings
            .set_default("archive.index_base_url", "https://index.commoncrawl.org")?
            .set_default("archive.data_base_url", "https://data.commoncrawl.org")?
            .set_default("archive.default_collection", "CC-MAIN-2024-33")?
            .set_default("archive.request_timeout", 10)?
            // Default classifier settings
            .set_default("classifier.model", "gpt-4o-mini")?
            .set_default("classifier.api_base_url", "https://api.openai.com/v1")?
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", env)).required(false))
            .add_source(Environment::with_prefix("CITERS").separator("__"));

        builder.build()?.try_deserialize()
    }
}
