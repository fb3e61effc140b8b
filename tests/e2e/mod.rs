// Copyright (c) 2025 Citers Contributors
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

mod api_test;
mod pipeline_test;

use async_trait::async_trait;
use citers::domain::models::citation::Sentiment;
use citers::domain::services::classifier_service::ClassifierService;
use migration::{Migrator, MigratorTrait};
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use serde_json::Value;

/// 独立的内存数据库，限制单连接以免各连接各持一份库
pub async fn test_db() -> DatabaseConnection {
    let mut opt = ConnectOptions::new("sqlite::memory:");
    opt.max_connections(1).sqlx_logging(false);
    let db = Database::connect(opt).await.expect("sqlite should connect");
    Migrator::up(&db, None).await.expect("migrations should apply");
    db
}

/// 确定性的分类器替身
pub struct StubClassifier {
    pub sentiment: Sentiment,
    pub topics: Vec<String>,
}

#[async_trait]
impl ClassifierService for StubClassifier {
    async fn classify_sentiment(&self, _context: &str) -> anyhow::Result<Sentiment> {
        Ok(self.sentiment)
    }

    async fn extract_topics(&self, _contexts: &[String]) -> anyhow::Result<Vec<String>> {
        Ok(self.topics.clone())
    }

    async fn summarize(&self, _stats: &Value) -> anyhow::Result<String> {
        Ok("domain comparison narrative".to_string())
    }
}
