// Copyright (c) 2025 Citers Contributors
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use axum::Extension;
use citers::config::settings::Settings;
use citers::domain::services::classifier_service::{ClassifierService, LlmClassifier};
use citers::infrastructure::archive::{
    ArchiveContentFetcher, ArchiveIndexClient, CdxIndexClient, WarcContentFetcher,
};
use citers::infrastructure::database::connection;
use citers::infrastructure::repositories::{
    CitationRepositoryImpl, CrawlCacheRepositoryImpl, JobRepositoryImpl, ScoreRepositoryImpl,
};
use citers::presentation::routes;
use citers::utils::telemetry;
use citers::workers::{AnalysisWorker, JobRunner, TokioJobRunner};
use migration::{Migrator, MigratorTrait};
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::info;

/// 主函数
///
/// 应用程序入口点，负责初始化所有组件并启动服务
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. Initialize logging
    telemetry::init_telemetry();
    info!("Starting citers...");

    // 2. Load configuration
    let settings = Arc::new(Settings::new()?);
    info!("Configuration loaded");

    // 3. Connect to database
    let db = connection::create_pool(&settings.database).await?;
    let db = Arc::new(db);
    info!("Database connection established");

    // Run database migrations
    info!("Running database migrations...");
    Migrator::up(db.as_ref(), None).await?;
    info!("Database migrations applied");

    // 4. Initialize repositories
    let job_repo = Arc::new(JobRepositoryImpl::new(db.clone()));
    let citation_repo = Arc::new(CitationRepositoryImpl::new(db.clone()));
    let cache_repo = Arc::new(CrawlCacheRepositoryImpl::new(db.clone()));
    let score_repo = Arc::new(ScoreRepositoryImpl::new(db.clone()));

    // 5. Initialize archive clients and classifier
    let index_client: Arc<dyn ArchiveIndexClient> =
        Arc::new(CdxIndexClient::new(&settings.archive));
    let content_fetcher: Arc<dyn ArchiveContentFetcher> =
        Arc::new(WarcContentFetcher::new(&settings.archive));
    let classifier: Arc<dyn ClassifierService> =
        Arc::new(LlmClassifier::new(&settings.classifier));
    info!("Archive clients and classifier initialized");

    // 6. Initialize the analysis worker and job runner
    let worker = Arc::new(AnalysisWorker::new(
        job_repo.clone(),
        citation_repo.clone(),
        cache_repo.clone(),
        score_repo.clone(),
        index_client,
        content_fetcher,
        classifier.clone(),
    ));
    let runner: Arc<dyn JobRunner> = Arc::new(TokioJobRunner::new(worker));

    // 7. Build the router
    let app = routes::routes()
        .layer(Extension(job_repo))
        .layer(Extension(citation_repo))
        .layer(Extension(score_repo))
        .layer(Extension(classifier))
        .layer(Extension(runner))
        .layer(TraceLayer::new_for_http());

    // 8. Start the server
    let addr = format!("{}:{}", settings.server.host, settings.server.port);
    let listener = TcpListener::bind(&addr).await?;
    info!("Server listening on {}", addr);
    axum::serve(listener, app).await?;

    Ok(())
}
