// Copyright (c) 2025 Citers Contributors
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::infrastructure::repositories::{
    CitationRepositoryImpl, JobRepositoryImpl, ScoreRepositoryImpl,
};
use crate::presentation::handlers::citation_handler;
use axum::{
    routing::{get, post},
    Router,
};

/// 创建应用路由
///
/// # 返回值
///
/// 返回配置好的路由
pub fn routes() -> Router {
    let public_routes = Router::new()
        .route("/health", get(health_check))
        .route("/v1/version", get(version));

    let api_routes = Router::new()
        .route(
            "/v1/citations/analyze",
            post(
                citation_handler::start_analysis::<
                    JobRepositoryImpl,
                    CitationRepositoryImpl,
                    ScoreRepositoryImpl,
                >,
            ),
        )
        .route(
            "/v1/citations/jobs/{id}",
            get(citation_handler::job_status::<
                JobRepositoryImpl,
                CitationRepositoryImpl,
                ScoreRepositoryImpl,
            >),
        )
        .route(
            "/v1/citations/jobs/{id}/results",
            get(citation_handler::job_results::<
                JobRepositoryImpl,
                CitationRepositoryImpl,
                ScoreRepositoryImpl,
            >),
        )
        .route(
            "/v1/citations/compare",
            post(citation_handler::compare::<
                JobRepositoryImpl,
                CitationRepositoryImpl,
                ScoreRepositoryImpl,
            >),
        );

    Router::new().merge(public_routes).merge(api_routes)
}

/// 健康检查端点
///
/// # 返回值
///
/// 返回"OK"字符串
pub async fn health_check() -> &'static str {
    "OK"
}

/// 版本信息端点
///
/// # 返回值
///
/// 返回应用版本号
pub async fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
