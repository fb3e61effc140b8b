// Copyright (c) 2025 Citers Contributors
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 引用仓库实现
pub mod citation_repo_impl;
/// 爬取缓存仓库实现
pub mod crawl_cache_repo_impl;
/// 作业仓库实现
pub mod job_repo_impl;
/// 评分仓库实现
pub mod score_repo_impl;

pub use citation_repo_impl::CitationRepositoryImpl;
pub use crawl_cache_repo_impl::CrawlCacheRepositoryImpl;
pub use job_repo_impl::JobRepositoryImpl;
pub use score_repo_impl::ScoreRepositoryImpl;
