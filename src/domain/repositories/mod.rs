// Copyright (c) 2025 Citers Contributors
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 仓库接口模块
///
/// 该模块定义了领域层的仓库接口，遵循依赖倒置原则。
/// 仓库接口定义了数据持久化的抽象契约，具体实现由基础设施层提供。
///
/// 包含的仓库接口：
/// - 作业仓库（job_repository）：管理分析作业的生命周期持久化
/// - 引用仓库（citation_repository）：管理引用行的幂等写入与查询
/// - 爬取缓存仓库（crawl_cache_repository）：管理(domain, month)扫描备忘录
/// - 评分仓库（score_repository）：管理月度评分与摘要的upsert
///
/// 这些接口确保了领域层不依赖于具体的数据存储技术，
/// 提高了系统的可测试性和可维护性.
pub mod citation_repository;
pub mod crawl_cache_repository;
pub mod job_repository;
pub mod score_repository;
