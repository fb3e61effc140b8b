// Copyright (c) 2025 Citers Contributors
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 领域模型模块
///
/// 该模块定义了系统的核心业务实体，包括：
/// - 作业（job）：表示一次端到端的引用分析运行
/// - 引用（citation）：存档页面中发现的链接或提及
/// - 评分（score）：月度汇总、摘要与爬取缓存条目
///
/// 这些模型构成了系统的数据基础，定义了业务概念的
/// 结构和行为，是领域驱动设计的核心组成部分。
pub mod citation;
pub mod job;
pub mod score;
