// Copyright (c) 2025 Citers Contributors
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 领域服务模块
///
/// 该模块包含系统的核心业务逻辑服务，这些服务封装了复杂的
/// 业务规则和领域逻辑，协调多个领域对象来完成业务操作。
///
/// 包含的服务：
/// - 分类器服务（classifier_service）：集成外部文本分类能力
/// - 提取服务（extraction_service）：从存档页面标记中提取引用
/// - 评分服务（scoring_service）：计算月度综合权威评分
///
/// 领域服务与应用程序服务的区别在于：领域服务包含纯粹的业务逻辑，
/// 而应用程序服务负责协调和编排，可能包含技术实现细节。
pub mod classifier_service;
pub mod extraction_service;
pub mod scoring_service;
