// Copyright (c) 2025 Citers Contributors
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

//! citers - 历史引用发现与评分服务
//!
//! 从公共网页存档中挖掘指向目标域名的链接与提及，
//! 经外部分类能力标注情感与主题后，聚合为月度评分
//! 与趋势摘要，并支持竞争对手并列比较。

/// 应用层：数据传输对象与用例
pub mod application;
/// 配置加载
pub mod config;
/// 领域层：模型、仓库特质与领域服务
pub mod domain;
/// 基础设施层：存档访问、数据库与仓库实现
pub mod infrastructure;
/// 表现层：HTTP处理器与路由
pub mod presentation;
/// 工具函数
pub mod utils;
/// 后台工作器
pub mod workers;
