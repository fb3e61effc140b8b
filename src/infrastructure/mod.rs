// Copyright (c) 2025 Citers Contributors
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 存档访问层
pub mod archive;
/// 数据库连接与实体
pub mod database;
/// 仓库实现
pub mod repositories;
