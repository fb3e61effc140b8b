// Copyright (c) 2025 Citers Contributors
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// HTTP处理器
pub mod handlers;
/// 路由定义
pub mod routes;
