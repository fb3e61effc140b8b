// Copyright (c) 2025 Citers Contributors
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 工具模块
///
/// 提供通用的工具函数和辅助功能
/// 包括月份换算、文本窗口处理与遥测初始化等功能
pub mod month;
pub mod telemetry;
pub mod text;
