// Copyright (c) 2025 Citers Contributors
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 分析请求与受理响应
pub mod analyze_request;
/// 比较请求与响应
pub mod compare_request;
/// 作业状态与结果响应
pub mod job_response;
