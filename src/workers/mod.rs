// Copyright (c) 2025 Citers Contributors
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 引用分析工作器
pub mod analysis_worker;
/// 后台作业投递
pub mod runner;

pub use analysis_worker::AnalysisWorker;
pub use runner::{JobRunner, TokioJobRunner};
