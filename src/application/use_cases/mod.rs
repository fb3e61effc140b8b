// Copyright (c) 2025 Citers Contributors
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 引用分析用例
pub mod analyze_use_case;
/// 竞争对手比较用例
pub mod compare_competitors;

pub use analyze_use_case::{AnalyzeUseCase, AnalyzeUseCaseError};
pub use compare_competitors::{CompareUseCase, CompareUseCaseError};
