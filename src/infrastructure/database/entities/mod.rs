// Copyright (c) 2025 Citers Contributors
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

pub mod citation;
pub mod citation_score;
pub mod crawl_cache;
pub mod job;
pub mod monthly_summary;
