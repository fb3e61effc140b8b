// Copyright (c) 2025 Citers Contributors
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

mod archive_index_test;
mod content_fetcher_test;
mod repository_test;
