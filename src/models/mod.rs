// Copyright 2024-2026 devicefit Contributors
// SPDX-License-Identifier: Apache-2.0

//! Model registry lookup and display names.

pub mod catalog;
pub mod nickname;

pub use catalog::{CatalogError, CatalogLookup, ModelCatalog, ModelRecord};
pub use nickname::{nickname, nickname_all};
