// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Common test utilities for integration tests.
//!
//! This module provides shared test infrastructure including:
//! - Test data factories (fixtures)
//! - Point stores that fail or stall on demand
//! - Temporary directory management with auto-cleanup

mod fixtures;
mod stores;
mod temp_dir;

#[allow(unused_imports)]
pub use fixtures::{VIEWPORT, memory_pinmap, pinmap_over, session, test_config, test_draft};
#[allow(unused_imports)]
pub use stores::{FlakyStore, GatedStore, Op};
#[allow(unused_imports)]
pub use temp_dir::setup_temp_dirs;
