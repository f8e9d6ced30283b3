// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! End-to-end workflow tests.
//!
//! These tests drive the flows the way the screens do, against real stores.

mod browse_points;
mod create_point;
mod edit_point;
mod login;
mod persistence;
mod remote_store;
