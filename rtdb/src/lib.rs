// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Client for JSON trees exposed over REST in the style of the Firebase Realtime Database.
//!
//! Every node of the tree is addressed by a slash separated path and read or written as
//! `{base_url}/{path}.json`. Children created with [`RtdbClient::push`] receive a key
//! chosen by the server.

#![warn(
    trivial_casts,
    trivial_numeric_casts,
    missing_copy_implementations,
    missing_debug_implementations,
    missing_docs,
    unsafe_code,
    unstable_features,
    unused_import_braces,
    unused_qualifications,
    clippy::dbg_macro,
    clippy::indexing_slicing,
    clippy::pedantic
)]
#![allow(clippy::single_match_else, clippy::match_bool)]

mod client;
mod config;
mod error;
mod http;
mod types;

pub use crate::client::RtdbClient;
pub use crate::config::{AuthMethod, RtdbConfig};
pub use crate::error::RtdbError;
pub use crate::types::{Key, NodePath};
