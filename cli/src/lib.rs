// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Command-line interface and terminal UI of pinmap.

mod arg;
mod cli;
mod cmd_browse;
mod cmd_generate_completion;
mod cmd_point;
mod config;
mod login;
mod point_formatter;
mod prompt;
mod table;
mod tui;
mod util;

pub use crate::cli::{Cli, Commands, run};
pub use crate::config::Config;
