// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::error::Error;

use clap::{ArgMatches, Command};
use pinmap_core::{PinMap, Route};

use crate::config::Config;
use crate::login::LoginArgs;
use crate::tui::App;

/// Opens the map with every point, the default command.
#[derive(Debug, Clone, Copy)]
pub struct CmdBrowse;

impl CmdBrowse {
    pub const NAME: &str = "browse";

    pub fn command() -> Command {
        Command::new(Self::NAME)
            .alias("map")
            .about("Browse points on the map")
    }

    pub fn from(_matches: &ArgMatches) -> Self {
        Self
    }

    pub async fn run(
        self,
        pinmap: &PinMap,
        login: &LoginArgs,
        config: Config,
    ) -> Result<(), Box<dyn Error>> {
        tracing::debug!(?login, "browsing points");
        App::new(pinmap, &config)
            .with_session(login.session(pinmap)?)
            .with_username(login.username.clone())
            .run(Route::Browse)
            .await?;
        Ok(())
    }
}
