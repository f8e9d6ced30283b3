// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Point commands. Given enough arguments they work without a terminal UI, otherwise they
//! open the matching editor page.

use std::error::Error;

use clap::{ArgMatches, Command, arg};
use colored::Colorize;
use pinmap_core::{PinMap, PointId, Route};

use crate::arg::{ArgOutputFormat, PointArgs};
use crate::config::Config;
use crate::login::LoginArgs;
use crate::point_formatter::PointFormatter;
use crate::prompt::prompt_delete;
use crate::tui::App;

#[derive(Debug, Clone)]
pub struct CmdNew {
    pub name: Option<String>,
    pub coordinates: Option<String>,
    pub output_format: ArgOutputFormat,
}

impl CmdNew {
    pub const NAME: &str = "new";

    pub fn command() -> Command {
        Command::new(Self::NAME)
            .alias("add")
            .about("Add a new point, opens the editor unless both name and coordinates are given")
            .arg(PointArgs::name_positional())
            .arg(PointArgs::coordinates_positional())
            .arg(ArgOutputFormat::arg())
    }

    pub fn from(matches: &ArgMatches) -> Self {
        Self {
            name: PointArgs::get_name(matches),
            coordinates: PointArgs::get_coordinates(matches),
            output_format: ArgOutputFormat::from(matches),
        }
    }

    pub async fn run(
        self,
        pinmap: &PinMap,
        login: &LoginArgs,
        config: Config,
    ) -> Result<(), Box<dyn Error>> {
        tracing::debug!(?self, "adding new point");
        let saved = match (self.name, self.coordinates) {
            (Some(name), Some(coordinates)) => {
                let session = login.login(pinmap)?;
                let mut flow = pinmap.create_flow(&session);
                flow.set_name(name);
                flow.surface_mut().set_coordinates(&coordinates);
                Some(flow.save().await?)
            }
            (name, coordinates) => {
                let mut app = App::new(pinmap, &config)
                    .with_session(login.session(pinmap)?)
                    .with_username(login.username.clone())
                    .standalone();
                if name.is_some() || coordinates.is_some() {
                    app = app.with_draft(name.unwrap_or_default(), coordinates.unwrap_or_default());
                }
                app.run(Route::Create).await?
            }
        };

        match saved {
            Some(saved) => PointFormatter::new(self.output_format).print(&[saved.point]),
            None => Ok(()),
        }
    }
}

#[derive(Debug, Clone)]
pub struct CmdEdit {
    pub id: PointId,
    pub name: Option<String>,
    pub coordinates: Option<String>,
    pub output_format: ArgOutputFormat,
}

impl CmdEdit {
    pub const NAME: &str = "edit";

    pub fn command() -> Command {
        Command::new(Self::NAME)
            .about("Edit a point, opens the editor unless a new value is given")
            .arg(PointArgs::id())
            .arg(PointArgs::name())
            .arg(PointArgs::coordinates())
            .arg(ArgOutputFormat::arg())
    }

    pub fn from(matches: &ArgMatches) -> Self {
        Self {
            id: PointArgs::get_id(matches),
            name: PointArgs::get_name(matches),
            coordinates: PointArgs::get_coordinates(matches),
            output_format: ArgOutputFormat::from(matches),
        }
    }

    pub async fn run(
        self,
        pinmap: &PinMap,
        login: &LoginArgs,
        config: Config,
    ) -> Result<(), Box<dyn Error>> {
        tracing::debug!(?self, "editing point");
        let saved = if self.name.is_none() && self.coordinates.is_none() {
            App::new(pinmap, &config)
                .with_session(login.session(pinmap)?)
                .with_username(login.username.clone())
                .standalone()
                .run(Route::Edit(self.id))
                .await?
        } else {
            let session = login.login(pinmap)?;
            let mut flow = pinmap.edit_flow(&session, self.id);
            flow.load().await?;
            if let Some(name) = self.name {
                flow.set_name(name);
            }
            if let (Some(coordinates), Some(surface)) = (self.coordinates, flow.surface_mut()) {
                surface.set_coordinates(&coordinates);
            }
            Some(flow.update().await?)
        };

        match saved {
            Some(saved) => PointFormatter::new(self.output_format).print(&[saved.point]),
            None => Ok(()),
        }
    }
}

#[derive(Debug, Clone)]
pub struct CmdDelete {
    pub id: PointId,
    pub yes: bool,
}

impl CmdDelete {
    pub const NAME: &str = "delete";

    pub fn command() -> Command {
        Command::new(Self::NAME)
            .alias("rm")
            .about("Delete a point after confirmation")
            .arg(PointArgs::id())
            .arg(arg!(-y --yes "Delete without asking for confirmation"))
    }

    pub fn from(matches: &ArgMatches) -> Self {
        Self {
            id: PointArgs::get_id(matches),
            yes: matches.get_flag("yes"),
        }
    }

    pub async fn run(
        self,
        pinmap: &PinMap,
        login: &LoginArgs,
        _config: Config,
    ) -> Result<(), Box<dyn Error>> {
        tracing::debug!(?self, "deleting point");
        let session = login.login(pinmap)?;
        let point = pinmap.get_point(&session, &self.id).await?;

        let flow = pinmap.browse_flow(&session);
        let confirmation = flow.request_delete(self.id);
        if !self.yes && !prompt_delete(&confirmation, &point.name)? {
            confirmation.cancel();
            return Ok(());
        }

        confirmation.confirm(&flow).await?;
        println!("{} {} ({})", "Deleted".green(), point.name, point.id.to_string().bright_black());
        Ok(())
    }
}

#[derive(Debug, Clone, Copy)]
pub struct CmdList {
    pub output_format: ArgOutputFormat,
}

impl CmdList {
    pub const NAME: &str = "list";

    pub fn command() -> Command {
        Command::new(Self::NAME)
            .alias("ls")
            .about("List all points")
            .arg(ArgOutputFormat::arg())
    }

    pub fn from(matches: &ArgMatches) -> Self {
        Self {
            output_format: ArgOutputFormat::from(matches),
        }
    }

    pub async fn run(
        self,
        pinmap: &PinMap,
        login: &LoginArgs,
        _config: Config,
    ) -> Result<(), Box<dyn Error>> {
        tracing::debug!(?self, "listing points");
        let session = login.login(pinmap)?;
        let points = pinmap.list_points(&session).await?;
        PointFormatter::new(self.output_format).print(&points)
    }
}
