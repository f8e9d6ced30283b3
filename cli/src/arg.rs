// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use clap::{Arg, ArgMatches, arg, value_parser};
use pinmap_core::PointId;

/// The output format for commands
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum ArgOutputFormat {
    Json,
    Table,
}

impl ArgOutputFormat {
    pub fn arg() -> Arg {
        arg!(--"output-format" <FORMAT> "Output format")
            .value_parser(value_parser!(ArgOutputFormat))
            .default_value("table")
    }

    pub fn from(matches: &ArgMatches) -> Self {
        matches
            .get_one("output-format")
            .copied()
            .unwrap_or(ArgOutputFormat::Table)
    }
}

#[derive(Debug, Clone, Copy)]
pub struct PointArgs;

impl PointArgs {
    pub fn id() -> Arg {
        arg!(id: <ID> "The id of the point")
    }

    pub fn get_id(matches: &ArgMatches) -> PointId {
        let id = matches.get_one::<String>("id").expect("id is required");
        PointId::new(id.as_str())
    }

    pub fn name_positional() -> Arg {
        arg!(name: [NAME] "Name of the point")
    }

    pub fn name() -> Arg {
        arg!(-n --name <NAME> "New name of the point")
    }

    pub fn get_name(matches: &ArgMatches) -> Option<String> {
        matches.get_one("name").cloned()
    }

    pub fn coordinates_positional() -> Arg {
        arg!(coordinates: [COORDINATES] "Coordinates as \"lat, lng\"")
            .allow_hyphen_values(true)
    }

    pub fn coordinates() -> Arg {
        arg!(--coordinates <COORDINATES> "New coordinates as \"lat, lng\"")
            .allow_hyphen_values(true)
    }

    pub fn get_coordinates(matches: &ArgMatches) -> Option<String> {
        matches.get_one("coordinates").cloned()
    }
}
