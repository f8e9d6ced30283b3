// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::{error::Error, ffi::OsString, io, path::PathBuf};

use clap::{ArgMatches, Command, ValueHint, arg, builder::styling, crate_version, value_parser};
use colored::Colorize;
use futures::{FutureExt, future::LocalBoxFuture};
use pinmap_core::{APP_NAME, PinMap};
use tracing_subscriber::EnvFilter;

use crate::cmd_browse::CmdBrowse;
use crate::cmd_generate_completion::CmdGenerateCompletion;
use crate::cmd_point::{CmdDelete, CmdEdit, CmdList, CmdNew};
use crate::config::{Config, parse_config};
use crate::login::LoginArgs;

/// Run the pinmap command-line interface.
pub async fn run() -> Result<(), Box<dyn Error>> {
    init_tracing();
    match Cli::parse() {
        Ok(cli) => {
            if let Err(e) = cli.run().await {
                println!("{} {}", "Error:".red(), e);
            }
        }
        Err(e) => println!("{} {}", "Error:".red(), e),
    };
    Ok(())
}

/// Logs go to stderr, and only when `RUST_LOG` asks for them so the terminal UI stays clean.
fn init_tracing() {
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(io::stderr)
            .init();
    }
}

/// Command-line interface
#[derive(Debug)]
pub struct Cli {
    /// Path to the configuration file
    pub config: Option<PathBuf>,

    /// Login given by flags or environment
    pub login: LoginArgs,

    /// The command to execute
    pub command: Commands,
}

impl Cli {
    /// Create the command-line interface
    pub fn command() -> Command {
        const STYLES: styling::Styles = styling::Styles::styled()
            .header(styling::AnsiColor::Green.on_default().bold())
            .usage(styling::AnsiColor::Green.on_default().bold())
            .literal(styling::AnsiColor::Blue.on_default().bold())
            .placeholder(styling::AnsiColor::Cyan.on_default());

        Command::new(APP_NAME)
            .about("Record, edit and browse named places on a map.")
            .author("Zexin Yuan <aim@yzx9.xyz>")
            .version(crate_version!())
            .styles(STYLES)
            .subcommand_required(false) // allow default to browse
            .arg_required_else_help(false)
            .arg(
                arg!(-c --config [CONFIG] "Path to the configuration file")
                    .long_help(
                        "\
Path to the configuration file. Defaults to $XDG_CONFIG_HOME/pinmap/config.toml on Linux and MacOS, \
%LOCALAPPDATA%/pinmap/config.toml on Windows.",
                    )
                    .value_parser(value_parser!(PathBuf))
                    .value_hint(ValueHint::FilePath),
            )
            .arg(LoginArgs::username())
            .arg(LoginArgs::password())
            .subcommand(CmdBrowse::command())
            .subcommand(CmdNew::command())
            .subcommand(CmdEdit::command())
            .subcommand(CmdDelete::command())
            .subcommand(CmdList::command())
            .subcommand(CmdGenerateCompletion::command())
    }

    /// Parse the command-line arguments
    pub fn parse() -> Result<Self, Box<dyn Error>> {
        let commands = Self::command();
        let matches = commands.get_matches();
        Self::from(matches)
    }

    /// Parse the specified arguments
    pub fn try_parse_from<I, T>(args: I) -> Result<Self, Box<dyn Error>>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let commands = Self::command();
        let matches = commands.try_get_matches_from(args)?;
        Self::from(matches)
    }

    /// Create a CLI instance from the `ArgMatches`
    pub fn from(matches: ArgMatches) -> Result<Self, Box<dyn Error>> {
        use Commands::*;
        let (command, login) = match matches.subcommand() {
            Some((CmdBrowse::NAME, sub)) => (Browse(CmdBrowse::from(sub)), LoginArgs::from(sub)),
            Some((CmdNew::NAME, sub)) => (New(CmdNew::from(sub)), LoginArgs::from(sub)),
            Some((CmdEdit::NAME, sub)) => (Edit(CmdEdit::from(sub)), LoginArgs::from(sub)),
            Some((CmdDelete::NAME, sub)) => (Delete(CmdDelete::from(sub)), LoginArgs::from(sub)),
            Some((CmdList::NAME, sub)) => (List(CmdList::from(sub)), LoginArgs::from(sub)),
            Some((CmdGenerateCompletion::NAME, sub)) => (
                GenerateCompletion(CmdGenerateCompletion::from(sub)),
                LoginArgs::default(),
            ),
            None => (Browse(CmdBrowse), LoginArgs::from(&matches)),
            _ => unreachable!(),
        };

        let config = matches.get_one("config").cloned();
        Ok(Cli {
            config,
            login,
            command,
        })
    }

    /// Run the command
    pub async fn run(self) -> Result<(), Box<dyn Error>> {
        self.command.run(self.config, self.login).await
    }
}

/// The commands available in the CLI
#[derive(Debug, Clone)]
pub enum Commands {
    /// Browse points on the map
    Browse(CmdBrowse),

    /// Add a new point
    New(CmdNew),

    /// Edit a point
    Edit(CmdEdit),

    /// Delete a point
    Delete(CmdDelete),

    /// List points
    List(CmdList),

    /// Generate shell completion
    GenerateCompletion(CmdGenerateCompletion),
}

impl Commands {
    /// Run the command with the given configuration
    #[rustfmt::skip]
    pub async fn run(self, config: Option<PathBuf>, login: LoginArgs) -> Result<(), Box<dyn Error>> {
        use Commands::*;
        match self {
            Browse(a) => Self::run_with(config, login, |x, l, c| a.run(x, l, c).boxed_local()).await,
            New(a)    => Self::run_with(config, login, |x, l, c| a.run(x, l, c).boxed_local()).await,
            Edit(a)   => Self::run_with(config, login, |x, l, c| a.run(x, l, c).boxed_local()).await,
            Delete(a) => Self::run_with(config, login, |x, l, c| a.run(x, l, c).boxed_local()).await,
            List(a)   => Self::run_with(config, login, |x, l, c| a.run(x, l, c).boxed_local()).await,
            GenerateCompletion(a) => a.run(),
        }
    }

    async fn run_with<F>(config: Option<PathBuf>, login: LoginArgs, f: F) -> Result<(), Box<dyn Error>>
    where
        F: for<'a> FnOnce(
            &'a PinMap,
            &'a LoginArgs,
            Config,
        ) -> LocalBoxFuture<'a, Result<(), Box<dyn Error>>>,
    {
        tracing::debug!("parsing configuration");
        let (core_config, config) = parse_config(config).await?;
        let pinmap = PinMap::new(core_config).await?;

        let result = f(&pinmap, &login, config).await;

        pinmap.close().await?;
        result
    }
}
