// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::{error::Error, fmt};

use clap::{Arg, ArgMatches, arg};
use pinmap_core::{PinMap, Session};

use crate::prompt::prompt_login;

const PINMAP_USERNAME_ENV: &str = "PINMAP_USERNAME";
const PINMAP_PASSWORD_ENV: &str = "PINMAP_PASSWORD";

/// Login given on the command line or in the environment, possibly incomplete.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct LoginArgs {
    pub username: Option<String>,
    pub password: Option<String>,
}

impl LoginArgs {
    pub fn username() -> Arg {
        arg!(-u --username <USERNAME> "Username to log in with")
            .long_help(format!(
                "Username to log in with. Falls back to ${PINMAP_USERNAME_ENV}, then to a prompt."
            ))
            .global(true)
    }

    pub fn password() -> Arg {
        arg!(--password <PASSWORD> "Password to log in with")
            .long_help(format!(
                "Password to log in with. Falls back to ${PINMAP_PASSWORD_ENV}, then to a prompt."
            ))
            .global(true)
    }

    /// Reads the flags, filling the gaps from the environment.
    pub fn from(matches: &ArgMatches) -> Self {
        Self {
            username: matches.get_one::<String>("username").cloned(),
            password: matches.get_one::<String>("password").cloned(),
        }
        .or_env()
    }

    fn or_env(self) -> Self {
        Self {
            username: self.username.or_else(|| std::env::var(PINMAP_USERNAME_ENV).ok()),
            password: self.password.or_else(|| std::env::var(PINMAP_PASSWORD_ENV).ok()),
        }
    }

    /// Both parts, when nothing has to be asked.
    pub fn complete(&self) -> Option<(&str, &str)> {
        Some((self.username.as_deref()?, self.password.as_deref()?))
    }

    /// Logs in, prompting for whatever is missing.
    pub fn login(&self, pinmap: &PinMap) -> Result<Session, Box<dyn Error>> {
        let session = match self.complete() {
            Some((username, password)) => pinmap.login(username, password)?,
            None => {
                let (username, password) =
                    prompt_login(self.username.clone(), self.password.clone())?;
                pinmap.login(&username, &password)?
            }
        };
        Ok(session)
    }

    /// Logs in without prompting, leaving the login to the terminal UI when parts are missing.
    pub fn session(&self, pinmap: &PinMap) -> Result<Option<Session>, Box<dyn Error>> {
        match self.complete() {
            Some((username, password)) => Ok(Some(pinmap.login(username, password)?)),
            None => Ok(None),
        }
    }
}

impl fmt::Debug for LoginArgs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginArgs")
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| "***"))
            .finish()
    }
}

#[cfg(test)]
#[allow(unsafe_code)]
mod tests {
    use super::*;
    use clap::Command;

    use crate::util::env_lock;

    fn command() -> Command {
        Command::new("test")
            .arg(LoginArgs::username())
            .arg(LoginArgs::password())
    }

    #[tokio::test]
    async fn flags_win_over_env() {
        let _guard = env_lock().lock().await;
        unsafe {
            std::env::set_var(PINMAP_USERNAME_ENV, "from-env");
            std::env::set_var(PINMAP_PASSWORD_ENV, "env-secret");
        }

        let matches = command()
            .try_get_matches_from(["test", "-u", "admin"])
            .unwrap();
        let args = LoginArgs::from(&matches);

        unsafe {
            std::env::remove_var(PINMAP_USERNAME_ENV);
            std::env::remove_var(PINMAP_PASSWORD_ENV);
        }
        assert_eq!(args.username.as_deref(), Some("admin"));
        assert_eq!(args.password.as_deref(), Some("env-secret"));
        assert_eq!(args.complete(), Some(("admin", "env-secret")));
    }

    #[tokio::test]
    async fn missing_parts_stay_incomplete() {
        let _guard = env_lock().lock().await;
        unsafe {
            std::env::remove_var(PINMAP_USERNAME_ENV);
            std::env::remove_var(PINMAP_PASSWORD_ENV);
        }

        let matches = command()
            .try_get_matches_from(["test", "--username", "admin"])
            .unwrap();
        let args = LoginArgs::from(&matches);

        assert_eq!(args.complete(), None);
    }

    #[test]
    fn debug_hides_password() {
        let args = LoginArgs {
            username: Some("admin".to_string()),
            password: Some("password".to_string()),
        };
        let debug = format!("{args:?}");
        assert!(debug.contains("admin"));
        assert!(!debug.contains("\"password\""));
    }
}
