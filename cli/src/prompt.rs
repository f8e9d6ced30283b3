// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::error::Error;

use cliclack::{confirm, input, intro, outro, outro_cancel, password};
use pinmap_core::flow::DeleteConfirmation;

/// Asks for whichever part of the login is missing.
pub fn prompt_login(
    username: Option<String>,
    passwd: Option<String>,
) -> Result<(String, String), Box<dyn Error>> {
    intro("Login")?;

    let username = match username {
        Some(a) => a,
        None => input("Username").placeholder("admin").interact()?,
    };

    let passwd = match passwd {
        Some(a) => a,
        None => password("Password").mask('▪').interact()?,
    };

    Ok((username, passwd))
}

/// Asks the user to confirm a pending delete.
pub fn prompt_delete(confirmation: &DeleteConfirmation, name: &str) -> Result<bool, Box<dyn Error>> {
    intro(confirmation.header())?;

    let message = format!("{} ({name})", confirmation.message());
    let yes = confirm(message).initial_value(false).interact()?;
    match yes {
        true => outro("Deleting")?,
        false => outro_cancel("Kept")?,
    }
    Ok(yes)
}
