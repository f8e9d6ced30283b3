// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! The screens of the application as state machines over a [`PointStore`](crate::PointStore).

mod browse;
mod create;
mod edit;

pub use crate::flow::browse::{BrowseCommand, BrowseFlow, BrowseSnapshot, DeleteConfirmation, LoadOutcome};
pub use crate::flow::create::CreateFlow;
pub use crate::flow::edit::{EditFlow, EditState};

use std::fmt;

use crate::point::{Point, PointId};

/// Where the application goes next.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Login,
    Browse,
    Create,
    Edit(PointId),
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Route::Login => write!(f, "login"),
            Route::Browse => write!(f, "browse"),
            Route::Create => write!(f, "create"),
            Route::Edit(id) => write!(f, "edit {id}"),
        }
    }
}

/// A message the user has to acknowledge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alert {
    pub header: String,
    pub message: String,
}

impl Alert {
    pub fn new(header: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            header: header.into(),
            message: message.into(),
        }
    }
}

/// The result of a successful save.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Saved {
    /// The point as stored.
    pub point: Point,

    /// Where to go afterwards.
    pub next: Route,
}
