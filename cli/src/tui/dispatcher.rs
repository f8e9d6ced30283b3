// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::{cell::RefCell, rc::Rc};

use pinmap_core::map::{ContainerReady, PopupAction};

type Callback = Rc<RefCell<dyn FnMut(&Action)>>;

pub struct Dispatcher {
    subscribers: Vec<Callback>,
}

impl Dispatcher {
    pub fn new() -> Self {
        Self {
            subscribers: Vec::new(),
        }
    }

    pub fn register(&mut self, callback: Callback) {
        self.subscribers.push(callback);
    }

    pub fn dispatch(&mut self, action: Action) {
        tracing::trace!(?action, "dispatching");
        for sub in &self.subscribers {
            (sub.borrow_mut())(&action);
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    UpdateUsername(String),
    UpdatePassword(String),
    UpdateName(String),
    UpdateCoordinates(String),

    /// The map area was laid out.
    MapResized(ContainerReady),
    PanMap {
        cols: i32,
        rows: i32,
    },
    ZoomIn,
    ZoomOut,
    NextLayer,
    /// A cell of the map was clicked, positions are relative to the map area.
    ClickMap {
        col: u16,
        row: u16,
    },
    /// The draggable marker is being moved over a cell.
    DragMarker {
        col: u16,
        row: u16,
    },
    DropMarker,

    /// Moves the open popup to the next or previous marker.
    SelectMarker(isize),
    Popup(PopupAction),
    ClosePopup,
    Reload,
    NewPoint,

    /// The answer to a yes/no dialog.
    Answer(bool),
    DismissAlert,
    SubmitChanges,
}
