// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::{cell::RefCell, rc::Rc};

use pinmap_core::flow::{CreateFlow, EditFlow};
use pinmap_core::map::{BaseLayer, MapSurface, MarkerStyle};
use pinmap_core::{Alert, Error, MapConfig, PointRecord, Saved, ValidationError};

use crate::tui::component_dialog::{Dialog, DialogKind, DialogStoreLike};
use crate::tui::dispatcher::{Action, Dispatcher};
use crate::tui::map_widget::{MapScene, MapStoreLike};

/// The flow behind the point editor.
#[derive(Debug)]
pub enum EditorFlow {
    Create(CreateFlow),
    Edit(EditFlow),
}

impl EditorFlow {
    pub fn title(&self) -> String {
        match self {
            EditorFlow::Create(_) => "New Point".to_string(),
            EditorFlow::Edit(flow) => format!("Edit Point {}", flow.id()),
        }
    }

    pub fn name(&self) -> &str {
        match self {
            EditorFlow::Create(flow) => flow.name(),
            EditorFlow::Edit(flow) => flow.name(),
        }
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        match self {
            EditorFlow::Create(flow) => flow.set_name(name),
            EditorFlow::Edit(flow) => flow.set_name(name),
        }
    }

    pub fn coordinates(&self) -> &str {
        self.surface().map(MapSurface::coordinates).unwrap_or_default()
    }

    /// The map, absent until an edited point is loaded.
    pub fn surface(&self) -> Option<&MapSurface> {
        match self {
            EditorFlow::Create(flow) => Some(flow.surface()),
            EditorFlow::Edit(flow) => flow.surface(),
        }
    }

    pub fn surface_mut(&mut self) -> Option<&mut MapSurface> {
        match self {
            EditorFlow::Create(flow) => Some(flow.surface_mut()),
            EditorFlow::Edit(flow) => flow.surface_mut(),
        }
    }

    pub fn alert(&self) -> Option<&Alert> {
        match self {
            EditorFlow::Create(flow) => flow.alert(),
            EditorFlow::Edit(flow) => flow.alert(),
        }
    }

    pub fn dismiss_alert(&mut self) {
        match self {
            EditorFlow::Create(flow) => flow.dismiss_alert(),
            EditorFlow::Edit(flow) => flow.dismiss_alert(),
        }
    }

    pub fn validation(&self) -> Result<PointRecord, ValidationError> {
        match self {
            EditorFlow::Create(flow) => flow.can_save(),
            EditorFlow::Edit(flow) => flow.can_save(),
        }
    }

    /// Creates or updates the point.
    pub async fn submit(&mut self) -> Result<Saved, Error> {
        match self {
            EditorFlow::Create(flow) => flow.save().await,
            EditorFlow::Edit(flow) => flow.update().await,
        }
    }
}

#[derive(Debug)]
pub struct EditorStore {
    pub flow: EditorFlow,
    layers: Vec<BaseLayer>,
    style: MarkerStyle,

    /// Why the last submit was refused.
    pub rejected: Option<ValidationError>,

    /// Whether the user submitted valid changes
    pub submit: bool,
}

impl EditorStore {
    pub fn new(flow: EditorFlow, config: &MapConfig) -> Self {
        Self {
            flow,
            layers: config.layers.clone(),
            style: config.marker.clone(),
            rejected: None,
            submit: false,
        }
    }

    pub fn register_to(that: Rc<RefCell<Self>>, dispatcher: &mut Dispatcher) {
        let callback = Rc::new(RefCell::new(move |action: &Action| {
            let mut that = that.borrow_mut();
            match action {
                Action::UpdateName(v) => that.flow.set_name(v.clone()),
                Action::DismissAlert => {
                    that.flow.dismiss_alert();
                    that.rejected = None;
                }
                Action::SubmitChanges => match that.flow.validation() {
                    Ok(_) => that.submit = true,
                    Err(e) => {
                        tracing::debug!(error = %e, "submit refused");
                        that.rejected = Some(e);
                    }
                },
                _ => {
                    if let Some(surface) = that.flow.surface_mut() {
                        apply_to_surface(surface, action);
                    }
                }
            }
        }));
        dispatcher.register(callback);
    }
}

fn apply_to_surface(surface: &mut MapSurface, action: &Action) {
    match action {
        Action::UpdateCoordinates(v) => surface.set_coordinates(v),
        Action::MapResized(ready) => surface.view_mut().resize(*ready),
        Action::PanMap { cols, rows } => surface.view_mut().pan(*cols, *rows),
        Action::ZoomIn => surface.view_mut().zoom_in(),
        Action::ZoomOut => surface.view_mut().zoom_out(),
        Action::NextLayer => surface.view_mut().next_layer(),
        Action::DragMarker { col, row } => {
            let target = surface.view().coordinate_at(*col, *row);
            let marker = surface.marker_position();
            surface.drag_marker(target.lat - marker.lat, target.lng - marker.lng);
        }
        Action::DropMarker => surface.release_marker(),
        Action::ClickMap { col, row } => {
            let pos = surface.view().coordinate_at(*col, *row);
            surface.on_map_click(pos);
        }
        _ => {}
    }
}

impl DialogStoreLike for EditorStore {
    fn dialog(&self) -> Option<Dialog> {
        match (&self.rejected, self.flow.alert()) {
            (Some(e), _) => Some(Dialog {
                header: "Cannot Save".to_string(),
                message: e.to_string(),
                kind: DialogKind::Alert,
            }),
            (None, Some(alert)) => Some(Dialog::from(alert)),
            (None, None) => None,
        }
    }
}

impl MapStoreLike for EditorStore {
    fn map_scene(&self) -> Option<MapScene> {
        let surface = self.flow.surface()?;
        let view = surface.view().clone();
        Some(MapScene {
            layer: self.layers.get(view.layer()).cloned(),
            view,
            pins: Vec::new(),
            style: self.style.clone(),
            active: Some(surface.marker_position()),
            dragging: surface.is_dragging(),
            tooltip: surface.tooltip().to_string(),
        })
    }
}
