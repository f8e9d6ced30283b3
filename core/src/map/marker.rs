// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use crate::coordinate::Coordinate;
use crate::map::MapView;
use crate::point::PointId;

/// A stored point shown on the browse map.
#[derive(Debug, Clone, PartialEq)]
pub struct Marker {
    /// The point this marker stands for.
    pub id: PointId,
    pub position: Coordinate,
    pub popup: Popup,
}

/// Content of a marker popup: the point name and the actions offered for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Popup {
    pub name: String,
}

impl Popup {
    pub fn actions(&self) -> &'static [PopupAction] {
        &[PopupAction::Edit, PopupAction::Delete]
    }
}

/// Buttons of a marker popup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PopupAction {
    Edit,
    Delete,
}

impl PopupAction {
    pub fn label(self) -> &'static str {
        match self {
            PopupAction::Edit => "Edit",
            PopupAction::Delete => "Delete",
        }
    }
}

/// The markers of stored points, in display order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MarkerLayer {
    markers: Vec<Marker>,
}

impl MarkerLayer {
    /// Drops every marker and shows `markers` instead.
    pub fn replace(&mut self, markers: Vec<Marker>) {
        self.markers = markers;
    }

    /// Removes the marker tagged with `id`.
    pub fn remove(&mut self, id: &PointId) -> Option<Marker> {
        let index = self.markers.iter().position(|m| &m.id == id)?;
        Some(self.markers.remove(index))
    }

    pub fn get(&self, id: &PointId) -> Option<&Marker> {
        self.markers.iter().find(|m| &m.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Marker> {
        self.markers.iter()
    }

    pub fn len(&self) -> usize {
        self.markers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.markers.is_empty()
    }

    /// The marker drawn closest to a cell, at most one cell away.
    pub fn hit(&self, view: &MapView, col: u16, row: u16) -> Option<&Marker> {
        self.markers
            .iter()
            .filter_map(|m| {
                let (c, r) = view.project(m.position)?;
                let dc = i32::from(c) - i32::from(col);
                let dr = i32::from(r) - i32::from(row);
                (dc.abs() <= 1 && dr.abs() <= 1).then_some((dc * dc + dr * dr, m))
            })
            .min_by_key(|(distance, _)| *distance)
            .map(|(_, m)| m)
    }
}
