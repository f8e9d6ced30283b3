// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! The map surface: a base map view, markers and the gestures that move them.

mod marker;
mod surface;
mod view;

pub use crate::map::marker::{Marker, MarkerLayer, Popup, PopupAction};
pub use crate::map::surface::MapSurface;
pub use crate::map::view::{Bounds, ContainerReady, MAX_ZOOM, MIN_ZOOM, MapView};

use crate::coordinate::Coordinate;

/// Configuration of every map shown by the application.
#[derive(Debug, Clone, PartialEq, serde::Deserialize)]
#[serde(default)]
pub struct MapConfig {
    /// Initial center of a map without a point to show.
    pub center: Coordinate,

    /// Initial zoom level, clamped to [`MIN_ZOOM`]..=[`MAX_ZOOM`].
    pub zoom: u8,

    /// Selectable base layers, the first one is active initially.
    pub layers: Vec<BaseLayer>,

    /// Appearance of markers.
    pub marker: MarkerStyle,

    /// Hint shown next to the marker while creating a point.
    pub tooltip: String,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            center: Coordinate {
                lat: -7.7956,
                lng: 110.3695,
            },
            zoom: 13,
            layers: vec![BaseLayer::open_street_map(), BaseLayer::esri_world_imagery()],
            marker: MarkerStyle::default(),
            tooltip: "Drag the marker or move the map\nto change the coordinates\nof the location"
                .to_string(),
        }
    }
}

/// A base map layer.
///
/// The tile URL and attribution are carried for display; the terminal renders the
/// built-in world outline at the given level of detail.
#[derive(Debug, Clone, PartialEq, Eq, serde::Deserialize)]
pub struct BaseLayer {
    /// Name shown in the layer switcher.
    pub name: String,

    /// Tile URL template.
    #[serde(default)]
    pub url: String,

    /// Attribution text.
    #[serde(default)]
    pub attribution: String,

    /// Detail of the rendered outline.
    #[serde(default)]
    pub detail: LayerDetail,
}

impl BaseLayer {
    pub fn open_street_map() -> Self {
        Self {
            name: "OpenStreetMap".to_string(),
            url: "https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png".to_string(),
            attribution: "© OpenStreetMap contributors".to_string(),
            detail: LayerDetail::High,
        }
    }

    pub fn esri_world_imagery() -> Self {
        Self {
            name: "Esri World Imagery".to_string(),
            url: "https://server.arcgisonline.com/ArcGIS/rest/services/World_Imagery/MapServer/tile/{z}/{y}/{x}".to_string(),
            attribution: "ESRI".to_string(),
            detail: LayerDetail::Low,
        }
    }
}

/// Level of detail of a base layer outline.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LayerDetail {
    #[default]
    Low,
    High,
}

/// Marker appearance, shared by every map instead of a global default icon.
#[derive(Debug, Clone, PartialEq, Eq, serde::Deserialize)]
#[serde(default)]
pub struct MarkerStyle {
    /// Glyph of a stored point.
    pub glyph: String,

    /// Glyph of the draggable marker.
    pub active_glyph: String,

    /// Offset of the popup from the marker cell, in columns and rows.
    pub popup_anchor: [i16; 2],
}

impl Default for MarkerStyle {
    fn default() -> Self {
        Self {
            glyph: "●".to_string(),
            active_glyph: "◆".to_string(),
            popup_anchor: [1, -1],
        }
    }
}
