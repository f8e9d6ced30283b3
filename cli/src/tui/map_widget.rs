// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::cell::RefCell;
use std::marker::PhantomData;

use pinmap_core::Coordinate;
use pinmap_core::map::{BaseLayer, ContainerReady, LayerDetail, MapView, MarkerStyle};
use ratatui::crossterm::event::{
    KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use ratatui::prelude::*;
use ratatui::widgets::canvas::{Canvas, Map, MapResolution};
use ratatui::widgets::{Clear, Paragraph};

use crate::tui::component::{Component, Message};
use crate::tui::component_form::{FormItem, FormItemState};
use crate::tui::dispatcher::{Action, Dispatcher};

/// Columns and rows moved by one arrow key.
const PAN_COLS: i32 = 4;
const PAN_ROWS: i32 = 2;

/// A store that can show a map.
pub trait MapStoreLike {
    /// What to draw, `None` while there is no map yet.
    fn map_scene(&self) -> Option<MapScene>;
}

/// Everything needed to draw one frame of a map.
#[derive(Debug, Clone, PartialEq)]
pub struct MapScene {
    pub view: MapView,
    pub layer: Option<BaseLayer>,
    pub pins: Vec<Pin>,
    pub style: MarkerStyle,
    /// The draggable marker, if any.
    pub active: Option<Coordinate>,
    pub dragging: bool,
    pub tooltip: String,
}

/// A stored point drawn on the map.
#[derive(Debug, Clone, PartialEq)]
pub struct Pin {
    pub position: Coordinate,
    pub selected: bool,
}

#[derive(Debug, Clone, Copy)]
struct Press {
    col: u16,
    row: u16,
    grabbed: bool,
    moved: bool,
}

/// An interactive map: pans with arrows or by dragging, zooms with `+`/`-` or the wheel,
/// and moves the draggable marker with shift+arrows or by dragging it.
pub struct MapPane<S: MapStoreLike> {
    title: String,
    active: bool,
    press: Option<Press>,
    _phantom: PhantomData<S>,
}

impl<S: MapStoreLike> MapPane<S> {
    pub fn new(title: impl ToString) -> Self {
        Self {
            title: title.to_string(),
            active: false,
            press: None,
            _phantom: PhantomData,
        }
    }
}

impl<S: MapStoreLike> Component<S> for MapPane<S> {
    fn render(&self, store: &RefCell<S>, area: Rect, buf: &mut Buffer) {
        let scene = store.borrow().map_scene();
        let (map_area, status_area) = split(area);
        let Some(mut scene) = scene else {
            Paragraph::new("Loading map…")
                .dark_gray()
                .centered()
                .render(map_area, buf);
            return;
        };

        scene.view.resize(container(map_area));
        render_world(&scene, map_area, buf);
        render_pins(&scene, map_area, buf);
        if self.active {
            render_crosshair(&scene, map_area, buf);
        }
        render_tooltip(&scene, map_area, buf);
        render_status(&scene, status_area, buf);
    }

    fn on_key(
        &mut self,
        dispatcher: &mut Dispatcher,
        store: &RefCell<S>,
        area: Rect,
        event: KeyEvent,
    ) -> Option<Message> {
        if !self.active {
            return None;
        }

        let (map_area, _) = split(area);
        let shift = event.modifiers.contains(KeyModifiers::SHIFT);
        let delta = match event.code {
            KeyCode::Left => Some((-1, 0)),
            KeyCode::Right => Some((1, 0)),
            KeyCode::Up => Some((0, -1)),
            KeyCode::Down => Some((0, 1)),
            _ => None,
        };

        let action = match (event.code, delta) {
            (_, Some((dc, dr))) if shift => {
                let scene = store.borrow().map_scene()?;
                let mut view = scene.view;
                view.resize(container(map_area));
                let (col, row) = view.project(scene.active?)?;
                Action::DragMarker {
                    col: offset(col, dc, map_area.width),
                    row: offset(row, dr, map_area.height),
                }
            }
            (_, Some((dc, dr))) => Action::PanMap {
                cols: dc * PAN_COLS,
                rows: dr * PAN_ROWS,
            },
            (KeyCode::Char('+' | '='), _) => Action::ZoomIn,
            (KeyCode::Char('-'), _) => Action::ZoomOut,
            (KeyCode::Char('l'), _) => Action::NextLayer,
            (KeyCode::Char(' '), _) => {
                let dragging = store.borrow().map_scene().is_some_and(|s| s.dragging);
                match dragging {
                    true => Action::DropMarker,
                    false => Action::ClickMap {
                        col: map_area.width / 2,
                        row: map_area.height / 2,
                    },
                }
            }
            _ => return None,
        };

        dispatcher.dispatch(action);
        Some(Message::Handled)
    }

    fn on_mouse(
        &mut self,
        dispatcher: &mut Dispatcher,
        store: &RefCell<S>,
        area: Rect,
        event: MouseEvent,
    ) -> Option<Message> {
        let (map_area, _) = split(area);
        let col = event.column.checked_sub(map_area.x)?.min(map_area.width.saturating_sub(1));
        let row = event.row.checked_sub(map_area.y)?.min(map_area.height.saturating_sub(1));

        let action = match event.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                if !map_area.contains(Position::new(event.column, event.row)) {
                    return None;
                }

                let grabbed = store.borrow().map_scene().is_some_and(|scene| {
                    let mut view = scene.view;
                    view.resize(container(map_area));
                    scene
                        .active
                        .and_then(|a| view.project(a))
                        .is_some_and(|(c, r)| c.abs_diff(col) <= 1 && r.abs_diff(row) <= 1)
                });
                self.press = Some(Press {
                    col,
                    row,
                    grabbed,
                    moved: false,
                });
                return Some(Message::Handled);
            }
            MouseEventKind::Drag(MouseButton::Left) => {
                let press = self.press.as_mut()?;
                if (press.col, press.row) == (col, row) {
                    return Some(Message::Handled);
                }

                let action = match press.grabbed {
                    true => Action::DragMarker { col, row },
                    false => Action::PanMap {
                        cols: i32::from(press.col) - i32::from(col),
                        rows: i32::from(press.row) - i32::from(row),
                    },
                };
                press.col = col;
                press.row = row;
                press.moved = true;
                action
            }
            MouseEventKind::Up(MouseButton::Left) => {
                let press = self.press.take()?;
                match (press.grabbed, press.moved) {
                    (true, _) => Action::DropMarker,
                    (false, false) => Action::ClickMap { col, row },
                    (false, true) => return Some(Message::Handled),
                }
            }
            MouseEventKind::ScrollUp => Action::ZoomIn,
            MouseEventKind::ScrollDown => Action::ZoomOut,
            _ => return None,
        };

        dispatcher.dispatch(action);
        Some(Message::Handled)
    }

    fn on_resize(&mut self, dispatcher: &mut Dispatcher, _store: &RefCell<S>, area: Rect) {
        let (map_area, _) = split(area);
        dispatcher.dispatch(Action::MapResized(container(map_area)));
    }

    fn activate(&mut self, _dispatcher: &mut Dispatcher, _store: &RefCell<S>) {
        self.active = true;
    }

    fn deactivate(&mut self, _dispatcher: &mut Dispatcher, _store: &RefCell<S>) {
        self.active = false;
        self.press = None;
    }
}

impl<S: MapStoreLike> FormItem<S> for MapPane<S> {
    fn item_title(&self, _store: &RefCell<S>) -> &str {
        &self.title
    }

    fn item_state(&self, _store: &RefCell<S>) -> FormItemState {
        match self.active {
            true => FormItemState::Active,
            false => FormItemState::Inactive,
        }
    }

    fn item_constraint(&self) -> Constraint {
        Constraint::Min(10)
    }
}

/// The map itself and the status line below it.
fn split(area: Rect) -> (Rect, Rect) {
    let [map, status] =
        Layout::vertical([Constraint::Fill(1), Constraint::Length(1)]).areas(area);
    (map, status)
}

fn container(area: Rect) -> ContainerReady {
    ContainerReady {
        width: area.width,
        height: area.height,
    }
}

fn offset(v: u16, delta: i32, max: u16) -> u16 {
    let v = (i32::from(v) + delta).clamp(0, i32::from(max.saturating_sub(1)));
    u16::try_from(v).unwrap_or_default()
}

fn render_world(scene: &MapScene, area: Rect, buf: &mut Buffer) {
    let bounds = scene.view.bounds();
    let (resolution, color) = match scene.layer.as_ref().map(|l| l.detail) {
        Some(LayerDetail::High) => (MapResolution::High, Color::Green),
        Some(LayerDetail::Low) | None => (MapResolution::Low, Color::Cyan),
    };

    Canvas::default()
        .marker(symbols::Marker::Braille)
        .x_bounds([bounds.west, bounds.east])
        .y_bounds([bounds.south, bounds.north])
        .paint(|ctx| ctx.draw(&Map { resolution, color }))
        .render(area, buf);
}

fn render_pins(scene: &MapScene, area: Rect, buf: &mut Buffer) {
    for pin in &scene.pins {
        let Some((col, row)) = scene.view.project(pin.position) else {
            continue;
        };
        if let Some(cell) = buf.cell_mut((area.x + col, area.y + row)) {
            cell.set_symbol(&scene.style.glyph);
            cell.set_fg(if pin.selected { Color::Yellow } else { Color::Red });
        }
    }

    let Some((col, row)) = scene.active.and_then(|a| scene.view.project(a)) else {
        return;
    };
    if let Some(cell) = buf.cell_mut((area.x + col, area.y + row)) {
        cell.set_symbol(&scene.style.active_glyph);
        let color = if scene.dragging { Color::Yellow } else { Color::LightRed };
        cell.set_style(Style::new().fg(color).bold());
    }
}

fn render_crosshair(scene: &MapScene, area: Rect, buf: &mut Buffer) {
    let (col, row) = (area.width / 2, area.height / 2);
    let active = scene.active.and_then(|a| scene.view.project(a));
    if active == Some((col, row)) {
        return;
    }
    if let Some(cell) = buf.cell_mut((area.x + col, area.y + row)) {
        cell.set_symbol("+");
        cell.set_fg(Color::White);
    }
}

fn render_tooltip(scene: &MapScene, area: Rect, buf: &mut Buffer) {
    if scene.tooltip.is_empty() {
        return;
    }
    let Some((col, row)) = scene.active.and_then(|a| scene.view.project(a)) else {
        return;
    };

    let lines: Vec<&str> = scene.tooltip.lines().collect();
    let width = lines
        .iter()
        .map(|l| unicode_width::UnicodeWidthStr::width(*l))
        .max()
        .unwrap_or_default();
    let width = u16::try_from(width).unwrap_or(u16::MAX).min(area.width);
    let height = u16::try_from(lines.len()).unwrap_or(u16::MAX).min(area.height);

    // below the marker, moved inside the map when it does not fit
    let x = (area.x + col + 2).min((area.x + area.width).saturating_sub(width));
    let y = (area.y + row + 1).min((area.y + area.height).saturating_sub(height));
    let tip = Rect::new(x, y, width, height);

    Clear.render(tip, buf);
    Paragraph::new(scene.tooltip.as_str())
        .black()
        .on_white()
        .render(tip, buf);
}

fn render_status(scene: &MapScene, area: Rect, buf: &mut Buffer) {
    let mut spans = vec![
        Span::from(match &scene.layer {
            Some(layer) => layer.name.clone(),
            None => "No layer".to_string(),
        })
        .bold(),
        Span::from(format!(" · zoom {}", scene.view.zoom())),
    ];
    if let Some(layer) = scene.layer.as_ref().filter(|l| !l.attribution.is_empty()) {
        spans.push(Span::from(format!(" · {}", layer.attribution)).dark_gray());
    }
    Line::from(spans).render(area, buf);
}
