// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::{cell::RefCell, rc::Rc};

use pinmap_core::flow::{BrowseCommand, BrowseFlow, DeleteConfirmation, LoadOutcome};
use pinmap_core::map::{BaseLayer, ContainerReady, MapView, MarkerStyle, PopupAction};
use pinmap_core::{Alert, Route};
use ratatui::crossterm::event::{KeyCode, KeyEvent, MouseEvent};
use ratatui::prelude::*;
use ratatui::symbols::border;
use ratatui::widgets::{Block, Clear, Paragraph};
use unicode_width::UnicodeWidthStr;

use crate::tui::component::{Component, Message};
use crate::tui::component_dialog::{Dialog, DialogStoreLike, Modal};
use crate::tui::component_page::SinglePage;
use crate::tui::dispatcher::{Action, Dispatcher};
use crate::tui::map_widget::{MapPane, MapScene, MapStoreLike, Pin};

/// Work the browse page asks the application to carry out.
#[derive(Debug)]
pub enum BrowseRequest {
    Reload,
    Delete(DeleteConfirmation),
    Navigate(Route),
}

#[derive(Debug)]
pub struct BrowseStore {
    pub flow: Rc<BrowseFlow>,
    layers: Vec<BaseLayer>,
    style: MarkerStyle,
    pub confirm: Option<DeleteConfirmation>,
    pub alert: Option<Alert>,
    pub request: Option<BrowseRequest>,
    pub status: String,
}

impl BrowseStore {
    /// A store that loads the points as soon as the map is laid out.
    pub fn new(flow: Rc<BrowseFlow>) -> Self {
        let config = flow.config();
        Self {
            layers: config.layers.clone(),
            style: config.marker.clone(),
            flow,
            confirm: None,
            alert: None,
            request: Some(BrowseRequest::Reload),
            status: "Loading…".to_string(),
        }
    }

    pub fn with_alert(mut self, alert: Option<Alert>) -> Self {
        self.alert = alert;
        self
    }

    pub fn loaded(&mut self, outcome: LoadOutcome) {
        if let LoadOutcome::Loaded { markers, skipped } = outcome {
            let points = match markers {
                1 => "1 point".to_string(),
                n => format!("{n} points"),
            };
            self.status = match skipped {
                0 => points,
                s => format!("{points}, {s} skipped (malformed coordinates)"),
            };
        }
    }

    pub fn register_to(that: Rc<RefCell<Self>>, dispatcher: &mut Dispatcher) {
        let callback = Rc::new(RefCell::new(move |action: &Action| {
            let mut that = that.borrow_mut();
            let flow = that.flow.clone();
            let result = match action {
                Action::MapResized(ready) => {
                    flow.on_visible(*ready);
                    Ok(())
                }
                Action::PanMap { cols, rows } => flow.with_view(|v| v.pan(*cols, *rows)),
                Action::ZoomIn => flow.with_view(MapView::zoom_in),
                Action::ZoomOut => flow.with_view(MapView::zoom_out),
                Action::NextLayer => flow.with_view(MapView::next_layer),
                Action::ClickMap { col, row } => flow.select_at(*col, *row).map(|_| ()),
                Action::SelectMarker(step) => select_next(&flow, *step),
                Action::ClosePopup => {
                    flow.close_popup();
                    Ok(())
                }
                Action::Popup(action) => {
                    if let Some(id) = flow.snapshot().and_then(|s| s.popup) {
                        match flow.popup_action(id, *action) {
                            BrowseCommand::Navigate(route) => {
                                that.request = Some(BrowseRequest::Navigate(route));
                            }
                            BrowseCommand::Confirm(confirmation) => {
                                that.confirm = Some(confirmation);
                            }
                        }
                    }
                    Ok(())
                }
                Action::Answer(yes) => {
                    match (that.confirm.take(), *yes) {
                        (Some(confirmation), true) => {
                            that.request = Some(BrowseRequest::Delete(confirmation));
                        }
                        (Some(confirmation), false) => confirmation.cancel(),
                        (None, _) => {}
                    }
                    Ok(())
                }
                Action::Reload => {
                    that.request = Some(BrowseRequest::Reload);
                    Ok(())
                }
                Action::NewPoint => {
                    that.request = Some(BrowseRequest::Navigate(Route::Create));
                    Ok(())
                }
                Action::DismissAlert => {
                    that.alert = None;
                    Ok(())
                }
                _ => Ok(()),
            };

            if let Err(e) = result {
                tracing::debug!(?action, error = %e, "browse action ignored");
            }
        }));
        dispatcher.register(callback);
    }
}

/// Opens the popup of the marker `step` places after the one currently open.
fn select_next(flow: &BrowseFlow, step: isize) -> Result<(), pinmap_core::Error> {
    let Some(snapshot) = flow.snapshot() else {
        return Err(pinmap_core::Error::MapNotReady);
    };
    let ids: Vec<_> = snapshot.markers.iter().map(|m| m.id.clone()).collect();
    if ids.is_empty() {
        return Ok(());
    }

    let len = ids.len() as isize;
    let next = match snapshot.popup.and_then(|id| ids.iter().position(|a| *a == id)) {
        Some(current) => (current as isize + step).rem_euclid(len),
        None if step < 0 => len - 1,
        None => 0,
    };
    let id = &ids[next as usize];
    flow.open_popup(id)?;

    // keep the selected marker in sight
    flow.with_view(|view| {
        if let Some(marker) = snapshot.markers.get(id) {
            if !view.bounds().contains(marker.position) {
                view.set_center(marker.position);
            }
        }
    })
}

impl DialogStoreLike for BrowseStore {
    fn dialog(&self) -> Option<Dialog> {
        match (&self.confirm, &self.alert) {
            (Some(confirmation), _) => Some(Dialog::from(confirmation)),
            (None, Some(alert)) => Some(Dialog::from(alert)),
            (None, None) => None,
        }
    }
}

impl MapStoreLike for BrowseStore {
    fn map_scene(&self) -> Option<MapScene> {
        let snapshot = self.flow.snapshot()?;
        let pins = snapshot
            .markers
            .iter()
            .map(|m| Pin {
                position: m.position,
                selected: snapshot.popup.as_ref() == Some(&m.id),
            })
            .collect();

        Some(MapScene {
            layer: self.layers.get(snapshot.view.layer()).cloned(),
            view: snapshot.view,
            pins,
            style: self.style.clone(),
            active: None,
            dragging: false,
            tooltip: String::new(),
        })
    }
}

pub type BrowsePage = SinglePage<BrowseStore, Modal<BrowseStore, BrowseView>>;

pub fn new_browse_page() -> BrowsePage {
    SinglePage::new("Points", Modal::new(BrowseView::new())).with_instructions(instructions())
}

/// The map of stored points, the popup of the selected one and a status line.
pub struct BrowseView {
    map: MapPane<BrowseStore>,
}

impl BrowseView {
    pub fn new() -> Self {
        Self {
            map: MapPane::new("Points"),
        }
    }

    fn split(area: Rect) -> (Rect, Rect) {
        let [map, status] =
            Layout::vertical([Constraint::Fill(1), Constraint::Length(1)]).areas(area);
        (map, status)
    }
}

impl Component<BrowseStore> for BrowseView {
    fn render(&self, store: &RefCell<BrowseStore>, area: Rect, buf: &mut Buffer) {
        let (map_area, status_area) = Self::split(area);
        self.map.render(store, map_area, buf);

        let store = store.borrow();
        render_popup(&store, map_area, buf);
        Line::from(store.status.as_str())
            .dark_gray()
            .right_aligned()
            .render(status_area, buf);
    }

    fn on_key(
        &mut self,
        dispatcher: &mut Dispatcher,
        store: &RefCell<BrowseStore>,
        area: Rect,
        event: KeyEvent,
    ) -> Option<Message> {
        let (map_area, _) = Self::split(area);
        if let Some(msg) = self.map.on_key(dispatcher, store, map_area, event) {
            return Some(msg);
        }

        let popup_open = store.borrow().flow.snapshot().is_some_and(|s| s.popup.is_some());
        let action = match event.code {
            KeyCode::Char('q') => return Some(Message::Exit),
            KeyCode::Esc if popup_open => Action::ClosePopup,
            KeyCode::Char('a') => Action::NewPoint,
            KeyCode::Char('r') => Action::Reload,
            KeyCode::Tab => Action::SelectMarker(1),
            KeyCode::BackTab => Action::SelectMarker(-1),
            KeyCode::Char('e') | KeyCode::Enter if popup_open => Action::Popup(PopupAction::Edit),
            KeyCode::Char('d') if popup_open => Action::Popup(PopupAction::Delete),
            _ => return None,
        };
        dispatcher.dispatch(action);
        Some(Message::Handled)
    }

    fn on_mouse(
        &mut self,
        dispatcher: &mut Dispatcher,
        store: &RefCell<BrowseStore>,
        area: Rect,
        event: MouseEvent,
    ) -> Option<Message> {
        let (map_area, _) = Self::split(area);
        self.map.on_mouse(dispatcher, store, map_area, event)
    }

    fn on_resize(&mut self, dispatcher: &mut Dispatcher, store: &RefCell<BrowseStore>, area: Rect) {
        let (map_area, _) = Self::split(area);
        self.map.on_resize(dispatcher, store, map_area);
    }

    fn activate(&mut self, dispatcher: &mut Dispatcher, store: &RefCell<BrowseStore>) {
        self.map.activate(dispatcher, store);
    }

    fn deactivate(&mut self, dispatcher: &mut Dispatcher, store: &RefCell<BrowseStore>) {
        self.map.deactivate(dispatcher, store);
    }
}

fn render_popup(store: &BrowseStore, area: Rect, buf: &mut Buffer) {
    let Some(snapshot) = store.flow.snapshot() else {
        return;
    };
    let Some(marker) = snapshot.popup.as_ref().and_then(|id| snapshot.markers.get(id)) else {
        return;
    };

    // the map pane keeps one row for its own status line
    let mut view = snapshot.view.clone();
    let map_rows = area.height.saturating_sub(1);
    view.resize(ContainerReady {
        width: area.width,
        height: map_rows,
    });
    let Some((col, row)) = view.project(marker.position) else {
        return;
    };

    let actions: Vec<Span> = marker
        .popup
        .actions()
        .iter()
        .flat_map(|a| {
            let key = match a {
                PopupAction::Edit => "<e>",
                PopupAction::Delete => "<d>",
            };
            [Span::from(format!("{} ", a.label())), key.blue().bold(), Span::from(" ")]
        })
        .collect();
    let actions = Line::from(actions);

    let content_width = marker.popup.name.width().max(actions.width());
    let width = (u16::try_from(content_width).unwrap_or(u16::MAX) + 2).min(area.width);
    let height = 4.min(map_rows);

    let [dx, dy] = store.style.popup_anchor;
    let x = (i32::from(area.x) + i32::from(col) + i32::from(dx))
        .clamp(i32::from(area.x), i32::from(area.x + area.width - width));
    let y = (i32::from(area.y) + i32::from(row) + i32::from(dy) - i32::from(height) + 1)
        .clamp(i32::from(area.y), i32::from(area.y + map_rows - height));
    let popup = Rect::new(
        u16::try_from(x).unwrap_or(area.x),
        u16::try_from(y).unwrap_or(area.y),
        width,
        height,
    );

    let block = Block::bordered().border_set(border::ROUNDED).yellow();
    Clear.render(popup, buf);
    Paragraph::new(vec![
        Line::from(marker.popup.name.as_str()).bold().white(),
        actions.white(),
    ])
    .block(block)
    .render(popup, buf);
}

fn instructions() -> Line<'static> {
    Line::from(vec![
        " New ".into(),
        "<a>".blue().bold(),
        " Next ".into(),
        "<Tab>".blue().bold(),
        " Reload ".into(),
        "<r>".blue().bold(),
        " Layer ".into(),
        "<l>".blue().bold(),
        " Quit ".into(),
        "<q> ".blue().bold(),
    ])
}
