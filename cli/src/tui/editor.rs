// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::cell::RefCell;

use ratatui::crossterm::event::{KeyEvent, MouseEvent};
use ratatui::prelude::*;

use crate::tui::component::{Component, Message};
use crate::tui::component_dialog::Modal;
use crate::tui::component_form::{Access, Form, Input};
use crate::tui::component_page::SinglePage;
use crate::tui::dispatcher::{Action, Dispatcher};
use crate::tui::editor_store::EditorStore;
use crate::tui::map_widget::MapPane;

pub type EditorPage = SinglePage<EditorStore, Modal<EditorStore, EditorForm>>;

pub fn new_editor_page(title: impl ToString) -> EditorPage {
    SinglePage::new(title, Modal::new(EditorForm::new()))
}

/// Name, coordinates and the map, with a line telling whether the point can be saved.
pub struct EditorForm {
    form: Form<EditorStore>,
}

impl EditorForm {
    pub fn new() -> Self {
        Self {
            form: Form::new(vec![
                Box::new(Input::<EditorStore, NameAccess>::new("Name")),
                Box::new(Input::<EditorStore, CoordinatesAccess>::new("Coordinates")),
                Box::new(MapPane::new("Map")),
            ]),
        }
    }

    fn split(area: Rect) -> (Rect, Rect) {
        let [form, hint] =
            Layout::vertical([Constraint::Fill(1), Constraint::Length(1)]).areas(area);
        (form, hint)
    }
}

impl Component<EditorStore> for EditorForm {
    fn render(&self, store: &RefCell<EditorStore>, area: Rect, buf: &mut Buffer) {
        let (form_area, hint_area) = Self::split(area);
        self.form.render(store, form_area, buf);

        let hint = match store.borrow().flow.validation() {
            Ok(_) => Line::from("Press Enter to save").green(),
            Err(e) => Line::from(e.to_string()).yellow(),
        };
        hint.centered().render(hint_area, buf);
    }

    fn get_cursor_position(&self, store: &RefCell<EditorStore>, area: Rect) -> Option<(u16, u16)> {
        let (form_area, _) = Self::split(area);
        self.form.get_cursor_position(store, form_area)
    }

    fn on_key(
        &mut self,
        dispatcher: &mut Dispatcher,
        store: &RefCell<EditorStore>,
        area: Rect,
        event: KeyEvent,
    ) -> Option<Message> {
        let (form_area, _) = Self::split(area);
        self.form.on_key(dispatcher, store, form_area, event)
    }

    fn on_mouse(
        &mut self,
        dispatcher: &mut Dispatcher,
        store: &RefCell<EditorStore>,
        area: Rect,
        event: MouseEvent,
    ) -> Option<Message> {
        let (form_area, _) = Self::split(area);
        self.form.on_mouse(dispatcher, store, form_area, event)
    }

    fn on_resize(&mut self, dispatcher: &mut Dispatcher, store: &RefCell<EditorStore>, area: Rect) {
        let (form_area, _) = Self::split(area);
        self.form.on_resize(dispatcher, store, form_area);
    }

    fn activate(&mut self, dispatcher: &mut Dispatcher, store: &RefCell<EditorStore>) {
        self.form.activate(dispatcher, store);
    }

    fn deactivate(&mut self, dispatcher: &mut Dispatcher, store: &RefCell<EditorStore>) {
        self.form.deactivate(dispatcher, store);
    }
}

struct NameAccess;

impl Access<EditorStore, String> for NameAccess {
    fn get(store: &RefCell<EditorStore>) -> String {
        store.borrow().flow.name().to_string()
    }

    fn set(dispatcher: &mut Dispatcher, value: String) -> bool {
        dispatcher.dispatch(Action::UpdateName(value));
        true
    }
}

struct CoordinatesAccess;

impl Access<EditorStore, String> for CoordinatesAccess {
    fn get(store: &RefCell<EditorStore>) -> String {
        store.borrow().flow.coordinates().to_string()
    }

    fn set(dispatcher: &mut Dispatcher, value: String) -> bool {
        dispatcher.dispatch(Action::UpdateCoordinates(value));
        true
    }
}
