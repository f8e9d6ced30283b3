// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::cell::RefCell;
use std::marker::PhantomData;

use pinmap_core::Alert;
use pinmap_core::flow::DeleteConfirmation;
use ratatui::crossterm::event::{KeyCode, KeyEvent, MouseEvent};
use ratatui::layout::Flex;
use ratatui::prelude::*;
use ratatui::symbols::border;
use ratatui::widgets::{Block, Clear, Paragraph, Wrap};

use crate::tui::component::{Component, Message};
use crate::tui::dispatcher::{Action, Dispatcher};

/// A store that may have a dialog open on top of its page.
pub trait DialogStoreLike {
    fn dialog(&self) -> Option<Dialog>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dialog {
    pub header: String,
    pub message: String,
    pub kind: DialogKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogKind {
    /// Acknowledged with Enter or Esc.
    Alert,
    /// Answered with yes or no.
    Confirm,
}

impl From<&Alert> for Dialog {
    fn from(alert: &Alert) -> Self {
        Self {
            header: alert.header.clone(),
            message: alert.message.clone(),
            kind: DialogKind::Alert,
        }
    }
}

impl From<&DeleteConfirmation> for Dialog {
    fn from(confirmation: &DeleteConfirmation) -> Self {
        Self {
            header: confirmation.header().to_string(),
            message: confirmation.message().to_string(),
            kind: DialogKind::Confirm,
        }
    }
}

/// Wraps a component, drawing the open dialog over it and taking every key while it is
/// open.
pub struct Modal<S: DialogStoreLike, C: Component<S>> {
    inner: C,
    _phantom: PhantomData<S>,
}

impl<S: DialogStoreLike, C: Component<S>> Modal<S, C> {
    pub fn new(inner: C) -> Self {
        Self {
            inner,
            _phantom: PhantomData,
        }
    }
}

impl<S: DialogStoreLike, C: Component<S>> Component<S> for Modal<S, C> {
    fn render(&self, store: &RefCell<S>, area: Rect, buf: &mut Buffer) {
        self.inner.render(store, area, buf);

        let dialog = store.borrow().dialog();
        if let Some(dialog) = dialog {
            render_dialog(&dialog, area, buf);
        }
    }

    fn get_cursor_position(&self, store: &RefCell<S>, area: Rect) -> Option<(u16, u16)> {
        let open = store.borrow().dialog().is_some();
        match open {
            true => None,
            false => self.inner.get_cursor_position(store, area),
        }
    }

    fn on_key(
        &mut self,
        dispatcher: &mut Dispatcher,
        store: &RefCell<S>,
        area: Rect,
        event: KeyEvent,
    ) -> Option<Message> {
        let dialog = store.borrow().dialog();
        let Some(dialog) = dialog else {
            return self.inner.on_key(dispatcher, store, area, event);
        };

        match (dialog.kind, event.code) {
            (DialogKind::Alert, KeyCode::Enter | KeyCode::Esc) => {
                dispatcher.dispatch(Action::DismissAlert);
            }
            (DialogKind::Confirm, KeyCode::Char('y' | 'Y') | KeyCode::Enter) => {
                dispatcher.dispatch(Action::Answer(true));
            }
            (DialogKind::Confirm, KeyCode::Char('n' | 'N') | KeyCode::Esc) => {
                dispatcher.dispatch(Action::Answer(false));
            }
            _ => {}
        }
        Some(Message::Handled)
    }

    fn on_mouse(
        &mut self,
        dispatcher: &mut Dispatcher,
        store: &RefCell<S>,
        area: Rect,
        event: MouseEvent,
    ) -> Option<Message> {
        let open = store.borrow().dialog().is_some();
        match open {
            true => Some(Message::Handled),
            false => self.inner.on_mouse(dispatcher, store, area, event),
        }
    }

    fn on_resize(&mut self, dispatcher: &mut Dispatcher, store: &RefCell<S>, area: Rect) {
        self.inner.on_resize(dispatcher, store, area);
    }

    fn activate(&mut self, dispatcher: &mut Dispatcher, store: &RefCell<S>) {
        self.inner.activate(dispatcher, store);
    }

    fn deactivate(&mut self, dispatcher: &mut Dispatcher, store: &RefCell<S>) {
        self.inner.deactivate(dispatcher, store);
    }
}

fn render_dialog(dialog: &Dialog, area: Rect, buf: &mut Buffer) {
    let (color, keys) = match dialog.kind {
        DialogKind::Alert => (Color::Red, Line::from(vec![" OK ".into(), "<Enter> ".blue().bold()])),
        DialogKind::Confirm => (
            Color::Yellow,
            Line::from(vec![
                " Yes ".into(),
                "<y>".blue().bold(),
                " No ".into(),
                "<n> ".blue().bold(),
            ]),
        ),
    };

    let width = area.width.saturating_sub(4).min(50);
    let height = area.height.min(7);
    let popup = centered(area, width, height);

    let block = Block::bordered()
        .border_set(border::ROUNDED)
        .fg(color)
        .title(Line::from(format!(" {} ", dialog.header).bold()).centered())
        .title_bottom(keys.centered());

    Clear.render(popup, buf);
    Paragraph::new(dialog.message.as_str())
        .white()
        .wrap(Wrap { trim: true })
        .centered()
        .block(block)
        .render(popup, buf);
}

fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let [area] = Layout::horizontal([Constraint::Length(width)])
        .flex(Flex::Center)
        .areas(area);
    let [area] = Layout::vertical([Constraint::Length(height)])
        .flex(Flex::Center)
        .areas(area);
    area
}
