// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::{cell::RefCell, error::Error, io, rc::Rc};

use pinmap_core::flow::BrowseFlow;
use pinmap_core::{Alert, PinMap, Route, Saved, Session};
use ratatui::DefaultTerminal;
use ratatui::crossterm::event::{
    self, DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind,
};
use ratatui::crossterm::execute;

use crate::config::Config;
use crate::tui::browse::{BrowseRequest, BrowseStore, new_browse_page};
use crate::tui::component::{Component, Message};
use crate::tui::dispatcher::Dispatcher;
use crate::tui::editor::new_editor_page;
use crate::tui::editor_store::{EditorFlow, EditorStore};
use crate::tui::login::{LoginStore, new_login_page};

/// The terminal application, routing between the login, browse and editor pages.
pub struct App<'a> {
    pinmap: &'a PinMap,
    config: &'a Config,
    username: Option<String>,
    session: Option<Session>,
    browse: Option<Rc<BrowseFlow>>,
    draft: Option<(String, String)>,
    standalone: bool,
}

impl<'a> App<'a> {
    pub fn new(pinmap: &'a PinMap, config: &'a Config) -> Self {
        Self {
            pinmap,
            config,
            username: None,
            session: None,
            browse: None,
            draft: None,
            standalone: false,
        }
    }

    /// Skips the login page.
    pub fn with_session(mut self, session: Option<Session>) -> Self {
        self.session = session;
        self
    }

    /// Prefills the username on the login page.
    pub fn with_username(mut self, username: Option<String>) -> Self {
        self.username = username;
        self
    }

    /// Prefills the first create page.
    pub fn with_draft(mut self, name: String, coordinates: String) -> Self {
        self.draft = Some((name, coordinates));
        self
    }

    /// Leaves after the first editor page instead of going back to browsing.
    pub fn standalone(mut self) -> Self {
        self.standalone = true;
        self
    }

    /// Runs until the user quits, returning the point saved by a standalone editor.
    pub async fn run(mut self, start: Route) -> Result<Option<Saved>, Box<dyn Error>> {
        let mut terminal = ratatui::init();
        if self.config.mouse {
            if let Err(e) = execute!(io::stdout(), EnableMouseCapture) {
                ratatui::restore();
                return Err(e.into());
            }
        }

        let result = self.route(&mut terminal, start).await;

        if self.config.mouse {
            if let Err(e) = execute!(io::stdout(), DisableMouseCapture) {
                tracing::warn!(error = %e, "failed to disable mouse capture");
            }
        }
        ratatui::restore();
        result
    }

    async fn route(
        &mut self,
        terminal: &mut DefaultTerminal,
        start: Route,
    ) -> Result<Option<Saved>, Box<dyn Error>> {
        let mut route = start;
        let mut alert = None;
        loop {
            tracing::debug!(%route, "navigating");
            if self.session.is_none() || route == Route::Login {
                match self.login_page(terminal)? {
                    Some(session) => self.session = Some(session),
                    None => return Ok(None),
                }
                if route == Route::Login {
                    route = Route::Browse;
                }
            }
            let session = self.session.clone().ok_or("Not logged in")?;

            route = match route {
                Route::Login | Route::Browse => {
                    match self.browse_page(terminal, &session, alert.take()).await? {
                        Some(next) => next,
                        None => return Ok(None),
                    }
                }
                Route::Create => {
                    let mut flow = self.pinmap.create_flow(&session);
                    if let Some((name, coordinates)) = self.draft.take() {
                        flow.set_name(name);
                        flow.surface_mut().set_coordinates(&coordinates);
                    }
                    match self.editor_page(terminal, EditorFlow::Create(flow)).await? {
                        Some(saved) if self.standalone => return Ok(Some(saved)),
                        Some(saved) => saved.next,
                        None if self.standalone => return Ok(None),
                        None => Route::Browse,
                    }
                }
                Route::Edit(id) => {
                    let mut flow = self.pinmap.edit_flow(&session, id);
                    match flow.load().await {
                        Ok(()) => match self.editor_page(terminal, EditorFlow::Edit(flow)).await? {
                            Some(saved) if self.standalone => return Ok(Some(saved)),
                            Some(saved) => saved.next,
                            None if self.standalone => return Ok(None),
                            None => Route::Browse,
                        },
                        Err(e) if self.standalone => return Err(e.into()),
                        Err(e) => {
                            alert = Some(
                                flow.alert()
                                    .cloned()
                                    .unwrap_or_else(|| Alert::new("Load Failed", e.to_string())),
                            );
                            Route::Browse
                        }
                    }
                }
            };
        }
    }

    fn login_page(&self, terminal: &mut DefaultTerminal) -> Result<Option<Session>, Box<dyn Error>> {
        let store = Rc::new(RefCell::new(LoginStore::new(self.username.clone(), None)));
        let mut dispatcher = Dispatcher::new();
        LoginStore::register_to(store.clone(), &mut dispatcher);
        let mut page = new_login_page();
        page.activate(&mut dispatcher, &store);

        loop {
            run_page(terminal, &mut dispatcher, &store, &mut page)?;

            let (username, password, submit) = {
                let store = store.borrow();
                (store.username.clone(), store.password.clone(), store.submit)
            };
            if !submit {
                return Ok(None);
            }

            match self.pinmap.login(&username, &password) {
                Ok(session) => return Ok(Some(session)),
                Err(e) => {
                    tracing::info!(%username, "login refused");
                    store.borrow_mut().reject(e.to_string());
                }
            }
        }
    }

    async fn browse_page(
        &mut self,
        terminal: &mut DefaultTerminal,
        session: &Session,
        alert: Option<Alert>,
    ) -> Result<Option<Route>, Box<dyn Error>> {
        // one map per session, entering the page again only reloads the points
        let pinmap = self.pinmap;
        let flow = self
            .browse
            .get_or_insert_with(|| Rc::new(pinmap.browse_flow(session)))
            .clone();

        let store = Rc::new(RefCell::new(BrowseStore::new(flow.clone()).with_alert(alert)));
        let mut dispatcher = Dispatcher::new();
        BrowseStore::register_to(store.clone(), &mut dispatcher);
        let mut page = new_browse_page();
        page.activate(&mut dispatcher, &store);

        let next = loop {
            resize(terminal, &mut dispatcher, &store, &mut page);

            let request = store.borrow_mut().request.take();
            match request {
                Some(BrowseRequest::Reload) => {
                    match flow.load_points().await {
                        Ok(outcome) => store.borrow_mut().loaded(outcome),
                        Err(e) => {
                            tracing::warn!(error = %e, "failed to load points");
                            store.borrow_mut().alert = Some(Alert::new("Load Failed", e.to_string()));
                        }
                    }
                    continue;
                }
                Some(BrowseRequest::Delete(confirmation)) => {
                    match confirmation.confirm(&flow).await {
                        Ok(()) => store.borrow_mut().request = Some(BrowseRequest::Reload),
                        Err(e) => {
                            store.borrow_mut().alert =
                                Some(Alert::new("Delete Failed", e.to_string()));
                        }
                    }
                    continue;
                }
                Some(BrowseRequest::Navigate(route)) => break Some(route),
                None => {}
            }

            if let Some(Message::Exit) = step(terminal, &mut dispatcher, &store, &mut page)? {
                break None;
            }
        };

        page.deactivate(&mut dispatcher, &store);
        Ok(next)
    }

    async fn editor_page(
        &self,
        terminal: &mut DefaultTerminal,
        flow: EditorFlow,
    ) -> Result<Option<Saved>, Box<dyn Error>> {
        let mut page = new_editor_page(flow.title());
        let mut owned = EditorStore::new(flow, self.pinmap.map_config());

        loop {
            let store = Rc::new(RefCell::new(owned));
            {
                let mut dispatcher = Dispatcher::new();
                EditorStore::register_to(store.clone(), &mut dispatcher);
                page.activate(&mut dispatcher, &store);
                let result = run_page(terminal, &mut dispatcher, &store, &mut page);
                page.deactivate(&mut dispatcher, &store);
                result?;
            } // release dispatcher here to own the store again

            owned = Rc::try_unwrap(store)
                .map_err(|_| "Store still has references")?
                .into_inner();

            if !owned.submit {
                match owned.rejected {
                    Some(_) => continue, // show why on the next round
                    None => return Ok(None),
                }
            }

            owned.submit = false;
            match owned.flow.submit().await {
                Ok(saved) => return Ok(Some(saved)),
                Err(pinmap_core::Error::Validation(e)) => owned.rejected = Some(e),
                Err(pinmap_core::Error::Store(e)) => {
                    tracing::debug!(error = %e, "save failed, the editor shows the alert");
                }
                Err(e) => return Err(e.into()),
            }
        }
    }
}

/// Draws and handles events until the page exits.
fn run_page<S, C: Component<S>>(
    terminal: &mut DefaultTerminal,
    dispatcher: &mut Dispatcher,
    store: &RefCell<S>,
    page: &mut C,
) -> io::Result<()> {
    loop {
        resize(terminal, dispatcher, store, page);
        if let Some(Message::Exit) = step(terminal, dispatcher, store, page)? {
            return Ok(());
        }
    }
}

fn resize<S, C: Component<S>>(
    terminal: &mut DefaultTerminal,
    dispatcher: &mut Dispatcher,
    store: &RefCell<S>,
    page: &mut C,
) {
    let area = terminal.get_frame().area();
    page.on_resize(dispatcher, store, area);
}

/// Draws one frame and handles the next event.
fn step<S, C: Component<S>>(
    terminal: &mut DefaultTerminal,
    dispatcher: &mut Dispatcher,
    store: &RefCell<S>,
    page: &mut C,
) -> io::Result<Option<Message>> {
    terminal.draw(|frame| {
        let area = frame.area();
        page.render(store, area, frame.buffer_mut());
        if let Some(position) = page.get_cursor_position(store, area) {
            frame.set_cursor_position(position);
        }
    })?;

    let area = terminal.get_frame().area();
    let msg = match event::read()? {
        Event::Key(key) if key.kind == KeyEventKind::Press => page.on_key(dispatcher, store, area, key),
        Event::Mouse(mouse) => page.on_mouse(dispatcher, store, area, mouse),
        _ => None, // resized on the next round
    };
    Ok(msg)
}
