// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::{cell::RefCell, rc::Rc};

use pinmap_core::Alert;

use crate::tui::component_dialog::{Dialog, DialogStoreLike, Modal};
use crate::tui::component_form::{Access, Form, Input};
use crate::tui::component_page::SinglePage;
use crate::tui::dispatcher::{Action, Dispatcher};

#[derive(Debug, Default)]
pub struct LoginStore {
    pub username: String,
    pub password: String,
    pub alert: Option<Alert>,

    /// Whether the user submitted the form
    pub submit: bool,
}

impl LoginStore {
    pub fn new(username: Option<String>, password: Option<String>) -> Self {
        Self {
            username: username.unwrap_or_default(),
            password: password.unwrap_or_default(),
            ..Default::default()
        }
    }

    /// Shows why the last attempt failed and waits for the next one.
    pub fn reject(&mut self, message: impl Into<String>) {
        self.alert = Some(Alert::new("Login Failed", message));
        self.password.clear();
        self.submit = false;
    }

    pub fn register_to(that: Rc<RefCell<Self>>, dispatcher: &mut Dispatcher) {
        let callback = Rc::new(RefCell::new(move |action: &Action| match action {
            Action::UpdateUsername(v) => that.borrow_mut().username = v.clone(),
            Action::UpdatePassword(v) => that.borrow_mut().password = v.clone(),
            Action::DismissAlert => that.borrow_mut().alert = None,
            Action::SubmitChanges => that.borrow_mut().submit = true,
            _ => {}
        }));
        dispatcher.register(callback);
    }
}

impl DialogStoreLike for LoginStore {
    fn dialog(&self) -> Option<Dialog> {
        self.alert.as_ref().map(Dialog::from)
    }
}

pub type LoginPage = SinglePage<LoginStore, Modal<LoginStore, Form<LoginStore>>>;

pub fn new_login_page() -> LoginPage {
    SinglePage::new(
        "Login",
        Modal::new(Form::new(vec![
            Box::new(Input::<LoginStore, UsernameAccess>::new("Username")),
            Box::new(Input::<LoginStore, PasswordAccess>::masked("Password")),
        ])),
    )
}

struct UsernameAccess;

impl Access<LoginStore, String> for UsernameAccess {
    fn get(store: &RefCell<LoginStore>) -> String {
        store.borrow().username.clone()
    }

    fn set(dispatcher: &mut Dispatcher, value: String) -> bool {
        dispatcher.dispatch(Action::UpdateUsername(value));
        true
    }
}

struct PasswordAccess;

impl Access<LoginStore, String> for PasswordAccess {
    fn get(store: &RefCell<LoginStore>) -> String {
        store.borrow().password.clone()
    }

    fn set(dispatcher: &mut Dispatcher, value: String) -> bool {
        dispatcher.dispatch(Action::UpdatePassword(value));
        true
    }
}
