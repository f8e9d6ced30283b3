// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

mod app;
mod browse;
mod component;
mod component_dialog;
mod component_form;
mod component_page;
mod dispatcher;
mod editor;
mod editor_store;
mod login;
mod map_widget;

pub use app::App;
