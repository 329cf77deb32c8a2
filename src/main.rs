//! Todolist Frontend Entry Point

mod api;
mod app;
mod components;
mod config;
mod connection;
mod controller;
mod keyboard;
mod models;
mod sanitize;
mod store;

use app::App;
use leptos::prelude::*;

fn main() {
    console_error_panic_hook::set_once();
    mount_to_body(App);
}
