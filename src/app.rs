//! Todolist App
//!
//! Root component: builds the store and controller, provides them via
//! context, binds the global listeners, and kicks off the initial load.

use leptos::prelude::*;
use reactive_stores::Store;

use crate::components::{FlashList, NewTaskForm, TaskList};
use crate::config::ApiConfig;
use crate::controller::TaskController;
use crate::store::AppState;
use crate::{connection, keyboard};

#[component]
pub fn App() -> impl IntoView {
    let store = Store::new(AppState::default());
    let ctrl = TaskController::new(store, ApiConfig::default());

    // Provide context to all children
    provide_context(store);
    provide_context(ctrl);

    connection::bind_connection_status();
    keyboard::bind_global_shortcuts();

    // Fetch the collection on mount
    Effect::new(move |_| {
        ctrl.load();
    });

    view! {
        <FlashList/>
        <div class="todolist">
            <h1>"Todolist"</h1>
            <NewTaskForm/>
            <TaskList/>
        </div>
    }
}
