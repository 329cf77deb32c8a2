//! Task List Component
//!
//! The task container plus the empty-state placeholder. Both are derived
//! from the row model: the placeholder shows exactly when no row is
//! visible, re-evaluated automatically after create failures and delete
//! starts/failures because those all move row status.

use leptos::prelude::*;

use crate::components::TaskRow;
use crate::store::{empty_state, use_app_store, AppStateStoreFields};

#[component]
pub fn TaskList() -> impl IntoView {
    let store = use_app_store();
    let empty = Memo::new(move |_| empty_state(&store.rows().read()));
    // The placeholder only appears once the initial load has succeeded
    let show_empty = move || store.loaded().get() && empty.get();

    view! {
        <ul class="todolist__tasks" class=("is-empty", move || empty.get())>
            <For
                each=move || store.rows().get()
                key=|row| row.task.id.clone()
                children=move |row| view! { <TaskRow id=row.task.id/> }
            />
        </ul>
        <div class="todolist__empty-state" hidden=move || !show_empty()>
            "Your todo list is empty. Hurray! 🎉"
        </div>
    }
}
