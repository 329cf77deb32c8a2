//! Task Row Component
//!
//! One `<li>` per task: spinner while the create is in flight, then a
//! checkbox (its element id is the task id), an editable name field, and a
//! delete button. Visibility and values all come from the row model; a
//! rollback epoch bump re-applies the known-good values after a failed
//! edit.

use leptos::html;
use leptos::prelude::*;

use crate::controller::use_task_controller;
use crate::store::{use_app_store, AppStateStoreFields, RowStatus};

#[component]
pub fn TaskRow(id: String) -> impl IntoView {
    let store = use_app_store();
    let ctrl = use_task_controller();
    let tid = StoredValue::new(id);

    let row = Memo::new(move |_| {
        tid.with_value(|id| {
            store
                .rows()
                .read()
                .iter()
                .find(|row| &row.task.id == id)
                .cloned()
        })
    });

    let name_ref: NodeRef<html::Input> = NodeRef::new();
    let checkbox_ref: NodeRef<html::Input> = NodeRef::new();

    // Checkbox and name field feed the same debounced edit, always carrying
    // both current control values
    let on_edit = move |_: web_sys::Event| {
        let Some(name_input) = name_ref.get_untracked() else {
            return;
        };
        let done = checkbox_ref
            .get_untracked()
            .map(|cb| cb.checked())
            .unwrap_or(false);
        ctrl.schedule_edit(tid.get_value(), name_input.value(), done);
    };

    let is_creating = move || row.get().is_some_and(|r| r.status == RowStatus::Creating);

    view! {
        <li
            class="task"
            tabindex="-1"
            hidden=move || row.get().is_some_and(|r| !r.is_visible())
        >
            <Show when=is_creating>
                <span class="task__spinner" aria-hidden="true"></span>
            </Show>
            <Show when=move || !is_creating()>
                <input
                    type="checkbox"
                    id=move || tid.get_value()
                    prop:checked=move || row.get().is_some_and(|r| r.task.done)
                    node_ref=checkbox_ref
                    on:change=on_edit
                />
                <label for=move || tid.get_value()>
                    <svg viewBox="0 0 20 15">
                        <path d="M0 8l2-2 5 5L18 0l2 2L7 15z" fill-rule="nonzero"/>
                    </svg>
                </label>
            </Show>
            <input
                type="text"
                class="task__name"
                prop:value=move || row.get().map(|r| r.task.name).unwrap_or_default()
                node_ref=name_ref
                on:input=on_edit
            />
            <button
                type="button"
                class="task__delete-button"
                on:click=move |_| ctrl.delete(tid.get_value())
            >
                <svg viewBox="0 0 20 20">
                    <path d="M10 8.586L2.929 1.515 1.515 2.929 8.586 10l-7.071 7.071 1.414 1.414L10 11.414l7.071 7.071 1.414-1.414L11.414 10l7.071-7.071-1.414-1.414L10 8.586z"/>
                </svg>
            </button>
        </li>
    }
}
