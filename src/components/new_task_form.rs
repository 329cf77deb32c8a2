//! New Task Form Component
//!
//! Entry field for creating tasks. Empty or whitespace-only input is
//! silently ignored; an accepted create clears the field and returns focus
//! to it.

use leptos::html;
use leptos::prelude::*;
use wasm_bindgen::JsCast;

use crate::controller::use_task_controller;

#[component]
pub fn NewTaskForm() -> impl IntoView {
    let ctrl = use_task_controller();

    let (new_name, set_new_name) = signal(String::new());
    let input_ref: NodeRef<html::Input> = NodeRef::new();

    let create_task = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        if ctrl.create(&new_name.get()) {
            set_new_name.set(String::new());
            if let Some(input) = input_ref.get_untracked() {
                let _ = input.focus();
            }
        }
    };

    view! {
        <form class="todolist__form" on:submit=create_task>
            <input
                type="text"
                id="new-task"
                placeholder="Add a task..."
                autocomplete="off"
                prop:value=move || new_name.get()
                node_ref=input_ref
                on:input=move |ev| {
                    let target = ev.target().unwrap();
                    let input = target.dyn_ref::<web_sys::HtmlInputElement>().unwrap();
                    set_new_name.set(input.value());
                }
            />
            <button type="submit">"Add task"</button>
        </form>
    }
}
