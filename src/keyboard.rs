//! Keyboard Navigation Layer
//!
//! State-free, DOM-position-based shortcuts over the task rows:
//! - ArrowUp/ArrowDown move focus between rows with wraparound
//! - Super+Enter toggles the focused row's checkbox (reuses the edit path)
//! - Super+Backspace or plain Delete clicks the row's delete button
//! - `n` focuses the new-task field unless focus is already in a text input
//!
//! "Super" is Cmd on macOS and Ctrl elsewhere, decided by user-agent.

use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlElement, KeyboardEvent};

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Arrow {
    Up,
    Down,
}

/// Next focus position with wraparound. `None` focus jumps to the first
/// row (Down) or last row (Up); an empty list has nothing to focus.
pub fn wrap_index(current: Option<usize>, len: usize, arrow: Arrow) -> Option<usize> {
    if len == 0 {
        return None;
    }
    Some(match (current, arrow) {
        (None, Arrow::Down) => 0,
        (None, Arrow::Up) => len - 1,
        (Some(i), Arrow::Down) => (i + 1) % len,
        (Some(i), Arrow::Up) => (i + len - 1) % len,
    })
}

pub fn is_mac(user_agent: &str) -> bool {
    user_agent.contains("Mac OS X")
}

/// Platform-conventional accelerator: Cmd on macOS, Ctrl otherwise.
pub fn super_pressed(mac: bool, meta: bool, ctrl: bool) -> bool {
    if mac {
        meta
    } else {
        ctrl
    }
}

/// Install the global keydown listener once.
pub fn bind_global_shortcuts() {
    let on_keydown = Closure::<dyn FnMut(KeyboardEvent)>::new(move |ev: KeyboardEvent| {
        handle_keydown(&ev);
    });
    if let Some(doc) = web_sys::window().and_then(|w| w.document()) {
        let _ = doc.add_event_listener_with_callback("keydown", on_keydown.as_ref().unchecked_ref());
    }
    on_keydown.forget();
}

fn handle_keydown(ev: &KeyboardEvent) {
    let Some(doc) = web_sys::window().and_then(|w| w.document()) else {
        return;
    };
    let target = ev
        .target()
        .and_then(|t| t.dyn_into::<Element>().ok());
    let current_row = target
        .as_ref()
        .and_then(|el| el.closest("li.task").ok().flatten());

    match ev.key().as_str() {
        "ArrowDown" => move_focus(&doc, Arrow::Down, current_row.as_ref()),
        "ArrowUp" => move_focus(&doc, Arrow::Up, current_row.as_ref()),
        "Enter" if is_super_key(ev) => {
            if let Some(row) = &current_row {
                click_in(row, "input[type='checkbox']");
            }
        }
        "Backspace" if is_super_key(ev) => {
            if let Some(row) = &current_row {
                click_in(row, ".task__delete-button");
            }
        }
        "Delete" => {
            if let Some(row) = &current_row {
                click_in(row, ".task__delete-button");
            }
        }
        key if key.eq_ignore_ascii_case("n") => {
            let in_text_field = target
                .as_ref()
                .and_then(|el| el.matches("input[type='text']").ok())
                .unwrap_or(false);
            if !in_text_field {
                ev.prevent_default();
                if let Some(field) = doc
                    .get_element_by_id("new-task")
                    .and_then(|el| el.dyn_into::<HtmlElement>().ok())
                {
                    let _ = field.focus();
                }
            }
        }
        _ => {}
    }
}

fn move_focus(doc: &Document, arrow: Arrow, current_row: Option<&Element>) {
    let Ok(rows) = doc.query_selector_all("li.task") else {
        return;
    };
    let len = rows.length() as usize;
    let current = current_row.and_then(|row| {
        (0..len).find(|&i| {
            rows.item(i as u32)
                .is_some_and(|node| row.is_same_node(Some(&node)))
        })
    });
    if let Some(next) = wrap_index(current, len, arrow) {
        if let Some(el) = rows
            .item(next as u32)
            .and_then(|node| node.dyn_into::<HtmlElement>().ok())
        {
            let _ = el.focus();
        }
    }
}

/// Synthetically activate a control inside the row, reusing its event path.
fn click_in(row: &Element, selector: &str) {
    if let Ok(Some(el)) = row.query_selector(selector) {
        if let Ok(el) = el.dyn_into::<HtmlElement>() {
            el.click();
        }
    }
}

fn is_super_key(ev: &KeyboardEvent) -> bool {
    let mac = web_sys::window()
        .and_then(|w| w.navigator().user_agent().ok())
        .map(|ua| is_mac(&ua))
        .unwrap_or(false);
    super_pressed(mac, ev.meta_key(), ev.ctrl_key())
}
