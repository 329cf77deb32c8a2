//! List Controller
//!
//! Owns the mutation workflow: optimistic insert/hide, debounced edits,
//! rollback on failure, and per-task request tokens so stale completions
//! of superseded requests are discarded instead of clobbering the model.

use std::collections::HashMap;

use gloo_timers::callback::Timeout;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api;
use crate::config::ApiConfig;
use crate::sanitize::sanitize;
use crate::store::{
    confirm_row, find_row, remove_row, rollback_row, set_row_status, AppStateStoreFields,
    AppStore, Flash, RowStatus, TaskRow,
};

/// Trailing debounce window for edit bursts.
const EDIT_DEBOUNCE_MS: u32 = 250;

/// Latest control values captured from a row, waiting on its debounce
/// timer. A burst of edits for one task keeps replacing this, so the
/// single request that fires carries the final values.
#[derive(Debug, Clone, PartialEq)]
pub struct EditPayload {
    pub name: String,
    pub done: bool,
}

/// Cheap `Copy` handle over the store plus the controller's bookkeeping.
#[derive(Clone, Copy)]
pub struct TaskController {
    store: AppStore,
    config: StoredValue<ApiConfig>,
    /// Request generation per task id. A mutation captures the generation
    /// it was issued under; completions from older generations are ignored.
    tokens: StoredValue<HashMap<String, u64>>,
    /// Latest pending edit per task id, consumed when its timer fires.
    pending_edits: StoredValue<HashMap<String, EditPayload>>,
    /// Debounce handle per task id. Replacing a handle drops it, which
    /// cancels the superseded timer.
    edit_timers: StoredValue<HashMap<String, Timeout>, LocalStorage>,
}

/// Get the controller from context
pub fn use_task_controller() -> TaskController {
    expect_context::<TaskController>()
}

impl TaskController {
    pub fn new(store: AppStore, config: ApiConfig) -> Self {
        Self {
            store,
            config: StoredValue::new(config),
            tokens: StoredValue::new(HashMap::new()),
            pending_edits: StoredValue::new(HashMap::new()),
            edit_timers: StoredValue::new_local(HashMap::new()),
        }
    }

    /// Fetch the full collection once at startup. On failure the list stays
    /// empty with no retry; the error surfaces as a banner.
    pub fn load(self) {
        let config = self.config.get_value();
        spawn_local(async move {
            match api::get_tasks(&config).await {
                Ok(tasks) => {
                    web_sys::console::log_1(
                        &format!("[TASKS] Loaded {} tasks", tasks.len()).into(),
                    );
                    self.store
                        .rows()
                        .set(tasks.into_iter().map(TaskRow::settled).collect());
                    self.store.loaded().set(true);
                }
                Err(err) => self.flash(err.message),
            }
        });
    }

    /// Create a task from raw input. Empty input (after sanitizing) is a
    /// silent no-op; returns whether the create was accepted so the form
    /// knows to clear itself.
    pub fn create(self, raw: &str) -> bool {
        let name = sanitize(raw);
        if name.is_empty() {
            return false;
        }

        // Optimistic insert under a temporary, visual-only id
        let temp = temp_id();
        self.store
            .rows()
            .write()
            .push(TaskRow::creating(temp.clone(), name.clone()));

        let config = self.config.get_value();
        spawn_local(async move {
            match api::create_task(&config, &name).await {
                Ok(task) => {
                    confirm_row(&mut self.store.rows().write(), &temp, task);
                }
                Err(err) => {
                    remove_row(&mut self.store.rows().write(), &temp);
                    self.flash(err.message);
                }
            }
        });
        true
    }

    /// Debounced edit: a burst of calls for one task within the window
    /// collapses to a single request carrying the latest values.
    pub fn schedule_edit(self, id: String, name: String, done: bool) {
        let editable = self
            .store
            .rows()
            .read_untracked()
            .iter()
            .any(|row| row.task.id == id && row.status == RowStatus::Idle);
        if !editable {
            return;
        }

        self.pending_edits.update_value(|pending| {
            replace_pending(pending, &id, EditPayload { name, done });
        });

        let key = id.clone();
        let timeout = Timeout::new(EDIT_DEBOUNCE_MS, move || {
            self.edit_timers.update_value(|timers| {
                timers.remove(&id);
            });
            let payload = self
                .pending_edits
                .try_update_value(|pending| take_pending(pending, &id))
                .flatten();
            if let Some(payload) = payload {
                self.submit_edit(id, payload.name, payload.done);
            }
        });
        self.edit_timers.update_value(|timers| {
            timers.insert(key, timeout);
        });
    }

    fn submit_edit(self, id: String, name: String, done: bool) {
        let name = sanitize(&name);
        let token = self.bump_token(&id);
        let config = self.config.get_value();
        spawn_local(async move {
            match api::update_task(&config, &id, &name, done).await {
                Ok(task) => {
                    // Server is authoritative; it may have normalized fields
                    if self.token_current(&id, token) {
                        confirm_row(&mut self.store.rows().write(), &id, task);
                    }
                }
                Err(err) => {
                    if self.token_current(&id, token) {
                        rollback_row(&mut self.store.rows().write(), &id);
                        self.flash(err.message);
                    } else {
                        web_sys::console::log_1(
                            &format!("[TASKS] Dropping stale edit result for {}", id).into(),
                        );
                    }
                }
            }
        });
    }

    /// Optimistically hide the row, then delete it on the server.
    pub fn delete(self, id: String) {
        let deletable = matches!(
            find_row(&self.store.rows().read_untracked(), &id).map(|row| row.status),
            Some(RowStatus::Idle)
        );
        if !deletable {
            return;
        }

        // A delete supersedes any pending or in-flight edit for the row
        self.pending_edits.update_value(|pending| {
            pending.remove(&id);
        });
        self.edit_timers.update_value(|timers| {
            timers.remove(&id);
        });
        let token = self.bump_token(&id);
        set_row_status(&mut self.store.rows().write(), &id, RowStatus::PendingDelete);

        let config = self.config.get_value();
        spawn_local(async move {
            match api::delete_task(&config, &id).await {
                Ok(()) => {
                    if self.token_current(&id, token) {
                        remove_row(&mut self.store.rows().write(), &id);
                        self.tokens.update_value(|tokens| {
                            tokens.remove(&id);
                        });
                    }
                }
                Err(err) => {
                    if self.token_current(&id, token) {
                        set_row_status(&mut self.store.rows().write(), &id, RowStatus::Idle);
                        self.flash(err.message);
                    }
                }
            }
        });
    }

    // ========================
    // Flashes
    // ========================

    pub fn flash(self, message: impl Into<String>) {
        let id = self.store.next_flash_id().get_untracked();
        self.store.next_flash_id().set(id.wrapping_add(1));
        self.store.flashes().write().push(Flash {
            id,
            message: message.into(),
        });
    }

    pub fn dismiss_flash(self, id: u32) {
        self.store.flashes().write().retain(|flash| flash.id != id);
    }

    // ========================
    // Tokens
    // ========================

    fn bump_token(&self, id: &str) -> u64 {
        self.tokens
            .try_update_value(|tokens| bump_token(tokens, id))
            .unwrap_or_default()
    }

    fn token_current(&self, id: &str, token: u64) -> bool {
        self.tokens
            .with_value(|tokens| token_is_current(tokens, id, token))
    }
}

/// Record the latest edit for a task, superseding any earlier one still
/// waiting on its timer.
fn replace_pending(pending: &mut HashMap<String, EditPayload>, id: &str, payload: EditPayload) {
    pending.insert(id.to_string(), payload);
}

/// Consume the pending edit when its timer fires; each payload is
/// submitted at most once.
fn take_pending(pending: &mut HashMap<String, EditPayload>, id: &str) -> Option<EditPayload> {
    pending.remove(id)
}

fn bump_token(tokens: &mut HashMap<String, u64>, id: &str) -> u64 {
    let entry = tokens.entry(id.to_string()).or_insert(0);
    *entry += 1;
    *entry
}

fn token_is_current(tokens: &HashMap<String, u64>, id: &str, token: u64) -> bool {
    tokens.get(id).copied() == Some(token)
}

/// Random id for a row that only exists until the server responds,
/// namespaced so it can never collide with a server-assigned id.
fn temp_id() -> String {
    const ALPHABET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";
    let mut id = String::from("tmp-");
    for _ in 0..10 {
        let idx = (js_sys::Math::random() * ALPHABET.len() as f64) as usize % ALPHABET.len();
        id.push(ALPHABET[idx] as char);
    }
    id
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bump_token_increments_per_task() {
        let mut tokens = HashMap::new();
        assert_eq!(bump_token(&mut tokens, "a"), 1);
        assert_eq!(bump_token(&mut tokens, "a"), 2);
        assert_eq!(bump_token(&mut tokens, "b"), 1);
    }

    #[test]
    fn test_only_latest_token_is_current() {
        let mut tokens = HashMap::new();
        let first = bump_token(&mut tokens, "a");
        let second = bump_token(&mut tokens, "a");
        assert!(!token_is_current(&tokens, "a", first));
        assert!(token_is_current(&tokens, "a", second));
    }

    #[test]
    fn test_delete_supersedes_in_flight_edit() {
        // Edit issued, then delete issued before the edit settles: the
        // edit's completion (success or failure) must be discarded so a
        // deleted row is never resurrected.
        let mut tokens = HashMap::new();
        let edit = bump_token(&mut tokens, "a");
        let delete = bump_token(&mut tokens, "a");
        assert!(!token_is_current(&tokens, "a", edit));
        assert!(token_is_current(&tokens, "a", delete));
    }

    #[test]
    fn test_edit_burst_coalesces_to_final_values() {
        // User checks a task's checkbox, then unchecks within the window:
        // one pending payload remains, carrying the final (unchecked) state
        let mut pending = HashMap::new();
        replace_pending(
            &mut pending,
            "a",
            EditPayload {
                name: "Buy milk".to_string(),
                done: true,
            },
        );
        replace_pending(
            &mut pending,
            "a",
            EditPayload {
                name: "Buy milk".to_string(),
                done: false,
            },
        );
        assert_eq!(pending.len(), 1);

        // The timer fires once and consumes the payload, so exactly one
        // request goes out
        let fired = take_pending(&mut pending, "a").expect("pending edit");
        assert!(!fired.done);
        assert_eq!(fired.name, "Buy milk");
        assert_eq!(take_pending(&mut pending, "a"), None);
    }

    #[test]
    fn test_pending_edits_are_per_task() {
        let mut pending = HashMap::new();
        replace_pending(
            &mut pending,
            "a",
            EditPayload {
                name: "Buy milk".to_string(),
                done: true,
            },
        );
        replace_pending(
            &mut pending,
            "b",
            EditPayload {
                name: "Call mom".to_string(),
                done: false,
            },
        );
        assert_eq!(pending.len(), 2);
        assert_eq!(take_pending(&mut pending, "a").map(|p| p.done), Some(true));
        assert_eq!(
            take_pending(&mut pending, "b").map(|p| p.name),
            Some("Call mom".to_string())
        );
    }

    #[test]
    fn test_removed_task_has_no_current_token() {
        let mut tokens = HashMap::new();
        let token = bump_token(&mut tokens, "a");
        tokens.remove("a");
        assert!(!token_is_current(&tokens, "a", token));
    }
}
