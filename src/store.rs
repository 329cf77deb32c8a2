//! Application State Store
//!
//! Uses Leptos reactive_stores for fine-grained reactivity. The view is a
//! pure function of this state: row visibility, the loading spinner, and
//! the empty-state placeholder are all derived from it, never read back
//! from the DOM.

use leptos::prelude::*;
use reactive_stores::Store;

use crate::models::Task;

/// Transient per-row status driving spinner and visibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RowStatus {
    #[default]
    Idle,
    /// Optimistically inserted, waiting on the create response. The row
    /// carries a temporary client id and renders a spinner instead of a
    /// checkbox.
    Creating,
    /// Optimistically hidden, waiting on the delete response.
    PendingDelete,
}

/// One task row: the last known-good server state plus transient status.
///
/// `epoch` bumps when a failed edit rolls back, forcing the view to
/// re-apply the known-good name and checkbox values even when they are
/// unchanged in the model.
#[derive(Debug, Clone, PartialEq)]
pub struct TaskRow {
    pub task: Task,
    pub status: RowStatus,
    pub epoch: u32,
}

impl TaskRow {
    pub fn settled(task: Task) -> Self {
        Self {
            task,
            status: RowStatus::Idle,
            epoch: 0,
        }
    }

    pub fn creating(temp_id: String, name: String) -> Self {
        Self {
            task: Task {
                id: temp_id,
                name,
                done: false,
            },
            status: RowStatus::Creating,
            epoch: 0,
        }
    }

    pub fn is_visible(&self) -> bool {
        self.status != RowStatus::PendingDelete
    }
}

/// Dismissible error banner.
#[derive(Debug, Clone, PartialEq)]
pub struct Flash {
    pub id: u32,
    pub message: String,
}

/// Global application state with field-level reactivity
#[derive(Clone, Debug, Default, Store)]
pub struct AppState {
    /// Task rows in server order
    pub rows: Vec<TaskRow>,
    /// Error banners, oldest first
    pub flashes: Vec<Flash>,
    /// Id for the next banner
    pub next_flash_id: u32,
    /// Whether the initial load has succeeded
    pub loaded: bool,
}

/// Type alias for the store
pub type AppStore = Store<AppState>;

/// Get the app store from context
pub fn use_app_store() -> AppStore {
    expect_context::<AppStore>()
}

// ========================
// Row Helper Functions
// ========================
// Pure over the row vec so the mutation flows are host-testable; the
// controller calls them through the store's write guards.

/// Empty-state predicate: no rows, or every row hidden pending delete.
pub fn empty_state(rows: &[TaskRow]) -> bool {
    rows.iter().all(|row| !row.is_visible())
}

pub fn find_row<'a>(rows: &'a [TaskRow], id: &str) -> Option<&'a TaskRow> {
    rows.iter().find(|row| row.task.id == id)
}

/// Replace a row's task with the server's representation, matched by the
/// id the row currently carries. Used both to confirm a create (matching
/// the temporary id) and to reconcile an edit.
pub fn confirm_row(rows: &mut [TaskRow], current_id: &str, task: Task) -> bool {
    match rows.iter_mut().find(|row| row.task.id == current_id) {
        Some(row) => {
            row.task = task;
            row.status = RowStatus::Idle;
            true
        }
        None => false,
    }
}

pub fn remove_row(rows: &mut Vec<TaskRow>, id: &str) -> bool {
    let before = rows.len();
    rows.retain(|row| row.task.id != id);
    rows.len() != before
}

pub fn set_row_status(rows: &mut [TaskRow], id: &str, status: RowStatus) -> bool {
    match rows.iter_mut().find(|row| row.task.id == id) {
        Some(row) => {
            row.status = status;
            true
        }
        None => false,
    }
}

/// Mark a failed edit: the model already holds the last known-good values,
/// so only the epoch moves.
pub fn rollback_row(rows: &mut [TaskRow], id: &str) -> bool {
    match rows.iter_mut().find(|row| row.task.id == id) {
        Some(row) => {
            row.epoch = row.epoch.wrapping_add(1);
            true
        }
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_task(id: &str, name: &str, done: bool) -> Task {
        Task {
            id: id.to_string(),
            name: name.to_string(),
            done,
        }
    }

    #[test]
    fn test_empty_state_over_visibility() {
        assert!(empty_state(&[]));

        let mut rows = vec![TaskRow::settled(make_task("a", "Buy milk", false))];
        assert!(!empty_state(&rows));

        set_row_status(&mut rows, "a", RowStatus::PendingDelete);
        assert!(empty_state(&rows));

        // A loading row counts as visible
        rows.push(TaskRow::creating("tmp-1".to_string(), "Call mom".to_string()));
        assert!(!empty_state(&rows));
    }

    #[test]
    fn test_create_flow_confirms_temporary_row() {
        // User submits "Call mom": a loading row appears instantly
        let mut rows = vec![TaskRow::settled(make_task("a", "Buy milk", false))];
        rows.push(TaskRow::creating("tmp-x".to_string(), "Call mom".to_string()));
        assert_eq!(rows[1].status, RowStatus::Creating);

        // Server responds with the authoritative task
        assert!(confirm_row(&mut rows, "tmp-x", make_task("x9", "Call mom", false)));
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1].task.id, "x9");
        assert_eq!(rows[1].status, RowStatus::Idle);
    }

    #[test]
    fn test_create_failure_removes_temporary_row() {
        let mut rows = vec![TaskRow::creating("tmp-x".to_string(), "Call mom".to_string())];
        assert!(remove_row(&mut rows, "tmp-x"));
        assert!(rows.is_empty());
        assert!(empty_state(&rows));
    }

    #[test]
    fn test_delete_flow_hides_then_removes() {
        let mut rows = vec![TaskRow::settled(make_task("a", "Buy milk", false))];

        // Row hides immediately, empty state shows
        set_row_status(&mut rows, "a", RowStatus::PendingDelete);
        assert!(!rows[0].is_visible());
        assert!(empty_state(&rows));

        // Server confirms: row removed, list empty
        assert!(remove_row(&mut rows, "a"));
        assert!(rows.is_empty());
    }

    #[test]
    fn test_delete_failure_reshows_row() {
        let mut rows = vec![TaskRow::settled(make_task("a", "Buy milk", false))];
        set_row_status(&mut rows, "a", RowStatus::PendingDelete);
        assert!(empty_state(&rows));

        set_row_status(&mut rows, "a", RowStatus::Idle);
        assert!(rows[0].is_visible());
        assert!(!empty_state(&rows));
    }

    #[test]
    fn test_edit_reconciles_to_server_values() {
        // Server may normalize fields; its representation wins
        let mut rows = vec![TaskRow::settled(make_task("a", "buy milk", false))];
        assert!(confirm_row(&mut rows, "a", make_task("a", "Buy milk", true)));
        assert_eq!(rows[0].task.name, "Buy milk");
        assert!(rows[0].task.done);
    }

    #[test]
    fn test_rollback_bumps_epoch_only() {
        let mut rows = vec![TaskRow::settled(make_task("a", "Buy milk", false))];
        assert!(rollback_row(&mut rows, "a"));
        assert!(rollback_row(&mut rows, "a"));
        assert_eq!(rows[0].epoch, 2);
        assert_eq!(rows[0].task, make_task("a", "Buy milk", false));
    }

    #[test]
    fn test_helpers_ignore_unknown_ids() {
        let mut rows = vec![TaskRow::settled(make_task("a", "Buy milk", false))];
        assert!(!confirm_row(&mut rows, "z", make_task("z", "?", false)));
        assert!(!remove_row(&mut rows, "z"));
        assert!(!set_row_status(&mut rows, "z", RowStatus::Idle));
        assert!(!rollback_row(&mut rows, "z"));
        assert_eq!(rows.len(), 1);
    }
}
