//! UI Components
//!
//! Reusable Leptos components.

mod flash;
mod new_task_form;
mod task_list;
mod task_row;

pub use flash::FlashList;
pub use new_task_form::NewTaskForm;
pub use task_list::TaskList;
pub use task_row::TaskRow;
