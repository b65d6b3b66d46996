//! UI Components
//!
//! Leptos components for the task list screen.

mod task_input;
mod task_list_view;
mod task_row;

pub use task_input::TaskInput;
pub use task_list_view::TaskListView;
pub use task_row::TaskRow;
