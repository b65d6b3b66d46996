//! Task Entity
//!
//! A task is a short piece of text stored under a key the store assigns.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Collection path holding every task record (one shared list)
pub const TASKS_PATH: &str = "users/tasks";

/// Opaque task key, assigned once at creation
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskId(String);

impl TaskId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TaskId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for TaskId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// Path of a single task record inside the store
pub fn task_path(id: &TaskId) -> String {
    format!("{}/{}", TASKS_PATH, id)
}

/// Record body as stored remotely: `{"task": "<text>"}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskRecord {
    #[serde(rename = "task")]
    pub text: String,
}

impl TaskRecord {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

/// A task as displayed: the record merged with its key
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: TaskId,
    pub text: String,
}

impl Task {
    pub fn new(id: impl Into<TaskId>, text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_task_path() {
        let id = TaskId::new("-NabcDEF");
        assert_eq!(task_path(&id), "users/tasks/-NabcDEF");
    }

    #[test]
    fn test_record_uses_task_field_on_the_wire() {
        let json = serde_json::to_value(TaskRecord::new("Buy milk")).unwrap();
        assert_eq!(json, serde_json::json!({ "task": "Buy milk" }));

        let back: TaskRecord = serde_json::from_value(json).unwrap();
        assert_eq!(back.text, "Buy milk");
    }
}
