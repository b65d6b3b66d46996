//! Collection Snapshots
//!
//! A snapshot is the complete current content of the task collection.
//! An empty or missing collection has no snapshot at all: stores deliver
//! `None` for it, never an empty mapping.

use serde_json::{Map, Value};
use tracing::warn;

use crate::domain::{Task, TaskId};

/// Non-empty keyed mapping of `id -> record`
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot(Map<String, Value>);

impl Snapshot {
    /// Wrap a mapping; an empty mapping is the absence signal
    pub fn from_map(map: Map<String, Value>) -> Option<Self> {
        if map.is_empty() {
            None
        } else {
            Some(Self(map))
        }
    }

    /// Interpret the JSON value found at the collection path
    pub fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Object(map) => Self::from_map(map),
            Value::Null => None,
            other => {
                warn!(value = %other, "collection holds a non-object value, treating as empty");
                None
            }
        }
    }

    pub fn get(&self, id: &str) -> Option<&Value> {
        self.0.get(id)
    }

    /// Entries in the snapshot's own enumeration order
    pub fn entries(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.0.iter()
    }
}

/// Flatten a snapshot into the displayed list.
///
/// `None` stays `None`. Each entry becomes `{id, text}` in enumeration order;
/// nothing is sorted, filtered or deduplicated. A record without a string
/// `task` field is kept with empty text.
pub fn project(snapshot: Option<&Snapshot>) -> Option<Vec<Task>> {
    snapshot.map(|snapshot| {
        snapshot
            .entries()
            .map(|(id, record)| Task {
                id: TaskId::new(id.as_str()),
                text: record_text(id, record),
            })
            .collect()
    })
}

fn record_text(id: &str, record: &Value) -> String {
    match record.get("task").and_then(Value::as_str) {
        Some(text) => text.to_owned(),
        None => {
            warn!(task_id = id, "record has no task text");
            String::new()
        }
    }
}
