//! Realtime Event Stream
//!
//! The database streams a collection as server-sent events. `put` and
//! `patch` carry `{"path": "...", "data": ...}` relative to the streamed
//! location; `SnapshotTree` folds them into a local copy so listeners can be
//! handed the whole collection after each change.

use serde::Deserialize;
use serde_json::{Map, Value};

use crate::domain::{StoreError, StoreResult};
use crate::snapshot::Snapshot;

/// One decoded server-sent event
#[derive(Debug, Clone, PartialEq)]
pub enum StreamEvent {
    /// Replace the value at `path` (null deletes)
    Put { path: String, data: Value },
    /// Replace each listed child under `path`
    Patch { path: String, data: Value },
    KeepAlive,
    /// Server revoked read access; the stream is closed
    Cancel(Option<String>),
    /// The auth token expired; the stream is closed
    AuthRevoked(Option<String>),
}

#[derive(Deserialize)]
struct PathData {
    path: String,
    data: Value,
}

impl StreamEvent {
    /// Names the browser must listen for
    pub const NAMES: [&'static str; 5] = ["put", "patch", "keep-alive", "cancel", "auth_revoked"];

    /// Decode an event from its name and raw `data:` payload
    pub fn parse(name: &str, data: &str) -> StoreResult<Self> {
        match name {
            "put" => {
                let PathData { path, data } = serde_json::from_str(data)?;
                Ok(StreamEvent::Put { path, data })
            }
            "patch" => {
                let PathData { path, data } = serde_json::from_str(data)?;
                Ok(StreamEvent::Patch { path, data })
            }
            "keep-alive" => Ok(StreamEvent::KeepAlive),
            "cancel" => Ok(StreamEvent::Cancel(reason(data))),
            "auth_revoked" => Ok(StreamEvent::AuthRevoked(reason(data))),
            other => Err(StoreError::Decode(format!("unknown stream event `{}`", other))),
        }
    }

    /// True for events after which the server closes the stream
    pub fn closes_stream(&self) -> bool {
        matches!(self, StreamEvent::Cancel(_) | StreamEvent::AuthRevoked(_))
    }
}

fn reason(data: &str) -> Option<String> {
    let data = data.trim();
    match serde_json::from_str::<Value>(data) {
        Ok(Value::Null) => None,
        Ok(Value::String(text)) => Some(text),
        _ if data.is_empty() => None,
        _ => Some(data.to_owned()),
    }
}

/// Local copy of the streamed collection
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SnapshotTree {
    root: Value,
}

impl SnapshotTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold an event into the tree; returns false for non-data events
    pub fn apply(&mut self, event: &StreamEvent) -> bool {
        match event {
            StreamEvent::Put { path, data } => {
                set_at(&mut self.root, &segments(path), data.clone());
                true
            }
            StreamEvent::Patch { path, data } => {
                let base = segments(path);
                match data {
                    Value::Object(children) => {
                        for (key, value) in children {
                            let mut child_path = base.clone();
                            child_path.push(key.as_str());
                            set_at(&mut self.root, &child_path, value.clone());
                        }
                    }
                    other => set_at(&mut self.root, &base, other.clone()),
                }
                true
            }
            _ => false,
        }
    }

    /// Current collection, `None` when empty
    pub fn snapshot(&self) -> Option<Snapshot> {
        Snapshot::from_value(self.root.clone())
    }

    /// Forget everything (a reopened stream starts with a full `put`)
    pub fn reset(&mut self) {
        self.root = Value::Null;
    }
}

fn segments(path: &str) -> Vec<&str> {
    path.split('/').filter(|segment| !segment.is_empty()).collect()
}

fn is_empty_node(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Object(map) => map.is_empty(),
        _ => false,
    }
}

/// Write `value` at `path`, creating parents and pruning emptied ones
fn set_at(node: &mut Value, path: &[&str], value: Value) {
    let Some((head, rest)) = path.split_first() else {
        *node = if is_empty_node(&value) { Value::Null } else { value };
        return;
    };

    if value.is_null() && !node.is_object() {
        return;
    }
    if !node.is_object() {
        *node = Value::Object(Map::new());
    }
    if let Value::Object(map) = node {
        let emptied = {
            let child = map.entry(*head).or_insert(Value::Null);
            set_at(child, rest, value);
            is_empty_node(child)
        };
        if emptied {
            map.remove(*head);
        }
    }
    if is_empty_node(node) {
        *node = Value::Null;
    }
}
