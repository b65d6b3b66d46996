//! Realtime Database Wire Model
//!
//! Everything about the hosted store that does not need a browser:
//! connection config, REST URLs, the server-sent event stream and the
//! reconnect schedule. The browser adapter only moves bytes.

mod backoff;
mod endpoint;
mod stream;

pub use backoff::{Backoff, ReconnectSchedule};
pub use endpoint::{RemoteConfig, RestEndpoint};
pub use stream::{SnapshotTree, StreamEvent};
