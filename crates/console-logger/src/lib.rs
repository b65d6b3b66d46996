//! Console Logger
//!
//! A `tracing` layer that formats every event as one line,
//! `[HH:MM:SS.mmm] App LEVEL target: message key=value`, and writes it to
//! the browser console on wasm or to stderr elsewhere.

use std::fmt::{self, Write as _};

use thiserror::Error;
use tracing::field::{Field, Visit};
use tracing::{Event, Level, Metadata, Subscriber};
use tracing_subscriber::layer::{Context, Layer, SubscriberExt};
use tracing_subscriber::util::{SubscriberInitExt, TryInitError};

type LineWriter = Box<dyn Fn(&Level, &str) + Send + Sync>;

#[derive(Debug, Error)]
pub enum LoggerError {
    #[error("failed to install logger: {0}")]
    Install(#[from] TryInitError),
}

/// Line-per-event console layer
pub struct ConsoleLayer {
    app_name: String,
    max_level: Level,
    writer: LineWriter,
}

impl ConsoleLayer {
    pub fn new(app_name: impl Into<String>) -> Self {
        Self {
            app_name: app_name.into(),
            max_level: Level::INFO,
            writer: Box::new(write_console),
        }
    }

    /// Most verbose level written (default INFO)
    pub fn with_max_level(mut self, level: Level) -> Self {
        self.max_level = level;
        self
    }

    #[cfg(test)]
    fn with_writer(mut self, writer: impl Fn(&Level, &str) + Send + Sync + 'static) -> Self {
        self.writer = Box::new(writer);
        self
    }

    fn format_line(&self, event: &Event<'_>) -> String {
        let meta = event.metadata();
        let mut visitor = LineVisitor::default();
        event.record(&mut visitor);
        format!(
            "[{}] {} {} {}: {}{}",
            chrono::Local::now().format("%H:%M:%S%.3f"),
            self.app_name,
            meta.level(),
            meta.target(),
            visitor.message,
            visitor.fields
        )
    }
}

impl<S: Subscriber> Layer<S> for ConsoleLayer {
    fn enabled(&self, metadata: &Metadata<'_>, _ctx: Context<'_, S>) -> bool {
        metadata.level() <= &self.max_level
    }

    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let line = self.format_line(event);
        (self.writer)(event.metadata().level(), &line);
    }
}

/// Collects `message` and the remaining fields as ` key=value`
#[derive(Default)]
struct LineVisitor {
    message: String,
    fields: String,
}

impl Visit for LineVisitor {
    fn record_str(&mut self, field: &Field, value: &str) {
        if field.name() == "message" {
            self.message.push_str(value);
        } else {
            let _ = write!(self.fields, " {}={}", field.name(), value);
        }
    }

    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        if field.name() == "message" {
            let _ = write!(self.message, "{:?}", value);
        } else {
            let _ = write!(self.fields, " {}={:?}", field.name(), value);
        }
    }
}

#[cfg(target_arch = "wasm32")]
fn write_console(level: &Level, line: &str) {
    let value = wasm_bindgen::JsValue::from_str(line);
    match *level {
        Level::ERROR => web_sys::console::error_1(&value),
        Level::WARN => web_sys::console::warn_1(&value),
        _ => web_sys::console::log_1(&value),
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn write_console(_level: &Level, line: &str) {
    eprintln!("{}", line);
}

/// Install a `ConsoleLayer` as the global subscriber.
///
/// Fails if a global subscriber is already set.
pub fn init_logger(app_name: &str, max_level: Level) -> Result<(), LoggerError> {
    tracing_subscriber::registry()
        .with(ConsoleLayer::new(app_name).with_max_level(max_level))
        .try_init()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    fn capture(layer: ConsoleLayer, emit: impl FnOnce()) -> Vec<String> {
        let lines = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&lines);
        let layer = layer.with_writer(move |_level: &Level, line: &str| {
            sink.lock().unwrap().push(line.to_string());
        });
        tracing::subscriber::with_default(tracing_subscriber::registry().with(layer), emit);
        let captured = lines.lock().unwrap().clone();
        captured
    }

    #[test]
    fn test_line_format_includes_level_target_and_fields() {
        let lines = capture(ConsoleLayer::new("Test"), || {
            tracing::warn!(task_id = "-Na", "record has no task text");
        });

        assert_eq!(lines.len(), 1);
        assert!(lines[0].starts_with('['));
        assert!(lines[0].contains("Test WARN console_logger::tests: record has no task text"));
        assert!(lines[0].ends_with(" task_id=-Na"));
    }

    #[test]
    fn test_debug_is_filtered_by_default() {
        let lines = capture(ConsoleLayer::new("Test"), || {
            tracing::debug!("hidden");
            tracing::error!("shown");
        });

        assert_eq!(lines.len(), 1);
        assert!(lines[0].ends_with("shown"));
    }

    #[test]
    fn test_max_level_can_be_raised() {
        let lines = capture(ConsoleLayer::new("Test").with_max_level(Level::DEBUG), || {
            tracing::debug!("visible");
            tracing::trace!("still hidden");
        });

        assert_eq!(lines.len(), 1);
        assert!(lines[0].contains("DEBUG"));
    }

    #[test]
    fn test_second_install_is_an_error() {
        let _ = init_logger("First", Level::INFO);
        assert!(matches!(
            init_logger("Second", Level::INFO),
            Err(LoggerError::Install(_))
        ));
    }
}
