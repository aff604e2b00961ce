//! `log` backend that writes to the browser console.
//!
//! Installed by [`crate::init`]. Records below the configured level are
//! dropped before any string formatting happens.

use log::{Level, LevelFilter, Log, Metadata, Record};
use wasm_bindgen::prelude::*;
use web_sys::console;

/// Level used until the page calls `set_log_level`.
pub(crate) const DEFAULT_LEVEL: LevelFilter = LevelFilter::Info;

struct ConsoleLogger;

static LOGGER: ConsoleLogger = ConsoleLogger;

impl Log for ConsoleLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }

        let line = JsValue::from_str(&format_record(record.level(), record.target(), record.args()));
        match record.level() {
            Level::Error => console::error_1(&line),
            Level::Warn => console::warn_1(&line),
            Level::Info => console::info_1(&line),
            Level::Debug | Level::Trace => console::debug_1(&line),
        }
    }

    fn flush(&self) {}
}

fn format_record(level: Level, target: &str, args: &std::fmt::Arguments) -> String {
    format!("[{}] {}: {}", level, target, args)
}

/// Install the console logger. Safe to call more than once.
pub(crate) fn install(level: LevelFilter) {
    // A second call finds the logger already set; only the level changes
    let _ = log::set_logger(&LOGGER);
    log::set_max_level(level);
}

/// Parse a level name (`off`, `error`, `warn`, `info`, `debug`, `trace`).
pub(crate) fn parse_level(value: &str) -> Option<LevelFilter> {
    value.trim().parse().ok()
}

/// Change the console log level at runtime.
///
/// # Example (TypeScript)
///
/// ```typescript
/// set_log_level("debug");
/// ```
#[wasm_bindgen]
pub fn set_log_level(level: &str) -> Result<(), JsValue> {
    let filter = parse_level(level)
        .ok_or_else(|| JsValue::from_str(&format!("Unknown log level: {}", level)))?;
    install(filter);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_level() {
        assert_eq!(parse_level("debug"), Some(LevelFilter::Debug));
        assert_eq!(parse_level(" WARN "), Some(LevelFilter::Warn));
        assert_eq!(parse_level("off"), Some(LevelFilter::Off));
        assert_eq!(parse_level("loud"), None);
    }

    #[test]
    fn test_format_record() {
        let line = format_record(Level::Info, "imagecraft_core::export", &format_args!("done"));
        assert_eq!(line, "[INFO] imagecraft_core::export: done");
    }
}
