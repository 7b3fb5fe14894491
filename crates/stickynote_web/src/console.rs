//! `log` backend writing to the browser console.
//!
//! Developer diagnostics only; nothing here is shown to the page user.

use log::{Level, LevelFilter, Log, Metadata, Record, SetLoggerError};
use wasm_bindgen::JsValue;
use web_sys::console;

static LOGGER: ConsoleLogger = ConsoleLogger;

/// Routes `log` records to `console.{debug,info,warn,error}`.
pub struct ConsoleLogger;

impl Log for ConsoleLogger {
    fn enabled(&self, metadata: &Metadata<'_>) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record<'_>) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let line = format!("[{}] {}", record.target(), record.args());
        let line = JsValue::from_str(&line);
        match record.level() {
            Level::Error => console::error_1(&line),
            Level::Warn => console::warn_1(&line),
            Level::Info => console::info_1(&line),
            Level::Debug | Level::Trace => console::debug_1(&line),
        }
    }

    fn flush(&self) {}
}

/// Installs the console logger once. Later calls only adjust the level.
pub fn init_console_logging(level: LevelFilter) -> Result<(), SetLoggerError> {
    let installed = log::set_logger(&LOGGER);
    log::set_max_level(level);
    installed
}
