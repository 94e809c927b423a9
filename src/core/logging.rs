//! Browser console logger behind the `log` facade.
//!
//! On wasm32 records go to the browser console through `web_sys::console`.
//! Native hosts install their own `log` backend (`env_logger` in the tests);
//! `init` leaves it alone there.

use log::LevelFilter;

#[cfg(target_arch = "wasm32")]
mod console {
    use log::{Level, Log, Metadata, Record};

    pub(super) struct ConsoleLogger;

    pub(super) static LOGGER: ConsoleLogger = ConsoleLogger;

    impl Log for ConsoleLogger {
        fn enabled(&self, metadata: &Metadata) -> bool {
            metadata.level() <= log::max_level()
        }

        fn log(&self, record: &Record) {
            if !self.enabled(record.metadata()) {
                return;
            }
            let line = format!("[{}] {}: {}", record.level(), record.target(), record.args());
            let value = wasm_bindgen::JsValue::from_str(&line);
            match record.level() {
                Level::Error => web_sys::console::error_1(&value),
                Level::Warn => web_sys::console::warn_1(&value),
                Level::Info => web_sys::console::info_1(&value),
                Level::Debug | Level::Trace => web_sys::console::debug_1(&value),
            }
        }

        fn flush(&self) {}
    }
}

/// Install the console logger. Returns false when another logger was
/// already set, and always on native targets.
#[cfg(target_arch = "wasm32")]
pub fn init(level: LevelFilter) -> bool {
    match log::set_logger(&console::LOGGER) {
        Ok(()) => {
            log::set_max_level(level);
            true
        }
        Err(_) => false,
    }
}

#[cfg(not(target_arch = "wasm32"))]
pub fn init(_level: LevelFilter) -> bool {
    false
}
