use std::thread;
use std::time::{SystemTime, UNIX_EPOCH};

use log::{LevelFilter, Log, Metadata, Record};

/// Environment variable overriding the log level (`off`, `warn`, `debug`, ...).
pub const LOG_ENV: &str = "ROVER_LOG";

struct DevLogger;

static LOGGER: DevLogger = DevLogger;

impl Log for DevLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let ts = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis())
            .unwrap_or(0);
        let current = thread::current();
        let thread_name = current.name().unwrap_or("unnamed");
        eprintln!("[{ts}ms][{thread_name}] {:<5} {}", record.level(), record.args());
    }

    fn flush(&self) {}
}

fn env_level() -> Option<LevelFilter> {
    std::env::var(LOG_ENV).ok()?.parse().ok()
}

/// Dev logs are on in debug builds and off in release unless overridden.
fn default_level() -> LevelFilter {
    env_level().unwrap_or(if cfg!(debug_assertions) {
        LevelFilter::Debug
    } else {
        LevelFilter::Off
    })
}

pub fn init() {
    if log::set_logger(&LOGGER).is_ok() {
        log::set_max_level(default_level());
    }
}

/// Cap chatty per-order logs for bulk runs unless the level was set explicitly.
pub fn quiet() {
    if env_level().is_none() {
        log::set_max_level(log::max_level().min(LevelFilter::Warn));
    }
}
