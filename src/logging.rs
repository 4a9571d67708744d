//! Logging handle injected into the pipeline adapter.
//!
//! The adapter never reaches for the process-wide logger on its own. Callers
//! pass a [`SharedLogger`] at construction; [`global`] is the usual choice for
//! binaries that install `env_logger`, while tests hand in their own recorder.

use std::fmt;
use std::sync::Arc;

use log::{Level, Log, Metadata, Record};

pub type SharedLogger = Arc<dyn Log>;

const TARGET: &str = "pipelens::pipeline";

/// Forwards every record to whatever logger the process has installed.
struct GlobalLogger;

impl Log for GlobalLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level() && log::logger().enabled(metadata)
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            log::logger().log(record);
        }
    }

    fn flush(&self) {
        log::logger().flush();
    }
}

/// Logger that defers to the global `log` facade.
pub fn global() -> SharedLogger {
    Arc::new(GlobalLogger)
}

/// Sends one record to `logger`, tagged with the caller's `module_path`.
pub(crate) fn emit(
    logger: &dyn Log,
    level: Level,
    module_path: &'static str,
    args: fmt::Arguments<'_>,
) {
    let metadata = Metadata::builder().level(level).target(TARGET).build();
    if !logger.enabled(&metadata) {
        return;
    }

    logger.log(
        &Record::builder()
            .metadata(metadata)
            .args(args)
            .module_path_static(Some(module_path))
            .build(),
    );
}

#[cfg(test)]
pub(crate) mod testing {
    use std::sync::Mutex;

    use log::{Level, Log, Metadata, Record};

    /// Records every message at or above `min_level`.
    pub struct CapturingLogger {
        min_level: Level,
        lines: Mutex<Vec<(Level, String)>>,
        module_paths: Mutex<Vec<Option<String>>>,
    }

    impl CapturingLogger {
        pub fn new(min_level: Level) -> Self {
            Self {
                min_level,
                lines: Mutex::new(Vec::new()),
                module_paths: Mutex::new(Vec::new()),
            }
        }

        pub fn lines(&self) -> Vec<(Level, String)> {
            self.lines.lock().unwrap().clone()
        }

        pub fn module_paths(&self) -> Vec<Option<String>> {
            self.module_paths.lock().unwrap().clone()
        }
    }

    impl Log for CapturingLogger {
        fn enabled(&self, metadata: &Metadata) -> bool {
            metadata.level() <= self.min_level
        }

        fn log(&self, record: &Record) {
            self.lines
                .lock()
                .unwrap()
                .push((record.level(), record.args().to_string()));
            self.module_paths
                .lock()
                .unwrap()
                .push(record.module_path().map(ToString::to_string));
        }

        fn flush(&self) {}
    }
}
