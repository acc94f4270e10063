use log::{Level, LevelFilter, Log, Metadata, Record};

/// Verbose output goes to stderr so command output on stdout stays parseable.
pub fn print_verbose(verbose: bool, msg: &str) {
    if verbose {
        eprintln!("Verbose: {}", msg);
    }
}

pub fn log_error(msg: &str) {
    eprintln!("Error: {}", msg);
}

/// `log` backend that prints library records to stderr when verbose mode is on.
///
/// Warnings and errors are always shown; debug and info only with `--verbose`.
pub struct VerboseLogger {
    enabled: bool,
}

impl VerboseLogger {
    pub fn new(enabled: bool) -> Self {
        Self { enabled }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn level_filter(&self) -> LevelFilter {
        if self.enabled {
            LevelFilter::Debug
        } else {
            LevelFilter::Warn
        }
    }

    /// Install as the global logger. A second call is a no-op.
    pub fn install(enabled: bool) {
        let logger = Self::new(enabled);
        let filter = logger.level_filter();
        if log::set_boxed_logger(Box::new(logger)).is_ok() {
            log::set_max_level(filter);
        }
    }

    fn prefix(level: Level) -> &'static str {
        match level {
            Level::Error => "Error",
            Level::Warn => "Warning",
            Level::Info => "Info",
            Level::Debug | Level::Trace => "Verbose",
        }
    }
}

impl Log for VerboseLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level_filter()
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            eprintln!("{}: {}", Self::prefix(record.level()), record.args());
        }
    }

    fn flush(&self) {}
}
