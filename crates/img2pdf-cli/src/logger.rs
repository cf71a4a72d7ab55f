use chrono::Local;
use log::{Level, LevelFilter, Metadata, Record};

/// Writes log records to stderr with a local timestamp.
pub struct StderrLogger {
    level: LevelFilter,
}

impl StderrLogger {
    /// Map a `-v` count to a level: warnings by default, then info, debug, trace.
    pub fn from_verbosity(verbose: u8) -> Self {
        let level = match verbose {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Info,
            2 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        };
        Self { level }
    }

    pub fn init(self) -> Result<(), log::SetLoggerError> {
        let level = self.level;
        log::set_boxed_logger(Box::new(self))?;
        log::set_max_level(level);
        Ok(())
    }
}

impl log::Log for StderrLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let timestamp = Local::now().format("%H:%M:%S%.3f");
        if record.level() <= Level::Warn || self.level >= LevelFilter::Debug {
            eprintln!(
                "{} {:<5} {}: {}",
                timestamp,
                record.level(),
                record.target(),
                record.args()
            );
        } else {
            eprintln!("{} {}", timestamp, record.args());
        }
    }

    fn flush(&self) {}
}
