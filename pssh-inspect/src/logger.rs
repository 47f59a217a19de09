use colored::{ColoredString, Colorize};
use log::{Level, LevelFilter, Metadata, Record, SetLoggerError};
use std::sync::atomic::{AtomicBool, Ordering};

pub struct Logger {
    color: AtomicBool,
}

static LOGGER: Logger = Logger {
    color: AtomicBool::new(false),
};

/// Install the logger. Messages go to stderr so that stdout only carries ids.
pub fn init(level: LevelFilter, color: bool) -> Result<(), SetLoggerError> {
    LOGGER.color.store(color, Ordering::Relaxed);
    log::set_logger(&LOGGER)?;
    log::set_max_level(level);
    Ok(())
}

impl Logger {
    fn format(&self, record: &Record) -> Option<String> {
        let color = self.color.load(Ordering::Relaxed);
        let paint = |x: ColoredString| if color { x } else { x.clear() };

        match log::max_level() {
            LevelFilter::Off => None,
            LevelFilter::Error | LevelFilter::Warn | LevelFilter::Info => Some(format!(
                "{} {}",
                paint(label(record.level())),
                record.args()
            )),
            LevelFilter::Debug | LevelFilter::Trace => {
                let location = match (record.file(), record.line()) {
                    (Some(file), Some(line)) => format!("[{}:{}]", file, line).dimmed(),
                    _ => "[unk]".dimmed(),
                };

                Some(format!(
                    "{} {} {} {}",
                    paint(label(record.level())),
                    paint(record.target().dimmed()),
                    paint(location),
                    record.args()
                ))
            }
        }
    }
}

impl log::Log for Logger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            if let Some(line) = self.format(record) {
                eprintln!("{}", line);
            }
        }
    }

    fn flush(&self) {}
}

fn label(level: Level) -> ColoredString {
    match level {
        Level::Debug => "[DEBUG]".bold().blue(),
        Level::Error => "[ERROR]".bold().red(),
        Level::Info => "[INFO]".bold().green(),
        Level::Trace => "[TRACE]".bold().purple(),
        Level::Warn => "[WARN]".bold().yellow(),
    }
}
