//! Host logging: simplelog sinks chosen by `QRFORM_LOG`, filtered by
//! `QRFORM_LOG_LEVEL`.

use std::fs::File;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use log::LevelFilter;
use simplelog::{
    ColorChoice, CombinedLogger, Config, ConfigBuilder, SharedLogger, TermLogger, TerminalMode,
    WriteLogger,
};

pub const DEFAULT_LOG_FILE: &str = "./qrform.log";

/// Where log records go.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogDestination {
    #[default]
    File,
    /// stderr for warnings and errors, stdout otherwise.
    Terminal,
    Both,
}

impl LogDestination {
    pub fn from_key(key: &str) -> Option<Self> {
        match key.trim().to_ascii_lowercase().as_str() {
            "file" => Some(Self::File),
            "terminal" | "term" => Some(Self::Terminal),
            "both" => Some(Self::Both),
            _ => None,
        }
    }

    fn writes_file(self) -> bool {
        matches!(self, Self::File | Self::Both)
    }

    fn writes_terminal(self) -> bool {
        matches!(self, Self::Terminal | Self::Both)
    }
}

/// Accepts `off`, `error`, `warn`, `info`, `debug` and `trace` in any case.
pub fn parse_level(raw: &str) -> Option<LevelFilter> {
    LevelFilter::from_str(raw.trim()).ok()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogSettings {
    pub destination: LogDestination,
    pub level: LevelFilter,
    pub file: PathBuf,
}

impl Default for LogSettings {
    fn default() -> Self {
        Self {
            destination: LogDestination::default(),
            level: LevelFilter::Info,
            file: PathBuf::from(DEFAULT_LOG_FILE),
        }
    }
}

/// Installs the global logger. A level of `Off` installs nothing.
pub fn initialize(settings: &LogSettings) {
    if settings.level == LevelFilter::Off {
        return;
    }
    let loggers = build_loggers(settings);
    if loggers.is_empty() {
        return;
    }
    let _ = CombinedLogger::init(loggers);
}

fn build_loggers(settings: &LogSettings) -> Vec<Box<dyn SharedLogger>> {
    let mut loggers: Vec<Box<dyn SharedLogger>> = Vec::new();
    if settings.destination.writes_terminal() {
        loggers.push(TermLogger::new(
            settings.level,
            record_format(),
            TerminalMode::Mixed,
            ColorChoice::Auto,
        ));
    }
    if settings.destination.writes_file() {
        if let Some(file_logger) = create_file_logger(settings.level, &settings.file) {
            loggers.push(file_logger);
        }
    }
    loggers
}

fn record_format() -> Config {
    ConfigBuilder::new()
        .set_time_format_rfc3339()
        .set_target_level(LevelFilter::Error)
        .build()
}

fn create_file_logger(level: LevelFilter, path: &Path) -> Option<Box<WriteLogger<File>>> {
    match File::create(path) {
        Ok(file) => Some(WriteLogger::new(level, record_format(), file)),
        Err(err) => {
            eprintln!("Warning: Could not create log file at {:?}: {}", path, err);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    use super::*;

    fn settings(destination: LogDestination, level: LevelFilter, file: PathBuf) -> LogSettings {
        LogSettings {
            destination,
            level,
            file,
        }
    }

    #[test]
    fn parses_destination_keys() {
        assert_eq!(LogDestination::from_key("file"), Some(LogDestination::File));
        assert_eq!(LogDestination::from_key(" Terminal "), Some(LogDestination::Terminal));
        assert_eq!(LogDestination::from_key("BOTH"), Some(LogDestination::Both));
        assert_eq!(LogDestination::from_key("syslog"), None);
    }

    #[test]
    fn parses_level_names() {
        assert_eq!(parse_level("debug"), Some(LevelFilter::Debug));
        assert_eq!(parse_level(" WARN "), Some(LevelFilter::Warn));
        assert_eq!(parse_level("off"), Some(LevelFilter::Off));
        assert_eq!(parse_level("loud"), None);
    }

    #[test]
    fn file_destination_creates_log_at_configured_path() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("custom.log");

        let loggers = build_loggers(&settings(LogDestination::File, LevelFilter::Debug, path.clone()));

        assert_eq!(loggers.len(), 1);
        assert_eq!(loggers[0].level(), LevelFilter::Debug);
        assert!(path.is_file());
    }

    #[test]
    fn both_destination_adds_terminal_and_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("both.log");

        let loggers = build_loggers(&settings(LogDestination::Both, LevelFilter::Warn, path.clone()));

        assert_eq!(loggers.len(), 2);
        assert!(loggers.iter().all(|logger| logger.level() == LevelFilter::Warn));
        assert!(path.is_file());
    }

    #[test]
    fn unwritable_log_file_is_skipped() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("missing").join("qrform.log");

        let loggers = build_loggers(&settings(LogDestination::File, LevelFilter::Info, path));

        assert!(loggers.is_empty());
    }
}
