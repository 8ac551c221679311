//! Host configuration read from `QRFORM_*` environment variables.

use std::path::PathBuf;

use qrform_core::CompletionPolicy;
use qrform_engine::{EncodeSettings, EngineConfig};

use super::logging::{parse_level, LogDestination, LogSettings};

pub const ENV_OUTPUT_DIR: &str = "QRFORM_OUTPUT_DIR";
pub const ENV_LOG: &str = "QRFORM_LOG";
pub const ENV_LOG_LEVEL: &str = "QRFORM_LOG_LEVEL";
pub const ENV_LOG_FILE: &str = "QRFORM_LOG_FILE";
pub const ENV_COMPLETION: &str = "QRFORM_COMPLETION";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub output_dir: PathBuf,
    pub log: LogSettings,
    pub completion: CompletionPolicy,
    pub encode: EncodeSettings,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from a key lookup; unknown values fall back to defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let output_dir = lookup(ENV_OUTPUT_DIR)
            .filter(|dir| !dir.trim().is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| {
                std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."))
            });

        let mut log = LogSettings::default();
        if let Some(raw) = lookup(ENV_LOG) {
            match LogDestination::from_key(&raw) {
                Some(destination) => log.destination = destination,
                None => eprintln!("Warning: ignoring {ENV_LOG}={raw:?}, expected file|terminal|both"),
            }
        }
        if let Some(raw) = lookup(ENV_LOG_LEVEL) {
            match parse_level(&raw) {
                Some(level) => log.level = level,
                None => eprintln!(
                    "Warning: ignoring {ENV_LOG_LEVEL}={raw:?}, expected off|error|warn|info|debug|trace"
                ),
            }
        }
        if let Some(raw) = lookup(ENV_LOG_FILE).filter(|file| !file.trim().is_empty()) {
            log.file = PathBuf::from(raw);
        }

        let completion = match lookup(ENV_COMPLETION) {
            Some(raw) => parse_completion(&raw).unwrap_or_else(|| {
                eprintln!("Warning: ignoring {ENV_COMPLETION}={raw:?}, expected latest|arrival");
                CompletionPolicy::default()
            }),
            None => CompletionPolicy::default(),
        };

        Self {
            output_dir,
            log,
            completion,
            encode: EncodeSettings::default(),
        }
    }

    pub fn engine_config(&self) -> EngineConfig {
        EngineConfig {
            output_dir: self.output_dir.clone(),
            encode: self.encode.clone(),
        }
    }
}

fn parse_completion(raw: &str) -> Option<CompletionPolicy> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "latest" => Some(CompletionPolicy::LatestRequestWins),
        "arrival" => Some(CompletionPolicy::LastArrivalWins),
        _ => None,
    }
}
