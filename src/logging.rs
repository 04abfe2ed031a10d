//! Logging setup on top of `tracing-subscriber`

use std::fs::OpenOptions;
use std::path::PathBuf;
use std::sync::{Mutex, OnceLock};

use tracing_subscriber::EnvFilter;

use crate::config::LoggingConfig;

pub const LOG_FILE: &str = "simplegui.log";

static INIT: OnceLock<()> = OnceLock::new();

/// Get the directory where the executable is located
pub fn exe_dir() -> PathBuf {
    std::env::current_exe()
        .ok()
        .and_then(|p| p.parent().map(|p| p.to_path_buf()))
        .unwrap_or_else(|| PathBuf::from("."))
}

/// Where file logging goes when nothing is configured
pub fn default_log_path() -> PathBuf {
    exe_dir().join(LOG_FILE)
}

/// `RUST_LOG` wins over the configured level
fn filter(config: &LoggingConfig) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::try_new(&config.level).unwrap_or_else(|_| EnvFilter::new("info"))
    })
}

/// Install the global subscriber
///
/// Only the first call has an effect. When the log file cannot be opened,
/// output falls back to stderr.
pub fn init(config: &LoggingConfig) {
    INIT.get_or_init(|| {
        let builder = tracing_subscriber::fmt().with_env_filter(filter(config));

        if config.to_stderr {
            let _ = builder.with_writer(std::io::stderr).try_init();
            return;
        }

        let path = config.file.clone().unwrap_or_else(default_log_path);
        match OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(&path)
        {
            Ok(file) => {
                let _ = builder
                    .with_ansi(false)
                    .with_writer(Mutex::new(file))
                    .try_init();
                tracing::info!(path = %path.display(), "=== SimpleGUI log started ===");
            }
            Err(e) => {
                let _ = builder.with_writer(std::io::stderr).try_init();
                tracing::warn!(path = %path.display(), error = %e, "Cannot open log file, logging to stderr");
            }
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_log_path_is_next_to_exe() {
        let path = default_log_path();
        assert_eq!(path.file_name().unwrap(), LOG_FILE);
        assert_eq!(path.parent().unwrap(), exe_dir());
    }

    #[test]
    fn test_bad_level_falls_back() {
        let config = LoggingConfig {
            level: "not a [valid directive".to_string(),
            ..LoggingConfig::default()
        };
        // Must not panic
        let _ = filter(&config);
    }
}
