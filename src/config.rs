//! Application configuration (simplegui.toml)

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{ConfigError, ThemeError};
use crate::theme::ThemeSettings;
use crate::value::Value;

pub const CONFIG_FILE: &str = "simplegui.toml";

/// Application configuration loaded from simplegui.toml
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub window: WindowConfig,

    #[serde(default)]
    pub theme: ThemeConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct WindowConfig {
    #[serde(default = "default_title")]
    pub title: String,

    /// Initial size as `WIDTHxHEIGHT`
    #[serde(default = "default_size")]
    pub size: String,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: default_title(),
            size: default_size(),
        }
    }
}

fn default_title() -> String {
    "SimpleGUI".to_string()
}

fn default_size() -> String {
    "600x400".to_string()
}

impl WindowConfig {
    pub fn dimensions(&self) -> Result<(u32, u32), ConfigError> {
        parse_size(&self.size)
    }
}

/// Parse `WIDTHxHEIGHT`
pub fn parse_size(size: &str) -> Result<(u32, u32), ConfigError> {
    let invalid = || ConfigError::InvalidSize(size.to_string());
    let (width, height) = size.trim().split_once(['x', 'X']).ok_or_else(invalid)?;
    let width: u32 = width.trim().parse().map_err(|_| invalid())?;
    let height: u32 = height.trim().parse().map_err(|_| invalid())?;
    if width == 0 || height == 0 {
        return Err(invalid());
    }
    Ok((width, height))
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ThemeConfig {
    /// Theme file (flat TOML of style keys)
    #[serde(default)]
    pub file: Option<PathBuf>,

    /// Keys applied over the theme file
    #[serde(default)]
    pub overrides: BTreeMap<String, Value>,
}

impl ThemeConfig {
    /// Theme file (or built-in defaults) with the overrides applied
    pub fn settings(&self) -> Result<ThemeSettings, ThemeError> {
        let base = match &self.file {
            Some(path) => ThemeSettings::load(path)?,
            None => ThemeSettings::default(),
        };
        Ok(base.with_overrides(&self.overrides))
    }

    /// Like [`settings`](Self::settings), falling back to defaults on error
    pub fn settings_or_default(&self) -> ThemeSettings {
        self.settings().unwrap_or_else(|e| {
            warn!(error = %e, file = ?self.file, "Failed to load theme, using defaults");
            ThemeSettings::default().with_overrides(&self.overrides)
        })
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Filter directive, e.g. "info" or "simplegui=debug"
    #[serde(default = "default_level")]
    pub level: String,

    /// Log file; defaults to simplegui.log next to the executable
    #[serde(default)]
    pub file: Option<PathBuf>,

    #[serde(default)]
    pub to_stderr: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
            file: None,
            to_stderr: false,
        }
    }
}

fn default_level() -> String {
    "info".to_string()
}

impl AppConfig {
    /// Find simplegui.toml in standard locations
    pub fn find_config_path() -> Option<PathBuf> {
        // Check in order: config dir, exe dir, cwd
        let candidates = [
            dirs::config_dir().map(|p| p.join("simplegui").join(CONFIG_FILE)),
            std::env::current_exe()
                .ok()
                .and_then(|p| p.parent().map(|d| d.join(CONFIG_FILE))),
            Some(PathBuf::from(CONFIG_FILE)),
        ];

        candidates.into_iter().flatten().find(|candidate| candidate.exists())
    }

    /// Load configuration from the first file found, or defaults if none
    pub fn load() -> Result<Self, ConfigError> {
        match Self::find_config_path() {
            Some(path) => Self::load_from_path(&path),
            None => {
                debug!("No configuration file found, using defaults");
                Ok(Self::default())
            }
        }
    }

    /// Load configuration from a specific path
    pub fn load_from_path(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let config = Self::parse(&content)?;
        debug!(path = %path.display(), "Loaded configuration");
        Ok(config)
    }

    pub fn parse(input: &str) -> Result<Self, ConfigError> {
        let config: AppConfig = toml::from_str(input)?;
        config.window.dimensions()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::parse("").unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.window.dimensions().unwrap(), (600, 400));
        assert_eq!(config.logging.level, "info");
        assert!(!config.logging.to_stderr);
    }

    #[test]
    fn test_parse_sections() {
        let config = AppConfig::parse(
            r##"
            [window]
            title = "Demo"
            size = "800x600"

            [theme.overrides]
            button_bg = "#222222"
            font_size = 12

            [logging]
            level = "debug"
            to_stderr = true
            "##,
        )
        .unwrap();
        assert_eq!(config.window.title, "Demo");
        assert_eq!(config.window.dimensions().unwrap(), (800, 600));
        let theme = config.theme.settings().unwrap();
        assert_eq!(theme.get_string("button_bg", ""), "#222222");
        assert_eq!(theme.get_number("font_size", 0.0), 12.0);
        assert!(config.logging.to_stderr);
    }

    #[test]
    fn test_invalid_size() {
        assert!(matches!(parse_size("600"), Err(ConfigError::InvalidSize(_))));
        assert!(matches!(parse_size("0x10"), Err(ConfigError::InvalidSize(_))));
        assert_eq!(parse_size(" 1024X768 ").unwrap(), (1024, 768));
        assert!(AppConfig::parse("[window]\nsize = \"big\"").is_err());
    }

    #[test]
    fn test_load_from_path_and_theme_file() {
        let dir = tempfile::tempdir().unwrap();
        let theme_path = dir.path().join("dark.toml");
        std::fs::write(&theme_path, "root_bg = \"#000000\"\nlabel_fg = \"#eeeeee\"\n").unwrap();

        let config_path = dir.path().join(CONFIG_FILE);
        std::fs::write(
            &config_path,
            format!(
                "[theme]\nfile = {:?}\n[theme.overrides]\nlabel_fg = \"#ffffff\"\n",
                theme_path.display().to_string()
            ),
        )
        .unwrap();

        let config = AppConfig::load_from_path(&config_path).unwrap();
        let theme = config.theme.settings().unwrap();
        assert_eq!(theme.get_string("root_bg", ""), "#000000");
        assert_eq!(theme.get_string("label_fg", ""), "#ffffff");
    }

    #[test]
    fn test_missing_theme_file_falls_back() {
        let config = ThemeConfig {
            file: Some(PathBuf::from("/nonexistent/theme.toml")),
            overrides: BTreeMap::from([("frame_bg".to_string(), Value::from("#abcdef"))]),
        };
        assert!(config.settings().is_err());
        let theme = config.settings_or_default();
        assert_eq!(theme.get_string("frame_bg", ""), "#abcdef");
    }

    #[test]
    fn test_parse_error_surfaces() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        std::fs::write(&path, "[window\n").unwrap();
        assert!(matches!(
            AppConfig::load_from_path(&path),
            Err(ConfigError::Parse(_))
        ));
    }
}
