//! Error types
//!
//! None of these abort a build: the builder turns them into log lines and
//! report entries. They surface as `Result`s only at API boundaries that load
//! files or write values.

use thiserror::Error;

/// Widget creation or configuration was rejected
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConstructionError {
    /// Option value has the wrong shape for the key
    #[error("invalid value {value} for option '{key}': expected {expected}")]
    InvalidOption {
        key: String,
        value: String,
        expected: &'static str,
    },

    /// Option is not meaningful for this widget kind
    #[error("unknown option '{key}' for {kind}")]
    UnknownOption { key: String, kind: &'static str },

    /// Required constructor argument is missing
    #[error("missing required option '{0}'")]
    MissingOption(String),
}

/// A write into a binding could not be coerced to the binding's kind
#[derive(Error, Debug, Clone, PartialEq)]
pub enum BindingError {
    #[error("cannot store {value} in {kind} binding '{key}'")]
    Coercion {
        key: String,
        kind: &'static str,
        value: String,
    },
}

/// Layout document loading failed upstream of the builder
#[derive(Error, Debug)]
pub enum DocumentError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("unsupported layout file extension: {0}")]
    UnsupportedFormat(String),
}

/// Theme settings could not be loaded
#[derive(Error, Debug)]
pub enum ThemeError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Application configuration could not be loaded
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid window size '{0}', expected WIDTHxHEIGHT")]
    InvalidSize(String),
}
