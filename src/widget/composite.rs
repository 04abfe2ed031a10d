//! Composite widgets: card, info box, picture and color picker

use std::path::{Path, PathBuf};

use tracing::{error, warn};

use crate::error::ConstructionError;
use crate::value::{Options, Value};

fn pop_text(options: &mut Options, key: &str, default: &str) -> String {
    options
        .remove(key)
        .filter(|v| !v.is_null())
        .map(|v| v.to_text())
        .unwrap_or_else(|| default.to_string())
}

/// Titled panel with a content line
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Card {
    pub title: String,
    pub content: String,
}

impl Card {
    pub fn from_options(options: &mut Options) -> Self {
        Self {
            title: pop_text(options, "title", ""),
            content: pop_text(options, "content", ""),
        }
    }
}

/// Message box tinted by its severity
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InfoBox {
    pub message: String,
    pub info_type: String,
}

impl InfoBox {
    pub fn from_options(options: &mut Options) -> Self {
        Self {
            message: pop_text(options, "message", ""),
            info_type: pop_text(options, "info_type", "info"),
        }
    }

    /// Theme key holding the background for this box's severity
    pub fn background_key(&self) -> &'static str {
        match self.info_type.as_str() {
            "warning" => "infobox_warning_bg",
            "error" => "infobox_error_bg",
            _ => "infobox_info_bg",
        }
    }
}

/// Image label
///
/// A picture that cannot show its image still builds; it displays the
/// problem as red text instead.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Picture {
    pub filepath: Option<PathBuf>,
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub error: Option<String>,
}

fn pop_dimension(options: &mut Options, key: &str) -> Result<Option<u32>, ConstructionError> {
    match options.remove(key) {
        None | Some(Value::Null) => Ok(None),
        Some(value) => value
            .as_i64()
            .filter(|n| *n > 0)
            .map(|n| Some(n as u32))
            .ok_or_else(|| ConstructionError::InvalidOption {
                key: key.to_string(),
                value: value.to_string(),
                expected: "a positive integer",
            }),
    }
}

impl Picture {
    /// Consume `filepath`, `width` and `height` and check the image file
    pub fn from_options(options: &mut Options) -> Result<Self, ConstructionError> {
        let filepath = options
            .remove("filepath")
            .map(|v| v.to_text())
            .filter(|s| !s.is_empty())
            .map(PathBuf::from);
        let width = pop_dimension(options, "width")?;
        let height = pop_dimension(options, "height")?;

        let error = match &filepath {
            None => Some("Error: Image filepath missing".to_string()),
            Some(path) => Self::check(path),
        };
        if error.is_some() {
            options.insert("fg".to_string(), Value::from("red"));
            options.insert("justify".to_string(), Value::from("left"));
        }
        if let Some(message) = &error {
            options.insert("text".to_string(), Value::from(message.as_str()));
        }

        Ok(Self {
            filepath,
            width,
            height,
            error,
        })
    }

    fn check(path: &Path) -> Option<String> {
        if !path.exists() {
            error!(path = %path.display(), "Image file not found");
            return Some(format!("Error: File not found\n{}", path.display()));
        }
        if !path.is_file() {
            error!(path = %path.display(), "Image path is not a file");
            return Some(format!(
                "Error loading image:\n{} is not a file",
                path.display()
            ));
        }
        None
    }

    pub fn is_loaded(&self) -> bool {
        self.error.is_none()
    }
}

/// Button plus swatch plus optional hex label
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ColorPicker {
    color: String,
    pub button_text: String,
    pub show_hex: bool,
}

impl ColorPicker {
    /// Consume `initial_color`, `button_text` and `show_hex`
    pub fn from_options(options: &mut Options) -> Self {
        let initial = pop_text(options, "initial_color", "#ffffff");
        let button_text = pop_text(options, "button_text", "Choose Color");
        let show_hex = options
            .remove("show_hex")
            .and_then(|v| v.as_bool())
            .unwrap_or(true);

        let mut picker = Self {
            color: "#ffffff".to_string(),
            button_text,
            show_hex,
        };
        picker.set_color(&initial);
        picker
    }

    pub fn color(&self) -> &str {
        &self.color
    }

    /// Text shown next to the swatch, if enabled
    pub fn hex_label(&self) -> Option<&str> {
        self.show_hex.then_some(self.color.as_str())
    }

    /// Accept `#rgb` or `#rrggbb`; anything else is ignored with a warning
    pub fn set_color(&mut self, color: &str) -> bool {
        let valid = color.starts_with('#')
            && matches!(color.len(), 4 | 7)
            && color[1..].chars().all(|c| c.is_ascii_hexdigit());
        if valid {
            self.color = color.to_string();
        } else {
            warn!(color, "Attempted to set invalid color format in ColorPicker");
        }
        valid
    }
}
