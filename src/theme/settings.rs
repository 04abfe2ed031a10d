//! Flat theme settings with defaults and TOML loading

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use crate::error::ThemeError;
use crate::theme::color::Color;
use crate::value::Value;

/// Built-in style keys
const DEFAULTS: &[(&str, &str)] = &[
    ("root_bg", "#f0f0f0"),
    ("frame_bg", "#f0f0f0"),
    ("label_fg", "#000000"),
    ("label_bg", "#f0f0f0"),
    ("entry_bg", "#ffffff"),
    ("entry_fg", "#000000"),
    ("entry_border", "#cccccc"),
    ("button_bg", "#007BFF"),
    ("button_fg", "#ffffff"),
    ("button_active_bg", "#0056b3"),
    ("button_active_fg", "#ffffff"),
    ("button_relief", "raised"),
    ("checkbutton_bg", "#f0f0f0"),
    ("radiobutton_bg", "#f0f0f0"),
    ("text_bg", "#ffffff"),
    ("text_fg", "#000000"),
    ("listbox_bg", "#ffffff"),
    ("listbox_fg", "#000000"),
    ("scale_bg", "#f0f0f0"),
    ("scale_troughcolor", "#d3d3d3"),
    ("canvas_bg", "#ffffff"),
    ("card_bg", "#ffffff"),
    ("card_border", "#dddddd"),
    ("infobox_info_bg", "#d9edf7"),
    ("infobox_warning_bg", "#fcf8e3"),
    ("infobox_error_bg", "#ED6666"),
    ("picture_bg", "#f0f0f0"),
    ("separator_bg", "#cccccc"),
    ("notebook_bg", "#f0f0f0"),
    ("notebook_tab_bg", "#d9d9d9"),
    ("notebook_tab_active_bg", "#f0f0f0"),
    ("notebook_tab_fg", "#000000"),
    ("treeview_bg", "#ffffff"),
    ("treeview_fg", "#000000"),
    ("treeview_field_bg", "#ffffff"),
    ("treeview_heading_bg", "#e1e1e1"),
    ("treeview_heading_fg", "#000000"),
    ("treeview_heading_relief", "raised"),
    ("ttk_theme", "clam"),
    ("colorpicker_bg", "#f0f0f0"),
    ("colorpicker_display_border", "#a0a0a0"),
];

/// Semantic style key → value
///
/// Replaced wholesale at runtime; widgets built afterwards pick up the new
/// values, existing widgets keep theirs.
#[derive(Clone, Debug, PartialEq)]
pub struct ThemeSettings {
    values: BTreeMap<String, Value>,
}

impl Default for ThemeSettings {
    fn default() -> Self {
        let mut values: BTreeMap<String, Value> = DEFAULTS
            .iter()
            .map(|(k, v)| (k.to_string(), Value::from(*v)))
            .collect();
        values.insert("font_family".to_string(), Value::from("Arial"));
        values.insert("font_size".to_string(), Value::Int(10));
        Self { values }
    }
}

impl ThemeSettings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a flat TOML table layered over the defaults
    pub fn parse(input: &str) -> Result<Self, ThemeError> {
        let overrides: BTreeMap<String, Value> = toml::from_str(input)?;
        Ok(Self::default().with_overrides(&overrides))
    }

    /// Load a theme file
    pub fn load(path: &Path) -> Result<Self, ThemeError> {
        let content = fs::read_to_string(path)?;
        Self::parse(&content)
    }

    /// Copy with the given keys replaced
    pub fn with_overrides(mut self, overrides: &BTreeMap<String, Value>) -> Self {
        for (key, value) in overrides {
            self.values.insert(key.clone(), value.clone());
        }
        self
    }

    pub fn set(&mut self, key: &str, value: impl Into<Value>) {
        self.values.insert(key.to_string(), value.into());
    }

    pub fn get_value(&self, key: &str) -> Option<&Value> {
        self.values.get(key)
    }

    /// Get a string setting with default
    pub fn get_string(&self, key: &str, default: &str) -> String {
        self.get_value(key)
            .and_then(Value::as_str)
            .map(str::to_string)
            .unwrap_or_else(|| default.to_string())
    }

    /// Get a number setting with default
    pub fn get_number(&self, key: &str, default: f64) -> f64 {
        self.get_value(key)
            .and_then(Value::as_f64)
            .unwrap_or(default)
    }

    /// Get a color setting with default; unparsable values fall back too
    pub fn get_color(&self, key: &str, default: Color) -> Color {
        self.get_value(key)
            .and_then(Value::as_str)
            .and_then(|s| Color::parse(s).ok())
            .unwrap_or(default)
    }

    /// Font as `[family, size]` or `[family, size, style]`
    pub fn font(&self, style: Option<&str>) -> Value {
        let family = self.get_string("font_family", "Arial");
        let size = self.get_number("font_size", 10.0) as i64;
        let mut font = vec![Value::from(family), Value::Int(size)];
        if let Some(style) = style {
            font.push(Value::from(style));
        }
        Value::List(font)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let theme = ThemeSettings::default();
        assert_eq!(theme.get_string("button_bg", ""), "#007BFF");
        assert_eq!(theme.get_number("font_size", 0.0), 10.0);
        assert_eq!(
            theme.font(Some("bold")),
            Value::from(vec![Value::from("Arial"), Value::Int(10), Value::from("bold")])
        );
        assert_eq!(theme.get_string("missing", "fallback"), "fallback");
    }

    #[test]
    fn test_parse_overrides_defaults() {
        let theme = ThemeSettings::parse(
            r##"
            button_bg = "#222222"
            font_size = 14
            "##,
        )
        .unwrap();
        assert_eq!(theme.get_color("button_bg", Color::WHITE), Color::rgb(0x22, 0x22, 0x22));
        assert_eq!(theme.get_number("font_size", 0.0), 14.0);
        assert_eq!(theme.get_string("frame_bg", ""), "#f0f0f0");
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "label_fg = \"navy\"").unwrap();
        let theme = ThemeSettings::load(file.path()).unwrap();
        assert_eq!(theme.get_color("label_fg", Color::BLACK), Color::rgb(0, 0, 128));
    }

    #[test]
    fn test_parse_error() {
        assert!(matches!(
            ThemeSettings::parse("not valid = = toml"),
            Err(ThemeError::Parse(_))
        ));
    }
}
