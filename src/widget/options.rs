//! Option validation
//!
//! Construction and runtime configuration both pass through here. Keys that
//! are not recognised are accepted as-is; recognised keys must carry a value
//! of the right shape.

use crate::error::ConstructionError;
use crate::theme::color::Color;
use crate::value::{Options, Value};
use crate::widget::{Family, WidgetKind};

const NUMERIC_KEYS: &[&str] = &[
    "width",
    "height",
    "padx",
    "pady",
    "bd",
    "borderwidth",
    "highlightthickness",
    "wraplength",
    "length",
    "from",
    "from_",
    "to",
    "resolution",
    "increment",
    "tickinterval",
    "sliderlength",
    "digits",
    "underline",
    "spacing1",
    "spacing2",
    "spacing3",
    "insertwidth",
    "selectborderwidth",
];

const COLOR_KEYS: &[&str] = &[
    "bg",
    "fg",
    "background",
    "foreground",
    "activebackground",
    "activeforeground",
    "disabledforeground",
    "troughcolor",
    "highlightbackground",
    "highlightcolor",
    "selectbackground",
    "selectforeground",
    "selectcolor",
    "insertbackground",
    "buttonbackground",
    "readonlybackground",
];

/// Appearance keys the themed family leaves to named styles
const CLASSIC_ONLY_KEYS: &[&str] = &[
    "bg",
    "fg",
    "activebackground",
    "activeforeground",
    "troughcolor",
    "highlightbackground",
    "highlightcolor",
    "highlightthickness",
    "selectcolor",
    "bd",
];

const RELIEFS: &[&str] = &["flat", "raised", "sunken", "groove", "ridge", "solid"];
const ANCHORS: &[&str] = &["n", "ne", "e", "se", "s", "sw", "w", "nw", "center"];
const STATES: &[&str] = &["normal", "disabled", "active", "readonly"];
const ORIENTS: &[&str] = &["horizontal", "vertical"];
const JUSTIFY: &[&str] = &["left", "center", "right"];
const SELECT_MODES: &[&str] = &["single", "browse", "multiple", "extended", "none"];
const WRAPS: &[&str] = &["none", "char", "word"];

fn enumerated(key: &str) -> Option<(&'static [&'static str], &'static str)> {
    match key {
        "state" => Some((STATES, "normal, disabled, active or readonly")),
        "orient" => Some((ORIENTS, "horizontal or vertical")),
        "anchor" => Some((ANCHORS, "a compass anchor")),
        "relief" | "sliderrelief" => Some((RELIEFS, "a relief style")),
        "justify" => Some((JUSTIFY, "left, center or right")),
        "selectmode" => Some((SELECT_MODES, "a selection mode")),
        "wrap" => Some((WRAPS, "none, char or word")),
        _ => None,
    }
}

fn invalid(key: &str, value: &Value, expected: &'static str) -> ConstructionError {
    ConstructionError::InvalidOption {
        key: key.to_string(),
        value: value.to_string(),
        expected,
    }
}

/// Validate a single option for a widget kind
pub fn validate_option(
    kind: WidgetKind,
    family: Family,
    key: &str,
    value: &Value,
) -> Result<(), ConstructionError> {
    if family == Family::Themed && CLASSIC_ONLY_KEYS.contains(&key) {
        return Err(ConstructionError::UnknownOption {
            key: key.to_string(),
            kind: kind.as_str(),
        });
    }
    if kind == WidgetKind::Text && key == "text" {
        return Err(ConstructionError::UnknownOption {
            key: key.to_string(),
            kind: kind.as_str(),
        });
    }

    if NUMERIC_KEYS.contains(&key) {
        return match value.as_f64() {
            Some(_) => Ok(()),
            None => Err(invalid(key, value, "a number")),
        };
    }

    if COLOR_KEYS.contains(&key) {
        return match value.as_str().map(Color::parse) {
            Some(Ok(_)) => Ok(()),
            _ => Err(invalid(key, value, "a color name or #rrggbb")),
        };
    }

    if let Some((allowed, expected)) = enumerated(key) {
        return match value.as_str() {
            Some(s) if allowed.contains(&s) => Ok(()),
            _ => Err(invalid(key, value, expected)),
        };
    }

    match (key, value) {
        ("text" | "title", Value::Map(_) | Value::List(_)) => Err(invalid(key, value, "text")),
        ("font", Value::Str(_) | Value::List(_)) => Ok(()),
        ("font", _) => Err(invalid(key, value, "a font name or [family, size, style]")),
        _ => Ok(()),
    }
}

/// Validate a whole option bag, stopping at the first rejection
pub fn validate_options(
    kind: WidgetKind,
    family: Family,
    options: &Options,
) -> Result<(), ConstructionError> {
    options
        .iter()
        .try_for_each(|(key, value)| validate_option(kind, family, key, value))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numeric_keys() {
        let check = |v: Value| validate_option(WidgetKind::Label, Family::Classic, "width", &v);
        assert!(check(Value::Int(10)).is_ok());
        assert!(check(Value::from("12")).is_ok());
        assert!(check(Value::from("wide")).is_err());
    }

    #[test]
    fn test_color_keys() {
        let check = |v: &str| {
            validate_option(WidgetKind::Button, Family::Classic, "bg", &Value::from(v))
        };
        assert!(check("#007BFF").is_ok());
        assert!(check("red").is_ok());
        assert!(check("#12").is_err());
        assert!(check("blurple").is_err());
    }

    #[test]
    fn test_themed_family_rejects_classic_keys() {
        let err = validate_option(WidgetKind::Button, Family::Themed, "bg", &Value::from("red"));
        assert_eq!(
            err,
            Err(ConstructionError::UnknownOption {
                key: "bg".into(),
                kind: "Button"
            })
        );
        assert!(validate_option(WidgetKind::Button, Family::Themed, "text", &Value::from("Go")).is_ok());
    }

    #[test]
    fn test_enumerated_keys() {
        let ok = validate_option(WidgetKind::Scale, Family::Classic, "orient", &Value::from("horizontal"));
        assert!(ok.is_ok());
        let err = validate_option(WidgetKind::Label, Family::Classic, "relief", &Value::from("bumpy"));
        assert!(err.is_err());
    }

    #[test]
    fn test_unknown_keys_pass() {
        let mut options = Options::new();
        options.insert("cursor".into(), Value::from("hand2"));
        options.insert("values".into(), Value::from(vec!["a", "b"]));
        assert!(validate_options(WidgetKind::Combobox, Family::Themed, &options).is_ok());
    }

    #[test]
    fn test_text_widget_has_no_text_option() {
        let err = validate_option(WidgetKind::Text, Family::Classic, "text", &Value::from("x"));
        assert!(matches!(err, Err(ConstructionError::UnknownOption { .. })));
    }
}
