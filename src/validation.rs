//! Form validation helpers

use std::collections::BTreeMap;

use regex::Regex;
use tracing::warn;

use crate::facade::Gui;

/// A single test applied to a field value
pub enum Check {
    NotEmpty,
    /// Must match at the start of the value
    Matches(Regex),
    Custom(Box<dyn Fn(&str) -> bool>),
}

/// A check and the message reported when it fails
pub struct Rule {
    check: Check,
    message: String,
}

impl Rule {
    pub fn not_empty(message: &str) -> Self {
        Self {
            check: Check::NotEmpty,
            message: message.to_string(),
        }
    }

    pub fn matches(pattern: &str, message: &str) -> Result<Self, regex::Error> {
        Ok(Self {
            check: Check::Matches(anchored(pattern)?),
            message: message.to_string(),
        })
    }

    pub fn custom(check: impl Fn(&str) -> bool + 'static, message: &str) -> Self {
        Self {
            check: Check::Custom(Box::new(check)),
            message: message.to_string(),
        }
    }

    pub fn passes(&self, value: &str) -> bool {
        match &self.check {
            Check::NotEmpty => Validator::is_not_empty(value),
            Check::Matches(regex) => regex.is_match(value),
            Check::Custom(check) => check(value),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

fn anchored(pattern: &str) -> Result<Regex, regex::Error> {
    Regex::new(&format!("^(?:{})", pattern))
}

pub struct Validator;

impl Validator {
    pub fn is_not_empty(value: &str) -> bool {
        !value.trim().is_empty()
    }

    /// Whether `pattern` matches at the start of `value`
    ///
    /// An invalid pattern never matches.
    pub fn matches_regex(value: &str, pattern: &str) -> bool {
        match anchored(pattern) {
            Ok(regex) => regex.is_match(value),
            Err(e) => {
                warn!(pattern, error = %e, "Invalid validation pattern");
                false
            }
        }
    }

    /// Field name → message of the first failing rule
    ///
    /// Fields missing from `fields` validate as empty strings.
    pub fn validate(
        fields: &BTreeMap<String, String>,
        rules: &[(&str, Vec<Rule>)],
    ) -> BTreeMap<String, String> {
        let mut errors = BTreeMap::new();
        for (field, field_rules) in rules {
            let value = fields.get(*field).map(String::as_str).unwrap_or("");
            if let Some(failed) = field_rules.iter().find(|rule| !rule.passes(value)) {
                errors.insert(field.to_string(), failed.message.clone());
            }
        }
        errors
    }

    /// Current values of the named widgets, as text
    pub fn collect(gui: &Gui, names: &[&str]) -> BTreeMap<String, String> {
        names
            .iter()
            .filter_map(|name| {
                gui.get_value(name)
                    .map(|value| (name.to_string(), value.to_text()))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_checks() {
        assert!(Validator::is_not_empty(" a "));
        assert!(!Validator::is_not_empty("  \t"));
        assert!(Validator::matches_regex("abc123", r"[a-z]+"));
        assert!(!Validator::matches_regex("123abc", r"[a-z]+"));
        assert!(!Validator::matches_regex("abc", r"("));
    }

    #[test]
    fn test_first_failing_rule_wins() {
        let fields = BTreeMap::from([
            ("email".to_string(), "nope".to_string()),
            ("name".to_string(), "Ann".to_string()),
        ]);
        let rules = vec![
            (
                "email",
                vec![
                    Rule::not_empty("Email is required"),
                    Rule::matches(r"[^@]+@[^@]+\.\w+", "Email is invalid").unwrap(),
                    Rule::custom(|v| v.len() < 3, "unreachable"),
                ],
            ),
            ("name", vec![Rule::not_empty("Name is required")]),
            ("age", vec![Rule::not_empty("Age is required")]),
        ];
        let errors = Validator::validate(&fields, &rules);
        assert_eq!(errors.len(), 2);
        assert_eq!(errors["email"], "Email is invalid");
        assert_eq!(errors["age"], "Age is required");
    }
}
