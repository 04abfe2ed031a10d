//! Widget type name → widget class

use std::collections::HashMap;

use tracing::debug;

use crate::error::ConstructionError;
use crate::value::Options;
use crate::widget::composite::{Card, ColorPicker, InfoBox, Picture};
use crate::widget::table::Table;
use crate::widget::text::TextBuffer;
use crate::widget::{
    Family, ListState, NotebookState, Orient, ScrollbarState, WidgetData, WidgetKind,
};

/// Namespace prefix of the themed widget set
pub const THEMED_PREFIX: &str = "ttk.";

/// Factory function type for creating widget state
///
/// Factories consume the option keys they interpret; whatever remains is
/// stored on the widget as plain options.
pub type WidgetFactory = fn(&mut Options) -> Result<WidgetData, ConstructionError>;

/// A constructible widget class
#[derive(Clone, Copy, Debug)]
pub struct WidgetClass {
    pub kind: WidgetKind,
    pub family: Family,
    pub factory: WidgetFactory,
}

impl WidgetClass {
    pub fn new(kind: WidgetKind, family: Family, factory: WidgetFactory) -> Self {
        Self {
            kind,
            family,
            factory,
        }
    }
}

fn plain(_: &mut Options) -> Result<WidgetData, ConstructionError> {
    Ok(WidgetData::Plain)
}

fn text(_: &mut Options) -> Result<WidgetData, ConstructionError> {
    Ok(WidgetData::Text(TextBuffer::new()))
}

fn listbox(options: &mut Options) -> Result<WidgetData, ConstructionError> {
    let items = options
        .remove("items")
        .map(|v| v.to_string_list())
        .unwrap_or_default();
    Ok(WidgetData::List(ListState {
        items,
        selection: Vec::new(),
    }))
}

fn combobox(options: &mut Options) -> Result<WidgetData, ConstructionError> {
    let values = options
        .remove("values")
        .map(|v| v.to_string_list())
        .unwrap_or_default();
    Ok(WidgetData::Choices(values))
}

fn notebook(_: &mut Options) -> Result<WidgetData, ConstructionError> {
    Ok(WidgetData::Notebook(NotebookState::default()))
}

fn treeview(options: &mut Options) -> Result<WidgetData, ConstructionError> {
    Table::from_options(options).map(WidgetData::Table)
}

fn scrollbar(options: &mut Options) -> Result<WidgetData, ConstructionError> {
    Ok(WidgetData::Scrollbar(ScrollbarState {
        orient: Orient::from_value(options.get("orient")),
        target: None,
        view: Default::default(),
    }))
}

fn card(options: &mut Options) -> Result<WidgetData, ConstructionError> {
    Ok(WidgetData::Card(Card::from_options(options)))
}

fn infobox(options: &mut Options) -> Result<WidgetData, ConstructionError> {
    Ok(WidgetData::InfoBox(InfoBox::from_options(options)))
}

fn picture(options: &mut Options) -> Result<WidgetData, ConstructionError> {
    Picture::from_options(options).map(WidgetData::Picture)
}

fn color_picker(options: &mut Options) -> Result<WidgetData, ConstructionError> {
    Ok(WidgetData::ColorPicker(ColorPicker::from_options(options)))
}

/// Registry of widget classes
#[derive(Debug, Clone)]
pub struct WidgetRegistry {
    classes: HashMap<String, WidgetClass>,
}

impl Default for WidgetRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl WidgetRegistry {
    /// Create a new registry with the built-in widget classes
    pub fn new() -> Self {
        let mut registry = Self::empty();

        use Family::{Classic, Composite, Themed};
        use WidgetKind as K;

        // Classic widgets
        registry.register("Label", WidgetClass::new(K::Label, Classic, plain));
        registry.register("Entry", WidgetClass::new(K::Entry, Classic, plain));
        registry.register("Button", WidgetClass::new(K::Button, Classic, plain));
        registry.register("Checkbutton", WidgetClass::new(K::Checkbutton, Classic, plain));
        registry.register("Radiobutton", WidgetClass::new(K::Radiobutton, Classic, plain));
        registry.register("Text", WidgetClass::new(K::Text, Classic, text));
        registry.register("Frame", WidgetClass::new(K::Frame, Classic, plain));
        registry.register("LabelFrame", WidgetClass::new(K::LabelFrame, Classic, plain));
        registry.register("Scale", WidgetClass::new(K::Scale, Classic, plain));
        registry.register("Spinbox", WidgetClass::new(K::Spinbox, Classic, plain));
        registry.register("Listbox", WidgetClass::new(K::Listbox, Classic, listbox));
        registry.register("Canvas", WidgetClass::new(K::Canvas, Classic, plain));
        registry.register("Scrollbar", WidgetClass::new(K::Scrollbar, Classic, scrollbar));

        // Themed widgets; bare names fall back to these through the prefix
        registry.register("ttk.Button", WidgetClass::new(K::Button, Themed, plain));
        registry.register("ttk.Checkbutton", WidgetClass::new(K::Checkbutton, Themed, plain));
        registry.register("ttk.Radiobutton", WidgetClass::new(K::Radiobutton, Themed, plain));
        registry.register("ttk.Entry", WidgetClass::new(K::Entry, Themed, plain));
        registry.register("ttk.Scale", WidgetClass::new(K::Scale, Themed, plain));
        registry.register("ttk.Spinbox", WidgetClass::new(K::Spinbox, Themed, plain));
        registry.register("ttk.Combobox", WidgetClass::new(K::Combobox, Themed, combobox));
        registry.register("ttk.Separator", WidgetClass::new(K::Separator, Themed, plain));
        registry.register("ttk.Notebook", WidgetClass::new(K::Notebook, Themed, notebook));
        registry.register("ttk.Treeview", WidgetClass::new(K::Treeview, Themed, treeview));
        registry.register("ttk.Scrollbar", WidgetClass::new(K::Scrollbar, Themed, scrollbar));

        // Composites
        registry.register("Card", WidgetClass::new(K::Card, Composite, card));
        registry.register("InfoBox", WidgetClass::new(K::InfoBox, Composite, infobox));
        registry.register("Picture", WidgetClass::new(K::Picture, Composite, picture));
        registry.register("ColorPicker", WidgetClass::new(K::ColorPicker, Composite, color_picker));

        registry
    }

    /// Registry without any classes
    pub fn empty() -> Self {
        Self {
            classes: HashMap::new(),
        }
    }

    /// Register a widget class under a type name
    pub fn register(&mut self, type_name: &str, class: WidgetClass) {
        self.classes.insert(type_name.to_string(), class);
    }

    /// Resolve a type name, retrying with the themed prefix
    pub fn resolve(&self, type_name: &str) -> Option<WidgetClass> {
        if let Some(class) = self.classes.get(type_name) {
            return Some(*class);
        }
        if type_name.starts_with(THEMED_PREFIX) {
            return None;
        }
        let prefixed = format!("{}{}", THEMED_PREFIX, type_name);
        let class = self.classes.get(&prefixed).copied();
        if class.is_some() {
            debug!(widget_type = type_name, resolved = %prefixed, "resolved through themed prefix");
        }
        class
    }

    pub fn contains(&self, type_name: &str) -> bool {
        self.resolve(type_name).is_some()
    }

    /// Registered type names, sorted
    pub fn type_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.classes.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::Value;

    #[test]
    fn test_builtin_classes() {
        let registry = WidgetRegistry::new();
        let label = registry.resolve("Label").unwrap();
        assert_eq!(label.kind, WidgetKind::Label);
        assert_eq!(label.family, Family::Classic);

        let button = registry.resolve("ttk.Button").unwrap();
        assert_eq!(button.family, Family::Themed);
    }

    #[test]
    fn test_prefix_fallback() {
        let registry = WidgetRegistry::new();
        let combo = registry.resolve("Combobox").unwrap();
        assert_eq!(combo.kind, WidgetKind::Combobox);
        assert_eq!(combo.family, Family::Themed);
        assert_eq!(registry.resolve("Treeview").unwrap().kind, WidgetKind::Treeview);

        // Classic name wins over the themed one
        assert_eq!(registry.resolve("Button").unwrap().family, Family::Classic);

        assert!(registry.resolve("Bogus").is_none());
        assert!(registry.resolve("ttk.Bogus").is_none());
    }

    #[test]
    fn test_custom_registration() {
        let mut registry = WidgetRegistry::empty();
        assert!(!registry.contains("Label"));
        registry.register("Badge", WidgetClass::new(WidgetKind::Label, Family::Classic, plain));
        assert!(registry.contains("Badge"));
        assert_eq!(registry.type_names(), vec!["Badge"]);
    }

    #[test]
    fn test_factories_consume_their_keys() {
        let registry = WidgetRegistry::new();
        let mut options = Options::new();
        options.insert("values".into(), Value::from(vec!["a", "b"]));
        options.insert("width".into(), Value::Int(10));
        let class = registry.resolve("Combobox").unwrap();
        let data = (class.factory)(&mut options).unwrap();
        assert_eq!(data, WidgetData::Choices(vec!["a".into(), "b".into()]));
        assert_eq!(options.len(), 1);
    }
}
