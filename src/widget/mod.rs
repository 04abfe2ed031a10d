//! Headless widget model
//!
//! Widgets are plain data nodes in a [`WidgetTree`]. Each node records what a
//! native backend needs to mirror it: kind, options, theme style, placement,
//! command slot, binding and the kind-specific state in [`WidgetData`].

pub mod composite;
pub mod options;
pub mod registry;
pub mod table;
pub mod text;
pub mod tree;

use std::fmt;

use crate::binding::{Binding, BindingKind};
use crate::command::CommandSlot;
use crate::error::ConstructionError;
use crate::layout::placement::Placement;
use crate::value::{Options, Value};

pub use composite::{Card, ColorPicker, InfoBox, Picture};
pub use registry::{WidgetClass, WidgetFactory, WidgetRegistry};
pub use table::{Column, Position, ScrollView, Table, TableError, TableItem};
pub use text::TextBuffer;
pub use tree::{NameRegistry, WidgetTree};

/// Arena index of a widget
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct WidgetId(pub usize);

impl fmt::Display for WidgetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Which widget set a class belongs to
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Family {
    /// Classic widgets, styled through their own options
    Classic,
    /// Themed widgets, styled through named styles
    Themed,
    /// Widgets composed from classic parts
    Composite,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum WidgetKind {
    Window,
    Label,
    Button,
    Entry,
    Text,
    Checkbutton,
    Radiobutton,
    Frame,
    LabelFrame,
    Scale,
    Spinbox,
    Listbox,
    Canvas,
    Combobox,
    Separator,
    Notebook,
    Treeview,
    Scrollbar,
    Card,
    InfoBox,
    Picture,
    ColorPicker,
}

impl WidgetKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            WidgetKind::Window => "Window",
            WidgetKind::Label => "Label",
            WidgetKind::Button => "Button",
            WidgetKind::Entry => "Entry",
            WidgetKind::Text => "Text",
            WidgetKind::Checkbutton => "Checkbutton",
            WidgetKind::Radiobutton => "Radiobutton",
            WidgetKind::Frame => "Frame",
            WidgetKind::LabelFrame => "LabelFrame",
            WidgetKind::Scale => "Scale",
            WidgetKind::Spinbox => "Spinbox",
            WidgetKind::Listbox => "Listbox",
            WidgetKind::Canvas => "Canvas",
            WidgetKind::Combobox => "Combobox",
            WidgetKind::Separator => "Separator",
            WidgetKind::Notebook => "Notebook",
            WidgetKind::Treeview => "Treeview",
            WidgetKind::Scrollbar => "Scrollbar",
            WidgetKind::Card => "Card",
            WidgetKind::InfoBox => "InfoBox",
            WidgetKind::Picture => "Picture",
            WidgetKind::ColorPicker => "ColorPicker",
        }
    }

    /// Kinds that hold other widgets placed by the layout
    pub fn is_container(&self) -> bool {
        matches!(self, WidgetKind::Frame | WidgetKind::LabelFrame)
    }

    /// Binding cell created automatically for this kind
    pub fn binding_kind(&self) -> Option<BindingKind> {
        match self {
            WidgetKind::Checkbutton => Some(BindingKind::Int),
            WidgetKind::Scale => Some(BindingKind::Float),
            WidgetKind::Entry | WidgetKind::Combobox | WidgetKind::Spinbox => {
                Some(BindingKind::Str)
            }
            _ => None,
        }
    }

    /// Option key popped to seed the automatic binding
    pub fn seed_key(&self) -> Option<&'static str> {
        match self {
            WidgetKind::Checkbutton | WidgetKind::Scale => Some("value"),
            WidgetKind::Entry | WidgetKind::Combobox | WidgetKind::Spinbox => Some("text"),
            _ => None,
        }
    }

    pub fn accepts_command(&self) -> bool {
        matches!(
            self,
            WidgetKind::Button
                | WidgetKind::Checkbutton
                | WidgetKind::Radiobutton
                | WidgetKind::Scale
                | WidgetKind::Spinbox
                | WidgetKind::ColorPicker
        )
    }

    /// Named style used by the themed family
    pub fn style_class(&self) -> Option<&'static str> {
        match self {
            WidgetKind::Button => Some("TButton"),
            WidgetKind::Checkbutton => Some("TCheckbutton"),
            WidgetKind::Radiobutton => Some("TRadiobutton"),
            WidgetKind::Entry => Some("TEntry"),
            WidgetKind::Scale => Some("TScale"),
            WidgetKind::Spinbox => Some("TSpinbox"),
            WidgetKind::Combobox => Some("TCombobox"),
            WidgetKind::Separator => Some("TSeparator"),
            WidgetKind::Notebook => Some("TNotebook"),
            WidgetKind::Treeview => Some("Treeview"),
            _ => None,
        }
    }
}

impl fmt::Display for WidgetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// List contents and selection
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ListState {
    pub items: Vec<String>,
    pub selection: Vec<usize>,
}

/// A notebook page
#[derive(Clone, Debug, PartialEq)]
pub struct NotebookTab {
    pub title: String,
    pub frame: WidgetId,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct NotebookState {
    pub tabs: Vec<NotebookTab>,
    pub selected: Option<usize>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Orient {
    Horizontal,
    Vertical,
}

impl Orient {
    /// Parse an `orient` option; anything but "horizontal" is vertical
    pub fn from_value(value: Option<&Value>) -> Self {
        match value.and_then(Value::as_str) {
            Some("horizontal") => Orient::Horizontal,
            _ => Orient::Vertical,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Orient::Horizontal => "horizontal",
            Orient::Vertical => "vertical",
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct ScrollbarState {
    pub orient: Orient,
    pub target: Option<WidgetId>,
    pub view: ScrollView,
}

/// Kind-specific widget state
#[derive(Clone, Debug, PartialEq)]
pub enum WidgetData {
    /// Everything lives in options or the binding
    Plain,
    Text(TextBuffer),
    List(ListState),
    /// Combobox candidates
    Choices(Vec<String>),
    Notebook(NotebookState),
    Table(Table),
    Scrollbar(ScrollbarState),
    Card(Card),
    InfoBox(InfoBox),
    Picture(Picture),
    ColorPicker(ColorPicker),
}

/// A realized widget
#[derive(Clone, Debug)]
pub struct Widget {
    pub id: WidgetId,
    pub kind: WidgetKind,
    pub family: Family,
    /// Type name as declared in the document
    pub type_name: String,
    pub name: Option<String>,
    pub parent: Option<WidgetId>,
    pub children: Vec<WidgetId>,
    /// Options given by the document or set at runtime
    pub options: Options,
    /// Options filled in by the theme; `options` take precedence
    pub style: Options,
    pub placement: Option<Placement>,
    pub command: Option<CommandSlot>,
    pub binding: Option<Binding>,
    pub data: WidgetData,
    /// Set on placeholders standing in for a widget that failed to build
    pub error: Option<String>,
}

impl Widget {
    pub fn new(kind: WidgetKind, family: Family, type_name: &str, data: WidgetData) -> Self {
        Self {
            id: WidgetId(0),
            kind,
            family,
            type_name: type_name.to_string(),
            name: None,
            parent: None,
            children: Vec::new(),
            options: Options::new(),
            style: Options::new(),
            placement: None,
            command: None,
            binding: None,
            data,
            error: None,
        }
    }

    /// Red label shown in place of a widget that could not be created
    pub fn placeholder(type_name: &str, error: &str) -> Self {
        let message = format!("Error creating {}: {}", type_name, error);
        let mut widget = Self::new(WidgetKind::Label, Family::Classic, type_name, WidgetData::Plain);
        widget.options.insert("text".to_string(), Value::from(message));
        widget.options.insert("fg".to_string(), Value::from("red"));
        widget.error = Some(error.to_string());
        widget
    }

    /// Effective option: explicit options win over theme style
    pub fn option(&self, key: &str) -> Option<&Value> {
        self.options.get(key).or_else(|| self.style.get(key))
    }

    pub fn is_placeholder(&self) -> bool {
        self.error.is_some()
    }

    pub fn is_disabled(&self) -> bool {
        matches!(
            self.option("state").and_then(Value::as_str),
            Some("disabled")
        )
    }

    /// Read the widget's value without going through its name
    ///
    /// Radio members share their group's cell, so they report nothing here;
    /// the group value is read through the group key.
    pub fn extract_value(&self) -> Option<Value> {
        if self.is_placeholder() {
            return None;
        }
        match (&self.kind, &self.data) {
            (WidgetKind::Radiobutton, _) => None,
            (_, WidgetData::Text(buffer)) => Some(Value::from(buffer.get())),
            (_, WidgetData::List(list)) => Some(Value::List(
                list.selection
                    .iter()
                    .filter_map(|&i| list.items.get(i))
                    .map(|item| Value::from(item.as_str()))
                    .collect(),
            )),
            (_, WidgetData::Table(table)) => Some(Value::from(table.selection().to_vec())),
            (_, WidgetData::ColorPicker(picker)) => Some(Value::from(picker.color())),
            _ => self.binding.as_ref().map(Binding::get),
        }
    }

    /// Apply a runtime option write
    ///
    /// Kind-specific keys update widget state; everything else is validated
    /// the same way construction options are and stored.
    pub fn apply_option(&mut self, key: &str, value: Value) -> Result<(), ConstructionError> {
        let bound_text = key == "text"
            && matches!(
                self.kind,
                WidgetKind::Entry | WidgetKind::Combobox | WidgetKind::Spinbox
            );
        let bound_value = key == "value" && self.kind != WidgetKind::Radiobutton;
        if (bound_text || bound_value) && self.binding.is_some() {
            return self.write_binding(key, value);
        }

        match (&mut self.data, key) {
            (WidgetData::Text(buffer), "text") => {
                buffer.set(&value.to_text());
                Ok(())
            }
            (WidgetData::Choices(choices), "values") => {
                *choices = value.to_string_list();
                Ok(())
            }
            (WidgetData::List(list), "items") => {
                list.items = value.to_string_list();
                list.selection.retain(|&i| i < list.items.len());
                Ok(())
            }
            (WidgetData::ColorPicker(picker), "color") => {
                let color = value.to_text();
                if picker.set_color(&color) {
                    Ok(())
                } else {
                    Err(ConstructionError::InvalidOption {
                        key: key.to_string(),
                        value: color,
                        expected: "#rgb or #rrggbb",
                    })
                }
            }
            _ => {
                options::validate_option(self.kind, self.family, key, &value)?;
                self.options.insert(key.to_string(), value);
                Ok(())
            }
        }
    }

    fn write_binding(&self, key: &str, value: Value) -> Result<(), ConstructionError> {
        let Some(binding) = &self.binding else {
            return Ok(());
        };
        let shown = value.to_string();
        binding
            .set(value)
            .map_err(|_| ConstructionError::InvalidOption {
                key: key.to_string(),
                value: shown,
                expected: binding.kind().as_str(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_tables() {
        assert_eq!(WidgetKind::Checkbutton.binding_kind(), Some(BindingKind::Int));
        assert_eq!(WidgetKind::Scale.seed_key(), Some("value"));
        assert_eq!(WidgetKind::Entry.seed_key(), Some("text"));
        assert!(WidgetKind::ColorPicker.accepts_command());
        assert!(!WidgetKind::Label.accepts_command());
        assert!(WidgetKind::LabelFrame.is_container());
        assert_eq!(WidgetKind::Treeview.style_class(), Some("Treeview"));
    }

    #[test]
    fn test_text_extraction_strips_one_newline() {
        let mut widget = Widget::new(
            WidgetKind::Text,
            Family::Classic,
            "Text",
            WidgetData::Text(TextBuffer::new()),
        );
        widget.apply_option("text", Value::from("line\n")).unwrap();
        assert_eq!(widget.extract_value(), Some(Value::from("line\n")));
    }

    #[test]
    fn test_list_extraction() {
        let widget = Widget::new(
            WidgetKind::Listbox,
            Family::Classic,
            "Listbox",
            WidgetData::List(ListState {
                items: vec!["a".into(), "b".into(), "c".into()],
                selection: vec![0, 2],
            }),
        );
        assert_eq!(widget.extract_value(), Some(Value::from(vec!["a", "c"])));
    }

    #[test]
    fn test_generic_option_is_validated() {
        let mut widget = Widget::new(WidgetKind::Label, Family::Classic, "Label", WidgetData::Plain);
        assert!(widget.apply_option("width", Value::from("wide")).is_err());
        assert!(widget.apply_option("width", Value::Int(20)).is_ok());
        assert_eq!(widget.option("width"), Some(&Value::Int(20)));
    }

    #[test]
    fn test_options_take_precedence_over_style() {
        let mut widget = Widget::placeholder("Bogus", "boom");
        widget.style.insert("fg".into(), Value::from("#000000"));
        assert_eq!(widget.option("fg"), Some(&Value::from("red")));
        assert_eq!(widget.extract_value(), None);
        assert_eq!(
            widget.option("text"),
            Some(&Value::from("Error creating Bogus: boom"))
        );
    }
}
