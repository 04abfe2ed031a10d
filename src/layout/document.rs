//! Layout documents
//!
//! Documents are generic over the command type `C`. Parsing yields
//! `LayoutDocument<String>` (commands as names); [`LayoutDocument::resolve`]
//! maps every name through a [`CommandResolver`] into a new
//! `LayoutDocument<CommandSlot>` that the builder consumes.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Deserializer};
use tracing::{debug, warn};

use crate::command::{CommandResolver, CommandSlot};
use crate::error::DocumentError;
use crate::layout::placement::Fill;
use crate::value::{Options, Value};

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// A parsed layout document
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(bound(deserialize = "C: Deserialize<'de>"))]
pub struct LayoutDocument<C = String> {
    #[serde(default)]
    pub rows: Option<Vec<Row<C>>>,
    #[serde(default)]
    pub grid: Option<Vec<GridItem<C>>>,
    #[serde(default)]
    pub menu: Option<Vec<MenuSpec<C>>>,
    /// Column index → stretch weight for the grid root
    #[serde(default, deserialize_with = "null_as_default")]
    pub column_weights: BTreeMap<String, Value>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub row_weights: BTreeMap<String, Value>,
}

impl<C> Default for LayoutDocument<C> {
    fn default() -> Self {
        Self {
            rows: None,
            grid: None,
            menu: None,
            column_weights: BTreeMap::new(),
            row_weights: BTreeMap::new(),
        }
    }
}

/// Which traversal a document selects
#[derive(Debug)]
pub enum LayoutMode<'a, C> {
    Rows(&'a [Row<C>]),
    Grid(&'a [GridItem<C>]),
    Empty,
}

/// One horizontal band of widgets
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(bound(deserialize = "C: Deserialize<'de>"))]
pub struct Row<C = String> {
    #[serde(default)]
    pub padding_y: Option<Value>,
    #[serde(default)]
    pub padding_x: Option<Value>,
    #[serde(default)]
    pub fill: Option<Fill>,
    #[serde(default)]
    pub expand: Option<bool>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub columns: Vec<ColumnItem<C>>,
}

/// An entry in a row: a widget or a radio group
#[derive(Debug, Clone, PartialEq)]
pub enum ColumnItem<C = String> {
    Widget(WidgetSpec<C>),
    Group(GroupSpec<C>),
}

/// Superset of the widget and group shapes, split after parsing
#[derive(Deserialize)]
#[serde(bound(deserialize = "C: Deserialize<'de>"))]
struct RawColumn<C> {
    #[serde(rename = "type", default)]
    widget_type: Option<String>,
    #[serde(default)]
    name: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    options: Options,
    #[serde(default)]
    command: Option<C>,
    #[serde(default)]
    pack_options: Option<Options>,
    #[serde(default)]
    group: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    columns: Vec<WidgetSpec<C>>,
}

impl<'de, C: Deserialize<'de>> Deserialize<'de> for ColumnItem<C> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = RawColumn::<C>::deserialize(deserializer)?;
        Ok(match raw.group {
            Some(group) => ColumnItem::Group(GroupSpec {
                group,
                pack_options: raw.pack_options,
                members: raw.columns,
            }),
            None => ColumnItem::Widget(WidgetSpec {
                widget_type: raw.widget_type,
                name: raw.name,
                options: raw.options,
                command: raw.command,
                pack_options: raw.pack_options,
                tabs: Vec::new(),
            }),
        })
    }
}

/// A single widget declaration
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(bound(deserialize = "C: Deserialize<'de>"))]
pub struct WidgetSpec<C = String> {
    #[serde(rename = "type", default)]
    pub widget_type: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub options: Options,
    #[serde(default)]
    pub command: Option<C>,
    #[serde(default)]
    pub pack_options: Option<Options>,
    /// Notebook pages, lifted out of `options.tabs` during resolution
    #[serde(skip)]
    pub tabs: Vec<TabSpec<C>>,
}

impl<C> WidgetSpec<C> {
    pub fn new(widget_type: &str) -> Self {
        Self {
            widget_type: Some(widget_type.to_string()),
            name: None,
            options: Options::new(),
            command: None,
            pack_options: None,
            tabs: Vec::new(),
        }
    }

    pub fn named(mut self, name: &str) -> Self {
        self.name = Some(name.to_string());
        self
    }

    pub fn option(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.options.insert(key.to_string(), value.into());
        self
    }

    pub fn command(mut self, command: C) -> Self {
        self.command = Some(command);
        self
    }
}

/// Radio buttons sharing one binding keyed by the group name
#[derive(Debug, Clone, PartialEq)]
pub struct GroupSpec<C = String> {
    pub group: String,
    pub pack_options: Option<Options>,
    pub members: Vec<WidgetSpec<C>>,
}

/// A notebook page
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(bound(deserialize = "C: Deserialize<'de>"))]
pub struct TabSpec<C = String> {
    #[serde(default = "default_tab_title")]
    pub title: String,
    #[serde(default)]
    pub layout: TabLayout<C>,
}

fn default_tab_title() -> String {
    "Tab".to_string()
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(bound(deserialize = "C: Deserialize<'de>"))]
pub struct TabLayout<C = String> {
    #[serde(default, deserialize_with = "null_as_default")]
    pub rows: Vec<Row<C>>,
}

impl<C> Default for TabLayout<C> {
    fn default() -> Self {
        Self { rows: Vec::new() }
    }
}

/// A widget placed in grid mode
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(bound(deserialize = "C: Deserialize<'de>"))]
pub struct GridItem<C = String> {
    #[serde(rename = "type", default)]
    pub widget_type: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub row: u32,
    #[serde(default)]
    pub column: u32,
    #[serde(default)]
    pub parent: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub options: Options,
    #[serde(default)]
    pub command: Option<C>,
    #[serde(default)]
    pub grid_options: Option<Options>,
    #[serde(skip)]
    pub tabs: Vec<TabSpec<C>>,
}

impl<C: Clone> GridItem<C> {
    /// The widget part of the item
    pub fn widget_spec(&self) -> WidgetSpec<C> {
        WidgetSpec {
            widget_type: self.widget_type.clone(),
            name: self.name.clone(),
            options: self.options.clone(),
            command: self.command.clone(),
            pack_options: None,
            tabs: self.tabs.clone(),
        }
    }
}

/// A top-level menu
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(bound(deserialize = "C: Deserialize<'de>"))]
pub struct MenuSpec<C = String> {
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub items: Vec<MenuItemSpec<C>>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged, bound(deserialize = "C: Deserialize<'de>"))]
pub enum MenuItemSpec<C = String> {
    /// Bare string; only "separator" is meaningful
    Marker(String),
    Command {
        #[serde(default)]
        label: Option<String>,
        #[serde(default)]
        command: Option<C>,
    },
}

impl LayoutDocument<String> {
    pub fn from_json_str(input: &str) -> Result<Self, DocumentError> {
        Ok(serde_json::from_str(input)?)
    }

    pub fn from_yaml_str(input: &str) -> Result<Self, DocumentError> {
        Ok(serde_yaml::from_str(input)?)
    }

    pub fn from_toml_str(input: &str) -> Result<Self, DocumentError> {
        Ok(toml::from_str(input)?)
    }

    /// Load a document, choosing the format by file extension
    pub fn load(path: &Path) -> Result<Self, DocumentError> {
        let content = fs::read_to_string(path)?;
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_lowercase)
            .unwrap_or_default();
        debug!(path = %path.display(), format = %extension, "loading layout document");
        match extension.as_str() {
            "json" => Self::from_json_str(&content),
            "yaml" | "yml" => Self::from_yaml_str(&content),
            "toml" => Self::from_toml_str(&content),
            other => Err(DocumentError::UnsupportedFormat(other.to_string())),
        }
    }

    /// Map every command name through `resolver`
    ///
    /// Notebook `tabs` are lifted out of the options and resolved too. The
    /// document itself is left untouched.
    pub fn resolve(&self, resolver: &dyn CommandResolver) -> LayoutDocument<CommandSlot> {
        LayoutDocument {
            rows: self
                .rows
                .as_ref()
                .map(|rows| rows.iter().map(|r| r.resolve(resolver)).collect()),
            grid: self
                .grid
                .as_ref()
                .map(|items| items.iter().map(|i| i.resolve(resolver)).collect()),
            menu: self
                .menu
                .as_ref()
                .map(|menus| menus.iter().map(|m| m.resolve(resolver)).collect()),
            column_weights: self.column_weights.clone(),
            row_weights: self.row_weights.clone(),
        }
    }
}

impl<C> LayoutDocument<C> {
    /// Grid wins when both `grid` and `rows` are present
    pub fn mode(&self) -> LayoutMode<'_, C> {
        match (&self.grid, &self.rows) {
            (Some(grid), _) => LayoutMode::Grid(grid),
            (None, Some(rows)) => LayoutMode::Rows(rows),
            (None, None) => LayoutMode::Empty,
        }
    }

    /// The same document without its menu
    pub fn without_menu(&self) -> (LayoutDocument<C>, Option<Vec<MenuSpec<C>>>)
    where
        C: Clone,
    {
        let mut layout = self.clone();
        let menu = layout.menu.take();
        (layout, menu)
    }
}

/// Pull `tabs` out of an option bag
fn lift_tabs(options: &Options, resolver: &dyn CommandResolver) -> (Options, Vec<TabSpec<CommandSlot>>) {
    let mut options = options.clone();
    let Some(raw) = options.remove("tabs") else {
        return (options, Vec::new());
    };
    let parsed = serde_json::to_value(&raw)
        .and_then(serde_json::from_value::<Vec<TabSpec<String>>>);
    let tabs = match parsed {
        Ok(tabs) => tabs.iter().map(|t| t.resolve(resolver)).collect(),
        Err(e) => {
            warn!(error = %e, "ignoring malformed notebook tabs");
            Vec::new()
        }
    };
    (options, tabs)
}

impl Row<String> {
    fn resolve(&self, resolver: &dyn CommandResolver) -> Row<CommandSlot> {
        Row {
            padding_y: self.padding_y.clone(),
            padding_x: self.padding_x.clone(),
            fill: self.fill,
            expand: self.expand,
            columns: self.columns.iter().map(|c| c.resolve(resolver)).collect(),
        }
    }
}

impl ColumnItem<String> {
    fn resolve(&self, resolver: &dyn CommandResolver) -> ColumnItem<CommandSlot> {
        match self {
            ColumnItem::Widget(spec) => ColumnItem::Widget(spec.resolve(resolver)),
            ColumnItem::Group(group) => ColumnItem::Group(GroupSpec {
                group: group.group.clone(),
                pack_options: group.pack_options.clone(),
                members: group.members.iter().map(|m| m.resolve(resolver)).collect(),
            }),
        }
    }
}

impl WidgetSpec<String> {
    fn resolve(&self, resolver: &dyn CommandResolver) -> WidgetSpec<CommandSlot> {
        let (options, mut tabs) = lift_tabs(&self.options, resolver);
        tabs.extend(self.tabs.iter().map(|t| t.resolve(resolver)));
        WidgetSpec {
            widget_type: self.widget_type.clone(),
            name: self.name.clone(),
            options,
            command: self.command.as_deref().map(|c| resolver.resolve(c)),
            pack_options: self.pack_options.clone(),
            tabs,
        }
    }
}

impl TabSpec<String> {
    fn resolve(&self, resolver: &dyn CommandResolver) -> TabSpec<CommandSlot> {
        TabSpec {
            title: self.title.clone(),
            layout: TabLayout {
                rows: self.layout.rows.iter().map(|r| r.resolve(resolver)).collect(),
            },
        }
    }
}

impl GridItem<String> {
    fn resolve(&self, resolver: &dyn CommandResolver) -> GridItem<CommandSlot> {
        let (options, mut tabs) = lift_tabs(&self.options, resolver);
        tabs.extend(self.tabs.iter().map(|t| t.resolve(resolver)));
        GridItem {
            widget_type: self.widget_type.clone(),
            name: self.name.clone(),
            row: self.row,
            column: self.column,
            parent: self.parent.clone(),
            options,
            command: self.command.as_deref().map(|c| resolver.resolve(c)),
            grid_options: self.grid_options.clone(),
            tabs,
        }
    }
}

impl MenuSpec<String> {
    fn resolve(&self, resolver: &dyn CommandResolver) -> MenuSpec<CommandSlot> {
        MenuSpec {
            label: self.label.clone(),
            items: self
                .items
                .iter()
                .map(|item| match item {
                    MenuItemSpec::Marker(marker) => MenuItemSpec::Marker(marker.clone()),
                    MenuItemSpec::Command { label, command } => MenuItemSpec::Command {
                        label: label.clone(),
                        command: command.as_deref().map(|c| resolver.resolve(c)),
                    },
                })
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::CommandTable;

    const YAML: &str = r#"
rows:
  - columns:
      - type: Entry
        name: user
      - type: Button
        name: go
        command: submit
        options:
          text: Go
  - padding_y: 10
    fill: both
    expand: true
    columns:
      - group: choice
        columns:
          - type: Radiobutton
            name: a
            options: {text: A, value: a, selected: true}
          - type: Radiobutton
            name: b
            options: {text: B, value: b}
menu:
  - label: File
    items:
      - {label: Quit, command: quit}
      - separator
"#;

    #[test]
    fn test_parse_yaml_rows_and_groups() {
        let doc = LayoutDocument::from_yaml_str(YAML).unwrap();
        let rows = match doc.mode() {
            LayoutMode::Rows(rows) => rows,
            other => panic!("unexpected mode {:?}", other),
        };
        assert_eq!(rows.len(), 2);
        match &rows[0].columns[1] {
            ColumnItem::Widget(spec) => {
                assert_eq!(spec.widget_type.as_deref(), Some("Button"));
                assert_eq!(spec.command.as_deref(), Some("submit"));
            }
            other => panic!("expected widget, got {:?}", other),
        }
        assert_eq!(rows[1].fill, Some(Fill::Both));
        match &rows[1].columns[0] {
            ColumnItem::Group(group) => {
                assert_eq!(group.group, "choice");
                assert_eq!(group.members.len(), 2);
            }
            other => panic!("expected group, got {:?}", other),
        }
        let menu = doc.menu.as_ref().unwrap();
        assert_eq!(menu[0].items[1], MenuItemSpec::Marker("separator".into()));
    }

    #[test]
    fn test_parse_json_grid() {
        let doc = LayoutDocument::from_json_str(
            r#"{"grid": [{"type": "Button", "name": "b", "row": 1, "column": 2, "parent": "side"}],
                "column_weights": {"0": 1}}"#,
        )
        .unwrap();
        match doc.mode() {
            LayoutMode::Grid(items) => {
                assert_eq!(items[0].row, 1);
                assert_eq!(items[0].parent.as_deref(), Some("side"));
            }
            other => panic!("unexpected mode {:?}", other),
        }
        assert_eq!(doc.column_weights["0"], Value::Int(1));
    }

    #[test]
    fn test_parse_toml() {
        let doc = LayoutDocument::from_toml_str(
            r#"
            [[rows]]
            [[rows.columns]]
            type = "Label"
            options = { text = "hi" }
            "#,
        )
        .unwrap();
        assert_eq!(doc.rows.unwrap()[0].columns.len(), 1);
    }

    #[test]
    fn test_grid_wins_over_rows() {
        let doc = LayoutDocument::from_json_str(r#"{"rows": [], "grid": []}"#).unwrap();
        assert!(matches!(doc.mode(), LayoutMode::Grid(_)));
        let empty = LayoutDocument::from_json_str("{}").unwrap();
        assert!(matches!(empty.mode(), LayoutMode::Empty));
    }

    #[test]
    fn test_null_options_and_columns() {
        let doc = LayoutDocument::from_yaml_str("rows:\n  - columns:\n      - type: Label\n        options:\n").unwrap();
        match &doc.rows.unwrap()[0].columns[0] {
            ColumnItem::Widget(spec) => assert!(spec.options.is_empty()),
            other => panic!("expected widget, got {:?}", other),
        }
    }

    #[test]
    fn test_resolve_is_pure_and_lifts_tabs() {
        let doc = LayoutDocument::from_json_str(
            r#"{"rows": [{"columns": [{"type": "Notebook", "name": "nb", "options": {"tabs": [
                {"title": "One", "layout": {"rows": [{"columns": [
                    {"type": "Button", "command": "missing"}]}]}},
                {"layout": {}}
            ]}}]}]}"#,
        )
        .unwrap();
        let table: CommandTable<()> = CommandTable::new().with("submit", |_| {});
        let resolved = doc.resolve(&table);

        let LayoutMode::Rows(rows) = resolved.mode() else {
            panic!("expected rows");
        };
        let ColumnItem::Widget(notebook) = &rows[0].columns[0] else {
            panic!("expected widget");
        };
        assert!(!notebook.options.contains_key("tabs"));
        assert_eq!(notebook.tabs.len(), 2);
        assert_eq!(notebook.tabs[1].title, "Tab");
        let ColumnItem::Widget(button) = &notebook.tabs[0].layout.rows[0].columns[0] else {
            panic!("expected widget");
        };
        assert!(button.command.as_ref().unwrap().is_inert());

        // The raw document still has its tabs
        let LayoutMode::Rows(raw_rows) = doc.mode() else {
            panic!("expected rows");
        };
        let ColumnItem::Widget(raw) = &raw_rows[0].columns[0] else {
            panic!("expected widget");
        };
        assert!(raw.options.contains_key("tabs"));
    }

    #[test]
    fn test_load_by_extension() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("layout.yaml");
        std::fs::write(&path, YAML).unwrap();
        assert!(LayoutDocument::load(&path).is_ok());

        let bad = dir.path().join("layout.txt");
        std::fs::write(&bad, "").unwrap();
        assert!(matches!(
            LayoutDocument::load(&bad),
            Err(DocumentError::UnsupportedFormat(_))
        ));
    }
}
