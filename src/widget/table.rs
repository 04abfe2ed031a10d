//! Table (tree view) model: columns, hierarchical rows, selection, scrolling

use std::collections::HashMap;

use thiserror::Error;

use crate::error::ConstructionError;
use crate::value::{Options, Value};
use crate::widget::WidgetId;

const DEFAULT_COLUMN_WIDTH: u32 = 100;
const DEFAULT_TREE_WIDTH: u32 = 150;
const DEFAULT_VISIBLE_ROWS: usize = 10;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum TableError {
    #[error("Item {0} already exists")]
    DuplicateId(String),
    #[error("Item {0} not found")]
    UnknownItem(String),
}

/// Where to insert among the parent's children
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Position {
    #[default]
    End,
    Index(usize),
}

#[derive(Clone, Debug, PartialEq)]
pub struct Column {
    pub id: String,
    pub heading: String,
    pub width: u32,
    pub anchor: String,
    pub stretch: bool,
}

/// A row
#[derive(Clone, Debug, PartialEq)]
pub struct TableItem {
    pub id: String,
    pub text: String,
    pub values: Vec<Value>,
    pub tags: Vec<String>,
    /// Parent item id, empty for top-level rows
    pub parent: String,
    pub children: Vec<String>,
    pub open: bool,
}

/// Visible window of a scrollable area, as fractions of the total extent
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScrollView {
    pub first: f64,
    pub last: f64,
}

impl Default for ScrollView {
    fn default() -> Self {
        Self {
            first: 0.0,
            last: 1.0,
        }
    }
}

impl ScrollView {
    pub fn span(&self) -> f64 {
        self.last - self.first
    }

    /// Scroll so the window starts at `fraction`, keeping its span
    ///
    /// Non-finite fractions leave the view where it is.
    pub fn moveto(&mut self, fraction: f64) {
        if !fraction.is_finite() {
            return;
        }
        let span = self.span();
        self.first = fraction.clamp(0.0, 1.0 - span);
        self.last = self.first + span;
    }

    /// Change the span, keeping the start where possible
    fn resize(&mut self, span: f64) {
        let span = span.clamp(0.0, 1.0);
        self.first = self.first.clamp(0.0, 1.0 - span);
        self.last = self.first + span;
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Table {
    tree_column: Column,
    columns: Vec<Column>,
    show_tree: bool,
    show_headings: bool,
    items: HashMap<String, TableItem>,
    roots: Vec<String>,
    selection: Vec<String>,
    next_id: u32,
    visible_rows: usize,
    pub xview: ScrollView,
    pub yview: ScrollView,
    /// Scrollbars following the views
    pub xscroll: Option<WidgetId>,
    pub yscroll: Option<WidgetId>,
}

fn invalid(key: &str, value: &Value, expected: &'static str) -> ConstructionError {
    ConstructionError::InvalidOption {
        key: key.to_string(),
        value: value.to_string(),
        expected,
    }
}

/// Read a `{column_id: value}` option
fn column_map(options: &mut Options, key: &str) -> Result<HashMap<String, Value>, ConstructionError> {
    match options.remove(key) {
        None | Some(Value::Null) => Ok(HashMap::new()),
        Some(Value::Map(map)) => Ok(map.into_iter().collect()),
        Some(other) => Err(invalid(key, &other, "a mapping of column id to value")),
    }
}

fn width_of(widths: &HashMap<String, Value>, id: &str, default: u32) -> Result<u32, ConstructionError> {
    match widths.get(id) {
        None => Ok(default),
        Some(value) => value
            .as_i64()
            .filter(|w| *w >= 0)
            .map(|w| w as u32)
            .ok_or_else(|| invalid("widths", value, "a non-negative integer width")),
    }
}

fn anchor_of(anchors: &HashMap<String, Value>, id: &str) -> String {
    anchors
        .get(id)
        .map(Value::to_text)
        .unwrap_or_else(|| "w".to_string())
}

fn capitalize(id: &str) -> String {
    let mut chars = id.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}

impl Table {
    /// Build from widget options, consuming `columns`, `headings`, `widths`,
    /// `anchors` and `show`
    pub fn from_options(options: &mut Options) -> Result<Self, ConstructionError> {
        let column_ids = match options.remove("columns") {
            None | Some(Value::Null) => Vec::new(),
            Some(Value::List(ids)) => ids.iter().map(Value::to_text).collect(),
            Some(other) => return Err(invalid("columns", &other, "a list of column ids")),
        };
        let headings = match options.remove("headings") {
            None | Some(Value::Null) => Vec::new(),
            Some(Value::List(h)) => h.iter().map(Value::to_text).collect(),
            Some(other) => return Err(invalid("headings", &other, "a list of headings")),
        };
        let widths = column_map(options, "widths")?;
        let anchors = column_map(options, "anchors")?;
        let show: Vec<String> = match options.remove("show") {
            None => vec!["tree".to_string(), "headings".to_string()],
            Some(Value::Str(s)) => s.split_whitespace().map(str::to_string).collect(),
            Some(value @ Value::List(_)) => value.to_string_list(),
            Some(other) => return Err(invalid("show", &other, "'tree', 'headings' or both")),
        };
        let show_tree = show.iter().any(|s| s == "tree");
        let show_headings = show.iter().any(|s| s == "headings");

        let tree_column = if show_tree {
            Column {
                id: "#0".to_string(),
                heading: headings.first().cloned().unwrap_or_else(|| "Tree".to_string()),
                width: width_of(&widths, "#0", DEFAULT_TREE_WIDTH)?,
                anchor: anchor_of(&anchors, "#0"),
                stretch: true,
            }
        } else {
            Column {
                id: "#0".to_string(),
                heading: String::new(),
                width: 0,
                anchor: "w".to_string(),
                stretch: false,
            }
        };

        let offset = usize::from(show_tree);
        let mut columns = Vec::with_capacity(column_ids.len());
        for (i, id) in column_ids.iter().enumerate() {
            columns.push(Column {
                heading: headings
                    .get(i + offset)
                    .cloned()
                    .unwrap_or_else(|| capitalize(id)),
                width: width_of(&widths, id, DEFAULT_COLUMN_WIDTH)?,
                anchor: anchor_of(&anchors, id),
                stretch: true,
                id: id.clone(),
            });
        }

        let visible_rows = options
            .get("height")
            .and_then(Value::as_i64)
            .filter(|h| *h > 0)
            .map(|h| h as usize)
            .unwrap_or(DEFAULT_VISIBLE_ROWS);

        Ok(Self {
            tree_column,
            columns,
            show_tree,
            show_headings,
            items: HashMap::new(),
            roots: Vec::new(),
            selection: Vec::new(),
            next_id: 1,
            visible_rows,
            xview: ScrollView::default(),
            yview: ScrollView::default(),
            xscroll: None,
            yscroll: None,
        })
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// The hierarchical `#0` column
    pub fn tree_column(&self) -> &Column {
        &self.tree_column
    }

    pub fn shows_tree(&self) -> bool {
        self.show_tree
    }

    pub fn shows_headings(&self) -> bool {
        self.show_headings
    }

    /// Insert a row under `parent` ("" for top level) and return its id
    pub fn insert(
        &mut self,
        parent: &str,
        position: Position,
        id: Option<&str>,
        text: &str,
        values: Vec<Value>,
        tags: Vec<String>,
    ) -> Result<String, TableError> {
        if !parent.is_empty() && !self.items.contains_key(parent) {
            return Err(TableError::UnknownItem(parent.to_string()));
        }
        let id = match id {
            Some(id) if self.items.contains_key(id) => {
                return Err(TableError::DuplicateId(id.to_string()))
            }
            Some(id) => id.to_string(),
            None => self.generate_id(),
        };

        let siblings = if parent.is_empty() {
            &mut self.roots
        } else {
            match self.items.get_mut(parent) {
                Some(item) => &mut item.children,
                None => return Err(TableError::UnknownItem(parent.to_string())),
            }
        };
        match position {
            Position::Index(i) if i < siblings.len() => siblings.insert(i, id.clone()),
            _ => siblings.push(id.clone()),
        }

        self.items.insert(
            id.clone(),
            TableItem {
                id: id.clone(),
                text: text.to_string(),
                values,
                tags,
                parent: parent.to_string(),
                children: Vec::new(),
                open: false,
            },
        );
        self.refresh_view();
        Ok(id)
    }

    fn generate_id(&mut self) -> String {
        loop {
            let candidate = format!("I{:03X}", self.next_id);
            self.next_id += 1;
            if !self.items.contains_key(&candidate) {
                return candidate;
            }
        }
    }

    /// Remove a row and all its descendants
    pub fn delete(&mut self, id: &str) -> Result<(), TableError> {
        let item = self
            .items
            .remove(id)
            .ok_or_else(|| TableError::UnknownItem(id.to_string()))?;

        if item.parent.is_empty() {
            self.roots.retain(|r| r != id);
        } else if let Some(parent) = self.items.get_mut(&item.parent) {
            parent.children.retain(|c| c != id);
        }

        let mut pending = item.children;
        while let Some(child) = pending.pop() {
            if let Some(removed) = self.items.remove(&child) {
                pending.extend(removed.children);
            }
        }
        let items = &self.items;
        self.selection.retain(|s| items.contains_key(s));
        self.refresh_view();
        Ok(())
    }

    /// Remove every row
    pub fn clear(&mut self) {
        self.items.clear();
        self.roots.clear();
        self.selection.clear();
        self.refresh_view();
    }

    pub fn item(&self, id: &str) -> Option<&TableItem> {
        self.items.get(id)
    }

    pub fn exists(&self, id: &str) -> bool {
        self.items.contains_key(id)
    }

    /// Children of `parent`, "" for top-level rows
    pub fn children(&self, parent: &str) -> &[String] {
        if parent.is_empty() {
            &self.roots
        } else {
            self.items
                .get(parent)
                .map(|item| item.children.as_slice())
                .unwrap_or(&[])
        }
    }

    /// Total number of rows at every depth
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Replace the selection; every id must exist
    pub fn select(&mut self, ids: &[String]) -> Result<(), TableError> {
        if let Some(missing) = ids.iter().find(|id| !self.items.contains_key(*id)) {
            return Err(TableError::UnknownItem(missing.clone()));
        }
        self.selection = ids.to_vec();
        Ok(())
    }

    pub fn selection(&self) -> &[String] {
        &self.selection
    }

    /// Resize the vertical window after the row count changed
    fn refresh_view(&mut self) {
        let total = self.items.len();
        let span = if total <= self.visible_rows {
            1.0
        } else {
            self.visible_rows as f64 / total as f64
        };
        self.yview.resize(span);
    }
}
