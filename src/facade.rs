//! Uniform widget facade
//!
//! [`Gui`] owns the widget tree together with the name registry, binding
//! store, widget classes and theme. Callers address widgets by declared name;
//! lookups that miss are logged and come back as `None` or a no-op.

use tracing::{debug, error, info, warn};

use crate::binding::{Binding, BindingStore};
use crate::command::CommandSlot;
use crate::layout::builder::{BuildReport, LayoutBuilder};
use crate::layout::document::LayoutDocument;
use crate::theme::{widget_style, ThemeSettings};
use crate::value::Value;
use crate::widget::{
    NameRegistry, Orient, Position, Table, TableItem, Widget, WidgetData, WidgetId, WidgetKind,
    WidgetRegistry, WidgetTree,
};

pub struct Gui {
    title: String,
    tree: WidgetTree,
    names: NameRegistry,
    bindings: BindingStore,
    registry: WidgetRegistry,
    theme: ThemeSettings,
    built: bool,
}

impl Default for Gui {
    fn default() -> Self {
        Self::new("SimpleGUI", ThemeSettings::default())
    }
}

impl Gui {
    pub fn new(title: &str, theme: ThemeSettings) -> Self {
        let mut gui = Self {
            title: title.to_string(),
            tree: WidgetTree::new(),
            names: NameRegistry::new(),
            bindings: BindingStore::new(),
            registry: WidgetRegistry::new(),
            theme,
            built: false,
        };
        gui.init_root();
        gui
    }

    fn init_root(&mut self) {
        let root = self.tree.root();
        let style = self.tree.get(root).map(|w| widget_style(&self.theme, w));
        if let Some(window) = self.tree.get_mut(root) {
            window
                .options
                .insert("title".to_string(), Value::from(self.title.as_str()));
            window.style = style.unwrap_or_default();
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    /// Widget classes; register extra classes before building
    pub fn registry_mut(&mut self) -> &mut WidgetRegistry {
        &mut self.registry
    }

    pub fn theme(&self) -> &ThemeSettings {
        &self.theme
    }

    pub fn tree(&self) -> &WidgetTree {
        &self.tree
    }

    pub fn names(&self) -> &NameRegistry {
        &self.names
    }

    pub fn bindings(&self) -> &BindingStore {
        &self.bindings
    }

    pub fn is_built(&self) -> bool {
        self.built
    }

    /// Build a resolved document
    ///
    /// Building again starts from an empty tree, so the result depends only
    /// on the document.
    pub fn build(&mut self, document: &LayoutDocument<CommandSlot>) -> BuildReport {
        if self.built {
            info!("Rebuilding layout from scratch");
            self.tree = WidgetTree::new();
            self.names = NameRegistry::new();
            self.bindings = BindingStore::new();
            self.init_root();
        }
        let report = LayoutBuilder::new(
            &mut self.tree,
            &mut self.names,
            &mut self.bindings,
            &self.registry,
            &self.theme,
        )
        .build(document);
        self.built = true;
        report
    }

    /// Swap the theme and restyle every widget
    pub fn set_theme(&mut self, theme: ThemeSettings) {
        self.theme = theme;
        for widget in self.tree.iter_mut() {
            widget.style = widget_style(&self.theme, widget);
        }
        debug!(widgets = self.tree.len(), "Theme applied");
    }

    pub fn widget_id(&self, name: &str) -> Option<WidgetId> {
        self.names.get(name)
    }

    /// Widget registered under `name`
    ///
    /// Binding-only keys (radio groups) miss silently; anything else is
    /// logged.
    pub fn get_widget(&self, name: &str) -> Option<&Widget> {
        match self.names.get(name).and_then(|id| self.tree.get(id)) {
            Some(widget) => Some(widget),
            None => {
                if !self.bindings.contains(name) {
                    error!(name, "Widget not found");
                }
                None
            }
        }
    }

    fn widget_mut(&mut self, name: &str) -> Option<&mut Widget> {
        let widget = self.names.get(name).and_then(|id| self.tree.get_mut(id));
        if widget.is_none() {
            error!(name, "Widget not found");
        }
        widget
    }

    pub fn binding(&self, key: &str) -> Option<&Binding> {
        self.bindings.get(key)
    }

    /// Current value behind `name`: its binding, else what the widget holds
    pub fn get_value(&self, name: &str) -> Option<Value> {
        if let Some(binding) = self.bindings.get(name) {
            return Some(binding.get());
        }
        let widget = self.get_widget(name)?;
        let value = widget.extract_value();
        if value.is_none() {
            warn!(name, kind = %widget.kind, "Widget has no value to extract");
        }
        value
    }

    /// Write one option
    ///
    /// Returns whether the write took effect; failures are logged.
    pub fn set_option(&mut self, name: &str, key: &str, value: impl Into<Value>) -> bool {
        let value = value.into();
        // `value` on a binding key targets the binding, whatever shares the name
        if key == "value" {
            if let Some(binding) = self.bindings.get(name) {
                return match binding.set(value) {
                    Ok(()) => true,
                    Err(e) => {
                        error!(name, error = %e, "Cannot write binding");
                        false
                    }
                };
            }
        }
        let Some(widget) = self.widget_mut(name) else {
            return false;
        };
        match widget.apply_option(key, value) {
            Ok(()) => true,
            Err(e) => {
                error!(name, key, error = %e, "Cannot set option");
                false
            }
        }
    }

    /// Table behind `name`, or a logged miss
    fn table_mut(&mut self, name: &str) -> Option<(WidgetId, &mut Table)> {
        let widget = self.widget_mut(name)?;
        let id = widget.id;
        match &mut widget.data {
            WidgetData::Table(table) => Some((id, table)),
            _ => {
                error!(name, kind = %widget.kind, "Widget is not a table");
                None
            }
        }
    }

    /// Push the table's views into its linked scrollbars
    fn sync_scrollbars(&mut self, table: WidgetId) {
        let links = match self.tree.get(table).map(|w| &w.data) {
            Some(WidgetData::Table(t)) => [(t.yscroll, t.yview), (t.xscroll, t.xview)],
            _ => return,
        };
        for (bar, view) in links {
            let data = bar.and_then(|id| self.tree.get_mut(id)).map(|w| &mut w.data);
            if let Some(WidgetData::Scrollbar(state)) = data {
                state.view = view;
            }
        }
    }

    /// Remove every row of a table
    pub fn clear(&mut self, name: &str) -> bool {
        let Some((id, table)) = self.table_mut(name) else {
            return false;
        };
        table.clear();
        self.sync_scrollbars(id);
        true
    }

    /// Insert a table row, returning its id
    #[allow(clippy::too_many_arguments)]
    pub fn insert_item(
        &mut self,
        name: &str,
        values: Vec<Value>,
        parent: &str,
        position: Position,
        id: Option<&str>,
        text: &str,
        tags: &[&str],
    ) -> Option<String> {
        let (widget, table) = self.table_mut(name)?;
        let tags = tags.iter().map(|t| t.to_string()).collect();
        let inserted = table.insert(parent, position, id, text, values, tags);
        self.sync_scrollbars(widget);
        match inserted {
            Ok(item) => Some(item),
            Err(e) => {
                error!(name, error = %e, "Cannot insert row");
                None
            }
        }
    }

    pub fn get_item(&self, name: &str, id: &str) -> Option<TableItem> {
        let widget = self.get_widget(name)?;
        match &widget.data {
            WidgetData::Table(table) => {
                let item = table.item(id).cloned();
                if item.is_none() {
                    warn!(name, item = id, "Row not found");
                }
                item
            }
            _ => {
                error!(name, kind = %widget.kind, "Widget is not a table");
                None
            }
        }
    }

    /// Remove a row and its descendants
    pub fn delete_item(&mut self, name: &str, id: &str) -> bool {
        let Some((widget, table)) = self.table_mut(name) else {
            return false;
        };
        let deleted = table.delete(id);
        self.sync_scrollbars(widget);
        match deleted {
            Ok(()) => true,
            Err(e) => {
                error!(name, error = %e, "Cannot delete row");
                false
            }
        }
    }

    /// Select list entries by index; out-of-range indices are dropped
    pub fn select_list(&mut self, name: &str, indices: &[usize]) -> bool {
        let Some(widget) = self.widget_mut(name) else {
            return false;
        };
        let WidgetData::List(list) = &mut widget.data else {
            error!(name, kind = %widget.kind, "Widget is not a list");
            return false;
        };
        let count = list.items.len();
        let (valid, dropped): (Vec<usize>, Vec<usize>) =
            indices.iter().partition(|&&i| i < count);
        if !dropped.is_empty() {
            warn!(name, ?dropped, "Ignoring list indices out of range");
        }
        list.selection = valid;
        true
    }

    /// Select table rows by id
    pub fn select_rows(&mut self, name: &str, ids: &[&str]) -> bool {
        let Some((_, table)) = self.table_mut(name) else {
            return false;
        };
        let ids: Vec<String> = ids.iter().map(|s| s.to_string()).collect();
        match table.select(&ids) {
            Ok(()) => true,
            Err(e) => {
                error!(name, error = %e, "Cannot select rows");
                false
            }
        }
    }

    /// Type at the end of a text-bearing widget
    pub fn type_text(&mut self, name: &str, text: &str) -> bool {
        let Some(widget) = self.widget_mut(name) else {
            return false;
        };
        if widget.is_disabled() || widget.is_placeholder() {
            debug!(name, "Ignoring input to inactive widget");
            return false;
        }
        if let WidgetData::Text(buffer) = &mut widget.data {
            buffer.append(text);
            return true;
        }
        let bound = matches!(
            widget.kind,
            WidgetKind::Entry | WidgetKind::Combobox | WidgetKind::Spinbox
        );
        match widget.binding.as_ref().filter(|_| bound) {
            Some(binding) => {
                let typed = format!("{}{}", binding.get().to_text(), text);
                binding.set(typed).is_ok()
            }
            None => {
                error!(name, kind = %widget.kind, "Widget does not accept text input");
                false
            }
        }
    }

    /// Bring a notebook page to the front
    pub fn select_tab(&mut self, name: &str, index: usize) -> bool {
        let Some(widget) = self.widget_mut(name) else {
            return false;
        };
        let WidgetData::Notebook(state) = &mut widget.data else {
            error!(name, kind = %widget.kind, "Widget is not a notebook");
            return false;
        };
        if index >= state.tabs.len() {
            error!(name, index, tabs = state.tabs.len(), "Tab index out of range");
            return false;
        }
        state.selected = Some(index);
        true
    }

    /// Scroll a table along one axis
    pub fn scroll_to(&mut self, name: &str, orient: Orient, fraction: f64) -> bool {
        match self.names.get(name) {
            Some(id) => self.scroll_widget(id, orient, fraction),
            None => {
                error!(name, "Widget not found");
                false
            }
        }
    }

    /// Scroll a table or drag a scrollbar; both linked ends follow
    ///
    /// Scrollbars move along their own orientation and ignore `orient`.
    pub fn scroll_widget(&mut self, id: WidgetId, orient: Orient, fraction: f64) -> bool {
        if !fraction.is_finite() {
            error!(id = %id, fraction, "Scroll fraction is not a finite number");
            return false;
        }
        let (table, orient) = match self.tree.get(id).map(|w| &w.data) {
            Some(WidgetData::Table(_)) => (id, orient),
            Some(WidgetData::Scrollbar(bar)) => match bar.target {
                Some(target) => (target, bar.orient),
                None => {
                    warn!(id = %id, "Scrollbar is not linked");
                    return false;
                }
            },
            _ => {
                error!(id = %id, "Widget does not scroll");
                return false;
            }
        };
        let Some(WidgetData::Table(model)) = self.tree.get_mut(table).map(|w| &mut w.data) else {
            return false;
        };
        match orient {
            Orient::Vertical => model.yview.moveto(fraction),
            Orient::Horizontal => model.xview.moveto(fraction),
        }
        self.sync_scrollbars(table);
        true
    }

    /// Indented outline of the realized tree
    pub fn dump_tree(&self) -> String {
        self.tree.dump()
    }
}
