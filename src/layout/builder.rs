//! Layout builder: realizes a resolved document into the widget tree
//!
//! The builder walks the document depth-first, creating widgets, bindings and
//! placements as it goes. Nothing here aborts: unresolved types are skipped,
//! failed constructions become placeholders, and every anomaly is logged and
//! recorded in the [`BuildReport`].

use std::collections::{BTreeMap, HashMap};
use std::fmt;

use tracing::{debug, error, info, warn};

use crate::binding::{Binding, BindingKind, BindingStore};
use crate::command::CommandSlot;
use crate::layout::document::{
    ColumnItem, GridItem, GroupSpec, LayoutDocument, LayoutMode, Row, TabSpec, WidgetSpec,
};
use crate::layout::placement::{Fill, Grid, Pack, Pad, Placement, Side};
use crate::theme::{widget_style, ThemeSettings};
use crate::value::{Options, Value};
use crate::widget::options::validate_options;
use crate::widget::{
    Family, NameRegistry, NotebookTab, Orient, ScrollView, ScrollbarState, Widget, WidgetClass,
    WidgetData, WidgetId, WidgetKind, WidgetRegistry, WidgetTree,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Severity {
    Warning,
    Error,
}

/// One anomaly met while building
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Diagnostic {
    pub severity: Severity,
    pub message: String,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self.severity {
            Severity::Warning => "warning",
            Severity::Error => "error",
        };
        write!(f, "{}: {}", label, self.message)
    }
}

/// Everything that went wrong during a build, in order of discovery
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BuildReport {
    diagnostics: Vec<Diagnostic>,
}

impl BuildReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, severity: Severity, message: impl Into<String>) {
        self.diagnostics.push(Diagnostic {
            severity,
            message: message.into(),
        });
    }

    /// Append another report's entries
    pub fn extend(&mut self, other: BuildReport) {
        self.diagnostics.extend(other.diagnostics);
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn warnings(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics
            .iter()
            .filter(|d| d.severity == Severity::Warning)
    }

    pub fn errors(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics
            .iter()
            .filter(|d| d.severity == Severity::Error)
    }

    pub fn is_clean(&self) -> bool {
        self.diagnostics.is_empty()
    }

    pub fn len(&self) -> usize {
        self.diagnostics.len()
    }

    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }
}

impl fmt::Display for BuildReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for diagnostic in &self.diagnostics {
            writeln!(f, "{}", diagnostic)?;
        }
        Ok(())
    }
}

/// Where a widget goes in its parent
#[derive(Clone, Copy)]
enum Slot<'d> {
    Pack(Option<&'d Options>),
    Grid {
        row: u32,
        column: u32,
        hints: Option<&'d Options>,
    },
}

impl<'d> Slot<'d> {
    fn of_grid_item(item: &'d GridItem<CommandSlot>) -> Self {
        Slot::Grid {
            row: item.row,
            column: item.column,
            hints: item.grid_options.as_ref(),
        }
    }
}

/// What a widget is built from once its type, command and binding are settled
struct Blueprint<'s> {
    type_name: &'s str,
    class: WidgetClass,
    name: Option<&'s str>,
    options: Options,
    command: Option<CommandSlot>,
    binding: Option<Binding>,
}

/// Log every write to `binding` after its seed
fn trace_writes(binding: &Binding) {
    let key = binding.key().to_string();
    binding.observe(move |value| debug!(key = %key, %value, "Binding changed"));
}

fn label(name: Option<&str>) -> &str {
    name.unwrap_or("<unnamed>")
}

/// Separators lie horizontally unless told otherwise; everything else stands up
fn orient_of(widget: &Widget) -> Orient {
    match widget.option("orient") {
        None if widget.kind == WidgetKind::Separator => Orient::Horizontal,
        value => Orient::from_value(value),
    }
}

pub struct LayoutBuilder<'a> {
    tree: &'a mut WidgetTree,
    names: &'a mut NameRegistry,
    bindings: &'a mut BindingStore,
    registry: &'a WidgetRegistry,
    theme: &'a ThemeSettings,
    report: BuildReport,
}

impl<'a> LayoutBuilder<'a> {
    pub fn new(
        tree: &'a mut WidgetTree,
        names: &'a mut NameRegistry,
        bindings: &'a mut BindingStore,
        registry: &'a WidgetRegistry,
        theme: &'a ThemeSettings,
    ) -> Self {
        Self {
            tree,
            names,
            bindings,
            registry,
            theme,
            report: BuildReport::new(),
        }
    }

    /// Build the document under a main container attached to the root
    pub fn build(mut self, document: &LayoutDocument<CommandSlot>) -> BuildReport {
        let root = self.tree.root();
        let container = self.frame(root);
        self.set_placement(
            container,
            Placement::Pack(Pack {
                side: Side::Top,
                fill: Fill::Both,
                expand: true,
                padx: Pad::uniform(10.0),
                pady: Pad::uniform(10.0),
                ..Pack::default()
            }),
        );

        match document.mode() {
            LayoutMode::Grid(items) => {
                if document.rows.is_some() {
                    self.warn("Layout declares both 'grid' and 'rows'; using 'grid'");
                }
                self.apply_weights(container, document);
                self.build_grid(container, items);
            }
            LayoutMode::Rows(rows) => self.build_rows(container, rows),
            LayoutMode::Empty => self.warn("Layout declares neither 'rows' nor 'grid'"),
        }

        info!(
            widgets = self.tree.len(),
            names = self.names.len(),
            warnings = self.report.warnings().count(),
            errors = self.report.errors().count(),
            "Layout built"
        );
        self.report
    }

    fn warn(&mut self, message: impl Into<String>) {
        let message = message.into();
        warn!("{}", message);
        self.report.push(Severity::Warning, message);
    }

    fn error(&mut self, message: impl Into<String>) {
        let message = message.into();
        error!("{}", message);
        self.report.push(Severity::Error, message);
    }

    fn frame(&mut self, parent: WidgetId) -> WidgetId {
        let mut frame = Widget::new(WidgetKind::Frame, Family::Classic, "Frame", WidgetData::Plain);
        frame.style = widget_style(self.theme, &frame);
        self.tree.insert(parent, frame)
    }

    fn set_placement(&mut self, id: WidgetId, placement: Placement) {
        if let Some(widget) = self.tree.get_mut(id) {
            widget.placement = Some(placement);
        }
    }

    /// Place a widget: `base` for pack slots, the cell for grid slots, then hints
    fn place(&mut self, id: WidgetId, slot: Slot<'_>, base: Pack) {
        let (placement, problems) = match slot {
            Slot::Pack(hints) => {
                let mut pack = base;
                let problems = hints.map(|h| pack.merge(h)).unwrap_or_default();
                (Placement::Pack(pack), problems)
            }
            Slot::Grid { row, column, hints } => {
                let mut grid = Grid::at(row, column);
                let problems = hints.map(|h| grid.merge(h)).unwrap_or_default();
                (Placement::Grid(grid), problems)
            }
        };
        for problem in problems {
            self.warn(format!("Widget {}: {}", id, problem));
        }
        self.set_placement(id, placement);
    }

    /// Default placement for whatever ended up at `id`
    fn default_pack(&self, id: WidgetId) -> Pack {
        match self.tree.get(id) {
            Some(widget) => Pack::for_kind(widget.kind, orient_of(widget)),
            None => Pack::default(),
        }
    }

    fn register(&mut self, name: &str, id: WidgetId) {
        if let Some(previous) = self.names.register(name, id) {
            self.warn(format!(
                "Duplicate widget name '{}' detected. Overwriting {} with {}.",
                name, previous, id
            ));
        }
    }

    fn padding(&mut self, value: Option<&Value>, default: f64, key: &str) -> Pad {
        match value {
            None | Some(Value::Null) => Pad::uniform(default),
            Some(value) => Pad::from_value(value).unwrap_or_else(|| {
                self.warn(format!("Invalid row {} {}, using {}", key, value, default));
                Pad::uniform(default)
            }),
        }
    }

    fn build_rows(&mut self, parent: WidgetId, rows: &[Row<CommandSlot>]) {
        for row in rows {
            let frame = self.frame(parent);
            let padx = self.padding(row.padding_x.as_ref(), 0.0, "padding_x");
            let pady = self.padding(row.padding_y.as_ref(), 5.0, "padding_y");
            self.set_placement(
                frame,
                Placement::Pack(Pack {
                    side: Side::Top,
                    fill: row.fill.unwrap_or(Fill::X),
                    expand: row.expand.unwrap_or(false),
                    padx,
                    pady,
                    ..Pack::default()
                }),
            );

            for item in &row.columns {
                match item {
                    ColumnItem::Widget(spec) => {
                        self.build_widget(frame, spec, Slot::Pack(spec.pack_options.as_ref()));
                    }
                    ColumnItem::Group(group) => self.build_group(frame, group),
                }
            }
        }
    }

    /// Two passes: named containers first, then everything else inside them
    fn build_grid(&mut self, parent: WidgetId, items: &[GridItem<CommandSlot>]) {
        let mut containers: HashMap<&str, WidgetId> = HashMap::new();
        let mut deferred = Vec::new();

        for item in items {
            let is_container = item
                .widget_type
                .as_deref()
                .and_then(|t| self.registry.resolve(t))
                .is_some_and(|class| class.kind.is_container());
            match item.name.as_deref() {
                Some(name) if is_container => {
                    if let Some(id) =
                        self.build_widget(parent, &item.widget_spec(), Slot::of_grid_item(item))
                    {
                        containers.insert(name, id);
                    }
                }
                _ => deferred.push(item),
            }
        }

        for item in deferred {
            let target = match item.parent.as_deref() {
                None => parent,
                Some(name) => match containers.get(name) {
                    Some(id) => *id,
                    None => {
                        self.warn(format!(
                            "Parent '{}' for widget '{}' not found, placing in root grid",
                            name,
                            label(item.name.as_deref())
                        ));
                        parent
                    }
                },
            };
            self.build_widget(target, &item.widget_spec(), Slot::of_grid_item(item));
        }
    }

    /// Record stretch weights on the grid host
    fn apply_weights(&mut self, container: WidgetId, document: &LayoutDocument<CommandSlot>) {
        for (axis, weights) in [
            ("column_weights", &document.column_weights),
            ("row_weights", &document.row_weights),
        ] {
            if weights.is_empty() {
                continue;
            }
            let mut valid = BTreeMap::new();
            for (index, weight) in weights {
                match (index.parse::<u32>(), weight.as_i64()) {
                    (Ok(_), Some(w)) if w >= 0 => {
                        valid.insert(index.clone(), Value::Int(w));
                    }
                    _ => self.warn(format!("Ignoring {} entry {}: {}", axis, index, weight)),
                }
            }
            if let Some(widget) = self.tree.get_mut(container) {
                widget.options.insert(axis.to_string(), Value::Map(valid));
            }
        }
    }

    fn build_widget(
        &mut self,
        parent: WidgetId,
        spec: &WidgetSpec<CommandSlot>,
        slot: Slot<'_>,
    ) -> Option<WidgetId> {
        let name = spec.name.as_deref();
        let Some(type_name) = spec.widget_type.as_deref() else {
            self.warn(format!("Widget '{}' has no 'type', skipping", label(name)));
            return None;
        };
        let Some(class) = self.registry.resolve(type_name) else {
            self.error(format!(
                "Unknown widget type '{}' for widget '{}', skipping",
                type_name,
                label(name)
            ));
            return None;
        };

        let mut options = spec.options.clone();
        let command = self.attach_command(class.kind, name, spec.command.as_ref());
        let binding = self.auto_binding(class.kind, name, &mut options);
        let blueprint = Blueprint {
            type_name,
            class,
            name,
            options,
            command,
            binding,
        };

        let id = if class.kind == WidgetKind::Treeview {
            self.build_table(parent, blueprint, slot)
        } else {
            let id = self.realize(parent, blueprint);
            let base = self.default_pack(id);
            self.place(id, slot, base);
            if class.kind == WidgetKind::Notebook {
                self.build_tabs(id, &spec.tabs);
            }
            id
        };

        if let Some(name) = name {
            self.register(name, id);
        }
        Some(id)
    }

    fn attach_command(
        &mut self,
        kind: WidgetKind,
        name: Option<&str>,
        command: Option<&CommandSlot>,
    ) -> Option<CommandSlot> {
        let slot = command?;
        if !kind.accepts_command() {
            self.warn(format!(
                "Widget '{}' ({}) does not take a command; ignoring '{}'",
                label(name),
                kind,
                slot.name()
            ));
            return None;
        }
        if slot.is_inert() {
            // Already logged during resolution
            self.report.push(
                Severity::Warning,
                format!(
                    "Command '{}' for widget '{}' not found; widget is inert",
                    slot.name(),
                    label(name)
                ),
            );
        }
        Some(slot.clone())
    }

    /// Create the binding a kind gets automatically, seeded from its popped option
    fn auto_binding(
        &mut self,
        kind: WidgetKind,
        name: Option<&str>,
        options: &mut Options,
    ) -> Option<Binding> {
        let binding_kind = kind.binding_kind()?;
        let key = match name {
            Some(name) => name.to_string(),
            None => format!("{}:{}", kind.as_str().to_lowercase(), self.tree.next_id().0),
        };
        let binding = Binding::new(&key, binding_kind);

        let seed = kind.seed_key().and_then(|k| options.remove(k));
        if let Some(seed) = seed.filter(|v| !v.is_null()) {
            if let Err(e) = binding.set(seed) {
                self.warn(format!("Cannot seed binding '{}': {}", key, e));
            }
        }

        trace_writes(&binding);

        // A duplicate widget name is reported once, by the name registry
        let reported_by_name = name.is_some_and(|n| self.names.contains(n));
        if self.bindings.insert(binding.clone()).is_some() && !reported_by_name {
            self.warn(format!("Duplicate binding key '{}', overwriting", key));
        }
        Some(binding)
    }

    /// Construct, validate, theme and attach one widget
    ///
    /// A failed construction inserts a placeholder label in its place.
    fn realize(&mut self, parent: WidgetId, blueprint: Blueprint<'_>) -> WidgetId {
        let Blueprint {
            type_name,
            class,
            name,
            mut options,
            command,
            binding,
        } = blueprint;

        let built = (class.factory)(&mut options).and_then(|data| {
            validate_options(class.kind, class.family, &options)?;
            Ok(data)
        });
        let mut widget = match built {
            Ok(data) => {
                let mut widget = Widget::new(class.kind, class.family, type_name, data);
                widget.options = options;
                widget.command = command;
                widget.binding = binding;
                widget
            }
            Err(e) => {
                self.error(format!(
                    "Error creating widget '{}' of type '{}': {}",
                    label(name),
                    type_name,
                    e
                ));
                Widget::placeholder(type_name, &e.to_string())
            }
        };
        widget.name = name.map(str::to_string);
        widget.style = widget_style(self.theme, &widget);
        let id = self.tree.insert(parent, widget);
        debug!(id = %id, widget_type = type_name, name = label(name), "Created widget");
        id
    }

    /// Each tab is a fresh frame built with the row algorithm
    fn build_tabs(&mut self, notebook: WidgetId, tabs: &[TabSpec<CommandSlot>]) {
        let is_notebook = self
            .tree
            .get(notebook)
            .is_some_and(|w| matches!(w.data, WidgetData::Notebook(_)));
        if !is_notebook {
            if !tabs.is_empty() {
                self.warn(format!("Skipping {} tabs of failed notebook {}", tabs.len(), notebook));
            }
            return;
        }

        let mut pages = Vec::with_capacity(tabs.len());
        for tab in tabs {
            let frame = self.frame(notebook);
            self.build_rows(frame, &tab.layout.rows);
            pages.push(NotebookTab {
                title: tab.title.clone(),
                frame,
            });
        }
        if let Some(WidgetData::Notebook(state)) = self.tree.get_mut(notebook).map(|w| &mut w.data) {
            state.selected = if pages.is_empty() { None } else { Some(0) };
            state.tabs = pages;
        }
    }

    fn scrollbar(&mut self, parent: WidgetId, orient: Orient) -> WidgetId {
        let mut bar = Widget::new(
            WidgetKind::Scrollbar,
            Family::Themed,
            "ttk.Scrollbar",
            WidgetData::Scrollbar(ScrollbarState {
                orient,
                target: None,
                view: ScrollView::default(),
            }),
        );
        bar.options.insert("orient".to_string(), Value::from(orient.as_str()));
        self.tree.insert(parent, bar)
    }

    /// A container frame holding the table and its two scrollbars
    ///
    /// The frame takes the table's slot; the table itself is returned.
    fn build_table(&mut self, parent: WidgetId, blueprint: Blueprint<'_>, slot: Slot<'_>) -> WidgetId {
        let frame = self.frame(parent);
        let vertical = self.scrollbar(frame, Orient::Vertical);
        let horizontal = self.scrollbar(frame, Orient::Horizontal);
        let table = self.realize(frame, blueprint);

        self.set_placement(
            vertical,
            Placement::Pack(Pack {
                side: Side::Right,
                fill: Fill::Y,
                ..Pack::default()
            }),
        );
        self.set_placement(
            horizontal,
            Placement::Pack(Pack {
                side: Side::Bottom,
                fill: Fill::X,
                ..Pack::default()
            }),
        );
        self.set_placement(
            table,
            Placement::Pack(Pack {
                side: Side::Left,
                fill: Fill::Both,
                expand: true,
                ..Pack::default()
            }),
        );
        self.link_scrollbars(table, vertical, horizontal);
        self.place(frame, slot, Pack::for_kind(WidgetKind::Treeview, Orient::Vertical));
        table
    }

    fn link_scrollbars(&mut self, table: WidgetId, vertical: WidgetId, horizontal: WidgetId) {
        let views = match self.tree.get_mut(table).map(|w| &mut w.data) {
            Some(WidgetData::Table(t)) => {
                t.yscroll = Some(vertical);
                t.xscroll = Some(horizontal);
                (t.yview, t.xview)
            }
            _ => return,
        };
        for (bar, view) in [(vertical, views.0), (horizontal, views.1)] {
            if let Some(WidgetData::Scrollbar(state)) = self.tree.get_mut(bar).map(|w| &mut w.data) {
                state.target = Some(table);
                state.view = view;
            }
        }
    }

    fn build_group(&mut self, parent: WidgetId, group: &GroupSpec<CommandSlot>) {
        if group.group.is_empty() {
            self.error("Radio button group has an empty 'group' name, skipping");
            return;
        }
        let binding = self.group_binding(group);
        let frame = self.frame(parent);
        self.place(frame, Slot::Pack(group.pack_options.as_ref()), Pack::group_frame());

        for member in &group.members {
            self.build_member(frame, &group.group, &binding, member);
        }
    }

    /// One string cell per group name, created once and reused afterwards
    fn group_binding(&mut self, group: &GroupSpec<CommandSlot>) -> Binding {
        if let Some(existing) = self.bindings.get(&group.group) {
            debug!(group = %group.group, "Reusing group binding");
            return existing.clone();
        }
        let selected = group
            .members
            .iter()
            .find(|m| m.options.get("selected").and_then(Value::as_bool) == Some(true))
            .and_then(|m| m.options.get("value"))
            .map(Value::to_text)
            .unwrap_or_default();
        let binding = Binding::new(&group.group, BindingKind::Str);
        if let Err(e) = binding.set(selected) {
            self.warn(format!("Cannot seed group '{}': {}", group.group, e));
        }
        trace_writes(&binding);
        self.bindings.insert(binding.clone());
        binding
    }

    fn build_member(
        &mut self,
        frame: WidgetId,
        group: &str,
        binding: &Binding,
        member: &WidgetSpec<CommandSlot>,
    ) {
        let name = member.name.as_deref();
        let type_name = member.widget_type.as_deref().unwrap_or_default();
        let class = match self.registry.resolve(type_name) {
            Some(class) if class.kind == WidgetKind::Radiobutton => class,
            _ => {
                self.warn(format!(
                    "Group '{}' member '{}' has type '{}', expected Radiobutton; skipping",
                    group,
                    label(name),
                    type_name
                ));
                return;
            }
        };
        if member.options.get("value").map_or(true, Value::is_null) {
            self.error(format!(
                "Radiobutton '{}' in group '{}' has no 'value', skipping",
                label(name),
                group
            ));
            return;
        }

        let mut options = member.options.clone();
        options.remove("selected");
        let command = self.attach_command(class.kind, name, member.command.as_ref());
        let id = self.realize(
            frame,
            Blueprint {
                type_name,
                class,
                name,
                options,
                command,
                binding: Some(binding.clone()),
            },
        );
        self.place(id, Slot::Pack(member.pack_options.as_ref()), Pack::group_member());
        if let Some(name) = name {
            self.register(name, id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::CommandTable;

    struct Built {
        tree: WidgetTree,
        names: NameRegistry,
        bindings: BindingStore,
        report: BuildReport,
    }

    impl Built {
        fn widget(&self, name: &str) -> &Widget {
            let id = self.names.get(name).unwrap();
            self.tree.get(id).unwrap()
        }
    }

    fn build(json: &str) -> Built {
        let table: CommandTable<()> = CommandTable::new().with("submit", |_| {});
        let document = LayoutDocument::from_json_str(json).unwrap().resolve(&table);
        let mut tree = WidgetTree::new();
        let mut names = NameRegistry::new();
        let mut bindings = BindingStore::new();
        let registry = WidgetRegistry::new();
        let theme = ThemeSettings::default();
        let report = LayoutBuilder::new(&mut tree, &mut names, &mut bindings, &registry, &theme)
            .build(&document);
        Built {
            tree,
            names,
            bindings,
            report,
        }
    }

    #[test]
    fn test_rows_build_frames_and_defaults() {
        let built = build(
            r#"{"rows": [{"columns": [
                {"type": "Entry", "name": "user"},
                {"type": "Button", "name": "go", "command": "submit", "options": {"text": "Go"}}
            ]}]}"#,
        );
        assert!(built.report.is_clean(), "{}", built.report);

        // root → main container → row frame → widgets
        let main = built.tree.children(built.tree.root())[0];
        let row = built.tree.children(main)[0];
        let entry = built.widget("user");
        assert_eq!(entry.parent, Some(row));

        let row_pack = built.tree.get(row).unwrap().placement.clone().unwrap();
        let row_pack = row_pack.as_pack().unwrap();
        assert_eq!((row_pack.side, row_pack.fill), (Side::Top, Fill::X));
        assert_eq!(row_pack.pady, Pad::uniform(5.0));

        let entry_pack = entry.placement.as_ref().and_then(Placement::as_pack).unwrap();
        assert_eq!((entry_pack.fill, entry_pack.expand), (Fill::X, true));
        assert_eq!(built.bindings.get("user").unwrap().get(), Value::from(""));

        let go = built.widget("go");
        assert!(!go.command.as_ref().unwrap().is_inert());
        assert_eq!(go.option("bg"), Some(&Value::from("#007BFF")));
    }

    #[test]
    fn test_seed_is_popped_into_binding() {
        let built = build(
            r#"{"rows": [{"columns": [
                {"type": "Checkbutton", "name": "agree", "options": {"text": "OK", "value": 1}},
                {"type": "Scale", "name": "level", "options": {"from_": 0, "to": 10, "value": 3}},
                {"type": "Combobox", "name": "pick", "options": {"values": ["a", "b"], "text": "b"}}
            ]}]}"#,
        );
        assert!(built.report.is_clean(), "{}", built.report);
        assert_eq!(built.bindings.get("agree").unwrap().get(), Value::Int(1));
        assert_eq!(built.bindings.get("level").unwrap().get(), Value::Float(3.0));
        assert_eq!(built.bindings.get("pick").unwrap().get(), Value::from("b"));
        assert!(!built.widget("agree").options.contains_key("value"));
        assert_eq!(built.widget("agree").option("text"), Some(&Value::from("OK")));
        assert!(!built.widget("pick").options.contains_key("text"));
    }

    #[test]
    fn test_unnamed_bindable_gets_synthesized_key() {
        let built = build(r#"{"rows": [{"columns": [{"type": "Entry"}]}]}"#);
        assert_eq!(built.bindings.len(), 1);
        assert!(built.bindings.keys()[0].starts_with("entry:"));
        assert!(built.names.is_empty());
    }

    #[test]
    fn test_unknown_type_and_missing_type_are_skipped() {
        let built = build(
            r#"{"rows": [{"columns": [
                {"type": "Bogus", "name": "x"},
                {"name": "y"},
                {"type": "Label", "name": "z"}
            ]}]}"#,
        );
        assert!(!built.names.contains("x"));
        assert!(!built.names.contains("y"));
        assert!(built.names.contains("z"));
        assert_eq!(built.report.errors().count(), 1);
        assert_eq!(built.report.warnings().count(), 1);
    }

    #[test]
    fn test_failed_construction_leaves_placeholder() {
        let built = build(
            r#"{"rows": [{"columns": [
                {"type": "Label", "name": "bad", "options": {"width": "wide"}}
            ]}]}"#,
        );
        let bad = built.widget("bad");
        assert!(bad.is_placeholder());
        assert_eq!(bad.option("fg"), Some(&Value::from("red")));
        assert!(bad.option("text").unwrap().to_text().starts_with("Error creating Label"));
        assert_eq!(built.report.errors().count(), 1);
    }

    #[test]
    fn test_group_shares_one_binding() {
        let built = build(
            r#"{"rows": [{"columns": [{"group": "choice", "columns": [
                {"type": "Radiobutton", "name": "a", "options": {"text": "A", "value": "a", "selected": true}},
                {"type": "Radiobutton", "name": "b", "options": {"text": "B", "value": "b"}},
                {"type": "Radiobutton", "name": "c", "options": {"text": "C"}},
                {"type": "Button", "name": "d"}
            ]}]}]}"#,
        );
        assert_eq!(built.bindings.len(), 1);
        assert_eq!(built.bindings.get("choice").unwrap().get(), Value::from("a"));

        let a = built.widget("a");
        let b = built.widget("b");
        assert!(a.binding.as_ref().unwrap().same_cell(b.binding.as_ref().unwrap()));
        assert!(!a.options.contains_key("selected"));
        assert_eq!(a.option("value"), Some(&Value::from("a")));
        assert!(!built.names.contains("choice"));
        assert!(!built.names.contains("c"));
        assert!(!built.names.contains("d"));
        assert_eq!(built.report.errors().count(), 1);
        assert_eq!(built.report.warnings().count(), 1);

        let group_frame = built.tree.get(a.parent.unwrap()).unwrap();
        let pack = group_frame.placement.as_ref().and_then(Placement::as_pack).unwrap();
        assert_eq!((pack.side, pack.padx), (Side::Left, Pad::default()));
    }

    #[test]
    fn test_treeview_container_and_scrollbars() {
        let built = build(
            r#"{"rows": [{"columns": [
                {"type": "Treeview", "name": "table", "options": {"columns": ["id", "name"]},
                 "pack_options": {"padx": 0}}
            ]}]}"#,
        );
        let table = built.widget("table");
        let frame = built.tree.get(table.parent.unwrap()).unwrap();
        assert_eq!(frame.kind, WidgetKind::Frame);
        assert_eq!(frame.children.len(), 3);
        assert_eq!(frame.children[2], table.id);
        let pack = frame.placement.as_ref().and_then(Placement::as_pack).unwrap();
        assert_eq!((pack.fill, pack.expand, pack.padx), (Fill::Both, true, Pad::uniform(0.0)));

        let WidgetData::Table(model) = &table.data else {
            panic!("expected a table");
        };
        assert_eq!(model.columns()[1].heading, "Name");
        let vertical = built.tree.get(model.yscroll.unwrap()).unwrap();
        match &vertical.data {
            WidgetData::Scrollbar(state) => {
                assert_eq!(state.orient, Orient::Vertical);
                assert_eq!(state.target, Some(table.id));
            }
            other => panic!("expected scrollbar, got {:?}", other),
        }
    }

    #[test]
    fn test_notebook_tabs_are_built() {
        let built = build(
            r#"{"rows": [{"columns": [{"type": "Notebook", "name": "nb", "options": {"tabs": [
                {"title": "One", "layout": {"rows": [{"columns": [{"type": "Label", "name": "inner"}]}]}},
                {"title": "Two", "layout": {"rows": []}}
            ]}}]}]}"#,
        );
        let nb = built.widget("nb");
        assert_eq!(nb.family, Family::Themed);
        let WidgetData::Notebook(state) = &nb.data else {
            panic!("expected a notebook");
        };
        assert_eq!(state.tabs.len(), 2);
        assert_eq!(state.selected, Some(0));
        assert_eq!(state.tabs[0].title, "One");

        let inner = built.widget("inner");
        let row = inner.parent.unwrap();
        assert_eq!(built.tree.parent(row), Some(state.tabs[0].frame));
    }

    #[test]
    fn test_grid_two_passes() {
        let built = build(
            r#"{"grid": [
                {"type": "Label", "name": "early", "row": 0, "column": 0, "parent": "side"},
                {"type": "Button", "name": "orphan", "row": 1, "column": 0, "parent": "nowhere"},
                {"type": "Frame", "name": "side", "row": 0, "column": 1, "grid_options": {"sticky": "ns"}}
            ], "column_weights": {"0": 1, "x": 2}}"#,
        );
        let side = built.widget("side");
        assert_eq!(built.widget("early").parent, Some(side.id));
        let grid = side.placement.as_ref().and_then(Placement::as_grid).unwrap();
        assert_eq!((grid.row, grid.column, grid.sticky.as_str()), (0, 1, "ns"));

        let main = built.tree.children(built.tree.root())[0];
        assert_eq!(built.widget("orphan").parent, Some(main));
        let weights = built.tree.get(main).unwrap().options["column_weights"].clone();
        assert_eq!(weights.as_map().unwrap().len(), 1);
        assert_eq!(built.report.warnings().count(), 2);
    }

    #[test]
    fn test_grid_duplicate_container_last_wins() {
        let built = build(
            r#"{"grid": [
                {"type": "Frame", "name": "side", "row": 0, "column": 0},
                {"type": "Frame", "name": "side", "row": 0, "column": 1},
                {"type": "Label", "name": "inner", "row": 0, "column": 0, "parent": "side"}
            ]}"#,
        );
        let main = built.tree.children(built.tree.root())[0];
        let frames = built.tree.children(main).to_vec();
        assert_eq!(frames.len(), 2);
        assert_eq!(built.names.get("side"), Some(frames[1]));
        assert_eq!(built.widget("inner").parent, Some(frames[1]));
        assert!(built.tree.children(frames[0]).is_empty());

        let warnings: Vec<_> = built.report.warnings().collect();
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].message.contains("Duplicate widget name 'side'"));
    }

    #[test]
    fn test_inert_command_is_reported() {
        let built = build(
            r#"{"rows": [{"columns": [{"type": "Button", "name": "b", "command": "missing"}]}]}"#,
        );
        assert!(built.widget("b").command.as_ref().unwrap().is_inert());
        assert_eq!(built.report.warnings().count(), 1);
    }

    #[test]
    fn test_empty_document_warns() {
        let built = build("{}");
        assert_eq!(built.report.warnings().count(), 1);
        assert_eq!(built.tree.len(), 2);
    }
}
