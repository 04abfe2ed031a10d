//! Widget arena and name registry

use std::collections::HashMap;
use std::fmt::Write;

use crate::widget::{Family, Widget, WidgetData, WidgetId, WidgetKind};

/// Arena holding every widget; the first node is the root window
///
/// Widgets are never removed individually, so ids stay valid for the life of
/// the tree and a parent always outlives its children.
#[derive(Debug, Clone)]
pub struct WidgetTree {
    nodes: Vec<Widget>,
}

impl Default for WidgetTree {
    fn default() -> Self {
        Self::new()
    }
}

impl WidgetTree {
    pub fn new() -> Self {
        let root = Widget::new(WidgetKind::Window, Family::Classic, "Tk", WidgetData::Plain);
        Self { nodes: vec![root] }
    }

    pub fn root(&self) -> WidgetId {
        WidgetId(0)
    }

    /// Id the next inserted widget will receive
    pub fn next_id(&self) -> WidgetId {
        WidgetId(self.nodes.len())
    }

    /// Attach a widget as the last child of `parent`
    ///
    /// An unknown parent attaches the widget to the root.
    pub fn insert(&mut self, parent: WidgetId, mut widget: Widget) -> WidgetId {
        let parent = if parent.0 < self.nodes.len() {
            parent
        } else {
            self.root()
        };
        let id = self.next_id();
        widget.id = id;
        widget.parent = Some(parent);
        self.nodes.push(widget);
        self.nodes[parent.0].children.push(id);
        id
    }

    pub fn get(&self, id: WidgetId) -> Option<&Widget> {
        self.nodes.get(id.0)
    }

    pub fn get_mut(&mut self, id: WidgetId) -> Option<&mut Widget> {
        self.nodes.get_mut(id.0)
    }

    pub fn children(&self, id: WidgetId) -> &[WidgetId] {
        self.get(id).map(|w| w.children.as_slice()).unwrap_or(&[])
    }

    pub fn parent(&self, id: WidgetId) -> Option<WidgetId> {
        self.get(id).and_then(|w| w.parent)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Widget> {
        self.nodes.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Widget> {
        self.nodes.iter_mut()
    }

    /// Depth-first walk from `id`, parents before children
    pub fn walk(&self, id: WidgetId) -> Vec<(usize, WidgetId)> {
        let mut out = Vec::new();
        let mut stack = vec![(0usize, id)];
        while let Some((depth, current)) = stack.pop() {
            out.push((depth, current));
            for child in self.children(current).iter().rev() {
                stack.push((depth + 1, *child));
            }
        }
        out
    }

    /// Indented outline of the tree: one line per widget
    pub fn dump(&self) -> String {
        let mut out = String::new();
        for (depth, id) in self.walk(self.root()) {
            let Some(widget) = self.get(id) else {
                continue;
            };
            let _ = write!(out, "{:indent$}{} {}", "", id, widget.type_name, indent = depth * 2);
            if let Some(name) = &widget.name {
                let _ = write!(out, " name={}", name);
            }
            if let Some(placement) = &widget.placement {
                let _ = write!(out, " {}", placement);
            }
            if let Some(command) = &widget.command {
                let marker = if command.is_inert() { " (inert)" } else { "" };
                let _ = write!(out, " command={}{}", command.name(), marker);
            }
            if let Some(binding) = &widget.binding {
                let _ = write!(out, " var={}", binding.key());
            }
            if let Some(error) = &widget.error {
                let _ = write!(out, " error=\"{}\"", error);
            }
            out.push('\n');
        }
        out
    }
}

/// Widget name → widget id
///
/// Holds ids only; the tree owns the widgets.
#[derive(Debug, Clone, Default)]
pub struct NameRegistry {
    names: HashMap<String, WidgetId>,
}

impl NameRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a name, returning the id it previously pointed to
    pub fn register(&mut self, name: &str, id: WidgetId) -> Option<WidgetId> {
        self.names.insert(name.to_string(), id)
    }

    pub fn get(&self, name: &str) -> Option<WidgetId> {
        self.names.get(name).copied()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Names in sorted order
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.names.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frame() -> Widget {
        Widget::new(WidgetKind::Frame, Family::Classic, "Frame", WidgetData::Plain)
    }

    #[test]
    fn test_insert_links_parent_and_child() {
        let mut tree = WidgetTree::new();
        let root = tree.root();
        let a = tree.insert(root, frame());
        let b = tree.insert(a, frame());
        assert_eq!(tree.children(root), &[a]);
        assert_eq!(tree.children(a), &[b]);
        assert_eq!(tree.parent(b), Some(a));
        assert_eq!(tree.len(), 3);
    }

    #[test]
    fn test_unknown_parent_attaches_to_root() {
        let mut tree = WidgetTree::new();
        let id = tree.insert(WidgetId(99), frame());
        assert_eq!(tree.parent(id), Some(tree.root()));
    }

    #[test]
    fn test_walk_order_and_dump() {
        let mut tree = WidgetTree::new();
        let root = tree.root();
        let a = tree.insert(root, frame());
        let mut label = Widget::new(WidgetKind::Label, Family::Classic, "Label", WidgetData::Plain);
        label.name = Some("title".into());
        tree.insert(a, label);
        tree.insert(root, frame());

        let order: Vec<usize> = tree.walk(root).iter().map(|(_, id)| id.0).collect();
        assert_eq!(order, vec![0, 1, 2, 3]);

        let dump = tree.dump();
        let lines: Vec<&str> = dump.lines().collect();
        assert_eq!(lines[0], "#0 Tk");
        assert_eq!(lines[2], "    #2 Label name=title");
        assert_eq!(lines[3], "  #3 Frame");
    }

    #[test]
    fn test_name_registry_overwrite() {
        let mut names = NameRegistry::new();
        assert_eq!(names.register("x", WidgetId(1)), None);
        assert_eq!(names.register("x", WidgetId(2)), Some(WidgetId(1)));
        assert_eq!(names.get("x"), Some(WidgetId(2)));
        assert_eq!(names.names(), vec!["x"]);
    }
}
