//! Menu bar built from the document's `menu` section

use tracing::{debug, warn};

use crate::command::CommandSlot;
use crate::layout::builder::{BuildReport, Severity};
use crate::layout::document::{MenuItemSpec, MenuSpec};

const DEFAULT_LABEL: &str = "Unnamed";

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MenuEntry {
    /// Disabled when the command is missing or unresolved
    Command {
        label: String,
        command: Option<CommandSlot>,
        enabled: bool,
    },
    Separator,
}

impl MenuEntry {
    pub fn label(&self) -> Option<&str> {
        match self {
            MenuEntry::Command { label, .. } => Some(label),
            MenuEntry::Separator => None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Menu {
    pub label: String,
    pub entries: Vec<MenuEntry>,
}

impl Menu {
    /// First entry carrying `label`
    pub fn entry(&self, label: &str) -> Option<&MenuEntry> {
        self.entries.iter().find(|e| e.label() == Some(label))
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MenuBar {
    pub menus: Vec<Menu>,
}

impl MenuBar {
    /// Build from resolved menu declarations, reporting odd entries
    pub fn build(specs: &[MenuSpec<CommandSlot>], report: &mut BuildReport) -> Self {
        let menus = specs
            .iter()
            .map(|spec| {
                let label = spec.label.clone().unwrap_or_else(|| DEFAULT_LABEL.to_string());
                let entries = spec
                    .items
                    .iter()
                    .filter_map(|item| build_entry(&label, item, report))
                    .collect();
                Menu { label, entries }
            })
            .collect::<Vec<_>>();
        debug!(menus = menus.len(), "Menu bar built");
        Self { menus }
    }

    pub fn menu(&self, label: &str) -> Option<&Menu> {
        self.menus.iter().find(|m| m.label == label)
    }

    pub fn is_empty(&self) -> bool {
        self.menus.is_empty()
    }
}

fn build_entry(
    menu: &str,
    item: &MenuItemSpec<CommandSlot>,
    report: &mut BuildReport,
) -> Option<MenuEntry> {
    match item {
        MenuItemSpec::Marker(marker) if marker == "separator" => Some(MenuEntry::Separator),
        MenuItemSpec::Marker(marker) => {
            let message = format!("Unknown menu item '{}' in menu '{}', skipping", marker, menu);
            warn!("{}", message);
            report.push(Severity::Warning, message);
            None
        }
        MenuItemSpec::Command { label, command } => {
            let label = label.clone().unwrap_or_else(|| DEFAULT_LABEL.to_string());
            let enabled = command.as_ref().is_some_and(|c| !c.is_inert());
            if !enabled {
                report.push(
                    Severity::Warning,
                    format!("Menu item '{}' in menu '{}' has no command; disabled", label, menu),
                );
            }
            Some(MenuEntry::Command {
                label,
                command: command.clone(),
                enabled,
            })
        }
    }
}
