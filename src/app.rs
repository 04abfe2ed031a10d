//! Application: the widget facade plus commands, menu and user state
//!
//! Commands receive `&mut App<S>`; everything they need lives on the app,
//! either in the [`Gui`] (reachable through `Deref`) or in `state`.

use std::ops::{Deref, DerefMut};

use tracing::{debug, info, warn};

use crate::command::{CommandSlot, CommandTable};
use crate::config::AppConfig;
use crate::facade::Gui;
use crate::layout::builder::BuildReport;
use crate::layout::document::LayoutDocument;
use crate::menu::{MenuBar, MenuEntry};
use crate::value::Value;
use crate::widget::WidgetKind;

pub struct App<S = ()> {
    gui: Gui,
    commands: CommandTable<S>,
    menu: Option<MenuBar>,
    /// Application state handed to every command through the app
    pub state: S,
}

impl<S> Deref for App<S> {
    type Target = Gui;

    fn deref(&self) -> &Gui {
        &self.gui
    }
}

impl<S> DerefMut for App<S> {
    fn deref_mut(&mut self) -> &mut Gui {
        &mut self.gui
    }
}

impl<S> App<S> {
    pub fn new(gui: Gui, commands: CommandTable<S>, state: S) -> Self {
        Self {
            gui,
            commands,
            menu: None,
            state,
        }
    }

    /// App with the configured window title and theme
    ///
    /// A theme that fails to load is logged and replaced by the defaults.
    pub fn from_config(config: &AppConfig, commands: CommandTable<S>, state: S) -> Self {
        let theme = config.theme.settings_or_default();
        Self::new(Gui::new(&config.window.title, theme), commands, state)
    }

    pub fn commands(&self) -> &CommandTable<S> {
        &self.commands
    }

    pub fn menu(&self) -> Option<&MenuBar> {
        self.menu.as_ref()
    }

    /// Resolve commands, build the layout, then the menu
    pub fn setup_layout(&mut self, document: &LayoutDocument) -> BuildReport {
        let resolved = document.resolve(&self.commands);
        let (layout, menu) = resolved.without_menu();
        let mut report = self.gui.build(&layout);
        self.menu = menu.map(|menus| MenuBar::build(&menus, &mut report));
        info!(
            warnings = report.warnings().count(),
            errors = report.errors().count(),
            "Layout set up"
        );
        report
    }

    /// Run the command in `slot`, if it resolved
    ///
    /// Returns whether a command ran.
    pub fn fire(&mut self, slot: Option<&CommandSlot>) -> bool {
        let Some(slot) = slot else {
            return false;
        };
        let Some(command) = slot.id().and_then(|id| self.commands.get(id)) else {
            debug!(command = slot.name(), "Inert command, nothing to run");
            return false;
        };
        debug!(command = slot.name(), "Running command");
        command(self);
        true
    }

    /// Click a widget: buttons fire, checkbuttons toggle, radio buttons select
    ///
    /// Returns whether a command ran. Disabled widgets and placeholders
    /// ignore the click.
    pub fn invoke(&mut self, name: &str) -> bool {
        let Some(widget) = self.gui.get_widget(name) else {
            return false;
        };
        if widget.is_placeholder() || widget.is_disabled() {
            debug!(name, "Ignoring click on inactive widget");
            return false;
        }
        let command = widget.command.clone();

        match (widget.kind, &widget.binding) {
            (WidgetKind::Checkbutton, Some(binding)) => {
                let on = widget.option("onvalue").cloned().unwrap_or(Value::Int(1));
                let off = widget.option("offvalue").cloned().unwrap_or(Value::Int(0));
                let next = if binding.get() == on { off } else { on };
                if let Err(e) = binding.set(next) {
                    warn!(name, error = %e, "Cannot toggle");
                }
            }
            (WidgetKind::Radiobutton, Some(binding)) => {
                if let Some(value) = widget.option("value").cloned() {
                    if let Err(e) = binding.set(value) {
                        warn!(name, error = %e, "Cannot select");
                    }
                }
            }
            (WidgetKind::Button | WidgetKind::Checkbutton | WidgetKind::Radiobutton, _) => {}
            (kind, _) => {
                warn!(name, %kind, "Widget cannot be clicked");
                return false;
            }
        }
        self.fire(command.as_ref())
    }

    /// Pick a colour in a colour picker, then run its command
    pub fn choose_color(&mut self, name: &str, color: &str) -> bool {
        if !self.gui.set_option(name, "color", color) {
            return false;
        }
        let command = self.gui.get_widget(name).and_then(|w| w.command.clone());
        self.fire(command.as_ref())
    }

    /// Move a scale or spinbox to `value`, then run its command
    pub fn adjust(&mut self, name: &str, value: impl Into<Value>) -> bool {
        let command = match self.gui.get_widget(name) {
            Some(w) if matches!(w.kind, WidgetKind::Scale | WidgetKind::Spinbox) => {
                if w.is_disabled() || w.is_placeholder() {
                    return false;
                }
                w.command.clone()
            }
            Some(w) => {
                warn!(name, kind = %w.kind, "Widget cannot be adjusted");
                return false;
            }
            None => return false,
        };
        if !self.gui.set_option(name, "value", value) {
            return false;
        }
        self.fire(command.as_ref())
    }

    /// Run an enabled menu item's command
    pub fn invoke_menu(&mut self, menu: &str, item: &str) -> bool {
        let entry = self
            .menu
            .as_ref()
            .and_then(|bar| bar.menu(menu))
            .and_then(|m| m.entry(item))
            .cloned();
        match entry {
            Some(MenuEntry::Command {
                command,
                enabled: true,
                ..
            }) => self.fire(command.as_ref()),
            Some(_) => {
                debug!(menu, item, "Menu item is disabled");
                false
            }
            None => {
                warn!(menu, item, "Menu item not found");
                false
            }
        }
    }
}
