//! Command table and resolution
//!
//! Layout documents name commands with strings. The table maps those names to
//! typed callables once, at startup; widgets only ever hold a [`CommandSlot`].

use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

use tracing::warn;

use crate::app::App;

/// Callable fired by a widget; receives the running application as its only argument
pub type CommandFn<S> = Rc<dyn Fn(&mut App<S>)>;

/// Index of a resolved command in its table
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct CommandId(pub usize);

/// Command attached to a widget or menu item
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CommandSlot {
    /// Resolved; firing the widget runs the command
    Bound { id: CommandId, name: String },
    /// Name was not found; the control renders but does nothing
    Inert { name: String },
}

impl CommandSlot {
    pub fn id(&self) -> Option<CommandId> {
        match self {
            CommandSlot::Bound { id, .. } => Some(*id),
            CommandSlot::Inert { .. } => None,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            CommandSlot::Bound { name, .. } | CommandSlot::Inert { name } => name,
        }
    }

    pub fn is_inert(&self) -> bool {
        matches!(self, CommandSlot::Inert { .. })
    }
}

/// Resolves command names found in documents
pub trait CommandResolver {
    /// Look up a name; `None` when the table has no such command
    fn lookup(&self, name: &str) -> Option<CommandId>;

    /// Resolve into a slot, logging unresolved names
    fn resolve(&self, name: &str) -> CommandSlot {
        match self.lookup(name) {
            Some(id) => CommandSlot::Bound {
                id,
                name: name.to_string(),
            },
            None => {
                warn!(command = name, "command found in layout but not in command table");
                CommandSlot::Inert {
                    name: name.to_string(),
                }
            }
        }
    }
}

/// Command name → callable
pub struct CommandTable<S> {
    ids: HashMap<String, CommandId>,
    commands: Vec<CommandFn<S>>,
}

impl<S> Default for CommandTable<S> {
    fn default() -> Self {
        Self {
            ids: HashMap::new(),
            commands: Vec::new(),
        }
    }
}

impl<S> CommandTable<S> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a command; a later registration under the same name replaces it
    pub fn with(mut self, name: &str, command: impl Fn(&mut App<S>) + 'static) -> Self {
        self.register(name, command);
        self
    }

    /// Register a command under a name
    pub fn register(&mut self, name: &str, command: impl Fn(&mut App<S>) + 'static) {
        let command: CommandFn<S> = Rc::new(command);
        match self.ids.get(name) {
            Some(id) => self.commands[id.0] = command,
            None => {
                self.ids.insert(name.to_string(), CommandId(self.commands.len()));
                self.commands.push(command);
            }
        }
    }

    /// Callable for a resolved id
    pub fn get(&self, id: CommandId) -> Option<CommandFn<S>> {
        self.commands.get(id.0).cloned()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.ids.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}

impl<S> CommandResolver for CommandTable<S> {
    fn lookup(&self, name: &str) -> Option<CommandId> {
        self.ids.get(name).copied()
    }
}

impl<S> fmt::Debug for CommandTable<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<&String> = self.ids.keys().collect();
        names.sort();
        f.debug_struct("CommandTable").field("commands", &names).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_known_and_unknown() {
        let table: CommandTable<()> = CommandTable::new().with("submit", |_| {});
        let slot = table.resolve("submit");
        assert_eq!(slot.id(), Some(CommandId(0)));
        assert!(!slot.is_inert());

        let slot = table.resolve("missing");
        assert!(slot.is_inert());
        assert_eq!(slot.name(), "missing");
    }

    #[test]
    fn test_reregister_keeps_id() {
        let mut table: CommandTable<()> = CommandTable::new();
        table.register("a", |_| {});
        table.register("b", |_| {});
        table.register("a", |_| {});
        assert_eq!(table.len(), 2);
        assert_eq!(table.lookup("a"), Some(CommandId(0)));
        assert_eq!(table.lookup("b"), Some(CommandId(1)));
    }
}
