//! SimpleGUI library
//!
//! Builds a live widget tree from a declarative layout document (rows or
//! grid, JSON / YAML / TOML) and exposes it through a uniform facade. The
//! widget tree is headless: it records kinds, options, theme styles,
//! placements, bindings and command slots for a native backend to mirror.

pub mod app;
pub mod binding;
pub mod command;
pub mod config;
pub mod error;
pub mod facade;
pub mod layout;
pub mod logging;
pub mod menu;
pub mod theme;
pub mod validation;
pub mod value;
pub mod widget;

pub use app::App;
pub use binding::{Binding, BindingKind, BindingStore};
pub use command::{CommandFn, CommandId, CommandResolver, CommandSlot, CommandTable};
pub use config::AppConfig;
pub use error::{BindingError, ConfigError, ConstructionError, DocumentError, ThemeError};
pub use facade::Gui;
pub use layout::{BuildReport, LayoutDocument};
pub use theme::ThemeSettings;
pub use value::{Options, Value};
