//! Theme module - settings, colors and per-widget styling

pub mod color;
pub mod settings;
pub mod style;

// Public API re-exports
pub use color::{Color, ColorError};
pub use settings::ThemeSettings;
pub use style::{named_style, widget_style};
