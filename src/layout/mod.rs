//! Layout documents and the builder that realizes them

pub mod builder;
pub mod document;
pub mod placement;

pub use builder::{BuildReport, Diagnostic, LayoutBuilder, Severity};
pub use document::{
    ColumnItem, GridItem, GroupSpec, LayoutDocument, LayoutMode, MenuItemSpec, MenuSpec, Row,
    TabLayout, TabSpec, WidgetSpec,
};
pub use placement::{Fill, Grid, Pack, Pad, Placement, Side};
