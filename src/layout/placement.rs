//! Placement records: pack and grid options with per-kind defaults

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::value::{Options, Value};
use crate::widget::{Orient, WidgetKind};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Top,
    Bottom,
    Left,
    Right,
}

impl Side {
    fn parse(s: &str) -> Option<Self> {
        match s {
            "top" => Some(Side::Top),
            "bottom" => Some(Side::Bottom),
            "left" => Some(Side::Left),
            "right" => Some(Side::Right),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Side::Top => "top",
            Side::Bottom => "bottom",
            Side::Left => "left",
            Side::Right => "right",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Fill {
    None,
    X,
    Y,
    Both,
}

impl Fill {
    fn parse(s: &str) -> Option<Self> {
        match s {
            "none" => Some(Fill::None),
            "x" => Some(Fill::X),
            "y" => Some(Fill::Y),
            "both" => Some(Fill::Both),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Fill::None => "none",
            Fill::X => "x",
            Fill::Y => "y",
            Fill::Both => "both",
        }
    }
}

/// Padding on both sides of one axis
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct Pad {
    pub before: f64,
    pub after: f64,
}

impl Pad {
    pub fn uniform(amount: f64) -> Self {
        Self {
            before: amount,
            after: amount,
        }
    }

    /// A number, or a pair `[before, after]`
    pub fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::List(pair) if pair.len() == 2 => Some(Self {
                before: pair[0].as_f64()?,
                after: pair[1].as_f64()?,
            }),
            other => other.as_f64().map(Self::uniform),
        }
    }
}

impl fmt::Display for Pad {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.before == self.after {
            write!(f, "{}", self.before)
        } else {
            write!(f, "({},{})", self.before, self.after)
        }
    }
}

/// Sequential placement inside the parent
#[derive(Clone, Debug, PartialEq)]
pub struct Pack {
    pub side: Side,
    pub fill: Fill,
    pub expand: bool,
    pub padx: Pad,
    pub pady: Pad,
    pub ipadx: f64,
    pub ipady: f64,
    pub anchor: Option<String>,
}

impl Default for Pack {
    fn default() -> Self {
        Self {
            side: Side::Top,
            fill: Fill::None,
            expand: false,
            padx: Pad::default(),
            pady: Pad::default(),
            ipadx: 0.0,
            ipady: 0.0,
            anchor: None,
        }
    }
}

impl Pack {
    fn left(fill: Fill, expand: bool) -> Self {
        Self {
            side: Side::Left,
            fill,
            expand,
            padx: Pad::uniform(5.0),
            pady: Pad::uniform(2.0),
            ..Self::default()
        }
    }

    /// Default placement of a widget inside a row
    pub fn for_kind(kind: WidgetKind, orient: Orient) -> Self {
        match kind {
            WidgetKind::Entry
            | WidgetKind::Combobox
            | WidgetKind::Text
            | WidgetKind::Listbox
            | WidgetKind::Spinbox => Self::left(Fill::X, true),
            WidgetKind::Notebook
            | WidgetKind::Frame
            | WidgetKind::LabelFrame
            | WidgetKind::Canvas
            | WidgetKind::Treeview => Self::left(Fill::Both, true),
            WidgetKind::Separator => Self {
                side: Side::Top,
                fill: match orient {
                    Orient::Horizontal => Fill::X,
                    Orient::Vertical => Fill::Y,
                },
                expand: false,
                padx: Pad::uniform(5.0),
                pady: Pad::uniform(5.0),
                ..Self::default()
            },
            _ => Self::left(Fill::None, false),
        }
    }

    /// Frame holding a radio group
    pub fn group_frame() -> Self {
        Self {
            side: Side::Left,
            ..Self::default()
        }
    }

    /// Radio button inside its group frame
    pub fn group_member() -> Self {
        Self {
            side: Side::Left,
            padx: Pad::uniform(2.0),
            pady: Pad::uniform(2.0),
            ..Self::default()
        }
    }

    /// Override fields from document hints, key by key
    ///
    /// Returns a description of every hint that could not be applied.
    pub fn merge(&mut self, hints: &Options) -> Vec<String> {
        let mut problems = Vec::new();
        for (key, value) in hints {
            let applied = match key.as_str() {
                "side" => value.as_str().and_then(Side::parse).map(|s| self.side = s),
                "fill" => value.as_str().and_then(Fill::parse).map(|f| self.fill = f),
                "expand" => value.as_bool().map(|e| self.expand = e),
                "padx" => Pad::from_value(value).map(|p| self.padx = p),
                "pady" => Pad::from_value(value).map(|p| self.pady = p),
                "ipadx" => value.as_f64().map(|p| self.ipadx = p),
                "ipady" => value.as_f64().map(|p| self.ipady = p),
                "anchor" => value.as_str().map(|a| self.anchor = Some(a.to_string())),
                _ => {
                    problems.push(format!("unknown pack option '{}'", key));
                    continue;
                }
            };
            if applied.is_none() {
                problems.push(format!("invalid value {} for pack option '{}'", value, key));
            }
        }
        problems
    }
}

impl fmt::Display for Pack {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "pack(side={} fill={}", self.side.as_str(), self.fill.as_str())?;
        if self.expand {
            write!(f, " expand")?;
        }
        write!(f, " padx={} pady={}", self.padx, self.pady)?;
        if let Some(anchor) = &self.anchor {
            write!(f, " anchor={}", anchor)?;
        }
        write!(f, ")")
    }
}

/// Cell placement in the parent's grid
#[derive(Clone, Debug, PartialEq)]
pub struct Grid {
    pub row: u32,
    pub column: u32,
    pub rowspan: u32,
    pub columnspan: u32,
    pub sticky: String,
    pub padx: Pad,
    pub pady: Pad,
    pub ipadx: f64,
    pub ipady: f64,
}

impl Grid {
    /// Cell at `row`, `column` with the default padding of 5
    pub fn at(row: u32, column: u32) -> Self {
        Self {
            row,
            column,
            rowspan: 1,
            columnspan: 1,
            sticky: String::new(),
            padx: Pad::uniform(5.0),
            pady: Pad::uniform(5.0),
            ipadx: 0.0,
            ipady: 0.0,
        }
    }

    /// Override fields from document hints, key by key
    pub fn merge(&mut self, hints: &Options) -> Vec<String> {
        let mut problems = Vec::new();
        let count = |v: &Value| v.as_i64().filter(|n| *n >= 0).map(|n| n as u32);
        for (key, value) in hints {
            let applied = match key.as_str() {
                "row" => count(value).map(|n| self.row = n),
                "column" => count(value).map(|n| self.column = n),
                "rowspan" => count(value).filter(|n| *n > 0).map(|n| self.rowspan = n),
                "columnspan" => count(value).filter(|n| *n > 0).map(|n| self.columnspan = n),
                "sticky" => value
                    .as_str()
                    .filter(|s| s.chars().all(|c| "nsew".contains(c)))
                    .map(|s| self.sticky = s.to_string()),
                "padx" => Pad::from_value(value).map(|p| self.padx = p),
                "pady" => Pad::from_value(value).map(|p| self.pady = p),
                "ipadx" => value.as_f64().map(|p| self.ipadx = p),
                "ipady" => value.as_f64().map(|p| self.ipady = p),
                _ => {
                    problems.push(format!("unknown grid option '{}'", key));
                    continue;
                }
            };
            if applied.is_none() {
                problems.push(format!("invalid value {} for grid option '{}'", value, key));
            }
        }
        problems
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "grid(row={} column={}", self.row, self.column)?;
        if self.rowspan > 1 {
            write!(f, " rowspan={}", self.rowspan)?;
        }
        if self.columnspan > 1 {
            write!(f, " columnspan={}", self.columnspan)?;
        }
        if !self.sticky.is_empty() {
            write!(f, " sticky={}", self.sticky)?;
        }
        write!(f, " padx={} pady={})", self.padx, self.pady)
    }
}

/// How a widget is positioned in its parent
#[derive(Clone, Debug, PartialEq)]
pub enum Placement {
    Pack(Pack),
    Grid(Grid),
}

impl Placement {
    pub fn as_pack(&self) -> Option<&Pack> {
        match self {
            Placement::Pack(pack) => Some(pack),
            Placement::Grid(_) => None,
        }
    }

    pub fn as_grid(&self) -> Option<&Grid> {
        match self {
            Placement::Grid(grid) => Some(grid),
            Placement::Pack(_) => None,
        }
    }
}

impl fmt::Display for Placement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Placement::Pack(pack) => pack.fmt(f),
            Placement::Grid(grid) => grid.fmt(f),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hints(json: &str) -> Options {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_kind_defaults() {
        let entry = Pack::for_kind(WidgetKind::Entry, Orient::Vertical);
        assert_eq!((entry.side, entry.fill, entry.expand), (Side::Left, Fill::X, true));
        assert_eq!(entry.padx, Pad::uniform(5.0));
        assert_eq!(entry.pady, Pad::uniform(2.0));

        let canvas = Pack::for_kind(WidgetKind::Canvas, Orient::Vertical);
        assert_eq!((canvas.fill, canvas.expand), (Fill::Both, true));

        let button = Pack::for_kind(WidgetKind::Button, Orient::Vertical);
        assert_eq!((button.fill, button.expand), (Fill::None, false));

        let sep = Pack::for_kind(WidgetKind::Separator, Orient::Horizontal);
        assert_eq!((sep.side, sep.fill), (Side::Top, Fill::X));
        assert_eq!(sep.pady, Pad::uniform(5.0));
        assert_eq!(Pack::for_kind(WidgetKind::Separator, Orient::Vertical).fill, Fill::Y);
    }

    #[test]
    fn test_merge_is_key_by_key() {
        let mut pack = Pack::for_kind(WidgetKind::Button, Orient::Vertical);
        let problems = pack.merge(&hints(r#"{"side": "right", "padx": [0, 10]}"#));
        assert!(problems.is_empty());
        assert_eq!(pack.side, Side::Right);
        assert_eq!(pack.padx, Pad { before: 0.0, after: 10.0 });
        assert_eq!(pack.pady, Pad::uniform(2.0));
        assert_eq!(pack.to_string(), "pack(side=right fill=none padx=(0,10) pady=2)");
    }

    #[test]
    fn test_merge_reports_bad_hints() {
        let mut pack = Pack::default();
        let problems = pack.merge(&hints(r#"{"fill": "diagonal", "bogus": 1}"#));
        assert_eq!(problems.len(), 2);
        assert_eq!(pack.fill, Fill::None);
    }

    #[test]
    fn test_grid_defaults_and_merge() {
        let mut grid = Grid::at(1, 2);
        assert_eq!(grid.padx, Pad::uniform(5.0));
        let problems = grid.merge(&hints(r#"{"sticky": "nsew", "columnspan": 2, "pady": 0}"#));
        assert!(problems.is_empty());
        assert_eq!(grid.to_string(), "grid(row=1 column=2 columnspan=2 sticky=nsew padx=5 pady=0)");
    }
}
