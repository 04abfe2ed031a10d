//! Theme application: settings → per-widget style options

use crate::theme::settings::ThemeSettings;
use crate::value::{Options, Value};
use crate::widget::{Family, Widget, WidgetData, WidgetKind};

struct StyleBuilder<'a> {
    theme: &'a ThemeSettings,
    options: Options,
}

impl<'a> StyleBuilder<'a> {
    fn new(theme: &'a ThemeSettings) -> Self {
        Self {
            theme,
            options: Options::new(),
        }
    }

    /// Copy a theme key into an option
    fn key(mut self, option: &str, theme_key: &str, default: &str) -> Self {
        let value = self.theme.get_string(theme_key, default);
        self.options.insert(option.to_string(), Value::from(value));
        self
    }

    fn set(mut self, option: &str, value: impl Into<Value>) -> Self {
        self.options.insert(option.to_string(), value.into());
        self
    }

    fn font(mut self, style: Option<&str>) -> Self {
        let font = self.theme.font(style);
        self.options.insert("font".to_string(), font);
        self
    }

    fn build(self) -> Options {
        self.options
    }
}

/// Style options for a widget, keyed by its kind
///
/// Themed-family widgets get the options of their named style instead.
pub fn widget_style(theme: &ThemeSettings, widget: &Widget) -> Options {
    if widget.family == Family::Themed {
        return widget
            .kind
            .style_class()
            .map(|class| named_style(theme, class))
            .unwrap_or_default();
    }

    let s = StyleBuilder::new(theme);
    let frame_bg = theme.get_string("frame_bg", "#f0f0f0");
    match (widget.kind, &widget.data) {
        (WidgetKind::Window, _) => s.key("bg", "root_bg", "#f0f0f0").build(),
        (WidgetKind::Frame, _) => s.key("bg", "frame_bg", "#f0f0f0").build(),
        (WidgetKind::Label, _) => s
            .font(None)
            .key("fg", "label_fg", "#000000")
            .key("bg", "label_bg", "#f0f0f0")
            .build(),
        (WidgetKind::Entry, _) => s
            .font(None)
            .key("bg", "entry_bg", "#ffffff")
            .key("fg", "entry_fg", "#000000")
            .set("relief", "sunken")
            .set("bd", 1)
            .build(),
        (WidgetKind::Button, _) => s
            .font(None)
            .key("bg", "button_bg", "#007BFF")
            .key("fg", "button_fg", "#ffffff")
            .key("activebackground", "button_active_bg", "#0056b3")
            .key("activeforeground", "button_active_fg", "#ffffff")
            .key("relief", "button_relief", "raised")
            .set("bd", 1)
            .build(),
        (WidgetKind::Checkbutton, _) => s
            .font(None)
            .key("bg", "checkbutton_bg", "#f0f0f0")
            .key("activebackground", "checkbutton_bg", "#f0f0f0")
            .build(),
        (WidgetKind::Radiobutton, _) => s
            .font(None)
            .key("bg", "radiobutton_bg", "#f0f0f0")
            .key("activebackground", "radiobutton_bg", "#f0f0f0")
            .build(),
        (WidgetKind::Text, _) => s
            .font(None)
            .key("bg", "text_bg", "#ffffff")
            .key("fg", "text_fg", "#000000")
            .set("relief", "sunken")
            .set("bd", 1)
            .build(),
        (WidgetKind::Listbox, _) => s
            .font(None)
            .key("bg", "listbox_bg", "#ffffff")
            .key("fg", "listbox_fg", "#000000")
            .set("relief", "sunken")
            .set("bd", 1)
            .build(),
        (WidgetKind::Scale, _) => s
            .font(None)
            .key("bg", "scale_bg", "#f0f0f0")
            .key("troughcolor", "scale_troughcolor", "#d3d3d3")
            .set("sliderrelief", "raised")
            .set("highlightthickness", 0)
            .build(),
        (WidgetKind::Spinbox, _) => s
            .font(None)
            .key("bg", "entry_bg", "#ffffff")
            .key("fg", "entry_fg", "#000000")
            .key("buttonbackground", "frame_bg", "#f0f0f0")
            .set("relief", "sunken")
            .set("bd", 1)
            .build(),
        (WidgetKind::LabelFrame, _) => s
            .key("fg", "label_fg", "#000000")
            .key("bg", "frame_bg", "#f0f0f0")
            .font(Some("bold"))
            .build(),
        (WidgetKind::Canvas, _) => s
            .key("bg", "canvas_bg", "#ffffff")
            .set("highlightthickness", 0)
            .build(),
        (WidgetKind::Card, _) => s
            .key("bg", "card_bg", "#ffffff")
            .key("highlightbackground", "card_border", "#dddddd")
            .key("highlightcolor", "card_border", "#dddddd")
            .set("relief", "solid")
            .set("bd", 1)
            .build(),
        (WidgetKind::InfoBox, WidgetData::InfoBox(info)) => s
            .key("bg", info.background_key(), "#d9edf7")
            .key("fg", "label_fg", "#000000")
            .set("relief", "solid")
            .set("bd", 1)
            .build(),
        (WidgetKind::Picture, _) => s.key("bg", "picture_bg", &frame_bg).build(),
        (WidgetKind::ColorPicker, _) => s
            .key("bg", "colorpicker_bg", &frame_bg)
            .key("highlightbackground", "colorpicker_display_border", "#a0a0a0")
            .build(),
        _ => Options::new(),
    }
}

/// Options of a named style of the themed widget set
pub fn named_style(theme: &ThemeSettings, class: &str) -> Options {
    let s = StyleBuilder::new(theme);
    match class {
        "TSeparator" => s.key("background", "separator_bg", "#cccccc").build(),
        "TNotebook" => s
            .key("background", "notebook_bg", "#f0f0f0")
            .set("tabmargins", vec![2, 5, 2, 0])
            .build(),
        "TNotebook.Tab" => s
            .key("background", "notebook_tab_bg", "#d9d9d9")
            .key("foreground", "notebook_tab_fg", "#000000")
            .key("selectedbackground", "notebook_tab_active_bg", "#f0f0f0")
            .set("padding", vec![10, 2])
            .font(None)
            .build(),
        "Treeview" => {
            let rowheight = (theme.get_number("font_size", 10.0) * 2.5) as i64;
            s.key("background", "treeview_bg", "#ffffff")
                .key("foreground", "treeview_fg", "#000000")
                .key("fieldbackground", "treeview_field_bg", "#ffffff")
                .set("rowheight", rowheight)
                .font(None)
                .build()
        }
        "Treeview.Heading" => s
            .key("background", "treeview_heading_bg", "#e1e1e1")
            .key("foreground", "treeview_heading_fg", "#000000")
            .key("relief", "treeview_heading_relief", "raised")
            .font(Some("bold"))
            .build(),
        "TButton" | "TCheckbutton" | "TRadiobutton" | "TCombobox" | "TEntry" | "TScale"
        | "TSpinbox" => s.font(None).build(),
        _ => Options::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn widget(kind: WidgetKind, family: Family) -> Widget {
        Widget::new(kind, family, kind.as_str(), WidgetData::Plain)
    }

    #[test]
    fn test_button_style_follows_theme() {
        let mut theme = ThemeSettings::default();
        let style = widget_style(&theme, &widget(WidgetKind::Button, Family::Classic));
        assert_eq!(style["bg"], Value::from("#007BFF"));
        assert_eq!(style["bd"], Value::Int(1));

        theme.set("button_bg", "#123456");
        let style = widget_style(&theme, &widget(WidgetKind::Button, Family::Classic));
        assert_eq!(style["bg"], Value::from("#123456"));
    }

    #[test]
    fn test_themed_widget_uses_named_style() {
        let theme = ThemeSettings::default();
        let style = widget_style(&theme, &widget(WidgetKind::Treeview, Family::Themed));
        assert_eq!(style["rowheight"], Value::Int(25));
        assert!(!style.contains_key("bg"));
    }

    #[test]
    fn test_infobox_tint_and_picture_fallback() {
        let mut theme = ThemeSettings::default();
        let mut options = Options::new();
        options.insert("info_type".into(), Value::from("error"));
        let info = Widget::new(
            WidgetKind::InfoBox,
            Family::Composite,
            "InfoBox",
            WidgetData::InfoBox(crate::widget::InfoBox::from_options(&mut options)),
        );
        assert_eq!(widget_style(&theme, &info)["bg"], Value::from("#ED6666"));

        theme.set("frame_bg", "#eeeeee");
        theme.set("picture_bg", Value::Null);
        let picture = widget_style(&theme, &widget(WidgetKind::Picture, Family::Composite));
        assert_eq!(picture["bg"], Value::from("#eeeeee"));
    }

    #[test]
    fn test_unstyled_kinds() {
        let theme = ThemeSettings::default();
        let scrollbar = widget(WidgetKind::Scrollbar, Family::Classic);
        assert!(widget_style(&theme, &scrollbar).is_empty());
    }
}
