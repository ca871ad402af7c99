//! Style classes → ratatui styles.
//!
//! The default palette is white text on the terminal background, with the
//! focused list row on a blue bar. Config entries patch single classes.

use std::collections::{BTreeMap, HashMap};
use std::str::FromStr;

use log::warn;
use ratatui::style::{Color, Modifier, Style};

use crate::core::config::ThemeEntry;
use crate::core::render::StyleClass;

const WHITE: Color = Color::Rgb(0xff, 0xff, 0xff);
const GREY: Color = Color::Rgb(0xaa, 0xaa, 0xaa);
const PROMPT_BG: Color = Color::Rgb(0x99, 0x99, 0x99);
const FOCUS_BG: Color = Color::Rgb(0x00, 0x55, 0xaa);

#[derive(Debug, Clone)]
pub struct Theme {
    styles: HashMap<StyleClass, Style>,
}

impl Default for Theme {
    fn default() -> Self {
        let plain = Style::default().fg(WHITE);
        let styles = StyleClass::ALL
            .into_iter()
            .map(|class| {
                let style = match class {
                    StyleClass::Strong | StyleClass::Title => plain.add_modifier(Modifier::BOLD),
                    StyleClass::Emphasis => plain.add_modifier(Modifier::ITALIC),
                    StyleClass::Separator => Style::default().fg(GREY),
                    StyleClass::Prompt => plain.bg(PROMPT_BG),
                    StyleClass::ListItemFocused => plain.bg(FOCUS_BG),
                    _ => plain,
                };
                (class, style)
            })
            .collect();
        Self { styles }
    }
}

impl Theme {
    /// Default theme patched with the `[theme]` config table.
    pub fn from_config(overrides: &BTreeMap<String, ThemeEntry>) -> Self {
        let mut theme = Self::default();
        for (name, entry) in overrides {
            let Some(class) = StyleClass::from_name(name) else {
                warn!("Ignoring theme entry for unknown style class {:?}", name);
                continue;
            };
            let patched = apply(theme.style(class), name, entry);
            theme.styles.insert(class, patched);
        }
        theme
    }

    /// Style for `class`, plain text style if somehow unset.
    pub fn style(&self, class: StyleClass) -> Style {
        self.styles
            .get(&class)
            .or_else(|| self.styles.get(&StyleClass::Text))
            .copied()
            .unwrap_or_default()
    }
}

fn apply(mut style: Style, name: &str, entry: &ThemeEntry) -> Style {
    if let Some(fg) = entry.fg.as_deref().and_then(|c| parse_color(name, c)) {
        style = style.fg(fg);
    }
    if let Some(bg) = entry.bg.as_deref().and_then(|c| parse_color(name, c)) {
        style = style.bg(bg);
    }
    style = match entry.bold {
        Some(true) => style.add_modifier(Modifier::BOLD),
        Some(false) => style.remove_modifier(Modifier::BOLD),
        None => style,
    };
    match entry.italic {
        Some(true) => style.add_modifier(Modifier::ITALIC),
        Some(false) => style.remove_modifier(Modifier::ITALIC),
        None => style,
    }
}

fn parse_color(class: &str, value: &str) -> Option<Color> {
    match Color::from_str(value) {
        Ok(color) => Some(color),
        Err(_) => {
            warn!("Invalid colour {:?} for theme class {:?}", value, class);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_follow_the_palette() {
        let theme = Theme::default();
        assert_eq!(theme.style(StyleClass::Text).fg, Some(WHITE));
        assert!(theme.style(StyleClass::Strong).add_modifier.contains(Modifier::BOLD));
        assert!(theme.style(StyleClass::Emphasis).add_modifier.contains(Modifier::ITALIC));
        assert_eq!(theme.style(StyleClass::ListItemFocused).bg, Some(FOCUS_BG));
        assert_eq!(theme.style(StyleClass::Prompt).bg, Some(PROMPT_BG));
    }

    #[test]
    fn overrides_patch_only_their_class() {
        let mut overrides = BTreeMap::new();
        overrides.insert(
            "list-item.focused".to_string(),
            ThemeEntry {
                bg: Some("red".to_string()),
                bold: Some(true),
                ..Default::default()
            },
        );
        let theme = Theme::from_config(&overrides);
        let focused = theme.style(StyleClass::ListItemFocused);
        assert_eq!(focused.bg, Some(Color::Red));
        assert_eq!(focused.fg, Some(WHITE));
        assert!(focused.add_modifier.contains(Modifier::BOLD));
        assert_eq!(theme.style(StyleClass::Prompt).bg, Some(PROMPT_BG));
    }

    #[test]
    fn bad_entries_are_ignored() {
        let mut overrides = BTreeMap::new();
        overrides.insert(
            "text".to_string(),
            ThemeEntry {
                fg: Some("not-a-colour".to_string()),
                ..Default::default()
            },
        );
        overrides.insert("sparkles".to_string(), ThemeEntry::default());
        let theme = Theme::from_config(&overrides);
        assert_eq!(theme.style(StyleClass::Text).fg, Some(WHITE));
    }

    #[test]
    fn hex_colours_parse() {
        let mut overrides = BTreeMap::new();
        overrides.insert(
            "separator".to_string(),
            ThemeEntry {
                fg: Some("#123456".to_string()),
                ..Default::default()
            },
        );
        let theme = Theme::from_config(&overrides);
        assert_eq!(
            theme.style(StyleClass::Separator).fg,
            Some(Color::Rgb(0x12, 0x34, 0x56))
        );
    }
}
