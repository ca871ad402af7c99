//! # StatusBar Component
//!
//! Bottom line. Shows the last error while there is one, key hints
//! otherwise.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::text::Span;

use crate::core::render::StyleClass;
use crate::tui::component::Component;
use crate::tui::theme::Theme;

pub const KEY_HINTS: &str = " ↑↓ Move  Enter Open  Esc Back  Tab Switch panel  Ctrl+Q Quit ";

pub struct StatusBar<'a> {
    /// Empty when there is nothing to report
    pub status_message: &'a str,
    pub theme: &'a Theme,
}

impl<'a> StatusBar<'a> {
    pub fn new(status_message: &'a str, theme: &'a Theme) -> Self {
        Self {
            status_message,
            theme,
        }
    }

    fn span(&self) -> Span<'static> {
        if self.status_message.is_empty() {
            Span::styled(KEY_HINTS, self.theme.style(StyleClass::Separator))
        } else {
            Span::styled(
                format!(" {}", self.status_message),
                self.theme.style(StyleClass::Strong),
            )
        }
    }
}

impl Component for StatusBar<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        frame.render_widget(self.span(), area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn rendered(status: &str) -> String {
        let theme = Theme::default();
        let mut terminal = Terminal::new(TestBackend::new(80, 1)).unwrap();
        terminal
            .draw(|f| StatusBar::new(status, &theme).render(f, f.area()))
            .unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect()
    }

    #[test]
    fn test_status_bar_shows_hints_when_idle() {
        let text = rendered("");
        assert!(text.contains("Esc Back"));
    }

    #[test]
    fn test_status_bar_shows_message_instead_of_hints() {
        let text = rendered("nothing to select: the list is empty");
        assert!(text.contains("nothing to select"));
        assert!(!text.contains("Esc Back"));
    }
}
