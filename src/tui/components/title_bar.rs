//! # TitleBar Component
//!
//! Top bar showing where the reader is: `"Lira | Book > Chapter"`.

use crate::tui::component::Component;
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::text::Span;

pub struct TitleBar {
    /// Breadcrumb of the active view (e.g. "Books", "Python > Basics")
    pub breadcrumb: String,
}

impl TitleBar {
    pub fn new(breadcrumb: String) -> Self {
        Self { breadcrumb }
    }

    pub fn text(&self) -> String {
        format!("Lira | {}", self.breadcrumb)
    }
}

impl Component for TitleBar {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        frame.render_widget(Span::raw(self.text()), area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    #[test]
    fn test_title_bar_shows_breadcrumb() {
        let mut title_bar = TitleBar::new("Book0 > Chapter1".to_string());
        let mut terminal = Terminal::new(TestBackend::new(80, 1)).unwrap();
        terminal.draw(|f| title_bar.render(f, f.area())).unwrap();
        let text: String = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect();
        assert!(text.starts_with("Lira | Book0 > Chapter1"));
    }
}
