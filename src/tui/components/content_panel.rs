//! # Content Panel Component
//!
//! Shows the rendered section (or the welcome label before anything has
//! been opened). Span text may carry line breaks; they split lines here.

use ratatui::Frame;
use ratatui::layout::{Position, Rect};
use ratatui::text::{Line, Span, Text};
use ratatui::widgets::{Block, Padding, Paragraph, Wrap};

use crate::core::render::{StyleClass, StyledSpan};
use crate::tui::component::Component;
use crate::tui::surface::ReaderSurface;
use crate::tui::theme::Theme;

pub const WELCOME: &str = "Welcome to Lira! :)";

/// Layout from the most recent draw.
#[derive(Debug, Default)]
pub struct ContentPanelState {
    pub area: Rect,
    pub viewport_height: u16,
}

impl ContentPanelState {
    pub fn contains(&self, col: u16, row: u16) -> bool {
        self.area.contains(Position::new(col, row))
    }
}

/// Lay spans out as lines, starting a new line at every `\n`.
pub fn spans_to_text(spans: &[StyledSpan], theme: &Theme) -> Text<'static> {
    let mut lines: Vec<Line<'static>> = vec![Line::default()];
    for span in spans {
        let style = theme.style(span.style);
        for (i, piece) in span.text.split('\n').enumerate() {
            if i > 0 {
                lines.push(Line::default());
            }
            if !piece.is_empty()
                && let Some(line) = lines.last_mut()
            {
                // ratatui renders \t as zero-width
                line.push_span(Span::styled(piece.replace('\t', "    "), style));
            }
        }
    }
    Text::from(lines)
}

pub struct ContentPanel<'a> {
    surface: &'a mut ReaderSurface,
    theme: &'a Theme,
    state: &'a mut ContentPanelState,
}

impl<'a> ContentPanel<'a> {
    pub fn new(
        surface: &'a mut ReaderSurface,
        theme: &'a Theme,
        state: &'a mut ContentPanelState,
    ) -> Self {
        Self {
            surface,
            theme,
            state,
        }
    }
}

impl Component for ContentPanel<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let block = Block::default().padding(Padding::uniform(1));
        let inner = block.inner(area);
        self.state.area = area;
        self.state.viewport_height = inner.height;

        let text = match self.surface.content() {
            Some(spans) => spans_to_text(spans, self.theme),
            None => Text::from(Span::styled(WELCOME, self.theme.style(StyleClass::Text))),
        };
        let paragraph = Paragraph::new(text)
            .style(self.theme.style(StyleClass::Text))
            .wrap(Wrap { trim: false });

        // Don't let the view scroll past the last line.
        let total = paragraph.line_count(inner.width) as u16;
        let max_scroll = total.saturating_sub(inner.height);
        if self.surface.scroll > max_scroll {
            self.surface.scroll = max_scroll;
        }

        frame.render_widget(paragraph.scroll((self.surface.scroll, 0)).block(block), area);
    }
}
