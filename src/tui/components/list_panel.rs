//! # List Panel Component
//!
//! Draws the current view's title and its `SelectableList`, and maps
//! terminal events back onto list inputs.
//!
//! Follows the persistent state + transient wrapper pattern:
//! - `ListPanelState` lives in `TuiState` (layout from the last draw, used
//!   for hit testing and scrolling)
//! - `ListPanel` is created each frame with borrowed state
//!
//! ## Row Layout
//!
//! ```text
//!   • 2.1. First section title that is long
//!          enough to wrap
//!     2.2. Second section
//!   ^^^^^^ line prefix: commit marker + bullet; continuation lines get
//!          blank padding of the same width
//! ```

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Position, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Padding, Paragraph, Wrap};
use unicode_width::UnicodeWidthStr;

use crate::core::list::{ListInput, SelectableList};
use crate::core::render::{StyleClass, StyledSpan};
use crate::tui::component::{Component, EventHandler};
use crate::tui::event::TuiEvent;
use crate::tui::theme::Theme;

const EMPTY_PLACEHOLDER: &str = "(nothing here)";

/// Layout from the most recent draw.
#[derive(Debug, Default)]
pub struct ListPanelState {
    /// Whole panel, title included.
    pub panel: Rect,
    /// Area the rows are drawn into.
    pub rows_area: Rect,
    /// Element index for every wrapped line, top to bottom.
    pub rows: Vec<usize>,
    /// First wrapped line shown.
    pub offset: usize,
    /// Screen position of the focused row, set when the panel has focus.
    pub cursor: Option<Position>,
}

impl ListPanelState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, col: u16, row: u16) -> bool {
        self.panel.contains(Position::new(col, row))
    }

    /// Drop the row map until the next draw, so clicks hit nothing.
    pub fn forget_rows(&mut self) {
        self.rows.clear();
        self.offset = 0;
        self.cursor = None;
    }

    /// Element drawn at the given screen cell, if any.
    pub fn element_at(&self, col: u16, row: u16) -> Option<usize> {
        if !self.rows_area.contains(Position::new(col, row)) {
            return None;
        }
        let line = self.offset + usize::from(row - self.rows_area.y);
        self.rows.get(line).copied()
    }

    /// Keep the focused element's lines inside a viewport of `height` lines.
    fn scroll_to(&mut self, element: usize, height: usize) {
        let Some(first) = self.rows.iter().position(|&e| e == element) else {
            self.offset = 0;
            return;
        };
        let last = self.rows.iter().rposition(|&e| e == element).unwrap_or(first);
        if first < self.offset {
            self.offset = first;
        } else if height > 0 && last >= self.offset + height {
            self.offset = (last + 1).saturating_sub(height).min(first);
        }
        let max_offset = self.rows.len().saturating_sub(height);
        self.offset = self.offset.min(max_offset);
    }
}

impl EventHandler for ListPanelState {
    type Event = ListInput;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<ListInput> {
        match *event {
            TuiEvent::Up => Some(ListInput::Previous),
            TuiEvent::Down => Some(ListInput::Next),
            TuiEvent::BackTab => Some(ListInput::TabPrevious),
            TuiEvent::Tab => Some(ListInput::TabNext),
            TuiEvent::Select => Some(ListInput::CommitFocused),
            TuiEvent::MouseRelease(col, row) => self.element_at(col, row).map(ListInput::Release),
            TuiEvent::ScrollUp(col, row) if self.contains(col, row) => Some(ListInput::Previous),
            TuiEvent::ScrollDown(col, row) if self.contains(col, row) => Some(ListInput::Next),
            _ => None,
        }
    }
}

/// Build the wrapped, prefixed lines for `list` at the given width, along
/// with the element each line belongs to.
pub fn list_lines<M: Clone>(
    list: &SelectableList<M>,
    theme: &Theme,
    width: u16,
) -> (Vec<Line<'static>>, Vec<usize>) {
    let mut lines = Vec::new();
    let mut rows = Vec::new();
    let prefix_style = theme.style(StyleClass::ListItem);

    for fragment in list.fragments() {
        let text = fragment.text.trim_end_matches('\n');
        let prefix_width = list.line_prefix(fragment.element, 0).width();
        let available = usize::from(width).saturating_sub(prefix_width).max(1);
        let options = textwrap::Options::new(available)
            .break_words(true)
            .word_separator(textwrap::WordSeparator::AsciiSpace);
        let mut wrapped = textwrap::wrap(text, options);
        if wrapped.is_empty() {
            wrapped.push("".into());
        }
        let style = theme.style(fragment.style);
        for (wrap_count, segment) in wrapped.into_iter().enumerate() {
            lines.push(Line::from(vec![
                Span::styled(list.line_prefix(fragment.element, wrap_count), prefix_style),
                Span::styled(segment.into_owned(), style),
            ]));
            rows.push(fragment.element);
        }
    }
    (lines, rows)
}

pub fn title_line(title: &[StyledSpan], theme: &Theme) -> Line<'static> {
    Line::from(
        title
            .iter()
            .map(|span| Span::styled(span.text.clone(), theme.style(span.style)))
            .collect::<Vec<_>>(),
    )
}

/// Transient render wrapper for the navigation panel.
pub struct ListPanel<'a, M> {
    list: &'a SelectableList<M>,
    title: &'a [StyledSpan],
    theme: &'a Theme,
    focused: bool,
    state: &'a mut ListPanelState,
}

impl<'a, M: Clone> ListPanel<'a, M> {
    pub fn new(
        list: &'a SelectableList<M>,
        title: &'a [StyledSpan],
        theme: &'a Theme,
        focused: bool,
        state: &'a mut ListPanelState,
    ) -> Self {
        Self {
            list,
            title,
            theme,
            focused,
            state,
        }
    }
}

impl<M: Clone> Component for ListPanel<'_, M> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let block = Block::default().padding(Padding::uniform(1));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let title = Paragraph::new(title_line(self.title, self.theme)).wrap(Wrap { trim: true });
        let title_height = (title.line_count(inner.width) as u16).min(inner.height);
        let [title_area, _, rows_area] = Layout::vertical([
            Constraint::Length(title_height),
            Constraint::Length(1),
            Constraint::Min(0),
        ])
        .areas(inner);
        frame.render_widget(title, title_area);

        self.state.panel = area;
        self.state.rows_area = rows_area;
        self.state.cursor = None;

        if self.list.is_empty() {
            self.state.rows.clear();
            self.state.offset = 0;
            let placeholder = Paragraph::new(Span::styled(
                EMPTY_PLACEHOLDER,
                self.theme.style(StyleClass::Separator),
            ));
            frame.render_widget(placeholder, rows_area);
            return;
        }

        let (lines, rows) = list_lines(self.list, self.theme, rows_area.width);
        self.state.rows = rows;
        let height = usize::from(rows_area.height);
        self.state.scroll_to(self.list.focus_index(), height);

        let offset = self.state.offset;
        let visible: Vec<Line> = lines.into_iter().skip(offset).take(height).collect();
        frame.render_widget(Paragraph::new(visible), rows_area);

        if self.focused
            && let Some(first) = self
                .state
                .rows
                .iter()
                .position(|&e| e == self.list.focus_index())
            && first >= offset
            && first < offset + height
        {
            let (col, _) = self.list.cursor();
            self.state.cursor = Some(Position::new(
                rows_area.x + col,
                rows_area.y + (first - offset) as u16,
            ));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::list::ListElement;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn list(texts: &[&str]) -> SelectableList<()> {
        SelectableList::new(texts.iter().map(|t| ListElement::new(*t)).collect())
            .with_bullet(|line| format!("{}. ", line + 1))
    }

    fn draw(
        list: &SelectableList<()>,
        state: &mut ListPanelState,
        width: u16,
        height: u16,
    ) -> Vec<String> {
        let theme = Theme::default();
        let title = vec![StyledSpan::new(StyleClass::Title, "Books")];
        let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
        terminal
            .draw(|f| ListPanel::new(list, &title, &theme, true, state).render(f, f.area()))
            .unwrap();
        let buffer = terminal.backend().buffer();
        (0..height)
            .map(|y| {
                (0..width)
                    .map(|x| buffer[(x, y)].symbol().to_string())
                    .collect::<String>()
            })
            .collect()
    }

    #[test]
    fn rows_are_prefixed_and_titled() {
        let list = list(&["Alpha", "Beta"]);
        let mut state = ListPanelState::new();
        let screen = draw(&list, &mut state, 30, 8);
        assert!(screen[1].contains("Books"));
        assert!(screen[3].contains("1. Alpha"));
        assert!(screen[4].contains("2. Beta"));
        assert_eq!(state.rows, vec![0, 1]);
        assert_eq!(state.cursor, Some(Position::new(1, 3)));
    }

    #[test]
    fn wrapped_rows_get_blank_continuation_prefix() {
        let list = list(&["one two three four five"]);
        let theme = Theme::default();
        let (lines, rows) = list_lines(&list, &theme, 12);
        assert!(lines.len() > 1);
        assert!(rows.iter().all(|&r| r == 0));
        assert_eq!(lines[0].spans[0].content, "1. ");
        assert_eq!(lines[1].spans[0].content, "   ");
    }

    #[test]
    fn focused_row_uses_focused_style() {
        let mut list = list(&["Alpha", "Beta"]);
        list.focus(1).unwrap();
        let theme = Theme::default();
        let (lines, _) = list_lines(&list, &theme, 30);
        assert_eq!(lines[1].spans[1].style, theme.style(StyleClass::ListItemFocused));
        assert_eq!(lines[0].spans[1].style, theme.style(StyleClass::ListItem));
    }

    #[test]
    fn release_maps_to_element_under_pointer() {
        let list = list(&["Alpha", "Beta", "Gamma"]);
        let mut state = ListPanelState::new();
        draw(&list, &mut state, 30, 10);
        assert_eq!(
            state.handle_event(&TuiEvent::MouseRelease(5, 4)),
            Some(ListInput::Release(1))
        );
        assert_eq!(state.handle_event(&TuiEvent::MouseRelease(5, 9)), None);
        assert_eq!(state.handle_event(&TuiEvent::Select), Some(ListInput::CommitFocused));
    }

    #[test]
    fn focused_row_is_scrolled_into_view() {
        let names: Vec<String> = (0..20).map(|i| format!("Item {i}")).collect();
        let refs: Vec<&str> = names.iter().map(String::as_str).collect();
        let mut list = list(&refs);
        list.focus(15).unwrap();
        let mut state = ListPanelState::new();
        let screen = draw(&list, &mut state, 30, 10);
        assert!(screen.iter().any(|l| l.contains("16. Item 15")));
        assert!(state.offset > 0);
    }

    #[test]
    fn empty_list_shows_placeholder() {
        let list = list(&[]);
        let mut state = ListPanelState::new();
        let screen = draw(&list, &mut state, 30, 8);
        assert!(screen[3].contains(EMPTY_PLACEHOLDER));
        assert!(state.rows.is_empty());
        assert_eq!(state.cursor, None);
    }
}
