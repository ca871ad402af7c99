//! # TUI Adapter
//!
//! The ratatui-specific layer. Handles terminal I/O, renders the UI,
//! and translates keyboard and mouse events into list inputs for the core.
//!
//! This is the only module that knows about ratatui and crossterm.
//!
//! ## Regions
//!
//! Two regions take keyboard focus:
//!
//! - **Navigation**: the current view's list. Up/Down move, Enter/Space
//!   commit, Tab/Shift-Tab move and hand over to the content panel at
//!   either end of the list.
//! - **Content**: the rendered section. Up/Down/PgUp/PgDn/Home/End scroll,
//!   Tab/Shift-Tab hand focus back.
//!
//! Esc/Backspace go back one level from either region. Ctrl+C/Ctrl+Q quit.
//!
//! ## Redraw Strategy
//!
//! Nothing animates, so the loop blocks on input and only redraws after
//! events. Drawing reads straight from the navigation stack and the
//! surface; handlers never draw.

mod component;
pub mod components;
pub mod event;
pub mod surface;
pub mod theme;
mod ui;

use log::{info, warn};
use std::io::{self, stdout};
use std::time::Duration;

use crossterm::cursor::{Hide, SetCursorStyle, Show};
use crossterm::event::{DisableMouseCapture, EnableMouseCapture};
use crossterm::execute;
use crossterm::terminal::SetTitle;
use ratatui::DefaultTerminal;

use crate::core::collection::Collection;
use crate::core::config::ResolvedConfig;
use crate::core::error::Result;
use crate::core::navigation::NavigationStack;
use crate::tui::component::EventHandler;
use crate::tui::components::{ContentPanelState, ListPanelState};
use crate::tui::event::{TuiEvent, poll_event_immediate, poll_event_timeout};
use crate::tui::surface::ReaderSurface;
use crate::tui::theme::Theme;

/// Lines moved per mouse-wheel notch in the content panel.
const WHEEL_LINES: i32 = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Region {
    Navigation,
    Content,
}

/// Presentation state plus the navigation stack it presents.
pub struct TuiState {
    pub nav: NavigationStack<ReaderSurface>,
    pub theme: Theme,
    pub nav_width: u16,
    pub focus: Region,
    pub list_panel: ListPanelState,
    pub content_panel: ContentPanelState,
    pub status_message: String,
}

impl TuiState {
    pub fn new(collection: Collection, config: &ResolvedConfig) -> Result<Self> {
        Ok(Self {
            nav: NavigationStack::new(collection, ReaderSurface::new())?,
            theme: Theme::from_config(&config.theme),
            nav_width: config.nav_width,
            focus: Region::Navigation,
            list_panel: ListPanelState::new(),
            content_panel: ContentPanelState::default(),
            status_message: String::new(),
        })
    }

    /// Apply one event. Returns false when the reader should exit.
    pub fn handle_event(&mut self, event: TuiEvent) -> bool {
        match event {
            TuiEvent::Quit => return false,
            TuiEvent::Resize => return true,
            _ => self.status_message.clear(),
        }

        if event == TuiEvent::Back {
            self.focus = Region::Navigation;
            if self.nav.pop() {
                self.list_panel.forget_rows();
            } else {
                self.status_message = "Already at the book list".to_string();
            }
            return true;
        }

        // The pointer picks the region it lands on.
        match event {
            TuiEvent::MouseRelease(col, row) if self.list_panel.contains(col, row) => {
                self.focus = Region::Navigation;
            }
            TuiEvent::ScrollUp(col, row) if self.content_panel.contains(col, row) => {
                self.nav.surface_mut().scroll_by(-WHEEL_LINES);
                return true;
            }
            TuiEvent::ScrollDown(col, row) if self.content_panel.contains(col, row) => {
                self.nav.surface_mut().scroll_by(WHEEL_LINES);
                return true;
            }
            // Moves the list focus without taking keyboard focus.
            TuiEvent::ScrollUp(col, row) | TuiEvent::ScrollDown(col, row)
                if self.list_panel.contains(col, row) =>
            {
                self.handle_navigation(&event);
                return true;
            }
            _ => {}
        }

        match self.focus {
            Region::Navigation => self.handle_navigation(&event),
            Region::Content => self.handle_content(&event),
        }
        true
    }

    fn handle_navigation(&mut self, event: &TuiEvent) {
        let Some(input) = self.list_panel.handle_event(event) else {
            return;
        };
        let depth = self.nav.depth();
        let result = self.nav.handle_input(input);
        if self.nav.depth() != depth {
            // Rows from the last draw belong to the previous view.
            self.list_panel.forget_rows();
        }
        match result {
            // Only one sibling region, so either edge leads to it.
            Ok(Some(_)) => self.focus = Region::Content,
            Ok(None) => {}
            Err(e) => {
                warn!("{:?} failed: {}", input, e);
                self.status_message = e.to_string();
            }
        }
    }

    fn handle_content(&mut self, event: &TuiEvent) {
        let page = i32::from(self.content_panel.viewport_height.max(1));
        let surface = self.nav.surface_mut();
        match event {
            TuiEvent::Tab | TuiEvent::BackTab => self.focus = Region::Navigation,
            TuiEvent::Up => surface.scroll_by(-1),
            TuiEvent::Down => surface.scroll_by(1),
            TuiEvent::PageUp => surface.scroll_by(-page),
            TuiEvent::PageDown => surface.scroll_by(page),
            TuiEvent::Home => surface.scroll = 0,
            // Clamped to the last line on the next draw
            TuiEvent::End => surface.scroll = u16::MAX,
            _ => {}
        }
    }
}

struct TerminalModeGuard;

impl TerminalModeGuard {
    fn new() -> io::Result<Self> {
        execute!(
            stdout(),
            EnableMouseCapture,
            Show,                        // Cursor marks the focused row
            SetCursorStyle::SteadyBlock, // Non-blinking: redraws reset the blink timer
        )?;
        info!("Terminal modes enabled (mouse, steady block cursor)");
        Ok(Self)
    }
}

impl Drop for TerminalModeGuard {
    fn drop(&mut self) {
        let _ = execute!(stdout(), DisableMouseCapture, Hide);
    }
}

pub fn run(config: ResolvedConfig) -> io::Result<()> {
    let collection = Collection::discover(&config.books_dir).map_err(io::Error::other)?;
    info!(
        "Opened {} book(s) from {}",
        collection.len(),
        config.books_dir.display()
    );
    let mut tui = TuiState::new(collection, &config).map_err(io::Error::other)?;

    let mut terminal = ratatui::init();
    let terminal_mode_guard = TerminalModeGuard::new();
    if let Err(e) = &terminal_mode_guard {
        warn!("Failed to enable terminal modes: {}", e);
    }

    let result = event_loop(&mut terminal, &mut tui);

    drop(terminal_mode_guard);
    ratatui::restore();
    info!("Lira shutting down");
    result
}

fn event_loop(terminal: &mut DefaultTerminal, tui: &mut TuiState) -> io::Result<()> {
    let mut needs_redraw = true; // Force first frame

    loop {
        if let Some(title) = tui.nav.surface_mut().take_title() {
            execute!(stdout(), SetTitle(format!("Lira - {title}")))?;
        }

        if needs_redraw {
            terminal.draw(|f| ui::draw_ui(f, tui))?;
            needs_redraw = false;
        }

        let first_event = poll_event_timeout(Duration::from_millis(500))?;
        if first_event.is_some() {
            needs_redraw = true;
        }

        // Process first event + drain all pending events before next draw
        for event in first_event
            .into_iter()
            .chain(std::iter::from_fn(poll_event_immediate))
        {
            if !tui.handle_event(event) {
                return Ok(());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::{CliOverrides, LiraConfig, resolve};
    use crate::core::render::plain_text;
    use crate::test_support::sample_collection;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn tui() -> TuiState {
        let config = resolve(&LiraConfig::default(), &CliOverrides::default());
        TuiState::new(sample_collection(), &config).unwrap()
    }

    fn draw(tui: &mut TuiState) -> Terminal<TestBackend> {
        let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();
        terminal.draw(|f| ui::draw_ui(f, tui)).unwrap();
        terminal
    }

    fn screen_row(terminal: &Terminal<TestBackend>, y: u16) -> String {
        let buffer = terminal.backend().buffer();
        (0..buffer.area.width)
            .map(|x| buffer[(x, y)].symbol().to_string())
            .collect()
    }

    #[test]
    fn quit_stops_the_loop() {
        let mut tui = tui();
        assert!(tui.handle_event(TuiEvent::Down));
        assert!(!tui.handle_event(TuiEvent::Quit));
    }

    #[test]
    fn enter_drills_down_and_esc_comes_back() {
        let mut tui = tui();
        tui.handle_event(TuiEvent::Select);
        assert_eq!(tui.nav.breadcrumb(), "Book0");
        tui.handle_event(TuiEvent::Down);
        tui.handle_event(TuiEvent::Select);
        assert_eq!(tui.nav.breadcrumb(), "Book0 > Chapter1");
        assert_eq!(
            plain_text(tui.nav.surface().content().unwrap()),
            "Section 2.1 body\n"
        );
        tui.handle_event(TuiEvent::Back);
        assert_eq!(tui.nav.breadcrumb(), "Book0");
        tui.handle_event(TuiEvent::Back);
        tui.handle_event(TuiEvent::Back);
        assert_eq!(tui.status_message, "Already at the book list");
    }

    #[test]
    fn tab_past_last_row_moves_to_content_and_back() {
        let mut tui = tui();
        tui.handle_event(TuiEvent::Tab);
        assert_eq!(tui.focus, Region::Navigation);
        tui.handle_event(TuiEvent::Tab);
        assert_eq!(tui.focus, Region::Content);
        // Arrow keys now scroll instead of moving the list focus
        tui.handle_event(TuiEvent::Up);
        assert_eq!(tui.nav.current().list().focus_index(), 1);
        tui.handle_event(TuiEvent::BackTab);
        assert_eq!(tui.focus, Region::Navigation);
    }

    #[test]
    fn shift_tab_on_first_row_leaves_the_list() {
        let mut tui = tui();
        tui.handle_event(TuiEvent::BackTab);
        assert_eq!(tui.focus, Region::Content);
    }

    #[test]
    fn errors_land_in_the_status_line() {
        let mut tui = tui();
        tui.handle_event(TuiEvent::Down);
        tui.handle_event(TuiEvent::Select); // Book1
        tui.handle_event(TuiEvent::Select); // its chapter has no sections
        tui.handle_event(TuiEvent::Select);
        assert!(tui.status_message.contains("nothing to select"));
        tui.handle_event(TuiEvent::Resize);
        assert!(!tui.status_message.is_empty());
        tui.handle_event(TuiEvent::Up);
        assert!(tui.status_message.contains("nothing to select"));
    }

    #[test]
    fn click_matches_down_then_enter() {
        let mut clicked = tui();
        let mut typed = tui();
        for t in [&mut clicked, &mut typed] {
            t.handle_event(TuiEvent::Select);
            t.handle_event(TuiEvent::Select);
        }

        draw(&mut clicked);
        let rows = clicked.list_panel.rows_area;
        clicked.handle_event(TuiEvent::MouseRelease(rows.x + 2, rows.y + 1));

        typed.handle_event(TuiEvent::Down);
        typed.handle_event(TuiEvent::Select);

        let a = clicked.nav.current().list();
        let b = typed.nav.current().list();
        assert_eq!(a.snapshot(), b.snapshot());
        assert_eq!(a.committed_index(), Some(1));
        assert_eq!(
            plain_text(clicked.nav.surface().content().unwrap()),
            plain_text(typed.nav.surface().content().unwrap())
        );
    }

    #[test]
    fn click_on_list_refocuses_navigation() {
        let mut tui = tui();
        tui.focus = Region::Content;
        draw(&mut tui);
        let rows = tui.list_panel.rows_area;
        tui.handle_event(TuiEvent::MouseRelease(rows.x, rows.y));
        assert_eq!(tui.focus, Region::Navigation);
        assert_eq!(tui.nav.breadcrumb(), "Book0");
    }

    #[test]
    fn wheel_over_content_scrolls_it() {
        let mut tui = tui();
        tui.handle_event(TuiEvent::Select);
        tui.handle_event(TuiEvent::Select);
        draw(&mut tui);
        let area = tui.content_panel.area;
        tui.handle_event(TuiEvent::ScrollDown(area.x + 1, area.y + 1));
        assert_eq!(tui.nav.surface().scroll, 3);
        assert_eq!(tui.focus, Region::Navigation);
    }

    #[test]
    fn wheel_over_list_moves_its_focus_from_either_region() {
        let mut tui = tui();
        tui.focus = Region::Content;
        draw(&mut tui);
        let rows = tui.list_panel.rows_area;
        tui.handle_event(TuiEvent::ScrollDown(rows.x + 1, rows.y));
        assert_eq!(tui.nav.current().list().focus_index(), 1);
        assert_eq!(tui.focus, Region::Content);
        tui.handle_event(TuiEvent::ScrollUp(rows.x + 1, rows.y));
        assert_eq!(tui.nav.current().list().focus_index(), 0);
    }

    #[test]
    fn clicks_queued_behind_a_drill_down_hit_nothing() {
        let mut tui = tui();
        draw(&mut tui);
        let rows = tui.list_panel.rows_area;
        // Both releases arrive before the next draw.
        tui.handle_event(TuiEvent::MouseRelease(rows.x + 2, rows.y));
        tui.handle_event(TuiEvent::MouseRelease(rows.x + 2, rows.y + 1));
        assert_eq!(tui.nav.breadcrumb(), "Book0");
        assert_eq!(tui.nav.current().list().committed_index(), None);

        draw(&mut tui);
        tui.handle_event(TuiEvent::MouseRelease(rows.x + 2, rows.y + 1));
        assert_eq!(tui.nav.breadcrumb(), "Book0 > Chapter1");

        draw(&mut tui);
        tui.handle_event(TuiEvent::Back);
        tui.handle_event(TuiEvent::MouseRelease(rows.x + 2, rows.y));
        assert_eq!(tui.nav.breadcrumb(), "Book0");
        assert_eq!(tui.nav.current().list().committed_index(), Some(1));
    }

    #[test]
    fn status_message_replaces_hints_on_bottom_row() {
        let mut tui = tui();
        let terminal = draw(&mut tui);
        assert!(screen_row(&terminal, 29).contains("Esc Back"));
        assert!(screen_row(&terminal, 0).starts_with("Lira | Books"));

        tui.handle_event(TuiEvent::Back);
        let terminal = draw(&mut tui);
        assert!(screen_row(&terminal, 29).contains("Already at the book list"));
        assert!(!screen_row(&terminal, 0).contains("Already"));
    }

    #[test]
    fn cursor_sits_on_focused_row() {
        let mut tui = tui();
        tui.handle_event(TuiEvent::Down);
        let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();
        terminal.draw(|f| ui::draw_ui(f, &mut tui)).unwrap();
        let rows = tui.list_panel.rows_area;
        assert_eq!(
            tui.list_panel.cursor,
            Some(ratatui::layout::Position::new(rows.x, rows.y + 1))
        );
    }
}
