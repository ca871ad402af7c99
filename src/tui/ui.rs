use ratatui::Frame;
use ratatui::layout::{Constraint, Layout};
use ratatui::widgets::{Block, Borders};

use crate::core::render::StyleClass;
use crate::tui::component::Component;
use crate::tui::components::{ContentPanel, ListPanel, StatusBar, TitleBar};
use crate::tui::{Region, TuiState};

pub fn draw_ui(frame: &mut Frame, tui: &mut TuiState) {
    use Constraint::{Length, Min};
    let [title_area, main_area, status_area] =
        Layout::vertical([Length(1), Min(0), Length(1)]).areas(frame.area());
    let [nav_area, separator_area, content_area] =
        Layout::horizontal([Length(tui.nav_width), Length(1), Min(0)]).areas(main_area);

    TitleBar::new(tui.nav.breadcrumb()).render(frame, title_area);

    let view = tui.nav.current();
    ListPanel::new(
        view.list(),
        view.title(),
        &tui.theme,
        tui.focus == Region::Navigation,
        &mut tui.list_panel,
    )
    .render(frame, nav_area);

    frame.render_widget(
        Block::default()
            .borders(Borders::LEFT)
            .border_style(tui.theme.style(StyleClass::Separator)),
        separator_area,
    );

    ContentPanel::new(tui.nav.surface_mut(), &tui.theme, &mut tui.content_panel)
        .render(frame, content_area);

    StatusBar::new(&tui.status_message, &tui.theme).render(frame, status_area);

    if let Some(position) = tui.list_panel.cursor {
        frame.set_cursor_position(position);
    }
}
