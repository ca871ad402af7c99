//! The terminal's side of `DisplaySurface`.
//!
//! Holds whatever the content panel should show and the window title the
//! event loop still has to send. Drawing reads from here on demand; nothing
//! is pushed to the terminal from inside the core.

use crate::core::render::{DisplaySurface, StyledSpan};

#[derive(Debug, Default)]
pub struct ReaderSurface {
    /// `None` until the first section is rendered.
    content: Option<Vec<StyledSpan>>,
    /// First visible line of the content panel.
    pub scroll: u16,
    pending_title: Option<String>,
}

impl ReaderSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn content(&self) -> Option<&[StyledSpan]> {
        self.content.as_deref()
    }

    /// Take the title set since the last call, if any.
    pub fn take_title(&mut self) -> Option<String> {
        self.pending_title.take()
    }

    pub fn scroll_by(&mut self, delta: i32) {
        self.scroll = (i32::from(self.scroll) + delta).clamp(0, i32::from(u16::MAX)) as u16;
    }
}

impl DisplaySurface for ReaderSurface {
    fn replace_content(&mut self, spans: Vec<StyledSpan>) {
        self.content = Some(spans);
        self.scroll = 0;
    }

    fn set_title(&mut self, title: &str) {
        self.pending_title = Some(title.to_string());
    }
}
