//! # Selectable List
//!
//! The list control behind every navigation level.
//!
//! Two indices drive it:
//!
//! - **focus**: the highlighted, keyboard-reachable row.
//! - **committed**: the row the user last chose, `None` until a commit.
//!
//! Elements don't hold callbacks. They hold messages (`on_select`,
//! `on_focus`) which focus/commit hand back to the caller, so the list never
//! reaches into whoever owns it.
//!
//! Movement is clamped. At either end, Tab/Shift-Tab yield to the sibling
//! region instead of wrapping.

use crate::core::error::{ReaderError, Result};
use crate::core::render::StyleClass;

/// Marker shown in the commit column for the committed row.
pub const COMMIT_MARKER: &str = "• ";
pub const NO_COMMIT_MARKER: &str = "  ";

/// One selectable row. Immutable once built.
#[derive(Debug, Clone, PartialEq)]
pub struct ListElement<M> {
    pub text: String,
    pub on_select: Option<M>,
    pub on_focus: Option<M>,
}

impl<M> ListElement<M> {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            on_select: None,
            on_focus: None,
        }
    }

    pub fn on_select(mut self, message: M) -> Self {
        self.on_select = Some(message);
        self
    }

    pub fn on_focus(mut self, message: M) -> Self {
        self.on_focus = Some(message);
        self
    }
}

/// Abstract input the list understands. The TUI maps key and mouse events
/// onto these.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListInput {
    Previous,
    Next,
    /// Shift-Tab: move up, or leave the list when already on the first row.
    TabPrevious,
    /// Tab: move down, or leave the list when already on the last row.
    TabNext,
    CommitFocused,
    /// Pointer released over the given element.
    Release(usize),
}

#[derive(Debug, Clone, PartialEq)]
pub enum ListOutcome<M> {
    /// State may have changed but nothing was emitted.
    Idle,
    Emit(M),
    YieldPrevious,
    YieldNext,
}

/// Focus and commit indices, captured so a failed action can be undone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListCursor {
    pub focus: usize,
    pub committed: Option<usize>,
}

/// One rendered row before layout: text (with its line separator) plus the
/// element a click on it commits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListFragment {
    pub style: StyleClass,
    pub text: String,
    pub element: usize,
}

pub type BulletFn = Box<dyn Fn(usize) -> String>;

pub struct SelectableList<M> {
    elements: Vec<ListElement<M>>,
    focus: usize,
    committed: Option<usize>,
    bullet: Option<BulletFn>,
    commit_marker: bool,
}

impl<M: std::fmt::Debug> std::fmt::Debug for SelectableList<M> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SelectableList")
            .field("elements", &self.elements)
            .field("focus", &self.focus)
            .field("committed", &self.committed)
            .field("commit_marker", &self.commit_marker)
            .finish_non_exhaustive()
    }
}

impl<M: Clone> SelectableList<M> {
    pub fn new(elements: Vec<ListElement<M>>) -> Self {
        Self {
            elements,
            focus: 0,
            committed: None,
            bullet: None,
            commit_marker: false,
        }
    }

    pub fn with_bullet(mut self, bullet: impl Fn(usize) -> String + 'static) -> Self {
        self.bullet = Some(Box::new(bullet));
        self
    }

    /// Show an extra column marking the committed row.
    pub fn with_commit_marker(mut self, enabled: bool) -> Self {
        self.commit_marker = enabled;
        self
    }

    pub fn elements(&self) -> &[ListElement<M>] {
        &self.elements
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn focus_index(&self) -> usize {
        self.focus
    }

    pub fn committed_index(&self) -> Option<usize> {
        self.committed
    }

    pub fn has_commit_marker(&self) -> bool {
        self.commit_marker
    }

    pub fn current(&self) -> Option<&ListElement<M>> {
        self.elements.get(self.focus)
    }

    /// Where the terminal cursor belongs: column 0 of the focused line.
    pub fn cursor(&self) -> (u16, u16) {
        (0, self.focus as u16)
    }

    pub fn snapshot(&self) -> ListCursor {
        ListCursor {
            focus: self.focus,
            committed: self.committed,
        }
    }

    pub fn restore(&mut self, cursor: ListCursor) {
        self.focus = cursor.focus;
        self.committed = cursor.committed;
    }

    /// Move focus to `index`, clamped into range. Returns the element's
    /// `on_focus` message, if any.
    pub fn focus(&mut self, index: usize) -> Result<Option<M>> {
        if self.elements.is_empty() {
            return Err(ReaderError::EmptyList);
        }
        self.focus = index.min(self.elements.len() - 1);
        Ok(self.elements[self.focus].on_focus.clone())
    }

    /// Make `index` both focused and committed. Returns the element's
    /// `on_select` message, if any.
    pub fn commit(&mut self, index: usize) -> Result<Option<M>> {
        if self.elements.is_empty() {
            return Err(ReaderError::EmptyList);
        }
        let element = self
            .elements
            .get(index)
            .ok_or_else(|| ReaderError::out_of_range("row", index, self.elements.len()))?;
        let message = element.on_select.clone();
        self.focus = index;
        self.committed = Some(index);
        Ok(message)
    }

    pub fn move_previous(&mut self) -> Result<Option<M>> {
        self.focus(self.focus.saturating_sub(1))
    }

    pub fn move_next(&mut self) -> Result<Option<M>> {
        self.focus(self.focus + 1)
    }

    pub fn handle_input(&mut self, input: ListInput) -> Result<ListOutcome<M>> {
        let emitted = match input {
            ListInput::Previous => self.move_previous()?,
            ListInput::Next => self.move_next()?,
            ListInput::TabPrevious => {
                if self.focus == 0 {
                    return Ok(ListOutcome::YieldPrevious);
                }
                self.move_previous()?
            }
            ListInput::TabNext => {
                if self.focus + 1 >= self.elements.len() {
                    return Ok(ListOutcome::YieldNext);
                }
                self.move_next()?
            }
            ListInput::CommitFocused => self.commit(self.focus)?,
            ListInput::Release(index) => self.commit(index)?,
        };
        Ok(emitted.map_or(ListOutcome::Idle, ListOutcome::Emit))
    }

    /// Prefix for line `line`; `wrap_count > 0` means a wrapped continuation,
    /// which gets blank padding of the same width.
    pub fn line_prefix(&self, line: usize, wrap_count: usize) -> String {
        let mut prefix = match &self.bullet {
            Some(bullet) => bullet(line),
            None => " ".to_string(),
        };
        if self.commit_marker {
            let marker = if self.committed == Some(line) {
                COMMIT_MARKER
            } else {
                NO_COMMIT_MARKER
            };
            prefix.insert_str(0, marker);
        }
        if wrap_count > 0 {
            return " ".repeat(unicode_width::UnicodeWidthStr::width(prefix.as_str()));
        }
        prefix
    }

    /// One fragment per element. Every row but the last ends in a line
    /// separator; the focused row gets the focused style.
    pub fn fragments(&self) -> Vec<ListFragment> {
        let last = self.elements.len().saturating_sub(1);
        self.elements
            .iter()
            .enumerate()
            .map(|(i, element)| {
                let mut text = element.text.replace('\n', " ");
                if i < last {
                    text.push('\n');
                }
                let style = if i == self.focus {
                    StyleClass::ListItemFocused
                } else {
                    StyleClass::ListItem
                };
                ListFragment {
                    style,
                    text,
                    element: i,
                }
            })
            .collect()
    }
}
