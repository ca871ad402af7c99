//! # Navigation
//!
//! The book → chapter → section drill-down.
//!
//! ```text
//!   Books ──commit──▶ Chapters(book) ──commit──▶ Sections(book, chapter)
//!                                                     │
//!                                                  commit
//!                                                     ▼
//!                                              render section
//! ```
//!
//! Each level is a [`View`]: a title, a [`SelectableList`] of
//! [`NavEvent`] messages and the [`ViewKind`] it was built from. Committing
//! a row hands a `NavEvent` back to the [`NavigationStack`], which either
//! pushes the next level or renders the section into its display surface.
//!
//! Levels are never skipped. `pop()` goes back one level but never past the
//! book list.

use log::{info, warn};

use crate::core::collection::Collection;
use crate::core::error::Result;
use crate::core::list::{ListElement, ListInput, ListOutcome, SelectableList};
use crate::core::render::{self, DisplaySurface, StyleClass, StyledSpan, plain_text};

/// What committing a row asks the stack to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavEvent {
    Descend(Target),
    Render(SectionRef),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    Book(usize),
    Chapter { book: usize, chapter: usize },
}

/// A section addressed by its position in the chapter's depth-1 toc.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SectionRef {
    pub book: usize,
    pub chapter: usize,
    pub section: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewKind {
    Books,
    Chapters { book: usize },
    Sections { book: usize, chapter: usize },
}

/// Region change requested by the list when focus runs off either end.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegionChange {
    Previous,
    Next,
}

pub struct View {
    kind: ViewKind,
    title: Vec<StyledSpan>,
    list: SelectableList<NavEvent>,
}

impl View {
    /// One row per book, titled with the book's metadata title.
    pub fn books(collection: &Collection) -> Result<Self> {
        let mut elements = Vec::with_capacity(collection.len());
        for (i, book) in collection.books().iter().enumerate() {
            let parsed = book.parse()?;
            elements.push(
                ListElement::new(parsed.metadata.title.clone())
                    .on_select(NavEvent::Descend(Target::Book(i))),
            );
        }
        Ok(Self {
            kind: ViewKind::Books,
            title: vec![StyledSpan::new(StyleClass::Title, "Books")],
            list: SelectableList::new(elements).with_bullet(|_| "• ".to_string()),
        })
    }

    /// One row per chapter of `book`, bulleted `"{n}. "`.
    pub fn chapters(collection: &Collection, book: usize) -> Result<Self> {
        let parsed = collection.book(book)?.parse()?;
        let mut elements = Vec::with_capacity(parsed.chapters.len());
        for (i, chapter) in parsed.chapters.iter().enumerate() {
            let chapter_title = chapter.parse()?.title.clone();
            elements.push(
                ListElement::new(chapter_title)
                    .on_select(NavEvent::Descend(Target::Chapter { book, chapter: i })),
            );
        }
        Ok(Self {
            kind: ViewKind::Chapters { book },
            title: vec![StyledSpan::new(StyleClass::Title, parsed.metadata.title.clone())],
            list: SelectableList::new(elements).with_bullet(|line| format!("{}. ", line + 1)),
        })
    }

    /// One row per top-level section of the chapter, bulleted
    /// `"{chapter}.{section}. "`, with the commit column enabled.
    ///
    /// The first row comes back already committed unless the chapter has no
    /// sections. Rendering it is left to whoever pushes the view.
    pub fn sections(collection: &Collection, book: usize, chapter: usize) -> Result<Self> {
        let book_title = collection.book(book)?.parse()?.metadata.title.clone();
        let parsed = collection.chapter(book, chapter)?;
        let elements = parsed
            .toc(1)
            .into_iter()
            .enumerate()
            .map(|(i, (section, _))| {
                ListElement::new(section.title()).on_select(NavEvent::Render(SectionRef {
                    book,
                    chapter,
                    section: i,
                }))
            })
            .collect();
        let chapter_n = chapter + 1;
        let mut list = SelectableList::new(elements)
            .with_bullet(move |line| format!("{}.{}. ", chapter_n, line + 1))
            .with_commit_marker(true);
        if !list.is_empty() {
            list.commit(0)?;
        }
        Ok(Self {
            kind: ViewKind::Sections { book, chapter },
            title: vec![
                StyledSpan::new(StyleClass::Title, book_title),
                StyledSpan::new(StyleClass::Text, " "),
                StyledSpan::new(StyleClass::Separator, ">"),
                StyledSpan::new(StyleClass::Text, " "),
                StyledSpan::new(StyleClass::Title, parsed.title.clone()),
            ],
            list,
        })
    }

    pub fn kind(&self) -> ViewKind {
        self.kind
    }

    pub fn title(&self) -> &[StyledSpan] {
        &self.title
    }

    /// Plain-text breadcrumb for this level.
    pub fn breadcrumb(&self) -> String {
        plain_text(&self.title)
    }

    pub fn list(&self) -> &SelectableList<NavEvent> {
        &self.list
    }

    pub fn list_mut(&mut self) -> &mut SelectableList<NavEvent> {
        &mut self.list
    }

    /// Section the committed row points at, if it points at one.
    pub fn committed_section(&self) -> Option<SectionRef> {
        let index = self.list.committed_index()?;
        match self.list.elements().get(index)?.on_select {
            Some(NavEvent::Render(section)) => Some(section),
            _ => None,
        }
    }
}

/// The stack of views, topmost shown. Owns the collection and the surface
/// rendered sections go to.
pub struct NavigationStack<S> {
    collection: Collection,
    views: Vec<View>,
    surface: S,
}

impl<S: DisplaySurface> NavigationStack<S> {
    /// Start at the book list.
    pub fn new(collection: Collection, surface: S) -> Result<Self> {
        let root = View::books(&collection)?;
        let mut stack = Self {
            collection,
            views: Vec::with_capacity(3),
            surface,
        };
        stack.push(root);
        Ok(stack)
    }

    pub fn collection(&self) -> &Collection {
        &self.collection
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn depth(&self) -> usize {
        self.views.len()
    }

    pub fn views(&self) -> &[View] {
        &self.views
    }

    pub fn current(&self) -> &View {
        // `new` pushes the root and `pop` never removes it.
        &self.views[self.views.len() - 1]
    }

    pub fn current_mut(&mut self) -> &mut View {
        let top = self.views.len() - 1;
        &mut self.views[top]
    }

    pub fn breadcrumb(&self) -> String {
        self.current().breadcrumb()
    }

    /// Show `view` in place of the current one and retitle the window.
    /// Rendering its committed section is up to `dispatch`.
    pub(crate) fn push(&mut self, view: View) {
        info!("Navigating to {:?}", view.kind());
        self.surface.set_title(&view.breadcrumb());
        self.views.push(view);
    }

    /// Go back one level. Returns false at the book list.
    pub fn pop(&mut self) -> bool {
        if self.views.len() <= 1 {
            return false;
        }
        if let Some(view) = self.views.pop() {
            info!("Leaving {:?}", view.kind());
        }
        let title = self.breadcrumb();
        self.surface.set_title(&title);
        true
    }

    /// Feed an input to the current list and act on whatever it emits.
    ///
    /// If acting on the emitted event fails, the list's indices are rolled
    /// back and the stack is untouched.
    pub fn handle_input(&mut self, input: ListInput) -> Result<Option<RegionChange>> {
        let list = self.current_mut().list_mut();
        let before = list.snapshot();
        match list.handle_input(input)? {
            ListOutcome::Idle => Ok(None),
            ListOutcome::YieldPrevious => Ok(Some(RegionChange::Previous)),
            ListOutcome::YieldNext => Ok(Some(RegionChange::Next)),
            ListOutcome::Emit(event) => {
                if let Err(e) = self.dispatch(event) {
                    warn!("{:?} failed: {}", event, e);
                    self.current_mut().list_mut().restore(before);
                    return Err(e);
                }
                Ok(None)
            }
        }
    }

    /// Commit row `index` of the current view.
    pub fn commit(&mut self, index: usize) -> Result<()> {
        self.handle_input(ListInput::Release(index)).map(|_| ())
    }

    pub fn dispatch(&mut self, event: NavEvent) -> Result<()> {
        match event {
            NavEvent::Descend(Target::Book(book)) => {
                let view = View::chapters(&self.collection, book)?;
                self.push(view);
            }
            NavEvent::Descend(Target::Chapter { book, chapter }) => {
                let view = View::sections(&self.collection, book, chapter)?;
                // Render before pushing so a failure leaves the stack as it was.
                let spans = match view.committed_section() {
                    Some(section) => Some(self.section_spans(section)?),
                    None => {
                        warn!("Chapter {} of book {} has no sections", chapter, book);
                        None
                    }
                };
                self.push(view);
                if let Some(spans) = spans {
                    self.surface.replace_content(spans);
                }
            }
            NavEvent::Render(at) => {
                let section = self
                    .collection
                    .chapter(at.book, at.chapter)?
                    .section(at.section)?;
                render::render_section(section, &mut self.surface);
            }
        }
        Ok(())
    }

    fn section_spans(&self, at: SectionRef) -> Result<Vec<StyledSpan>> {
        let chapter = self.collection.chapter(at.book, at.chapter)?;
        let section = chapter.section(at.section)?;
        info!("Rendering section {:?}", section.title());
        Ok(render::section_spans(section))
    }
}
