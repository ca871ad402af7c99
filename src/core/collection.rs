//! # Document Collection
//!
//! Books, chapters and the parsed node trees the reader walks.
//!
//! ```text
//! Collection
//! └── Book            (book.toml, parsed on first access)
//!     ├── metadata    title, author, description, language
//!     └── Chapter     (<name>.json, parsed on first access)
//!         ├── title
//!         └── Node tree
//!             └── section nodes → paragraph / literal / code-block / ...
//! ```
//!
//! Nothing in here parses markup. A chapter file already holds the node
//! tree; loading it is plain deserialization. `parse()` on a book or chapter
//! is memoized, so callers may invoke it before every descent without
//! tracking whether it already happened.

use std::cell::OnceCell;
use std::fs;
use std::path::{Path, PathBuf};

use log::{debug, info, warn};
use serde::Deserialize;

use crate::core::error::{ReaderError, Result};

pub const MANIFEST_FILE: &str = "book.toml";

/// Tag of the nodes that open a new section.
pub const SECTION_TAG: &str = "section";

// ============================================================================
// Nodes
// ============================================================================

/// One node of a parsed document tree.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Node {
    #[serde(rename = "tag")]
    pub tagname: String,
    /// Section heading; only meaningful on section nodes.
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub children: Vec<Node>,
}

impl Node {
    pub fn new(tagname: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            tagname: tagname.into(),
            text: text.into(),
            ..Default::default()
        }
    }

    pub fn section(title: impl Into<String>, children: Vec<Node>) -> Self {
        Self {
            tagname: SECTION_TAG.to_string(),
            title: Some(title.into()),
            text: String::new(),
            children,
        }
    }

    pub fn with_children(mut self, children: Vec<Node>) -> Self {
        self.children = children;
        self
    }

    pub fn is_section(&self) -> bool {
        self.tagname == SECTION_TAG
    }

    /// Display title of a section node, empty for anything untitled.
    pub fn title(&self) -> &str {
        self.title.as_deref().unwrap_or("")
    }

    /// Plain text of this node and all of its descendants, in order.
    pub fn text(&self) -> String {
        let mut out = self.text.clone();
        for child in &self.children {
            out.push_str(&child.text());
        }
        out
    }
}

/// Collect section nodes below `nodes`, descending at most `max_depth` levels.
fn collect_sections<'a>(
    nodes: &'a [Node],
    depth: usize,
    max_depth: usize,
    out: &mut Vec<(&'a Node, usize)>,
) {
    if depth > max_depth {
        return;
    }
    for node in nodes.iter().filter(|n| n.is_section()) {
        out.push((node, depth));
        collect_sections(&node.children, depth + 1, max_depth, out);
    }
}

// ============================================================================
// Chapters
// ============================================================================

#[derive(Debug, Clone, Deserialize)]
pub struct ParsedChapter {
    pub title: String,
    #[serde(default)]
    pub children: Vec<Node>,
}

impl ParsedChapter {
    /// Table of contents restricted to `depth` levels of nesting.
    ///
    /// Depth 1 is the chapter's direct section children.
    pub fn toc(&self, depth: usize) -> Vec<(&Node, usize)> {
        let mut out = Vec::new();
        collect_sections(&self.children, 1, depth, &mut out);
        out
    }

    /// The `index`-th entry of the depth-1 table of contents.
    pub fn section(&self, index: usize) -> Result<&Node> {
        let toc = self.toc(1);
        let len = toc.len();
        toc.into_iter()
            .nth(index)
            .map(|(section, _)| section)
            .ok_or_else(|| ReaderError::out_of_range("section", index, len))
    }
}

#[derive(Debug)]
pub struct Chapter {
    path: Option<PathBuf>,
    parsed: OnceCell<ParsedChapter>,
}

impl Chapter {
    /// An already-parsed chapter.
    pub fn new(title: impl Into<String>, children: Vec<Node>) -> Self {
        Self {
            path: None,
            parsed: OnceCell::from(ParsedChapter {
                title: title.into(),
                children,
            }),
        }
    }

    /// A chapter backed by a JSON file, read on the first `parse()`.
    pub fn from_file(path: impl Into<PathBuf>) -> Self {
        Self {
            path: Some(path.into()),
            parsed: OnceCell::new(),
        }
    }

    pub fn is_parsed(&self) -> bool {
        self.parsed.get().is_some()
    }

    pub fn parse(&self) -> Result<&ParsedChapter> {
        if let Some(parsed) = self.parsed.get() {
            return Ok(parsed);
        }
        // Only file-backed chapters can reach this point.
        let path = self.path.as_deref().unwrap_or(Path::new(""));
        debug!("Parsing chapter {}", path.display());
        let contents = fs::read_to_string(path).map_err(|source| ReaderError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let parsed: ParsedChapter =
            serde_json::from_str(&contents).map_err(|source| ReaderError::Chapter {
                path: path.to_path_buf(),
                source,
            })?;
        Ok(self.parsed.get_or_init(|| parsed))
    }
}

// ============================================================================
// Books
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct BookMetadata {
    pub title: String,
    pub author: Option<String>,
    pub description: Option<String>,
    pub language: Option<String>,
}

impl BookMetadata {
    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Default::default()
        }
    }
}

/// On-disk shape of `book.toml`.
#[derive(Debug, Deserialize)]
struct Manifest {
    metadata: BookMetadata,
    #[serde(default)]
    chapters: Vec<PathBuf>,
}

#[derive(Debug)]
pub struct ParsedBook {
    pub metadata: BookMetadata,
    pub chapters: Vec<Chapter>,
}

impl ParsedBook {
    pub fn chapter(&self, index: usize) -> Result<&Chapter> {
        self.chapters
            .get(index)
            .ok_or_else(|| ReaderError::out_of_range("chapter", index, self.chapters.len()))
    }
}

#[derive(Debug)]
pub struct Book {
    manifest: Option<PathBuf>,
    parsed: OnceCell<ParsedBook>,
}

impl Book {
    /// An already-parsed book.
    pub fn new(metadata: BookMetadata, chapters: Vec<Chapter>) -> Self {
        Self {
            manifest: None,
            parsed: OnceCell::from(ParsedBook { metadata, chapters }),
        }
    }

    /// A book backed by a `book.toml` manifest, read on the first `parse()`.
    pub fn from_manifest(path: impl Into<PathBuf>) -> Self {
        Self {
            manifest: Some(path.into()),
            parsed: OnceCell::new(),
        }
    }

    pub fn is_parsed(&self) -> bool {
        self.parsed.get().is_some()
    }

    pub fn parse(&self) -> Result<&ParsedBook> {
        if let Some(parsed) = self.parsed.get() {
            return Ok(parsed);
        }
        let path = self.manifest.as_deref().unwrap_or(Path::new(MANIFEST_FILE));
        debug!("Parsing book manifest {}", path.display());
        let contents = fs::read_to_string(path).map_err(|source| ReaderError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let manifest: Manifest =
            toml::from_str(&contents).map_err(|source| ReaderError::Manifest {
                path: path.to_path_buf(),
                source,
            })?;

        let base = path.parent().unwrap_or(Path::new("."));
        let chapters = manifest
            .chapters
            .iter()
            .map(|file| Chapter::from_file(base.join(file)))
            .collect();

        Ok(self.parsed.get_or_init(|| ParsedBook {
            metadata: manifest.metadata,
            chapters,
        }))
    }
}

// ============================================================================
// Collection
// ============================================================================

#[derive(Debug, Default)]
pub struct Collection {
    books: Vec<Book>,
}

impl Collection {
    pub fn new(books: Vec<Book>) -> Self {
        Self { books }
    }

    /// Treat every sub-directory of `dir` that holds a `book.toml` as a book,
    /// ordered by directory name.
    pub fn discover(dir: &Path) -> Result<Self> {
        if !dir.is_dir() {
            return Err(ReaderError::NotADirectory(dir.to_path_buf()));
        }
        let entries = fs::read_dir(dir).map_err(|source| ReaderError::Io {
            path: dir.to_path_buf(),
            source,
        })?;

        let mut manifests: Vec<PathBuf> = entries
            .filter_map(|entry| match entry {
                Ok(entry) => Some(entry.path().join(MANIFEST_FILE)),
                Err(e) => {
                    warn!("Skipping unreadable entry in {}: {}", dir.display(), e);
                    None
                }
            })
            .filter(|manifest| manifest.is_file())
            .collect();
        manifests.sort();

        info!("Found {} book(s) in {}", manifests.len(), dir.display());
        Ok(Self::new(
            manifests.into_iter().map(Book::from_manifest).collect(),
        ))
    }

    pub fn books(&self) -> &[Book] {
        &self.books
    }

    pub fn len(&self) -> usize {
        self.books.len()
    }

    pub fn is_empty(&self) -> bool {
        self.books.is_empty()
    }

    pub fn book(&self, index: usize) -> Result<&Book> {
        self.books
            .get(index)
            .ok_or_else(|| ReaderError::out_of_range("book", index, self.books.len()))
    }

    /// Parse the path down to a chapter, returning the parsed chapter.
    pub fn chapter(&self, book: usize, chapter: usize) -> Result<&ParsedChapter> {
        self.book(book)?.parse()?.chapter(chapter)?.parse()
    }
}
