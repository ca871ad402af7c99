//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use std::fs;
use std::path::Path;

use crate::core::collection::{Book, BookMetadata, Chapter, Collection, Node};
use crate::core::render::{DisplaySurface, StyledSpan};

/// A surface that remembers every title and render it receives.
#[derive(Debug, Default)]
pub struct RecordingSurface {
    pub titles: Vec<String>,
    pub renders: Vec<Vec<StyledSpan>>,
}

impl RecordingSurface {
    /// Spans of the most recent render, empty before the first one.
    pub fn content(&self) -> &[StyledSpan] {
        self.renders.last().map(Vec::as_slice).unwrap_or(&[])
    }
}

impl DisplaySurface for RecordingSurface {
    fn replace_content(&mut self, spans: Vec<StyledSpan>) {
        self.renders.push(spans);
    }

    fn set_title(&mut self, title: &str) {
        self.titles.push(title.to_string());
    }
}

/// Chapter `n` (0-based) with two sections, each holding one paragraph.
pub fn sample_chapter(n: usize) -> Chapter {
    let sections = (1..=2)
        .map(|s| {
            Node::section(
                format!("Section {}.{}", n + 1, s),
                vec![Node::new("paragraph", format!("Section {}.{} body", n + 1, s))],
            )
        })
        .collect();
    Chapter::new(format!("Chapter{n}"), sections)
}

/// Two books: `Book0` with two populated chapters, `Book1` with one chapter
/// that has no sections.
pub fn sample_collection() -> Collection {
    Collection::new(vec![
        Book::new(
            BookMetadata::titled("Book0"),
            vec![sample_chapter(0), sample_chapter(1)],
        ),
        Book::new(
            BookMetadata::titled("Book1"),
            vec![Chapter::new("Empty", vec![Node::new("paragraph", "No sections here.")])],
        ),
    ])
}

/// `Book0` plus a book whose only chapter file does not exist.
pub fn broken_collection() -> Collection {
    Collection::new(vec![
        Book::new(BookMetadata::titled("Book0"), vec![sample_chapter(0)]),
        Book::new(
            BookMetadata::titled("Broken"),
            vec![Chapter::from_file("/nonexistent/lira/missing-chapter.json")],
        ),
    ])
}

/// Write `<root>/<dir_name>/book.toml` and one JSON file per chapter, each
/// chapter holding two sections.
pub fn write_book(root: &Path, dir_name: &str, title: &str, chapters: &[(&str, &str)]) {
    let dir = root.join(dir_name);
    fs::create_dir_all(&dir).unwrap();

    let files: Vec<String> = chapters.iter().map(|(file, _)| format!("{file:?}")).collect();
    let manifest = format!(
        "chapters = [{}]\n\n[metadata]\ntitle = {:?}\n",
        files.join(", "),
        title
    );
    fs::write(dir.join("book.toml"), manifest).unwrap();

    for (file, chapter_title) in chapters {
        let json = serde_json::json!({
            "title": chapter_title,
            "children": [
                { "tag": "section", "title": "One", "children": [
                    { "tag": "paragraph", "text": "First." }
                ]},
                { "tag": "section", "title": "Two", "children": [
                    { "tag": "literal", "text": "x = 2" }
                ]}
            ]
        });
        fs::write(dir.join(file), json.to_string()).unwrap();
    }
}
