//! # Core Reader Logic
//!
//! This module contains Lira's navigation and rendering logic.
//! It knows nothing about any specific UI technology.
//!
//! ```text
//!                    ┌─────────────────────────┐
//!                    │         CORE            │
//!                    │  (this module)          │
//!                    │                         │
//!                    │  • Collection (books)   │
//!                    │  • SelectableList       │
//!                    │  • NavigationStack      │
//!                    │  • section → spans      │
//!                    │                         │
//!                    │  No terminal. No draw.  │
//!                    └───────────┬─────────────┘
//!                                │ DisplaySurface
//!                                ▼
//!                         ┌────────────┐
//!                         │    TUI     │
//!                         │  Adapter   │
//!                         │ (ratatui)  │
//!                         └────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`collection`]: books, chapters and their lazily parsed node trees
//! - [`list`]: the focus/commit list control
//! - [`navigation`]: views per hierarchy level and the stack holding them
//! - [`render`]: section node tree → styled spans
//! - [`config`]: `~/.lira/config.toml` and override resolution
//! - [`error`]: `ReaderError`

pub mod collection;
pub mod config;
pub mod error;
pub mod list;
pub mod navigation;
pub mod render;

pub use error::{ReaderError, Result};
