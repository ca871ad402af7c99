//! # TUI Components
//!
//! ### Stateless Components (Props-Based Rendering)
//!
//! - `TitleBar`: top bar with the breadcrumb
//! - `StatusBar`: bottom line with the last error or key hints
//!
//! ### Stateful Components (Event-Driven)
//!
//! - `ListPanel`: navigation list; its `ListPanelState` remembers the last
//!   layout for hit testing and turns terminal events into list inputs
//! - `ContentPanel`: the rendered section, scrollable
//!
//! Stateful components follow the persistent state + transient wrapper
//! pattern: the `*State` lives in `TuiState`, the wrapper is built each
//! frame with borrowed state and props.
//!
//! ```text
//! components/
//! ├── mod.rs            (this file)
//! ├── title_bar.rs      (breadcrumb bar)
//! ├── status_bar.rs     (errors and key hints)
//! ├── list_panel.rs     (navigation list)
//! └── content_panel.rs  (section content)
//! ```

pub mod content_panel;
pub mod list_panel;
mod status_bar;
mod title_bar;

pub use content_panel::{ContentPanel, ContentPanelState};
pub use list_panel::{ListPanel, ListPanelState};
pub use status_bar::StatusBar;
pub use title_bar::TitleBar;
