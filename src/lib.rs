//! Core library surface for the Book Catalog TUI.
//!
//! The store is usable on its own (and is what the integration tests drive);
//! the `ui` module layers the interactive terminal front-end on top of it.
pub mod config;
pub mod logging;
pub mod models;
pub mod store;
pub mod ui;

/// Persistence entry points.
pub use store::{BookStore, EmptyReason, Listing, LoadOutcome, StoreError};

/// Domain types passed between the store and the UI.
pub use models::{Book, BookUpdate, Progress, SearchField};

/// The interactive application entry point and state container.
pub use ui::{run_app, App};
