//! Ratatui front-end: a menu of catalog actions beside a content pane, with
//! modal dialogs for the actions that need input.

mod app;
mod forms;
mod helpers;
mod screens;
mod terminal;

pub use app::App;
pub use terminal::run_app;
