//! JSON-file persistence split across logical submodules.

mod books;
mod error;
mod file;

pub use books::{BookStore, Listing};
pub use error::{Result, StoreError};
pub use file::{load_books, save_books, EmptyReason, LoadOutcome};
