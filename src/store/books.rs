//! The in-memory catalog and the operations the UI drives against it.

use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::models::{Book, BookUpdate, Progress, SearchField};

use super::error::Result;
use super::file::{load_books, save_books, EmptyReason, LoadOutcome};

/// Result of [`BookStore::list_all`].
#[derive(Debug, PartialEq)]
pub enum Listing<'a> {
    /// The catalog holds no books. Kept distinct so the UI can show a
    /// dedicated message instead of an empty list.
    Empty,
    Books(&'a [Book]),
}

/// Ordered in-memory catalog mirrored to a single JSON file.
///
/// Every mutation rewrites the whole file before returning; queries only read
/// memory. Titles are not unique, and title lookups always hit the first
/// case-insensitive match.
#[derive(Debug)]
pub struct BookStore {
    path: PathBuf,
    books: Vec<Book>,
    empty_reason: Option<EmptyReason>,
}

impl BookStore {
    /// Load the catalog at `path`. A missing or malformed file yields an empty
    /// store; [`BookStore::empty_reason`] tells the caller which.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let outcome = load_books(&path)?;
        Ok(Self::from_outcome(path, outcome))
    }

    /// Build a store from an already performed load.
    pub fn from_outcome(path: impl Into<PathBuf>, outcome: LoadOutcome) -> Self {
        let path = path.into();
        let (books, empty_reason) = match outcome {
            LoadOutcome::Loaded(books) => {
                info!(path = %path.display(), count = books.len(), "loaded catalog");
                (books, None)
            }
            LoadOutcome::Empty(EmptyReason::Missing) => {
                info!(path = %path.display(), "no catalog file yet, starting empty");
                (Vec::new(), Some(EmptyReason::Missing))
            }
            LoadOutcome::Empty(EmptyReason::Malformed(reason)) => {
                warn!(path = %path.display(), %reason, "catalog file is malformed, starting empty");
                (Vec::new(), Some(EmptyReason::Malformed(reason)))
            }
        };

        Self {
            path,
            books,
            empty_reason,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Why the store started empty, if it did.
    pub fn empty_reason(&self) -> Option<&EmptyReason> {
        self.empty_reason.as_ref()
    }

    pub fn len(&self) -> usize {
        self.books.len()
    }

    pub fn is_empty(&self) -> bool {
        self.books.is_empty()
    }

    /// Rewrite the backing file with the current collection.
    pub fn save(&self) -> Result<()> {
        save_books(&self.path, &self.books)?;
        debug!(path = %self.path.display(), count = self.books.len(), "saved catalog");
        Ok(())
    }

    /// Append `book` and persist. No field is validated.
    pub fn add(&mut self, book: Book) -> Result<()> {
        info!(title = %book.title, "adding book");
        self.books.push(book);
        self.save()
    }

    /// Remove the first book whose title matches case-insensitively.
    ///
    /// Returns `Ok(None)` without touching the file when nothing matches.
    pub fn remove_by_title(&mut self, title: &str) -> Result<Option<Book>> {
        let Some(index) = self.position_of(title) else {
            info!(%title, "remove: book not found");
            return Ok(None);
        };

        let removed = self.books.remove(index);
        info!(title = %removed.title, "removed book");
        self.save()?;
        Ok(Some(removed))
    }

    /// Apply `update` to the first book whose title matches
    /// case-insensitively and persist. Returns the updated record, or
    /// `Ok(None)` without touching the file when nothing matches.
    pub fn update_by_title(&mut self, title: &str, update: BookUpdate) -> Result<Option<Book>> {
        let Some(index) = self.position_of(title) else {
            info!(%title, "update: book not found");
            return Ok(None);
        };

        let book = &mut self.books[index];
        book.apply(update);
        let updated = book.clone();
        info!(%title, new_title = %updated.title, "updated book");
        self.save()?;
        Ok(Some(updated))
    }

    /// Lazily yield every book whose title or author contains `term`,
    /// ignoring case, in collection order. An empty term matches everything.
    ///
    /// `field` is not consulted by the predicate: both title and author are
    /// always searched.
    pub fn find_by_substring<'a>(
        &'a self,
        term: &str,
        field: SearchField,
    ) -> impl Iterator<Item = &'a Book> + 'a {
        let needle = term.to_lowercase();
        debug!(term = %needle, field = field.label(), "searching catalog");
        self.books.iter().filter(move |book| {
            book.title.to_lowercase().contains(&needle)
                || book.author.to_lowercase().contains(&needle)
        })
    }

    pub fn list_all(&self) -> Listing<'_> {
        if self.books.is_empty() {
            Listing::Empty
        } else {
            Listing::Books(&self.books)
        }
    }

    pub fn books(&self) -> &[Book] {
        &self.books
    }

    pub fn compute_progress(&self) -> Progress {
        let completed = self.books.iter().filter(|book| book.read).count();
        Progress::from_counts(self.books.len(), completed)
    }

    /// Look up the first book with a case-insensitive title match.
    pub fn get_by_title(&self, title: &str) -> Option<&Book> {
        self.position_of(title).map(|index| &self.books[index])
    }

    fn position_of(&self, title: &str) -> Option<usize> {
        self.books.iter().position(|book| book.title_matches(title))
    }
}
