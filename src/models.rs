//! Domain models shared by the JSON store and the TUI. The types stay plain
//! data holders: the store owns ordering and persistence, the UI owns
//! presentation.

use std::fmt;

use serde::{Deserialize, Serialize};

/// One catalog entry. Field order here is the key order written to disk.
///
/// Missing keys in a loaded file fall back to an empty string (or `false` for
/// `read`) so no field is ever absent in memory.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Book {
    /// Free text. Also the lookup key for removal and updates, compared
    /// case-insensitively.
    #[serde(default)]
    pub title: String,
    /// Free text, searched alongside the title.
    #[serde(default)]
    pub author: String,
    /// Kept as text; the catalog never parses it as a number.
    #[serde(default)]
    pub year: String,
    /// Free text, shown in listings only.
    #[serde(default)]
    pub genre: String,
    /// Whether the book has been finished. Drives the reading progress and is
    /// written as a JSON boolean.
    #[serde(default)]
    pub read: bool,
}

impl Book {
    pub fn new(
        title: impl Into<String>,
        author: impl Into<String>,
        year: impl Into<String>,
        genre: impl Into<String>,
        read: bool,
    ) -> Self {
        Self {
            title: title.into(),
            author: author.into(),
            year: year.into(),
            genre: genre.into(),
            read,
        }
    }

    /// Case-insensitive title comparison used by every title lookup.
    pub fn title_matches(&self, title: &str) -> bool {
        self.title.to_lowercase() == title.to_lowercase()
    }

    pub fn reading_status(&self) -> &'static str {
        if self.read {
            "Read"
        } else {
            "Unread"
        }
    }

    /// Apply every field present in `update`, leaving the rest untouched.
    pub fn apply(&mut self, update: BookUpdate) {
        if let Some(title) = update.title {
            self.title = title;
        }
        if let Some(author) = update.author {
            self.author = author;
        }
        if let Some(year) = update.year {
            self.year = year;
        }
        if let Some(genre) = update.genre {
            self.genre = genre;
        }
        if let Some(read) = update.read {
            self.read = read;
        }
    }
}

impl fmt::Display for Book {
    /// `Title by Author (Year) - Genre - Read`, the line used in listings and
    /// search results.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} by {} ({}) - {} - {}",
            self.title,
            self.author,
            self.year,
            self.genre,
            self.reading_status()
        )
    }
}

/// Replacement values for `BookStore::update_by_title`. `None` keeps the
/// current value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BookUpdate {
    pub title: Option<String>,
    pub author: Option<String>,
    pub year: Option<String>,
    pub genre: Option<String>,
    pub read: Option<bool>,
}

impl BookUpdate {
    /// An update that replaces every field with the values of `book`.
    pub fn replace_with(book: Book) -> Self {
        Self {
            title: Some(book.title),
            author: Some(book.author),
            year: Some(book.year),
            genre: Some(book.genre),
            read: Some(book.read),
        }
    }

    pub fn read(mut self, read: bool) -> Self {
        self.read = Some(read);
        self
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }
}

/// Which field the user asked to search by.
///
/// The search predicate currently matches title and author regardless of the
/// selection; the choice is still collected and logged.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SearchField {
    #[default]
    Title,
    Author,
}

impl SearchField {
    pub fn toggle(self) -> Self {
        match self {
            SearchField::Title => SearchField::Author,
            SearchField::Author => SearchField::Title,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            SearchField::Title => "Title",
            SearchField::Author => "Author",
        }
    }
}

/// Reading progress across the whole collection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Progress {
    /// Number of books in the collection.
    pub total: usize,
    /// Number of those books marked read.
    pub completed: usize,
    /// Percentage of books marked read; `0.0` for an empty collection.
    pub percent: f64,
}

impl Progress {
    pub fn from_counts(total: usize, completed: usize) -> Self {
        let percent = if total > 0 {
            completed as f64 / total as f64 * 100.0
        } else {
            0.0
        };
        Self {
            total,
            completed,
            percent,
        }
    }

    /// Percentage rounded to two decimals, e.g. `66.67%`.
    pub fn percent_label(&self) -> String {
        format!("{:.2}%", self.percent)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_matches_listing_format() {
        let book = Book::new("Chemistry Basics", "Jane Doe", "2020", "Science", true);
        assert_eq!(
            book.to_string(),
            "Chemistry Basics by Jane Doe (2020) - Science - Read"
        );

        let unread = Book {
            read: false,
            ..book
        };
        assert!(unread.to_string().ends_with("- Unread"));
    }

    #[test]
    fn title_matching_ignores_case() {
        let book = Book::new("Chemistry Basics", "", "", "", false);
        assert!(book.title_matches("chemistry basics"));
        assert!(book.title_matches("CHEMISTRY BASICS"));
        assert!(!book.title_matches("chemistry"));
    }

    #[test]
    fn apply_only_touches_supplied_fields() {
        let mut book = Book::new("A", "B", "2000", "G", false);
        book.apply(BookUpdate::default().read(true));
        assert_eq!(book, Book::new("A", "B", "2000", "G", true));

        book.apply(BookUpdate::replace_with(Book::new("C", "D", "1999", "H", false)));
        assert_eq!(book, Book::new("C", "D", "1999", "H", false));
    }

    #[test]
    fn missing_keys_default_to_empty() {
        let book: Book = serde_json::from_str(r#"{"title": "Only Title"}"#).unwrap();
        assert_eq!(book.title, "Only Title");
        assert_eq!(book.author, "");
        assert!(!book.read);
    }

    #[test]
    fn serialized_key_order_is_stable() {
        let json = serde_json::to_string(&Book::new("A", "B", "2000", "G", false)).unwrap();
        assert_eq!(
            json,
            r#"{"title":"A","author":"B","year":"2000","genre":"G","read":false}"#
        );
    }

    #[test]
    fn progress_guards_empty_collection() {
        let empty = Progress::from_counts(0, 0);
        assert_eq!(empty.percent, 0.0);
        assert_eq!(empty.percent_label(), "0.00%");

        let partial = Progress::from_counts(3, 2);
        assert_eq!(partial.percent_label(), "66.67%");
    }

    #[test]
    fn search_field_toggles() {
        assert_eq!(SearchField::Title.toggle(), SearchField::Author);
        assert_eq!(SearchField::Author.toggle(), SearchField::Title);
    }
}
