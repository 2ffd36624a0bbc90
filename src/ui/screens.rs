use crate::models::{Book, Progress, SearchField};

/// Entries of the sidebar menu, in display order.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum MenuItem {
    AddBook,
    RemoveBook,
    SearchBooks,
    UpdateBook,
    ViewAll,
    ViewProgress,
}

impl MenuItem {
    pub(crate) const ALL: [MenuItem; 6] = [
        MenuItem::AddBook,
        MenuItem::RemoveBook,
        MenuItem::SearchBooks,
        MenuItem::UpdateBook,
        MenuItem::ViewAll,
        MenuItem::ViewProgress,
    ];

    pub(crate) fn label(self) -> &'static str {
        match self {
            MenuItem::AddBook => "Add a new book",
            MenuItem::RemoveBook => "Remove a book",
            MenuItem::SearchBooks => "Search for books",
            MenuItem::UpdateBook => "Update book details",
            MenuItem::ViewAll => "View all books",
            MenuItem::ViewProgress => "View reading progress",
        }
    }

    /// Hint shown in the content pane for actions that open a dialog.
    pub(crate) fn hint(self) -> Option<&'static str> {
        match self {
            MenuItem::AddBook => Some("Press Enter to add a new book."),
            MenuItem::RemoveBook => Some("Press Enter to remove a book by its title."),
            MenuItem::SearchBooks => Some("Press Enter to search by title or author."),
            MenuItem::UpdateBook => Some("Press Enter to edit a book by its title."),
            MenuItem::ViewAll | MenuItem::ViewProgress => None,
        }
    }
}

/// Tracks the highlighted menu entry.
pub(crate) struct MenuState {
    pub(crate) selected: usize,
}

impl MenuState {
    pub(crate) fn new() -> Self {
        Self { selected: 0 }
    }

    pub(crate) fn current(&self) -> MenuItem {
        MenuItem::ALL[self.selected.min(MenuItem::ALL.len() - 1)]
    }

    /// Move the highlight, clamped to the first and last entries.
    pub(crate) fn move_selection(&mut self, offset: isize) {
        let last = MenuItem::ALL.len() as isize - 1;
        let new = (self.selected as isize + offset).clamp(0, last);
        self.selected = new as usize;
    }

    pub(crate) fn select(&mut self, item: MenuItem) {
        if let Some(idx) = MenuItem::ALL.iter().position(|candidate| *candidate == item) {
            self.selected = idx;
        }
    }
}

/// State for an active search input.
#[derive(Default)]
pub(crate) struct SearchState {
    pub(crate) query: String,
    pub(crate) field: SearchField,
}

/// Snapshot of the last executed search, shown until the next one runs.
pub(crate) struct SearchResults {
    pub(crate) term: String,
    pub(crate) field: SearchField,
    pub(crate) books: Vec<Book>,
}

impl SearchResults {
    pub(crate) fn display_lines(&self) -> Vec<String> {
        if self.books.is_empty() {
            return vec!["No matching books found.".to_string()];
        }
        let mut lines = vec!["Matching Books:".to_string()];
        lines.extend(numbered_lines(&self.books));
        lines
    }
}

/// `1. Title by Author (Year) - Genre - Read` for each book.
pub(crate) fn numbered_lines<'a>(books: impl IntoIterator<Item = &'a Book>) -> Vec<String> {
    books
        .into_iter()
        .enumerate()
        .map(|(idx, book)| format!("{}. {}", idx + 1, book))
        .collect()
}

pub(crate) fn progress_lines(progress: &Progress) -> Vec<String> {
    vec![
        format!("Total books in collection: {}", progress.total),
        format!("Books read: {}", progress.completed),
        format!("Reading progress: {}", progress.percent_label()),
    ]
}
