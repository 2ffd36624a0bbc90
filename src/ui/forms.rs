use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};

use crate::models::{Book, BookUpdate};

/// Internal representation of the add/edit book form.
#[derive(Clone)]
pub(crate) struct BookForm {
    pub(crate) title: String,
    pub(crate) author: String,
    pub(crate) year: String,
    pub(crate) genre: String,
    pub(crate) read: bool,
    pub(crate) active: BookField,
}

impl Default for BookForm {
    /// The read choice starts on "yes".
    fn default() -> Self {
        Self {
            title: String::new(),
            author: String::new(),
            year: String::new(),
            genre: String::new(),
            read: true,
            active: BookField::Title,
        }
    }
}

/// Fields available within the book form, in focus order.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub(crate) enum BookField {
    #[default]
    Title,
    Author,
    Year,
    Genre,
    Read,
}

impl BookField {
    pub(crate) const ALL: [BookField; 5] = [
        BookField::Title,
        BookField::Author,
        BookField::Year,
        BookField::Genre,
        BookField::Read,
    ];

    pub(crate) fn label(self) -> &'static str {
        match self {
            BookField::Title => "Title",
            BookField::Author => "Author",
            BookField::Year => "Year",
            BookField::Genre => "Genre",
            BookField::Read => "Read",
        }
    }

    fn next(self) -> Self {
        match self {
            BookField::Title => BookField::Author,
            BookField::Author => BookField::Year,
            BookField::Year => BookField::Genre,
            BookField::Genre => BookField::Read,
            BookField::Read => BookField::Title,
        }
    }

    fn previous(self) -> Self {
        match self {
            BookField::Title => BookField::Read,
            BookField::Author => BookField::Title,
            BookField::Year => BookField::Author,
            BookField::Genre => BookField::Year,
            BookField::Read => BookField::Genre,
        }
    }
}

impl BookForm {
    /// Pre-fill the form with an existing record when updating.
    pub(crate) fn from_book(book: &Book) -> Self {
        Self {
            title: book.title.clone(),
            author: book.author.clone(),
            year: book.year.clone(),
            genre: book.genre.clone(),
            read: book.read,
            active: BookField::Title,
        }
    }

    pub(crate) fn next_field(&mut self) {
        self.active = self.active.next();
    }

    pub(crate) fn previous_field(&mut self) {
        self.active = self.active.previous();
    }

    /// Feed a typed character to the active field. On the read field only
    /// `y`, `n` and space (toggle) mean anything.
    pub(crate) fn push_char(&mut self, ch: char) -> bool {
        if ch.is_control() {
            return false;
        }
        match self.active {
            BookField::Read => match ch {
                'y' | 'Y' => self.read = true,
                'n' | 'N' => self.read = false,
                ' ' => self.read = !self.read,
                _ => return false,
            },
            field => {
                if let Some(value) = self.text_mut(field) {
                    value.push(ch);
                }
            }
        }
        true
    }

    pub(crate) fn backspace(&mut self) {
        if let Some(value) = self.text_mut(self.active) {
            value.pop();
        }
    }

    /// The record exactly as typed. Nothing is trimmed or validated.
    pub(crate) fn to_book(&self) -> Book {
        Book {
            title: self.title.clone(),
            author: self.author.clone(),
            year: self.year.clone(),
            genre: self.genre.clone(),
            read: self.read,
        }
    }

    pub(crate) fn to_update(&self) -> BookUpdate {
        BookUpdate::replace_with(self.to_book())
    }

    fn text(&self, field: BookField) -> Option<&String> {
        match field {
            BookField::Title => Some(&self.title),
            BookField::Author => Some(&self.author),
            BookField::Year => Some(&self.year),
            BookField::Genre => Some(&self.genre),
            BookField::Read => None,
        }
    }

    fn text_mut(&mut self, field: BookField) -> Option<&mut String> {
        match field {
            BookField::Title => Some(&mut self.title),
            BookField::Author => Some(&mut self.author),
            BookField::Year => Some(&mut self.year),
            BookField::Genre => Some(&mut self.genre),
            BookField::Read => None,
        }
    }

    /// Render a single line for the form widget.
    pub(crate) fn build_line(&self, field: BookField) -> Line<'static> {
        let is_active = self.active == field;
        let active_style = Style::default().fg(Color::Yellow);

        let mut spans = vec![Span::raw(format!("{}: ", field.label()))];
        match self.text(field) {
            Some(value) => {
                let (display, style) = if value.is_empty() {
                    ("<empty>".to_string(), Style::default().fg(Color::DarkGray))
                } else {
                    (value.clone(), Style::default())
                };
                spans.push(Span::styled(
                    display,
                    if is_active { active_style } else { style },
                ));
            }
            None => {
                let (yes, no) = if self.read {
                    ("(•) yes", "( ) no")
                } else {
                    ("( ) yes", "(•) no")
                };
                let style = if is_active {
                    active_style
                } else {
                    Style::default()
                };
                spans.push(Span::styled(format!("{yes}  {no}"), style));
            }
        }

        Line::from(spans)
    }

    /// Cursor column offset for the active field, or `None` for the read
    /// choice which has no text cursor.
    pub(crate) fn cursor_offset(&self) -> Option<u16> {
        let value = self.text(self.active)?;
        let prefix = self.active.label().len() + 2;
        Some((prefix + value.chars().count()) as u16)
    }

    pub(crate) fn active_row(&self) -> u16 {
        BookField::ALL
            .iter()
            .position(|field| *field == self.active)
            .unwrap_or(0) as u16
    }
}

/// What a title prompt is collecting the title for.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum TitlePurpose {
    Remove,
    Update,
}

/// Single-line prompt asking for the title of an existing book.
#[derive(Clone)]
pub(crate) struct TitlePrompt {
    pub(crate) purpose: TitlePurpose,
    pub(crate) title: String,
    pub(crate) error: Option<String>,
}

impl TitlePrompt {
    pub(crate) fn new(purpose: TitlePurpose) -> Self {
        Self {
            purpose,
            title: String::new(),
            error: None,
        }
    }

    pub(crate) fn heading(&self) -> &'static str {
        match self.purpose {
            TitlePurpose::Remove => "Remove a Book",
            TitlePurpose::Update => "Update Book Details",
        }
    }

    pub(crate) fn question(&self) -> &'static str {
        match self.purpose {
            TitlePurpose::Remove => "Enter the title of the book to remove:",
            TitlePurpose::Update => "Enter the title of the book you want to edit:",
        }
    }

    pub(crate) fn push_char(&mut self, ch: char) -> bool {
        if ch.is_control() {
            return false;
        }
        self.title.push(ch);
        self.error = None;
        true
    }

    pub(crate) fn backspace(&mut self) {
        self.title.pop();
        self.error = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn type_str(form: &mut BookForm, text: &str) {
        for ch in text.chars() {
            form.push_char(ch);
        }
    }

    #[test]
    fn typing_fills_fields_in_focus_order() {
        let mut form = BookForm::default();
        type_str(&mut form, "A");
        form.next_field();
        type_str(&mut form, "B");
        form.next_field();
        type_str(&mut form, "2000");
        form.next_field();
        type_str(&mut form, "G");
        form.next_field();
        assert!(form.push_char('n'));

        assert_eq!(form.to_book(), Book::new("A", "B", "2000", "G", false));
    }

    #[test]
    fn read_field_ignores_other_characters() {
        let mut form = BookForm::default();
        form.previous_field();
        assert_eq!(form.active, BookField::Read);
        assert!(form.read);
        assert!(!form.push_char('x'));
        assert!(form.push_char(' '));
        assert!(!form.read);
        assert!(form.cursor_offset().is_none());
    }

    #[test]
    fn input_is_kept_verbatim() {
        let mut form = BookForm::default();
        type_str(&mut form, "  padded ");
        form.backspace();
        assert_eq!(form.to_book().title, "  padded");
    }

    #[test]
    fn edit_form_round_trips_existing_book() {
        let book = Book::new("Chemistry Basics", "Jane Doe", "2020", "Science", true);
        let form = BookForm::from_book(&book);
        assert_eq!(form.to_update(), BookUpdate::replace_with(book));
        assert_eq!(form.cursor_offset(), Some(("Title: ".len() + 16) as u16));
    }

    #[test]
    fn title_prompt_clears_error_on_input() {
        let mut prompt = TitlePrompt::new(TitlePurpose::Remove);
        prompt.error = Some("Book not found!".into());
        prompt.push_char('a');
        assert!(prompt.error.is_none());
        assert_eq!(prompt.title, "a");
    }
}
