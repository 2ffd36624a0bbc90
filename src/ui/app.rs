use std::mem;

use anyhow::{Context, Result};
use crossterm::event::KeyCode;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::prelude::*;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Gauge, List, ListItem, ListState, Paragraph, Wrap};
use ratatui::Frame;
use tracing::debug;

use crate::models::Book;
use crate::store::{BookStore, Listing};

use super::forms::{BookField, BookForm, TitlePrompt, TitlePurpose};
use super::helpers::{centered_rect, report_lines, surface_error};
use super::screens::{
    numbered_lines, progress_lines, MenuItem, MenuState, SearchResults, SearchState,
};

/// Footer space reserved for status messages and instructions.
const FOOTER_HEIGHT: u16 = 3;
/// Width of the menu column.
const SIDEBAR_WIDTH: u16 = 28;

/// Dialogs layered over the menu and content pane.
enum Mode {
    Normal,
    AddingBook(BookForm),
    TitlePrompt(TitlePrompt),
    EditingBook {
        /// Title the record was found under; used again to locate it on save.
        lookup_title: String,
        form: BookForm,
    },
    Searching(SearchState),
}

/// Holds the footer message text plus its severity.
struct StatusMessage {
    text: String,
    kind: StatusKind,
}

enum StatusKind {
    Info,
    Warning,
    Error,
}

impl StatusKind {
    fn style(&self) -> Style {
        match self {
            StatusKind::Info => Style::default().fg(Color::Green),
            StatusKind::Warning => Style::default().fg(Color::Yellow),
            StatusKind::Error => Style::default().fg(Color::Red),
        }
    }
}

/// Central application state. Owns the store; every action calls it
/// synchronously and reports the outcome in the footer.
pub struct App {
    store: BookStore,
    menu: MenuState,
    mode: Mode,
    status: Option<StatusMessage>,
    last_search: Option<SearchResults>,
    list_scroll: u16,
}

impl App {
    /// A catalog that loaded empty because its file was missing or
    /// malformed starts without any status line; the store logs the reason.
    pub fn new(store: BookStore) -> Self {
        Self {
            store,
            menu: MenuState::new(),
            mode: Mode::Normal,
            status: None,
            last_search: None,
            list_scroll: 0,
        }
    }

    pub fn store(&self) -> &BookStore {
        &self.store
    }

    /// Process one key press. Returns `true` when the user asked to quit.
    pub fn handle_key(&mut self, code: KeyCode) -> Result<bool> {
        let mut exit = false;
        let mode = mem::replace(&mut self.mode, Mode::Normal);

        self.mode = match mode {
            Mode::Normal => self.handle_normal_key(code, &mut exit),
            Mode::AddingBook(form) => self.handle_add_book(code, form),
            Mode::TitlePrompt(prompt) => self.handle_title_prompt(code, prompt),
            Mode::EditingBook { lookup_title, form } => {
                self.handle_edit_book(code, lookup_title, form)
            }
            Mode::Searching(state) => self.handle_search(code, state),
        };

        Ok(exit)
    }

    fn handle_normal_key(&mut self, code: KeyCode, exit: &mut bool) -> Mode {
        match code {
            KeyCode::Char('q') | KeyCode::Esc => *exit = true,
            KeyCode::Up | KeyCode::Char('k') => self.move_menu(-1),
            KeyCode::Down | KeyCode::Char('j') => self.move_menu(1),
            KeyCode::Home => self.move_menu(-(MenuItem::ALL.len() as isize)),
            KeyCode::End => self.move_menu(MenuItem::ALL.len() as isize),
            KeyCode::PageUp => self.list_scroll = self.list_scroll.saturating_sub(5),
            KeyCode::PageDown => {
                self.list_scroll = self.list_scroll.saturating_add(5).min(self.max_scroll());
            }
            KeyCode::Enter => return self.activate(self.menu.current()),
            KeyCode::Char('+') => return self.activate(MenuItem::AddBook),
            KeyCode::Char('-') => return self.activate(MenuItem::RemoveBook),
            KeyCode::Char('f') | KeyCode::Char('/') => return self.activate(MenuItem::SearchBooks),
            KeyCode::Char('e') => return self.activate(MenuItem::UpdateBook),
            KeyCode::Char('l') => {
                self.menu.select(MenuItem::ViewAll);
            }
            KeyCode::Char('p') => {
                self.menu.select(MenuItem::ViewProgress);
            }
            _ => {}
        }
        Mode::Normal
    }

    /// Open the dialog behind a menu entry. The two views need no dialog.
    fn activate(&mut self, item: MenuItem) -> Mode {
        self.menu.select(item);
        self.clear_status();
        match item {
            MenuItem::AddBook => Mode::AddingBook(BookForm::default()),
            MenuItem::RemoveBook => Mode::TitlePrompt(TitlePrompt::new(TitlePurpose::Remove)),
            MenuItem::SearchBooks => Mode::Searching(SearchState::default()),
            MenuItem::UpdateBook => Mode::TitlePrompt(TitlePrompt::new(TitlePurpose::Update)),
            MenuItem::ViewAll | MenuItem::ViewProgress => Mode::Normal,
        }
    }

    fn handle_add_book(&mut self, code: KeyCode, mut form: BookForm) -> Mode {
        match code {
            KeyCode::Esc => {
                self.set_status("Add book cancelled.", StatusKind::Info);
                return Mode::Normal;
            }
            KeyCode::Tab | KeyCode::Down => form.next_field(),
            KeyCode::BackTab | KeyCode::Up => form.previous_field(),
            KeyCode::Backspace => form.backspace(),
            // A failed save still aborts: memory already holds the book.
            KeyCode::Enter => {
                if let Err(err) = self.save_new_book(&form) {
                    self.set_status(surface_error(&err), StatusKind::Error);
                }
                return Mode::Normal;
            }
            KeyCode::Char(ch) => {
                form.push_char(ch);
            }
            _ => {}
        }
        Mode::AddingBook(form)
    }

    fn handle_title_prompt(&mut self, code: KeyCode, mut prompt: TitlePrompt) -> Mode {
        match code {
            KeyCode::Esc => {
                self.clear_status();
                return Mode::Normal;
            }
            KeyCode::Backspace => prompt.backspace(),
            KeyCode::Char(ch) => {
                prompt.push_char(ch);
            }
            KeyCode::Enter => match prompt.purpose {
                TitlePurpose::Remove => match self.remove_book(&prompt.title) {
                    Ok(true) => return Mode::Normal,
                    Ok(false) => prompt.error = Some("Book not found!".to_string()),
                    Err(err) => {
                        self.set_status(surface_error(&err), StatusKind::Error);
                        return Mode::Normal;
                    }
                },
                TitlePurpose::Update => match self.store.get_by_title(&prompt.title) {
                    Some(book) => {
                        let form = BookForm::from_book(book);
                        let lookup_title = book.title.clone();
                        self.clear_status();
                        return Mode::EditingBook { lookup_title, form };
                    }
                    None => {
                        prompt.error = Some("Book not found!".to_string());
                        self.set_status("Book not found!", StatusKind::Warning);
                    }
                },
            },
            _ => {}
        }
        Mode::TitlePrompt(prompt)
    }

    fn handle_edit_book(&mut self, code: KeyCode, lookup_title: String, mut form: BookForm) -> Mode {
        match code {
            KeyCode::Esc => {
                self.set_status("Edit cancelled.", StatusKind::Info);
                return Mode::Normal;
            }
            KeyCode::Tab | KeyCode::Down => form.next_field(),
            KeyCode::BackTab | KeyCode::Up => form.previous_field(),
            KeyCode::Backspace => form.backspace(),
            KeyCode::Enter => {
                if let Err(err) = self.save_existing_book(&lookup_title, &form) {
                    self.set_status(surface_error(&err), StatusKind::Error);
                }
                return Mode::Normal;
            }
            KeyCode::Char(ch) => {
                form.push_char(ch);
            }
            _ => {}
        }
        Mode::EditingBook { lookup_title, form }
    }

    fn handle_search(&mut self, code: KeyCode, mut state: SearchState) -> Mode {
        match code {
            KeyCode::Esc => return Mode::Normal,
            KeyCode::Tab | KeyCode::BackTab => state.field = state.field.toggle(),
            KeyCode::Backspace => {
                state.query.pop();
            }
            KeyCode::Enter => self.run_search(&state),
            KeyCode::Char(ch) if !ch.is_control() => state.query.push(ch),
            _ => {}
        }
        Mode::Searching(state)
    }

    fn save_new_book(&mut self, form: &BookForm) -> Result<()> {
        self.store
            .add(form.to_book())
            .context("failed to save catalog")?;
        self.last_search = None;
        self.set_status("Book added successfully!", StatusKind::Info);
        Ok(())
    }

    /// Returns `false` when no title matched.
    fn remove_book(&mut self, title: &str) -> Result<bool> {
        let removed = self
            .store
            .remove_by_title(title)
            .context("failed to save catalog")?;
        match removed {
            Some(_) => {
                self.last_search = None;
                self.clamp_scroll();
                self.set_status("Book removed successfully!", StatusKind::Info);
                Ok(true)
            }
            None => {
                self.set_status("Book not found!", StatusKind::Warning);
                Ok(false)
            }
        }
    }

    /// Returns `false` when the record vanished since the prompt found it.
    fn save_existing_book(&mut self, lookup_title: &str, form: &BookForm) -> Result<bool> {
        let updated = self
            .store
            .update_by_title(lookup_title, form.to_update())
            .context("failed to save catalog")?;
        if updated.is_some() {
            self.last_search = None;
            self.set_status("Book updated successfully!", StatusKind::Info);
            Ok(true)
        } else {
            self.set_status("Book not found!", StatusKind::Warning);
            Ok(false)
        }
    }

    fn run_search(&mut self, state: &SearchState) {
        let books: Vec<Book> = self
            .store
            .find_by_substring(&state.query, state.field)
            .cloned()
            .collect();
        debug!(matches = books.len(), "search finished");

        if books.is_empty() {
            self.set_status("No matching books found.", StatusKind::Warning);
        } else {
            self.set_status(format!("Found {} book(s).", books.len()), StatusKind::Info);
        }
        self.last_search = Some(SearchResults {
            term: state.query.clone(),
            field: state.field,
            books,
        });
    }

    fn move_menu(&mut self, offset: isize) {
        self.menu.move_selection(offset);
        self.list_scroll = 0;
    }

    fn clamp_scroll(&mut self) {
        self.list_scroll = self.list_scroll.min(self.max_scroll());
    }

    /// Last listing row the pane may scroll to.
    fn max_scroll(&self) -> u16 {
        u16::try_from(self.store.len().saturating_sub(1)).unwrap_or(u16::MAX)
    }

    fn set_status<S: Into<String>>(&mut self, text: S, kind: StatusKind) {
        self.status = Some(StatusMessage {
            text: text.into(),
            kind,
        });
    }

    fn clear_status(&mut self) {
        self.status = None;
    }

    pub(crate) fn draw(&self, frame: &mut Frame) {
        let area = frame.area();
        let footer_height = FOOTER_HEIGHT.min(area.height);

        let [body_area, footer_area] = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(footer_height)])
            .areas(area);

        let [menu_area, content_area] = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(SIDEBAR_WIDTH), Constraint::Min(0)])
            .areas(body_area);

        self.draw_menu(frame, menu_area);
        self.draw_content(frame, content_area);
        self.draw_footer(frame, footer_area);

        match &self.mode {
            Mode::AddingBook(form) => self.draw_book_form(frame, area, "Add a New Book", form),
            Mode::EditingBook { form, .. } => {
                self.draw_book_form(frame, area, "Update Book Details", form)
            }
            Mode::TitlePrompt(prompt) => self.draw_title_prompt(frame, area, prompt),
            Mode::Searching(state) => self.draw_search_bar(frame, content_area, state),
            Mode::Normal => {}
        }
    }

    fn draw_menu(&self, frame: &mut Frame, area: Rect) {
        let items: Vec<ListItem> = MenuItem::ALL
            .iter()
            .map(|item| ListItem::new(item.label()))
            .collect();

        let list = List::new(items)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title("Book Collection Menu"),
            )
            .highlight_style(
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            )
            .highlight_symbol("▶ ");

        let mut state = ListState::default();
        state.select(Some(self.menu.selected));
        frame.render_stateful_widget(list, area, &mut state);
    }

    fn draw_content(&self, frame: &mut Frame, area: Rect) {
        let item = self.menu.current();
        let block = Block::default().borders(Borders::ALL).title(item.label());

        match item {
            MenuItem::ViewAll => {
                let lines = match self.store.list_all() {
                    Listing::Empty => vec!["Your collection is empty.".to_string()],
                    Listing::Books(books) => {
                        let mut lines = vec!["Your Book Collection:".to_string()];
                        lines.extend(numbered_lines(books));
                        lines
                    }
                };
                let paragraph = Paragraph::new(report_lines(lines))
                    .block(block)
                    .wrap(Wrap { trim: false })
                    .scroll((self.list_scroll, 0));
                frame.render_widget(paragraph, area);
            }
            MenuItem::ViewProgress => self.draw_progress(frame, area, block),
            MenuItem::SearchBooks => {
                let mut lines = Vec::new();
                // The search bar covers the top rows of the pane while typing.
                if matches!(self.mode, Mode::Searching(_)) {
                    lines.extend([Line::from(""), Line::from("")]);
                }
                match &self.last_search {
                    Some(results) => {
                        lines.push(Line::from(Span::styled(
                            format!("Search by {}: \"{}\"", results.field.label(), results.term),
                            Style::default().fg(Color::Gray),
                        )));
                        lines.extend(report_lines(results.display_lines()));
                    }
                    None => lines.extend(item.hint().map(Line::from)),
                }
                let paragraph = Paragraph::new(lines)
                    .block(block)
                    .wrap(Wrap { trim: false });
                frame.render_widget(paragraph, area);
            }
            MenuItem::AddBook | MenuItem::RemoveBook | MenuItem::UpdateBook => {
                let mut lines: Vec<Line> = item.hint().map(Line::from).into_iter().collect();
                lines.push(Line::from(""));
                lines.push(Line::from(Span::styled(
                    format!(
                        "{} book(s) in {}",
                        self.store.len(),
                        self.store.path().display()
                    ),
                    Style::default().fg(Color::DarkGray),
                )));
                let paragraph = Paragraph::new(lines)
                    .block(block)
                    .wrap(Wrap { trim: true });
                frame.render_widget(paragraph, area);
            }
        }
    }

    fn draw_progress(&self, frame: &mut Frame, area: Rect, block: Block) {
        let progress = self.store.compute_progress();
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let [text_area, gauge_area] = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(4), Constraint::Length(3)])
            .areas(inner);

        let text: Vec<Line> = progress_lines(&progress)
            .into_iter()
            .map(Line::from)
            .collect();
        frame.render_widget(Paragraph::new(text), text_area);

        let gauge = Gauge::default()
            .block(Block::default().borders(Borders::ALL).title("Read"))
            .gauge_style(Style::default().fg(Color::Green))
            .ratio((progress.percent / 100.0).clamp(0.0, 1.0))
            .label(progress.percent_label());
        frame.render_widget(gauge, gauge_area);
    }

    fn draw_footer(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default().borders(Borders::TOP);
        frame.render_widget(block.clone(), area);
        let inner = block.inner(area);

        let status_line = if let Some(status) = &self.status {
            Line::from(vec![Span::styled(status.text.clone(), status.kind.style())])
        } else {
            Line::from("")
        };

        let paragraph = Paragraph::new(vec![status_line, self.footer_instructions()])
            .wrap(Wrap { trim: true });
        frame.render_widget(paragraph, inner);
    }

    fn footer_instructions(&self) -> Line<'static> {
        let key_style = Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD);
        let hints: &[(&str, &str)] = match &self.mode {
            Mode::Normal => &[
                ("[↑↓]", " Menu   "),
                ("[Enter]", " Open   "),
                ("[+/-]", " Add/Remove   "),
                ("[e]", " Edit   "),
                ("[f]", " Search   "),
                ("[q]", " Quit"),
            ],
            Mode::AddingBook(_) | Mode::EditingBook { .. } => &[
                ("[Tab]", " Next field   "),
                ("[Space/y/n]", " Read   "),
                ("[Enter]", " Save   "),
                ("[Esc]", " Cancel"),
            ],
            Mode::TitlePrompt(_) => &[("[Enter]", " Confirm   "), ("[Esc]", " Cancel")],
            Mode::Searching(_) => &[
                ("[Tab]", " Title/Author   "),
                ("[Enter]", " Search   "),
                ("[Esc]", " Close"),
            ],
        };

        let spans: Vec<Span<'static>> = hints
            .iter()
            .flat_map(|(key, text)| {
                [
                    Span::styled(key.to_string(), key_style),
                    Span::raw(text.to_string()),
                ]
            })
            .collect();
        Line::from(spans)
    }

    fn draw_book_form(&self, frame: &mut Frame, area: Rect, title: &str, form: &BookForm) {
        let popup_area = centered_rect(70, 50, area);
        frame.render_widget(Clear, popup_area);

        let block = Block::default().title(title).borders(Borders::ALL);
        frame.render_widget(block.clone(), popup_area);
        let inner = block.inner(popup_area);

        let mut lines: Vec<Line> = BookField::ALL
            .iter()
            .map(|field| form.build_line(*field))
            .collect();
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            "Enter to save • Tab to switch • Esc to cancel",
            Style::default().fg(Color::Gray),
        )));

        frame.render_widget(Paragraph::new(lines), inner);

        if let Some(offset) = form.cursor_offset() {
            frame.set_cursor_position((inner.x + offset, inner.y + form.active_row()));
        }
    }

    fn draw_title_prompt(&self, frame: &mut Frame, area: Rect, prompt: &TitlePrompt) {
        let popup_area = centered_rect(60, 30, area);
        frame.render_widget(Clear, popup_area);

        let block = Block::default().title(prompt.heading()).borders(Borders::ALL);
        frame.render_widget(block.clone(), popup_area);
        let inner = block.inner(popup_area);

        let mut lines = vec![
            Line::from(prompt.question()),
            Line::from(Span::styled(
                prompt.title.clone(),
                Style::default().fg(Color::Yellow),
            )),
            Line::from(""),
        ];
        match &prompt.error {
            Some(error) => lines.push(Line::from(Span::styled(
                error.clone(),
                Style::default().fg(Color::Yellow),
            ))),
            None => lines.push(Line::from(Span::styled(
                "Titles match regardless of case.",
                Style::default().fg(Color::Gray),
            ))),
        }

        frame.render_widget(Paragraph::new(lines), inner);
        frame.set_cursor_position((
            inner.x + prompt.title.chars().count() as u16,
            inner.y + 1,
        ));
    }

    fn draw_search_bar(&self, frame: &mut Frame, area: Rect, state: &SearchState) {
        let height = 3u16.min(area.height);
        let popup_area = Rect {
            x: area.x,
            y: area.y,
            width: area.width,
            height,
        };
        frame.render_widget(Clear, popup_area);

        let title = format!("Search by: {}", state.field.label());
        let block = Block::default().borders(Borders::ALL).title(title);
        let paragraph = Paragraph::new(Span::raw(format!("Search: {}", state.query)))
            .block(block.clone());
        frame.render_widget(paragraph, popup_area);

        let inner = block.inner(popup_area);
        let cursor_x = inner.x + "Search: ".len() as u16 + state.query.chars().count() as u16;
        frame.set_cursor_position((cursor_x, inner.y));
    }
}
