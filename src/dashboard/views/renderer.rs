//! # Terminal Renderer
//!
//! Draws the login form, the tab bar, resource tables with their pagination
//! bar and the create/edit modal as plain text with crossterm styling. The
//! renderer reads view models only; it never mutates them.

use crate::dashboard::events::RoutedResource;
use crate::dashboard::models::{category_label, Resource};
use crate::dashboard::view_models::{
    LoginController, ModalPresentation, PageButton, PageWindow, ResourceListController,
    ResourceScreen, Tab,
};
use anyhow::Result;
use crossterm::{
    cursor::MoveTo,
    queue,
    style::{Attribute, Color, Print, ResetColor, SetAttribute, SetForegroundColor},
    terminal::{Clear, ClearType},
};
use std::io::Write;

/// Widest a table cell may get before it is cut
const MAX_CELL_WIDTH: usize = 32;

const HOME_PLACEHOLDER: &str = "Welcome";

pub struct TerminalRenderer<W: Write> {
    out: W,
    clear_between_frames: bool,
}

impl<W: Write> TerminalRenderer<W> {
    pub fn new(out: W, clear_between_frames: bool) -> Self {
        Self {
            out,
            clear_between_frames,
        }
    }

    /// Give back the underlying writer
    pub fn into_inner(self) -> W {
        self.out
    }

    pub fn writer(&self) -> &W {
        &self.out
    }

    pub fn begin_frame(&mut self) -> Result<()> {
        if self.clear_between_frames {
            queue!(self.out, Clear(ClearType::All), MoveTo(0, 0))?;
        }
        Ok(())
    }

    pub fn end_frame(&mut self) -> Result<()> {
        self.out.flush()?;
        Ok(())
    }

    fn heading(&mut self, text: &str) -> Result<()> {
        queue!(
            self.out,
            SetAttribute(Attribute::Bold),
            Print(text),
            SetAttribute(Attribute::Reset),
            Print("\n")
        )?;
        Ok(())
    }

    fn colored_line(&mut self, color: Color, text: &str) -> Result<()> {
        queue!(
            self.out,
            SetForegroundColor(color),
            Print(text),
            ResetColor,
            Print("\n")
        )?;
        Ok(())
    }

    pub fn render_login(&mut self, login: &LoginController) -> Result<()> {
        self.heading("Login")?;
        let email = if login.email().is_empty() {
            "admin@example.com"
        } else {
            login.email()
        };
        queue!(self.out, Print(format!("  Email: {email}\n")))?;
        if login.is_pending() {
            queue!(self.out, Print("  Signing in...\n"))?;
        }
        if let Some(error) = login.error() {
            self.colored_line(Color::Red, &format!("  {error}"))?;
        }
        if let Some(message) = login.message() {
            self.colored_line(Color::Green, &format!("  {message}"))?;
        }
        Ok(())
    }

    pub fn render_tabs(&mut self, active: Tab) -> Result<()> {
        queue!(self.out, Print("Mental Health |"))?;
        for tab in Tab::ALL {
            if tab == active {
                queue!(
                    self.out,
                    Print(" "),
                    SetAttribute(Attribute::Reverse),
                    Print(format!("[{}]", tab.label())),
                    SetAttribute(Attribute::Reset)
                )?;
            } else {
                queue!(self.out, Print(format!("  {} ", tab.label())))?;
            }
        }
        queue!(self.out, Print(" | Logout\n\n"))?;
        Ok(())
    }

    pub fn render_home(&mut self) -> Result<()> {
        self.heading(HOME_PLACEHOLDER)
    }

    pub fn render_screen<R: RoutedResource>(&mut self, screen: &ResourceScreen<R>) -> Result<()> {
        self.heading(&format!("{}s    [create]", R::KIND.title()))?;

        let list = screen.list();
        if list.is_loading() {
            queue!(self.out, Print("Loading...\n"))?;
        } else {
            self.render_table(list)?;
            self.render_pagination(&list.window())?;
        }

        if screen.modal().is_open() {
            self.render_modal(screen.modal())?;
        }
        Ok(())
    }

    fn render_table<R: Resource>(&mut self, list: &ResourceListController<R>) -> Result<()> {
        let mut rows: Vec<Vec<String>> = vec![R::COLUMNS
            .iter()
            .map(|column| column.to_string())
            .chain(std::iter::once("Action".to_string()))
            .collect()];
        rows.extend(list.records().iter().map(|record| {
            let mut cells: Vec<String> = record.cells().iter().map(|cell| truncate(cell)).collect();
            cells.push("edit | delete".to_string());
            cells
        }));

        let column_count = rows[0].len();
        let widths: Vec<usize> = (0..column_count)
            .map(|i| {
                rows.iter()
                    .filter_map(|row| row.get(i))
                    .map(|cell| cell.chars().count())
                    .max()
                    .unwrap_or(0)
            })
            .collect();

        for (index, row) in rows.iter().enumerate() {
            let line = row
                .iter()
                .zip(&widths)
                .map(|(cell, &width)| format!("{cell:<width$}"))
                .collect::<Vec<_>>()
                .join(" | ");
            if index == 0 {
                self.heading(line.trim_end())?;
            } else {
                queue!(self.out, Print(line.trim_end()), Print("\n"))?;
            }
        }
        if list.records().is_empty() {
            queue!(self.out, Print("(no records)\n"))?;
        }
        Ok(())
    }

    fn render_pagination(&mut self, window: &PageWindow) -> Result<()> {
        for button in window.buttons() {
            let label = match button {
                PageButton::First => "First".to_string(),
                PageButton::Previous => "Previous".to_string(),
                PageButton::Page(page) if window.is_current(page) => format!("[{page}]"),
                PageButton::Page(page) => page.to_string(),
                PageButton::Next => "Next".to_string(),
                PageButton::Last => "Last".to_string(),
            };
            queue!(self.out, Print(format!("{label} ")))?;
        }
        queue!(
            self.out,
            Print(format!("(page {} of {})\n", window.current, window.total_pages))
        )?;
        Ok(())
    }

    fn render_modal<R: Resource>(&mut self, modal: &ModalPresentation<R>) -> Result<()> {
        let form = modal.form();
        queue!(self.out, Print("\n"))?;
        self.heading(&format!("== {} ==", modal.title()))?;

        if modal.mode().is_some() && !form.is_draft_ready() && form.errors().is_empty() {
            queue!(self.out, Print("Loading details...\n"))?;
        }

        let draft = form.draft();
        for field in R::FORM_FIELDS.iter().copied() {
            let value = draft.text(field);
            let shown = if field == R::CATEGORY_FIELD {
                match category_label::<R>(value) {
                    Some(label) => format!("{value} ({label})"),
                    None => value.to_string(),
                }
            } else {
                value.to_string()
            };
            queue!(self.out, Print(format!("  {field}: {shown}\n")))?;
            if let Some(error) = form.errors().get(field) {
                self.colored_line(Color::Red, &format!("    {error}"))?;
            }
        }
        queue!(
            self.out,
            Print(format!("  {}: {}\n", R::MEDIA_FIELD, draft.text(R::MEDIA_FIELD)))
        )?;

        let options = R::categories()
            .iter()
            .map(|option| format!("{}={}", option.code, option.label))
            .collect::<Vec<_>>()
            .join(", ");
        queue!(self.out, Print(format!("  {} options: {options}\n", R::CATEGORY_FIELD)))?;

        if let Some(error) = form.errors().generic() {
            self.colored_line(Color::Red, &format!("  {error}"))?;
        }

        let actions = if form.is_submitting() {
            "  Saving...".to_string()
        } else {
            format!("  [{}] [Cancel]", modal.submit_label())
        };
        queue!(self.out, Print(actions), Print("\n"))?;
        Ok(())
    }

    pub fn render_status(&mut self, status: Option<&str>) -> Result<()> {
        if let Some(status) = status {
            queue!(self.out, Print("\n"))?;
            self.colored_line(Color::Yellow, status)?;
        }
        Ok(())
    }
}

fn truncate(cell: &str) -> String {
    let cell = cell.replace('\n', " ");
    if cell.chars().count() <= MAX_CELL_WIDTH {
        return cell;
    }
    let mut cut: String = cell.chars().take(MAX_CELL_WIDTH - 3).collect();
    cut.push_str("...");
    cut
}
