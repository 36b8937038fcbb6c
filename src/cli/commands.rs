use std::io::{BufRead, Write};
use std::ops::ControlFlow;

use anyhow::Result;

use crate::config::AppConfig;
use crate::error::NotesError;
use crate::manager::{Listing, NotesManager, SearchResults};
use crate::note::{Note, NoteId, NoteKind, RenderOptions};

type Flow = ControlFlow<()>;

const MENU: &[&str] = &[
    "This is a Smart Notes Manager",
    "Type 1 to Add Note",
    "Type 2 to Show Notes",
    "Type 3 to Search Notes",
    "Type 4 to Delete Note",
    "Type 5 to Exit Smart Notes Manager",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    AddNote,
    ShowNotes,
    SearchNotes,
    DeleteNote,
    Exit,
}

impl MenuChoice {
    pub fn parse(input: &str) -> Option<Self> {
        match input.trim() {
            "1" => Some(MenuChoice::AddNote),
            "2" => Some(MenuChoice::ShowNotes),
            "3" => Some(MenuChoice::SearchNotes),
            "4" => Some(MenuChoice::DeleteNote),
            "5" => Some(MenuChoice::Exit),
            _ => None,
        }
    }
}

/// Numbered-menu loop driving a [`NotesManager`]. Reaching end of input at
/// any prompt ends the session.
pub struct Session<'a, R, W> {
    manager: &'a mut NotesManager,
    render: RenderOptions,
    show_menu: bool,
    input: R,
    output: W,
}

impl<'a, R: BufRead, W: Write> Session<'a, R, W> {
    pub fn new(manager: &'a mut NotesManager, config: &AppConfig, input: R, output: W) -> Self {
        Self {
            manager,
            render: config.render_options(),
            show_menu: config.session.show_menu,
            input,
            output,
        }
    }

    pub fn run(&mut self) -> Result<()> {
        tracing::info!("notes session started");
        loop {
            if self.show_menu {
                self.print_menu()?;
            }
            let Some(choice) = self.prompt("Enter your choice")? else {
                break;
            };
            let flow = match MenuChoice::parse(&choice) {
                Some(MenuChoice::AddNote) => self.add_note()?,
                Some(MenuChoice::ShowNotes) => self.show_notes()?,
                Some(MenuChoice::SearchNotes) => self.search_notes()?,
                Some(MenuChoice::DeleteNote) => self.delete_note()?,
                Some(MenuChoice::Exit) => {
                    writeln!(self.output, "Exiting program...")?;
                    Flow::Break(())
                }
                None => {
                    writeln!(self.output, "Invalid choice. Try again.")?;
                    Flow::Continue(())
                }
            };
            if flow.is_break() {
                break;
            }
        }
        self.output.flush()?;
        tracing::info!(notes = self.manager.len(), "notes session finished");
        Ok(())
    }

    fn print_menu(&mut self) -> Result<()> {
        writeln!(self.output)?;
        for line in MENU {
            writeln!(self.output, "{line}")?;
        }
        Ok(())
    }

    fn add_note(&mut self) -> Result<Flow> {
        let Some(note_type) = self.prompt("Enter note type (text/reminder)")? else {
            return Ok(Flow::Break(()));
        };
        let note_type = note_type.trim().to_lowercase();
        let Some(content) = self.prompt("Enter note content")? else {
            return Ok(Flow::Break(()));
        };
        let reminder_time = if matches!(note_type.parse::<NoteKind>(), Ok(NoteKind::Reminder)) {
            match self.prompt("Enter reminder time (YYYY-MM-DD HH:MM)")? {
                Some(time) if time.trim().is_empty() => None,
                Some(time) => Some(time),
                None => return Ok(Flow::Break(())),
            }
        } else {
            None
        };

        match self
            .manager
            .add_note(&note_type, &content, reminder_time.as_deref())
        {
            Ok(id) => writeln!(self.output, "Added {note_type} note with ID {id}.")?,
            Err(err @ NotesError::InvalidNoteType(_)) => {
                tracing::debug!(%err, "rejected note");
                writeln!(
                    self.output,
                    "Invalid note type. Please choose 'text' or 'reminder'."
                )?;
            }
            Err(err) => writeln!(self.output, "{err}")?,
        }
        Ok(Flow::Continue(()))
    }

    fn show_notes(&mut self) -> Result<Flow> {
        let lines = match self.manager.list_notes() {
            Listing::Empty => vec!["No notes to display.".to_string()],
            Listing::Notes(notes) => self.render_all(notes),
        };
        self.write_lines(&lines)?;
        Ok(Flow::Continue(()))
    }

    fn search_notes(&mut self) -> Result<Flow> {
        let Some(keyword) = self.prompt("Enter keyword to search")? else {
            return Ok(Flow::Break(()));
        };
        let lines = match self.manager.search_notes(&keyword) {
            SearchResults::NoMatch => vec!["No matching notes found.".to_string()],
            SearchResults::Matches(notes) => self.render_all(notes),
        };
        self.write_lines(&lines)?;
        Ok(Flow::Continue(()))
    }

    fn delete_note(&mut self) -> Result<Flow> {
        let Some(raw_id) = self.prompt("Enter note ID to delete")? else {
            return Ok(Flow::Break(()));
        };
        let Ok(raw_id) = raw_id.trim().parse::<i64>() else {
            writeln!(self.output, "Invalid note ID.")?;
            return Ok(Flow::Continue(()));
        };
        // Ids start at 1, so zero and negative numbers can never match.
        let Ok(id) = NoteId::try_from(raw_id) else {
            writeln!(self.output, "Note not found.")?;
            return Ok(Flow::Continue(()));
        };
        match self.manager.delete_note(id) {
            Ok(_) => writeln!(self.output, "Deleted note with ID {id}.")?,
            Err(NotesError::NotFound(_)) => writeln!(self.output, "Note not found.")?,
            Err(err) => writeln!(self.output, "{err}")?,
        }
        Ok(Flow::Continue(()))
    }

    fn render_all<'n>(&self, notes: impl IntoIterator<Item = &'n Note>) -> Vec<String> {
        notes
            .into_iter()
            .map(|note| note.render_with(&self.render))
            .collect()
    }

    fn write_lines(&mut self, lines: &[String]) -> Result<()> {
        for line in lines {
            writeln!(self.output, "{line}")?;
        }
        Ok(())
    }

    fn prompt(&mut self, label: &str) -> Result<Option<String>> {
        write!(self.output, "{label}: ")?;
        self.output.flush()?;
        let mut input = String::new();
        if self.input.read_line(&mut input)? == 0 {
            return Ok(None);
        }
        let line = input.strip_suffix('\n').unwrap_or(&input);
        let line = line.strip_suffix('\r').unwrap_or(line);
        Ok(Some(line.to_owned()))
    }
}
