use thiserror::Error;

use crate::note::NoteId;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NotesError {
    #[error("invalid note type '{0}', expected 'text' or 'reminder'")]
    InvalidNoteType(String),

    #[error("note #{0} not found")]
    NotFound(NoteId),
}

pub type Result<T> = std::result::Result<T, NotesError>;
