pub mod cli;
pub mod config;
pub mod error;
pub mod manager;
pub mod note;
pub mod search;

pub use config::{AppConfig, ConfigLoader, ConfigPaths};
pub use error::NotesError;
pub use manager::{Listing, NotesManager, SearchResults};
pub use note::{Note, NoteBody, NoteDraft, NoteId, NoteKind, RenderOptions};
