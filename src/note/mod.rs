use std::fmt;

use strum::{AsRefStr, Display, EnumString};
use time::OffsetDateTime;

mod render;

pub use render::{RenderOptions, DEFAULT_MISSING_REMINDER, DEFAULT_TIMESTAMP_FORMAT};

pub type NoteId = u64;

/// Note variants a user can ask for by name. Parsing ignores ASCII case.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumString, AsRefStr, Display)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum NoteKind {
    Text,
    Reminder,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NoteBody {
    Text,
    /// The reminder time is free-form user text and is never parsed.
    Reminder { reminder_time: Option<String> },
}

impl NoteBody {
    pub fn kind(&self) -> NoteKind {
        match self {
            NoteBody::Text => NoteKind::Text,
            NoteBody::Reminder { .. } => NoteKind::Reminder,
        }
    }
}

/// A note that has not been handed to a manager yet and therefore has no id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteDraft {
    content: String,
    created_at: OffsetDateTime,
    body: NoteBody,
}

impl NoteDraft {
    pub fn text(content: impl Into<String>) -> Self {
        Self::with_body(content.into(), NoteBody::Text)
    }

    pub fn reminder(content: impl Into<String>, reminder_time: Option<String>) -> Self {
        Self::with_body(content.into(), NoteBody::Reminder { reminder_time })
    }

    /// Builds a draft of the requested kind. Text notes ignore `reminder_time`.
    pub fn new(kind: NoteKind, content: &str, reminder_time: Option<&str>) -> Self {
        match kind {
            NoteKind::Text => Self::text(content),
            NoteKind::Reminder => Self::reminder(content, reminder_time.map(str::to_owned)),
        }
    }

    fn with_body(content: String, body: NoteBody) -> Self {
        Self {
            content,
            created_at: now(),
            body,
        }
    }

    #[cfg(test)]
    pub(crate) fn created_at_override(mut self, created_at: OffsetDateTime) -> Self {
        self.created_at = created_at;
        self
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn created_at(&self) -> OffsetDateTime {
        self.created_at
    }

    pub fn body(&self) -> &NoteBody {
        &self.body
    }

    pub fn kind(&self) -> NoteKind {
        self.body.kind()
    }
}

/// A note owned by a [`crate::manager::NotesManager`], paired with the id it was assigned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Note {
    id: NoteId,
    draft: NoteDraft,
}

impl Note {
    pub(crate) fn assign(id: NoteId, draft: NoteDraft) -> Self {
        Self { id, draft }
    }

    pub fn id(&self) -> NoteId {
        self.id
    }

    pub fn content(&self) -> &str {
        self.draft.content()
    }

    pub fn created_at(&self) -> OffsetDateTime {
        self.draft.created_at()
    }

    pub fn body(&self) -> &NoteBody {
        self.draft.body()
    }

    pub fn kind(&self) -> NoteKind {
        self.draft.kind()
    }

    pub fn reminder_time(&self) -> Option<&str> {
        match self.body() {
            NoteBody::Text => None,
            NoteBody::Reminder { reminder_time } => reminder_time.as_deref(),
        }
    }

    pub fn render(&self) -> String {
        self.render_with(RenderOptions::shared())
    }
}

impl fmt::Display for Note {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

fn now() -> OffsetDateTime {
    OffsetDateTime::now_local().unwrap_or_else(|_| OffsetDateTime::now_utc())
}
