use indexmap::map::Values;
use indexmap::IndexMap;

use crate::error::{NotesError, Result};
use crate::note::{Note, NoteDraft, NoteId, NoteKind};
use crate::search::KeywordQuery;

const FIRST_NOTE_ID: NoteId = 1;

/// Result of [`NotesManager::list_notes`].
#[derive(Debug, Clone)]
pub enum Listing<'a> {
    Empty,
    Notes(Notes<'a>),
}

/// Result of [`NotesManager::search_notes`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchResults<'a> {
    NoMatch,
    Matches(Vec<&'a Note>),
}

/// Borrowing iterator over the notes of a manager in insertion order.
#[derive(Debug, Clone)]
pub struct Notes<'a> {
    inner: Values<'a, NoteId, Note>,
}

impl<'a> Iterator for Notes<'a> {
    type Item = &'a Note;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl ExactSizeIterator for Notes<'_> {}

/// In-memory note collection. Ids start at 1, only ever grow, and are never
/// handed out twice, even after the note that held one is deleted.
#[derive(Debug)]
pub struct NotesManager {
    notes: IndexMap<NoteId, Note>,
    next_id: NoteId,
}

impl Default for NotesManager {
    fn default() -> Self {
        Self {
            notes: IndexMap::new(),
            next_id: FIRST_NOTE_ID,
        }
    }
}

impl NotesManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_note(
        &mut self,
        note_type: &str,
        content: &str,
        reminder_time: Option<&str>,
    ) -> Result<NoteId> {
        let kind: NoteKind = note_type
            .parse()
            .map_err(|_| NotesError::InvalidNoteType(note_type.to_owned()))?;
        Ok(self.insert(NoteDraft::new(kind, content, reminder_time)))
    }

    pub fn insert(&mut self, draft: NoteDraft) -> NoteId {
        let id = self.next_id;
        self.next_id += 1;
        tracing::debug!(id, kind = %draft.kind(), "added note");
        self.notes.insert(id, Note::assign(id, draft));
        id
    }

    pub fn delete_note(&mut self, id: NoteId) -> Result<Note> {
        let removed = self
            .notes
            .shift_remove(&id)
            .ok_or(NotesError::NotFound(id))?;
        tracing::debug!(id, remaining = self.notes.len(), "deleted note");
        Ok(removed)
    }

    pub fn list_notes(&self) -> Listing<'_> {
        if self.notes.is_empty() {
            return Listing::Empty;
        }
        Listing::Notes(Notes {
            inner: self.notes.values(),
        })
    }

    pub fn search_notes(&self, keyword: &str) -> SearchResults<'_> {
        let query = KeywordQuery::new(keyword);
        let matches = self
            .notes
            .values()
            .filter(|note| query.matches(note.content()))
            .collect::<Vec<_>>();
        tracing::debug!(keyword = query.keyword(), hits = matches.len(), "searched notes");
        if matches.is_empty() {
            SearchResults::NoMatch
        } else {
            SearchResults::Matches(matches)
        }
    }

    pub fn get(&self, id: NoteId) -> Option<&Note> {
        self.notes.get(&id)
    }

    pub fn len(&self) -> usize {
        self.notes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;
    use crate::note::NoteBody;

    fn contents(notes: &[&Note]) -> Vec<String> {
        notes.iter().map(|note| note.content().to_owned()).collect()
    }

    #[test]
    fn ids_increase_from_one_without_reuse() -> anyhow::Result<()> {
        let mut manager = NotesManager::new();
        let first = manager.add_note("text", "a", None)?;
        let second = manager.add_note("reminder", "b", Some("tomorrow"))?;
        assert_eq!((first, second), (1, 2));

        manager.delete_note(second)?;
        let third = manager.add_note("text", "c", None)?;
        assert_eq!(third, 3, "deleted ids must not be handed out again");
        Ok(())
    }

    #[test]
    fn invalid_type_does_not_consume_an_id() -> anyhow::Result<()> {
        let mut manager = NotesManager::new();
        manager.add_note("text", "first", None)?;

        let err = manager.add_note("bogus", "x", None);
        assert_matches!(err, Err(NotesError::InvalidNoteType(ref kind)) if kind == "bogus");
        assert_eq!(manager.len(), 1);

        assert_eq!(manager.add_note("text", "second", None)?, 2);
        Ok(())
    }

    #[test]
    fn note_type_is_case_insensitive() -> anyhow::Result<()> {
        let mut manager = NotesManager::new();
        let id = manager.add_note("ReMiNdEr", "Dentist", Some("Friday"))?;
        let note = manager.get(id).expect("note present");
        assert_eq!(note.kind(), NoteKind::Reminder);
        assert_eq!(note.reminder_time(), Some("Friday"));
        Ok(())
    }

    #[test]
    fn reminder_without_time_is_accepted() -> anyhow::Result<()> {
        let mut manager = NotesManager::new();
        let id = manager.add_note("reminder", "Someday", None)?;
        let note = manager.get(id).expect("note present");
        assert_eq!(
            note.body(),
            &NoteBody::Reminder {
                reminder_time: None
            }
        );
        assert!(note.render().contains("Reminder at: (none)"));
        Ok(())
    }

    #[test]
    fn text_note_drops_reminder_time() -> anyhow::Result<()> {
        let mut manager = NotesManager::new();
        let id = manager.add_note("text", "plain", Some("ignored"))?;
        assert_eq!(manager.get(id).and_then(Note::reminder_time), None);
        Ok(())
    }

    #[test]
    fn delete_missing_id_reports_not_found() -> anyhow::Result<()> {
        let mut manager = NotesManager::new();
        manager.add_note("text", "keep me", None)?;

        assert_matches!(manager.delete_note(42), Err(NotesError::NotFound(42)));
        assert_eq!(manager.len(), 1);
        Ok(())
    }

    #[test]
    fn delete_is_idempotent_by_effect() -> anyhow::Result<()> {
        let mut manager = NotesManager::new();
        let id = manager.add_note("text", "gone soon", None)?;
        manager.add_note("text", "stays", None)?;

        let removed = manager.delete_note(id)?;
        assert_eq!(removed.content(), "gone soon");
        assert_eq!(manager.len(), 1);

        assert_matches!(manager.delete_note(id), Err(NotesError::NotFound(_)));
        assert_eq!(manager.len(), 1);
        Ok(())
    }

    #[test]
    fn delete_preserves_order_of_remaining_notes() -> anyhow::Result<()> {
        let mut manager = NotesManager::new();
        for content in ["one", "two", "three", "four"] {
            manager.add_note("text", content, None)?;
        }
        manager.delete_note(2)?;

        let Listing::Notes(notes) = manager.list_notes() else {
            panic!("expected notes");
        };
        let ids: Vec<_> = notes.map(Note::id).collect();
        assert_eq!(ids, vec![1, 3, 4]);
        Ok(())
    }

    #[test]
    fn list_signals_empty_then_yields_entries() -> anyhow::Result<()> {
        let mut manager = NotesManager::new();
        assert_matches!(manager.list_notes(), Listing::Empty);

        manager.add_note("text", "Buy milk", None)?;
        let Listing::Notes(notes) = manager.list_notes() else {
            panic!("expected notes");
        };
        assert_eq!(notes.len(), 1);
        let rendered: Vec<_> = notes.clone().map(Note::render).collect();
        assert_eq!(rendered.len(), 1);
        assert!(rendered[0].contains("Buy milk"));

        // The iterator can be restarted without touching the manager.
        assert_eq!(notes.count(), 1);
        Ok(())
    }

    #[test]
    fn search_matches_case_insensitive_substrings() -> anyhow::Result<()> {
        let mut manager = NotesManager::new();
        manager.add_note("text", "Cats are great", None)?;
        manager.add_note("text", "Dogs", None)?;
        manager.add_note("reminder", "concatenate", Some("noon"))?;

        let SearchResults::Matches(hits) = manager.search_notes("cat") else {
            panic!("expected matches");
        };
        assert_eq!(contents(&hits), vec!["Cats are great", "concatenate"]);
        Ok(())
    }

    #[test]
    fn search_without_hits_signals_no_match() -> anyhow::Result<()> {
        let mut manager = NotesManager::new();
        assert_eq!(manager.search_notes("anything"), SearchResults::NoMatch);

        manager.add_note("text", "Dogs", None)?;
        assert_eq!(manager.search_notes("cat"), SearchResults::NoMatch);
        assert_eq!(manager.len(), 1);
        Ok(())
    }

    #[test]
    fn add_delete_list_scenario() -> anyhow::Result<()> {
        let mut manager = NotesManager::new();
        assert_eq!(manager.add_note("text", "Buy milk", None)?, 1);
        assert_eq!(
            manager.add_note("reminder", "Call mom", Some("2025-03-01 15:30"))?,
            2
        );

        manager.delete_note(1)?;
        assert_eq!(manager.len(), 1);

        let Listing::Notes(notes) = manager.list_notes() else {
            panic!("expected notes");
        };
        let rendered: Vec<_> = notes.map(Note::render).collect();
        assert_eq!(rendered.len(), 1);
        assert!(rendered[0].contains("Call mom"));
        assert!(rendered[0].contains("2025-03-01 15:30"));
        Ok(())
    }
}
