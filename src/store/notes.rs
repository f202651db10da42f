use std::rc::Rc;

use crate::store::json_store::JsonStore;
use crate::store::schema::NotesData;

/// Free-text notes per (group, word). An absent note and an empty note are
/// the same thing.
pub struct NotesStore {
    data: NotesData,
    backend: Option<Rc<JsonStore>>,
}

impl NotesStore {
    pub fn load(backend: Option<Rc<JsonStore>>) -> Self {
        let data = backend
            .as_ref()
            .map(|store| store.load_notes())
            .unwrap_or_default();
        Self { data, backend }
    }

    pub fn in_memory() -> Self {
        Self::load(None)
    }

    pub fn get_note(&self, group: &str, word: &str) -> &str {
        self.data
            .get(group)
            .and_then(|words| words.get(word))
            .map(String::as_str)
            .unwrap_or("")
    }

    pub fn set_note(&mut self, group: &str, word: &str, text: &str) {
        if text.is_empty() {
            if let Some(words) = self.data.get_mut(group) {
                words.remove(word);
                if words.is_empty() {
                    self.data.remove(group);
                }
            }
        } else {
            self.data
                .entry(group.to_string())
                .or_default()
                .insert(word.to_string(), text.to_string());
        }
        self.flush();
    }

    /// Drives the note indicator on cards: whitespace-only notes don't count.
    pub fn has_note(&self, group: &str, word: &str) -> bool {
        !self.get_note(group, word).trim().is_empty()
    }

    pub fn data(&self) -> &NotesData {
        &self.data
    }

    fn flush(&self) {
        if let Some(ref backend) = self.backend
            && let Err(e) = backend.save_notes(&self.data)
        {
            log::warn!("failed to save notes: {e:#}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn missing_note_is_empty() {
        let notes = NotesStore::in_memory();
        assert_eq!(notes.get_note("A", "abate"), "");
        assert!(!notes.has_note("A", "abate"));
    }

    #[test]
    fn has_note_round_trip() {
        let mut notes = NotesStore::in_memory();
        notes.set_note("A", "abate", "   \t ");
        assert!(!notes.has_note("A", "abate"));
        notes.set_note("A", "abate", "ok");
        assert!(notes.has_note("A", "abate"));
        notes.set_note("A", "abate", "");
        assert!(!notes.has_note("A", "abate"));
        assert!(notes.data().is_empty());
    }

    #[test]
    fn whitespace_note_text_is_kept_verbatim() {
        let mut notes = NotesStore::in_memory();
        notes.set_note("A", "abate", "  ");
        assert_eq!(notes.get_note("A", "abate"), "  ");
    }

    #[test]
    fn notes_are_written_through() {
        let dir = TempDir::new().unwrap();
        let backend = Rc::new(JsonStore::with_base_dir(dir.path().to_path_buf()).unwrap());

        let mut notes = NotesStore::load(Some(Rc::clone(&backend)));
        notes.set_note("B", "banal", "think: boring");

        let reloaded = NotesStore::load(Some(backend));
        assert_eq!(reloaded.get_note("B", "banal"), "think: boring");
    }
}
