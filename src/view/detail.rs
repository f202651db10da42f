use crate::catalog::WordCatalog;
use crate::session::study::StudySession;
use crate::store::notes::NotesStore;

/// Whether the word detail view is showing.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DetailState {
    #[default]
    Closed,
    Open,
}

impl DetailState {
    pub fn is_open(self) -> bool {
        self == DetailState::Open
    }

    /// Opens only when a word is selected. Returns whether it is open.
    pub fn open(&mut self, session: &StudySession) -> bool {
        if session.selected().is_some() {
            *self = DetailState::Open;
        }
        self.is_open()
    }

    pub fn close(&mut self) {
        *self = DetailState::Closed;
    }

    pub fn toggle(&mut self, session: &StudySession) {
        match self {
            DetailState::Open => self.close(),
            DetailState::Closed => {
                self.open(session);
            }
        }
    }

    /// Move the card selection while open so the view and the grid stay on the
    /// same word. Does nothing when closed.
    pub fn navigate_previous(self, session: &mut StudySession) {
        if self.is_open() {
            session.select_previous();
        }
    }

    pub fn navigate_next(self, session: &mut StudySession) {
        if self.is_open() {
            session.select_next();
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DetailView<'c> {
    pub word: &'c str,
    pub home_group: &'c str,
    pub definition: &'c str,
    pub example: &'c str,
    pub synonyms_line: String,
    pub note_text: String,
    pub can_go_previous: bool,
    pub can_go_next: bool,
}

/// Content for the selected word, or `None` when nothing is selected.
pub fn compute_detail<'c>(
    catalog: &'c WordCatalog,
    session: &StudySession,
    notes: &NotesStore,
) -> Option<DetailView<'c>> {
    let index = session.selected()?;
    let (entry, home) = session.selected_entry(catalog)?;
    Some(DetailView {
        word: &entry.word,
        home_group: home,
        definition: &entry.definition,
        example: &entry.example,
        synonyms_line: format!("Synonyms: {}", entry.synonyms),
        note_text: notes.get_note(home, &entry.word).to_string(),
        can_go_previous: index > 0,
        can_go_next: index + 1 < session.len(),
    })
}
