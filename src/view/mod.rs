//! Everything the screen shows, derived from session and stores. Nothing here
//! is stored between frames; render code reads a fresh [`StudyView`].

pub mod card;
pub mod detail;
pub mod stats;

use crate::catalog::WordCatalog;
use crate::session::study::StudySession;
use crate::store::notes::NotesStore;
use crate::store::progress::{ProgressStore, StatusTally};

use card::{CardView, compute_card};
use detail::{DetailState, DetailView, compute_detail};
use stats::compute_stats;

pub struct StudyView<'c> {
    pub label: String,
    pub mixed: bool,
    pub cards: Vec<CardView<'c>>,
    pub stats: StatusTally,
    pub selected: Option<usize>,
    /// Present only while the detail view is open.
    pub detail: Option<DetailView<'c>>,
}

impl<'c> StudyView<'c> {
    pub fn derive(
        catalog: &'c WordCatalog,
        session: &StudySession,
        progress: &ProgressStore,
        notes: &NotesStore,
        detail_state: DetailState,
    ) -> Self {
        let selected = session.selected();
        let cards = session
            .displayed()
            .iter()
            .enumerate()
            .map(|(index, word)| compute_card(catalog, *word, index, selected, progress, notes))
            .collect();
        let detail = if detail_state.is_open() {
            compute_detail(catalog, session, notes)
        } else {
            None
        };

        Self {
            label: session.label().to_string(),
            mixed: session.is_mixed(),
            cards,
            stats: compute_stats(catalog, session.displayed(), progress),
            selected,
            detail,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::test_catalog;
    use crate::store::schema::MasteryStatus;

    #[test]
    fn derived_view_tracks_mutations() {
        let catalog = test_catalog();
        let mut progress = ProgressStore::in_memory(&catalog);
        let mut notes = NotesStore::in_memory();
        let mut session = StudySession::new(&catalog);
        session.select(0);

        let before = StudyView::derive(&catalog, &session, &progress, &notes, DetailState::Closed);
        assert_eq!(before.stats.new, 3);
        assert!(before.detail.is_none());
        assert!(before.cards[0].is_selected);

        session.mark(&catalog, &mut progress, MasteryStatus::Known);
        session.set_note_for_selected(&catalog, &mut notes, "less intense");
        let after = StudyView::derive(&catalog, &session, &progress, &notes, DetailState::Open);
        assert_eq!(after.stats.known, 1);
        assert_eq!(after.cards[0].status, MasteryStatus::Known);
        assert!(after.cards[0].has_note_indicator);
        assert_eq!(after.detail.unwrap().note_text, "less intense");
        assert_eq!(after.stats.total(), after.cards.len());
    }

    #[test]
    fn exactly_one_card_selected_at_most() {
        let catalog = test_catalog();
        let progress = ProgressStore::in_memory(&catalog);
        let notes = NotesStore::in_memory();
        let mut session = StudySession::new(&catalog);
        session.merge_up_to(&catalog, "C");
        session.select(6);
        let view = StudyView::derive(&catalog, &session, &progress, &notes, DetailState::Closed);
        assert_eq!(view.cards.iter().filter(|c| c.is_selected).count(), 1);
        assert!(view.mixed);
        assert_eq!(view.label, "Groups 1-3");
    }
}
