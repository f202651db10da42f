use crate::catalog::{WordCatalog, WordRef};
use crate::store::notes::NotesStore;
use crate::store::progress::ProgressStore;
use crate::store::schema::MasteryStatus;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CardView<'c> {
    pub word: &'c str,
    pub status: MasteryStatus,
    pub is_selected: bool,
    pub has_note_indicator: bool,
}

pub fn compute_card<'c>(
    catalog: &'c WordCatalog,
    word: WordRef,
    index: usize,
    selected: Option<usize>,
    progress: &ProgressStore,
    notes: &NotesStore,
) -> CardView<'c> {
    let entry = catalog.entry(word);
    let home = catalog.group_name(word.group);
    CardView {
        word: &entry.word,
        status: progress.get(home, &entry.word),
        is_selected: selected == Some(index),
        has_note_indicator: notes.has_note(home, &entry.word),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::test_catalog;

    #[test]
    fn card_reflects_status_selection_and_note() {
        let catalog = test_catalog();
        let mut progress = ProgressStore::in_memory(&catalog);
        let mut notes = NotesStore::in_memory();
        let banal = catalog.find("banal").unwrap();

        let plain = compute_card(&catalog, banal, 4, None, &progress, &notes);
        assert_eq!(plain.word, "banal");
        assert_eq!(plain.status, MasteryStatus::New);
        assert!(!plain.is_selected);
        assert!(!plain.has_note_indicator);

        progress.set("B", "banal", MasteryStatus::Known);
        notes.set_note("B", "banal", "trite");
        let marked = compute_card(&catalog, banal, 4, Some(4), &progress, &notes);
        assert_eq!(marked.status, MasteryStatus::Known);
        assert!(marked.is_selected);
        assert!(marked.has_note_indicator);
    }

    #[test]
    fn note_in_other_group_does_not_light_indicator() {
        let catalog = test_catalog();
        let progress = ProgressStore::in_memory(&catalog);
        let mut notes = NotesStore::in_memory();
        notes.set_note("A", "banal", "wrong group");
        let banal = catalog.find("banal").unwrap();
        let card = compute_card(&catalog, banal, 0, None, &progress, &notes);
        assert!(!card.has_note_indicator);
    }
}
