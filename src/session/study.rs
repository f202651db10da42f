use rand::Rng;
use rand::seq::SliceRandom;

use crate::catalog::{WordCatalog, WordEntry, WordRef};
use crate::store::notes::NotesStore;
use crate::store::progress::ProgressStore;
use crate::store::schema::MasteryStatus;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Scope {
    /// One group, the current one.
    Single,
    /// Groups `0..=through` concatenated in catalog order.
    Merged { through: usize },
}

/// The working set on screen: which words are shown, in what order, and
/// which one (if any) is selected.
#[derive(Clone, Debug)]
pub struct StudySession {
    current_group: usize,
    label: String,
    displayed: Vec<WordRef>,
    scope: Scope,
    selected: Option<usize>,
}

impl StudySession {
    /// First group, catalog order, nothing selected.
    pub fn new(catalog: &WordCatalog) -> Self {
        let mut session = Self {
            current_group: 0,
            label: String::new(),
            displayed: Vec::new(),
            scope: Scope::Single,
            selected: None,
        };
        session.show_group(catalog, 0);
        session
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn current_group(&self) -> usize {
        self.current_group
    }

    pub fn is_mixed(&self) -> bool {
        matches!(self.scope, Scope::Merged { .. })
    }

    pub fn displayed(&self) -> &[WordRef] {
        &self.displayed
    }

    pub fn len(&self) -> usize {
        self.displayed.len()
    }

    pub fn is_empty(&self) -> bool {
        self.displayed.is_empty()
    }

    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    pub fn selected_ref(&self) -> Option<WordRef> {
        self.selected.map(|i| self.displayed[i])
    }

    /// The selected entry together with its home group name.
    pub fn selected_entry<'c>(&self, catalog: &'c WordCatalog) -> Option<(&'c WordEntry, &'c str)> {
        self.selected_ref()
            .map(|r| (catalog.entry(r), catalog.group_name(r.group)))
    }

    pub fn select_group(&mut self, catalog: &WordCatalog, name: &str) -> bool {
        match catalog.group_index(name) {
            Some(index) => {
                self.show_group(catalog, index);
                true
            }
            None => false,
        }
    }

    fn show_group(&mut self, catalog: &WordCatalog, index: usize) {
        self.current_group = index;
        self.label = catalog.group_name(index).to_string();
        self.displayed = catalog.refs_of(index).collect();
        self.scope = Scope::Single;
        self.selected = None;
    }

    pub fn shuffle<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.displayed.shuffle(rng);
        self.selected = None;
    }

    /// Show every group from the first through `name`, in catalog order.
    pub fn merge_up_to(&mut self, catalog: &WordCatalog, name: &str) -> bool {
        let Some(through) = catalog.group_index(name) else {
            return false;
        };
        self.current_group = through;
        self.scope = Scope::Merged { through };
        self.label = format!("Groups 1-{}", through + 1);
        self.displayed = catalog.refs_through(through);
        self.selected = None;
        true
    }

    /// Back to catalog order for whatever is in scope.
    pub fn reset_order(&mut self, catalog: &WordCatalog) {
        self.displayed = match self.scope {
            Scope::Single => catalog.refs_of(self.current_group).collect(),
            Scope::Merged { through } => catalog.refs_through(through),
        };
        self.selected = None;
    }

    pub fn reset_all_progress(&self, catalog: &WordCatalog, progress: &mut ProgressStore) {
        progress.reset_all(catalog);
    }

    pub fn reset_group_progress(
        &self,
        catalog: &WordCatalog,
        progress: &mut ProgressStore,
        group: &str,
    ) {
        progress.reset_group(catalog, group);
    }

    pub fn select(&mut self, index: usize) {
        if index < self.displayed.len() {
            self.selected = Some(index);
        }
    }

    pub fn select_next(&mut self) {
        match self.selected {
            Some(i) => self.select(i + 1),
            None => self.select(0),
        }
    }

    pub fn select_previous(&mut self) {
        if let Some(i) = self.selected
            && i > 0
        {
            self.select(i - 1);
        }
    }

    pub fn mark(&self, catalog: &WordCatalog, progress: &mut ProgressStore, status: MasteryStatus) {
        if let Some((entry, home)) = self.selected_entry(catalog) {
            progress.set(home, &entry.word, status);
        }
    }

    pub fn set_note_for_selected(&self, catalog: &WordCatalog, notes: &mut NotesStore, text: &str) {
        if let Some((entry, home)) = self.selected_entry(catalog) {
            notes.set_note(home, &entry.word, text);
        }
    }
}
