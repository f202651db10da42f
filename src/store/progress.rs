use std::rc::Rc;

use crate::catalog::WordCatalog;
use crate::store::json_store::JsonStore;
use crate::store::schema::{MasteryStatus, ProgressData, StatusRecord};

/// Counts of each mastery status over some set of words.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct StatusTally {
    pub known: usize,
    pub learning: usize,
    pub new: usize,
}

impl StatusTally {
    pub fn add(&mut self, status: MasteryStatus) {
        match status {
            MasteryStatus::Known => self.known += 1,
            MasteryStatus::Learning => self.learning += 1,
            MasteryStatus::New => self.new += 1,
        }
    }

    pub fn total(&self) -> usize {
        self.known + self.learning + self.new
    }

    pub fn known_ratio(&self) -> f64 {
        match self.total() {
            0 => 0.0,
            total => self.known as f64 / total as f64,
        }
    }
}

/// Per-group, per-word mastery. Every mutation is written through to the
/// backing [`JsonStore`] when one is attached.
pub struct ProgressStore {
    data: ProgressData,
    backend: Option<Rc<JsonStore>>,
}

impl ProgressStore {
    /// Hydrate from the backend and give every catalog word a status.
    pub fn load(catalog: &WordCatalog, backend: Option<Rc<JsonStore>>) -> Self {
        let data = backend
            .as_ref()
            .map(|store| store.load_progress())
            .unwrap_or_default();
        let mut store = Self { data, backend };
        store.initialize(catalog);
        store
    }

    pub fn in_memory(catalog: &WordCatalog) -> Self {
        Self::load(catalog, None)
    }

    fn initialize(&mut self, catalog: &WordCatalog) {
        for group in catalog.groups() {
            let words = self.data.entry(group.name.clone()).or_default();
            for entry in &group.entries {
                words.entry(entry.word.clone()).or_default();
            }
        }
    }

    pub fn get(&self, group: &str, word: &str) -> MasteryStatus {
        self.data
            .get(group)
            .and_then(|words| words.get(word))
            .map(|record| record.status)
            .unwrap_or_default()
    }

    pub fn set(&mut self, group: &str, word: &str, status: MasteryStatus) {
        self.data
            .entry(group.to_string())
            .or_default()
            .insert(word.to_string(), StatusRecord { status });
        self.flush();
    }

    pub fn reset_all(&mut self, catalog: &WordCatalog) {
        for group in catalog.groups() {
            self.reset_words(catalog, &group.name);
        }
        self.flush();
        log::info!("reset progress for all {} groups", catalog.len());
    }

    pub fn reset_group(&mut self, catalog: &WordCatalog, group: &str) {
        if catalog.group(group).is_none() {
            return;
        }
        self.reset_words(catalog, group);
        self.flush();
        log::info!("reset progress for '{group}'");
    }

    fn reset_words(&mut self, catalog: &WordCatalog, group: &str) {
        let Some(catalog_group) = catalog.group(group) else {
            return;
        };
        let words = self.data.entry(group.to_string()).or_default();
        for entry in &catalog_group.entries {
            words.insert(entry.word.clone(), StatusRecord::default());
        }
    }

    /// Status counts over a whole catalog group.
    pub fn tally_group(&self, catalog: &WordCatalog, group: &str) -> StatusTally {
        let mut tally = StatusTally::default();
        if let Some(catalog_group) = catalog.group(group) {
            for entry in &catalog_group.entries {
                tally.add(self.get(group, &entry.word));
            }
        }
        tally
    }

    pub fn data(&self) -> &ProgressData {
        &self.data
    }

    fn flush(&self) {
        if let Some(ref backend) = self.backend
            && let Err(e) = backend.save_progress(&self.data)
        {
            log::warn!("failed to save progress: {e:#}");
        }
    }
}
