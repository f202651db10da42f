use crate::catalog::{WordCatalog, WordRef};
use crate::store::progress::{ProgressStore, StatusTally};

/// Tally statuses over exactly the words on screen, so the summary always
/// agrees with the cards regardless of merge or shuffle.
pub fn compute_stats(
    catalog: &WordCatalog,
    displayed: &[WordRef],
    progress: &ProgressStore,
) -> StatusTally {
    let mut tally = StatusTally::default();
    for word in displayed {
        let entry = catalog.entry(*word);
        tally.add(progress.get(catalog.group_name(word.group), &entry.word));
    }
    tally
}
