use criterion::{Criterion, black_box, criterion_group, criterion_main};
use rand::SeedableRng;
use rand::rngs::SmallRng;

use wordmem::catalog::{Group, WordCatalog, WordEntry};
use wordmem::session::study::StudySession;
use wordmem::store::notes::NotesStore;
use wordmem::store::progress::ProgressStore;
use wordmem::store::schema::MasteryStatus;
use wordmem::view::StudyView;
use wordmem::view::detail::DetailState;

fn make_catalog(groups: usize, words_per_group: usize) -> WordCatalog {
    let groups = (0..groups)
        .map(|g| Group {
            name: format!("Group {}", g + 1),
            entries: (0..words_per_group)
                .map(|w| WordEntry {
                    word: format!("word{g}x{w}"),
                    definition: "a definition long enough to look like a real one".to_string(),
                    example: "an example sentence".to_string(),
                    synonyms: "one, two, three".to_string(),
                })
                .collect(),
        })
        .collect();
    WordCatalog::new(groups).expect("synthetic catalog is valid")
}

fn bench_derive(c: &mut Criterion) {
    let catalog = make_catalog(40, 50);
    let mut progress = ProgressStore::in_memory(&catalog);
    let mut notes = NotesStore::in_memory();
    let mut session = StudySession::new(&catalog);
    session.merge_up_to(&catalog, "Group 40");
    session.shuffle(&mut SmallRng::seed_from_u64(7));

    for i in (0..session.len()).step_by(3) {
        session.select(i);
        session.mark(&catalog, &mut progress, MasteryStatus::Known);
        if i % 9 == 0 {
            session.set_note_for_selected(&catalog, &mut notes, "remember this");
        }
    }
    session.select(1000);

    c.bench_function("StudyView::derive (2000 merged words)", |b| {
        b.iter(|| {
            StudyView::derive(
                black_box(&catalog),
                black_box(&session),
                &progress,
                &notes,
                DetailState::Open,
            )
        })
    });
}

fn bench_merge_and_shuffle(c: &mut Criterion) {
    let catalog = make_catalog(40, 50);
    let mut rng = SmallRng::seed_from_u64(7);

    c.bench_function("merge 40 groups + shuffle", |b| {
        b.iter(|| {
            let mut session = StudySession::new(&catalog);
            session.merge_up_to(&catalog, black_box("Group 40"));
            session.shuffle(&mut rng);
            session
        })
    });
}

criterion_group!(benches, bench_derive, bench_merge_and_shuffle);
criterion_main!(benches);
