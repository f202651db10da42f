use std::fs;
use std::rc::Rc;

use rand::SeedableRng;
use rand::rngs::SmallRng;
use serde_json::Value;
use tempfile::TempDir;

use wordmem::catalog::WordCatalog;
use wordmem::session::study::StudySession;
use wordmem::store::json_store::JsonStore;
use wordmem::store::notes::NotesStore;
use wordmem::store::progress::ProgressStore;
use wordmem::store::schema::MasteryStatus;
use wordmem::view::StudyView;
use wordmem::view::detail::DetailState;

fn make_store() -> (TempDir, Rc<JsonStore>) {
    let dir = TempDir::new().unwrap();
    let store = JsonStore::with_base_dir(dir.path().to_path_buf()).unwrap();
    (dir, Rc::new(store))
}

fn read_blob(dir: &TempDir, name: &str) -> Value {
    let content = fs::read_to_string(dir.path().join(name)).unwrap();
    serde_json::from_str(&content).unwrap()
}

#[test]
fn marking_a_word_persists_its_status_blob() {
    let catalog = WordCatalog::bundled().unwrap();
    let (dir, store) = make_store();
    let mut progress = ProgressStore::load(&catalog, Some(Rc::clone(&store)));
    let mut session = StudySession::new(&catalog);

    session.select(0);
    session.mark(&catalog, &mut progress, MasteryStatus::Known);

    let blob = read_blob(&dir, "progress.json");
    assert_eq!(blob["Group 1"]["abate"]["status"], "green");
    assert_eq!(blob["Group 1"]["aberrant"]["status"], "white");

    let reloaded = ProgressStore::load(&catalog, Some(store));
    assert_eq!(reloaded.get("Group 1", "abate"), MasteryStatus::Known);
}

#[test]
fn merged_marks_go_to_home_group_and_reset_clears_them() {
    let catalog = WordCatalog::bundled().unwrap();
    let (dir, store) = make_store();
    let mut progress = ProgressStore::load(&catalog, Some(store));
    let mut session = StudySession::new(&catalog);

    assert!(session.merge_up_to(&catalog, "Group 2"));
    assert_eq!(session.label(), "Groups 1-2");
    assert_eq!(session.len(), 16);

    // First word of Group 2 sits right after Group 1's eight words.
    session.select(8);
    session.mark(&catalog, &mut progress, MasteryStatus::Learning);
    let blob = read_blob(&dir, "progress.json");
    assert_eq!(blob["Group 2"]["alacrity"]["status"], "red");
    assert!(blob["Group 1"].get("alacrity").is_none());

    session.reset_all_progress(&catalog, &mut progress);
    let notes = NotesStore::in_memory();
    let view = StudyView::derive(&catalog, &session, &progress, &notes, DetailState::Closed);
    assert_eq!(view.stats.total(), 16);
    assert_eq!(view.stats.new, 16);
    assert_eq!(view.stats.known + view.stats.learning, 0);
}

#[test]
fn notes_survive_reload_and_drive_the_indicator() {
    let catalog = WordCatalog::bundled().unwrap();
    let (dir, store) = make_store();
    let progress = ProgressStore::load(&catalog, Some(Rc::clone(&store)));
    let mut notes = NotesStore::load(Some(Rc::clone(&store)));
    let mut session = StudySession::new(&catalog);

    session.select(1);
    session.set_note_for_selected(&catalog, &mut notes, "sounds like 'a bear rant'");
    assert_eq!(
        read_blob(&dir, "notes.json")["Group 1"]["aberrant"],
        "sounds like 'a bear rant'"
    );

    let notes = NotesStore::load(Some(store));
    let mut detail = DetailState::Closed;
    assert!(detail.open(&session));
    let view = StudyView::derive(&catalog, &session, &progress, &notes, detail);
    assert!(view.cards[1].has_note_indicator);
    assert!(!view.cards[0].has_note_indicator);
    assert_eq!(view.detail.unwrap().note_text, "sounds like 'a bear rant'");
}

#[test]
fn malformed_blobs_load_as_fresh_progress() {
    let catalog = WordCatalog::bundled().unwrap();
    let (dir, store) = make_store();
    fs::write(dir.path().join("progress.json"), "{ not json").unwrap();
    fs::write(dir.path().join("notes.json"), "[1, 2, 3]").unwrap();

    let progress = ProgressStore::load(&catalog, Some(Rc::clone(&store)));
    let notes = NotesStore::load(Some(store));
    assert_eq!(progress.get("Group 1", "abate"), MasteryStatus::New);
    assert_eq!(progress.tally_group(&catalog, "Group 3").new, 8);
    assert_eq!(notes.get_note("Group 1", "abate"), "");
}

#[test]
fn detail_navigation_walks_shuffled_merged_list() {
    let catalog = WordCatalog::bundled().unwrap();
    let progress = ProgressStore::in_memory(&catalog);
    let notes = NotesStore::in_memory();
    let mut session = StudySession::new(&catalog);
    session.merge_up_to(&catalog, "Group 3");
    session.shuffle(&mut SmallRng::seed_from_u64(11));
    assert_eq!(session.len(), 24);

    let mut detail = DetailState::Closed;
    session.select(23);
    detail.open(&session);
    let view = StudyView::derive(&catalog, &session, &progress, &notes, detail);
    let last = view.detail.unwrap();
    assert!(last.can_go_previous);
    assert!(!last.can_go_next);

    detail.navigate_next(&mut session);
    assert_eq!(session.selected(), Some(23));
    detail.navigate_previous(&mut session);
    assert_eq!(session.selected(), Some(22));

    let view = StudyView::derive(&catalog, &session, &progress, &notes, detail);
    let shown = view.detail.unwrap();
    let expected = session.selected_ref().unwrap();
    assert_eq!(shown.word, catalog.entry(expected).word);
    assert_eq!(shown.home_group, catalog.group_name(expected.group));
}

#[test]
fn export_then_import_into_another_directory() {
    let catalog = WordCatalog::bundled().unwrap();
    let (_src_dir, src) = make_store();
    let mut progress = ProgressStore::load(&catalog, Some(Rc::clone(&src)));
    let mut notes = NotesStore::load(Some(Rc::clone(&src)));
    progress.set("Group 4", "banal", MasteryStatus::Known);
    notes.set_note("Group 4", "banal", "clichéd");

    let export = src.export_all();

    let (_dst_dir, dst) = make_store();
    dst.import_all(&export).unwrap();
    assert!(!dst.check_interrupted_import());

    let progress = ProgressStore::load(&catalog, Some(Rc::clone(&dst)));
    let notes = NotesStore::load(Some(dst));
    assert_eq!(progress.get("Group 4", "banal"), MasteryStatus::Known);
    assert_eq!(notes.get_note("Group 4", "banal"), "clichéd");
}

#[test]
fn import_rejects_unknown_version() {
    let (_dir, store) = make_store();
    let mut export = store.export_all();
    export.wordmem_export_version = 99;
    let err = store.import_all(&export).unwrap_err();
    assert!(err.to_string().contains("Unsupported export version"));
}

#[test]
fn custom_catalog_file_keeps_group_order() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("words.json");
    fs::write(
        &path,
        r#"{
            "Week 2": [{"word": "zeal", "definition": "great energy", "example": "", "synonyms": ["fervor", "passion"]}],
            "Week 1": [{"word": "yoke", "definition": "a wooden crosspiece", "example": "", "synonyms": "harness"}]
        }"#,
    )
    .unwrap();

    let catalog = WordCatalog::from_path(&path).unwrap();
    let names: Vec<&str> = catalog.groups().iter().map(|g| g.name.as_str()).collect();
    assert_eq!(names, ["Week 2", "Week 1"]);

    let session = StudySession::new(&catalog);
    assert_eq!(session.label(), "Week 2");
    let zeal = catalog.find("zeal").unwrap();
    assert_eq!(catalog.entry(zeal).synonyms, "fervor, passion");
}
