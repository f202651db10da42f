use std::path::PathBuf;
use std::rc::Rc;
use std::time::{Duration, Instant};

use crossterm::event::KeyEvent;
use rand::SeedableRng;
use rand::rngs::SmallRng;

use crate::catalog::WordCatalog;
use crate::config::Config;
use crate::session::study::StudySession;
use crate::speech::Speaker;
use crate::store::json_store::JsonStore;
use crate::store::notes::NotesStore;
use crate::store::progress::ProgressStore;
use crate::store::schema::MasteryStatus;
use crate::ui::components::group_picker::PickerState;
use crate::ui::line_input::{InputResult, LineInput};
use crate::ui::theme::Theme;
use crate::view::StudyView;
use crate::view::detail::DetailState;

const FLASH_DURATION: Duration = Duration::from_secs(2);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ResetScope {
    AllGroups,
    CurrentGroup,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Overlay {
    None,
    GroupPicker,
    ConfirmReset(ResetScope),
}

/// The note field of the detail view while it has focus. The target word is
/// captured when editing starts, so every keystroke writes to the same note.
pub struct NoteEditor {
    pub input: LineInput,
    group: String,
    word: String,
}

pub struct Flash {
    pub text: String,
    shown_at: Instant,
}

pub struct App {
    pub catalog: WordCatalog,
    pub session: StudySession,
    pub progress: ProgressStore,
    pub notes: NotesStore,
    pub detail: DetailState,
    pub note_editor: Option<NoteEditor>,
    pub overlay: Overlay,
    pub picker: PickerState,
    pub theme: Theme,
    pub config: Config,
    /// Where theme changes are saved; `None` keeps them in memory.
    config_path: Option<PathBuf>,
    pub flash: Option<Flash>,
    pub should_quit: bool,
    speaker: Box<dyn Speaker>,
    rng: SmallRng,
}

impl App {
    pub fn new(
        catalog: WordCatalog,
        config: Config,
        theme: Theme,
        backend: Option<Rc<JsonStore>>,
        speaker: Box<dyn Speaker>,
    ) -> Self {
        let progress = ProgressStore::load(&catalog, backend.clone());
        let notes = NotesStore::load(backend);
        let session = StudySession::new(&catalog);
        log::info!(
            "loaded {} groups ({} words)",
            catalog.len(),
            catalog.word_count()
        );

        Self {
            catalog,
            session,
            progress,
            notes,
            detail: DetailState::Closed,
            note_editor: None,
            overlay: Overlay::None,
            picker: PickerState::default(),
            theme,
            config,
            config_path: None,
            flash: None,
            should_quit: false,
            speaker,
            rng: SmallRng::from_entropy(),
        }
    }

    pub fn with_config_path(mut self, path: PathBuf) -> Self {
        self.config_path = Some(path);
        self
    }

    /// Replace the entropy-seeded RNG, for reproducible shuffles.
    pub fn with_rng(mut self, rng: SmallRng) -> Self {
        self.rng = rng;
        self
    }

    pub fn view(&self) -> StudyView<'_> {
        StudyView::derive(
            &self.catalog,
            &self.session,
            &self.progress,
            &self.notes,
            self.detail,
        )
    }

    pub fn is_editing_note(&self) -> bool {
        self.note_editor.is_some()
    }

    fn show_flash(&mut self, text: String) {
        self.flash = Some(Flash {
            text,
            shown_at: Instant::now(),
        });
    }

    pub fn tick(&mut self) {
        if self
            .flash
            .as_ref()
            .is_some_and(|f| f.shown_at.elapsed() >= FLASH_DURATION)
        {
            self.flash = None;
        }
    }

    // --- groups and ordering ---

    fn leave_word(&mut self) {
        self.note_editor = None;
        self.detail.close();
    }

    pub fn open_group_picker(&mut self) {
        self.picker.selected = self.session.current_group();
        self.overlay = Overlay::GroupPicker;
    }

    pub fn close_overlay(&mut self) {
        self.overlay = Overlay::None;
    }

    pub fn select_group(&mut self, name: &str) {
        if self.session.select_group(&self.catalog, name) {
            self.leave_word();
            self.overlay = Overlay::None;
        }
    }

    pub fn picker_open_selected(&mut self) {
        let name = self.catalog.group_name(self.picker.selected).to_string();
        self.select_group(&name);
    }

    /// Bring every group up to the picker's selection together in order.
    pub fn picker_merge_selected(&mut self) {
        let name = self.catalog.group_name(self.picker.selected).to_string();
        self.merge_up_to(&name);
    }

    /// Bring groups 1 through the current group together in order.
    pub fn bring_groups_together(&mut self) {
        let name = self
            .catalog
            .group_name(self.session.current_group())
            .to_string();
        self.merge_up_to(&name);
    }

    fn merge_up_to(&mut self, name: &str) {
        if self.session.merge_up_to(&self.catalog, name) {
            self.leave_word();
            self.overlay = Overlay::None;
            self.show_flash(format!("Showing {}", self.session.label()));
        }
    }

    pub fn shuffle(&mut self) {
        self.session.shuffle(&mut self.rng);
        self.leave_word();
        self.show_flash("Shuffled".to_string());
    }

    pub fn reset_order(&mut self) {
        self.session.reset_order(&self.catalog);
        self.leave_word();
        self.show_flash("Original order restored".to_string());
    }

    // --- progress resets ---

    pub fn request_reset(&mut self, scope: ResetScope) {
        if self.config.confirm_resets {
            self.overlay = Overlay::ConfirmReset(scope);
        } else {
            self.reset_progress(scope);
        }
    }

    pub fn confirm_reset(&mut self) {
        if let Overlay::ConfirmReset(scope) = self.overlay {
            self.overlay = Overlay::None;
            self.reset_progress(scope);
        }
    }

    pub fn reset_progress(&mut self, scope: ResetScope) {
        match scope {
            ResetScope::AllGroups => {
                self.session
                    .reset_all_progress(&self.catalog, &mut self.progress);
                self.show_flash("All marks cleared".to_string());
            }
            ResetScope::CurrentGroup => {
                let group = self
                    .catalog
                    .group_name(self.session.current_group())
                    .to_string();
                self.session
                    .reset_group_progress(&self.catalog, &mut self.progress, &group);
                self.show_flash(format!("Marks cleared for {group}"));
            }
        }
    }

    // --- selection and the word under it ---

    pub fn select_next(&mut self) {
        if self.detail.is_open() {
            self.detail.navigate_next(&mut self.session);
        } else {
            self.session.select_next();
        }
    }

    pub fn select_previous(&mut self) {
        if self.detail.is_open() {
            self.detail.navigate_previous(&mut self.session);
        } else {
            self.session.select_previous();
        }
    }

    /// A click on an unselected card selects it; on the selected card it
    /// opens the details.
    pub fn click_card(&mut self, index: usize) {
        if self.session.selected() == Some(index) {
            self.show_details();
        } else {
            self.session.select(index);
        }
    }

    pub fn mark(&mut self, status: MasteryStatus) {
        let Some((entry, _)) = self.session.selected_entry(&self.catalog) else {
            return;
        };
        let word = entry.word.clone();
        self.session.mark(&self.catalog, &mut self.progress, status);
        self.show_flash(format!("Marked {word} as {}", status.label()));
    }

    pub fn speak(&mut self) {
        let Some((entry, _)) = self.session.selected_entry(&self.catalog) else {
            return;
        };
        self.speaker.speak(&entry.word);
    }

    pub fn show_details(&mut self) {
        self.detail.open(&self.session);
    }

    pub fn toggle_details(&mut self) {
        self.detail.toggle(&self.session);
        if !self.detail.is_open() {
            self.note_editor = None;
        }
    }

    pub fn close_details(&mut self) {
        self.leave_word();
    }

    // --- notes ---

    pub fn begin_note_edit(&mut self) {
        if !self.detail.is_open() {
            return;
        }
        let Some((entry, home)) = self.session.selected_entry(&self.catalog) else {
            return;
        };
        let current = self.notes.get_note(home, &entry.word);
        self.note_editor = Some(NoteEditor {
            input: LineInput::new(current),
            group: home.to_string(),
            word: entry.word.clone(),
        });
    }

    pub fn handle_note_key(&mut self, key: KeyEvent) {
        let Some(editor) = self.note_editor.as_mut() else {
            return;
        };
        match editor.input.handle(key) {
            InputResult::Changed => {
                self.notes
                    .set_note(&editor.group, &editor.word, editor.input.value());
            }
            InputResult::Submit | InputResult::Cancel => self.note_editor = None,
            InputResult::Continue => {}
        }
    }

    // --- settings ---

    /// Persist only the theme choice. The in-memory config may carry
    /// one-off command line overrides that must not reach the file.
    fn save_theme(&self) {
        let Some(path) = &self.config_path else {
            return;
        };
        let result = Config::load_from(path).and_then(|mut saved| {
            saved.theme = self.config.theme.clone();
            saved.save_to(path)
        });
        if let Err(e) = result {
            log::warn!("failed to save config: {e:#}");
        }
    }

    pub fn cycle_theme(&mut self) {
        let themes = Theme::available_themes();
        let next = match themes.iter().position(|t| *t == self.config.theme) {
            Some(idx) => themes[(idx + 1) % themes.len()].clone(),
            None => match themes.first() {
                Some(first) => first.clone(),
                None => return,
            },
        };
        if let Some(theme) = Theme::load(&next) {
            self.theme = theme;
            self.config.theme = next;
            self.save_theme();
            self.show_flash(format!("Theme: {}", self.config.theme));
        }
    }
}
