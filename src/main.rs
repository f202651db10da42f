use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::rc::Rc;
use std::time::Duration;

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use crossterm::event::{
    DisableMouseCapture, EnableMouseCapture, KeyCode, KeyEvent, KeyModifiers, MouseButton,
    MouseEvent, MouseEventKind,
};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Clear, Paragraph, Wrap};

use wordmem::app::{App, Overlay, ResetScope};
use wordmem::catalog::WordCatalog;
use wordmem::config::Config;
use wordmem::event::{AppEvent, EventHandler};
use wordmem::speech::{CommandSpeaker, SilentSpeaker, Speaker};
use wordmem::store::json_store::{JsonStore, default_data_dir};
use wordmem::store::notes::NotesStore;
use wordmem::store::progress::ProgressStore;
use wordmem::store::schema::{ExportData, MasteryStatus};
use wordmem::ui::components::detail_modal::DetailModal;
use wordmem::ui::components::group_picker::{GroupPicker, PickerRow};
use wordmem::ui::components::stats_bar::StatsBar;
use wordmem::ui::components::word_grid::WordGrid;
use wordmem::ui::layout::{AppLayout, CardGrid, centered_rect, contains, pack_hint_lines};
use wordmem::ui::theme::Theme;

const LOG_FILE: &str = "wordmem.log";

#[derive(Parser)]
#[command(name = "wordmem", version, about = "Terminal vocabulary study cards")]
struct Cli {
    #[arg(short, long, global = true, help = "Theme name")]
    theme: Option<String>,

    /// JSON word catalog to study instead of the bundled one
    #[arg(short, long, global = true)]
    catalog: Option<PathBuf>,

    /// Directory holding progress.json and notes.json
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    #[arg(long, help = "Do not pronounce words")]
    mute: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Print known/learning/new counts per group
    Stats {
        /// Only this group
        #[arg(long)]
        group: Option<String>,
    },

    /// Show a word's entry, status and note
    Lookup { word: String },

    /// Write progress and notes to a JSON file
    Export { path: PathBuf },

    /// Replace progress and notes with the contents of an export file
    Import { path: PathBuf },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let data_dir = cli.data_dir.clone().unwrap_or_else(default_data_dir);

    let mut config = Config::load().unwrap_or_else(|e| {
        eprintln!("Ignoring unreadable config: {e:#}");
        Config::default()
    });
    if let Some(theme) = &cli.theme {
        config.theme = theme.clone();
    }
    let catalog_path = cli
        .catalog
        .clone()
        .or_else(|| config.catalog_path.as_ref().map(PathBuf::from));

    match cli.command {
        Some(command) => {
            init_logging(None);
            run_command(command, catalog_path.as_deref(), &data_dir)
        }
        None => {
            init_logging(Some(&data_dir));
            config.validate(&Theme::available_themes());
            run_tui(config, catalog_path.as_deref(), &data_dir, cli.mute)
        }
    }
}

/// Log to a file in the data directory while the TUI owns the terminal,
/// otherwise to stderr.
fn init_logging(log_dir: Option<&Path>) {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));
    if let Some(dir) = log_dir {
        let file = fs::create_dir_all(dir).and_then(|_| {
            fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(dir.join(LOG_FILE))
        });
        match file {
            Ok(file) => {
                builder.target(env_logger::Target::Pipe(Box::new(file)));
            }
            // Nowhere to write without corrupting the screen.
            Err(_) => {
                builder.filter_level(log::LevelFilter::Off);
            }
        }
    }
    builder.init();
}

fn load_catalog(path: Option<&Path>) -> Result<WordCatalog> {
    let catalog = match path {
        Some(path) => {
            log::info!("loading catalog from {}", path.display());
            WordCatalog::from_path(path)?
        }
        None => WordCatalog::bundled()?,
    };
    Ok(catalog)
}

fn run_command(command: Command, catalog_path: Option<&Path>, data_dir: &Path) -> Result<()> {
    let store = JsonStore::with_base_dir(data_dir.to_path_buf())
        .with_context(|| format!("cannot use data directory {}", data_dir.display()))?;

    match command {
        Command::Stats { group } => {
            let catalog = load_catalog(catalog_path)?;
            let progress = ProgressStore::load(&catalog, Some(Rc::new(store)));
            let names: Vec<&str> = match &group {
                Some(name) => {
                    if catalog.group(name).is_none() {
                        bail!("No group named {name:?}");
                    }
                    vec![name.as_str()]
                }
                None => catalog.groups().iter().map(|g| g.name.as_str()).collect(),
            };
            for name in names {
                let tally = progress.tally_group(&catalog, name);
                println!(
                    "{name}: {} known, {} learning, {} new ({:.0}% known)",
                    tally.known,
                    tally.learning,
                    tally.new,
                    tally.known_ratio() * 100.0
                );
            }
        }
        Command::Lookup { word } => {
            let catalog = load_catalog(catalog_path)?;
            let Some(word_ref) = catalog.find(&word) else {
                bail!("{word:?} is not in the catalog");
            };
            let store = Rc::new(store);
            let progress = ProgressStore::load(&catalog, Some(Rc::clone(&store)));
            let notes = NotesStore::load(Some(store));
            let entry = catalog.entry(word_ref);
            let home = catalog.group_name(word_ref.group);

            println!("{} ({home})", entry.word);
            println!("  status:     {}", progress.get(home, &entry.word).label());
            println!("  definition: {}", entry.definition);
            println!("  example:    {}", entry.example);
            println!("  synonyms:   {}", entry.synonyms);
            let note = notes.get_note(home, &entry.word);
            if !note.trim().is_empty() {
                println!("  note:       {note}");
            }
        }
        Command::Export { path } => {
            let data = store.export_all();
            let json = serde_json::to_string_pretty(&data)?;
            fs::write(&path, json)
                .with_context(|| format!("cannot write {}", path.display()))?;
            log::info!("exported progress and notes to {}", path.display());
            println!("Exported to {}", path.display());
        }
        Command::Import { path } => {
            let content = fs::read_to_string(&path)
                .with_context(|| format!("cannot read {}", path.display()))?;
            let data: ExportData = serde_json::from_str(&content)
                .with_context(|| format!("{} is not a wordmem export", path.display()))?;
            store.import_all(&data)?;
            println!("Imported from {}", path.display());
        }
    }
    Ok(())
}

fn run_tui(config: Config, catalog_path: Option<&Path>, data_dir: &Path, mute: bool) -> Result<()> {
    let catalog = load_catalog(catalog_path)?;

    let backend = match JsonStore::with_base_dir(data_dir.to_path_buf()) {
        Ok(store) => {
            if store.check_interrupted_import() {
                log::warn!("removed backups left by an interrupted import");
            }
            Some(Rc::new(store))
        }
        Err(e) => {
            log::warn!("progress will not be saved: {e:#}");
            None
        }
    };

    let theme = Theme::load(&config.theme).unwrap_or_default();
    let speaker: Box<dyn Speaker> = if mute {
        Box::new(SilentSpeaker)
    } else {
        Box::new(CommandSpeaker::new(&config.speech_command, &config.speech_args))
    };
    let mut app = App::new(catalog, config, theme, backend, speaker)
        .with_config_path(Config::config_path());

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let events = EventHandler::new(Duration::from_millis(250));

    let result = run_app(&mut terminal, &mut app, &events);

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = result {
        log::error!("{err:?}");
        eprintln!("Error: {err:?}");
    }
    log::info!("session ended");

    Ok(())
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    events: &EventHandler,
) -> Result<()> {
    loop {
        terminal.draw(|frame| render(frame, app))?;

        match events.next()? {
            AppEvent::Key(key) => handle_key(app, key),
            AppEvent::Mouse(mouse) => {
                let size = terminal.size()?;
                handle_mouse(app, mouse, Rect::new(0, 0, size.width, size.height));
            }
            AppEvent::Tick => app.tick(),
            AppEvent::Resize => {}
        }

        if app.should_quit {
            return Ok(());
        }
    }
}

fn handle_key(app: &mut App, key: KeyEvent) {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        app.should_quit = true;
        return;
    }

    if app.is_editing_note() {
        app.handle_note_key(key);
        return;
    }

    match app.overlay {
        Overlay::GroupPicker => handle_picker_key(app, key),
        Overlay::ConfirmReset(_) => handle_confirm_key(app, key),
        Overlay::None => handle_study_key(app, key),
    }
}

fn handle_study_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('q') => app.should_quit = true,
        KeyCode::Left | KeyCode::Char('h') => app.select_previous(),
        KeyCode::Right | KeyCode::Char('l') => app.select_next(),
        KeyCode::Char('g') => app.mark(MasteryStatus::Known),
        KeyCode::Char('r') => app.mark(MasteryStatus::Learning),
        KeyCode::Char('w') => app.mark(MasteryStatus::New),
        KeyCode::Char('s') => app.speak(),
        KeyCode::Char('d') => app.toggle_details(),
        KeyCode::Enter => app.show_details(),
        KeyCode::Esc => app.close_details(),
        KeyCode::Char('e') => app.begin_note_edit(),
        KeyCode::Char('o') => app.open_group_picker(),
        KeyCode::Char('f') => app.shuffle(),
        KeyCode::Char('m') => app.bring_groups_together(),
        KeyCode::Char('u') => app.reset_order(),
        KeyCode::Char('C') => app.request_reset(ResetScope::CurrentGroup),
        KeyCode::Char('X') => app.request_reset(ResetScope::AllGroups),
        KeyCode::Char('t') => app.cycle_theme(),
        _ => {}
    }
}

fn handle_picker_key(app: &mut App, key: KeyEvent) {
    let len = app.catalog.len();
    match key.code {
        KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('o') => app.close_overlay(),
        KeyCode::Up | KeyCode::Char('k') => app.picker.prev(len),
        KeyCode::Down | KeyCode::Char('j') => app.picker.next(len),
        KeyCode::Enter => app.picker_open_selected(),
        KeyCode::Char('m') => app.picker_merge_selected(),
        _ => {}
    }
}

fn handle_confirm_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('y') | KeyCode::Char('Y') => app.confirm_reset(),
        KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => app.close_overlay(),
        _ => {}
    }
}

fn handle_mouse(app: &mut App, mouse: MouseEvent, area: Rect) {
    if mouse.kind != MouseEventKind::Down(MouseButton::Left) {
        return;
    }
    if app.overlay != Overlay::None {
        return;
    }
    let (column, row) = (mouse.column, mouse.row);

    if app.detail.is_open() {
        if !contains(detail_area(area), column, row) {
            app.close_details();
        }
        return;
    }

    let layout = AppLayout::new(area);
    let grid = CardGrid::new(
        layout.main,
        app.session.len(),
        app.config.card_width,
        app.session.selected(),
    );
    if let Some(index) = grid.hit(column, row) {
        app.click_card(index);
    }
}

fn detail_area(area: Rect) -> Rect {
    centered_rect(60, 70, area)
}

fn render(frame: &mut ratatui::Frame, app: &App) {
    let area = frame.area();
    let colors = &app.theme.colors;
    let view = app.view();

    let bg = Block::default().style(Style::default().bg(colors.bg()));
    frame.render_widget(bg, area);

    let layout = AppLayout::new(area);

    let mut header_spans = vec![
        Span::styled(
            " wordmem ",
            Style::default()
                .fg(colors.header_fg())
                .bg(colors.header_bg())
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!(" {} ", view.label),
            Style::default()
                .fg(colors.accent())
                .bg(colors.header_bg())
                .add_modifier(Modifier::BOLD),
        ),
    ];
    if view.mixed {
        header_spans.push(Span::styled(
            "(mixed) ",
            Style::default().fg(colors.text_dim()).bg(colors.header_bg()),
        ));
    }
    let header =
        Paragraph::new(Line::from(header_spans)).style(Style::default().bg(colors.header_bg()));
    frame.render_widget(header, layout.header);

    frame.render_widget(StatsBar::new(view.stats, &app.theme), layout.stats);

    let grid = CardGrid::new(
        layout.main,
        view.cards.len(),
        app.config.card_width,
        view.selected,
    );
    frame.render_widget(WordGrid::new(&view.cards, &grid, &app.theme), layout.main);

    render_footer(frame, app, layout.footer);

    if let Some(detail) = &view.detail {
        let status = app
            .session
            .selected_ref()
            .map(|r| {
                app.progress
                    .get(app.catalog.group_name(r.group), &app.catalog.entry(r).word)
            })
            .unwrap_or_default();
        let note_input = app.note_editor.as_ref().map(|editor| &editor.input);
        frame.render_widget(
            DetailModal::new(detail, status, note_input, &app.theme),
            detail_area(area),
        );
    }

    match app.overlay {
        Overlay::GroupPicker => render_group_picker(frame, app, area),
        Overlay::ConfirmReset(scope) => render_confirm(frame, app, scope, area),
        Overlay::None => {}
    }
}

fn render_footer(frame: &mut ratatui::Frame, app: &App, area: Rect) {
    let colors = &app.theme.colors;

    if let Some(flash) = &app.flash {
        let line = Line::from(Span::styled(
            format!(" {}", flash.text),
            Style::default().fg(colors.accent()),
        ));
        frame.render_widget(Paragraph::new(line), area);
        return;
    }

    let hints: &[&str] = if app.is_editing_note() {
        &["typing a note", "[Enter/Esc] done"]
    } else if app.detail.is_open() {
        &[
            "[\u{2190}/\u{2192}] prev/next",
            "[g/r/w] known/learning/new",
            "[s] speak",
            "[e] edit note",
            "[Esc] close",
        ]
    } else {
        &[
            "[\u{2190}/\u{2192}] select",
            "[Enter] details",
            "[g/r/w] known/learning/new",
            "[s] speak",
            "[o] groups",
            "[f] shuffle",
            "[m] bring together",
            "[u] reset order",
            "[C/X] clear marks",
            "[t] theme",
            "[q] quit",
        ]
    };
    let lines: Vec<Line> = pack_hint_lines(hints, area.width as usize)
        .into_iter()
        .map(|l| Line::from(Span::styled(l, Style::default().fg(colors.text_dim()))))
        .collect();
    frame.render_widget(Paragraph::new(lines), area);
}

fn render_group_picker(frame: &mut ratatui::Frame, app: &App, area: Rect) {
    let rows = app
        .catalog
        .groups()
        .iter()
        .map(|group| PickerRow {
            name: &group.name,
            tally: app.progress.tally_group(&app.catalog, &group.name),
        })
        .collect();
    let picker = GroupPicker {
        rows,
        state: app.picker,
        current: app.session.current_group(),
        theme: &app.theme,
    };
    frame.render_widget(&picker, centered_rect(50, 70, area));
}

fn render_confirm(frame: &mut ratatui::Frame, app: &App, scope: ResetScope, area: Rect) {
    let colors = &app.theme.colors;
    let question = match scope {
        ResetScope::AllGroups => "Clear the marks on every word in every group?".to_string(),
        ResetScope::CurrentGroup => format!(
            "Clear the marks on every word in {}?",
            app.catalog.group_name(app.session.current_group())
        ),
    };

    let dialog = centered_rect(40, 20, area);
    frame.render_widget(Clear, dialog);
    let block = Block::bordered()
        .title(" Reset progress ")
        .border_style(Style::default().fg(colors.warning()))
        .style(Style::default().bg(colors.bg()));
    let text = vec![
        Line::from(""),
        Line::from(Span::styled(question, Style::default().fg(colors.fg()))),
        Line::from(""),
        Line::from(Span::styled(
            "[y] yes  [n] no",
            Style::default().fg(colors.text_dim()),
        )),
    ];
    frame.render_widget(
        Paragraph::new(text).block(block).wrap(Wrap { trim: true }),
        dialog,
    );
}
