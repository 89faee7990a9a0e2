use std::io;
use std::time::Duration;

use chrono::{Days, NaiveDate};
use crossterm::event::{self, Event, KeyEventKind};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::{Backend, CrosstermBackend};

use crate::io::lock::FileLock;
use crate::io::state::{self, UiState};
use crate::io::store::{self, Store};
use crate::io::watcher::DataWatcher;
use crate::model::{CategoryRegistry, TimeBlock};
use crate::ops::{schedule_ops, todo_ops};

use super::input;
use super::render;
use super::theme::Theme;

/// Which view is currently displayed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Day,
    Todos,
    Stats,
}

impl View {
    pub fn as_str(self) -> &'static str {
        match self {
            View::Day => "day",
            View::Todos => "todos",
            View::Stats => "stats",
        }
    }

    fn parse(s: &str) -> Option<View> {
        match s {
            "day" => Some(View::Day),
            "todos" => Some(View::Todos),
            "stats" => Some(View::Stats),
            _ => None,
        }
    }
}

/// Main application state
pub struct App {
    pub store: Store,
    pub registry: CategoryRegistry,
    pub theme: Theme,
    pub view: View,
    pub selected_date: NaiveDate,
    /// Index into the day view's sorted block list
    pub selected_block: usize,
    /// Index into the todo view's flattened item list
    pub todo_cursor: usize,
    /// Rows per hour in the day view (zoomable)
    pub hour_height: u16,
    /// First grid row shown in the day view
    pub scroll_row: u16,
    pub show_key_hints: bool,
    pub one_thing: Option<String>,
    /// Transient message for the status row
    pub status: Option<String>,
    pub should_quit: bool,
}

impl App {
    pub fn new(store: Store, saved: Option<UiState>) -> Self {
        let registry = store.registry();
        let theme = Theme::from_config(&store.config.ui);
        let hour_height = store.config.ui.clamped_hour_height();
        let scroll_row = store.config.ui.day_start as u16 * hour_height;
        let show_key_hints = store.config.ui.show_key_hints;

        let saved = saved.unwrap_or_default();
        let view = View::parse(&saved.view).unwrap_or(View::Day);
        let selected_date = saved
            .selected_date
            .unwrap_or_else(|| chrono::Local::now().date_naive());

        App {
            store,
            registry,
            theme,
            view,
            selected_date,
            selected_block: 0,
            todo_cursor: 0,
            hour_height,
            scroll_row,
            show_key_hints,
            one_thing: saved.one_thing,
            status: None,
            should_quit: false,
        }
    }

    /// The selected day's blocks in display order, so j/k walks blocks
    /// the way they read on screen.
    pub fn day_blocks(&self) -> Vec<TimeBlock> {
        let mut blocks = schedule_ops::blocks_for_date(&self.store.schedule, self.selected_date);
        schedule_ops::sort_blocks(&mut blocks);
        blocks
    }

    /// Todo ids in the order the todo view lists them.
    pub fn flat_todo_ids(&self) -> Vec<String> {
        todo_ops::grouped_by_category(&self.store.todos, &self.registry)
            .into_iter()
            .flat_map(|(_, items)| items.into_iter().map(|t| t.id.clone()))
            .collect()
    }

    pub fn next_view(&mut self) {
        self.view = match self.view {
            View::Day => View::Todos,
            View::Todos => View::Stats,
            View::Stats => View::Day,
        };
    }

    pub fn go_today(&mut self) {
        self.selected_date = chrono::Local::now().date_naive();
        self.selected_block = 0;
    }

    pub fn prev_day(&mut self) {
        self.selected_date = self.selected_date - Days::new(1);
        self.selected_block = 0;
    }

    pub fn next_day(&mut self) {
        self.selected_date = self.selected_date + Days::new(1);
        self.selected_block = 0;
    }

    pub fn select_next_block(&mut self) {
        let count = self.day_blocks().len();
        if count > 0 {
            self.selected_block = (self.selected_block + 1) % count;
        }
    }

    pub fn select_prev_block(&mut self) {
        let count = self.day_blocks().len();
        if count > 0 {
            self.selected_block = (self.selected_block + count - 1) % count;
        }
    }

    pub fn zoom_in(&mut self) {
        self.set_hour_height(self.hour_height + 1);
    }

    pub fn zoom_out(&mut self) {
        self.set_hour_height(self.hour_height.saturating_sub(1));
    }

    fn set_hour_height(&mut self, new: u16) {
        let new = new.clamp(1, 6);
        if new != self.hour_height {
            // Keep the same hour at the top of the view
            self.scroll_row = self.scroll_row / self.hour_height * new;
            self.hour_height = new;
        }
    }

    /// Toggle the todo under the cursor, writing through the same lock
    /// the CLI uses.
    pub fn toggle_selected_todo(&mut self) {
        let ids = self.flat_todo_ids();
        if ids.is_empty() {
            return;
        }
        let id = ids[self.todo_cursor.min(ids.len() - 1)].clone();

        let result = FileLock::acquire_default(&self.store.dir)
            .map_err(|e| e.to_string())
            .and_then(|_lock| {
                todo_ops::toggle_todo(&mut self.store.todos, &id).map_err(|e| e.to_string())?;
                self.store.save_todos().map_err(|e| e.to_string())
            });
        match result {
            Ok(()) => {
                let done = self
                    .store
                    .todos
                    .items
                    .iter()
                    .find(|t| t.id == id)
                    .is_some_and(|t| t.done);
                self.status = Some(format!("{} {}", id, if done { "done" } else { "reopened" }));
            }
            Err(e) => self.status = Some(format!("error: {}", e)),
        }
    }

    /// Re-read the workspace from disk (watcher tick or `r`), keeping
    /// navigation state. A failed reload keeps the last good data.
    pub fn reload(&mut self) {
        match store::load(&self.store.root) {
            Ok(store) => {
                self.registry = store.registry();
                self.theme = Theme::from_config(&store.config.ui);
                self.store = store;
                let count = self.day_blocks().len();
                if self.selected_block >= count && count > 0 {
                    self.selected_block = count - 1;
                }
                self.status = Some("reloaded".into());
            }
            Err(e) => self.status = Some(format!("reload failed: {}", e)),
        }
    }

    pub fn save_state(&self) {
        let ui_state = UiState {
            view: self.view.as_str().to_string(),
            selected_date: Some(self.selected_date),
            one_thing: self.one_thing.clone(),
        };
        let _ = state::write_ui_state(&self.store.dir, &ui_state);
    }
}

/// Launch the TUI against the workspace containing `dir` (or the CWD).
pub fn run(dir: Option<&str>) -> Result<(), Box<dyn std::error::Error>> {
    let start = match dir {
        Some(d) => std::fs::canonicalize(d)?,
        None => std::env::current_dir()?,
    };
    let store = store::load(&start)?;
    let saved = state::read_ui_state(&store.dir);
    let watcher = DataWatcher::start(&store.dir).ok();

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(store, saved);
    let result = event_loop(&mut terminal, &mut app, watcher.as_ref());

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    app.save_state();
    result
}

fn event_loop<B: Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    watcher: Option<&DataWatcher>,
) -> Result<(), Box<dyn std::error::Error>> {
    loop {
        terminal.draw(|frame| render::draw(frame, app))?;
        if app.should_quit {
            return Ok(());
        }

        if event::poll(Duration::from_millis(100))? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    input::handle_key(app, key);
                }
                _ => {}
            }
        }

        if let Some(w) = watcher
            && !w.poll().is_empty()
        {
            app.reload();
        }
    }
}
