use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::model::{AppConfig, CategoryRegistry, Schedule, TodoList};

/// Name of the data directory a workspace lives in
pub const DATA_DIR: &str = "slate";

const CONFIG_FILE: &str = "slate.toml";
const SCHEDULE_FILE: &str = "schedule.json";
const TODOS_FILE: &str = "todos.json";

const CONFIG_TEMPLATE: &str = include_str!("../templates/slate.toml");

/// Error type for workspace loading and saving
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("no slate/ directory found here or in any parent (run `slt init`)")]
    NotFound,
    #[error("slate/ already exists at {0} (use --force to reinitialize)")]
    AlreadyExists(PathBuf),
    #[error("could not parse {path}: {message}")]
    Parse { path: PathBuf, message: String },
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Everything the CLI and TUI operate on, loaded from one workspace.
#[derive(Debug)]
pub struct Store {
    /// Directory the slate/ data directory sits in
    pub root: PathBuf,
    /// The slate/ data directory itself
    pub dir: PathBuf,
    pub config: AppConfig,
    pub schedule: Schedule,
    pub todos: TodoList,
}

impl Store {
    pub fn registry(&self) -> CategoryRegistry {
        self.config.registry()
    }

    pub fn save_schedule(&self) -> Result<(), StoreError> {
        write_json(&self.dir.join(SCHEDULE_FILE), &self.schedule)
    }

    pub fn save_todos(&self) -> Result<(), StoreError> {
        write_json(&self.dir.join(TODOS_FILE), &self.todos)
    }
}

/// Walk up from `start` looking for a slate/ data directory.
pub fn discover_dir(start: &Path) -> Result<PathBuf, StoreError> {
    let mut current = Some(start);
    while let Some(dir) = current {
        let candidate = dir.join(DATA_DIR);
        if candidate.join(CONFIG_FILE).is_file() {
            return Ok(candidate);
        }
        current = dir.parent();
    }
    Err(StoreError::NotFound)
}

/// Discover and load the workspace containing `start`.
pub fn load(start: &Path) -> Result<Store, StoreError> {
    let dir = discover_dir(start)?;
    let root = dir
        .parent()
        .map(Path::to_path_buf)
        .unwrap_or_else(|| dir.clone());

    let config = read_config(&dir)?;
    let schedule: Schedule = read_json(&dir.join(SCHEDULE_FILE))?;
    let todos: TodoList = read_json(&dir.join(TODOS_FILE))?;

    Ok(Store {
        root,
        dir,
        config,
        schedule,
        todos,
    })
}

/// Create a fresh slate/ directory under `root`. Refuses to touch an
/// existing workspace unless `force` is set.
pub fn init_dir(root: &Path, force: bool) -> Result<PathBuf, StoreError> {
    let dir = root.join(DATA_DIR);
    if dir.join(CONFIG_FILE).is_file() && !force {
        return Err(StoreError::AlreadyExists(dir));
    }
    fs::create_dir_all(&dir)?;
    fs::write(dir.join(CONFIG_FILE), CONFIG_TEMPLATE)?;
    write_json(&dir.join(SCHEDULE_FILE), &Schedule::default())?;
    write_json(&dir.join(TODOS_FILE), &TodoList::default())?;
    Ok(dir)
}

fn read_config(dir: &Path) -> Result<AppConfig, StoreError> {
    let path = dir.join(CONFIG_FILE);
    let content = match fs::read_to_string(&path) {
        Ok(c) => c,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(AppConfig::default()),
        Err(e) => return Err(e.into()),
    };
    toml::from_str(&content).map_err(|e| StoreError::Parse {
        path,
        message: e.to_string(),
    })
}

/// Read a JSON data file; a missing file is an empty default.
fn read_json<T: DeserializeOwned + Default>(path: &Path) -> Result<T, StoreError> {
    let content = match fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(T::default()),
        Err(e) => return Err(e.into()),
    };
    serde_json::from_str(&content).map_err(|e| StoreError::Parse {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}

fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<(), StoreError> {
    let content = serde_json::to_string_pretty(value).expect("data models serialize");
    write_atomic(path, &content)?;
    Ok(())
}

/// Write via a temp file in the same directory, then rename into place,
/// so a reader never sees a half-written file.
pub(crate) fn write_atomic(path: &Path, content: &str) -> Result<(), std::io::Error> {
    let dir = path.parent().unwrap_or_else(|| Path::new("."));
    let mut tmp = tempfile::NamedTempFile::new_in(dir)?;
    tmp.write_all(content.as_bytes())?;
    tmp.persist(path).map_err(|e| e.error)?;
    Ok(())
}
