use std::fs;
use std::path::Path;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Persisted TUI state plus the "one thing" focus line
/// (written to .state.json)
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct UiState {
    /// Which view is showing ("day", "todos", "stats")
    #[serde(default)]
    pub view: String,
    /// Date the day view was last on
    #[serde(default)]
    pub selected_date: Option<NaiveDate>,
    /// The single free-form focus string shown in the day-view banner
    #[serde(default)]
    pub one_thing: Option<String>,
}

/// Read .state.json from the data directory. Missing or malformed
/// state is simply absent; it is never worth failing over.
pub fn read_ui_state(dir: &Path) -> Option<UiState> {
    let path = dir.join(".state.json");
    let content = fs::read_to_string(&path).ok()?;
    serde_json::from_str(&content).ok()
}

/// Write .state.json to the data directory
pub fn write_ui_state(dir: &Path, state: &UiState) -> Result<(), std::io::Error> {
    let path = dir.join(".state.json");
    let content = serde_json::to_string_pretty(state)?;
    fs::write(path, content)
}
