use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::category::{Category, CategoryRegistry};

/// Configuration from slate.toml
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub ui: UiConfig,
    /// Custom category registry; when empty the built-in set applies
    #[serde(default)]
    pub categories: Vec<Category>,
}

impl AppConfig {
    pub fn registry(&self) -> CategoryRegistry {
        if self.categories.is_empty() {
            CategoryRegistry::defaults()
        } else {
            CategoryRegistry::from_list(self.categories.clone())
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    /// Terminal rows per hour in the day view. Default: see src/templates/slate.toml
    #[serde(default = "default_hour_height")]
    pub hour_height: u16,
    /// First hour the day view scrolls to. Default: see src/templates/slate.toml
    #[serde(default = "default_day_start")]
    pub day_start: u32,
    #[serde(default)]
    pub show_key_hints: bool,
    /// Hex color overrides per category id (e.g. study = "#42A5F5")
    #[serde(default)]
    pub category_colors: IndexMap<String, String>,
}

impl Default for UiConfig {
    fn default() -> Self {
        UiConfig {
            hour_height: default_hour_height(),
            day_start: default_day_start(),
            show_key_hints: false,
            category_colors: IndexMap::new(),
        }
    }
}

impl UiConfig {
    /// Rows per hour, clamped to the range the day view can render.
    pub fn clamped_hour_height(&self) -> u16 {
        self.hour_height.clamp(1, 6)
    }
}

fn default_hour_height() -> u16 {
    2
}

fn default_day_start() -> u32 {
    6
}
