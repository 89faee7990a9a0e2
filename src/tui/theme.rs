use std::collections::HashMap;

use ratatui::style::Color;

use crate::model::UiConfig;

/// Parsed color theme for the TUI
#[derive(Debug, Clone)]
pub struct Theme {
    pub text: Color,
    pub text_bright: Color,
    pub dim: Color,
    pub highlight: Color,
    pub selection_bg: Color,
    /// Label text painted on top of category-colored blocks
    pub block_text: Color,
    pub done: Color,
    /// Per-category block colors
    pub category_colors: HashMap<String, Color>,
}

impl Default for Theme {
    fn default() -> Self {
        let mut category_colors = HashMap::new();
        category_colors.insert("sleep".into(), Color::Rgb(0x5C, 0x6B, 0xC0));
        category_colors.insert("meal".into(), Color::Rgb(0xFF, 0xB3, 0x00));
        category_colors.insert("exercise".into(), Color::Rgb(0xEF, 0x53, 0x50));
        category_colors.insert("work".into(), Color::Rgb(0x8D, 0x6E, 0x63));
        category_colors.insert("reading".into(), Color::Rgb(0xAB, 0x47, 0xBC));
        category_colors.insert("study".into(), Color::Rgb(0x42, 0xA5, 0xF5));
        category_colors.insert("housework".into(), Color::Rgb(0x26, 0xA6, 0x9A));
        category_colors.insert("rest".into(), Color::Rgb(0x66, 0xBB, 0x6A));
        category_colors.insert("waste".into(), Color::Rgb(0x75, 0x75, 0x75));
        category_colors.insert("commute".into(), Color::Rgb(0x78, 0x90, 0x9C));
        category_colors.insert("social".into(), Color::Rgb(0xEC, 0x40, 0x7A));
        category_colors.insert("routine".into(), Color::Rgb(0x9C, 0xCC, 0x65));

        Theme {
            text: Color::Rgb(0xC8, 0xC8, 0xD8),
            text_bright: Color::Rgb(0xFF, 0xFF, 0xFF),
            dim: Color::Rgb(0x70, 0x70, 0x88),
            highlight: Color::Rgb(0xFF, 0xA7, 0x26),
            selection_bg: Color::Rgb(0x38, 0x38, 0x50),
            block_text: Color::Rgb(0x10, 0x10, 0x18),
            done: Color::Rgb(0x60, 0x60, 0x70),
            category_colors,
        }
    }
}

/// Parse a hex color string like "#42A5F5" into an RGB Color
fn parse_hex_color(hex: &str) -> Option<Color> {
    let hex = hex.strip_prefix('#')?;
    if hex.len() != 6 {
        return None;
    }
    let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
    let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
    let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
    Some(Color::Rgb(r, g, b))
}

impl Theme {
    /// Create a theme from workspace UI config, falling back to defaults
    pub fn from_config(ui: &UiConfig) -> Self {
        let mut theme = Theme::default();
        for (category, value) in &ui.category_colors {
            if let Some(color) = parse_hex_color(value) {
                theme.category_colors.insert(category.clone(), color);
            }
        }
        theme
    }

    /// Block color for a category, falling back to dim for categories
    /// without a configured color
    pub fn category_color(&self, category_id: &str) -> Color {
        self.category_colors
            .get(category_id)
            .copied()
            .unwrap_or(self.dim)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use indexmap::IndexMap;

    #[test]
    fn hex_parsing() {
        assert_eq!(parse_hex_color("#FF0000"), Some(Color::Rgb(255, 0, 0)));
        assert_eq!(parse_hex_color("#42a5f5"), Some(Color::Rgb(0x42, 0xA5, 0xF5)));
        assert_eq!(parse_hex_color("FF0000"), None);
        assert_eq!(parse_hex_color("#FFF"), None);
        assert_eq!(parse_hex_color("#GGGGGG"), None);
    }

    #[test]
    fn config_overrides_category_color() {
        let mut category_colors = IndexMap::new();
        category_colors.insert("study".to_string(), "#112233".to_string());
        category_colors.insert("bogus".to_string(), "nope".to_string());
        let ui = UiConfig {
            category_colors,
            ..UiConfig::default()
        };
        let theme = Theme::from_config(&ui);
        assert_eq!(theme.category_color("study"), Color::Rgb(0x11, 0x22, 0x33));
        // Unparseable override leaves the default alone
        assert_eq!(theme.category_color("sleep"), Color::Rgb(0x5C, 0x6B, 0xC0));
    }

    #[test]
    fn unknown_category_gets_dim() {
        let theme = Theme::default();
        assert_eq!(theme.category_color("mystery"), theme.dim);
    }
}
