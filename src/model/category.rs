use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// An activity category a time block or to-do belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: String,
    pub name: String,
    pub icon: String,
}

impl Category {
    fn new(id: &str, name: &str, icon: &str) -> Self {
        Category {
            id: id.to_string(),
            name: name.to_string(),
            icon: icon.to_string(),
        }
    }
}

/// Insertion-ordered category registry, so listings and stats rows come
/// out in a stable, user-chosen order.
#[derive(Debug, Clone, Default)]
pub struct CategoryRegistry {
    map: IndexMap<String, Category>,
}

impl CategoryRegistry {
    pub fn from_list(categories: Vec<Category>) -> Self {
        let mut map = IndexMap::new();
        for c in categories {
            map.insert(c.id.clone(), c);
        }
        CategoryRegistry { map }
    }

    /// The built-in registry used when `slate.toml` defines no
    /// `[[categories]]` of its own.
    pub fn defaults() -> Self {
        CategoryRegistry::from_list(vec![
            Category::new("sleep", "Sleep", "😴"),
            Category::new("meal", "Meals", "🍚"),
            Category::new("exercise", "Exercise", "🏃"),
            Category::new("work", "Work", "⚒️"),
            Category::new("reading", "Reading", "📚"),
            Category::new("study", "Study", "✏️"),
            Category::new("housework", "Chores", "🧹"),
            Category::new("rest", "Rest", "🧘"),
            Category::new("waste", "Wasted", "🗑️"),
            Category::new("commute", "Commute", "🚌"),
            Category::new("social", "Social", "👥"),
            Category::new("routine", "Routine", "✓"),
        ])
    }

    pub fn get(&self, id: &str) -> Option<&Category> {
        self.map.get(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.map.contains_key(id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Category> {
        self.map.values()
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Display name for an id, falling back to the id itself for blocks
    /// whose category has since been removed from the registry.
    pub fn name_of<'a>(&'a self, id: &'a str) -> &'a str {
        self.get(id).map(|c| c.name.as_str()).unwrap_or(id)
    }

    pub fn icon_of(&self, id: &str) -> &str {
        self.get(id).map(|c| c.icon.as_str()).unwrap_or("")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_cover_the_standard_set() {
        let reg = CategoryRegistry::defaults();
        assert_eq!(reg.len(), 12);
        assert!(reg.contains("sleep"));
        assert!(reg.contains("routine"));
        assert_eq!(reg.get("study").unwrap().name, "Study");
    }

    #[test]
    fn iteration_preserves_insertion_order() {
        let reg = CategoryRegistry::from_list(vec![
            Category::new("b", "B", "2"),
            Category::new("a", "A", "1"),
        ]);
        let ids: Vec<&str> = reg.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, ["b", "a"]);
    }

    #[test]
    fn name_of_falls_back_to_id() {
        let reg = CategoryRegistry::defaults();
        assert_eq!(reg.name_of("study"), "Study");
        assert_eq!(reg.name_of("gone"), "gone");
        assert_eq!(reg.icon_of("gone"), "");
    }
}
