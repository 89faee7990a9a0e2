use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A to-do item, optionally filed under a category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Todo {
    /// Identifier like `t-3`, stable for the item's lifetime
    pub id: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category_id: Option<String>,
    #[serde(default)]
    pub done: bool,
    pub added: NaiveDate,
}

/// The whole to-do list (`todos.json`).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TodoList {
    #[serde(default)]
    pub items: Vec<Todo>,
}

impl TodoList {
    pub fn pending_count(&self) -> usize {
        self.items.iter().filter(|t| !t.done).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pending_excludes_done() {
        let date = NaiveDate::from_ymd_opt(2025, 11, 24).unwrap();
        let todos = TodoList {
            items: vec![
                Todo {
                    id: "t-1".into(),
                    title: "buy groceries".into(),
                    category_id: None,
                    done: false,
                    added: date,
                },
                Todo {
                    id: "t-2".into(),
                    title: "return library books".into(),
                    category_id: Some("reading".into()),
                    done: true,
                    added: date,
                },
            ],
        };
        assert_eq!(todos.pending_count(), 1);
    }

    #[test]
    fn serde_defaults_fill_missing_fields() {
        let t: Todo =
            serde_json::from_str(r#"{"id":"t-1","title":"x","added":"2025-11-24"}"#).unwrap();
        assert!(!t.done);
        assert!(t.category_id.is_none());
    }
}
