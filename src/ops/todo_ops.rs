use chrono::NaiveDate;

use crate::model::{Category, CategoryRegistry, Todo, TodoList};

/// Error type for to-do operations
#[derive(Debug, thiserror::Error)]
pub enum TodoError {
    #[error("to-do not found: {0}")]
    NotFound(String),
    #[error("unknown category: {0} (see `slt categories`)")]
    UnknownCategory(String),
    #[error("to-do title is empty")]
    EmptyTitle,
}

/// Add a to-do, optionally filed under a category. Returns the stored item.
pub fn add_todo(
    todos: &mut TodoList,
    registry: &CategoryRegistry,
    title: &str,
    category_id: Option<&str>,
    added: NaiveDate,
) -> Result<Todo, TodoError> {
    let title = title.trim();
    if title.is_empty() {
        return Err(TodoError::EmptyTitle);
    }
    if let Some(cat) = category_id
        && !registry.contains(cat)
    {
        return Err(TodoError::UnknownCategory(cat.to_string()));
    }

    let todo = Todo {
        id: next_todo_id(todos),
        title: title.to_string(),
        category_id: category_id.map(str::to_string),
        done: false,
        added,
    };
    todos.items.push(todo.clone());
    Ok(todo)
}

/// Flip an item's done state; returns the new state.
pub fn toggle_todo(todos: &mut TodoList, id: &str) -> Result<bool, TodoError> {
    let item = todos
        .items
        .iter_mut()
        .find(|t| t.id == id)
        .ok_or_else(|| TodoError::NotFound(id.to_string()))?;
    item.done = !item.done;
    Ok(item.done)
}

/// Remove an item, returning it.
pub fn remove_todo(todos: &mut TodoList, id: &str) -> Result<Todo, TodoError> {
    let idx = todos
        .items
        .iter()
        .position(|t| t.id == id)
        .ok_or_else(|| TodoError::NotFound(id.to_string()))?;
    Ok(todos.items.remove(idx))
}

/// Items grouped by category in registry order, uncategorized last.
/// Only groups with at least one item appear.
pub fn grouped_by_category<'a>(
    todos: &'a TodoList,
    registry: &'a CategoryRegistry,
) -> Vec<(Option<&'a Category>, Vec<&'a Todo>)> {
    let mut groups = Vec::new();
    for category in registry.iter() {
        let items: Vec<&Todo> = todos
            .items
            .iter()
            .filter(|t| t.category_id.as_deref() == Some(category.id.as_str()))
            .collect();
        if !items.is_empty() {
            groups.push((Some(category), items));
        }
    }
    let loose: Vec<&Todo> = todos
        .items
        .iter()
        .filter(|t| {
            t.category_id
                .as_deref()
                .is_none_or(|cat| !registry.contains(cat))
        })
        .collect();
    if !loose.is_empty() {
        groups.push((None, loose));
    }
    groups
}

/// Allocate `t-<n>` with the smallest unused suffix.
fn next_todo_id(todos: &TodoList) -> String {
    let mut n = 1;
    loop {
        let candidate = format!("t-{}", n);
        if !todos.items.iter().any(|t| t.id == candidate) {
            return candidate;
        }
        n += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 11, 24).unwrap()
    }

    fn setup() -> (TodoList, CategoryRegistry) {
        (TodoList::default(), CategoryRegistry::defaults())
    }

    #[test]
    fn add_assigns_sequential_ids() {
        let (mut todos, registry) = setup();
        let a = add_todo(&mut todos, &registry, "water the plants", None, date()).unwrap();
        let b = add_todo(&mut todos, &registry, "call the bank", None, date()).unwrap();
        assert_eq!(a.id, "t-1");
        assert_eq!(b.id, "t-2");
    }

    #[test]
    fn add_trims_and_rejects_empty_titles() {
        let (mut todos, registry) = setup();
        let t = add_todo(&mut todos, &registry, "  tidy desk  ", None, date()).unwrap();
        assert_eq!(t.title, "tidy desk");
        assert!(matches!(
            add_todo(&mut todos, &registry, "   ", None, date()),
            Err(TodoError::EmptyTitle)
        ));
    }

    #[test]
    fn add_rejects_unknown_category() {
        let (mut todos, registry) = setup();
        assert!(matches!(
            add_todo(&mut todos, &registry, "x", Some("nope"), date()),
            Err(TodoError::UnknownCategory(_))
        ));
    }

    #[test]
    fn toggle_flips_both_ways() {
        let (mut todos, registry) = setup();
        let t = add_todo(&mut todos, &registry, "stretch", Some("exercise"), date()).unwrap();
        assert!(toggle_todo(&mut todos, &t.id).unwrap());
        assert!(!toggle_todo(&mut todos, &t.id).unwrap());
    }

    #[test]
    fn remove_returns_the_item() {
        let (mut todos, registry) = setup();
        let t = add_todo(&mut todos, &registry, "stretch", None, date()).unwrap();
        let removed = remove_todo(&mut todos, &t.id).unwrap();
        assert_eq!(removed.title, "stretch");
        assert!(todos.items.is_empty());
        assert!(matches!(
            remove_todo(&mut todos, &t.id),
            Err(TodoError::NotFound(_))
        ));
    }

    #[test]
    fn grouping_follows_registry_order_with_loose_items_last() {
        let (mut todos, registry) = setup();
        add_todo(&mut todos, &registry, "inbox zero", None, date()).unwrap();
        add_todo(&mut todos, &registry, "jog", Some("exercise"), date()).unwrap();
        add_todo(&mut todos, &registry, "nap", Some("sleep"), date()).unwrap();
        add_todo(&mut todos, &registry, "sprint", Some("exercise"), date()).unwrap();

        let groups = grouped_by_category(&todos, &registry);
        assert_eq!(groups.len(), 3);
        // Registry order: sleep before exercise
        assert_eq!(groups[0].0.unwrap().id, "sleep");
        assert_eq!(groups[1].0.unwrap().id, "exercise");
        assert_eq!(groups[1].1.len(), 2);
        assert!(groups[2].0.is_none());
        assert_eq!(groups[2].1[0].title, "inbox zero");
    }

    #[test]
    fn orphaned_category_counts_as_loose() {
        let registry = CategoryRegistry::defaults();
        let todos = TodoList {
            items: vec![Todo {
                id: "t-1".into(),
                title: "old item".into(),
                category_id: Some("deleted-cat".into()),
                done: false,
                added: date(),
            }],
        };
        let groups = grouped_by_category(&todos, &registry);
        assert_eq!(groups.len(), 1);
        assert!(groups[0].0.is_none());
    }
}
