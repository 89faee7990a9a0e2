use std::ops::Range;

use regex::Regex;

use crate::model::{Schedule, TodoList};

/// Which kind of record a search hit came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchField {
    /// A time block's memo
    Memo,
    /// A to-do title
    TodoTitle,
}

/// One matching record, with the byte ranges of every match in `text`
/// for highlighting.
#[derive(Debug, Clone)]
pub struct SearchHit {
    pub field: MatchField,
    /// Block or to-do id
    pub id: String,
    pub text: String,
    pub spans: Vec<Range<usize>>,
}

/// Collect all non-overlapping match byte-ranges for a regex in the given text.
fn find_matches(re: &Regex, text: &str) -> Vec<Range<usize>> {
    re.find_iter(text).map(|m| m.start()..m.end()).collect()
}

/// Search every block memo in the schedule.
pub fn search_schedule(schedule: &Schedule, re: &Regex) -> Vec<SearchHit> {
    let mut hits = Vec::new();
    for block in &schedule.blocks {
        if let Some(memo) = &block.memo {
            let spans = find_matches(re, memo);
            if !spans.is_empty() {
                hits.push(SearchHit {
                    field: MatchField::Memo,
                    id: block.id.clone(),
                    text: memo.clone(),
                    spans,
                });
            }
        }
    }
    hits
}

/// Search every to-do title.
pub fn search_todos(todos: &TodoList, re: &Regex) -> Vec<SearchHit> {
    let mut hits = Vec::new();
    for todo in &todos.items {
        let spans = find_matches(re, &todo.title);
        if !spans.is_empty() {
            hits.push(SearchHit {
                field: MatchField::TodoTitle,
                id: todo.id.clone(),
                text: todo.title.clone(),
                spans,
            });
        }
    }
    hits
}
