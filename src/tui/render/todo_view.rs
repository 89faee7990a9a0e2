use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};

use crate::ops::todo_ops;
use crate::util::unicode;

use super::super::app::App;

/// One renderable row: a category header or an item
enum Row {
    Header(String),
    Item {
        /// Index into the flattened item list (the cursor space)
        index: usize,
        text: String,
        done: bool,
    },
}

pub fn draw(frame: &mut Frame, app: &mut App, area: Rect) {
    if area.width < 4 || area.height == 0 {
        return;
    }

    let groups = todo_ops::grouped_by_category(&app.store.todos, &app.registry);
    let mut rows = Vec::new();
    let mut index = 0;
    for (category, items) in groups {
        rows.push(Row::Header(match category {
            Some(c) => format!("{} {}", c.icon, c.name),
            None => "(no category)".to_string(),
        }));
        for todo in items {
            rows.push(Row::Item {
                index,
                text: format!(
                    "[{}] {:<5} {}",
                    if todo.done { 'x' } else { ' ' },
                    todo.id,
                    todo.title
                ),
                done: todo.done,
            });
            index += 1;
        }
    }

    let buf = frame.buffer_mut();
    if rows.is_empty() {
        if area.height > 1 {
            buf.set_string(
                area.x + 1,
                area.y + 1,
                "nothing to do - try `slt todo add \"...\"`",
                Style::default().fg(app.theme.dim),
            );
        }
        return;
    }

    if index > 0 {
        app.todo_cursor = app.todo_cursor.min(index - 1);
    }

    // Scroll so the cursor's row is visible
    let cursor_row = rows
        .iter()
        .position(|r| matches!(r, Row::Item { index, .. } if *index == app.todo_cursor))
        .unwrap_or(0);
    let height = area.height as usize;
    let offset = cursor_row.saturating_sub(height.saturating_sub(1));

    for (i, row) in rows.iter().skip(offset).take(height).enumerate() {
        let y = area.y + i as u16;
        match row {
            Row::Header(title) => {
                buf.set_string(
                    area.x + 1,
                    y,
                    unicode::truncate_to_width(title, area.width.saturating_sub(2) as usize),
                    Style::default()
                        .fg(app.theme.text_bright)
                        .add_modifier(Modifier::BOLD),
                );
            }
            Row::Item { index, text, done } => {
                let mut style = if *done {
                    Style::default()
                        .fg(app.theme.done)
                        .add_modifier(Modifier::CROSSED_OUT)
                } else {
                    Style::default().fg(app.theme.text)
                };
                if *index == app.todo_cursor {
                    style = style.bg(app.theme.selection_bg);
                }
                buf.set_string(
                    area.x + 3,
                    y,
                    unicode::pad_to_width(text, area.width.saturating_sub(4) as usize),
                    style,
                );
            }
        }
    }
}
