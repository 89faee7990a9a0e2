use crossterm::event::{KeyCode, KeyEvent};

use super::app::{App, View};

pub fn handle_key(app: &mut App, key: KeyEvent) {
    app.status = None;

    // Global keys
    match key.code {
        KeyCode::Char('q') => {
            app.should_quit = true;
            return;
        }
        KeyCode::Tab => {
            app.next_view();
            return;
        }
        KeyCode::Char('1') => {
            app.view = View::Day;
            return;
        }
        KeyCode::Char('2') => {
            app.view = View::Todos;
            return;
        }
        KeyCode::Char('3') => {
            app.view = View::Stats;
            return;
        }
        KeyCode::Char('?') => {
            app.show_key_hints = !app.show_key_hints;
            return;
        }
        KeyCode::Char('r') => {
            app.reload();
            return;
        }
        _ => {}
    }

    match app.view {
        View::Day => day_keys(app, key),
        View::Todos => todo_keys(app, key),
        View::Stats => date_keys(app, key),
    }
}

fn day_keys(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('j') | KeyCode::Down => app.select_next_block(),
        KeyCode::Char('k') | KeyCode::Up => app.select_prev_block(),
        KeyCode::Char('+') | KeyCode::Char('=') => app.zoom_in(),
        KeyCode::Char('-') => app.zoom_out(),
        KeyCode::PageDown => app.scroll_row = app.scroll_row.saturating_add(6),
        KeyCode::PageUp => app.scroll_row = app.scroll_row.saturating_sub(6),
        _ => date_keys(app, key),
    }
}

/// Day navigation shared by the day and stats views.
fn date_keys(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('h') | KeyCode::Left => app.prev_day(),
        KeyCode::Char('l') | KeyCode::Right => app.next_day(),
        KeyCode::Char('t') => app.go_today(),
        _ => {}
    }
}

fn todo_keys(app: &mut App, key: KeyEvent) {
    let count = app.flat_todo_ids().len();
    match key.code {
        KeyCode::Char('j') | KeyCode::Down => {
            if count > 0 {
                app.todo_cursor = (app.todo_cursor + 1) % count;
            }
        }
        KeyCode::Char('k') | KeyCode::Up => {
            if count > 0 {
                app.todo_cursor = (app.todo_cursor + count - 1) % count;
            }
        }
        KeyCode::Char(' ') => app.toggle_selected_todo(),
        _ => {}
    }
}
