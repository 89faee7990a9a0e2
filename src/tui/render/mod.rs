pub mod day_view;
pub mod stats_view;
pub mod todo_view;

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};

use crate::util::unicode;

use super::app::{App, View};

pub fn draw(frame: &mut Frame, app: &mut App) {
    let area = frame.area();
    if area.height < 3 || area.width < 4 {
        return;
    }
    let [tab_area, content, status_area] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Min(0),
        Constraint::Length(1),
    ])
    .areas(area);

    draw_tab_bar(frame, app, tab_area);
    match app.view {
        View::Day => day_view::draw(frame, app, content),
        View::Todos => todo_view::draw(frame, app, content),
        View::Stats => stats_view::draw(frame, app, content),
    }
    draw_status_row(frame, app, status_area);
}

fn draw_tab_bar(frame: &mut Frame, app: &App, area: Rect) {
    let buf = frame.buffer_mut();
    let tabs = [(View::Day, "1 Day"), (View::Todos, "2 Todos"), (View::Stats, "3 Stats")];

    let mut x = area.x + 1;
    for (view, label) in tabs {
        let style = if view == app.view {
            Style::default()
                .fg(app.theme.highlight)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(app.theme.dim)
        };
        if x + label.len() as u16 >= area.right() {
            break;
        }
        buf.set_string(x, area.y, label, style);
        x += label.len() as u16 + 3;
    }

    // Selected date on the right
    let date = app.selected_date.format("%a %Y-%m-%d").to_string();
    let w = unicode::display_width(&date) as u16;
    if area.width > w + 1 {
        buf.set_string(
            area.right() - w - 1,
            area.y,
            &date,
            Style::default().fg(app.theme.text),
        );
    }
}

fn draw_status_row(frame: &mut Frame, app: &App, area: Rect) {
    let buf = frame.buffer_mut();

    let left = match &app.status {
        Some(status) => status.clone(),
        None if app.show_key_hints => match app.view {
            View::Day => "q quit  tab view  h/l day  t today  j/k block  +/- zoom  r reload".into(),
            View::Todos => "q quit  tab view  j/k move  space toggle  r reload".into(),
            View::Stats => "q quit  tab view  h/l day  t today  r reload".into(),
        },
        None => String::new(),
    };
    buf.set_string(
        area.x + 1,
        area.y,
        unicode::truncate_to_width(&left, area.width.saturating_sub(2) as usize),
        Style::default().fg(app.theme.dim),
    );

    let pending = app.store.todos.pending_count();
    if pending > 0 {
        let right = format!("{} to do", pending);
        let w = unicode::display_width(&right) as u16;
        if area.width > w + 1 && left.is_empty() {
            buf.set_string(
                area.right() - w - 1,
                area.y,
                &right,
                Style::default().fg(app.theme.dim),
            );
        }
    }
}
