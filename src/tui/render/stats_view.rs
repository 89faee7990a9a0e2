use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};

use crate::ops::stats;
use crate::util::{hours, unicode};

use super::super::app::App;

pub fn draw(frame: &mut Frame, app: &mut App, area: Rect) {
    if area.width < 20 || area.height < 3 {
        return;
    }

    let date = app.selected_date;
    let totals = stats::day_totals(&app.store.schedule, &app.registry, date);
    let tracked = stats::tracked_hours(&app.store.schedule, date, date);

    let buf = frame.buffer_mut();
    buf.set_string(
        area.x + 1,
        area.y,
        format!(
            "{}  {} tracked",
            date.format("%a %Y-%m-%d"),
            hours::format_duration(tracked)
        ),
        Style::default()
            .fg(app.theme.text_bright)
            .add_modifier(Modifier::BOLD),
    );

    if totals.is_empty() {
        buf.set_string(
            area.x + 1,
            area.y + 2,
            "nothing tracked on this day",
            Style::default().fg(app.theme.dim),
        );
        return;
    }

    // Bars scale against the day's largest category
    let max_hours = totals.first().map(|t| t.hours).unwrap_or(0.0).max(0.01);
    let label_width = 16usize;
    let bar_width = (area.width as usize).saturating_sub(label_width + 18).max(4);

    for (i, total) in totals.iter().enumerate() {
        let y = area.y + 2 + i as u16;
        if y >= area.bottom() {
            break;
        }
        let label = format!(
            "{} {}",
            app.registry.icon_of(&total.category_id),
            app.registry.name_of(&total.category_id),
        );
        buf.set_string(
            area.x + 1,
            y,
            unicode::pad_to_width(&label, label_width),
            Style::default().fg(app.theme.text),
        );

        let filled = ((total.hours / max_hours) * bar_width as f64).round().max(1.0) as usize;
        let bar: String = "█".repeat(filled.min(bar_width));
        buf.set_string(
            area.x + 1 + label_width as u16,
            y,
            bar,
            Style::default().fg(app.theme.category_color(&total.category_id)),
        );

        let value = format!(
            "{:>7}  {:>3.0}%",
            hours::format_duration(total.hours),
            total.share * 100.0
        );
        let x = area.right().saturating_sub(value.len() as u16 + 1);
        buf.set_string(x, y, value, Style::default().fg(app.theme.dim));
    }
}
