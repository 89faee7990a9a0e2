//! The day grid: a time ruler down the left, blocks placed by the
//! overlap-layout engine side by side on the right.

use chrono::Timelike;
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};

use crate::layout::{self, OverlapInfo, compute_overlap_layout};
use crate::util::{hours, unicode};

use super::super::app::App;

/// Cells reserved for the hour ruler ("09:00 ")
const GUTTER: u16 = 6;

pub fn draw(frame: &mut Frame, app: &mut App, area: Rect) {
    if area.width <= GUTTER + 2 || area.height == 0 {
        return;
    }

    // Focus banner sits above the grid when set
    let grid = match &app.one_thing {
        Some(text) if area.height > 2 => {
            let banner = Rect::new(area.x, area.y, area.width, 1);
            draw_banner(frame, app, banner, text.clone());
            Rect::new(area.x, area.y + 1, area.width, area.height - 1)
        }
        _ => area,
    };

    let hh = app.hour_height;
    let total_rows = layout::day_height(hh as f64) as u16;
    let blocks = app.day_blocks();
    let assignments = compute_overlap_layout(&blocks);

    // Keep the selected block on screen, then clamp the scroll
    if let Some(selected) = blocks.get(app.selected_block) {
        let top = (selected.start_hour * hh as f64).floor().max(0.0) as u16;
        if top < app.scroll_row {
            app.scroll_row = top;
        } else if top >= app.scroll_row + grid.height {
            app.scroll_row = top - grid.height + 1;
        }
    }
    app.scroll_row = app.scroll_row.min(total_rows.saturating_sub(grid.height));
    let scroll = app.scroll_row;

    let buf = frame.buffer_mut();

    // Hour ruler
    let ruler_style = Style::default().fg(app.theme.dim);
    for row in 0..grid.height {
        let abs = scroll + row;
        if abs >= total_rows {
            break;
        }
        if abs % hh == 0 {
            let hour = abs / hh;
            buf.set_string(grid.x, grid.y + row, format!("{:02}:00", hour), ruler_style);
        }
    }

    // Current-time marker when looking at today
    let now = chrono::Local::now();
    if app.selected_date == now.date_naive() {
        let now_hour = now.hour() as f64 + now.minute() as f64 / 60.0;
        let now_row = (now_hour * hh as f64).floor() as u16;
        if now_row >= scroll && now_row < scroll + grid.height {
            buf.set_string(
                grid.x + GUTTER - 1,
                grid.y + (now_row - scroll),
                "▶",
                Style::default().fg(app.theme.highlight),
            );
        }
    }

    // Blocks
    let lane_x = grid.x + GUTTER;
    let lane_width = grid.width - GUTTER;
    for (i, block) in blocks.iter().enumerate() {
        let info = assignments
            .get(&block.id)
            .copied()
            .unwrap_or_else(OverlapInfo::solo);
        let bx = layout::block_box(block, info, hh as f64);
        let top = bx.top.floor() as i64;
        let height = bx.height.round().max(1.0) as i64;
        let (x_off, width) = layout::span_to_cells(bx.left, bx.width, lane_width);

        let selected = i == app.selected_block;
        let color = app.theme.category_color(&block.category_id);
        let style = if selected {
            Style::default()
                .bg(color)
                .fg(app.theme.text_bright)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().bg(color).fg(app.theme.block_text)
        };

        let mut label = format!(
            "{} {} {}",
            app.registry.icon_of(&block.category_id),
            app.registry.name_of(&block.category_id),
            hours::format_range(block.start_hour, block.duration),
        );
        if let Some(memo) = &block.memo {
            label.push_str("  ");
            label.push_str(memo);
        }

        for r in 0..height {
            let abs = top + r;
            if abs < scroll as i64 {
                continue;
            }
            if abs >= (scroll + grid.height) as i64 || abs >= total_rows as i64 {
                break;
            }
            let y = grid.y + (abs - scroll as i64) as u16;
            let text = if r == 0 {
                unicode::pad_to_width(&label, width as usize)
            } else {
                " ".repeat(width as usize)
            };
            buf.set_string(lane_x + x_off, y, text, style);
        }
    }

    if blocks.is_empty() && grid.height > 1 {
        buf.set_string(
            lane_x + 1,
            grid.y + 1,
            "no blocks - try `slt add study 9:00 2`",
            Style::default().fg(app.theme.dim),
        );
    }
}

fn draw_banner(frame: &mut Frame, app: &App, area: Rect, text: String) {
    let buf = frame.buffer_mut();
    let line = format!("★ {}", text);
    buf.set_string(
        area.x + 1,
        area.y,
        unicode::truncate_to_width(&line, area.width.saturating_sub(2) as usize),
        Style::default()
            .fg(app.theme.highlight)
            .add_modifier(Modifier::BOLD),
    );
}
