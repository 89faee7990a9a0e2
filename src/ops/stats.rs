//! Time totals per category over a date range.

use chrono::{Datelike, Days, Months, NaiveDate};

use crate::model::{CategoryRegistry, Schedule};

/// Aggregated time for one category over a range.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryTotal {
    pub category_id: String,
    pub hours: f64,
    /// Fraction of all tracked hours in the range (0 when nothing tracked)
    pub share: f64,
    pub blocks: usize,
}

/// Per-category totals over the inclusive range `from..=to`, sorted by
/// hours descending with registry order as the tie-break. Categories no
/// longer in the registry still get a row (blocks keep their history).
/// Overlapping blocks both count in full, same as the day view sums.
pub fn range_totals(
    schedule: &Schedule,
    registry: &CategoryRegistry,
    from: NaiveDate,
    to: NaiveDate,
) -> Vec<CategoryTotal> {
    let mut rows: Vec<CategoryTotal> = Vec::new();
    let row_index = |rows: &mut Vec<CategoryTotal>, id: &str| -> usize {
        match rows.iter().position(|r| r.category_id == id) {
            Some(i) => i,
            None => {
                rows.push(CategoryTotal {
                    category_id: id.to_string(),
                    hours: 0.0,
                    share: 0.0,
                    blocks: 0,
                });
                rows.len() - 1
            }
        }
    };

    // Seed registry categories so the tie-break order is theirs
    for category in registry.iter() {
        row_index(&mut rows, &category.id);
    }

    let mut tracked = 0.0;
    for block in &schedule.blocks {
        if block.date < from || block.date > to {
            continue;
        }
        let i = row_index(&mut rows, &block.category_id);
        rows[i].hours += block.duration;
        rows[i].blocks += 1;
        tracked += block.duration;
    }

    rows.retain(|r| r.blocks > 0);
    if tracked > 0.0 {
        for row in &mut rows {
            row.share = row.hours / tracked;
        }
    }
    rows.sort_by(|a, b| b.hours.total_cmp(&a.hours));
    rows
}

pub fn day_totals(
    schedule: &Schedule,
    registry: &CategoryRegistry,
    date: NaiveDate,
) -> Vec<CategoryTotal> {
    range_totals(schedule, registry, date, date)
}

/// Total hours recorded in the inclusive range.
pub fn tracked_hours(schedule: &Schedule, from: NaiveDate, to: NaiveDate) -> f64 {
    schedule
        .blocks
        .iter()
        .filter(|b| b.date >= from && b.date <= to)
        .map(|b| b.duration)
        .sum()
}

/// Tracked hours per day across the inclusive range, zero-filled.
pub fn daily_tracked(schedule: &Schedule, from: NaiveDate, to: NaiveDate) -> Vec<(NaiveDate, f64)> {
    let mut days = Vec::new();
    let mut date = from;
    while date <= to {
        days.push((date, tracked_hours(schedule, date, date)));
        match date.checked_add_days(Days::new(1)) {
            Some(next) => date = next,
            None => break,
        }
    }
    days
}

/// The Sunday-to-Saturday week containing `date`.
pub fn week_range(date: NaiveDate) -> (NaiveDate, NaiveDate) {
    let back = date.weekday().num_days_from_sunday() as u64;
    let from = date - Days::new(back);
    (from, from + Days::new(6))
}

/// The calendar month containing `date`.
pub fn month_range(date: NaiveDate) -> (NaiveDate, NaiveDate) {
    let from = date.with_day(1).expect("day 1 exists in every month");
    let to = from + Months::new(1) - Days::new(1);
    (from, to)
}
