use chrono::NaiveDate;

use crate::model::{CategoryRegistry, Schedule, TimeBlock};

/// Error type for schedule operations
#[derive(Debug, thiserror::Error)]
pub enum ScheduleError {
    #[error("block not found: {0}")]
    NotFound(String),
    #[error("unknown category: {0} (see `slt categories`)")]
    UnknownCategory(String),
    #[error("start must be within the day (0 up to 24), got {0}")]
    StartOutOfRange(f64),
    #[error("duration must be positive, got {0}")]
    NonPositiveDuration(f64),
}

/// The blocks recorded for one date, in storage order. This is what the
/// day view hands to the overlap-layout engine, which sorts internally.
pub fn blocks_for_date(schedule: &Schedule, date: NaiveDate) -> Vec<TimeBlock> {
    schedule
        .blocks
        .iter()
        .filter(|b| b.date == date)
        .cloned()
        .collect()
}

/// Sort blocks the way a day reads on screen, which is also the layout
/// engine's processing order: start ascending, longer first, id last.
pub fn sort_blocks(blocks: &mut [TimeBlock]) {
    blocks.sort_by(|a, b| {
        a.start_hour
            .total_cmp(&b.start_hour)
            .then_with(|| b.duration.total_cmp(&a.duration))
            .then_with(|| a.id.cmp(&b.id))
    });
}

/// Add a block, validating what the layout engine deliberately accepts
/// as-is: the category must exist, the start must fall within the day,
/// and the duration must be positive. Returns the stored block.
pub fn add_block(
    schedule: &mut Schedule,
    registry: &CategoryRegistry,
    category_id: &str,
    date: NaiveDate,
    start_hour: f64,
    duration: f64,
    memo: Option<String>,
) -> Result<TimeBlock, ScheduleError> {
    if !registry.contains(category_id) {
        return Err(ScheduleError::UnknownCategory(category_id.to_string()));
    }
    validate_start(start_hour)?;
    validate_duration(duration)?;

    let mut block = TimeBlock::new(
        next_block_id(schedule, date),
        category_id.to_string(),
        date,
        start_hour,
        duration,
    );
    block.memo = memo;
    schedule.blocks.push(block.clone());
    Ok(block)
}

/// Move a block to a new start time, and optionally to another date.
pub fn move_block(
    schedule: &mut Schedule,
    id: &str,
    start_hour: f64,
    date: Option<NaiveDate>,
) -> Result<(), ScheduleError> {
    validate_start(start_hour)?;
    let block = find_mut(schedule, id)?;
    block.start_hour = start_hour;
    if let Some(date) = date {
        block.date = date;
    }
    Ok(())
}

pub fn resize_block(
    schedule: &mut Schedule,
    id: &str,
    duration: f64,
) -> Result<(), ScheduleError> {
    validate_duration(duration)?;
    find_mut(schedule, id)?.duration = duration;
    Ok(())
}

/// Set or clear a block's memo.
pub fn set_memo(
    schedule: &mut Schedule,
    id: &str,
    memo: Option<String>,
) -> Result<(), ScheduleError> {
    find_mut(schedule, id)?.memo = memo;
    Ok(())
}

/// Remove a block, returning it.
pub fn remove_block(schedule: &mut Schedule, id: &str) -> Result<TimeBlock, ScheduleError> {
    let idx = schedule
        .blocks
        .iter()
        .position(|b| b.id == id)
        .ok_or_else(|| ScheduleError::NotFound(id.to_string()))?;
    Ok(schedule.blocks.remove(idx))
}

fn find_mut<'a>(schedule: &'a mut Schedule, id: &str) -> Result<&'a mut TimeBlock, ScheduleError> {
    schedule
        .blocks
        .iter_mut()
        .find(|b| b.id == id)
        .ok_or_else(|| ScheduleError::NotFound(id.to_string()))
}

fn validate_start(start_hour: f64) -> Result<(), ScheduleError> {
    if !(0.0..24.0).contains(&start_hour) {
        return Err(ScheduleError::StartOutOfRange(start_hour));
    }
    Ok(())
}

fn validate_duration(duration: f64) -> Result<(), ScheduleError> {
    if !(duration > 0.0) {
        return Err(ScheduleError::NonPositiveDuration(duration));
    }
    Ok(())
}

/// Allocate `<date>-<n>` with the smallest unused suffix for that date.
fn next_block_id(schedule: &Schedule, date: NaiveDate) -> String {
    let prefix = date.format("%Y-%m-%d").to_string();
    let mut n = 1;
    loop {
        let candidate = format!("{}-{}", prefix, n);
        if !schedule.blocks.iter().any(|b| b.id == candidate) {
            return candidate;
        }
        n += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 11, day).unwrap()
    }

    fn setup() -> (Schedule, CategoryRegistry) {
        (Schedule::default(), CategoryRegistry::defaults())
    }

    #[test]
    fn add_allocates_date_scoped_ids() {
        let (mut schedule, registry) = setup();
        let a = add_block(&mut schedule, &registry, "study", date(24), 9.0, 2.0, None).unwrap();
        let b = add_block(&mut schedule, &registry, "rest", date(24), 11.0, 1.0, None).unwrap();
        let c = add_block(&mut schedule, &registry, "study", date(25), 9.0, 1.0, None).unwrap();
        assert_eq!(a.id, "2025-11-24-1");
        assert_eq!(b.id, "2025-11-24-2");
        assert_eq!(c.id, "2025-11-25-1");
    }

    #[test]
    fn removed_id_is_reused() {
        let (mut schedule, registry) = setup();
        add_block(&mut schedule, &registry, "study", date(24), 9.0, 1.0, None).unwrap();
        add_block(&mut schedule, &registry, "study", date(24), 10.0, 1.0, None).unwrap();
        remove_block(&mut schedule, "2025-11-24-1").unwrap();
        let again = add_block(&mut schedule, &registry, "rest", date(24), 12.0, 1.0, None).unwrap();
        assert_eq!(again.id, "2025-11-24-1");
    }

    #[test]
    fn add_rejects_unknown_category() {
        let (mut schedule, registry) = setup();
        let err = add_block(&mut schedule, &registry, "nap", date(24), 9.0, 1.0, None).unwrap_err();
        assert!(matches!(err, ScheduleError::UnknownCategory(_)));
        assert!(schedule.blocks.is_empty());
    }

    #[test]
    fn add_rejects_bad_start_and_duration() {
        let (mut schedule, registry) = setup();
        assert!(matches!(
            add_block(&mut schedule, &registry, "study", date(24), 24.0, 1.0, None),
            Err(ScheduleError::StartOutOfRange(_))
        ));
        assert!(matches!(
            add_block(&mut schedule, &registry, "study", date(24), -1.0, 1.0, None),
            Err(ScheduleError::StartOutOfRange(_))
        ));
        assert!(matches!(
            add_block(&mut schedule, &registry, "study", date(24), 9.0, 0.0, None),
            Err(ScheduleError::NonPositiveDuration(_))
        ));
    }

    #[test]
    fn add_allows_running_past_midnight() {
        let (mut schedule, registry) = setup();
        let b = add_block(&mut schedule, &registry, "sleep", date(24), 23.0, 8.0, None).unwrap();
        assert_eq!(b.end_hour(), 31.0);
    }

    #[test]
    fn blocks_for_date_filters() {
        let (mut schedule, registry) = setup();
        add_block(&mut schedule, &registry, "study", date(24), 9.0, 1.0, None).unwrap();
        add_block(&mut schedule, &registry, "study", date(25), 9.0, 1.0, None).unwrap();
        add_block(&mut schedule, &registry, "rest", date(24), 13.0, 1.0, None).unwrap();
        let day = blocks_for_date(&schedule, date(24));
        assert_eq!(day.len(), 2);
        assert!(day.iter().all(|b| b.date == date(24)));
    }

    #[test]
    fn move_resize_memo_round_trip() {
        let (mut schedule, registry) = setup();
        let b = add_block(&mut schedule, &registry, "study", date(24), 9.0, 1.0, None).unwrap();

        move_block(&mut schedule, &b.id, 10.5, Some(date(25))).unwrap();
        resize_block(&mut schedule, &b.id, 2.25).unwrap();
        set_memo(&mut schedule, &b.id, Some("linear algebra".into())).unwrap();

        let stored = &schedule.blocks[0];
        assert_eq!(stored.start_hour, 10.5);
        assert_eq!(stored.date, date(25));
        assert_eq!(stored.duration, 2.25);
        assert_eq!(stored.memo.as_deref(), Some("linear algebra"));

        set_memo(&mut schedule, &b.id, None).unwrap();
        assert!(schedule.blocks[0].memo.is_none());
    }

    #[test]
    fn operations_on_missing_blocks_fail() {
        let (mut schedule, _) = setup();
        assert!(matches!(
            move_block(&mut schedule, "nope", 9.0, None),
            Err(ScheduleError::NotFound(_))
        ));
        assert!(matches!(
            resize_block(&mut schedule, "nope", 1.0),
            Err(ScheduleError::NotFound(_))
        ));
        assert!(matches!(
            remove_block(&mut schedule, "nope"),
            Err(ScheduleError::NotFound(_))
        ));
    }

    #[test]
    fn sort_orders_by_start_then_length_then_id() {
        let (mut schedule, registry) = setup();
        add_block(&mut schedule, &registry, "rest", date(24), 13.0, 1.0, None).unwrap();
        add_block(&mut schedule, &registry, "study", date(24), 9.0, 1.0, None).unwrap();
        add_block(&mut schedule, &registry, "reading", date(24), 9.0, 2.0, None).unwrap();

        let mut blocks = blocks_for_date(&schedule, date(24));
        sort_blocks(&mut blocks);
        let ids: Vec<&str> = blocks.iter().map(|b| b.id.as_str()).collect();
        // 9.0/2h before 9.0/1h (longer first), 13.0 last
        assert_eq!(ids, ["2025-11-24-3", "2025-11-24-2", "2025-11-24-1"]);
    }

    #[test]
    fn move_validates_before_lookup() {
        let (mut schedule, registry) = setup();
        let b = add_block(&mut schedule, &registry, "study", date(24), 9.0, 1.0, None).unwrap();
        assert!(matches!(
            move_block(&mut schedule, &b.id, 25.0, None),
            Err(ScheduleError::StartOutOfRange(_))
        ));
        assert_eq!(schedule.blocks[0].start_hour, 9.0);
    }
}
