use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A scheduled activity occupying a contiguous stretch of one day.
///
/// The block covers the half-open interval `[start_hour, start_hour +
/// duration)`. `start_hour` is hours since midnight with fractional
/// minutes (9.25 = 09:15); `duration` may run the block past midnight.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeBlock {
    /// Opaque unique identifier, stable for the block's lifetime
    pub id: String,
    pub category_id: String,
    pub start_hour: f64,
    pub duration: f64,
    pub date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub memo: Option<String>,
}

impl TimeBlock {
    pub fn new(
        id: String,
        category_id: String,
        date: NaiveDate,
        start_hour: f64,
        duration: f64,
    ) -> Self {
        TimeBlock {
            id,
            category_id,
            start_hour,
            duration,
            date,
            memo: None,
        }
    }

    /// Exclusive end of the block's interval, in hours since midnight.
    pub fn end_hour(&self) -> f64 {
        self.start_hour + self.duration
    }

    /// Whether the half-open intervals of `self` and `other` intersect.
    /// Dates are not consulted; callers compare blocks from a single day.
    pub fn overlaps(&self, other: &TimeBlock) -> bool {
        self.start_hour < other.end_hour() && other.start_hour < self.end_hour()
    }
}

/// Every recorded block, across all dates (`schedule.json`).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Schedule {
    #[serde(default)]
    pub blocks: Vec<TimeBlock>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn block(start: f64, duration: f64) -> TimeBlock {
        TimeBlock::new(
            "b".into(),
            "study".into(),
            NaiveDate::from_ymd_opt(2025, 11, 24).unwrap(),
            start,
            duration,
        )
    }

    #[test]
    fn end_hour_is_start_plus_duration() {
        assert_eq!(block(9.25, 1.5).end_hour(), 10.75);
    }

    #[test]
    fn overlapping_intervals() {
        assert!(block(9.0, 2.0).overlaps(&block(10.0, 1.0)));
        assert!(block(10.0, 1.0).overlaps(&block(9.0, 2.0)));
        assert!(block(9.0, 1.0).overlaps(&block(9.0, 1.0)));
    }

    #[test]
    fn back_to_back_is_not_overlap() {
        // B starts exactly when A ends
        assert!(!block(9.0, 1.0).overlaps(&block(10.0, 1.0)));
        assert!(!block(10.0, 1.0).overlaps(&block(9.0, 1.0)));
    }

    #[test]
    fn zero_duration_inside_another() {
        let point = block(9.5, 0.0);
        assert!(block(9.0, 1.0).overlaps(&point));
        // A zero-width interval never intersects itself
        assert!(!point.overlaps(&point));
    }

    #[test]
    fn memo_skipped_when_absent() {
        let json = serde_json::to_string(&block(9.0, 1.0)).unwrap();
        assert!(!json.contains("memo"));
    }
}
