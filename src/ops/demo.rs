//! Deterministic demo schedules.
//!
//! Fills a date range with a plausible student-style day: a weekday
//! template and a weekend template, each entry jittered by up to
//! ±15 minutes in quarter-hour steps. The jitter comes from a seeded
//! generator, so the same seed and range always produce the same
//! blocks — `slt demo` is reproducible and the test suite uses the
//! same builder for fixtures.

use chrono::{Datelike, Days, NaiveDate, Weekday};

use crate::model::TimeBlock;

pub const DEFAULT_SEED: u64 = 1;

struct Slot {
    category: &'static str,
    start: f64,
    duration: f64,
}

const fn slot(category: &'static str, start: f64, duration: f64) -> Slot {
    Slot {
        category,
        start,
        duration,
    }
}

const WEEKDAY: &[Slot] = &[
    slot("sleep", 0.0, 7.0),
    slot("meal", 7.0, 1.0),
    slot("commute", 8.0, 1.0),
    slot("study", 9.0, 3.0),
    slot("meal", 12.0, 1.0),
    slot("study", 13.0, 2.0),
    slot("rest", 15.0, 0.5),
    slot("reading", 15.5, 1.5),
    slot("exercise", 17.0, 1.0),
    slot("meal", 18.0, 1.0),
    slot("work", 19.0, 2.0),
    slot("commute", 21.0, 1.0),
    slot("waste", 22.0, 1.0),
    slot("routine", 23.0, 1.0),
];

const WEEKEND: &[Slot] = &[
    slot("sleep", 1.0, 8.0),
    slot("meal", 9.0, 1.0),
    slot("rest", 10.0, 2.0),
    slot("meal", 12.0, 1.0),
    slot("social", 13.0, 2.0),
    slot("reading", 15.0, 2.0),
    slot("exercise", 17.0, 1.0),
    slot("meal", 18.0, 1.0),
    slot("waste", 19.0, 3.0),
    slot("housework", 22.0, 2.0),
    slot("routine", 0.0, 1.0),
];

/// Small xorshift generator; enough randomness for schedule jitter and
/// fully reproducible from its seed.
#[derive(Debug)]
pub struct DemoRng(u64);

impl DemoRng {
    pub fn new(seed: u64) -> Self {
        // xorshift state must be non-zero
        DemoRng(seed.max(1))
    }

    fn next_u64(&mut self) -> u64 {
        let mut x = self.0;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.0 = x;
        x
    }

    /// Uniform in [0, 1)
    fn next_unit(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }
}

/// Jitter of up to ±`max_variation` hours, snapped to quarter hours.
fn quarter_jitter(rng: &mut DemoRng, max_variation: f64) -> f64 {
    let jitter = (rng.next_unit() - 0.5) * 2.0 * max_variation;
    (jitter * 4.0).round() / 4.0
}

/// Generate blocks for `days` consecutive dates starting at `from`.
pub fn generate(seed: u64, from: NaiveDate, days: u32) -> Vec<TimeBlock> {
    let mut rng = DemoRng::new(seed);
    let mut blocks = Vec::new();

    for offset in 0..days {
        let date = from + Days::new(offset as u64);
        let weekend = matches!(date.weekday(), Weekday::Sat | Weekday::Sun);
        let template = if weekend { WEEKEND } else { WEEKDAY };

        for (index, slot) in template.iter().enumerate() {
            // The day's first entry keeps its start so sleep anchors at
            // the template hour; everything else drifts a little.
            let start_jitter = if index == 0 {
                0.0
            } else {
                quarter_jitter(&mut rng, 0.25)
            };
            let duration_jitter = quarter_jitter(&mut rng, 0.25);

            let start = (slot.start + start_jitter).clamp(0.0, 23.75);
            let duration = (slot.duration + duration_jitter).max(0.25);

            let mut block = TimeBlock::new(
                format!("{}-{}", date.format("%Y-%m-%d"), index + 1),
                slot.category.to_string(),
                date,
                start,
                duration,
            );
            block.memo = None;
            blocks.push(block);
        }
    }

    blocks
}
