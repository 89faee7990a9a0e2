//! Where a block renders inside the day grid.
//!
//! Vertical position comes from the block itself (start and duration
//! scaled by the per-hour height); horizontal position comes from the
//! overlap layout (column as a fraction of the lane width).

use crate::layout::overlap::OverlapInfo;
use crate::model::TimeBlock;

/// A block's rendered box: `top`/`height` in the same unit as the
/// per-hour height (pixels, terminal rows), `left`/`width` as fractions
/// of the lane width.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BlockBox {
    pub top: f64,
    pub height: f64,
    pub left: f64,
    pub width: f64,
}

pub fn block_box(block: &TimeBlock, info: OverlapInfo, hour_height: f64) -> BlockBox {
    let columns = info.total_columns.max(1) as f64;
    BlockBox {
        top: block.start_hour * hour_height,
        height: block.duration * hour_height,
        left: info.column_index as f64 / columns,
        width: 1.0 / columns,
    }
}

/// Height of the full 24-hour grid.
pub fn day_height(hour_height: f64) -> f64 {
    24.0 * hour_height
}

/// Map a fractional horizontal span onto a lane of `lane_width` cells,
/// returning `(x offset, cell width)`. Column edges are floored to the
/// same grid so adjacent columns tile without gaps or double-painting;
/// a column never collapses below one cell.
pub fn span_to_cells(left: f64, width: f64, lane_width: u16) -> (u16, u16) {
    let lane = lane_width as f64;
    let x = (left * lane).floor().clamp(0.0, lane) as u16;
    let right = ((left + width) * lane).floor().clamp(0.0, lane) as u16;
    let cells = right.saturating_sub(x).max(1);
    (x.min(lane_width.saturating_sub(1)), cells)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn block(start: f64, duration: f64) -> TimeBlock {
        TimeBlock::new(
            "b".into(),
            "study".into(),
            NaiveDate::from_ymd_opt(2025, 11, 24).unwrap(),
            start,
            duration,
        )
    }

    fn info(column_index: usize, total_columns: usize) -> OverlapInfo {
        OverlapInfo {
            column_index,
            total_columns,
        }
    }

    #[test]
    fn solo_block_spans_the_lane() {
        let bx = block_box(&block(9.0, 2.0), OverlapInfo::solo(), 40.0);
        assert_eq!(bx.top, 360.0);
        assert_eq!(bx.height, 80.0);
        assert_eq!(bx.left, 0.0);
        assert_eq!(bx.width, 1.0);
    }

    #[test]
    fn second_of_two_columns_starts_halfway() {
        let bx = block_box(&block(9.25, 1.5), info(1, 2), 40.0);
        assert_eq!(bx.top, 370.0);
        assert_eq!(bx.height, 60.0);
        assert_eq!(bx.left, 0.5);
        assert_eq!(bx.width, 0.5);
    }

    #[test]
    fn quarter_columns() {
        let bx = block_box(&block(0.0, 1.0), info(2, 4), 2.0);
        assert_eq!(bx.left, 0.5);
        assert_eq!(bx.width, 0.25);
    }

    #[test]
    fn day_spans_24_hours() {
        assert_eq!(day_height(2.0), 48.0);
        assert_eq!(day_height(40.0), 960.0);
    }

    #[test]
    fn columns_tile_without_overlap() {
        let lane = 80;
        let spans: Vec<(u16, u16)> = (0..3)
            .map(|c| span_to_cells(c as f64 / 3.0, 1.0 / 3.0, lane))
            .collect();
        assert_eq!(spans[0].0, 0);
        // Each column starts exactly where the previous one ends
        assert_eq!(spans[0].0 + spans[0].1, spans[1].0);
        assert_eq!(spans[1].0 + spans[1].1, spans[2].0);
        // Together they cover the whole lane
        assert_eq!(spans[2].0 + spans[2].1, lane);
    }

    #[test]
    fn narrow_lane_keeps_columns_visible() {
        // Four columns in a 3-cell lane: every column still gets a cell
        for c in 0..4 {
            let (_, w) = span_to_cells(c as f64 / 4.0, 0.25, 3);
            assert!(w >= 1);
        }
    }

    #[test]
    fn full_span_covers_lane() {
        assert_eq!(span_to_cells(0.0, 1.0, 50), (0, 50));
    }
}
