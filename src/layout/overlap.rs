//! Side-by-side layout for overlapping time blocks.
//!
//! Given one day's blocks, assign each a horizontal column so that
//! blocks overlapping in time render next to each other instead of on
//! top of each other, while blocks with no overlap keep the full lane
//! width. Three phases:
//!
//! 1. Merge blocks into clusters: maximal groups connected by direct or
//!    transitive interval overlap.
//! 2. Per cluster, sweep start/end events to find the peak number of
//!    simultaneously active blocks; that (capped) is the column count.
//! 3. Assign columns greedily in first-fit order, reusing a column as
//!    soon as its previous occupant has ended.

use std::collections::HashMap;

use crate::model::TimeBlock;

/// Hard cap on columns within one cluster. Lanes narrower than a
/// quarter of the view are unreadable, so concurrency past this point
/// shares columns instead (see [`pick_column`]).
pub const MAX_COLUMNS: usize = 4;

/// Horizontal slot assignment for one block within its overlap cluster.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OverlapInfo {
    /// Zero-based column within the cluster
    pub column_index: usize,
    /// Columns the cluster was divided into; identical for every member
    pub total_columns: usize,
}

impl OverlapInfo {
    /// Full-width assignment for a block with no overlaps.
    pub fn solo() -> Self {
        OverlapInfo {
            column_index: 0,
            total_columns: 1,
        }
    }
}

/// Compute column assignments for a day's blocks.
///
/// Every input block gets exactly one entry, keyed by id. Blocks that
/// overlap nothing come back as `{column_index: 0, total_columns: 1}`.
/// The result is deterministic for the same block set regardless of
/// input order, and recomputed from scratch on every call.
pub fn compute_overlap_layout(blocks: &[TimeBlock]) -> HashMap<String, OverlapInfo> {
    let mut layout = HashMap::new();
    if blocks.is_empty() {
        return layout;
    }

    let order = processing_order(blocks);

    // Phase 1: union directly-overlapping blocks into clusters. With
    // the list sorted by start, a block's overlap candidates are
    // exactly the blocks after it until the first one starting at or
    // past its end.
    let mut sets = DisjointSet::new(blocks.len());
    for (i, &a) in order.iter().enumerate() {
        for &b in &order[i + 1..] {
            if blocks[b].start_hour >= blocks[a].end_hour() {
                break;
            }
            if blocks[a].overlaps(&blocks[b]) {
                sets.union(a, b);
            }
        }
    }

    // Collect clusters, members in processing order.
    let mut clusters: Vec<Vec<usize>> = Vec::new();
    let mut slot_of_root: HashMap<usize, usize> = HashMap::new();
    for &i in &order {
        let root = sets.find(i);
        match slot_of_root.get(&root) {
            Some(&slot) => clusters[slot].push(i),
            None => {
                slot_of_root.insert(root, clusters.len());
                clusters.push(vec![i]);
            }
        }
    }

    for members in &clusters {
        // Phase 2
        let total_columns = cluster_columns(blocks, members);

        // Phase 3: greedy first-fit. One end-time tracker per column;
        // -inf so even a malformed negative start finds a free column.
        let mut column_ends = vec![f64::NEG_INFINITY; total_columns];
        for &i in members {
            let block = &blocks[i];
            let column_index = pick_column(&column_ends, block.start_hour);
            column_ends[column_index] = block.end_hour();
            layout.insert(
                block.id.clone(),
                OverlapInfo {
                    column_index,
                    total_columns,
                },
            );
        }
    }

    // Safety net: anything the clustering somehow missed renders full
    // width rather than disappearing.
    for block in blocks {
        layout
            .entry(block.id.clone())
            .or_insert_with(OverlapInfo::solo);
    }

    layout
}

/// Block indices sorted by (start ascending, duration descending, id).
/// Longer blocks first seeds clusters and columns with the blocks that
/// span the most; the id tie keeps identical intervals from swapping
/// columns depending on input order.
fn processing_order(blocks: &[TimeBlock]) -> Vec<usize> {
    let mut order: Vec<usize> = (0..blocks.len()).collect();
    order.sort_by(|&a, &b| {
        blocks[a]
            .start_hour
            .total_cmp(&blocks[b].start_hour)
            .then_with(|| blocks[b].duration.total_cmp(&blocks[a].duration))
            .then_with(|| blocks[a].id.cmp(&blocks[b].id))
    });
    order
}

/// Peak number of cluster members active at any instant, capped at
/// [`MAX_COLUMNS`]. A lone block always renders full width.
fn cluster_columns(blocks: &[TimeBlock], members: &[usize]) -> usize {
    if members.len() == 1 {
        return 1;
    }

    // Sweep start (+1) and end (-1) events. An end at time T sorts
    // before a start at T, so back-to-back blocks never count as
    // concurrent.
    let mut events: Vec<(f64, i8)> = Vec::with_capacity(members.len() * 2);
    for &i in members {
        events.push((blocks[i].start_hour, 1));
        events.push((blocks[i].end_hour(), -1));
    }
    events.sort_by(|a, b| a.0.total_cmp(&b.0).then_with(|| a.1.cmp(&b.1)));

    let mut current: i32 = 0;
    let mut peak: i32 = 0;
    for (_, delta) in events {
        current += i32::from(delta);
        if current > peak {
            peak = current;
        }
    }

    (peak.max(1) as usize).min(MAX_COLUMNS)
}

/// Lowest-indexed column free at `start_hour`, or — when every column
/// is still occupied (concurrency past the cap) — the column that frees
/// up soonest, accepting the visual overlap.
fn pick_column(column_ends: &[f64], start_hour: f64) -> usize {
    for (col, end) in column_ends.iter().enumerate() {
        if *end <= start_hour {
            return col;
        }
    }
    let mut soonest = 0;
    for col in 1..column_ends.len() {
        if column_ends[col] < column_ends[soonest] {
            soonest = col;
        }
    }
    soonest
}

/// Owned disjoint-set over block indices; merging overlap groups this
/// way avoids any shared mutable cluster objects.
#[derive(Debug)]
struct DisjointSet {
    parent: Vec<usize>,
}

impl DisjointSet {
    fn new(n: usize) -> Self {
        DisjointSet {
            parent: (0..n).collect(),
        }
    }

    fn find(&mut self, i: usize) -> usize {
        let mut root = i;
        while self.parent[root] != root {
            root = self.parent[root];
        }
        // Path compression
        let mut cur = i;
        while self.parent[cur] != root {
            let next = self.parent[cur];
            self.parent[cur] = root;
            cur = next;
        }
        root
    }

    fn union(&mut self, a: usize, b: usize) {
        let ra = self.find(a);
        let rb = self.find(b);
        if ra != rb {
            self.parent[rb] = ra;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;

    fn block(id: &str, start: f64, duration: f64) -> TimeBlock {
        TimeBlock::new(
            id.into(),
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
    fn empty_input_empty_output() {
        assert!(compute_overlap_layout(&[]).is_empty());
    }

    #[test]
    fn single_block_full_width() {
        let layout = compute_overlap_layout(&[block("a", 9.0, 1.0)]);
        assert_eq!(layout.len(), 1);
        assert_eq!(layout["a"], info(0, 1));
    }

    #[test]
    fn contained_overlap_splits_into_two_columns() {
        // B starts inside A's interval
        let layout = compute_overlap_layout(&[block("a", 9.0, 2.0), block("b", 10.0, 1.0)]);
        assert_eq!(layout["a"], info(0, 2));
        assert_eq!(layout["b"], info(1, 2));
    }

    #[test]
    fn back_to_back_blocks_keep_full_width() {
        // B starts exactly when A ends: separate clusters
        let layout = compute_overlap_layout(&[block("a", 9.0, 1.0), block("b", 10.0, 1.0)]);
        assert_eq!(layout["a"], info(0, 1));
        assert_eq!(layout["b"], info(0, 1));
    }

    #[test]
    fn disjoint_block_unaffected_by_overlapping_pair() {
        let layout = compute_overlap_layout(&[
            block("a", 9.0, 3.0),
            block("b", 10.0, 1.0),
            block("c", 14.0, 1.0),
        ]);
        assert_eq!(layout["a"].total_columns, 2);
        assert_eq!(layout["b"].total_columns, 2);
        assert_ne!(layout["a"].column_index, layout["b"].column_index);
        assert_eq!(layout["c"], info(0, 1));
    }

    #[test]
    fn chain_forms_one_cluster_and_reuses_columns() {
        // a-b overlap, b-c overlap, a-c do not: one cluster, peak 2
        let layout = compute_overlap_layout(&[
            block("a", 9.0, 1.5),
            block("b", 10.0, 1.5),
            block("c", 11.0, 0.5),
        ]);
        assert_eq!(layout["a"], info(0, 2));
        assert_eq!(layout["b"], info(1, 2));
        // c starts after a ended, so the first column is free again
        assert_eq!(layout["c"], info(0, 2));
    }

    #[test]
    fn late_bridge_merges_earlier_groups() {
        // Sorted by start: a, then b, then c. a and c never touch, but b
        // overlaps both, so all three are one cluster.
        let layout = compute_overlap_layout(&[
            block("a", 9.0, 1.0),
            block("c", 10.5, 1.0),
            block("b", 9.5, 1.5),
        ]);
        assert_eq!(layout["a"].total_columns, 2);
        assert_eq!(layout["b"].total_columns, 2);
        assert_eq!(layout["c"].total_columns, 2);
        assert_ne!(layout["a"].column_index, layout["b"].column_index);
        assert_ne!(layout["b"].column_index, layout["c"].column_index);
    }

    #[test]
    fn triple_concurrency_gets_three_distinct_columns() {
        let blocks = [
            block("a", 9.0, 3.0),
            block("b", 9.5, 2.0),
            block("c", 10.0, 1.0),
        ];
        let layout = compute_overlap_layout(&blocks);
        let mut columns: Vec<usize> = blocks
            .iter()
            .map(|b| {
                assert_eq!(layout[&b.id].total_columns, 3);
                layout[&b.id].column_index
            })
            .collect();
        columns.sort_unstable();
        assert_eq!(columns, [0, 1, 2]);
    }

    #[test]
    fn five_identical_blocks_cap_at_four_columns() {
        let blocks: Vec<TimeBlock> = ["a", "b", "c", "d", "e"]
            .into_iter()
            .map(|id| block(id, 9.0, 1.0))
            .collect();
        let layout = compute_overlap_layout(&blocks);
        for b in &blocks {
            assert_eq!(layout[&b.id].total_columns, 4);
        }
        // Processing order falls back to id, so a..d fill columns 0..3
        // and e reuses the soonest-free column, which is column 0.
        assert_eq!(layout["a"].column_index, 0);
        assert_eq!(layout["b"].column_index, 1);
        assert_eq!(layout["c"].column_index, 2);
        assert_eq!(layout["d"].column_index, 3);
        assert_eq!(layout["e"].column_index, 0);
    }

    #[test]
    fn independent_clusters_do_not_interfere() {
        // Two overlapping pairs far apart; each splits in two on its own
        let layout = compute_overlap_layout(&[
            block("a", 9.0, 1.0),
            block("b", 9.5, 1.0),
            block("c", 14.0, 1.0),
            block("d", 14.5, 1.0),
        ]);
        for id in ["a", "b", "c", "d"] {
            assert_eq!(layout[id].total_columns, 2);
        }
        assert_ne!(layout["a"].column_index, layout["b"].column_index);
        assert_ne!(layout["c"].column_index, layout["d"].column_index);
    }

    #[test]
    fn first_fit_prefers_lowest_free_column() {
        // After a ends, c fits back into column 0 even though column 1
        // is also free later.
        let layout = compute_overlap_layout(&[
            block("a", 9.0, 1.0),
            block("b", 9.5, 1.5),
            block("c", 10.0, 1.0),
        ]);
        assert_eq!(layout["a"].column_index, 0);
        assert_eq!(layout["b"].column_index, 1);
        assert_eq!(layout["c"].column_index, 0);
    }

    #[test]
    fn zero_duration_block_joins_cluster_degenerately() {
        // A point block inside another overlaps it, but adds no
        // concurrency: the sweep sees its end before its start.
        let layout = compute_overlap_layout(&[block("a", 9.0, 1.0), block("z", 9.5, 0.0)]);
        assert_eq!(layout["a"].total_columns, 1);
        assert_eq!(layout["z"].total_columns, 1);
    }

    #[test]
    fn every_input_id_appears_exactly_once() {
        let blocks: Vec<TimeBlock> = (0..20)
            .map(|i| block(&format!("b{i}"), (i % 7) as f64 * 1.5, 1.0 + (i % 3) as f64))
            .collect();
        let layout = compute_overlap_layout(&blocks);
        assert_eq!(layout.len(), blocks.len());
        for b in &blocks {
            assert!(layout.contains_key(&b.id));
        }
    }

    #[test]
    fn overlapping_pairs_in_wide_clusters_get_distinct_columns() {
        // Peak concurrency stays within the cap, so every truly
        // overlapping pair must separate.
        let blocks = [
            block("a", 8.0, 4.0),
            block("b", 9.0, 2.0),
            block("c", 10.5, 2.0),
            block("d", 11.0, 0.5),
        ];
        let layout = compute_overlap_layout(&blocks);
        for (i, x) in blocks.iter().enumerate() {
            for y in &blocks[i + 1..] {
                if x.overlaps(y) && layout[&x.id].total_columns >= 2 {
                    assert_ne!(
                        layout[&x.id].column_index,
                        layout[&y.id].column_index,
                        "{} and {} overlap but share a column",
                        x.id,
                        y.id
                    );
                }
            }
        }
    }

    #[test]
    fn output_is_independent_of_input_order() {
        // Includes identical intervals, which only the id tie-break
        // keeps stable across reorderings.
        let mut blocks = vec![
            block("a", 9.0, 1.0),
            block("b", 9.0, 1.0),
            block("c", 9.5, 2.0),
            block("d", 13.0, 1.0),
            block("e", 12.5, 1.0),
        ];
        let reference = compute_overlap_layout(&blocks);
        for _ in 0..blocks.len() {
            blocks.rotate_left(1);
            assert_eq!(compute_overlap_layout(&blocks), reference);
        }
        blocks.reverse();
        assert_eq!(compute_overlap_layout(&blocks), reference);
    }

    #[test]
    fn repeated_calls_are_identical() {
        let blocks = [block("a", 9.0, 2.0), block("b", 10.0, 2.0)];
        assert_eq!(
            compute_overlap_layout(&blocks),
            compute_overlap_layout(&blocks)
        );
    }

    #[test]
    fn disjoint_set_merges_transitively() {
        let mut sets = DisjointSet::new(5);
        sets.union(0, 1);
        sets.union(3, 4);
        assert_ne!(sets.find(0), sets.find(3));
        sets.union(1, 3);
        assert_eq!(sets.find(0), sets.find(4));
        assert_ne!(sets.find(2), sets.find(0));
    }

    #[test]
    fn disjoint_set_union_is_idempotent() {
        let mut sets = DisjointSet::new(3);
        sets.union(0, 1);
        sets.union(0, 1);
        sets.union(1, 0);
        assert_eq!(sets.find(0), sets.find(1));
        assert_ne!(sets.find(2), sets.find(0));
    }
}
