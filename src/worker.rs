//! The relaxation kernel run by each worker.

use crate::grid::*;
use crate::partition::BlockRange;
use crate::util::*;
use std::sync::atomic::{AtomicBool, Ordering};

/// One worker's share of the grid.
///
/// The owning worker writes the candidate buffer and raises the changed
/// flag during the compute phase. The coordinator reads both, and clears
/// the flag, during the merge phase. Barriers keep the two phases apart.
#[derive(Debug)]
pub struct Block {
    id: usize,
    range: BlockRange,
    candidates: SharedCells,
    changed: AtomicBool,
}

impl Block {
    pub fn new(id: usize, range: BlockRange) -> Self {
        Block {
            id,
            range,
            candidates: SharedCells::new(range.len()),
            changed: AtomicBool::new(false),
        }
    }

    pub fn id(&self) -> usize {
        self.id
    }

    pub fn range(&self) -> BlockRange {
        self.range
    }

    /// Whether the last pass moved any cell by more than epsilon.
    pub fn changed(&self) -> bool {
        self.changed.load(Ordering::Relaxed)
    }

    pub fn reset(&self) {
        self.changed.store(false, Ordering::Relaxed);
    }

    /// Candidate value computed for a grid cell in this block.
    #[track_caller]
    pub fn candidate(&self, linear_index: usize) -> f64 {
        debug_assert!(self.range.contains(linear_index));
        self.candidates.load(linear_index - self.range.start)
    }

    pub fn candidates(&self) -> Vec<f64> {
        self.candidates.to_vec()
    }

    /// One Jacobi pass over the block.
    ///
    /// Interior cells get the mean of their four neighbors in `grid`,
    /// edge cells are copied unchanged. Returns the largest absolute
    /// change, and raises the changed flag if it exceeds `epsilon`.
    pub fn relax<G: GridView>(&self, grid: &G, epsilon: f64) -> f64 {
        let size = grid.size();
        let mut max_diff: f64 = 0.0;
        for (offset, linear_index) in self.range.range().enumerate() {
            let old = grid.value_linear(linear_index);
            let new = if is_row_edge(linear_index, size) {
                old
            } else {
                grid.neighbor_mean(linear_index)
            };
            max_diff = max_diff.max((new - old).abs());
            self.candidates.store(offset, new);
        }
        if max_diff > epsilon {
            self.changed.store(true, Ordering::Relaxed);
        }
        max_diff
    }

    /// Copy candidates of interior cells into the grid.
    pub fn merge_into(&self, grid: &SharedGrid) {
        let size = grid.size();
        for (offset, linear_index) in self.range.range().enumerate() {
            if !is_row_edge(linear_index, size) {
                grid.store(linear_index, self.candidates.load(offset));
            }
        }
    }
}

/// One block per partition range, ids in partition order.
pub fn make_blocks(ranges: &[BlockRange]) -> Vec<Block> {
    ranges
        .iter()
        .enumerate()
        .map(|(id, range)| Block::new(id, *range))
        .collect()
}
