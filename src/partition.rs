//! Static decomposition of the grid into one block per worker.
//!
//! Blocks are carved out of the mutable span, the linear indices of rows
//! `1..size - 1`. Every block but the last holds `ceil(span / threads)`
//! indices and the last block takes whatever remains, so it may be shorter
//! than the rest. When rounding up would leave the last block empty, the
//! other blocks hold `floor(span / threads)` instead and the last block is
//! the longer one. Edge cells that land inside a block are passed
//! through by the kernel, which keeps every block a single contiguous range.

use crate::error::*;
use crate::grid::check_size;
use crate::util::*;
use std::ops::Range;

/// Half open range `[start, end)` of linear grid indices.
#[derive(Hash, Debug, Copy, Clone, Eq, PartialEq)]
pub struct BlockRange {
    pub start: usize,
    pub end: usize,
}

impl std::fmt::Display for BlockRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}, {})", self.start, self.end)
    }
}

impl BlockRange {
    pub fn new(start: usize, end: usize) -> Self {
        debug_assert!(start <= end);
        BlockRange { start, end }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    #[inline]
    pub fn contains(&self, linear_index: usize) -> bool {
        self.start <= linear_index && linear_index < self.end
    }

    pub fn range(&self) -> Range<usize> {
        self.start..self.end
    }
}

/// Split the grid across `threads` workers.
pub fn partition(size: usize, threads: usize) -> Result<Vec<BlockRange>> {
    check_size(size)?;
    let interior = interior_count(size);
    if threads == 0 || threads > interior {
        return Err(RelaxError::configuration(format!(
            "thread count must be between 1 and {interior} for a \
             {size}x{size} grid, got {threads}"
        )));
    }

    let span = mutable_span(size);
    let equal_block_count = threads - 1;
    let mut equal_block_size = span.len().div_ceil(threads);
    if equal_block_size * equal_block_count >= span.len() {
        // Rounding up would leave nothing for the last block.
        equal_block_size = span.len() / threads;
    }
    let equal_extent = equal_block_size * equal_block_count;
    if equal_block_size == 0 || equal_extent >= span.len() {
        return Err(RelaxError::Partition {
            size,
            threads,
            block_size: equal_block_size,
        });
    }

    let mut blocks: Vec<BlockRange> = (0..equal_block_count)
        .map(|i| {
            let start = span.start + i * equal_block_size;
            BlockRange::new(start, start + equal_block_size)
        })
        .collect();
    // Remainder goes to the last block.
    blocks.push(BlockRange::new(span.start + equal_extent, span.end));

    tracing::debug!(
        size,
        threads,
        equal_block_size,
        last_block_size = blocks[threads - 1].len(),
        "partitioned grid"
    );
    Ok(blocks)
}
