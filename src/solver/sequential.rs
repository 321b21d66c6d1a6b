//! Blocks relaxed in turn on the calling thread.
//! Same partition and merge as the parallel strategies, no threads.

use super::*;

pub fn run(grid: &SharedGrid, blocks: &[Block], epsilon: f64) -> Progress {
    let mut progress = Progress::default();
    loop {
        for block in blocks {
            block.relax(grid, epsilon);
        }
        let next = merge_phase(grid, blocks);
        progress.record(next);
        if next == Phase::Converged {
            return progress;
        }
    }
}
