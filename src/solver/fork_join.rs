//! Fork-join per iteration on a rayon pool.
//! Every compute phase is a fresh `par_iter` over the blocks,
//! the join at its end takes the place of barrier 1.

use super::*;
use rayon::prelude::*;

pub fn run(
    grid: &SharedGrid,
    blocks: &[Block],
    epsilon: f64,
) -> Result<Progress> {
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(blocks.len())
        .thread_name(|i| format!("relax_rayon_{}", i))
        .build()?;

    let mut progress = Progress::default();
    pool.install(|| loop {
        blocks.par_iter().for_each(|block: &Block| {
            profiling::scope!("relax: fork-join compute");
            block.relax(grid, epsilon);
        });
        let next = merge_phase(grid, blocks);
        progress.record(next);
        if next == Phase::Converged {
            break;
        }
    });
    Ok(progress)
}
