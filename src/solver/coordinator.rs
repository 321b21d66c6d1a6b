//! Persistent workers, two barriers per iteration.
//!
//! Workers run on a rayon pool with one thread per block. The pool starts
//! all of its threads when it is built, so a failure to start one is an
//! error before any worker reaches a barrier.
//! Worker `i` is spawned once, bound to block `i`, and loops:
//! relax, wait at barrier 1, wait at barrier 2, read the phase.
//! The calling thread is the coordinator and the extra barrier party:
//! it waits at barrier 1, runs the merge phase, publishes the next phase,
//! and releases everyone at barrier 2.
//!
//! Barrier 1 means every read of the grid for this iteration is done
//! before the merge writes to it. Barrier 2 means the merge and the new
//! phase are visible before any worker reads the grid again.

use super::*;
use std::sync::Barrier;

pub fn run(
    grid: &SharedGrid,
    blocks: &[Block],
    epsilon: f64,
) -> Result<Progress> {
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(blocks.len())
        .thread_name(|i| format!("relax_worker_{}", i))
        .build()?;

    let barrier = Barrier::new(blocks.len() + 1);
    let phase = PhaseCell::new(Phase::Idle);
    let mut progress = Progress::default();

    // The calling thread is not part of the pool, it stays free to
    // coordinate while every pool thread holds one worker.
    pool.in_place_scope(|scope| {
        for block in blocks {
            let barrier = &barrier;
            let phase = &phase;
            scope.spawn(move |_| {
                worker_loop(block, grid, epsilon, barrier, phase)
            });
        }
        phase.set(Phase::Computing);

        loop {
            barrier.wait();
            phase.set(Phase::Merging);
            let next = merge_phase(grid, blocks);
            progress.record(next);
            phase.set(next);
            profiling::finish_frame!();
            barrier.wait();

            if next == Phase::Converged {
                break;
            }
        }
    });

    Ok(progress)
}

fn worker_loop(
    block: &Block,
    grid: &SharedGrid,
    epsilon: f64,
    barrier: &Barrier,
    phase: &PhaseCell,
) {
    loop {
        {
            profiling::scope!("relax: worker compute");
            block.relax(grid, epsilon);
        }
        barrier.wait();
        barrier.wait();
        if phase.get() == Phase::Converged {
            return;
        }
    }
}
