//! Iterates the relaxation to convergence.
//!
//! Each iteration has two phases. In the compute phase every block is
//! relaxed against the grid as it stood after the previous merge. In the
//! merge phase the changed flags are combined; if none is raised the run
//! has converged and the candidates are discarded, otherwise every block's
//! candidates are copied into the grid and the flags are cleared.
//! The strategies differ only in how the compute phase is scheduled.

mod coordinator;
mod fork_join;
mod parameters;
mod sequential;

pub use parameters::*;

use crate::error::*;
use crate::grid::*;
use crate::partition::*;
use crate::worker::*;
use std::sync::atomic::{AtomicU8, Ordering};
use std::time::{Duration, Instant};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[repr(u8)]
pub enum Phase {
    Idle,
    Computing,
    Merging,
    Converged,
}

/// Phase shared between the coordinator and persistent workers.
/// Written by the coordinator before a barrier, read by workers after it.
pub(crate) struct PhaseCell(AtomicU8);

impl PhaseCell {
    pub fn new(phase: Phase) -> Self {
        PhaseCell(AtomicU8::new(phase as u8))
    }

    pub fn set(&self, phase: Phase) {
        self.0.store(phase as u8, Ordering::Release);
    }

    pub fn get(&self) -> Phase {
        match self.0.load(Ordering::Acquire) {
            0 => Phase::Idle,
            1 => Phase::Computing,
            2 => Phase::Merging,
            _ => Phase::Converged,
        }
    }
}

/// Iteration counts from one run.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Progress {
    /// Compute phases performed, including the one that found convergence.
    pub iterations: usize,

    /// Merge phases that wrote into the grid.
    pub merges: usize,
}

impl Progress {
    fn record(&mut self, next: Phase) {
        self.iterations += 1;
        if next == Phase::Computing {
            self.merges += 1;
        }
    }
}

#[derive(Copy, Clone, Debug)]
pub struct SolveReport {
    pub progress: Progress,
    pub elapsed: Duration,
    pub phase: Phase,
}

/// The merge phase.
/// Returns the phase that follows it.
pub(crate) fn merge_phase(grid: &SharedGrid, blocks: &[Block]) -> Phase {
    profiling::scope!("relax: merge");
    let changed = blocks.iter().fold(false, |acc, b| acc | b.changed());
    if !changed {
        return Phase::Converged;
    }
    for block in blocks {
        block.merge_into(grid);
        block.reset();
    }
    Phase::Computing
}

/// A grid together with its static partition.
/// Built once per run, before any worker exists.
pub struct Relaxation {
    grid: SharedGrid,
    blocks: Vec<Block>,
    parameters: SolverParameters,
    phase: Phase,
}

impl Relaxation {
    /// Validate the configuration and partition the grid.
    pub fn new(grid: &Grid, parameters: SolverParameters) -> Result<Self> {
        parameters.validate()?;
        let ranges = partition(grid.size(), parameters.threads)?;
        Ok(Relaxation {
            grid: SharedGrid::from_grid(grid),
            blocks: make_blocks(&ranges),
            parameters,
            phase: Phase::Idle,
        })
    }

    pub fn grid(&self) -> &SharedGrid {
        &self.grid
    }

    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    pub fn block_ranges(&self) -> Vec<BlockRange> {
        self.blocks.iter().map(Block::range).collect()
    }

    pub fn parameters(&self) -> &SolverParameters {
        &self.parameters
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Iterate until no cell moves by more than epsilon.
    pub fn run(&mut self) -> Result<SolveReport> {
        profiling::scope!("relax: run");
        let epsilon = self.parameters.epsilon;
        let start = Instant::now();
        let progress = match self.parameters.strategy {
            Strategy::Persistent => {
                coordinator::run(&self.grid, &self.blocks, epsilon)?
            }
            Strategy::ForkJoin => {
                fork_join::run(&self.grid, &self.blocks, epsilon)?
            }
            Strategy::Sequential => {
                sequential::run(&self.grid, &self.blocks, epsilon)
            }
        };
        let elapsed = start.elapsed();
        self.phase = Phase::Converged;

        tracing::info!(
            strategy = ?self.parameters.strategy,
            threads = self.blocks.len(),
            iterations = progress.iterations,
            merges = progress.merges,
            seconds = elapsed.as_secs_f64(),
            "converged"
        );
        Ok(SolveReport {
            progress,
            elapsed,
            phase: self.phase,
        })
    }

    pub fn into_grid(self) -> Grid {
        self.grid.to_grid()
    }
}

/// Relax `grid` to convergence and return the result.
pub fn solve(
    grid: &Grid,
    parameters: SolverParameters,
) -> Result<(Grid, SolveReport)> {
    let mut relaxation = Relaxation::new(grid, parameters)?;
    let report = relaxation.run()?;
    Ok((relaxation.into_grid(), report))
}
