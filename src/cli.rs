use crate::build_info;
use crate::error::*;
use crate::grid::*;
use crate::partition::partition;
use crate::solver::*;
use clap::Parser;
use std::path::PathBuf;

/// Relax a square grid to the fixed point of the four neighbor average.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Args {
    /// Cells per side of the square grid, must be greater than 2.
    #[arg(short, long, required_unless_present("build_info"))]
    pub size: Option<usize>,

    /// Number of worker threads, one block each.
    #[arg(short = 'n', long, default_value = "1")]
    pub threads: usize,

    /// Stop once no cell changes by more than this between iterations.
    #[arg(short, long)]
    pub precision: Option<f64>,

    /// Alternative to --precision, stop at 10^-N.
    #[arg(long, conflicts_with("precision"))]
    pub decimal_places: Option<u32>,

    /// Grid file to load, rows of whitespace separated values.
    #[arg(short = 'f', long, conflicts_with("generate"))]
    pub input: Option<PathBuf>,

    /// File to write the converged grid to.
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Generate the grid: 1.0 on the top and left edges, 0.0 elsewhere.
    #[arg(short, long)]
    pub generate: bool,

    /// How workers are scheduled.
    #[arg(long, value_enum, default_value_t = Strategy::Persistent)]
    pub strategy: Strategy,

    /// Print the converged grid.
    #[arg(long)]
    pub print: bool,

    /// Print the partition and the seeded grid colored by block.
    #[arg(long)]
    pub print_blocks: bool,

    /// Write a heatmap of the converged grid to this PNG file.
    #[arg(long)]
    pub image: Option<PathBuf>,

    /// Print build information and quit
    #[arg(long)]
    pub build_info: bool,
}

impl Args {
    pub fn cli_setup(name: &str) -> Self {
        let args = Args::parse();

        if args.build_info {
            build_info::print_report(name);
            std::process::exit(0);
        }

        args
    }

    pub fn size(&self) -> Result<usize> {
        self.size
            .ok_or_else(|| RelaxError::configuration("--size is required"))
    }

    pub fn epsilon(&self) -> Result<f64> {
        match (self.precision, self.decimal_places) {
            (Some(p), _) => Ok(p),
            (None, Some(d)) => {
                Ok(SolverParameters::epsilon_from_decimal_places(d))
            }
            (None, None) => Err(RelaxError::configuration(
                "one of --precision or --decimal-places is required",
            )),
        }
    }

    /// Everything that can be checked without touching the filesystem,
    /// including whether the grid can be split across the threads.
    pub fn solver_parameters(&self) -> Result<SolverParameters> {
        let parameters = SolverParameters {
            threads: self.threads,
            epsilon: self.epsilon()?,
            strategy: self.strategy,
        };
        parameters.validate()?;
        partition(self.size()?, self.threads)?;
        if !self.generate && self.input.is_none() {
            return Err(RelaxError::configuration(
                "either --generate or --input is required",
            ));
        }
        Ok(parameters)
    }

    pub fn seed_grid(&self) -> Result<Grid> {
        let size = self.size()?;
        match &self.input {
            Some(path) if !self.generate => load_grid(path, size),
            _ => Grid::generate(size),
        }
    }
}
