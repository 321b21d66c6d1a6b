use crate::error::*;
use clap::ValueEnum;

/// How workers are scheduled across iterations.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum Strategy {
    /// Long lived worker threads synchronized by two barriers per iteration
    #[default]
    Persistent,

    /// Blocks are handed to a rayon pool every iteration, joined before merging
    ForkJoin,

    /// Blocks are relaxed one after another on the calling thread
    Sequential,
}

/// Everything a relaxation run is configured by,
/// apart from the grid itself.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct SolverParameters {
    /// Number of blocks, and worker threads for the parallel strategies.
    pub threads: usize,

    /// A cell has converged once it moves by no more than this per iteration.
    pub epsilon: f64,

    pub strategy: Strategy,
}

impl std::default::Default for SolverParameters {
    fn default() -> Self {
        SolverParameters {
            threads: 1,
            epsilon: 0.001,
            strategy: Strategy::default(),
        }
    }
}

impl SolverParameters {
    /// Epsilon of `10^-decimal_places`.
    pub fn epsilon_from_decimal_places(decimal_places: u32) -> f64 {
        10f64.powi(-(decimal_places as i32))
    }

    /// Checks that do not depend on the grid size.
    pub fn validate(&self) -> Result<()> {
        if !(self.epsilon.is_finite() && self.epsilon > 0.0) {
            return Err(RelaxError::configuration(format!(
                "precision must be a positive number, got {}",
                self.epsilon
            )));
        }
        if self.threads == 0 {
            return Err(RelaxError::configuration(
                "thread count must be at least 1",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod unit_tests {
    use super::*;
    use float_cmp::assert_approx_eq;

    #[test]
    fn validate_test() {
        assert!(SolverParameters::default().validate().is_ok());

        let mut p = SolverParameters::default();
        p.epsilon = 0.0;
        assert!(p.validate().unwrap_err().is_configuration());
        p.epsilon = f64::NAN;
        assert!(p.validate().is_err());
        p.epsilon = -1.0;
        assert!(p.validate().is_err());

        let p = SolverParameters {
            threads: 0,
            ..Default::default()
        };
        assert!(p.validate().is_err());
    }

    #[test]
    fn decimal_places_test() {
        assert_approx_eq!(
            f64,
            SolverParameters::epsilon_from_decimal_places(3),
            0.001,
            epsilon = 1e-15
        );
        assert_approx_eq!(
            f64,
            SolverParameters::epsilon_from_decimal_places(0),
            1.0
        );
    }
}
