pub mod build_info;
pub mod cli;
pub mod error;
pub mod grid;
pub mod image;
pub mod partition;
pub mod solver;
pub mod util;
pub mod worker;

pub use error::{RelaxError, Result};
