use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, RelaxError>;

/// Everything that can stop a relaxation run.
/// All of these are raised before the workers start or after they finish,
/// the relaxation loop itself has no failure path.
#[derive(Debug, Error)]
pub enum RelaxError {
    #[error("invalid configuration: {0}")]
    Configuration(String),

    #[error(
        "cannot split a {size}x{size} grid across {threads} threads: \
         blocks of {block_size} cells leave the last block empty"
    )]
    Partition {
        size: usize,
        threads: usize,
        block_size: usize,
    },

    #[error("{}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{}:{line}:{column}: {message}", path.display())]
    Parse {
        path: PathBuf,
        line: usize,
        column: usize,
        message: String,
    },

    #[error("failed to write image {}: {source}", path.display())]
    Image {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("failed to build worker pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

impl RelaxError {
    pub fn configuration<S: Into<String>>(message: S) -> Self {
        RelaxError::Configuration(message.into())
    }

    pub fn io<P: Into<PathBuf>>(path: P, source: std::io::Error) -> Self {
        RelaxError::Io {
            path: path.into(),
            source,
        }
    }

    /// Partition failures are configuration problems too,
    /// both are caught before any thread is spawned.
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            RelaxError::Configuration(_) | RelaxError::Partition { .. }
        )
    }
}
