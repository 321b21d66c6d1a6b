mod indexing;

pub use indexing::*;
pub use nalgebra::vector;

/// `[row, column]` position in a grid.
/// Signed so that neighbor offsets can be added before bounds checks.
pub type Coord = nalgebra::Vector2<i32>;
