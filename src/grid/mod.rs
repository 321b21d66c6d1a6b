//! The square grid being relaxed.
//! `Grid` owns plain values and is what gets seeded, loaded and written.
//! `SharedGrid` holds the same values in cells that workers can read
//! while the coordinator writes between barriers.
//! Both are inspected through `GridView`.

mod debug_io;
mod shared;
mod text;

pub use debug_io::*;
pub use shared::*;
pub use text::*;

use crate::error::*;
use crate::util::*;

/// Value of row 0 and column 0.
pub const HIGH_BOUNDARY: f64 = 1.0;

/// Value of the last row and last column.
pub const LOW_BOUNDARY: f64 = 0.0;

/// Seed value for a generated grid, row 0 / column 0 win at the corners.
pub fn seed_value(coord: &Coord) -> f64 {
    if coord[0] == 0 || coord[1] == 0 {
        HIGH_BOUNDARY
    } else {
        // Last row, last column and interior all start at zero.
        LOW_BOUNDARY
    }
}

/// Read-only access to grid values.
pub trait GridView: Sync {
    /// Cells per side.
    fn size(&self) -> usize;

    fn value_linear(&self, linear_index: usize) -> f64;

    #[track_caller]
    fn view(&self, coord: &Coord) -> f64 {
        self.value_linear(coord_to_linear(coord, self.size()))
    }

    /// Arithmetic mean of the north, south, west and east neighbors.
    /// Only meaningful for interior cells.
    #[inline]
    fn neighbor_mean(&self, linear_index: usize) -> f64 {
        let size = self.size();
        debug_assert!(
            !is_boundary(&linear_to_coord(linear_index, size), size),
            "{linear_index} is not an interior cell"
        );
        (self.value_linear(linear_index - size)
            + self.value_linear(linear_index + size)
            + self.value_linear(linear_index - 1)
            + self.value_linear(linear_index + 1))
            / 4.0
    }

    fn to_vec(&self) -> Vec<f64> {
        (0..buffer_size(self.size()))
            .map(|i| self.value_linear(i))
            .collect()
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Grid {
    size: usize,
    values: Vec<f64>,
}

/// A grid needs an interior, and its cell count has to fit in `usize`.
pub fn check_size(size: usize) -> Result<()> {
    if size < 3 {
        return Err(RelaxError::configuration(format!(
            "grid size must be greater than 2, got {size}"
        )));
    }
    if checked_buffer_size(size).is_none() {
        return Err(RelaxError::configuration(format!(
            "grid size {size} is too large"
        )));
    }
    Ok(())
}

impl Grid {
    /// Boundary of 1.0 on the top and left edges, 0.0 everywhere else.
    pub fn generate(size: usize) -> Result<Self> {
        check_size(size)?;
        let values = (0..buffer_size(size))
            .map(|i| seed_value(&linear_to_coord(i, size)))
            .collect();
        Ok(Grid { size, values })
    }

    /// Wrap row-major values, e.g. from a loaded file.
    pub fn from_values(size: usize, values: Vec<f64>) -> Result<Self> {
        check_size(size)?;
        if values.len() != buffer_size(size) {
            return Err(RelaxError::configuration(format!(
                "a {size}x{size} grid needs {} values, got {}",
                buffer_size(size),
                values.len()
            )));
        }
        Ok(Grid { size, values })
    }

    pub fn buffer(&self) -> &[f64] {
        &self.values
    }

    pub fn into_values(self) -> Vec<f64> {
        self.values
    }

    #[track_caller]
    pub fn set(&mut self, coord: &Coord, value: f64) {
        let index = coord_to_linear(coord, self.size);
        self.values[index] = value;
    }

    /// Coordinates of every interior cell in linear ordering.
    pub fn interior_coords(&self) -> impl Iterator<Item = Coord> + '_ {
        (0..buffer_size(self.size))
            .map(|i| linear_to_coord(i, self.size))
            .filter(|c| !is_boundary(c, self.size))
    }
}

impl GridView for Grid {
    fn size(&self) -> usize {
        self.size
    }

    #[inline]
    fn value_linear(&self, linear_index: usize) -> f64 {
        self.values[linear_index]
    }
}

#[cfg(test)]
mod unit_tests {
    use super::*;
    use float_cmp::assert_approx_eq;

    #[test]
    fn generate_test() {
        let grid = Grid::generate(4).unwrap();
        assert_eq!(grid.size(), 4);
        let expected = [
            1.0, 1.0, 1.0, 1.0, //
            1.0, 0.0, 0.0, 0.0, //
            1.0, 0.0, 0.0, 0.0, //
            1.0, 0.0, 0.0, 0.0,
        ];
        for (v, e) in grid.buffer().iter().zip(expected) {
            assert_approx_eq!(f64, *v, e);
        }
    }

    #[test]
    fn generate_rejects_small() {
        assert!(Grid::generate(2).unwrap_err().is_configuration());
        assert!(Grid::generate(0).is_err());
        assert!(Grid::generate(3).is_ok());
        assert!(Grid::generate(usize::MAX / 2)
            .unwrap_err()
            .is_configuration());
    }

    #[test]
    fn from_values_checks_length() {
        assert!(Grid::from_values(3, vec![0.0; 8]).is_err());
        let grid = Grid::from_values(3, vec![0.5; 9]).unwrap();
        assert_approx_eq!(f64, grid.view(&vector![1, 1]), 0.5);
    }

    #[test]
    fn neighbor_mean_test() {
        let mut grid = Grid::generate(4).unwrap();
        // (1, 1) sees 1.0 above and to the left.
        assert_approx_eq!(f64, grid.neighbor_mean(5), 0.5);
        grid.set(&vector![2, 2], 2.0);
        assert_approx_eq!(f64, grid.neighbor_mean(6), 0.75);
    }

    #[test]
    fn interior_coords_test() {
        let grid = Grid::generate(5).unwrap();
        let coords: Vec<Coord> = grid.interior_coords().collect();
        assert_eq!(coords.len(), interior_count(5));
        assert_eq!(coords[0], vector![1, 1]);
        assert_eq!(coords[8], vector![3, 3]);
    }
}
