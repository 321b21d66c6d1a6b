use super::*;
use std::sync::atomic::{AtomicU64, Ordering};

/// Fixed length buffer of `f64` that can be shared between threads.
///
/// Values are stored as bits in `AtomicU64` and every access is `Relaxed`.
/// Callers separate readers and writers into phases with a barrier,
/// which is what orders the accesses. There is never more than one writer
/// for a given cell in a phase.
pub struct SharedCells {
    cells: Box<[AtomicU64]>,
}

impl SharedCells {
    pub fn new(len: usize) -> Self {
        SharedCells {
            cells: (0..len).map(|_| AtomicU64::new(0.0f64.to_bits())).collect(),
        }
    }

    pub fn from_slice(values: &[f64]) -> Self {
        SharedCells {
            cells: values
                .iter()
                .map(|v| AtomicU64::new(v.to_bits()))
                .collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    #[inline]
    pub fn load(&self, index: usize) -> f64 {
        f64::from_bits(self.cells[index].load(Ordering::Relaxed))
    }

    #[inline]
    pub fn store(&self, index: usize, value: f64) {
        self.cells[index].store(value.to_bits(), Ordering::Relaxed);
    }

    pub fn to_vec(&self) -> Vec<f64> {
        (0..self.len()).map(|i| self.load(i)).collect()
    }
}

impl std::fmt::Debug for SharedCells {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.to_vec()).finish()
    }
}

/// Grid used while relaxing.
/// Workers read it during the compute phase, the coordinator writes
/// interior cells during the merge phase.
#[derive(Debug)]
pub struct SharedGrid {
    size: usize,
    cells: SharedCells,
}

impl SharedGrid {
    pub fn from_grid(grid: &Grid) -> Self {
        SharedGrid {
            size: grid.size(),
            cells: SharedCells::from_slice(grid.buffer()),
        }
    }

    /// Only the merge phase calls this.
    #[inline]
    pub(crate) fn store(&self, linear_index: usize, value: f64) {
        debug_assert!(
            !is_boundary(&linear_to_coord(linear_index, self.size), self.size),
            "boundary cell {linear_index} written"
        );
        self.cells.store(linear_index, value);
    }

    pub fn to_grid(&self) -> Grid {
        Grid {
            size: self.size,
            values: self.cells.to_vec(),
        }
    }
}

impl GridView for SharedGrid {
    fn size(&self) -> usize {
        self.size
    }

    #[inline]
    fn value_linear(&self, linear_index: usize) -> f64 {
        self.cells.load(linear_index)
    }
}

#[cfg(test)]
mod unit_tests {
    use super::*;
    use float_cmp::assert_approx_eq;

    #[test]
    fn cells_store_load() {
        let cells = SharedCells::new(3);
        assert_eq!(cells.len(), 3);
        assert_approx_eq!(f64, cells.load(1), 0.0);
        cells.store(1, -2.5);
        assert_approx_eq!(f64, cells.load(1), -2.5);
        assert_eq!(cells.to_vec(), vec![0.0, -2.5, 0.0]);
    }

    #[test]
    fn shared_grid_matches_grid() {
        let grid = Grid::generate(5).unwrap();
        let shared = SharedGrid::from_grid(&grid);
        assert_eq!(shared.size(), 5);
        for i in 0..buffer_size(5) {
            assert_approx_eq!(
                f64,
                shared.value_linear(i),
                grid.value_linear(i)
            );
        }

        shared.store(coord_to_linear(&vector![2, 2], 5), 0.25);
        let back = shared.to_grid();
        assert_approx_eq!(f64, back.view(&vector![2, 2]), 0.25);
        assert_approx_eq!(f64, back.view(&vector![0, 2]), 1.0);
    }
}
