use crate::util::*;
use std::ops::Range;

/// Number of cells in a square grid with `size` cells per side.
pub fn buffer_size(size: usize) -> usize {
    size * size
}

/// `None` when the cell count does not fit in `usize`.
pub fn checked_buffer_size(size: usize) -> Option<usize> {
    size.checked_mul(size)
}

/// Number of cells strictly inside the outer ring.
pub fn interior_count(size: usize) -> usize {
    let inner = size.saturating_sub(2);
    inner * inner
}

/// Linear indices of rows `1..size - 1`, all columns.
/// Blocks are carved out of this span, it contains every interior cell
/// plus the edge cells at both ends of each inner row.
pub fn mutable_span(size: usize) -> Range<usize> {
    if size < 3 {
        return size..size;
    }
    size..buffer_size(size) - size
}

pub fn coord_in_grid(coord: &Coord, size: usize) -> bool {
    let size = size as i32;
    coord[0] >= 0 && coord[0] < size && coord[1] >= 0 && coord[1] < size
}

/// Row-major linear index for `coord`.
#[track_caller]
pub fn coord_to_linear(coord: &Coord, size: usize) -> usize {
    debug_assert!(
        coord_in_grid(coord, size),
        "{:?} is outside a {size}x{size} grid",
        coord
    );
    coord[0] as usize * size + coord[1] as usize
}

#[track_caller]
pub fn linear_to_coord(linear_index: usize, size: usize) -> Coord {
    debug_assert!(
        linear_index < buffer_size(size),
        "{linear_index} is outside a {size}x{size} grid"
    );
    vector![(linear_index / size) as i32, (linear_index % size) as i32]
}

/// Row 0, column 0, last row or last column.
pub fn is_boundary(coord: &Coord, size: usize) -> bool {
    let last = size as i32 - 1;
    coord[0] == 0 || coord[1] == 0 || coord[0] == last || coord[1] == last
}

/// True for column 0 and the last column.
/// These cells sit inside the mutable span but are never recomputed.
pub fn is_row_edge(linear_index: usize, size: usize) -> bool {
    let column = linear_index % size;
    column == 0 || column == size - 1
}

#[cfg(test)]
mod unit_tests {
    use super::*;

    #[test]
    fn buffer_size_test() {
        assert_eq!(buffer_size(4), 16);
        assert_eq!(interior_count(4), 4);
        assert_eq!(interior_count(10), 64);
        assert_eq!(interior_count(2), 0);
        assert_eq!(interior_count(1), 0);
        assert_eq!(checked_buffer_size(4), Some(16));
        assert_eq!(checked_buffer_size(usize::MAX / 2), None);
    }

    #[test]
    fn mutable_span_test() {
        assert_eq!(mutable_span(4), 4..12);
        assert_eq!(mutable_span(10), 10..90);
        assert!(mutable_span(2).is_empty());
    }

    #[test]
    fn coord_to_linear_index_test() {
        assert_eq!(coord_to_linear(&vector![0, 0], 20), 0);
        assert_eq!(coord_to_linear(&vector![5, 7], 20), 5 * 20 + 7);
        assert_eq!(coord_to_linear(&vector![3, 3], 4), 15);
    }

    #[test]
    fn linear_to_coord_test() {
        assert_eq!(linear_to_coord(67, 10), vector![6, 7]);
        assert_eq!(linear_to_coord(0, 10), vector![0, 0]);
        for i in 0..buffer_size(7) {
            assert_eq!(coord_to_linear(&linear_to_coord(i, 7), 7), i);
        }
    }

    #[test]
    fn edge_tests() {
        let size = 5;
        assert!(is_boundary(&vector![0, 2], size));
        assert!(is_boundary(&vector![2, 0], size));
        assert!(is_boundary(&vector![4, 2], size));
        assert!(is_boundary(&vector![2, 4], size));
        assert!(!is_boundary(&vector![2, 2], size));

        assert!(is_row_edge(5, size));
        assert!(is_row_edge(9, size));
        assert!(!is_row_edge(6, size));

        assert!(coord_in_grid(&vector![4, 4], size));
        assert!(!coord_in_grid(&vector![-1, 0], size));
        assert!(!coord_in_grid(&vector![0, 5], size));
    }
}
