/// Single coordinate axis used for board rows, columns, and positions.
///
/// Signed so that requests falling off the grid can be expressed and rejected.
pub type Coord = i32;

/// Count type used for mine counts and total-cell counts.
pub type CellCount = u32;

/// Two-dimensional coordinates `(row, column)`.
pub type Coord2 = (Coord, Coord);

pub trait ToNdIndex {
    type Output;
    fn to_nd_index(self) -> Self::Output;
}

impl ToNdIndex for Coord2 {
    type Output = [usize; 2];

    /// Only meaningful for coordinates already checked against the grid size.
    fn to_nd_index(self) -> Self::Output {
        [self.0 as usize, self.1 as usize]
    }
}

/// Number of cells in a `a × b` grid, zero when either side is not positive.
pub const fn mult(a: Coord, b: Coord) -> CellCount {
    if a <= 0 || b <= 0 {
        return 0;
    }
    let a = a as CellCount;
    let b = b as CellCount;
    a.saturating_mul(b)
}

/// Number of cells in a grid of `size`, `None` when a side is not positive or
/// the count does not fit a [`CellCount`].
pub const fn checked_cell_count(size: Coord2) -> Option<CellCount> {
    if size.0 <= 0 || size.1 <= 0 {
        return None;
    }
    (size.0 as CellCount).checked_mul(size.1 as CellCount)
}

/// Converts a cell tally, saturating instead of wrapping.
pub(crate) fn to_cell_count(count: usize) -> CellCount {
    CellCount::try_from(count).unwrap_or(CellCount::MAX)
}

/// Whether `coords` lies inside a grid of the given `size`.
pub const fn in_bounds(coords: Coord2, size: Coord2) -> bool {
    coords.0 >= 0 && coords.0 < size.0 && coords.1 >= 0 && coords.1 < size.1
}

const DISPLACEMENTS: [(Coord, Coord); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// Applies `delta` to `coords`, returning a value only when it remains in bounds.
fn apply_delta(coords: Coord2, delta: (Coord, Coord), bounds: Coord2) -> Option<Coord2> {
    let next = (
        coords.0.checked_add(delta.0)?,
        coords.1.checked_add(delta.1)?,
    );
    in_bounds(next, bounds).then_some(next)
}

/// Iterates the up to 8 neighbours of a cell that exist on the grid.
#[derive(Debug)]
pub struct NeighborIter {
    center: Coord2,
    bounds: Coord2,
    index: u8,
}

impl NeighborIter {
    pub fn new(center: Coord2, bounds: Coord2) -> Self {
        Self {
            center,
            bounds,
            index: 0,
        }
    }
}

impl Iterator for NeighborIter {
    type Item = Coord2;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if usize::from(self.index) >= DISPLACEMENTS.len() {
                return None;
            }

            let next_item =
                apply_delta(self.center, DISPLACEMENTS[self.index as usize], self.bounds);
            self.index += 1;

            if next_item.is_some() {
                return next_item;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;

    #[test]
    fn corner_has_three_neighbors() {
        let neighbors: Vec<_> = NeighborIter::new((0, 0), (3, 3)).collect();
        assert_eq!(neighbors, [(0, 1), (1, 0), (1, 1)]);
    }

    #[test]
    fn edge_has_five_neighbors() {
        assert_eq!(NeighborIter::new((0, 1), (3, 3)).count(), 5);
        assert_eq!(NeighborIter::new((1, 2), (3, 3)).count(), 5);
    }

    #[test]
    fn interior_has_eight_neighbors() {
        assert_eq!(NeighborIter::new((1, 1), (3, 3)).count(), 8);
    }

    #[test]
    fn single_cell_has_no_neighbors() {
        assert_eq!(NeighborIter::new((0, 0), (1, 1)).count(), 0);
    }

    #[test]
    fn mult_rejects_non_positive_sides() {
        assert_eq!(mult(16, 30), 480);
        assert_eq!(mult(0, 5), 0);
        assert_eq!(mult(-3, 5), 0);
    }

    #[test]
    fn checked_cell_count_rejects_overflow() {
        assert_eq!(checked_cell_count((16, 30)), Some(480));
        assert_eq!(checked_cell_count((0, 30)), None);
        assert_eq!(checked_cell_count((65536, 65536)), None);
        assert_eq!(checked_cell_count((65536, 65535)), Some(65536 * 65535));
    }

    #[test]
    fn in_bounds_checks_both_axes() {
        assert!(in_bounds((0, 0), (2, 1)));
        assert!(in_bounds((1, 0), (2, 1)));
        assert!(!in_bounds((-1, 0), (2, 1)));
        assert!(!in_bounds((2, 0), (2, 1)));
        assert!(!in_bounds((0, 1), (2, 1)));
    }
}
