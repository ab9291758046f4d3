use alloc::collections::{BTreeSet, VecDeque};
use core::fmt;
use core::ops::{Index, IndexMut};
use ndarray::Array2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::*;

/// Result of revealing a single cell on a [`Board`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum RevealOutcome {
    /// The coordinates are off the grid, nothing changed.
    OutOfBounds,
    /// The cell was revealed before, nothing changed.
    AlreadyRevealed,
    /// The cell holds a mine, only that cell was revealed.
    HitMine,
    /// Safe cells newly revealed, the target plus any flood-filled cells.
    Revealed(CellCount),
}

impl RevealOutcome {
    pub const fn has_update(self) -> bool {
        use RevealOutcome::*;
        match self {
            OutOfBounds => false,
            AlreadyRevealed => false,
            HitMine => true,
            Revealed(_) => true,
        }
    }
}

/// Rectangular grid of cells with its mine layout.
///
/// Lifecycle: empty grid, mines placed once, adjacency computed once, then only
/// the revealed flags change, and only from hidden to revealed.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Board {
    cells: Array2<Cell>,
    mine_count: CellCount,
    mines_placed: bool,
}

impl Board {
    /// Fails when a side is not positive or the cell count would not fit a [`CellCount`].
    pub fn new((rows, columns): Coord2) -> Result<Self> {
        if checked_cell_count((rows, columns)).is_none() {
            return Err(GameError::InvalidDimensions);
        }

        Ok(Self {
            cells: Array2::default((rows, columns).to_nd_index()),
            mine_count: 0,
            mines_placed: false,
        })
    }

    /// Builds a board and lays out `config.mines` mines drawn from `rng`.
    pub fn generate<R: Rng + ?Sized>(config: GameConfig, rng: &mut R) -> Result<Self> {
        let mut board = Self::new(config.size)?;
        board.place_mines(config.mines, rng)?;
        board.compute_adjacency();
        Ok(board)
    }

    /// Builds a board with mines on exactly the listed cells, duplicates collapse.
    pub fn from_mine_coords(size: Coord2, mine_coords: &[Coord2]) -> Result<Self> {
        let mut board = Self::new(size)?;

        for &coords in mine_coords {
            let coords = board.validate_coords(coords)?;
            board[coords].is_mine = true;
        }

        let mine_count = to_cell_count(board.cells.iter().filter(|cell| cell.is_mine).count());
        if mine_count >= board.total_cells() {
            return Err(GameError::TooManyMines);
        }

        board.mine_count = mine_count;
        board.mines_placed = true;
        board.compute_adjacency();
        Ok(board)
    }

    /// Marks `mine_count` distinct cells as mines, sampling every row and column uniformly.
    ///
    /// A draw that lands on an existing mine is retried, which always terminates
    /// because at least one cell stays free.
    pub fn place_mines<R: Rng + ?Sized>(&mut self, mine_count: CellCount, rng: &mut R) -> Result<()> {
        if self.mines_placed {
            return Err(GameError::MinesAlreadyPlaced);
        }
        if mine_count >= self.total_cells() {
            return Err(GameError::TooManyMines);
        }

        let (rows, columns) = self.size();
        let mut placed = 0;
        while placed < mine_count {
            let coords = (rng.random_range(0..rows), rng.random_range(0..columns));
            let cell = &mut self[coords];
            if cell.is_mine {
                log::trace!("Mine already at {:?}, drawing again", coords);
                continue;
            }
            cell.is_mine = true;
            placed += 1;
        }

        self.mine_count = mine_count;
        self.mines_placed = true;
        log::debug!("Placed {} mines on a {}x{} board", mine_count, rows, columns);
        Ok(())
    }

    /// Stores, for every safe cell, how many of its existing neighbours are mines.
    pub fn compute_adjacency(&mut self) {
        let (rows, columns) = self.size();
        for row in 0..rows {
            for column in 0..columns {
                let coords = (row, column);
                if self[coords].is_mine {
                    continue;
                }
                let count = self.iter_neighbors(coords).filter(|&pos| self[pos].is_mine).count();
                // at most 8 neighbours
                self[coords].adjacent_mine_count = count as u8;
            }
        }
    }

    /// Reveals a cell, flood-filling outward from blank cells.
    ///
    /// A flood fill opens the whole connected region of blank cells reachable
    /// from the target together with the numbered cells bordering it. Only the
    /// resulting set and its size are observable, not the visiting order.
    pub fn reveal(&mut self, coords: Coord2) -> RevealOutcome {
        use RevealOutcome::*;

        if !self.contains(coords) {
            return OutOfBounds;
        }

        let cell = &mut self[coords];
        if cell.revealed {
            return AlreadyRevealed;
        }
        cell.revealed = true;

        if cell.is_mine {
            log::debug!("Revealed mine at {:?}", coords);
            return HitMine;
        }

        if cell.adjacent_mine_count > 0 {
            return Revealed(1);
        }

        Revealed(1 + self.flood_fill(coords))
    }

    /// Opens everything reachable from the blank cell at `origin`, returns how
    /// many cells it opened besides `origin` itself.
    fn flood_fill(&mut self, origin: Coord2) -> CellCount {
        let mut opened = 0;
        let mut visited = BTreeSet::from([origin]);
        let mut to_visit: VecDeque<_> = self
            .iter_neighbors(origin)
            .filter(|&pos| !self[pos].revealed)
            .collect();
        log::trace!(
            "Starting flood-fill from {:?}, initial neighbors: {:?}",
            origin,
            to_visit
        );

        while let Some(visit_coords) = to_visit.pop_front() {
            if !visited.insert(visit_coords) {
                continue;
            }

            let cell = &mut self[visit_coords];
            // mines are only reachable here if adjacency was never computed
            if cell.revealed || cell.is_mine {
                continue;
            }
            cell.revealed = true;
            opened += 1;

            if cell.adjacent_mine_count == 0 {
                let neighbors = self.iter_neighbors(visit_coords);
                to_visit.extend(
                    neighbors
                        .filter(|&pos| !self[pos].revealed)
                        .filter(|pos| !visited.contains(pos)),
                );
            }
        }

        log::debug!("Flood-fill from {:?} opened {} more cells", origin, opened);
        opened
    }

    pub fn validate_coords(&self, coords: Coord2) -> Result<Coord2> {
        if self.contains(coords) {
            Ok(coords)
        } else {
            Err(GameError::InvalidCoords)
        }
    }

    pub fn contains(&self, coords: Coord2) -> bool {
        in_bounds(coords, self.size())
    }

    pub fn size(&self) -> Coord2 {
        let (rows, columns) = self.cells.dim();
        (rows as Coord, columns as Coord)
    }

    pub fn rows(&self) -> Coord {
        self.size().0
    }

    pub fn columns(&self) -> Coord {
        self.size().1
    }

    pub fn mine_count(&self) -> CellCount {
        self.mine_count
    }

    pub fn total_cells(&self) -> CellCount {
        to_cell_count(self.cells.len())
    }

    pub fn safe_cell_count(&self) -> CellCount {
        self.total_cells() - self.mine_count
    }

    pub fn game_config(&self) -> GameConfig {
        GameConfig::new(self.size(), self.mine_count)
    }

    pub fn cell(&self, coords: Coord2) -> Option<Cell> {
        self.contains(coords).then(|| self[coords])
    }

    pub fn contains_mine(&self, coords: Coord2) -> bool {
        self.cell(coords).is_some_and(Cell::is_mine)
    }

    /// Revealed cells, a revealed mine included.
    pub fn revealed_count(&self) -> CellCount {
        to_cell_count(self.cells.iter().filter(|cell| cell.revealed).count())
    }

    /// Revealed cells that are not mines.
    pub fn revealed_safe_count(&self) -> CellCount {
        to_cell_count(
            self.cells
                .iter()
                .filter(|cell| cell.revealed && !cell.is_mine)
                .count(),
        )
    }

    /// Coordinates of every mine, row by row.
    pub fn mine_coords(&self) -> impl Iterator<Item = Coord2> + '_ {
        self.cells
            .indexed_iter()
            .filter(|(_, cell)| cell.is_mine)
            .map(|((row, column), _)| (row as Coord, column as Coord))
    }

    pub fn iter_neighbors(&self, coords: Coord2) -> NeighborIter {
        NeighborIter::new(coords, self.size())
    }
}

impl Index<Coord2> for Board {
    type Output = Cell;

    fn index(&self, coords: Coord2) -> &Self::Output {
        &self.cells[coords.to_nd_index()]
    }
}

impl IndexMut<Coord2> for Board {
    fn index_mut(&mut self, coords: Coord2) -> &mut Self::Output {
        &mut self.cells[coords.to_nd_index()]
    }
}

/// Dumps the hidden layout, `*` for mines, adjacent counts otherwise.
impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.cells.rows() {
            for cell in row {
                if cell.is_mine {
                    write!(f, "{:>3}", '*')?;
                } else {
                    write!(f, "{:>3}", cell.adjacent_mine_count)?;
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;
    use alloc::vec::Vec;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    fn layout(size: Coord2, mines: &[Coord2]) -> Board {
        Board::from_mine_coords(size, mines).unwrap()
    }

    #[test]
    fn new_rejects_invalid_dimensions() {
        assert_eq!(Board::new((0, 3)), Err(GameError::InvalidDimensions));
        assert_eq!(Board::new((3, 0)), Err(GameError::InvalidDimensions));
        assert_eq!(Board::new((-1, 4)), Err(GameError::InvalidDimensions));
        assert_eq!(
            Board::new((65536, 65536)),
            Err(GameError::InvalidDimensions)
        );
    }

    #[test]
    fn new_board_is_empty_and_hidden() {
        let board = Board::new((3, 4)).unwrap();

        assert_eq!(board.size(), (3, 4));
        assert_eq!(board.mine_count(), 0);
        for row in 0..3 {
            for column in 0..4 {
                assert_eq!(board[(row, column)], Cell::default());
            }
        }
    }

    #[test]
    fn place_mines_marks_exactly_the_requested_count() {
        let mut rng = SmallRng::seed_from_u64(7);
        let mut board = Board::new((9, 9)).unwrap();

        board.place_mines(80, &mut rng).unwrap();

        assert_eq!(board.mine_count(), 80);
        assert_eq!(board.mine_coords().count(), 80);
    }

    #[test]
    fn place_mines_rejects_full_board() {
        let mut rng = SmallRng::seed_from_u64(1);
        let mut board = Board::new((2, 2)).unwrap();

        assert_eq!(board.place_mines(4, &mut rng), Err(GameError::TooManyMines));
        assert_eq!(board.place_mines(5, &mut rng), Err(GameError::TooManyMines));
        assert_eq!(board.mine_coords().count(), 0);
    }

    #[test]
    fn place_mines_only_once() {
        let mut rng = SmallRng::seed_from_u64(1);
        let mut board = Board::new((3, 3)).unwrap();

        board.place_mines(2, &mut rng).unwrap();

        assert_eq!(
            board.place_mines(2, &mut rng),
            Err(GameError::MinesAlreadyPlaced)
        );
        assert_eq!(board.mine_count(), 2);
    }

    #[test]
    fn same_seed_builds_same_board() {
        let config = GameConfig::new((16, 30), 99);
        let a = Board::generate(config, &mut SmallRng::seed_from_u64(42)).unwrap();
        let b = Board::generate(config, &mut SmallRng::seed_from_u64(42)).unwrap();

        assert_eq!(a, b);
    }

    #[test]
    fn adjacency_excludes_missing_neighbors() {
        //  *  2  *
        //  1  2  1
        //  0  0  0
        let board = layout((3, 3), &[(0, 0), (0, 2)]);

        assert_eq!(board[(0, 1)].adjacent_mine_count(), 2);
        assert_eq!(board[(1, 0)].adjacent_mine_count(), 1);
        assert_eq!(board[(1, 1)].adjacent_mine_count(), 2);
        assert_eq!(board[(1, 2)].adjacent_mine_count(), 1);
        assert_eq!(board[(2, 1)].adjacent_mine_count(), 0);
    }

    #[test]
    fn adjacency_is_idempotent() {
        let mut board = layout((4, 4), &[(1, 1), (2, 3)]);
        let before = board.clone();

        board.compute_adjacency();

        assert_eq!(board, before);
    }

    #[test]
    fn from_mine_coords_validates_layout() {
        assert_eq!(
            Board::from_mine_coords((2, 2), &[(2, 0)]),
            Err(GameError::InvalidCoords)
        );
        assert_eq!(
            Board::from_mine_coords((1, 2), &[(0, 0), (0, 1)]),
            Err(GameError::TooManyMines)
        );
        assert_eq!(layout((2, 2), &[(0, 0), (0, 0)]).mine_count(), 1);
    }

    #[test]
    fn reveal_out_of_bounds_changes_nothing() {
        let mut board = layout((2, 2), &[(0, 0)]);
        let before = board.clone();

        assert_eq!(board.reveal((-1, 0)), RevealOutcome::OutOfBounds);
        assert_eq!(board.reveal((2, 0)), RevealOutcome::OutOfBounds);
        assert_eq!(board.reveal((0, 2)), RevealOutcome::OutOfBounds);
        assert_eq!(board, before);
    }

    #[test]
    fn reveal_numbered_cell_opens_only_that_cell() {
        let mut board = layout((3, 3), &[(0, 0)]);

        assert_eq!(board.reveal((1, 1)), RevealOutcome::Revealed(1));
        assert_eq!(board.revealed_count(), 1);
    }

    #[test]
    fn reveal_twice_is_a_no_op() {
        let mut board = layout((3, 3), &[(0, 0)]);

        board.reveal((1, 1));
        let before = board.clone();

        assert_eq!(board.reveal((1, 1)), RevealOutcome::AlreadyRevealed);
        assert_eq!(board, before);
    }

    #[test]
    fn reveal_mine_touches_only_the_mine() {
        let mut board = layout((3, 3), &[(0, 0)]);

        assert_eq!(board.reveal((0, 0)), RevealOutcome::HitMine);
        assert_eq!(board.revealed_count(), 1);
        assert_eq!(board.revealed_safe_count(), 0);
        assert!(board[(0, 0)].is_revealed());
    }

    #[test]
    fn reveal_blank_floods_region_and_border() {
        //  0  0  0  0
        //  1  1  0  0
        //  *  1  0  0
        //  1  1  0  0
        let mut board = layout((4, 4), &[(2, 0)]);

        assert_eq!(board.reveal((0, 3)), RevealOutcome::Revealed(14));
        assert!(!board[(2, 0)].is_revealed());
        assert!(board[(1, 0)].is_revealed());
        // numbered, but no blank neighbour exposes it
        assert!(!board[(3, 0)].is_revealed());
    }

    #[test]
    fn flood_stops_at_numbered_border() {
        //  0  2  *  2  0
        //  0  3  *  3  0
        //  0  2  *  2  0
        let mut board = layout((3, 5), &[(0, 2), (1, 2), (2, 2)]);

        assert_eq!(board.reveal((1, 0)), RevealOutcome::Revealed(6));
        let right_side: Vec<_> = (0..3)
            .flat_map(|row| [(row, 3), (row, 4)])
            .filter(|&pos| board[pos].is_revealed())
            .collect();
        assert!(right_side.is_empty());
    }

    #[test]
    fn flood_skips_already_revealed_cells() {
        let mut board = layout((1, 5), &[(0, 4)]);

        assert_eq!(board.reveal((0, 3)), RevealOutcome::Revealed(1));
        assert_eq!(board.reveal((0, 0)), RevealOutcome::Revealed(3));
        assert_eq!(board.revealed_count(), 4);
    }

    #[test]
    fn display_dumps_layout() {
        let board = layout((2, 3), &[(0, 1)]);

        assert_eq!(board.to_string(), "  1  *  1\n  1  1  1\n");
    }
}
