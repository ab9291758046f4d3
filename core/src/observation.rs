use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

/// Whole-board snapshot of what a player is allowed to see.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    pub size: Coord2,
    pub mine_count: CellCount,
    pub status: GameStatus,
    pub revealed_count: CellCount,
    pub cells: Array2<CellView>,
}

impl Observation {
    pub fn from_game(game: &Game) -> Self {
        let board = game.board();
        let size = board.size();
        let mut cells = Array2::from_elem(size.to_nd_index(), CellView::Hidden);

        let (rows, columns) = size;
        for row in 0..rows {
            for column in 0..columns {
                let coords = (row, column);
                cells[coords.to_nd_index()] = CellView::from(board[coords]);
            }
        }

        Self {
            size,
            mine_count: game.total_mines(),
            status: game.status(),
            revealed_count: game.revealed_count(),
            cells,
        }
    }

    pub fn cell_at(&self, coords: Coord2) -> Option<CellView> {
        in_bounds(coords, self.size).then(|| self.cells[coords.to_nd_index()])
    }

    /// Cells a player could still reveal, row by row.
    pub fn hidden_coords(&self) -> impl Iterator<Item = Coord2> + '_ {
        self.cells
            .indexed_iter()
            .filter(|(_, cell)| !cell.is_revealed())
            .map(|((row, column), _)| (row as Coord, column as Coord))
    }
}

impl Game {
    pub fn observe(&self) -> Observation {
        Observation::from_game(self)
    }
}
