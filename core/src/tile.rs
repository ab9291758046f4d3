use serde::{Deserialize, Serialize};

/// One grid position as the engine stores it.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    pub(crate) is_mine: bool,
    pub(crate) adjacent_mine_count: u8,
    pub(crate) revealed: bool,
}

impl Cell {
    pub const fn is_mine(self) -> bool {
        self.is_mine
    }

    /// Mines among the existing neighbours, meaningless for a mine cell.
    pub const fn adjacent_mine_count(self) -> u8 {
        self.adjacent_mine_count
    }

    pub const fn is_revealed(self) -> bool {
        self.revealed
    }

    /// Non-mine cell without any adjacent mine.
    pub const fn is_blank(self) -> bool {
        !self.is_mine && self.adjacent_mine_count == 0
    }
}

/// Canonical player-visible state of a cell.
///
/// Hidden cells carry no payload, so nothing about an unrevealed mine can leak
/// to whoever draws the board.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum CellView {
    #[default]
    Hidden,
    Revealed(u8),
    Mine,
}

impl CellView {
    pub const fn is_revealed(self) -> bool {
        !matches!(self, Self::Hidden)
    }

    pub const fn is_mine(self) -> bool {
        matches!(self, Self::Mine)
    }

    pub const fn adjacent_mine_count(self) -> Option<u8> {
        match self {
            Self::Revealed(count) => Some(count),
            _ => None,
        }
    }
}

impl From<Cell> for CellView {
    fn from(cell: Cell) -> Self {
        match (cell.revealed, cell.is_mine) {
            (false, _) => Self::Hidden,
            (true, true) => Self::Mine,
            (true, false) => Self::Revealed(cell.adjacent_mine_count),
        }
    }
}
