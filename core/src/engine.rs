use alloc::vec::Vec;
use core::num::Saturating;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::*;

/// Valid transitions:
/// - Playing -> Won
/// - Playing -> Lost
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameStatus {
    #[default]
    Playing,
    Won,
    Lost,
}

impl GameStatus {
    pub const fn is_playing(self) -> bool {
        matches!(self, Self::Playing)
    }

    /// Won and lost are absorbing, no further reveal changes the board.
    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

/// A board plus the status of the game played on it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Game {
    board: Board,
    status: GameStatus,
    revealed_count: Saturating<CellCount>,
    triggered_mine: Option<Coord2>,
}

impl Game {
    /// Builds a freshly mined board from `config`, drawing mines from `rng`.
    pub fn new<R: Rng + ?Sized>(config: GameConfig, rng: &mut R) -> Result<Self> {
        Ok(Self::from_board(Board::generate(config, rng)?))
    }

    pub fn generate(config: GameConfig, generator: impl BoardGenerator) -> Result<Self> {
        Ok(Self::from_board(generator.generate(config)?))
    }

    /// Wraps a prepared board, taking over any cells it already has revealed.
    pub fn from_board(board: Board) -> Self {
        let revealed_count = board.revealed_safe_count();
        let triggered_mine = board.mine_coords().find(|&coords| board[coords].is_revealed());
        let status = if triggered_mine.is_some() {
            GameStatus::Lost
        } else if revealed_count == board.safe_cell_count() {
            GameStatus::Won
        } else {
            GameStatus::Playing
        };

        Self {
            board,
            status,
            revealed_count: Saturating(revealed_count),
            triggered_mine,
        }
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn is_finished(&self) -> bool {
        self.status.is_finished()
    }

    /// `(rows, columns, mine_count)`.
    pub fn dimensions(&self) -> (Coord, Coord, CellCount) {
        let (rows, columns) = self.board.size();
        (rows, columns, self.board.mine_count())
    }

    pub fn size(&self) -> Coord2 {
        self.board.size()
    }

    pub fn total_mines(&self) -> CellCount {
        self.board.mine_count()
    }

    pub fn config(&self) -> GameConfig {
        self.board.game_config()
    }

    pub fn revealed_count(&self) -> CellCount {
        self.revealed_count.0
    }

    pub fn remaining_safe_cells(&self) -> CellCount {
        self.board.safe_cell_count().saturating_sub(self.revealed_count.0)
    }

    /// The mine whose reveal lost the game.
    pub fn triggered_mine(&self) -> Option<Coord2> {
        self.triggered_mine
    }

    /// Player-visible state of a cell, `None` off the grid.
    pub fn cell_view(&self, coords: Coord2) -> Option<CellView> {
        self.board.cell(coords).map(CellView::from)
    }

    /// Every mine on the board, only handed out once the game is over.
    pub fn mine_coords(&self) -> Option<Vec<Coord2>> {
        self.is_finished()
            .then(|| self.board.mine_coords().collect())
    }

    /// Reveals the cell at `coords` and returns the status after all of its consequences.
    ///
    /// Off-grid and already revealed cells leave the game untouched, as does
    /// any request after the game has finished.
    pub fn reveal_cell(&mut self, coords: Coord2) -> GameStatus {
        use RevealOutcome::*;

        if self.status.is_finished() {
            log::trace!("Game already ended, ignoring reveal at {:?}", coords);
            return self.status;
        }

        match self.board.reveal(coords) {
            outcome @ (OutOfBounds | AlreadyRevealed) => {
                log::trace!("Reveal at {:?} ignored: {:?}", coords, outcome);
            }
            HitMine => {
                self.triggered_mine = Some(coords);
                self.end_game(GameStatus::Lost);
            }
            Revealed(count) => {
                self.revealed_count += count;
                if self.revealed_count.0 == self.board.safe_cell_count() {
                    self.end_game(GameStatus::Won);
                }
            }
        }

        self.status
    }

    fn end_game(&mut self, status: GameStatus) {
        if self.status.is_finished() {
            return;
        }
        self.status = status;
        log::debug!(
            "Game ended {:?} with {} of {} safe cells revealed",
            status,
            self.revealed_count.0,
            self.board.safe_cell_count()
        );
    }

    pub(crate) fn board(&self) -> &Board {
        &self.board
    }
}
