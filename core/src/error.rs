use thiserror::Error;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Board needs at least one row and one column")]
    InvalidDimensions,
    #[error("Too many mines")]
    TooManyMines,
    #[error("Invalid coordinates")]
    InvalidCoords,
    #[error("Mines were already placed on this board")]
    MinesAlreadyPlaced,
    #[error("Unknown difficulty, expected beginner, intermediate or expert")]
    UnknownDifficulty,
}

pub type Result<T> = core::result::Result<T, GameError>;
