use thiserror::Error;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Invalid coordinates")]
    InvalidCoords,
    #[error("Board must have at least one column and one row")]
    EmptyBoard,
    #[error("Board must have at least one mine")]
    NoMines,
    #[error("Too many mines, at least one cell must stay safe")]
    TooManyMines,
    #[error("Mine layout does not match the board configuration")]
    LayoutMismatch,
    #[error("Mines were already placed on this board")]
    MinesAlreadyPlaced,
    #[error("Mines have not been placed yet")]
    MinesNotPlaced,
    #[error("Unknown difficulty")]
    UnknownDifficulty,
    #[error("Game already ended, no new moves are accepted")]
    AlreadyEnded,
}

pub type Result<T> = core::result::Result<T, GameError>;
