use thiserror::Error;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Invalid coordinates")]
    InvalidCoords,
    #[error("Too many mines, at least one cell must stay safe")]
    TooManyMines,
    #[error("Board must have at least one row and one column")]
    EmptyBoard,
}

impl GameError {
    /// Whether the error rejects a board configuration rather than a move.
    pub const fn is_invalid_config(self) -> bool {
        matches!(self, Self::TooManyMines | Self::EmptyBoard)
    }
}

pub type Result<T> = core::result::Result<T, GameError>;
