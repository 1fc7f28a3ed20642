use serde::{Deserialize, Serialize};

/// What a cell holds underneath: a mine, or the number of mines around it.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Adjacency {
    Mine,
    Count(u8),
}

impl Adjacency {
    pub const fn is_mine(self) -> bool {
        matches!(self, Self::Mine)
    }
}

impl Default for Adjacency {
    fn default() -> Self {
        Self::Count(0)
    }
}

/// Canonical player-visible state stored by the gameplay engine.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum EngineCell {
    Hidden,
    Flagged,
    Revealed(u8),
    /// A mine that was revealed and ended the game.
    Exploded,
}

impl EngineCell {
    pub const fn is_unrevealed(self) -> bool {
        matches!(self, Self::Hidden | Self::Flagged)
    }

    pub const fn is_revealed(self) -> bool {
        !self.is_unrevealed()
    }
}

impl Default for EngineCell {
    fn default() -> Self {
        Self::Hidden
    }
}

/// Read-only snapshot of one cell, as handed to a presentation layer.
///
/// `is_mine` and `adjacent_mines` stay at their neutral values until the cell
/// is revealed, or, for mines, until the game is lost.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellView {
    pub revealed: bool,
    pub flagged: bool,
    pub is_mine: bool,
    pub adjacent_mines: u8,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_adjacency_is_zero() {
        assert_eq!(Adjacency::default(), Adjacency::Count(0));
        assert!(!Adjacency::default().is_mine());
        assert!(Adjacency::Mine.is_mine());
    }

    #[test]
    fn exploded_counts_as_revealed() {
        assert!(EngineCell::Exploded.is_revealed());
        assert!(EngineCell::Revealed(3).is_revealed());
        assert!(EngineCell::Flagged.is_unrevealed());
        assert!(EngineCell::Hidden.is_unrevealed());
    }
}
