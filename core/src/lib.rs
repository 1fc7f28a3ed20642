#![no_std]

extern crate alloc;

use core::ops::Index;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

pub use engine::*;
pub use error::*;
pub use generator::*;
pub use tile::*;
pub use types::*;

mod engine;
mod error;
mod generator;
mod tile;
mod types;

/// Board shape and mine count.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    /// `(rows, cols)`
    pub size: Coord2,
    pub mines: CellCount,
}

impl GameConfig {
    pub const DEFAULT: Self = Self::new_unchecked((10, 10), 10);

    pub const fn new_unchecked(size: Coord2, mines: CellCount) -> Self {
        Self { size, mines }
    }

    pub fn new(size: Coord2, mines: CellCount) -> Result<Self> {
        let config = Self::new_unchecked(size, mines);
        config.validate()?;
        Ok(config)
    }

    /// Checks the board is non-empty and leaves at least one safe cell.
    pub fn validate(&self) -> Result<()> {
        if self.size.0 == 0 || self.size.1 == 0 {
            return Err(GameError::EmptyBoard);
        }
        if self.mines >= self.total_cells() {
            return Err(GameError::TooManyMines);
        }
        Ok(())
    }

    pub const fn rows(&self) -> Coord {
        self.size.0
    }

    pub const fn cols(&self) -> Coord {
        self.size.1
    }

    pub const fn total_cells(&self) -> CellCount {
        mult(self.size.0, self.size.1)
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Where the mines are, together with every cell's precomputed adjacency.
///
/// Always validated on construction, so it never holds more mines than cells:
///
/// ```compile_fail
/// fn from_serialized<T: serde::de::DeserializeOwned>() {}
/// from_serialized::<minefield_core::MineLayout>();
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct MineLayout {
    adjacency: Array2<Adjacency>,
    mine_count: CellCount,
}

impl MineLayout {
    /// Builds the layout from a mask whose shape came from a `Coord2` size.
    pub(crate) fn from_mine_mask(mine_mask: &Array2<bool>) -> Result<Self> {
        let size = dim_to_size(mine_mask.dim());
        let mine_count = mine_mask.iter().filter(|&&is_mine| is_mine).count();
        let mine_count = CellCount::try_from(mine_count).map_err(|_| GameError::TooManyMines)?;
        GameConfig::new(size, mine_count)?;

        let adjacency = Array2::from_shape_fn(mine_mask.dim(), |(row, col)| {
            if mine_mask[(row, col)] {
                Adjacency::Mine
            } else {
                let count = mine_mask
                    .iter_neighbors(dim_to_size((row, col)))
                    .filter(|&pos| mine_mask[pos.to_nd_index()])
                    .count();
                // at most eight neighbors
                Adjacency::Count(count as u8)
            }
        });

        Ok(Self {
            adjacency,
            mine_count,
        })
    }

    /// Builds a fixed layout, mostly useful for scripted games and tests.
    ///
    /// Repeated coordinates count as a single mine.
    pub fn from_mine_coords(size: Coord2, mine_coords: &[Coord2]) -> Result<Self> {
        if size.0 == 0 || size.1 == 0 {
            return Err(GameError::EmptyBoard);
        }
        let mut mine_mask: Array2<bool> = Array2::default(size.to_nd_index());

        for &coords in mine_coords {
            if coords.0 >= size.0 || coords.1 >= size.1 {
                return Err(GameError::InvalidCoords);
            }
            mine_mask[coords.to_nd_index()] = true;
        }

        Self::from_mine_mask(&mine_mask)
    }

    pub fn game_config(&self) -> GameConfig {
        GameConfig::new_unchecked(self.size(), self.mine_count)
    }

    pub fn validate_coords(&self, coords: Coord2) -> Result<Coord2> {
        let size = self.size();
        if coords.0 < size.0 && coords.1 < size.1 {
            Ok(coords)
        } else {
            Err(GameError::InvalidCoords)
        }
    }

    pub fn size(&self) -> Coord2 {
        dim_to_size(self.adjacency.dim())
    }

    pub fn safe_cell_count(&self) -> CellCount {
        self.total_cells() - self.mine_count
    }

    pub fn total_cells(&self) -> CellCount {
        let (rows, cols) = self.size();
        mult(rows, cols)
    }

    pub fn mine_count(&self) -> CellCount {
        self.mine_count
    }

    pub fn contains_mine(&self, coords: Coord2) -> bool {
        self[coords].is_mine()
    }

    pub fn adjacency(&self, coords: Coord2) -> Adjacency {
        self[coords]
    }

    pub fn iter_mines(&self) -> impl Iterator<Item = Coord2> + '_ {
        iter_coords(self.size()).filter(|&coords| self.contains_mine(coords))
    }

    pub(crate) fn iter_neighbors(&self, coords: Coord2) -> NeighborIter {
        self.adjacency.iter_neighbors(coords)
    }
}

impl Index<Coord2> for MineLayout {
    type Output = Adjacency;

    fn index(&self, coords: Coord2) -> &Self::Output {
        &self.adjacency[coords.to_nd_index()]
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum MarkOutcome {
    NoChange,
    Changed,
}

impl MarkOutcome {
    pub const fn has_update(self) -> bool {
        match self {
            Self::NoChange => false,
            Self::Changed => true,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum RevealOutcome {
    NoChange,
    Revealed,
    HitMine,
    Won,
}

impl RevealOutcome {
    pub const fn has_update(self) -> bool {
        use RevealOutcome::*;
        match self {
            NoChange => false,
            Revealed => true,
            HitMine => true,
            Won => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;

    #[test]
    fn config_rejects_full_board() {
        assert_eq!(GameConfig::new((2, 2), 4), Err(GameError::TooManyMines));
        assert_eq!(GameConfig::new((2, 2), 5), Err(GameError::TooManyMines));
        assert!(GameConfig::new((2, 2), 3).is_ok());
    }

    #[test]
    fn config_rejects_empty_board() {
        assert_eq!(GameConfig::new((0, 5), 0), Err(GameError::EmptyBoard));
        assert_eq!(GameConfig::new((5, 0), 0), Err(GameError::EmptyBoard));
        assert!(GameError::EmptyBoard.is_invalid_config());
        assert!(!GameError::InvalidCoords.is_invalid_config());
    }

    #[test]
    fn default_config_is_ten_by_ten() {
        let config = GameConfig::default();

        assert_eq!(config.size, (10, 10));
        assert_eq!(config.mines, 10);
        assert_eq!(config.total_cells(), 100);
    }

    #[test]
    fn layout_precomputes_adjacency() {
        // * . .
        // . . .
        // . . *
        let layout = MineLayout::from_mine_coords((3, 3), &[(0, 0), (2, 2)]).unwrap();

        assert_eq!(layout[(0, 0)], Adjacency::Mine);
        assert_eq!(layout[(1, 1)], Adjacency::Count(2));
        assert_eq!(layout[(0, 1)], Adjacency::Count(1));
        assert_eq!(layout[(0, 2)], Adjacency::Count(0));
        assert_eq!(layout[(2, 0)], Adjacency::Count(0));
        assert_eq!(layout.mine_count(), 2);
        assert_eq!(layout.safe_cell_count(), 7);
    }

    #[test]
    fn layout_uses_row_major_coordinates() {
        let layout = MineLayout::from_mine_coords((2, 4), &[(1, 3)]).unwrap();

        assert_eq!(layout.size(), (2, 4));
        assert!(layout.contains_mine((1, 3)));
        assert_eq!(layout.adjacency((0, 2)), Adjacency::Count(1));
        assert_eq!(layout.adjacency((0, 0)), Adjacency::Count(0));
        assert_eq!(layout.iter_mines().collect::<Vec<_>>(), [(1, 3)]);
    }

    #[test]
    fn layout_rejects_bad_input() {
        assert_eq!(
            MineLayout::from_mine_coords((2, 2), &[(2, 0)]),
            Err(GameError::InvalidCoords)
        );
        assert_eq!(
            MineLayout::from_mine_coords((1, 2), &[(0, 0), (0, 1)]),
            Err(GameError::TooManyMines)
        );
    }

    #[test]
    fn duplicate_mine_coords_count_once() {
        let layout = MineLayout::from_mine_coords((2, 2), &[(0, 0), (0, 0)]).unwrap();

        assert_eq!(layout.mine_count(), 1);
    }
}
