use alloc::collections::VecDeque;
use core::num::Saturating;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

/// Valid transitions:
/// - InProgress -> Won
/// - InProgress -> Lost
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameStatus {
    #[default]
    InProgress,
    Won,
    Lost,
}

impl GameStatus {
    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

/// A single game: the hidden mine layout plus everything the player has done.
///
/// Only built through [`Board::new`] or [`Board::from_layout`], there is no way
/// to load one from serialized data:
///
/// ```compile_fail
/// fn from_serialized<T: serde::de::DeserializeOwned>() {}
/// from_serialized::<minefield_core::Board>();
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct Board {
    mine_layout: MineLayout,
    cells: Array2<EngineCell>,
    revealed_count: Saturating<CellCount>,
    flagged_count: Saturating<CellCount>,
    status: GameStatus,
    triggered_mine: Option<Coord2>,
}

impl Board {
    /// Generates a fresh random board. The seed fully determines the layout.
    pub fn new(config: GameConfig, seed: u64) -> Result<Self> {
        let mine_layout = RandomMinefieldGenerator::new(seed).generate(config)?;
        Ok(Self::from_layout(mine_layout))
    }

    pub fn from_layout(mine_layout: MineLayout) -> Self {
        let size = mine_layout.size();
        Self {
            mine_layout,
            cells: Array2::default(size.to_nd_index()),
            revealed_count: Saturating(0),
            flagged_count: Saturating(0),
            status: GameStatus::InProgress,
            triggered_mine: None,
        }
    }

    /// Replaces the current game with a new one.
    ///
    /// On error the current game is left untouched.
    pub fn initialize(&mut self, config: GameConfig, seed: u64) -> Result<()> {
        *self = Self::new(config, seed)?;
        Ok(())
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn is_finished(&self) -> bool {
        self.status.is_finished()
    }

    pub fn config(&self) -> GameConfig {
        self.mine_layout.game_config()
    }

    pub fn size(&self) -> Coord2 {
        self.mine_layout.size()
    }

    pub fn rows(&self) -> Coord {
        self.size().0
    }

    pub fn cols(&self) -> Coord {
        self.size().1
    }

    /// Configured mine count, unaffected by flags.
    pub fn mine_count(&self) -> CellCount {
        self.mine_layout.mine_count()
    }

    /// Mines minus flags placed; negative when the player over-flags.
    pub fn mines_left(&self) -> i32 {
        i32::from(self.mine_layout.mine_count()) - i32::from(self.flagged_count.0)
    }

    pub fn revealed_count(&self) -> CellCount {
        self.revealed_count.0
    }

    pub fn flagged_count(&self) -> CellCount {
        self.flagged_count.0
    }

    pub fn safe_cells_left(&self) -> CellCount {
        self.mine_layout.safe_cell_count() - self.revealed_count.0
    }

    pub fn triggered_mine(&self) -> Option<Coord2> {
        self.triggered_mine
    }

    /// The full layout, only once there is nothing left to hide.
    pub fn mine_layout_if_finished(&self) -> Option<&MineLayout> {
        self.status.is_finished().then_some(&self.mine_layout)
    }

    pub fn iter_coords(&self) -> impl Iterator<Item = Coord2> + use<> {
        iter_coords(self.size())
    }

    /// Raw player-visible state.
    ///
    /// Panics on out-of-bounds coordinates, use [`Board::cell`] for a checked read.
    pub fn cell_at(&self, coords: Coord2) -> EngineCell {
        self.cells[coords.to_nd_index()]
    }

    pub fn cell(&self, coords: Coord2) -> Result<CellView> {
        let coords = self.mine_layout.validate_coords(coords)?;
        let lost = matches!(self.status, GameStatus::Lost);

        Ok(match self.cell_at(coords) {
            EngineCell::Hidden => CellView {
                is_mine: lost && self.mine_layout.contains_mine(coords),
                ..CellView::default()
            },
            EngineCell::Flagged => CellView {
                flagged: true,
                is_mine: lost && self.mine_layout.contains_mine(coords),
                ..CellView::default()
            },
            EngineCell::Revealed(count) => CellView {
                revealed: true,
                adjacent_mines: count,
                ..CellView::default()
            },
            EngineCell::Exploded => CellView {
                revealed: true,
                is_mine: true,
                ..CellView::default()
            },
        })
    }

    pub fn toggle_flag(&mut self, coords: Coord2) -> Result<MarkOutcome> {
        use EngineCell::*;
        use MarkOutcome::*;

        let coords = self.mine_layout.validate_coords(coords)?;
        if self.status.is_finished() {
            return Ok(NoChange);
        }

        let cell = &mut self.cells[coords.to_nd_index()];
        Ok(match *cell {
            Hidden => {
                *cell = Flagged;
                self.flagged_count += 1;
                Changed
            }
            Flagged => {
                *cell = Hidden;
                self.flagged_count -= 1;
                Changed
            }
            Revealed(_) | Exploded => NoChange,
        })
    }

    pub fn reveal(&mut self, coords: Coord2) -> Result<RevealOutcome> {
        let coords = self.mine_layout.validate_coords(coords)?;

        if self.status.is_finished() || !matches!(self.cell_at(coords), EngineCell::Hidden) {
            return Ok(RevealOutcome::NoChange);
        }

        let adjacency = self.mine_layout[coords];
        match adjacency {
            Adjacency::Mine => {
                self.cells[coords.to_nd_index()] = EngineCell::Exploded;
                self.triggered_mine = Some(coords);
                self.status = GameStatus::Lost;
                log::debug!("Hit mine at {:?}", coords);
                return Ok(RevealOutcome::HitMine);
            }
            Adjacency::Count(0) => self.flood_reveal(coords),
            Adjacency::Count(count) => self.open_safe_cell(coords, count),
        }

        if self.revealed_count.0 == self.mine_layout.safe_cell_count() {
            self.status = GameStatus::Won;
            log::debug!("All {} safe cells revealed", self.revealed_count.0);
            Ok(RevealOutcome::Won)
        } else {
            Ok(RevealOutcome::Revealed)
        }
    }

    /// Opens `start` and every cell reachable from it through zero cells.
    ///
    /// Cells are marked revealed when discovered, so each one is queued at most
    /// once. Non-zero cells are opened but never expanded.
    fn flood_reveal(&mut self, start: Coord2) {
        let before = self.revealed_count.0;
        self.open_safe_cell(start, 0);
        let mut to_visit = VecDeque::from([start]);

        while let Some(visit_coords) = to_visit.pop_front() {
            for pos in self.mine_layout.iter_neighbors(visit_coords) {
                if !matches!(self.cells[pos.to_nd_index()], EngineCell::Hidden) {
                    continue;
                }
                let Adjacency::Count(count) = self.mine_layout[pos] else {
                    continue;
                };

                self.open_safe_cell(pos, count);
                if count == 0 {
                    to_visit.push_back(pos);
                }
            }
        }

        log::trace!(
            "Flood reveal from {:?} opened {} cells",
            start,
            self.revealed_count.0 - before
        );
    }

    fn open_safe_cell(&mut self, coords: Coord2, count: u8) {
        self.cells[coords.to_nd_index()] = EngineCell::Revealed(count);
        self.revealed_count += 1;
    }
}
