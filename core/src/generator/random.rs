use super::*;

/// Purely random mine placement by rejection sampling.
///
/// A uniform `(row, col)` is drawn for every mine and redrawn while it lands on
/// a cell that already holds one. The same seed and config always produce the
/// same layout.
#[derive(Clone, Debug, PartialEq)]
pub struct RandomMinefieldGenerator {
    seed: u64,
}

impl RandomMinefieldGenerator {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }
}

impl MinefieldGenerator for RandomMinefieldGenerator {
    fn generate(self, config: GameConfig) -> Result<MineLayout> {
        use rand::prelude::*;

        if let Err(err) = config.validate() {
            log::warn!("Rejected minefield config {:?}: {}", config, err);
            return Err(err);
        }

        let (rows, cols) = config.size;
        let mut mines: Array2<bool> = Array2::default(config.size.to_nd_index());
        let mut rng = SmallRng::seed_from_u64(self.seed);
        let mut mines_placed = 0;
        let mut draws: u32 = 0;

        while mines_placed < config.mines {
            let coords: Coord2 = (rng.random_range(0..rows), rng.random_range(0..cols));
            draws = draws.saturating_add(1);
            let cell = &mut mines[coords.to_nd_index()];
            if !*cell {
                *cell = true;
                mines_placed += 1;
            }
        }

        log::debug!(
            "Generated {}x{} minefield with {} mines in {} draws (seed {})",
            rows,
            cols,
            mines_placed,
            draws,
            self.seed
        );
        MineLayout::from_mine_mask(&mines)
    }
}
