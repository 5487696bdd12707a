use rand::prelude::*;

use super::*;

/// Uniform placement by rejection sampling: pick any cell at random and keep it
/// when it is neither a mine already nor inside the first click's safe zone.
///
/// The generator is seeded, so the same seed and the same sequence of first
/// clicks reproduce the same boards.
#[derive(Clone, Debug)]
pub struct RandomPlacer {
    seed: u64,
    rng: SmallRng,
}

impl RandomPlacer {
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            rng: SmallRng::seed_from_u64(seed),
        }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }
}

impl MinePlacer for RandomPlacer {
    fn place(&mut self, config: &BoardConfig, first: Coord2) -> MineLayout {
        let (columns, rows) = config.size();
        let mut mines: Array2<bool> = Array2::default(config.size().to_nd_index());
        let mut excluded: Array2<bool> = Array2::default(config.size().to_nd_index());

        for coords in safe_zone(config, first) {
            excluded[coords.to_nd_index()] = true;
        }
        let excluded_count = excluded.iter().filter(|&&is_excluded| is_excluded).count();

        // small boards cannot always spare the whole neighborhood
        if usize::from(config.mines()) > usize::from(config.total_cells()) - excluded_count {
            log::warn!(
                "Cannot keep the neighbors of {:?} free of mines, only the first cell stays safe",
                first
            );
            excluded.fill(false);
            excluded[first.to_nd_index()] = true;
        }

        let mut mines_placed: CellCount = 0;
        let mut attempts: u64 = 0;
        while mines_placed < config.mines() {
            attempts += 1;
            let coords: Coord2 = (self.rng.random_range(0..columns), self.rng.random_range(0..rows));
            let index = coords.to_nd_index();
            if mines[index] || excluded[index] {
                continue;
            }
            mines[index] = true;
            mines_placed += 1;
        }

        log::debug!(
            "Placed {} mines on {} after {} attempts (first click {:?})",
            mines_placed,
            config,
            attempts,
            first
        );
        MineLayout::from_mine_mask(mines)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn places_exact_mine_count_outside_safe_zone() {
        let config = Difficulty::Expert.config();

        for seed in 0..50 {
            let first = ((seed % 30) as Coord, (seed % 16) as Coord);
            let layout = RandomPlacer::new(seed).place(&config, first);

            assert_eq!(layout.mine_count(), config.mines());
            assert!(layout.matches(&config));
            for coords in safe_zone(&config, first) {
                assert!(!layout[coords], "seed {seed}: mine at {coords:?} near {first:?}");
            }
        }
    }

    #[test]
    fn same_seed_same_layout() {
        let config = Difficulty::BEGINNER.config();

        let a = RandomPlacer::new(42).place(&config, (3, 3));
        let b = RandomPlacer::new(42).place(&config, (3, 3));

        assert_eq!(a, b);
    }

    #[test]
    fn crowded_board_keeps_only_first_cell_safe() {
        // 3x3 with 8 mines cannot spare the 4-cell corner neighborhood
        let config = BoardConfig::new(3, 3, 8).unwrap();
        let layout = RandomPlacer::new(7).place(&config, (0, 0));

        assert_eq!(layout.mine_count(), 8);
        assert!(!layout[(0, 0)]);
    }

    #[test]
    fn dense_board_still_respects_neighborhood() {
        // 4x4 with 7 mines leaves exactly the 9 cells around (1, 1) free
        let config = BoardConfig::new(4, 4, 7).unwrap();
        let layout = RandomPlacer::new(3).place(&config, (1, 1));

        assert_eq!(layout.mine_count(), 7);
        for coords in safe_zone(&config, (1, 1)) {
            assert!(!layout[coords]);
        }
    }
}
