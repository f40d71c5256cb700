use rand::prelude::*;

use super::*;

/// Density-based placement: spends a budget of `floor(total * density)` random
/// picks and only arms tiles that are still empty. Picks that land on an
/// existing mine are dropped rather than retried, so the realized mine count
/// can fall short of the nominal budget when collisions occur.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct DensityGenerator {
    density: f32,
    seed: u64,
}

impl DensityGenerator {
    pub fn new(density: f32, seed: u64) -> Self {
        Self { density, seed }
    }
}

impl MineGenerator for DensityGenerator {
    fn generate(self, grid: &mut Grid) -> TileCount {
        let total = grid.total_tiles();
        let budget = (total as f32 * self.density) as TileCount;
        if total == 0 || budget == 0 {
            return 0;
        }

        let mut rng = SmallRng::seed_from_u64(self.seed);
        let mut placed = 0;
        for _ in 0..budget {
            let pick = grid.coords_of(rng.random_range(0..total));
            if !grid[pick].has_mine {
                grid.toggle_mine(pick);
                placed += 1;
            }
        }

        log::debug!("placed {} mines out of a budget of {}", placed, budget);
        placed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_density_places_nothing() {
        let mut grid = Grid::new((30, 20));
        let placed = DensityGenerator::new(0.0, 1).generate(&mut grid);

        assert_eq!(placed, 0);
        assert_eq!(grid, Grid::new((30, 20)));
    }

    #[test]
    fn same_seed_produces_the_same_layout() {
        let mut a = Grid::new((30, 20));
        let mut b = Grid::new((30, 20));

        let placed_a = DensityGenerator::new(0.2, 42).generate(&mut a);
        let placed_b = DensityGenerator::new(0.2, 42).generate(&mut b);

        assert_eq!(placed_a, placed_b);
        assert_eq!(a, b);
    }

    #[test]
    fn collisions_may_undershoot_the_budget_but_never_overshoot() {
        let mut grid = Grid::new((16, 16));
        let placed = DensityGenerator::new(1.0, 7).generate(&mut grid);
        let budget = grid.total_tiles();

        assert!(placed > 0);
        assert!(placed <= budget);

        let mines = (0..budget)
            .filter(|&i| grid[grid.coords_of(i)].has_mine)
            .count() as TileCount;
        assert_eq!(mines, placed);
    }

    #[test]
    fn generated_adjacent_counts_match_a_full_recount() {
        let mut grid = Grid::new((12, 9));
        DensityGenerator::new(0.3, 99).generate(&mut grid);

        for y in 0..grid.height() {
            for x in 0..grid.width() {
                let recount = grid
                    .iter_neighbors((x, y))
                    .filter(|&pos| grid[pos].has_mine)
                    .count() as u8;
                assert_eq!(grid[(x, y)].adjacent_mine_count, recount, "at ({x}, {y})");
            }
        }
    }
}
