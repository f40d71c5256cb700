use serde::{Deserialize, Serialize};
use std::ops::BitOr;

pub use engine::*;
pub use error::*;
pub use generator::*;
pub use grid::*;
pub use tile::*;
pub use types::*;

mod cursor;
mod engine;
mod error;
mod generator;
mod grid;
mod tile;
mod types;

/// Board dimensions plus the mine density used for lazy placement.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameConfig {
    pub size: Coord2,
    pub mine_density: f32,
}

impl GameConfig {
    pub const fn new_unchecked(size: Coord2, mine_density: f32) -> Self {
        Self { size, mine_density }
    }

    /// Strict constructor: rejects empty boards and densities outside `[0, 1]`.
    pub fn new(size: Coord2, mine_density: f32) -> Result<Self> {
        if size.0 == 0 || size.1 == 0 {
            return Err(GameError::InvalidSize);
        }
        if !(0.0..=1.0).contains(&mine_density) {
            return Err(GameError::InvalidDensity);
        }
        Ok(Self::new_unchecked(size, mine_density))
    }

    /// Lenient constructor: clamps out-of-range values instead of failing.
    pub fn clamped((size_x, size_y): Coord2, mine_density: f32) -> Self {
        let size = (size_x.max(1), size_y.max(1));
        let density = mine_density.clamp(0.0, 1.0);
        if size != (size_x, size_y) || density != mine_density {
            log::warn!(
                "game config out of range, clamped to {:?} at density {}",
                size,
                density
            );
        }
        Self::new_unchecked(size, density)
    }

    pub const fn total_tiles(&self) -> TileCount {
        mult(self.size.0, self.size.1)
    }
}

/// Outcome of a flag toggle
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum FlagOutcome {
    NoChange,
    Changed,
}

impl FlagOutcome {
    /// Whether this outcome could have caused an update to the game
    pub const fn has_update(self) -> bool {
        match self {
            Self::NoChange => false,
            Self::Changed => true,
        }
    }
}

/// Outcome of opening a tile
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum OpenOutcome {
    NoChange,
    Safe,
    Explode,
    Win,
}

impl OpenOutcome {
    /// Whether this outcome could have caused an update to the game
    pub const fn has_update(self) -> bool {
        use OpenOutcome::*;
        match self {
            NoChange => false,
            Safe => true,
            Explode => true,
            Win => true,
        }
    }
}

impl BitOr for OpenOutcome {
    type Output = OpenOutcome;

    fn bitor(self, rhs: Self) -> Self::Output {
        use OpenOutcome::*;
        match (self, rhs) {
            (Explode, _) => Explode,
            (_, Explode) => Explode,
            (Win, _) => Win,
            (_, Win) => Win,
            (Safe, _) => Safe,
            (_, Safe) => Safe,
            (NoChange, NoChange) => NoChange,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_rejects_empty_boards_and_bad_densities() {
        assert_eq!(GameConfig::new((0, 10), 0.5), Err(GameError::InvalidSize));
        assert_eq!(GameConfig::new((10, 0), 0.5), Err(GameError::InvalidSize));
        assert_eq!(
            GameConfig::new((10, 10), 1.5),
            Err(GameError::InvalidDensity)
        );
        assert_eq!(
            GameConfig::new((10, 10), -0.1),
            Err(GameError::InvalidDensity)
        );
        assert!(GameConfig::new((10, 10), 0.0).is_ok());
        assert!(GameConfig::new((10, 10), 1.0).is_ok());
    }

    #[test]
    fn clamped_config_stays_in_range() {
        let config = GameConfig::clamped((0, 50), 2.0);
        assert_eq!(config.size, (1, 50));
        assert_eq!(config.mine_density, 1.0);
    }

    #[test]
    fn open_outcome_bitor_keeps_the_most_significant_result() {
        use OpenOutcome::*;
        assert_eq!(NoChange | Safe, Safe);
        assert_eq!(Safe | Win, Win);
        assert_eq!(Win | Explode, Explode);
        assert_eq!(NoChange | NoChange, NoChange);
    }
}
