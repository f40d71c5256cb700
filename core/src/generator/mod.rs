use crate::*;
pub use density::*;

mod density;

/// Strategy that seeds mines onto a fresh grid, invoked once before the first
/// open is processed.
pub trait MineGenerator {
    /// Places mines onto `grid`, returning how many were actually placed.
    fn generate(self, grid: &mut Grid) -> TileCount;
}
