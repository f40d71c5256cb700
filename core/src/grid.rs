use ndarray::Array2;
use serde::{Deserialize, Serialize};
use std::ops::{Index, IndexMut};

use crate::*;

/// Flat row-major tile arena owned by one game. The public contract is
/// coordinate/index based; raw storage offsets never leak.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Grid {
    tiles: Array2<Tile>,
}

impl Grid {
    pub fn new(size: Coord2) -> Self {
        Self {
            tiles: Array2::default(size.to_nd_index()),
        }
    }

    pub fn size(&self) -> Coord2 {
        let (rows, cols) = self.tiles.dim();
        (cols.try_into().unwrap(), rows.try_into().unwrap())
    }

    pub fn width(&self) -> Coord {
        self.size().0
    }

    pub fn height(&self) -> Coord {
        self.size().1
    }

    pub fn total_tiles(&self) -> TileCount {
        self.tiles.len().try_into().unwrap()
    }

    pub fn contains(&self, coords: Coord2) -> bool {
        let (width, height) = self.size();
        coords.0 < width && coords.1 < height
    }

    /// Bounds-checked read. Out of bounds is absent, not an error.
    pub fn tile_at(&self, coords: Coord2) -> Option<Tile> {
        self.contains(coords).then(|| self[coords])
    }

    /// Flat storage offset of a tile, `y*width + x`.
    pub fn index_of(&self, (x, y): Coord2) -> TileCount {
        TileCount::from(y) * TileCount::from(self.width()) + TileCount::from(x)
    }

    /// Inverse of [`Grid::index_of`].
    pub fn coords_of(&self, index: TileCount) -> Coord2 {
        let width = TileCount::from(self.width());
        ((index % width) as Coord, (index / width) as Coord)
    }

    pub fn iter_neighbors(&self, coords: Coord2) -> NeighborIter {
        NeighborIter::new(coords, self.size())
    }

    /// Flips the mine on a tile and adjusts every neighbor's adjacent count by
    /// the same ±1. Self-inverse: toggling twice restores the grid exactly.
    /// Returns whether the tile now carries a mine.
    pub fn toggle_mine(&mut self, coords: Coord2) -> bool {
        let has_mine = !self[coords].has_mine;
        self[coords].has_mine = has_mine;

        for pos in self.iter_neighbors(coords) {
            let count = &mut self[pos].adjacent_mine_count;
            if has_mine {
                *count += 1;
            } else {
                *count -= 1;
            }
        }

        has_mine
    }
}

impl Index<Coord2> for Grid {
    type Output = Tile;

    fn index(&self, coords: Coord2) -> &Self::Output {
        &self.tiles[coords.to_nd_index()]
    }
}

impl IndexMut<Coord2> for Grid {
    fn index_mut(&mut self, coords: Coord2) -> &mut Self::Output {
        &mut self.tiles[coords.to_nd_index()]
    }
}
