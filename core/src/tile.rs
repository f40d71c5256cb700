use serde::{Deserialize, Serialize};

/// Per-tile state tracked by the gameplay engine.
///
/// `adjacent_mine_count` always equals the number of in-bounds neighbors that
/// carry a mine; it is maintained incrementally on every mine toggle and never
/// recomputed from scratch.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tile {
    pub has_mine: bool,
    pub has_flag: bool,
    pub is_opened: bool,
    pub adjacent_mine_count: u8,
}

impl Tile {
    /// Whether a direct open would actually reveal this tile.
    pub const fn is_openable(self) -> bool {
        !self.is_opened && !self.has_flag
    }
}
