use serde::{Deserialize, Serialize};
use std::fmt;

use crate::{cursor, *};

/// Game progression. Transitions are one-directional: `PendingStart` becomes
/// `Playing` on the first open, and `Win`/`GameOver` are terminal.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameState {
    PendingStart,
    Playing,
    Win,
    GameOver,
}

impl GameState {
    pub const fn is_pending(self) -> bool {
        matches!(self, Self::PendingStart)
    }

    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Win | Self::GameOver)
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::PendingStart
    }
}

/// Callback invoked synchronously once per tile mutation (each open, each
/// flag change) with the affected position and a snapshot of the tile.
pub type TileUpdateCallback = Box<dyn FnMut(Coord2, Tile)>;

/// One game of minesweeper: the tile grid plus the rules that drive it.
///
/// Mines are placed lazily on the first open, which is guaranteed to never
/// reveal a mine: any mine under the first opened tile is removed on the spot
/// and not relocated.
pub struct Game {
    grid: Grid,
    config: GameConfig,
    state: GameState,
    mine_count: TileCount,
    opened_tile_count: TileCount,
    flag_count: TileCount,
    selected: Option<Coord2>,
    seed: u64,
    on_tile_update: Option<TileUpdateCallback>,
}

impl Game {
    pub fn new(config: GameConfig) -> Self {
        Self::with_seed(config, rand::random())
    }

    /// Deterministic constructor: the same seed always yields the same mine
    /// layout on first open.
    pub fn with_seed(config: GameConfig, seed: u64) -> Self {
        Self {
            grid: Grid::new(config.size),
            config,
            state: Default::default(),
            mine_count: 0,
            opened_tile_count: 0,
            flag_count: 0,
            selected: None,
            seed,
            on_tile_update: None,
        }
    }

    /// Sizing hint for callers that pool storage for many game instances.
    pub fn required_storage_size((width, height): Coord2) -> usize {
        std::mem::size_of::<Self>() + mult(width, height) as usize * std::mem::size_of::<Tile>()
    }

    pub fn config(&self) -> GameConfig {
        self.config
    }

    pub fn size(&self) -> Coord2 {
        self.grid.size()
    }

    pub fn width(&self) -> Coord {
        self.grid.width()
    }

    pub fn height(&self) -> Coord {
        self.grid.height()
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn is_finished(&self) -> bool {
        self.state.is_finished()
    }

    pub fn mine_count(&self) -> TileCount {
        self.mine_count
    }

    pub fn opened_tile_count(&self) -> TileCount {
        self.opened_tile_count
    }

    pub fn flag_count(&self) -> TileCount {
        self.flag_count
    }

    /// Read access to the tile arena, including index/coordinate mapping.
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn tile_at(&self, coords: Coord2) -> Option<Tile> {
        self.grid.tile_at(coords)
    }

    pub fn adjacent_tiles(&self, coords: Coord2) -> impl Iterator<Item = (Coord2, Tile)> + '_ {
        self.grid.iter_neighbors(coords).map(|pos| (pos, self.grid[pos]))
    }

    pub fn adjacent_mine_count(&self, coords: Coord2) -> u8 {
        self.grid
            .tile_at(coords)
            .map(|tile| tile.adjacent_mine_count)
            .unwrap_or(0)
    }

    pub fn set_tile_update_callback(&mut self, callback: impl FnMut(Coord2, Tile) + 'static) {
        self.on_tile_update = Some(Box::new(callback));
    }

    pub fn clear_tile_update_callback(&mut self) {
        self.on_tile_update = None;
    }

    /// Currently selected tile, or `None` when the last cursor update targeted
    /// an out-of-bounds location (or the cursor was never set).
    pub fn selected_tile(&self) -> Option<Coord2> {
        self.selected
    }

    pub fn set_cursor(&mut self, coords: Coord2) {
        self.selected = self.grid.contains(coords).then_some(coords);
    }

    /// Moves the selection one step. No-op without a selection; at the board
    /// edge the cursor wraps to the opposite side or stays put.
    pub fn move_cursor(&mut self, direction: Direction, wrap: bool) {
        let Some(coords) = self.selected else {
            return;
        };
        self.set_cursor(cursor::step(coords, direction, self.grid.size(), wrap));
    }

    /// Opens a tile. On an already-opened tile this is a chord request; on a
    /// flagged or absent tile it is a no-op. The first open of a game places
    /// the mines and de-mines the target before the open is processed.
    pub fn open_tile(&mut self, coords: Coord2) -> OpenOutcome {
        if self.state.is_finished() || !self.grid.contains(coords) {
            return OpenOutcome::NoChange;
        }

        if self.state.is_pending() {
            self.start_at(coords);
        }

        self.open_at(coords)
    }

    pub fn toggle_flag(&mut self, coords: Coord2) -> FlagOutcome {
        let Some(tile) = self.grid.tile_at(coords) else {
            return FlagOutcome::NoChange;
        };
        if tile.is_opened {
            return FlagOutcome::NoChange;
        }

        let has_flag = !tile.has_flag;
        self.grid[coords].has_flag = has_flag;
        if has_flag {
            self.flag_count += 1;
        } else {
            self.flag_count -= 1;
        }
        self.notify(coords);
        FlagOutcome::Changed
    }

    /// Editor/debug operation: flips a mine and keeps the mine counter and all
    /// neighbor counts consistent. Not part of normal play.
    pub fn toggle_mine(&mut self, coords: Coord2) {
        if !self.grid.contains(coords) {
            return;
        }
        if self.grid.toggle_mine(coords) {
            self.mine_count += 1;
        } else {
            self.mine_count -= 1;
        }
    }

    /// Flags the tile when unopened, chords it when opened.
    pub fn space_tile(&mut self, coords: Coord2) {
        match self.grid.tile_at(coords) {
            Some(tile) if tile.is_opened => {
                self.open_tile(coords);
            }
            Some(_) => {
                self.toggle_flag(coords);
            }
            None => {}
        }
    }

    /// Places mines and transitions to `Playing`. The first opened tile must
    /// never be a mine, so a mine under the target is toggled off here rather
    /// than relocated. Generated mines add to any mines placed through the
    /// editor operation before the first open; the generator only arms empty
    /// tiles, so the counter stays consistent.
    fn start_at(&mut self, coords: Coord2) {
        let generator = DensityGenerator::new(self.config.mine_density, self.seed);
        self.mine_count += generator.generate(&mut self.grid);

        if self.grid[coords].has_mine {
            self.grid.toggle_mine(coords);
            self.mine_count -= 1;
        }

        self.state = GameState::Playing;
    }

    fn open_at(&mut self, coords: Coord2) -> OpenOutcome {
        use OpenOutcome::*;

        if self.state.is_finished() {
            return NoChange;
        }

        let tile = self.grid[coords];
        if tile.is_opened {
            return self.chord_at(coords, tile.adjacent_mine_count);
        }
        if tile.has_flag {
            return NoChange;
        }

        self.grid[coords].is_opened = true;
        self.opened_tile_count += 1;
        self.notify(coords);

        if tile.has_mine {
            self.state = GameState::GameOver;
            return Explode;
        }
        if self.all_safe_tiles_opened() {
            self.state = GameState::Win;
            return Win;
        }
        if tile.adjacent_mine_count == 0 {
            return Safe | self.cascade(coords);
        }
        Safe
    }

    /// Quick-open on an already-opened tile: when the flagged neighbors match
    /// the tile's adjacent mine count exactly, every unflagged unopened
    /// neighbor is opened with the normal recursive rule. Never changes flags.
    fn chord_at(&mut self, coords: Coord2, count: u8) -> OpenOutcome {
        if count == 0 || self.count_adjacent_flags(coords) != count {
            return OpenOutcome::NoChange;
        }

        self.grid
            .iter_neighbors(coords)
            .fold(OpenOutcome::NoChange, |outcome, pos| {
                if self.grid[pos].is_openable() {
                    outcome | self.open_at(pos)
                } else {
                    outcome
                }
            })
    }

    /// Scanline flood fill. Opens the whole horizontal run through `coords`
    /// in one pass, then recurses into the rows directly above and below over
    /// the run's column range. A flag bounding the run contributes its column
    /// to that range, so the diagonal neighbors of the run's zero tiles are
    /// reached the way tile-by-tile flood fill reaches them. Recursion depth
    /// is bounded by the number of rows touched, not the number of tiles.
    fn cascade(&mut self, (x, y): Coord2) -> OpenOutcome {
        let lx = self.open_run((x, y), -1);
        let rx = self.open_run((x, y), 1);

        let mut outcome = OpenOutcome::NoChange;
        let above = y.checked_sub(1);
        let below = (y + 1 < self.grid.height()).then(|| y + 1);
        for ny in above.into_iter().chain(below) {
            for nx in lx..=rx {
                if !self.grid[(nx, ny)].is_opened {
                    outcome = outcome | self.open_at((nx, ny));
                }
            }
        }

        // a win reached while opening the horizontal run itself
        if self.state == GameState::Win {
            OpenOutcome::Win
        } else {
            outcome
        }
    }

    /// Opens one horizontal run from `x` exclusive, stepping by `step`, and
    /// returns the column bound for the vertical pass: the outermost opened
    /// column, or a bounding flag's column. An already-opened tile with a
    /// nonzero count bounds the run without joining it; a tile with its own
    /// nonzero count joins the run but stops further expansion.
    fn open_run(&mut self, (x, y): Coord2, step: i32) -> Coord {
        let width = i32::from(self.grid.width());
        let mut bound = x;
        let mut next = i32::from(x) + step;

        while (0..width).contains(&next) {
            let pos = (next as Coord, y);
            let tile = self.grid[pos];

            if tile.has_flag {
                // the flag itself stays closed, but its column joins the
                // vertical pass so the run's diagonal neighbors are not lost
                bound = pos.0;
                break;
            }
            if tile.is_opened && tile.adjacent_mine_count != 0 {
                break;
            }

            self.open_bare(pos);
            bound = pos.0;

            if tile.adjacent_mine_count != 0 {
                break;
            }
            next += step;
        }

        bound
    }

    /// Opens a tile without retriggering a cascade; the enclosing run already
    /// covers the whole row. Run tiles border a zero-count tile and therefore
    /// never hold a mine.
    fn open_bare(&mut self, coords: Coord2) {
        if self.grid[coords].is_opened {
            return;
        }

        self.grid[coords].is_opened = true;
        self.opened_tile_count += 1;
        self.notify(coords);

        if self.all_safe_tiles_opened() {
            self.state = GameState::Win;
        }
    }

    fn count_adjacent_flags(&self, coords: Coord2) -> u8 {
        self.grid
            .iter_neighbors(coords)
            .filter(|&pos| {
                let tile = self.grid[pos];
                !tile.is_opened && tile.has_flag
            })
            .count()
            .try_into()
            .unwrap()
    }

    fn all_safe_tiles_opened(&self) -> bool {
        self.opened_tile_count == self.grid.total_tiles() - self.mine_count
    }

    fn notify(&mut self, coords: Coord2) {
        let tile = self.grid[coords];
        if let Some(callback) = self.on_tile_update.as_mut() {
            callback(coords, tile);
        }
    }
}

impl fmt::Debug for Game {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Game")
            .field("config", &self.config)
            .field("state", &self.state)
            .field("mine_count", &self.mine_count)
            .field("opened_tile_count", &self.opened_tile_count)
            .field("flag_count", &self.flag_count)
            .field("selected", &self.selected)
            .finish_non_exhaustive()
    }
}
