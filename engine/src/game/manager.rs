use std::collections::HashSet;

use super::events::{GameEvent, GameObserver, InputEvent, StateUpdate};
use super::grid::Grid;
use super::state::{GameState, SerializedState};
use super::tile::TileId;
use super::trace::MoveTrace;
use super::types::{Direction, Position};
use crate::log;
use crate::session_rng::SessionRng;
use crate::settings::GameSettings;
use crate::storage::StateStore;

pub const START_TILES: usize = 2;

/// Owns one game session: the grid, the session flags, the RNG and the
/// injected store, and resolves every input to completion before the
/// next one is looked at.
pub struct GameManager {
    settings: GameSettings,
    grid: Grid,
    state: GameState,
    rng: SessionRng,
    store: Box<dyn StateStore>,
    observers: Vec<Box<dyn GameObserver>>,
    moves_made: u32,
}

impl GameManager {
    /// Creates a session, resuming from the store when it holds a
    /// game that is not over, otherwise starting fresh with two tiles.
    pub fn new(
        settings: GameSettings,
        rng: SessionRng,
        store: Box<dyn StateStore>,
    ) -> Result<Self, String> {
        settings.validate()?;

        let mut manager = Self {
            grid: Grid::empty(settings.grid_size),
            state: GameState::new(),
            rng,
            store,
            observers: Vec::new(),
            moves_made: 0,
            settings,
        };

        match manager.store.load() {
            Some(saved) if !saved.over => {
                manager.grid = Grid::from_serialized(&saved.grid);
                manager.state = GameState {
                    score: saved.score,
                    over: saved.over,
                    won: saved.won,
                    keep_playing: saved.keep_playing,
                };
                log!("Resumed saved session with score {}", saved.score);
            }
            _ => manager.add_start_tiles(),
        }

        Ok(manager)
    }

    pub fn add_observer(&mut self, observer: Box<dyn GameObserver>) {
        self.observers.push(observer);
    }

    /// Pushes the current snapshot to observers and persists it.
    /// Frontends call this once after registering observers; every
    /// handled input re-emits on its own.
    pub fn actuate(&mut self) {
        self.resolve_actuate(MoveTrace::default());
    }

    pub fn handle(&mut self, event: InputEvent) {
        match event {
            InputEvent::Move(direction) => self.handle_move(direction),
            InputEvent::Restart => self.restart(),
            InputEvent::KeepPlaying => self.keep_playing(),
        }
    }

    fn add_start_tiles(&mut self) {
        for _ in 0..START_TILES {
            self.spawn_random_tile();
        }
    }

    fn spawn_random_tile(&mut self) -> Option<(TileId, Position, u32)> {
        let position = self.grid.random_available_cell(&mut self.rng)?;
        let value = if self.rng.random::<f64>() < self.settings.four_tile_probability {
            4
        } else {
            2
        };
        let id = self.grid.spawn_tile(position, value);
        Some((id, position, value))
    }

    /// One complete move: traverse from the wall the tiles are moving
    /// toward, slide each tile to its farthest empty cell, merge it
    /// with an equal-valued blocker that has not merged this move,
    /// then spawn and re-check termination.
    fn handle_move(&mut self, direction: Direction) {
        if self.state.terminated() {
            return;
        }

        let mut trace = MoveTrace::default();
        let mut merged_this_move: HashSet<TileId> = HashSet::new();
        let mut moved = false;

        let (xs, ys) = self.traversal_order(direction);
        for &x in &xs {
            for &y in &ys {
                let position = Position::new(x, y);
                let Some((id, value)) = self
                    .grid
                    .cell_content(position)
                    .map(|tile| (tile.id, tile.value))
                else {
                    continue;
                };

                let (farthest, next) = self.find_farthest(position, direction);

                let merge_target = next
                    .and_then(|n| self.grid.cell_content(n))
                    .filter(|other| other.value == value && !merged_this_move.contains(&other.id))
                    .map(|other| other.id);

                if let (Some(target_id), Some(target_position)) = (merge_target, next) {
                    let merged_value = value * 2;
                    self.grid.remove_tile(id);
                    self.grid.remove_tile(target_id);
                    let merged_id = self.grid.spawn_tile(target_position, merged_value);
                    merged_this_move.insert(merged_id);

                    trace.record_merge(id, position, target_position, merged_id);
                    trace.record_merge(target_id, target_position, target_position, merged_id);

                    self.state.score += merged_value;
                    if merged_value == self.settings.target_value && !self.state.won {
                        self.state.won = true;
                        log!("Reached {} after {} moves", merged_value, self.moves_made + 1);
                    }
                    moved = true;
                } else if farthest != position {
                    self.grid.move_tile(id, farthest);
                    trace.record_slide(id, position, farthest);
                    moved = true;
                }
            }
        }

        if moved {
            if let Some((id, position, value)) = self.spawn_random_tile() {
                trace.record_spawn(id, position, value);
            }
            self.moves_made += 1;
            if !self.moves_available() {
                self.state.over = true;
                log!("Game over with score {}", self.state.score);
            }
        }

        self.resolve_actuate(trace);
    }

    /// Axis visit orders for one move. The sequence along an axis is
    /// reversed when the direction points toward its positive end, so
    /// tiles already against the target wall resolve first and slides
    /// chain correctly behind them.
    fn traversal_order(&self, direction: Direction) -> (Vec<usize>, Vec<usize>) {
        let (dx, dy) = direction.offset();
        let mut xs: Vec<usize> = (0..self.grid.size()).collect();
        let mut ys: Vec<usize> = (0..self.grid.size()).collect();
        if dx == 1 {
            xs.reverse();
        }
        if dy == 1 {
            ys.reverse();
        }
        (xs, ys)
    }

    /// Walks from `from` along `direction` over empty cells. Returns
    /// the last empty cell reached and the cell just beyond it, which
    /// is either occupied or off the board (`None`).
    fn find_farthest(&self, from: Position, direction: Direction) -> (Position, Option<Position>) {
        let mut farthest = from;
        loop {
            match self.grid.neighbor(farthest, direction) {
                Some(next) if !self.grid.cell_occupied(next) => farthest = next,
                next => return (farthest, next),
            }
        }
    }

    /// True while at least one input can still change the board:
    /// an empty cell exists, or two equal tiles are adjacent.
    pub fn moves_available(&self) -> bool {
        self.grid.cells_available() || self.tile_matches_available()
    }

    fn tile_matches_available(&self) -> bool {
        let size = self.grid.size();
        for y in 0..size {
            for x in 0..size {
                let position = Position::new(x, y);
                let Some(tile) = self.grid.cell_content(position) else {
                    continue;
                };
                // right and down neighbors cover every adjacent pair
                for direction in [Direction::Right, Direction::Down] {
                    if let Some(neighbor) = self.grid.neighbor(position, direction) {
                        if self
                            .grid
                            .cell_content(neighbor)
                            .is_some_and(|other| other.value == tile.value)
                        {
                            return true;
                        }
                    }
                }
            }
        }
        false
    }

    fn restart(&mut self) {
        self.store.clear();
        self.grid = Grid::empty(self.settings.grid_size);
        self.state = GameState::new();
        self.moves_made = 0;
        self.add_start_tiles();
        self.persist();
        let event = GameEvent::Restarted(self.state_update());
        self.emit(event);
    }

    fn keep_playing(&mut self) {
        self.state.keep_playing = true;
        self.persist();
        let event = GameEvent::KeptPlaying(self.state_update());
        self.emit(event);
    }

    fn resolve_actuate(&mut self, trace: MoveTrace) {
        self.persist();
        let event = GameEvent::MoveResolved {
            update: self.state_update(),
            trace,
        };
        self.emit(event);
    }

    fn persist(&mut self) {
        if self.state.score > self.store.best_score() {
            self.store.set_best_score(self.state.score);
        }
        if self.state.over {
            // an over game never resumes
            self.store.clear();
        } else {
            let serialized = self.serialize();
            self.store.save(&serialized);
        }
    }

    fn state_update(&self) -> StateUpdate {
        StateUpdate {
            values: self.grid.tile_values(),
            score: self.state.score,
            best_score: self.store.best_score(),
            over: self.state.over,
            won: self.state.won,
            terminated: self.state.terminated(),
            moves_made: self.moves_made,
        }
    }

    fn emit(&mut self, event: GameEvent) {
        for observer in &mut self.observers {
            observer.on_event(&event);
        }
    }

    pub fn serialize(&self) -> SerializedState {
        SerializedState {
            grid: self.grid.serialize(),
            score: self.state.score,
            over: self.state.over,
            won: self.state.won,
            keep_playing: self.state.keep_playing,
        }
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn game_state(&self) -> &GameState {
        &self.state
    }

    pub fn score(&self) -> u32 {
        self.state.score
    }

    pub fn best_score(&self) -> u32 {
        self.store.best_score()
    }

    pub fn moves_made(&self) -> u32 {
        self.moves_made
    }

    pub fn max_tile(&self) -> u32 {
        self.grid.max_tile()
    }

    pub fn tile_values(&self) -> Vec<Vec<u32>> {
        self.grid.tile_values()
    }

    #[cfg(test)]
    pub(crate) fn set_board(&mut self, rows: &[&[u32]]) {
        self.grid = Grid::empty(rows.len());
        for (y, row) in rows.iter().enumerate() {
            for (x, &value) in row.iter().enumerate() {
                if value != 0 {
                    self.grid.spawn_tile(Position::new(x, y), value);
                }
            }
        }
    }
}
