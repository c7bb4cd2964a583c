use serde::{Deserialize, Serialize};

use super::grid::SerializedGrid;

/// Session flags and score. `over` and `won` only ever go from false
/// to true; a restart replaces the whole state.
#[derive(Clone, Debug, Default)]
pub struct GameState {
    pub score: u32,
    pub over: bool,
    pub won: bool,
    pub keep_playing: bool,
}

impl GameState {
    pub fn new() -> Self {
        Self::default()
    }

    /// No input can change the board in a terminated state: either the
    /// game is over, or it was won and the player has not asked to
    /// keep playing.
    pub fn terminated(&self) -> bool {
        self.over || (self.won && !self.keep_playing)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SerializedState {
    pub grid: SerializedGrid,
    pub score: u32,
    pub over: bool,
    pub won: bool,
    pub keep_playing: bool,
}
