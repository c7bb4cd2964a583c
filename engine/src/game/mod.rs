pub mod events;
pub mod grid;
pub mod manager;
pub mod state;
pub mod tile;
pub mod trace;
pub mod types;

pub use events::{GameEvent, GameObserver, InputEvent, StateUpdate};
pub use grid::Grid;
pub use manager::GameManager;
pub use state::{GameState, SerializedState};
pub use tile::{Tile, TileId};
pub use trace::MoveTrace;
pub use types::{Direction, Position};
