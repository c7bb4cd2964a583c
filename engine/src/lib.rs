pub mod game;
pub mod logger;
pub mod session_rng;
pub mod settings;
pub mod storage;

pub use game::{Direction, GameEvent, GameManager, GameObserver, InputEvent, StateUpdate};
pub use session_rng::SessionRng;
pub use settings::GameSettings;
pub use storage::{MemoryStore, StateStore, YamlFileStore};
