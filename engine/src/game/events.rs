use super::trace::MoveTrace;
use super::types::Direction;

/// Commands the input source can deliver to the game.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum InputEvent {
    Move(Direction),
    Restart,
    KeepPlaying,
}

/// Snapshot pushed to observers after setup and after every handled
/// input. `terminated` folds the over/won/keep-playing flags into the
/// single bit frontends care about.
#[derive(Clone, Debug, PartialEq)]
pub struct StateUpdate {
    pub values: Vec<Vec<u32>>,
    pub score: u32,
    pub best_score: u32,
    pub over: bool,
    pub won: bool,
    pub terminated: bool,
    pub moves_made: u32,
}

/// The closed set of events the game emits. Observers get them in the
/// order the inputs were handled; there is no other notification path.
#[derive(Clone, Debug)]
pub enum GameEvent {
    MoveResolved {
        update: StateUpdate,
        trace: MoveTrace,
    },
    Restarted(StateUpdate),
    KeptPlaying(StateUpdate),
}

impl GameEvent {
    pub fn update(&self) -> &StateUpdate {
        match self {
            GameEvent::MoveResolved { update, .. } => update,
            GameEvent::Restarted(update) => update,
            GameEvent::KeptPlaying(update) => update,
        }
    }
}

pub trait GameObserver {
    fn on_event(&mut self, event: &GameEvent);
}
