use std::io::{self, Write};

use engine::game::{GameEvent, GameObserver, StateUpdate};

/// Renders every game event as a full screen redraw. The engine pushes
/// a complete snapshot each time, so no incremental state is kept here.
pub struct TerminalPresenter;

impl TerminalPresenter {
    pub fn new() -> Self {
        Self
    }

    fn draw(&self, update: &StateUpdate) {
        print!("\x1b[2J\x1b[H");
        println!("=== 2048 ===");
        println!(
            "score {}   best {}   moves {}",
            update.score, update.best_score, update.moves_made
        );
        println!("Arrows/WASD move | R restart | C keep playing | Q quit\n");

        let width = update
            .values
            .iter()
            .flatten()
            .map(|v| v.to_string().len())
            .max()
            .unwrap_or(1)
            .max(4);

        for row in &update.values {
            for &value in row {
                if value == 0 {
                    print!("{:>width$} ", ".", width = width);
                } else {
                    print!("{:>width$} ", value, width = width);
                }
            }
            println!();
        }

        if update.over {
            println!("\n*** GAME OVER ***");
            println!("Final score {}. Press R to restart or Q to quit.", update.score);
        } else if update.won && update.terminated {
            println!("\n*** YOU WIN ***");
            println!("Press C to keep playing or R to restart.");
        }

        let _ = io::stdout().flush();
    }
}

impl Default for TerminalPresenter {
    fn default() -> Self {
        Self::new()
    }
}

impl GameObserver for TerminalPresenter {
    fn on_event(&mut self, event: &GameEvent) {
        self.draw(event.update());
    }
}
