use std::collections::HashMap;

use clap::ValueEnum;
use engine::game::{Direction, GameManager, InputEvent};
use engine::log;
use engine::session_rng::SessionRng;
use engine::settings::GameSettings;
use engine::storage::MemoryStore;

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Policy {
    /// Random direction each step, retrying until one changes the board
    Random,
    /// Cycle Left, Down, Right, Up
    Cycle,
}

pub struct HeadlessOptions {
    pub episodes: u32,
    pub seed: u64,
    pub max_steps: u32,
    pub policy: Policy,
    pub verbose: bool,
}

/// Runs seeded episodes without a terminal, driving the engine with a
/// direction policy and printing summary statistics.
pub fn run(settings: GameSettings, options: &HeadlessOptions) -> Result<(), String> {
    let mut scores: Vec<u32> = Vec::with_capacity(options.episodes as usize);
    let mut max_tiles: Vec<u32> = Vec::with_capacity(options.episodes as usize);
    let mut action_rng = SessionRng::new(options.seed.wrapping_add(1000));

    for episode in 0..options.episodes {
        let episode_seed = options.seed.wrapping_add(episode as u64);
        let mut manager = GameManager::new(
            settings,
            SessionRng::new(episode_seed),
            Box::new(MemoryStore::new()),
        )?;

        let mut steps = 0u32;
        let mut cycle_cursor = 0usize;
        while !manager.game_state().over && (options.max_steps == 0 || steps < options.max_steps) {
            // a won game keeps going in simulation
            if manager.game_state().won && !manager.game_state().keep_playing {
                manager.handle(InputEvent::KeepPlaying);
            }

            let changed = match options.policy {
                Policy::Random => step_random(&mut manager, &mut action_rng),
                Policy::Cycle => step_cycle(&mut manager, &mut cycle_cursor),
            };
            if !changed {
                break;
            }
            steps += 1;
        }

        scores.push(manager.score());
        max_tiles.push(manager.max_tile());
        if options.verbose {
            log!(
                "Episode {}: score={} max_tile={} moves={}",
                episode + 1,
                manager.score(),
                manager.max_tile(),
                manager.moves_made()
            );
        }
    }

    print_summary(options, &mut scores, &max_tiles);
    Ok(())
}

/// Tries the four directions starting from a random one; true when a
/// move changed the board.
fn step_random(manager: &mut GameManager, rng: &mut SessionRng) -> bool {
    let order = Direction::all();
    let start: usize = rng.random_range(0..order.len());
    for i in 0..order.len() {
        let before = manager.moves_made();
        manager.handle(InputEvent::Move(order[(start + i) % order.len()]));
        if manager.moves_made() != before {
            return true;
        }
    }
    false
}

fn step_cycle(manager: &mut GameManager, cursor: &mut usize) -> bool {
    let order = [
        Direction::Left,
        Direction::Down,
        Direction::Right,
        Direction::Up,
    ];
    for _ in 0..order.len() {
        let direction = order[*cursor % order.len()];
        *cursor += 1;
        let before = manager.moves_made();
        manager.handle(InputEvent::Move(direction));
        if manager.moves_made() != before {
            return true;
        }
    }
    false
}

fn print_summary(options: &HeadlessOptions, scores: &mut [u32], max_tiles: &[u32]) {
    scores.sort_unstable();
    let episodes = scores.len();
    let total: u64 = scores.iter().map(|&s| s as u64).sum();
    let avg = if episodes > 0 {
        total as f64 / episodes as f64
    } else {
        0.0
    };
    let median = match episodes {
        0 => 0.0,
        n if n % 2 == 0 => (scores[n / 2 - 1] + scores[n / 2]) as f64 / 2.0,
        n => scores[n / 2] as f64,
    };

    let mut tile_counts: HashMap<u32, u32> = HashMap::new();
    for &tile in max_tiles {
        *tile_counts.entry(tile).or_insert(0) += 1;
    }
    let mut tile_list: Vec<_> = tile_counts.into_iter().collect();
    tile_list.sort_unstable_by_key(|&(tile, _)| tile);

    println!("=== Simulation Results ===");
    println!("episodes={}", episodes);
    println!("policy={:?}", options.policy);
    println!("seed={}", options.seed);
    println!("max_steps={}", options.max_steps);
    println!("avg_score={:.2}", avg);
    println!("median_score={:.2}", median);
    println!("min_score={}", scores.first().unwrap_or(&0));
    println!("max_score={}", scores.last().unwrap_or(&0));
    print!("max_tile_distribution=");
    for (i, (tile, count)) in tile_list.iter().enumerate() {
        if i > 0 {
            print!(",");
        }
        print!("{}:{}", tile, count);
    }
    println!();
}
