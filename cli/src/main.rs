mod headless;
mod input;
mod presenter;

use clap::Parser;
use engine::game::GameManager;
use engine::log;
use engine::logger;
use engine::session_rng::SessionRng;
use engine::settings::GameSettings;
use engine::storage::{MemoryStore, StateStore, YamlFileStore};

use headless::{HeadlessOptions, Policy};
use input::KeyCommand;
use presenter::TerminalPresenter;

#[derive(Parser)]
#[command(name = "game2048")]
#[command(about = "Sliding-tile merge game: play in the terminal or run simulations")]
struct Args {
    /// Optional YAML settings file (grid size, target value, spawn odds)
    #[arg(long)]
    config: Option<String>,

    /// Directory for saved state and best score
    #[arg(long, default_value = ".game2048")]
    data_dir: String,

    /// Keep everything in memory, nothing written to disk
    #[arg(long)]
    no_save: bool,

    /// Random seed; omitted means a random session
    #[arg(short, long)]
    seed: Option<u64>,

    /// Number of episodes to run headless instead of interactively
    #[arg(short, long)]
    episodes: Option<u32>,

    /// Policy for headless mode
    #[arg(long, value_enum, default_value = "random")]
    policy: Policy,

    /// Maximum moves per headless episode (0 = unlimited)
    #[arg(long, default_value = "10000")]
    max_steps: u32,

    /// Log per-episode results in headless mode
    #[arg(long)]
    verbose: bool,

    #[arg(long)]
    use_log_prefix: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let prefix = if args.use_log_prefix {
        Some("Game2048".to_string())
    } else {
        None
    };
    logger::init_logger(prefix);

    let settings = match args.config {
        Some(ref path) => GameSettings::from_yaml_file(path)?,
        None => GameSettings::default(),
    };

    if let Some(episodes) = args.episodes {
        let options = HeadlessOptions {
            episodes,
            seed: args.seed.unwrap_or(42),
            max_steps: args.max_steps,
            policy: args.policy,
            verbose: args.verbose,
        };
        headless::run(settings, &options)?;
        return Ok(());
    }

    run_interactive(&args, settings)
}

fn run_interactive(args: &Args, settings: GameSettings) -> Result<(), Box<dyn std::error::Error>> {
    let store: Box<dyn StateStore> = if args.no_save {
        Box::new(MemoryStore::new())
    } else {
        Box::new(YamlFileStore::new(&args.data_dir))
    };
    let rng = match args.seed {
        Some(seed) => SessionRng::new(seed),
        None => SessionRng::from_random(),
    };
    log!("Starting session with seed {}", rng.seed());

    let mut manager = GameManager::new(settings, rng, store)?;
    manager.add_observer(Box::new(TerminalPresenter::new()));

    input::enable_raw_mode();
    manager.actuate();

    let mut stdin = std::io::stdin();
    loop {
        match input::read_command(&mut stdin) {
            KeyCommand::Game(event) => manager.handle(event),
            KeyCommand::Quit => break,
            KeyCommand::None => {}
        }
    }
    input::disable_raw_mode();

    println!(
        "\nFinal score {} (best {}), highest tile {}, {} moves.",
        manager.score(),
        manager.best_score(),
        manager.max_tile(),
        manager.moves_made()
    );
    Ok(())
}
