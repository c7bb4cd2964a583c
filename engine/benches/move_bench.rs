use criterion::{Criterion, criterion_group, criterion_main};
use engine::game::{Direction, GameManager, InputEvent};
use engine::session_rng::SessionRng;
use engine::settings::GameSettings;
use engine::storage::MemoryStore;

fn create_manager(seed: u64) -> GameManager {
    GameManager::new(
        GameSettings::default(),
        SessionRng::new(seed),
        Box::new(MemoryStore::new()),
    )
    .unwrap()
}

fn bench_full_game_cycle_policy(c: &mut Criterion) {
    c.bench_function("full_game_cycle_policy", |b| {
        b.iter(|| {
            let mut manager = create_manager(42);
            let order = [
                Direction::Left,
                Direction::Down,
                Direction::Right,
                Direction::Up,
            ];
            let mut step = 0usize;
            while manager.moves_available() && step < 10_000 {
                manager.handle(InputEvent::Move(order[step % 4]));
                step += 1;
            }
            manager.score()
        });
    });
}

fn bench_single_move_dense_board(c: &mut Criterion) {
    // play a game forward so the board carries a realistic tile load,
    // keeping the last snapshot that is still resumable
    let mut seeded = create_manager(7);
    let mut saved = seeded.serialize();
    for _ in 0..200 {
        for direction in Direction::all() {
            seeded.handle(InputEvent::Move(direction));
            if !seeded.game_state().over {
                saved = seeded.serialize();
            }
        }
    }

    c.bench_function("single_move_dense_board", |b| {
        b.iter(|| {
            let mut store = MemoryStore::new();
            engine::storage::StateStore::save(&mut store, &saved);
            let mut manager = GameManager::new(
                GameSettings::default(),
                SessionRng::new(7),
                Box::new(store),
            )
            .unwrap();
            manager.handle(InputEvent::Move(Direction::Left));
            manager.score()
        });
    });
}

fn bench_moves_available_dense_board(c: &mut Criterion) {
    let mut manager = create_manager(11);
    for _ in 0..300 {
        for direction in Direction::all() {
            manager.handle(InputEvent::Move(direction));
        }
    }

    c.bench_function("moves_available_dense_board", |b| {
        b.iter(|| manager.moves_available());
    });
}

criterion_group!(
    benches,
    bench_full_game_cycle_policy,
    bench_single_move_dense_board,
    bench_moves_available_dense_board
);
criterion_main!(benches);
