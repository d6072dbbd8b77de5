//! Benchmarks for the simulation engine and outs enumeration.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use poker_odds::sim::beating_hands;
use poker_odds::{parse_cards, Evaluator, GameState, SimConfig, Simulator, StandardEvaluator};

fn flop_state() -> GameState {
    let mut state = GameState::new(6, "As Kd".parse().unwrap(), Some(42)).unwrap();
    state.update_board(&parse_cards("Ah 7c 2d").unwrap());
    state
}

fn evaluate_seven_cards_benchmark(c: &mut Criterion) {
    let evaluator = StandardEvaluator::new();
    let hand = parse_cards("As Kd").unwrap();
    let board = parse_cards("Ah 7c 2d Ks 9h").unwrap();

    c.bench_function("evaluate_seven_cards", |b| {
        b.iter(|| evaluator.evaluate(black_box(&hand), black_box(&board)))
    });
}

fn equity_10000_trials_benchmark(c: &mut Criterion) {
    let snapshot = flop_state().snapshot();
    let config = SimConfig::default().with_trials(10_000).with_seed(42);
    let simulator = Simulator::standard(config).unwrap();

    c.bench_function("equity_6max_flop_10000_trials", |b| {
        b.iter(|| simulator.equity(black_box(&snapshot)).unwrap())
    });
}

fn single_thread_benchmark(c: &mut Criterion) {
    let snapshot = flop_state().snapshot();
    let config = SimConfig::default()
        .with_trials(10_000)
        .with_seed(42)
        .with_threads(1);
    let simulator = Simulator::standard(config).unwrap();

    c.bench_function("equity_6max_flop_10000_trials_1_thread", |b| {
        b.iter(|| simulator.equity(black_box(&snapshot)).unwrap())
    });
}

fn outs_benchmark(c: &mut Criterion) {
    let evaluator = StandardEvaluator::new();
    let snapshot = flop_state().snapshot();

    c.bench_function("beating_hands_flop", |b| {
        b.iter(|| beating_hands(&evaluator, black_box(&snapshot)))
    });
}

criterion_group!(
    benches,
    evaluate_seven_cards_benchmark,
    equity_10000_trials_benchmark,
    single_thread_benchmark,
    outs_benchmark
);
criterion_main!(benches);
