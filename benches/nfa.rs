use automata_nfa::prelude::*;
use automata_nfa::random::{generate_random_nfa, generate_random_words};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

/// Accepts the words over `{0, 1}` whose `k`-th symbol from the end is a `1`.
fn kth_from_last(k: usize) -> Nfa {
    let mut transitions = vec![(0, 0, 0), (0, 1, 0), (0, 1, 1)];
    for i in 1..k {
        transitions.extend([(i, 0, i + 1), (i, 1, i + 1)]);
    }
    NfaBuilder::default()
        .with_transitions(transitions)
        .with_initial([0])
        .with_final([k])
        .into_nfa()
        .expect("all states are in range")
}

fn bench_determinize(c: &mut Criterion) {
    let mut group = c.benchmark_group("determinize");
    for k in [4, 8, 12] {
        let nfa = kth_from_last(k);
        group.bench_with_input(BenchmarkId::from_parameter(k), &nfa, |b, nfa| {
            b.iter(|| black_box(nfa.determinize()))
        });
    }
    group.finish();
}

fn bench_intersection(c: &mut Criterion) {
    let mut group = c.benchmark_group("intersection");
    let mut rng = fastrand::Rng::with_seed(42);
    for size in [10, 50, 100] {
        let lhs = generate_random_nfa(&mut rng, 2, size, 0.05);
        let rhs = generate_random_nfa(&mut rng, 2, size, 0.05);
        group.bench_with_input(
            BenchmarkId::from_parameter(size),
            &(lhs, rhs),
            |b, (lhs, rhs)| b.iter(|| black_box(lhs.intersection(rhs))),
        );
    }
    group.finish();
}

fn bench_accepts(c: &mut Criterion) {
    let mut group = c.benchmark_group("accepts");
    let mut rng = fastrand::Rng::with_seed(7);
    let nfa = generate_random_nfa(&mut rng, 4, 200, 0.02);
    let words = generate_random_words(&mut rng, 4, 10, 100, 50);
    group.bench_function("random", |b| {
        b.iter(|| {
            words
                .iter()
                .filter(|word| nfa.accepts(word.iter().copied()))
                .count()
        })
    });
    group.bench_function("is_lang_empty", |b| b.iter(|| black_box(nfa.is_lang_empty())));
    group.finish();
}

criterion_group!(benches, bench_determinize, bench_intersection, bench_accepts);
criterion_main!(benches);
