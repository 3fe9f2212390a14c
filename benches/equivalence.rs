use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use eqdfa::random::generate_random_dfa;

fn equivalence(c: &mut Criterion) {
    let mut group = c.benchmark_group("equivalence");
    for size in [4, 8, 16, 32] {
        let left = generate_random_dfa(2, size, 0.3);
        let right = generate_random_dfa(2, size, 0.3);
        group.bench_with_input(BenchmarkId::new("self", size), &left, |b, dfa| {
            b.iter(|| black_box(dfa.equivalent(dfa)))
        });
        group.bench_with_input(
            BenchmarkId::new("random", size),
            &(left, right),
            |b, (left, right)| b.iter(|| black_box(left.distinguishing_word(right))),
        );
    }
    group.finish();
}

criterion_group!(benches, equivalence);
criterion_main!(benches);
