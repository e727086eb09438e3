use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use sc_challenges::set_cover::{baselines::greedy, Instance, Track};

fn bench_greedy(c: &mut Criterion) {
    let mut group = c.benchmark_group("greedy");
    for &(num_elements, num_subsets) in &[(1_000, 200), (10_000, 2_000), (50_000, 5_000)] {
        let track = Track {
            num_elements,
            num_subsets,
        };
        let instance = Instance::generate_instance(&[0u8; 32], &track).unwrap();
        group.bench_with_input(
            BenchmarkId::from_parameter(format!("{}x{}", num_elements, num_subsets)),
            &instance,
            |b, instance| b.iter(|| greedy::solve(black_box(instance)).unwrap()),
        );
    }
    group.finish();
}

criterion_group!(benches, bench_greedy);
criterion_main!(benches);
