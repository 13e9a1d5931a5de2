//! Benchmarks for the sequence-form CFR/CFR+ self-play driver.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use sequence_form_cfr::cfr::{CFRConfig, SelfPlayDriver};
use sequence_form_cfr::games::kuhn;

fn kuhn_iteration_benchmark(c: &mut Criterion) {
    let loaded = kuhn::generate().unwrap();
    let config = CFRConfig::default();
    let mut driver = SelfPlayDriver::new(&loaded.treeplex_pl1, &loaded.treeplex_pl2, &loaded.payoff, &config);

    c.bench_function("kuhn_single_iteration", |b| {
        b.iter(|| {
            driver.run_iteration();
            black_box(driver.iteration())
        })
    });
}

fn kuhn_1000_iterations_benchmark(c: &mut Criterion) {
    let loaded = kuhn::generate().unwrap();
    c.bench_function("kuhn_1000_iterations", |b| {
        b.iter(|| {
            let config = CFRConfig::default();
            let mut driver = SelfPlayDriver::new(&loaded.treeplex_pl1, &loaded.treeplex_pl2, &loaded.payoff, &config);
            for _ in 0..black_box(1000) {
                driver.run_iteration();
            }
            black_box(driver.exploitability().unwrap())
        })
    });
}

criterion_group!(benches, kuhn_iteration_benchmark, kuhn_1000_iterations_benchmark);
criterion_main!(benches);
