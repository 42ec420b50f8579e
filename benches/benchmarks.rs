criterion::criterion_main!(benches);
criterion::criterion_group! {
    name = benches;
    config = criterion::Criterion::default()
        .without_plots()
        .noise_threshold(3.0)
        .significance_level(0.01)
        .sample_size(10)
        .measurement_time(std::time::Duration::from_secs(1));
    targets =
        sampling_thompson_posterior,
        planning_posts_rocksample,
        planning_poolts_rocksample,
        planning_symbol_rocksample,
}

fn params() -> SearchParams {
    SearchParams {
        max_depth: 10,
        num_simulations: 64,
        num_start_states: 64,
        max_attempts: 1024,
        seed: 1,
        ..SearchParams::default()
    }
}

fn sampling_thompson_posterior(c: &mut criterion::Criterion) {
    c.bench_function("sample a warm Thompson bandit", |b| {
        let mut bandit = Thompson::new(13, 0, 1, 1., Rng::seeded(1));
        let legal = (0..13).collect::<Vec<usize>>();
        for _ in 0..256 {
            bandit.sample_from(&legal);
            bandit.update(1.);
        }
        b.iter(|| bandit.sample_from(&legal))
    });
}

fn planning_posts_rocksample(c: &mut criterion::Criterion) {
    c.bench_function("posts plans one rocksample action", |b| {
        let mut planner = Posts::new(RockSample::new(7, 8), params());
        b.iter(|| planner.select_action())
    });
}

fn planning_poolts_rocksample(c: &mut criterion::Criterion) {
    c.bench_function("poolts plans one rocksample action", |b| {
        let mut planner = Poolts::new(RockSample::new(7, 8), params());
        b.iter(|| planner.select_action())
    });
}

fn planning_symbol_rocksample(c: &mut criterion::Criterion) {
    c.bench_function("symbol plans one rocksample action", |b| {
        let mut planner = Symbol::new(RockSample::new(7, 8), params());
        b.iter(|| planner.select_action())
    });
}

use beliefsearch::bandit::bandit::Bandit;
use beliefsearch::bandit::thompson::Thompson;
use beliefsearch::domain::rocksample::RockSample;
use beliefsearch::search::params::SearchParams;
use beliefsearch::search::planner::Planner;
use beliefsearch::search::poolts::Poolts;
use beliefsearch::search::posts::Posts;
use beliefsearch::search::rng::Rng;
use beliefsearch::search::symbol::Symbol;
