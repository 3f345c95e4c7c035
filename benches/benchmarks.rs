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
        exhausting_council_lattice,
        exhausting_distinct_permutations,
        completing_council_table,
        solving_council_shapley,
        solving_council_banzhaf,
        sampling_glove_shapley,
}

fn council() -> Population<String> {
    Population::<String>::try_from("P:5,T:10").expect("population")
}

fn exhausting_council_lattice(c: &mut criterion::Criterion) {
    let population = council();
    c.bench_function("walk the 1965 Council lattice", |b| {
        b.iter(|| LatticeWalk::from(&population).count())
    });
}

fn exhausting_distinct_permutations(c: &mut criterion::Criterion) {
    let population = Population::new([(0u8, 3), (1, 3), (2, 3)]).expect("population");
    c.bench_function("exhaust distinct orderings of {3,3,3}", |b| {
        b.iter(|| DistinctPermutations::from(&population).count())
    });
}

fn completing_council_table(c: &mut criterion::Criterion) {
    let population = council();
    c.bench_function("complete the 1965 Council table", |b| {
        b.iter(|| Table::parse_grouped("P:5,T:4=1", &population))
    });
}

fn solving_council_shapley(c: &mut criterion::Criterion) {
    let game = security_council_1965().expect("council");
    c.bench_function("exact Shapley on the 1965 Council", |b| {
        b.iter(|| Shapley::values(&game))
    });
}

fn solving_council_banzhaf(c: &mut criterion::Criterion) {
    let game = security_council_1965().expect("council");
    c.bench_function("exact Banzhaf on the 1965 Council", |b| {
        b.iter(|| Banzhaf::values(&game))
    });
}

fn sampling_glove_shapley(c: &mut criterion::Criterion) {
    let game = glove_ungrouped().expect("glove");
    c.bench_function("sample 10k glove orderings", |b| {
        b.iter(|| Shapley::simulate_seeded(&game, 10_000, MONTE_CARLO_SEED))
    });
}

use coalitions::*;
