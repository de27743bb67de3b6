use camaze::{
    dims::Dims,
    generator::{CellularGenerator, GenParams},
    progress::ProgressHandle,
    random::RngRandomness,
};
use criterion::{black_box, criterion_group, criterion_main, Criterion};

const DIMS: Dims = Dims(60, 40);

pub fn automaton_default(c: &mut Criterion) {
    let generator = CellularGenerator::new(GenParams::default()).unwrap();
    c.bench_function("automaton_default", |b| {
        b.iter(|| {
            let mut rng = RngRandomness::seeded(1);
            generator
                .generate(black_box(DIMS), &mut rng, ProgressHandle::new())
                .unwrap()
        })
    });
}

pub fn automaton_bushy(c: &mut Criterion) {
    let generator = CellularGenerator::new(GenParams::new(60, 0)).unwrap();
    c.bench_function("automaton_bushy", |b| {
        b.iter(|| {
            let mut rng = RngRandomness::seeded(1);
            generator
                .generate(black_box(DIMS), &mut rng, ProgressHandle::new())
                .unwrap()
        })
    });
}

criterion_group! {name = benches; config = Criterion::default().sample_size(10); targets = automaton_default, automaton_bushy}
criterion_main!(benches);
