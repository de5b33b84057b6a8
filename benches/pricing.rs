use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rustaccum::prelude::*;

fn pricing_benchmark(c: &mut Criterion) {
    let market = MarketState::new(100.0, 0.25, 0.04, 180.0);
    let contract = ContractTerms {
        strike_price: 98.0,
        barrier_price: 112.0,
        notional: 1_000_000.0,
        leverage: 2.0,
        gearing_limit: 20,
        product_type: ProductType::Accumulator,
        frequency: Frequency::Daily,
    };

    c.bench_function("monte carlo price 2000 trials", |b| {
        let pricer = MonteCarloPricer::new()
            .with_num_simulations(SOLVER_NUM_SIMULATIONS)
            .with_seed(42);
        b.iter(|| {
            let result = pricer.price(&market, &contract).unwrap();
            black_box(result);
        })
    });
}

criterion_group!(benches, pricing_benchmark);
criterion_main!(benches);
