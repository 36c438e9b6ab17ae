//! Benchmarks for the non-EVM components of the simulation engine.
//!
//! Full end-to-end benchmarks would require compiled Solidity bytecode,
//! which this harness can't produce without a `solc` invocation at
//! benchmark time.

use criterion::{black_box, criterion_group, criterion_main, Criterion};

fn benchmark_wad_operations(c: &mut Criterion) {
    use amm_fee_arena::types::wad::Wad;

    let a = Wad::from_f64(1000.5);
    let b = Wad::from_f64(0.0025);

    c.bench_function("wad_wmul", |bench| bench.iter(|| black_box(a).wmul(black_box(b))));
    c.bench_function("wad_wdiv", |bench| bench.iter(|| black_box(a).wdiv(black_box(b))));
    c.bench_function("wad_sqrt", |bench| bench.iter(|| black_box(a).sqrt()));
}

fn benchmark_decimal_operations(c: &mut Criterion) {
    use amm_fee_arena::types::decimal::Decimal;

    let a = Decimal::from_f64(1000.5);
    let b = Decimal::from_f64(0.0025);

    c.bench_function("decimal_mul", |bench| bench.iter(|| black_box(a).mul(black_box(b))));
    c.bench_function("decimal_div", |bench| bench.iter(|| black_box(a).div(black_box(b))));
    c.bench_function("decimal_sqrt", |bench| bench.iter(|| black_box(a).sqrt()));
}

fn benchmark_price_process(c: &mut Criterion) {
    use amm_fee_arena::market::GBMPriceProcess;

    let mut process = GBMPriceProcess::new(100.0, 0.0, 0.001, 1.0, Some(42));

    c.bench_function("gbm_step", |bench| bench.iter(|| process.step()));
}

fn benchmark_trade_info_encoding(c: &mut Criterion) {
    use amm_fee_arena::types::trade_info::TradeInfo;
    use amm_fee_arena::types::wad::Wad;

    let trade = TradeInfo::new(
        true,
        Wad::from_f64(1.5),
        Wad::from_f64(1.5),
        100,
        Wad::from_f64(1001.5),
        Wad::from_f64(998.5),
    );

    let mut buffer = [0u8; 196];

    c.bench_function("trade_info_encode", |bench| {
        bench.iter(|| {
            trade.encode_calldata(&mut buffer);
            black_box(&buffer)
        })
    });
}

fn benchmark_retail_trader(c: &mut Criterion) {
    use amm_fee_arena::market::RetailTrader;

    let mut trader = RetailTrader::new(5.0, 2.0, 0.5, 0.5, Some(42));

    c.bench_function("retail_generate_orders", |bench| {
        bench.iter(|| black_box(trader.generate_orders()))
    });
}

fn benchmark_pool_trade(c: &mut Criterion) {
    use amm_fee_arena::amm::Pool;
    use amm_fee_arena::strategy::native::VanillaStrategy;
    use amm_fee_arena::types::decimal::Decimal;

    let mut pool = Pool::new(
        Box::new(VanillaStrategy::vanilla_30bps()),
        Decimal::from_i64(1_000_000),
        Decimal::from_i64(1_000_000),
    );
    pool.initialize().unwrap();

    c.bench_function("pool_execute_buy_x", |bench| {
        bench.iter(|| pool.execute_buy_x(black_box(Decimal::from_i64(10)), black_box(0)))
    });
}

criterion_group!(
    benches,
    benchmark_wad_operations,
    benchmark_decimal_operations,
    benchmark_price_process,
    benchmark_trade_info_encoding,
    benchmark_retail_trader,
    benchmark_pool_trade,
);

criterion_main!(benches);
