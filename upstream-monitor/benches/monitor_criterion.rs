use criterion::{black_box, criterion_group, criterion_main, Criterion};
use tokio::runtime::Builder;
use upstream_monitor::benchmark_support::{
    run_callback_dispatch_once, PrefixFixture, SelectionFixture,
};

const SELECTION_ROWS: usize = 256;
const PREFIX_ROWS: usize = 512;
const DISPATCH_NETWORKS: usize = 64;

fn monitor_criterion(c: &mut Criterion) {
    let runtime = Builder::new_current_thread()
        .enable_all()
        .build()
        .expect("benchmark runtime should build");

    let selection_fixture = SelectionFixture::new(SELECTION_ROWS);
    let mut selection_group = c.benchmark_group("selection");
    selection_group.bench_function("legacy_priority_walk", |b| {
        b.iter(|| {
            let selected = selection_fixture.select_once();
            black_box(selected);
        });
    });
    selection_group.finish();

    let prefix_fixture = PrefixFixture::new(PREFIX_ROWS);
    let mut prefix_group = c.benchmark_group("prefix_aggregation");
    prefix_group.bench_function("recompute", |b| {
        b.iter(|| {
            let count = prefix_fixture.recompute_once();
            black_box(count);
        });
    });
    prefix_group.finish();

    let mut dispatch_group = c.benchmark_group("callback_dispatch");
    dispatch_group.bench_function("listen_all_lifecycle", |b| {
        b.iter(|| {
            let produced = runtime.block_on(run_callback_dispatch_once(DISPATCH_NETWORKS));
            black_box(produced);
        });
    });
    dispatch_group.finish();
}

criterion_group!(benches, monitor_criterion);
criterion_main!(benches);
