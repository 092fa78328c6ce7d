use criterion::{black_box, criterion_group, criterion_main, Criterion};
use posekit_sequence_core::{
    MemorySource, PlaybackConfig, PlaybackController, SequenceStore, Trigger,
};

fn store(n: usize) -> SequenceStore {
    SequenceStore::from_rows(
        (0..n)
            .map(|i| {
                let t = i as f64 * 0.01;
                [t.cos(), t.sin(), 0.5, 0.0, 0.1, t]
            })
            .collect(),
    )
}

fn bench_step(c: &mut Criterion) {
    let cfg = PlaybackConfig {
        read_on_init: false,
        ..PlaybackConfig::default().with_loop(true)
    };
    let mut ctrl = PlaybackController::with_store(cfg, MemorySource::new(), store(10_000));
    c.bench_function("step_auto_loop_10k", |b| {
        b.iter(|| {
            let out = ctrl.step();
            black_box(out.transform);
        })
    });

    let mut ctrl = PlaybackController::with_store(
        PlaybackConfig {
            read_on_init: false,
            ..PlaybackConfig::triggered().with_loop(true)
        },
        MemorySource::new(),
        store(10_000),
    );
    c.bench_function("step_triggered_10k", |b| {
        b.iter(|| {
            ctrl.trigger(Trigger::Next);
            ctrl.trigger(Trigger::Publish);
            black_box(ctrl.step().index);
        })
    });
}

fn bench_reload(c: &mut Criterion) {
    let rows: Vec<Vec<f64>> = (0..1_000).map(|i| vec![i as f64, 0.0, 0.0, 0.0, 0.0, 0.0]).collect();
    let doc = serde_json::json!({ "XYZRPY": rows }).to_string();
    let source = MemorySource::new().with("seq", doc);
    let cfg = PlaybackConfig::default().with_source_path("seq");
    let mut ctrl = PlaybackController::new(cfg, source);
    c.bench_function("reload_1k_rows", |b| {
        b.iter(|| {
            ctrl.trigger(Trigger::Reload);
            black_box(ctrl.step().events.len());
        })
    });
}

criterion_group!(benches, bench_step, bench_reload);
criterion_main!(benches);
