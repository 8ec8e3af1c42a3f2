//! Criterion benchmarks for the reachability engine.

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, Criterion};

use reach_analysis::Analyzer;
use reach_core::config::AnalysisConfig;
use reach_core::model::ProgramModel;
use reach_core::types::DispatchKind;

/// A linear static call chain of `n` methods.
fn linear_chain(n: usize) -> ProgramModel {
    let mut b = ProgramModel::builder();
    for i in 0..n {
        let c = b.class(&format!("p.C{}", i));
        let m = c.method("m", "()V").static_method();
        if i + 1 < n {
            m.call(DispatchKind::Static, &format!("p.C{}", i + 1), "m", "()V");
        }
    }
    b.build().expect("valid model")
}

/// A wide virtual fan: one base method overridden by `n` subclasses.
fn virtual_fan(n: usize) -> ProgramModel {
    let mut b = ProgramModel::builder();
    {
        let c = b.class("p.Base");
        c.method("m", "()V");
    }
    for i in 0..n {
        let c = b.class(&format!("p.Sub{}", i));
        c.extends("p.Base");
        c.method("m", "()V");
    }
    {
        let c = b.class("p.Main");
        c.method("main", "()V")
            .static_method()
            .call(DispatchKind::Virtual, "p.Base", "m", "()V");
    }
    b.build().expect("valid model")
}

fn bench_linear_closure(c: &mut Criterion) {
    let model = linear_chain(1000);
    let analyzer = Analyzer::new(&model, AnalysisConfig::default());
    let entry = model.lookup_method("p.C0", "m", "()V").expect("entry");

    c.bench_function("closure_linear_1000", |b| {
        b.iter(|| analyzer.reachable_from(black_box(&[entry])).expect("closure"))
    });
}

fn bench_virtual_fan(c: &mut Criterion) {
    let model = virtual_fan(500);
    let analyzer = Analyzer::new(&model, AnalysisConfig::default());
    let entry = model.lookup_method("p.Main", "main", "()V").expect("entry");

    c.bench_function("closure_virtual_fan_500", |b| {
        b.iter(|| analyzer.reachable_from(black_box(&[entry])).expect("closure"))
    });
}

fn bench_hierarchy_build(c: &mut Criterion) {
    let model = virtual_fan(500);

    c.bench_function("analyzer_build_fan_500", |b| {
        b.iter(|| Analyzer::new(black_box(&model), AnalysisConfig::default()))
    });
}

criterion_group!(
    benches,
    bench_linear_closure,
    bench_virtual_fan,
    bench_hierarchy_build
);
criterion_main!(benches);
