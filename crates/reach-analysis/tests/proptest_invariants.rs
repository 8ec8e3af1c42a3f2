//! Property-based tests for engine invariants.
//!
//! Uses proptest to fuzz-verify over randomly shaped class hierarchies and
//! call structures:
//!   - Determinism of the rendered summary
//!   - Idempotent membership of reachable sets
//!   - Monotonicity under union of entries
//!   - Termination and bounded results on arbitrary (cyclic) call shapes
//!
//! Tests prefixed `regression_gate_` are CI SLO gates — failures here
//! block merge. Run with: `cargo test regression_gate_`

use proptest::prelude::*;

use reach_analysis::reachability::render_summary;
use reach_analysis::Analyzer;
use reach_core::config::AnalysisConfig;
use reach_core::model::ProgramModel;
use reach_core::types::DispatchKind;

/// One generated class: superclass seed and call seeds for its method.
type ClassSpec = (usize, Vec<(usize, u8)>);

/// Build a model from generated specs. Class `i` extends some earlier
/// class (keeping the hierarchy a DAG), declares `m()V`, and calls the
/// `m()V` of other generated classes with a generated dispatch kind.
fn build_model(specs: &[ClassSpec]) -> ProgramModel {
    let mut b = ProgramModel::builder();
    for (i, (sup, calls)) in specs.iter().enumerate() {
        let c = b.class(&format!("p.C{}", i));
        if i > 0 {
            c.extends(&format!("p.C{}", sup % i));
        }
        let m = c.method("m", "()V").static_method();
        for (target, kind) in calls {
            let kind = match kind % 3 {
                0 => DispatchKind::Static,
                1 => DispatchKind::Virtual,
                _ => DispatchKind::Special,
            };
            m.call(kind, &format!("p.C{}", target % specs.len()), "m", "()V");
        }
    }
    b.build().expect("generated hierarchy is a DAG")
}

fn class_specs() -> impl Strategy<Value = Vec<ClassSpec>> {
    prop::collection::vec(
        (
            0usize..16,
            prop::collection::vec((0usize..16, any::<u8>()), 0..4),
        ),
        1..12,
    )
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    /// REGRESSION GATE: identical input yields a byte-identical summary on
    /// repeated runs, parallel or not.
    #[test]
    fn regression_gate_determinism(specs in class_specs()) {
        let model = build_model(&specs);
        let parallel = Analyzer::new(&model, AnalysisConfig::default());
        let sequential = Analyzer::new(&model, AnalysisConfig {
            parallel_entries: Some(false),
            ..Default::default()
        });

        let a = parallel.analyze_all().expect("closure");
        let b = parallel.analyze_all().expect("closure");
        let c = sequential.analyze_all().expect("closure");

        let sa = render_summary(&model, &a.data);
        prop_assert_eq!(&sa, &render_summary(&model, &b.data));
        prop_assert_eq!(&sa, &render_summary(&model, &c.data));
    }

    /// REGRESSION GATE: no signature appears twice in a reachable set.
    #[test]
    fn regression_gate_idempotent_membership(specs in class_specs()) {
        let model = build_model(&specs);
        let analyzer = Analyzer::new(&model, AnalysisConfig::default());

        let report = analyzer.analyze_all().expect("closure");
        for result in &report.data {
            let mut deduped = result.reachable.clone();
            deduped.dedup();
            prop_assert_eq!(deduped.len(), result.reachable.len());
        }
    }

    /// REGRESSION GATE: a joint query over two entries equals the union of
    /// the individual queries, entry by entry.
    #[test]
    fn regression_gate_union_of_entries(specs in class_specs()) {
        prop_assume!(specs.len() >= 2);
        let model = build_model(&specs);
        let analyzer = Analyzer::new(&model, AnalysisConfig::default());
        let first = model.lookup_method("p.C0", "m", "()V").expect("entry");
        let second = model.lookup_method("p.C1", "m", "()V").expect("entry");

        let joint = analyzer.reachable_from(&[first, second]).expect("closure");
        let solo_first = analyzer.reachable_from(&[first]).expect("closure");
        let solo_second = analyzer.reachable_from(&[second]).expect("closure");

        prop_assert_eq!(&joint.data[0].reachable, &solo_first.data[0].reachable);
        prop_assert_eq!(&joint.data[1].reachable, &solo_second.data[0].reachable);
    }

    /// Reachable sets are bounded by the finite signature universe: every
    /// reachable signature is a declared method of some generated class.
    #[test]
    fn prop_reachable_bounded_by_universe(specs in class_specs()) {
        let model = build_model(&specs);
        let analyzer = Analyzer::new(&model, AnalysisConfig::default());

        let report = analyzer.analyze_all().expect("closure");
        for result in &report.data {
            prop_assert!(result.reachable.len() <= model.method_count());
            for sig in &result.reachable {
                prop_assert!(model.method(sig).is_some());
            }
        }
    }

    /// The engine never panics and always terminates on arbitrary shapes,
    /// diagnostics included.
    #[test]
    fn prop_terminates_with_clean_or_diagnosed_report(specs in class_specs()) {
        let model = build_model(&specs);
        let analyzer = Analyzer::new(&model, AnalysisConfig::default());

        let report = analyzer.analyze_all().expect("closure");
        // Every diagnostic is unique (the report deduplicates).
        let mut seen = std::collections::HashSet::new();
        for diagnostic in &report.diagnostics {
            let rendered = format!("{}", diagnostic);
            prop_assert!(seen.insert(rendered));
        }
    }
}
