//! Tests for the Reach error handling system.

use std::collections::HashSet;

use reach_core::errors::error_code::{self, ReachErrorCode};
use reach_core::errors::{AnalysisError, AnalysisReport, ConfigError, Diagnostic, ModelError};

/// T0-ERR-01: Every error enum has a ReachErrorCode implementation.
#[test]
fn test_all_errors_have_error_code() {
    let model = ModelError::DuplicateClass {
        name: "a.B".into(),
    };
    assert!(!model.error_code().is_empty());

    let config = ConfigError::ValidationFailed {
        field: "analysis.max_worklist".into(),
        message: "must be greater than 0".into(),
    };
    assert!(!config.error_code().is_empty());

    let analysis = AnalysisError::UnknownEntry {
        signature: "a.B#m()V".into(),
    };
    assert!(!analysis.error_code().is_empty());

    let diagnostic = Diagnostic::HierarchyGap {
        class: "a.B".into(),
        missing: "lib.Gone".into(),
    };
    assert!(!diagnostic.error_code().is_empty());
}

/// T0-ERR-02: From conversions between sub-errors and the top-level error.
#[test]
fn test_from_conversions() {
    let model = ModelError::DuplicateClass {
        name: "a.B".into(),
    };
    let analysis: AnalysisError = model.into();
    assert!(matches!(analysis, AnalysisError::Model(_)));
    assert_eq!(analysis.error_code(), error_code::MALFORMED_INPUT);

    let config = ConfigError::FileNotFound {
        path: "/tmp/reach.toml".into(),
    };
    let analysis: AnalysisError = config.into();
    assert!(matches!(analysis, AnalysisError::Config(_)));
    assert_eq!(analysis.error_code(), error_code::CONFIG_ERROR);
}

/// T0-ERR-03: Log string format is `[ERROR_CODE] message`.
#[test]
fn test_log_string_format() {
    let err = ModelError::DuplicateMethod {
        signature: "a.B#m()V".into(),
    };
    let log = err.log_string();
    assert_eq!(log, "[MALFORMED_INPUT] Duplicate method declaration: a.B#m()V");
}

/// T0-ERR-04: Every variant's Display produces a human-readable message.
#[test]
fn test_display_human_readable() {
    let errors: Vec<Box<dyn std::fmt::Display>> = vec![
        Box::new(ModelError::DuplicateClass { name: "a.B".into() }),
        Box::new(ModelError::DuplicateMethod {
            signature: "a.B#m()V".into(),
        }),
        Box::new(ModelError::RootHasSuperclass {
            root: "java.lang.Object".into(),
            superclass: "a.B".into(),
        }),
        Box::new(ModelError::InheritanceCycle { class: "a.B".into() }),
        Box::new(ConfigError::FileNotFound {
            path: "/tmp".into(),
        }),
        Box::new(ConfigError::ParseError {
            path: "<string>".into(),
            message: "bad toml".into(),
        }),
        Box::new(AnalysisError::UnknownEntry {
            signature: "a.B#m()V".into(),
        }),
        Box::new(AnalysisError::WorklistExceeded { limit: 10 }),
        Box::new(Diagnostic::UnresolvedTarget {
            caller: "a.B#m()V".into(),
            target: "gone.C#x()V".into(),
        }),
        Box::new(Diagnostic::HierarchyGap {
            class: "a.B".into(),
            missing: "lib.Gone".into(),
        }),
    ];

    for error in &errors {
        let msg = error.to_string();
        assert!(!msg.contains("{ "), "Debug leak in: {}", msg);
        assert!(!msg.is_empty());
    }
}

/// T0-ERR-05: Error codes are unique.
#[test]
fn test_error_codes_unique() {
    let codes = vec![
        error_code::MALFORMED_INPUT,
        error_code::CONFIG_ERROR,
        error_code::UNKNOWN_ENTRY,
        error_code::WORKLIST_EXCEEDED,
        error_code::UNRESOLVED_TARGET,
        error_code::HIERARCHY_GAP,
    ];

    let unique: HashSet<&str> = codes.iter().copied().collect();
    assert_eq!(codes.len(), unique.len(), "Duplicate error codes found");
}

/// T0-ERR-06: AnalysisReport accumulates diagnostics without duplicates.
#[test]
fn test_report_accumulates_and_dedups() {
    let mut report = AnalysisReport::new(vec!["result".to_string()]);
    assert!(report.is_clean());

    let gap = Diagnostic::HierarchyGap {
        class: "a.B".into(),
        missing: "lib.Gone".into(),
    };
    report.push(gap.clone());
    report.push(gap.clone());
    report.extend(vec![
        gap,
        Diagnostic::UnresolvedTarget {
            caller: "a.B#m()V".into(),
            target: "gone.C#x()V".into(),
        },
    ]);

    assert!(!report.is_clean());
    assert_eq!(report.diagnostic_count(), 2);
    // Data is still accessible alongside the diagnostics.
    assert_eq!(report.data.len(), 1);
}

/// T0-ERR-07: Diagnostics carry stable machine-readable codes.
#[test]
fn test_diagnostic_codes() {
    let unresolved = Diagnostic::UnresolvedTarget {
        caller: "a.B#m()V".into(),
        target: "gone.C#x()V".into(),
    };
    assert_eq!(unresolved.code(), "UNRESOLVED_TARGET");

    let gap = Diagnostic::HierarchyGap {
        class: "a.B".into(),
        missing: "lib.Gone".into(),
    };
    assert_eq!(gap.code(), "HIERARCHY_GAP");
}

/// T0-ERR-08: AnalysisReport::map carries diagnostics over.
#[test]
fn test_report_map_preserves_diagnostics() {
    let mut report = AnalysisReport::new(3usize);
    report.push(Diagnostic::HierarchyGap {
        class: "a.B".into(),
        missing: "lib.Gone".into(),
    });

    let mapped = report.map(|n| n * 2);
    assert_eq!(mapped.data, 6);
    assert_eq!(mapped.diagnostic_count(), 1);
}
