//! Snapshots of the case registry and the run-report format.

use gw_unit_tests::{CaseOutcome, DECLARED_CASES, HarnessError, PENDING_CASES, RunReport};

#[test]
fn declared_cases() {
    insta::assert_snapshot!("declared_cases", DECLARED_CASES.join("\n"));
}

#[test]
fn pending_cases() {
    insta::assert_snapshot!("pending_cases", PENDING_CASES.join("\n"));
}

#[test]
fn pending_and_declared_cases_are_disjoint() {
    for name in PENDING_CASES {
        assert!(!DECLARED_CASES.contains(name), "{name} is both declared and pending");
    }
    assert!(DECLARED_CASES.contains(&"TestGwdComputeStressProfiles"));
    assert!(PENDING_CASES.contains(&"TestGwdComputeDiffusivities"));
}

#[test]
fn run_report_json() {
    let report = RunReport {
        device: "HostSerial".into(),
        pack_size: 4,
        max_pack_size: 16,
        num_test_itrs: 4,
        cases: vec![
            CaseOutcome { name: "gw_prof".into(), passed: true, error: None, duration_ms: 12 },
            CaseOutcome {
                name: "gw_storm_speed".into(),
                passed: false,
                error: Some("storm level at pver = 5 was accepted".into()),
                duration_ms: 3,
            },
        ],
    };
    insta::assert_snapshot!("run_report_json", report.to_json().unwrap());
}

#[test]
fn mismatch_message() {
    let err = HarnessError::Mismatch {
        field: "col 1 pver 5 ni".into(),
        index: 3,
        expected: 0.0125,
        actual: 0.5,
        tolerance: 1e-12,
    };
    insta::assert_snapshot!("mismatch_message", err.to_string());
}
