//! The combinators the tour is built on, checked through the runner.

use crate::config;
use propcheck::partition;
use propcheck::*;

#[test]
fn lists_shrink_to_a_single_minimal_element() {
    let report = for_all_named(Gen::list_of(Gen::int_range(0, 100)), "xs", |xs: &Vec<i32>| {
        xs.iter().all(|&x| x < 10)
    })
    .run(&config())
    .unwrap();

    let counterexample = report.counterexample().expect("large elements are generated");
    assert_eq!(counterexample.value, vec![10]);
    assert!(counterexample.shrinks > 0);
    assert!(report.to_string().contains("forAll"));
}

#[test]
fn partition_generators_stay_in_their_partition() {
    let cap = 1_000;
    for_all(partition::sum_within(cap), move |&(a, b)| a + b <= cap)
        .run(&config())
        .unwrap()
        .assert_pass();
    for_all(partition::sum_exceeding(cap).unwrap(), move |&(a, b)| {
        a + b > cap && a <= cap && b <= cap
    })
    .run(&config())
    .unwrap()
    .assert_pass();
    for_all(partition::boundary_biased(cap), move |&v| v <= cap)
        .run(&config())
        .unwrap()
        .assert_pass();
}

#[test]
fn overflow_partition_rejects_a_zero_cap() {
    assert!(matches!(
        partition::sum_exceeding(0),
        Err(PropcheckError::InvalidGenerator { .. })
    ));
}

#[test]
fn shrinks_stay_in_the_overflow_partition() {
    let report = for_all(partition::sum_exceeding(50).unwrap(), |&(a, b)| a + b < 60)
        .run(&config())
        .unwrap();
    let (a, b) = report.counterexample().expect("sums reach 100").value;
    assert!(a + b > 50 && a <= 50 && b <= 50);
    assert!(a + b >= 60);
}

#[test]
fn exhausted_filters_stop_the_run() {
    let never = Gen::int_range(0, 10).filter(|&x| x > 10);
    let report = for_all(never, |_| true).run(&config()).unwrap();
    assert!(matches!(report.outcome, RunOutcome::Exhausted(_)));
    assert!(matches!(
        report.into_result(),
        Err(PropcheckError::GenerationExhausted(_))
    ));
}

#[test]
fn too_many_discards_gives_up() {
    let report = property(Gen::int_range(0, 100), |&x| {
        Outcome::implies(x > 1_000, || true)
    })
    .run(&config().with_discards(20))
    .unwrap();
    assert_eq!(report.outcome, RunOutcome::GaveUp { discards: 20 });
}

#[test]
fn invalid_configurations_are_rejected() {
    let prop = for_all(Gen::bool(), |_| true);
    assert!(matches!(
        prop.run(&config().with_tests(0)),
        Err(PropcheckError::InvalidConfig { .. })
    ));
    assert!(matches!(
        prop.run(&config().with_size_range(50, 10)),
        Err(PropcheckError::InvalidConfig { .. })
    ));
}

#[test]
fn missing_coverage_is_reported() {
    let report = for_all(Gen::int_range(0, 100), |_| true)
        .cover(50.0, "negative", |&x| x < 0)
        .run(&config())
        .unwrap();
    match report.outcome {
        RunOutcome::InsufficientCoverage { label, actual, .. } => {
            assert_eq!(label, "negative");
            assert_eq!(actual, 0.0);
        }
        other => panic!("expected insufficient coverage, got {other:?}"),
    }
}

#[test]
fn the_same_seed_replays_the_same_run() {
    let prop = for_all(Gen::list_of(Gen::int_range(-50, 50)), |xs: &Vec<i32>| xs.len() < 30);
    let first = prop.run(&config()).unwrap();
    let second = prop.run(&config()).unwrap();
    assert_eq!(first, second);
}
