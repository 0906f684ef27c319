//! Running several tour properties concurrently.

use crate::config;
use propcheck::coin::{Coin, NormalPair};
use propcheck::*;

fn normal_pairs_add() -> Property<NormalPair> {
    for_all(arbitrary::<NormalPair>(), |&NormalPair(a, b)| a.add(b).is_ok())
}

fn coins_are_small() -> Property<NormalPair> {
    for_all(arbitrary::<NormalPair>(), |&NormalPair(a, _)| a.amount() < 10)
}

#[test]
fn suite_reports_each_property() {
    let report = Suite::new(config())
        .with_threads(2)
        .add("normal pairs add", normal_pairs_add)
        .add("coins are small", coins_are_small)
        .add("coins fit the cap", || {
            for_all(arbitrary::<Coin>(), |coin| Coin::new(coin.amount()).is_ok())
        })
        .run();

    assert!(!report.all_passed());
    assert!(report.get("normal pairs add").unwrap().passed());
    assert!(report.get("coins fit the cap").unwrap().passed());

    let failures: Vec<&str> = report.failures().map(|r| r.name.as_str()).collect();
    assert_eq!(failures, vec!["coins are small"]);
    assert!(matches!(
        report.get("coins are small").unwrap().error,
        Some(PropcheckError::PropertyFailed { .. })
    ));
}

#[test]
fn run_all_shares_one_configuration() {
    let report = run_all(
        config().with_tests(25),
        vec![
            ("first", normal_pairs_add as fn() -> Property<NormalPair>),
            ("second", normal_pairs_add),
        ],
    );
    assert!(report.all_passed());
    assert!(report.results.iter().all(|result| result.tests_run == 25));
}
