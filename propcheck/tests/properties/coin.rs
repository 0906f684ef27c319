//! Coin addition over its three input partitions.

use crate::config;
use propcheck::coin::{self, Coin, CoinError, NormalPair, MAX_COINS};
use propcheck::*;
use std::sync::{Arc, Mutex};

fn coin(amount: u64) -> Coin {
    Coin::new(amount).unwrap()
}

#[test]
fn sums_within_the_cap_are_coins() {
    property(arbitrary::<NormalPair>(), |&NormalPair(a, b)| {
        let labels = coin::sum_labels(a, b);
        let outcome = Outcome::equal(
            &a.add(b).map(Coin::amount),
            &Ok(a.amount() + b.amount()),
        );
        labels.into_iter().fold(outcome, Outcome::label)
    })
    .require_coverage(100.0, "OK")
    .run(&config())
    .unwrap()
    .assert_pass();
}

#[test]
fn sums_above_the_cap_overflow() {
    let pairs = coin::overflowing_pairs().unwrap();
    for_all(pairs, |pair| pair.0.add(pair.1) == Err(CoinError::Overflow))
        .cover(100.0, "overflow", |pair| {
            coin::sum_labels(pair.0, pair.1).contains(&"overflow")
        })
        .run(&config())
        .unwrap()
        .assert_pass();
}

#[test]
fn boundary_sums() {
    assert_eq!(coin(MAX_COINS - 1).add(coin(1)), Ok(coin(MAX_COINS)));
    assert_eq!(coin(MAX_COINS).add(coin(1)), Err(CoinError::Overflow));
    assert_eq!(coin(MAX_COINS).add(coin(0)), Ok(coin(MAX_COINS)));
}

#[test]
fn sums_near_the_cap_follow_the_oracle() {
    let pairs = coin::boundary_coins().zip(coin::boundary_coins());
    property(pairs, |&(a, b)| {
        let expected = if a.amount() + b.amount() <= MAX_COINS {
            Ok(coin(a.amount() + b.amount()))
        } else {
            Err(CoinError::Overflow)
        };
        let outcome = Outcome::equal(&a.add(b), &expected);
        coin::sum_labels(a, b).into_iter().fold(outcome, Outcome::label)
    })
    .cover(30.0, "operand near an end", |(a, _)| {
        partition::is_boundary(MAX_COINS, a.amount())
    })
    .require_coverage(5.0, "boundary")
    .require_coverage(5.0, "overflow")
    .require_coverage(5.0, "OK")
    .run(&config().with_tests(200))
    .unwrap()
    .assert_pass();
}

#[test]
fn unconstrained_pairs_add_when_within_the_cap() {
    let pairs = arbitrary::<Coin>().zip(arbitrary::<Coin>());
    let report = property(pairs, |&(a, b)| {
        Outcome::implies(a.amount() + b.amount() <= MAX_COINS, || {
            a.add(b).map(Coin::amount) == Ok(a.amount() + b.amount())
        })
    })
    .run(&config().with_discards(1_000))
    .unwrap();
    report.assert_pass();
    assert!(report.discards > 0);
}

#[test]
fn every_trial_reaches_the_label_sink() {
    let seen: Arc<Mutex<Vec<(usize, Vec<String>)>>> = Arc::default();
    let sink = Arc::clone(&seen);
    let config = config()
        .with_tests(40)
        .with_label_sink(move |trial: usize, labels: &[String]| {
            sink.lock().unwrap().push((trial, labels.to_vec()));
        });

    let report = property(arbitrary::<NormalPair>(), |&NormalPair(a, b)| {
        coin::sum_labels(a, b)
            .into_iter()
            .fold(Outcome::pass(), Outcome::label)
    })
    .run(&config)
    .unwrap();

    let seen = seen.lock().unwrap();
    assert_eq!(seen.len(), report.tests_run);
    assert_eq!(seen.len(), 40);
    assert!(seen.iter().enumerate().all(|(i, (trial, _))| i == *trial));
    assert!(seen.iter().all(|(_, labels)| labels.contains(&"OK".to_string())));
}
