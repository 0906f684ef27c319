//! Algebraic laws of `arith::add`.

use crate::config;
use propcheck::arith::add;
use propcheck::*;

fn operand() -> Gen<i64> {
    Gen::from_range(Range::linear(-1_000_000, 1_000_000))
}

#[test]
fn addition_is_commutative() {
    for_all_named(operand().zip(operand()), "(a, b)", |&(a, b)| {
        add(a, b) == add(b, a)
    })
    .run(&config())
    .unwrap()
    .assert_pass();
}

#[test]
fn addition_is_associative() {
    let operands = operand().zip(operand()).zip(operand());
    for_all(operands, |&((a, b), c)| add(add(a, b), c) == add(a, add(b, c)))
        .run(&config())
        .unwrap()
        .assert_pass();
}

#[test]
fn zero_is_the_identity() {
    for_all_named(operand(), "a", |&a| add(a, 0) == a && add(0, a) == a)
        .run(&config())
        .unwrap()
        .assert_pass();
}

#[test]
fn positive_sums_bound_both_operands() {
    let positive = Gen::<i64>::from_range(Range::linear(1, 1_000_000));
    for_all_named(positive.clone().zip(positive), "(a, b)", |&(a, b)| {
        add(a, b) >= a && add(a, b) >= b
    })
    .run(&config())
    .unwrap()
    .assert_pass();
}

#[test]
fn addition_counts_up_by_successors() {
    property(operand().zip(operand()), |&(a, b)| {
        Outcome::equal(&add(a, b), &(1 + add(a, b - 1)))
            .classify(b < 0, "negative step")
            .classify(b == 0, "zero step")
    })
    .run(&config())
    .unwrap()
    .assert_pass();
}

#[test]
fn negation_is_the_inverse() {
    for_all(operand(), |&a| add(a, -a) == 0)
        .run(&config())
        .unwrap()
        .assert_pass();
}

#[test]
fn laws_hold_across_the_whole_range() {
    let full_size = config()
        .with_tests(500)
        .with_size_range(Size::MAX, Size::MAX);
    property(arbitrary::<(i64, i64)>(), |&(a, b)| {
        Outcome::from(add(a, b) == add(b, a))
            .and(Outcome::from(add(a, 0) == a && add(0, a) == a))
            .and(Outcome::equal(&add(a, b), &add(1, add(a, b.wrapping_sub(1)))))
            .classify(a.checked_add(b).is_none(), "wraps")
    })
    .require_coverage(5.0, "wraps")
    .run(&full_size)
    .unwrap()
    .assert_pass();
}

#[test]
fn a_false_law_shrinks_to_zeros() {
    let prop = for_all_named(operand().zip(operand()), "(a, b)", |&(a, b)| add(a, b) > a);
    let report = prop.run(&config()).unwrap();
    let counterexample = report.counterexample().expect("the law is false");
    assert_eq!(counterexample.value, (0, 0));

    let rendered = report.to_string();
    assert!(rendered.contains("failed after"), "{rendered}");

    let replay = prop
        .recheck(&config(), counterexample.size, counterexample.seed)
        .unwrap();
    assert!(!replay.is_pass());
}
