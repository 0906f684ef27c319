#![cfg(feature = "derive")]

use propcheck::*;

#[derive(Arbitrary, Debug, Clone, PartialEq)]
enum State {
    Ordered,
    Paid,
    Shipping,
    Delivered,
    Cancelled,
}

#[derive(Arbitrary, Debug, Clone, PartialEq)]
struct Order {
    state: State,
    #[arbitrary(with = "amounts")]
    amount: u32,
    price: Option<u64>,
    customer: String,
}

#[derive(Arbitrary, Debug, Clone, PartialEq)]
struct Point(i16, i16);

#[derive(Arbitrary, Debug, Clone, PartialEq)]
struct Marker;

#[derive(Arbitrary, Debug, Clone, PartialEq)]
enum Shape {
    Empty,
    Circle { radius: u8 },
    Segment(Point, Point),
}

#[derive(Arbitrary, Debug, Clone, PartialEq)]
struct Pair<T> {
    left: T,
    right: T,
}

fn amounts() -> Gen<u32> {
    Gen::from_range(Range::new(1, 99))
}

fn config() -> Config {
    Config::default().with_seed(42)
}

#[test]
fn derived_records_use_field_generators() {
    for_all(Order::arbitrary(), |order| (1..=99).contains(&order.amount))
        .run(&config())
        .unwrap()
        .assert_pass();
}

#[test]
fn every_variant_is_generated() {
    let report = property(State::arbitrary(), |state: &State| {
        Outcome::pass().collect_value(format!("{state:?}"))
    })
    .run(&config().with_tests(500))
    .unwrap();
    for name in ["Ordered", "Paid", "Shipping", "Delivered", "Cancelled"] {
        assert!(report.classification.covered(name), "{name} never generated");
    }
}

#[test]
fn derived_enums_shrink_towards_the_first_variant() {
    let report = for_all(Order::arbitrary(), |order| order.state == State::Ordered)
        .run(&config())
        .unwrap();
    let order = &report.counterexample().expect("other states occur").value;
    assert_eq!(order.state, State::Paid);
    assert_eq!(order.amount, 1);
    assert_eq!(order.price, None);
    assert_eq!(order.customer, "");
}

#[test]
fn unit_tuple_and_generic_shapes_derive() {
    assert_eq!(sample_one::<Marker>(Size(10), 1), Some(Marker));
    for_all(Shape::arbitrary().zip(Pair::<bool>::arbitrary()), |_| true)
        .run(&config())
        .unwrap()
        .assert_pass();
    for_all(Point::arbitrary(), |Point(x, y)| {
        x.checked_add(*y).is_some() || x.signum() == y.signum()
    })
    .run(&config())
    .unwrap()
    .assert_pass();
}
