//! The sum of two dice, observed over many trials.

use crate::config;
use propcheck::*;

fn die() -> Gen<u8> {
    Gen::from_range(Range::new(1, 6))
}

#[test]
fn seven_is_likelier_than_either_extreme() {
    let two_dice = die().zip(die()).map(|(a, b)| a + b);
    let report = property(two_dice, |&total: &u8| {
        Outcome::from((2..=12).contains(&total))
            .collect_value(total)
            .collect("total", f64::from(total))
    })
    .run(&config().with_tests(10_000))
    .unwrap();

    report.assert_pass();
    let distribution = &report.classification;
    assert_eq!(distribution.total(), 10_000);
    assert!(distribution.count("7") > distribution.count("2"));
    assert!(distribution.count("7") > distribution.count("12"));

    let summary = distribution.summary("total").unwrap();
    assert_eq!((summary.min, summary.max), (2.0, 12.0));
    assert!((6.8..7.2).contains(&summary.mean), "{summary:?}");
    assert!(distribution.to_string().contains("Test data distribution:"));
}

#[test]
fn every_total_appears() {
    let two_dice = die().zip(die()).map(|(a, b)| a + b);
    let mut property = property(two_dice, |_: &u8| true);
    for total in 2..=12u8 {
        property = property.cover(1.0, &total.to_string(), move |&t| t == total);
    }
    property.run(&config().with_tests(2_000)).unwrap().assert_pass();
}
