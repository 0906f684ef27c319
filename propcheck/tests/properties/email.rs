//! Address extraction.

use crate::config;
use propcheck::email::{addresses, extract};
use propcheck::*;

#[test]
fn a_lone_address_is_extracted_whole() {
    for_all_named(addresses().unwrap(), "address", |address: &String| {
        extract(address) == vec![address.as_str()]
    })
    .run(&config())
    .unwrap()
    .assert_pass();
}

#[test]
fn addresses_are_found_inside_prose() {
    let words = Gen::string_of(Gen::<char>::ascii_alpha(), 1, 8).unwrap();
    let text = words
        .clone()
        .zip(addresses().unwrap())
        .zip(words);
    property(text, |((before, address), after)| {
        let text = format!("{before} {address} {after}");
        Outcome::equal(&extract(&text), &vec![address.as_str()])
    })
    .run(&config())
    .unwrap()
    .assert_pass();
}

#[test]
fn words_without_an_at_sign_yield_nothing() {
    for_all(Gen::alpha(), |text: &String| extract(text).is_empty())
        .run(&config())
        .unwrap()
        .assert_pass();
}
