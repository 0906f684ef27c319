//! The XML round-trip oracle and its two rejection partitions.

use crate::config;
use propcheck::purchase_order::gen::{
    corrupt_document, purchase_order, schema_invalid_document, Removal,
};
use propcheck::purchase_order::xml::{self, ValidationError};
use propcheck::purchase_order::PurchaseOrder;
use propcheck::*;

#[test]
fn valid_orders_round_trip() {
    property(purchase_order().unwrap(), |order: &PurchaseOrder| {
        let bytes = xml::serialize(order);
        Outcome::equal(&xml::parse(&bytes), &Ok(order.clone()))
            .classify(order.items.is_empty(), "no items")
            .classify(order.items.len() > 1, "several items")
            .classify(order.comment.is_some(), "commented")
    })
    .named("order")
    .cover(5.0, "several items", |order| order.items.len() > 1)
    .run(&config())
    .unwrap()
    .assert_pass();
}

#[test]
fn corrupt_documents_fail_with_a_syntax_error() {
    property(corrupt_document().unwrap(), |document: &Vec<u8>| {
        match xml::parse(document) {
            Ok(order) => Outcome::fail(format!("corrupt document accepted: {order:?}")),
            Err(errors) => Outcome::from(errors.iter().any(ValidationError::is_syntax))
                .label(if errors.len() == 1 { "one error" } else { "several errors" }),
        }
    })
    .run(&config())
    .unwrap()
    .assert_pass();
}

#[test]
fn schema_invalid_documents_fail_with_schema_errors() {
    let report = property(
        schema_invalid_document().unwrap(),
        |(removal, document): &(Removal, Vec<u8>)| match xml::parse(document) {
            Ok(_) => Outcome::fail(format!("accepted a document with {removal}")),
            Err(errors) => Outcome::from(!errors.is_empty() && errors.iter().all(ValidationError::is_schema))
                .label(removal.to_string()),
        },
    )
    .run(&config().with_tests(200))
    .unwrap();

    report.assert_pass();
    assert!(report.classification.covered("missing shipTo"));
    assert!(report.classification.covered("missing @orderDate"));
}

#[test]
fn a_handwritten_document_parses() {
    let document = br#"<?xml version="1.0"?>
<purchaseOrder orderDate="2024-02-29">
    <shipTo country="US">
        <name>Alice</name><street>1 Main St</street><city>Springfield</city>
        <state>IL</state><zip>62701</zip>
    </shipTo>
    <billTo country="US">
        <name>Bob</name><street>2 Side St</street><city>Springfield</city>
        <state>IL</state><zip>62702</zip>
    </billTo>
    <items/>
</purchaseOrder>"#;
    let order = xml::parse(document).unwrap();
    assert_eq!(order.ship_to.zip, 62701);
    assert!(order.items.is_empty());
    assert_eq!(xml::parse(&xml::serialize(&order)), Ok(order));
}
