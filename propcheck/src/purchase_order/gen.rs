//! Generators for purchase orders and for documents that must be rejected.

use super::xml::{self, Element};
use super::{Item, Price, PurchaseOrder, UsAddress};
use chrono::NaiveDate;
use propcheck_core::{partition, Gen, Range, Result, WeightedChoice};
use std::fmt;

/// Characters that need escaping or lie outside ASCII.
const SPECIAL_CHARS: &str = "éüß€漢\n\t<>&\"'";
const UPPERCASE: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ";
const NAME_TOKEN_CHARS: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789.-_:";

/// 1900-01-01 and 2099-12-31 as days since 0001-01-01, counting that day as 1.
const FIRST_DAY: i32 = 693_596;
const LAST_DAY: i32 = 766_644;

/// Free text, mostly printable ASCII with markup characters, whitespace and
/// non-ASCII letters mixed in.
pub fn text() -> Result<Gen<String>> {
    let chars = Gen::frequency(vec![
        WeightedChoice::new(9, Gen::<char>::ascii_printable()),
        WeightedChoice::new(1, Gen::from_chars(SPECIAL_CHARS)?),
    ])?;
    Gen::string_of(chars, 0, 24)
}

/// Calendar dates in the 20th and 21st centuries.
pub fn date() -> Gen<NaiveDate> {
    Gen::from_range(Range::new(FIRST_DAY, LAST_DAY))
        .filter_map(NaiveDate::from_num_days_from_ce_opt)
}

pub fn price() -> Gen<Price> {
    Gen::<u64>::from_range(Range::linear(0, 1_000_000)).map(Price::from_cents)
}

pub fn zip() -> Gen<u32> {
    Gen::from_range(Range::new(0, 99_999))
}

pub fn quantity() -> Gen<u8> {
    Gen::from_range(Range::new(1, 99))
}

/// Part numbers such as `926-AA`.
pub fn part_number() -> Result<Gen<String>> {
    let digits = Gen::string_of(Gen::<char>::digit(), 3, 3)?;
    let letters = Gen::string_of(Gen::from_chars(UPPERCASE)?, 2, 2)?;
    Ok(digits
        .zip(letters)
        .map(|(digits, letters)| format!("{digits}-{letters}")))
}

/// Short name tokens for the `country` attribute.
pub fn country() -> Result<Gen<String>> {
    Gen::string_of(Gen::from_chars(NAME_TOKEN_CHARS)?, 1, 3)
}

pub fn us_address() -> Result<Gen<UsAddress>> {
    Ok(country()?
        .zip(text()?)
        .zip(text()?)
        .zip(text()?)
        .zip(text()?)
        .zip(zip())
        .map(|(((((country, name), street), city), state), zip)| UsAddress {
            country,
            name,
            street,
            city,
            state,
            zip,
        }))
}

pub fn item() -> Result<Gen<Item>> {
    Ok(part_number()?
        .zip(text()?)
        .zip(quantity())
        .zip(price())
        .zip(Gen::option_of(text()?))
        .zip(Gen::option_of(date()))
        .map(
            |(((((part_num, product_name), quantity), us_price), comment), ship_date)| Item {
                part_num,
                product_name,
                quantity,
                us_price,
                comment,
                ship_date,
            },
        ))
}

/// Orders with up to five items.
pub fn purchase_order() -> Result<Gen<PurchaseOrder>> {
    Ok(date()
        .zip(us_address()?)
        .zip(us_address()?)
        .zip(Gen::option_of(text()?))
        .zip(Gen::list_of_range(item()?, 0, 5)?)
        .map(
            |((((order_date, ship_to), bill_to), comment), items)| PurchaseOrder {
                order_date,
                ship_to,
                bill_to,
                comment,
                items,
            },
        ))
}

/// Serialized orders with one start tag broken, so they are no longer
/// well-formed XML.
pub fn corrupt_document() -> Result<Gen<Vec<u8>>> {
    Ok(purchase_order()?.bind(|order| partition::corrupt_markup(xml::serialize(&order))))
}

/// A required node taken out of an otherwise valid document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Removal {
    OrderDate,
    ShipTo,
    BillTo,
    Items,
    Country,
    Name,
    PartNum,
    Quantity,
    ProductName,
}

impl Removal {
    /// Removals that make sense for `order`. Item removals need an item.
    pub fn applicable(order: &PurchaseOrder) -> Vec<Removal> {
        let mut removals = vec![
            Removal::OrderDate,
            Removal::ShipTo,
            Removal::BillTo,
            Removal::Items,
            Removal::Country,
            Removal::Name,
        ];
        if !order.items.is_empty() {
            removals.extend([Removal::PartNum, Removal::Quantity, Removal::ProductName]);
        }
        removals
    }

    /// Take the node out of `root`, reporting whether it was there.
    pub fn apply(self, root: &mut Element) -> bool {
        match self {
            Removal::OrderDate => root.remove_attribute("orderDate"),
            Removal::ShipTo => root.remove_child("shipTo"),
            Removal::BillTo => root.remove_child("billTo"),
            Removal::Items => root.remove_child("items"),
            Removal::Country => root
                .child_mut("shipTo")
                .is_some_and(|ship_to| ship_to.remove_attribute("country")),
            Removal::Name => root
                .child_mut("billTo")
                .is_some_and(|bill_to| bill_to.remove_child("name")),
            Removal::PartNum => {
                first_item(root).is_some_and(|item| item.remove_attribute("partNum"))
            }
            Removal::Quantity => first_item(root).is_some_and(|item| item.remove_child("quantity")),
            Removal::ProductName => {
                first_item(root).is_some_and(|item| item.remove_child("productName"))
            }
        }
    }
}

fn first_item(root: &mut Element) -> Option<&mut Element> {
    root.child_mut("items").and_then(|items| items.child_mut("item"))
}

impl fmt::Display for Removal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let node = match self {
            Removal::OrderDate => "@orderDate",
            Removal::ShipTo => "shipTo",
            Removal::BillTo => "billTo",
            Removal::Items => "items",
            Removal::Country => "shipTo/@country",
            Removal::Name => "billTo/name",
            Removal::PartNum => "item/@partNum",
            Removal::Quantity => "item/quantity",
            Removal::ProductName => "item/productName",
        };
        write!(f, "missing {node}")
    }
}

/// Well-formed documents that violate the schema, paired with what was
/// removed to break them.
pub fn schema_invalid_document() -> Result<Gen<(Removal, Vec<u8>)>> {
    Ok(purchase_order()?.bind(|order| {
        let removals = Removal::applicable(&order);
        let root = xml::to_element(&order);
        Gen::<usize>::from_range(Range::new(0, removals.len() - 1)).map(move |index| {
            let removal = removals[index];
            let mut broken = root.clone();
            removal.apply(&mut broken);
            (removal, xml::write(&broken))
        })
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use propcheck_core::{Seed, Size};

    fn draw<T: 'static>(gen: &Gen<T>, count: usize) -> Vec<T> {
        gen.sample(Size(60), Seed::from_u64(7), count).unwrap()
    }

    #[test]
    fn test_dates_stay_in_range() {
        let first = NaiveDate::from_ymd_opt(1900, 1, 1).unwrap();
        let last = NaiveDate::from_ymd_opt(2099, 12, 31).unwrap();
        assert_eq!(NaiveDate::from_num_days_from_ce_opt(FIRST_DAY), Some(first));
        assert_eq!(NaiveDate::from_num_days_from_ce_opt(LAST_DAY), Some(last));
        for day in draw(&date(), 200) {
            assert!(first <= day && day <= last, "{day}");
        }
    }

    #[test]
    fn test_field_generators_respect_the_schema() {
        for part in draw(&part_number().unwrap(), 100) {
            assert_eq!(part.len(), 6);
            assert_eq!(part.as_bytes()[3], b'-');
        }
        for quantity in draw(&quantity(), 100) {
            assert!((1..=99).contains(&quantity));
        }
        for zip in draw(&zip(), 100) {
            assert!(zip <= 99_999);
        }
        for country in draw(&country().unwrap(), 100) {
            assert!(!country.is_empty());
        }
    }

    #[test]
    fn test_generated_orders_survive_a_round_trip() {
        for order in draw(&purchase_order().unwrap(), 50) {
            let bytes = xml::serialize(&order);
            assert_eq!(xml::parse(&bytes), Ok(order));
        }
    }

    #[test]
    fn test_corrupt_documents_are_syntax_errors() {
        for document in draw(&corrupt_document().unwrap(), 50) {
            let errors = xml::parse(&document).unwrap_err();
            assert!(errors[0].is_syntax(), "{errors:?}");
        }
    }

    #[test]
    fn test_schema_invalid_documents_are_schema_errors() {
        for (removal, document) in draw(&schema_invalid_document().unwrap(), 50) {
            let errors = xml::parse(&document).unwrap_err();
            assert!(
                errors.iter().all(|error| error.is_schema()),
                "{removal}: {errors:?}"
            );
        }
    }

    #[test]
    fn test_every_removal_applies() {
        let order = draw(&purchase_order().unwrap(), 50)
            .into_iter()
            .find(|order| !order.items.is_empty())
            .unwrap();
        for removal in Removal::applicable(&order) {
            let mut root = xml::to_element(&order);
            assert!(removal.apply(&mut root), "{removal}");
            assert!(!removal.apply(&mut root), "{removal} applied twice");
        }
    }
}
