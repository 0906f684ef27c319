//! Purchase orders and their schema-validated XML form.
//!
//! The document shape is the classic `po.xsd` purchase order:
//!
//! ```text
//! purchaseOrder @orderDate
//!   shipTo @country, billTo @country: name street city state zip
//!   comment?
//!   items
//!     item* @partNum: productName quantity USPrice comment? shipDate?
//! ```

use chrono::NaiveDate;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

pub mod gen;
pub mod xml;

/// A purchase order document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PurchaseOrder {
    pub order_date: NaiveDate,
    pub ship_to: UsAddress,
    pub bill_to: UsAddress,
    pub comment: Option<String>,
    pub items: Vec<Item>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UsAddress {
    /// An XML name token, such as `US`.
    pub country: String,
    pub name: String,
    pub street: String,
    pub city: String,
    pub state: String,
    pub zip: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Item {
    /// Stock keeping unit: three digits, a dash and two capital letters.
    pub part_num: String,
    pub product_name: String,
    /// Between 1 and 99.
    pub quantity: u8,
    pub us_price: Price,
    pub comment: Option<String>,
    pub ship_date: Option<NaiveDate>,
}

/// A non-negative decimal amount with at most two fraction digits, held in
/// cents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Price {
    cents: u64,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid price {input:?}: {reason}")]
pub struct PriceError {
    input: String,
    reason: &'static str,
}

impl Price {
    pub fn from_cents(cents: u64) -> Self {
        Price { cents }
    }

    pub fn cents(self) -> u64 {
        self.cents
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{:02}", self.cents / 100, self.cents % 100)
    }
}

impl FromStr for Price {
    type Err = PriceError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let error = |reason| PriceError {
            input: input.to_string(),
            reason,
        };
        let trimmed = input.trim();
        let (whole, fraction) = trimmed.split_once('.').unwrap_or((trimmed, ""));
        if whole.is_empty() || !whole.bytes().all(|b| b.is_ascii_digit()) {
            return Err(error("expected digits before the decimal point"));
        }
        if fraction.len() > 2 || !fraction.bytes().all(|b| b.is_ascii_digit()) {
            return Err(error("expected at most two fraction digits"));
        }

        let whole: u64 = whole.parse().map_err(|_| error("amount is too large"))?;
        let fraction: u64 = match fraction.len() {
            0 => 0,
            1 => fraction.parse::<u64>().map_err(|_| error("bad fraction"))? * 10,
            _ => fraction.parse().map_err(|_| error("bad fraction"))?,
        };
        whole
            .checked_mul(100)
            .and_then(|cents| cents.checked_add(fraction))
            .map(Price::from_cents)
            .ok_or_else(|| error("amount is too large"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_price_display_and_parse() {
        let price = Price::from_cents(14895);
        assert_eq!(price.to_string(), "148.95");
        assert_eq!("148.95".parse::<Price>(), Ok(price));
        assert_eq!("7".parse::<Price>(), Ok(Price::from_cents(700)));
        assert_eq!("0.5".parse::<Price>(), Ok(Price::from_cents(50)));
        assert_eq!(Price::from_cents(5).to_string(), "0.05");
    }

    #[test]
    fn test_price_rejects_malformed_input() {
        for input in ["", ".5", "1.234", "-1.00", "1,00", "abc", "99999999999999999999"] {
            assert!(input.parse::<Price>().is_err(), "{input:?} parsed");
        }
    }
}
