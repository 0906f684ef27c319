//! Coin arithmetic capped at [`MAX_COINS`].

use propcheck_core::{partition, Arbitrary, Gen, Range, Result};
use thiserror::Error;

/// The largest amount a coin may hold.
pub const MAX_COINS: u64 = 100_000;

/// Errors from coin arithmetic.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoinError {
    /// The sum of two coins exceeds [`MAX_COINS`].
    #[error("Overflow")]
    Overflow,

    #[error("{amount} exceeds the maximum of {max} coins", max = MAX_COINS)]
    OutOfRange { amount: u64 },
}

/// An amount of coins in `[0, MAX_COINS]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Coin {
    amount: u64,
}

impl Coin {
    pub fn new(amount: u64) -> std::result::Result<Self, CoinError> {
        if amount > MAX_COINS {
            return Err(CoinError::OutOfRange { amount });
        }
        Ok(Coin { amount })
    }

    pub fn amount(self) -> u64 {
        self.amount
    }

    /// Add two coins. A sum above [`MAX_COINS`] is an overflow and yields
    /// no coin at all.
    pub fn add(self, other: Coin) -> std::result::Result<Coin, CoinError> {
        let sum = self.amount + other.amount;
        if sum > MAX_COINS {
            return Err(CoinError::Overflow);
        }
        Ok(Coin { amount: sum })
    }
}

/// Two coins whose sum stays within the cap.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NormalPair(pub Coin, pub Coin);

/// Two coins whose sum exceeds the cap.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OverflowingPair(pub Coin, pub Coin);

impl Arbitrary for Coin {
    fn arbitrary() -> Gen<Self> {
        Gen::from_range(Range::new(0, MAX_COINS)).map(|amount| Coin { amount })
    }
}

impl Arbitrary for NormalPair {
    fn arbitrary() -> Gen<Self> {
        partition::sum_within(MAX_COINS)
            .map(|(a, b)| NormalPair(Coin { amount: a }, Coin { amount: b }))
    }
}

/// Pairs drawn so that their sum always overflows.
pub fn overflowing_pairs() -> Result<Gen<OverflowingPair>> {
    Ok(partition::sum_exceeding(MAX_COINS)?
        .map(|(a, b)| OverflowingPair(Coin { amount: a }, Coin { amount: b })))
}

/// Coins concentrated near both ends of the allowed range.
pub fn boundary_coins() -> Gen<Coin> {
    partition::boundary_biased(MAX_COINS).map(|amount| Coin { amount })
}

/// Partition labels for the sum of two coins: `OK`, `boundary` (within 3 of
/// the cap) and `overflow`. A sum can be both `OK` and `boundary`.
pub fn sum_labels(a: Coin, b: Coin) -> Vec<&'static str> {
    let sum = a.amount + b.amount;
    let mut labels = Vec::new();
    if sum <= MAX_COINS {
        labels.push("OK");
    }
    if sum.abs_diff(MAX_COINS) < 3 {
        labels.push("boundary");
    }
    if sum > MAX_COINS {
        labels.push("overflow");
    }
    labels
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normal_addition() {
        let sum = Coin::new(1).unwrap().add(Coin::new(2).unwrap()).unwrap();
        assert_eq!(sum.amount(), 3);
    }

    #[test]
    fn test_boundary_addition() {
        let sum = Coin::new(MAX_COINS - 1)
            .unwrap()
            .add(Coin::new(1).unwrap())
            .unwrap();
        assert_eq!(sum.amount(), MAX_COINS);
    }

    #[test]
    fn test_overflow_addition() {
        let result = Coin::new(MAX_COINS).unwrap().add(Coin::new(1).unwrap());
        assert_eq!(result, Err(CoinError::Overflow));
        assert_eq!(CoinError::Overflow.to_string(), "Overflow");
    }

    #[test]
    fn test_new_rejects_out_of_range() {
        assert_eq!(
            Coin::new(MAX_COINS + 1),
            Err(CoinError::OutOfRange {
                amount: MAX_COINS + 1
            })
        );
    }

    #[test]
    fn test_sum_labels() {
        let coin = |amount| Coin::new(amount).unwrap();
        assert_eq!(sum_labels(coin(1), coin(2)), vec!["OK"]);
        assert_eq!(sum_labels(coin(MAX_COINS - 1), coin(0)), vec!["OK", "boundary"]);
        assert_eq!(sum_labels(coin(MAX_COINS), coin(1)), vec!["boundary", "overflow"]);
        assert_eq!(sum_labels(coin(MAX_COINS), coin(MAX_COINS)), vec!["overflow"]);
    }
}
