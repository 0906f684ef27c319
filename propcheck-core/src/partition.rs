//! Generators confined to one partition of an input domain.
//!
//! Every value a partition generator produces, shrinks included, stays in
//! its partition.

use crate::error::{GenerationExhausted, PropcheckError, Result};
use crate::gen::{Gen, Range};
use std::rc::Rc;

/// Pairs `(a, b)` with `a + b <= cap`.
///
/// `a` is uniform in `[0, cap]` and `b` uniform in `[0, cap - a]`.
pub fn sum_within(cap: u64) -> Gen<(u64, u64)> {
    Gen::from_range(Range::new(0, cap))
        .bind(move |a| Gen::from_range(Range::new(0, cap - a)).map(move |b| (a, b)))
}

/// Pairs `(a, b)` with `cap < a + b <= 2 * cap`.
///
/// `a` is uniform in `[1, cap]` and `b` uniform in `[cap - a + 1, cap]`.
/// There is no such pair when `cap` is zero.
pub fn sum_exceeding(cap: u64) -> Result<Gen<(u64, u64)>> {
    if cap == 0 {
        return Err(PropcheckError::invalid_generator(
            "sum_exceeding requires a positive cap",
        ));
    }
    Ok(Gen::from_range(Range::new(1, cap))
        .bind(move |a| Gen::from_range(Range::new(cap - a + 1, cap)).map(move |b| (a, b))))
}

/// Values in `[0, cap]` with two thirds of the draws within 3 of either end.
pub fn boundary_biased(cap: u64) -> Gen<u64> {
    let low = Range::new(0, cap.min(3));
    let high = Range::new(cap.saturating_sub(3), cap);
    let anywhere = Range::new(0, cap);
    Gen::<u8>::from_range(Range::new(0, 2)).bind(move |choice| match choice {
        0 => Gen::from_range(low),
        1 => Gen::from_range(high),
        _ => Gen::from_range(anywhere),
    })
}

/// Whether `value` is within 3 of either end of `[0, cap]`.
pub fn is_boundary(cap: u64, value: u64) -> bool {
    value <= 3 || value >= cap.saturating_sub(3)
}

/// Characters substituted for a start tag's `<`.
const NON_MARKUP: &[u8] = b"[({#% ";

/// Break the markup grammar of a serialized document.
///
/// One start tag that has a matching end tag loses its `<`, leaving that
/// end tag unmatched. A document without such a tag exhausts the generator.
pub fn corrupt_markup(document: Vec<u8>) -> Gen<Vec<u8>> {
    let positions = start_tags(&document);
    if positions.is_empty() {
        return Gen::new(|_size, _seed| Err(GenerationExhausted { attempts: 0 }));
    }

    let document = Rc::new(document);
    let positions = Rc::new(positions);
    let last = positions.len() - 1;
    Gen::<usize>::from_range(Range::new(0, last))
        .zip(Gen::<usize>::from_range(Range::new(0, NON_MARKUP.len() - 1)))
        .map(move |(tag, replacement)| {
            let mut corrupted = document.as_ref().clone();
            corrupted[positions[tag]] = NON_MARKUP[replacement];
            corrupted
        })
}

/// Offsets of every `<` opening a start tag that is not self-closing.
fn start_tags(document: &[u8]) -> Vec<usize> {
    document
        .iter()
        .enumerate()
        .filter(|&(i, &byte)| {
            byte == b'<'
                && document
                    .get(i + 1)
                    .is_some_and(|next| next.is_ascii_alphabetic() || *next == b'_')
        })
        .filter(|&(i, _)| {
            document[i..]
                .iter()
                .position(|&byte| byte == b'>')
                .is_some_and(|end| end > 0 && document[i + end - 1] != b'/')
        })
        .map(|(i, _)| i)
        .collect()
}

/// Every candidate `corrupt_markup` could produce for `document`.
///
/// Handy for exhaustive checks over small documents.
pub fn all_corruptions(document: &[u8]) -> Vec<Vec<u8>> {
    start_tags(document)
        .into_iter()
        .flat_map(|position| {
            NON_MARKUP.iter().map(move |&replacement| {
                let mut corrupted = document.to_vec();
                corrupted[position] = replacement;
                corrupted
            })
        })
        .collect()
}
