//! Integer addition, the first system under test.

/// Add two integers, wrapping on overflow.
///
/// Wrapping keeps identity, commutativity and the successor law true over
/// the whole `i64` range.
pub fn add(a: i64, b: i64) -> i64 {
    a.wrapping_add(b)
}
