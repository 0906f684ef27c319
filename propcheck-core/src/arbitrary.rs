//! Default generators for common types.

use crate::data::Size;
use crate::gen::{Gen, Range};

/// A type with a default generator.
///
/// Integers grow linearly with size and shrink towards zero; collections
/// grow in length with size.
pub trait Arbitrary: Sized + Clone + 'static {
    fn arbitrary() -> Gen<Self>;
}

macro_rules! arbitrary_integer {
    ($($ty:ty),*) => {
        $(
            impl Arbitrary for $ty {
                fn arbitrary() -> Gen<Self> {
                    Gen::from_range(Range::linear(<$ty>::MIN, <$ty>::MAX))
                }
            }
        )*
    };
}

arbitrary_integer!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize);

impl Arbitrary for bool {
    fn arbitrary() -> Gen<Self> {
        Gen::bool()
    }
}

impl Arbitrary for char {
    fn arbitrary() -> Gen<Self> {
        Gen::<char>::ascii_printable()
    }
}

impl Arbitrary for String {
    fn arbitrary() -> Gen<Self> {
        Gen::list_of(Gen::<char>::ascii_printable()).map(|chars| chars.into_iter().collect())
    }
}

impl<T: Arbitrary> Arbitrary for Vec<T> {
    fn arbitrary() -> Gen<Self> {
        Gen::list_of(T::arbitrary())
    }
}

impl<T: Arbitrary> Arbitrary for Option<T> {
    fn arbitrary() -> Gen<Self> {
        Gen::option_of(T::arbitrary())
    }
}

impl<A: Arbitrary, B: Arbitrary> Arbitrary for (A, B) {
    fn arbitrary() -> Gen<Self> {
        A::arbitrary().zip(B::arbitrary())
    }
}

impl<A: Arbitrary, B: Arbitrary, C: Arbitrary> Arbitrary for (A, B, C) {
    fn arbitrary() -> Gen<Self> {
        A::arbitrary()
            .zip(B::arbitrary())
            .zip(C::arbitrary())
            .map(|((a, b), c)| (a, b, c))
    }
}

impl<A: Arbitrary, B: Arbitrary, C: Arbitrary, D: Arbitrary> Arbitrary for (A, B, C, D) {
    fn arbitrary() -> Gen<Self> {
        A::arbitrary()
            .zip(B::arbitrary())
            .zip(C::arbitrary().zip(D::arbitrary()))
            .map(|((a, b), (c, d))| (a, b, c, d))
    }
}

/// Shorthand for `T::arbitrary()`.
pub fn arbitrary<T: Arbitrary>() -> Gen<T> {
    T::arbitrary()
}

/// Draw one value of `T` at `size`, for quick inspection.
pub fn sample_one<T: Arbitrary>(size: Size, seed: u64) -> Option<T> {
    T::arbitrary()
        .generate(size, crate::data::Seed::from_u64(seed))
        .ok()
        .map(|tree| tree.value)
}
