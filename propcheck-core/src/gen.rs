//! Generator combinators for property-based testing.

use crate::error::{GenerationExhausted, PropcheckError, Result};
use crate::{data::*, tree::*};
use std::fmt;
use std::rc::Rc;

/// How many times `filter` and `filter_map` retry before giving up.
pub const FILTER_ATTEMPTS: usize = 100;

/// Result of running a generator once.
pub type GenResult<T> = std::result::Result<Tree<T>, GenerationExhausted>;

type GenFn<T> = dyn Fn(Size, Seed) -> GenResult<T>;

/// A generator for test data of type `T`.
///
/// Generators are explicit, first-class values that can be composed
/// using combinator functions. A generator is a pure function of its
/// `(Size, Seed)` input: the same pair always yields the same tree.
pub struct Gen<T> {
    generator: Rc<GenFn<T>>,
}

impl<T> Clone for Gen<T> {
    fn clone(&self) -> Self {
        Gen {
            generator: Rc::clone(&self.generator),
        }
    }
}

impl<T> fmt::Debug for Gen<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Gen { .. }")
    }
}

impl<T: 'static> Gen<T> {
    /// Create a new generator from a function.
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(Size, Seed) -> GenResult<T> + 'static,
    {
        Gen {
            generator: Rc::new(f),
        }
    }

    /// Generate a value using the given size and seed.
    pub fn generate(&self, size: Size, seed: Seed) -> GenResult<T> {
        (self.generator)(size, seed)
    }

    /// Draw `count` values, each from its own split of `seed`.
    pub fn sample(
        &self,
        size: Size,
        seed: Seed,
        count: usize,
    ) -> std::result::Result<Vec<T>, GenerationExhausted> {
        let mut seed = seed;
        let mut values = Vec::with_capacity(count);
        for _ in 0..count {
            let (this, next) = seed.split();
            seed = next;
            values.push(self.generate(size, this)?.value);
        }
        Ok(values)
    }

    /// Create a generator that always produces the same value.
    pub fn constant(value: T) -> Self
    where
        T: Clone,
    {
        Gen::new(move |_size, _seed| Ok(Tree::singleton(value.clone())))
    }

    /// Build a generator from the current size.
    pub fn sized<F>(f: F) -> Self
    where
        F: Fn(Size) -> Gen<T> + 'static,
    {
        Gen::new(move |size, seed| f(size).generate(size, seed))
    }

    /// Map a function over the generated values.
    pub fn map<U, F>(self, f: F) -> Gen<U>
    where
        F: Fn(T) -> U + 'static + Clone,
        U: 'static,
    {
        Gen::new(move |size, seed| {
            let tree = self.generate(size, seed)?;
            Ok(tree.map(f.clone()))
        })
    }

    /// Bind/flatmap for dependent generation.
    ///
    /// The seed is split: the outer value draws from one half and the
    /// dependent generator from the other, so the two never share random
    /// state beyond the data passed through `f`. Shrinking the outer value
    /// regenerates the inner one from the same half.
    pub fn bind<U, F>(self, f: F) -> Gen<U>
    where
        F: Fn(T) -> Gen<U> + 'static,
        U: 'static,
        T: Clone,
    {
        let f = Rc::new(f);
        Gen::new(move |size, seed| {
            let (outer_seed, inner_seed) = seed.split();
            let tree = self.generate(size, outer_seed)?;
            let f = Rc::clone(&f);
            tree.try_bind(Rc::new(move |value: T| f(value).generate(size, inner_seed)))
        })
    }

    /// Pair this generator with another, drawing each from its own seed.
    pub fn zip<U>(self, other: Gen<U>) -> Gen<(T, U)>
    where
        T: Clone,
        U: Clone + 'static,
    {
        Gen::new(move |size, seed| {
            let (left_seed, right_seed) = seed.split();
            let left = self.generate(size, left_seed)?;
            let right = other.generate(size, right_seed)?;
            Ok(left.zip(right))
        })
    }

    /// Filter generated values by a predicate.
    ///
    /// Retries with fresh seeds and growing sizes, and reports
    /// [`GenerationExhausted`] after [`FILTER_ATTEMPTS`] misses.
    pub fn filter<F>(self, predicate: F) -> Gen<T>
    where
        F: Fn(&T) -> bool + 'static,
    {
        let predicate: Rc<dyn Fn(&T) -> bool> = Rc::new(predicate);
        Gen::new(move |size, seed| {
            let mut seed = seed;
            for attempt in 0..FILTER_ATTEMPTS {
                let (attempt_seed, next) = seed.split();
                seed = next;
                let tree = self.generate(Size(size.0 + 2 * attempt), attempt_seed)?;
                if let Some(tree) = tree.filter(Rc::clone(&predicate)) {
                    return Ok(tree);
                }
            }
            Err(GenerationExhausted {
                attempts: FILTER_ATTEMPTS,
            })
        })
    }

    /// Map and filter in one step, retrying like [`Gen::filter`].
    pub fn filter_map<U, F>(self, f: F) -> Gen<U>
    where
        F: Fn(T) -> Option<U> + 'static,
        U: 'static,
    {
        let f: Rc<dyn Fn(T) -> Option<U>> = Rc::new(f);
        Gen::new(move |size, seed| {
            let mut seed = seed;
            for attempt in 0..FILTER_ATTEMPTS {
                let (attempt_seed, next) = seed.split();
                seed = next;
                let tree = self.generate(Size(size.0 + 2 * attempt), attempt_seed)?;
                if let Some(tree) = tree.filter_map(Rc::clone(&f)) {
                    return Ok(tree);
                }
            }
            Err(GenerationExhausted {
                attempts: FILTER_ATTEMPTS,
            })
        })
    }
}

impl<T: Clone + 'static> Gen<T> {
    /// Choose uniformly between constant values; shrinks towards the first.
    pub fn element(items: &[T]) -> Result<Self> {
        if items.is_empty() {
            return Err(PropcheckError::invalid_generator(
                "element requires at least one item",
            ));
        }
        let items: Rc<Vec<T>> = Rc::new(items.to_vec());
        let last = items.len() - 1;
        Ok(Gen::<usize>::from_range(Range::new(0, last)).map(move |index| items[index].clone()))
    }

    /// Choose uniformly between generators; shrinks towards the first.
    pub fn one_of(generators: Vec<Gen<T>>) -> Result<Self> {
        if generators.is_empty() {
            return Err(PropcheckError::invalid_generator(
                "one_of requires at least one generator",
            ));
        }
        let generators = Rc::new(generators);
        let last = generators.len() - 1;
        Ok(Gen::<usize>::from_range(Range::new(0, last))
            .bind(move |index| generators[index].clone()))
    }

    /// Choose between generators with the given relative weights.
    pub fn frequency(choices: Vec<WeightedChoice<T>>) -> Result<Self> {
        let total: u64 = choices.iter().map(|choice| u64::from(choice.weight)).sum();
        if total == 0 {
            return Err(PropcheckError::invalid_generator(
                "frequency requires at least one choice with a positive weight",
            ));
        }
        let choices = Rc::new(choices);
        Ok(Gen::<u64>::from_range(Range::new(0, total - 1)).bind(move |mut n| {
            for choice in choices.iter() {
                let weight = u64::from(choice.weight);
                if n < weight {
                    return choice.generator.clone();
                }
                n -= weight;
            }
            // n < total, so the loop always returns; the last choice is the fallback.
            choices[choices.len() - 1].generator.clone()
        }))
    }

    /// Weighted choice between constant values.
    pub fn weighted(items: Vec<(u32, T)>) -> Result<Self> {
        Gen::frequency(
            items
                .into_iter()
                .map(|(weight, value)| WeightedChoice::new(weight, Gen::constant(value)))
                .collect(),
        )
    }

    /// Generate an optional value, `None` a quarter of the time.
    pub fn option_of(generator: Gen<T>) -> Gen<Option<T>> {
        Gen::<u8>::from_range(Range::new(0, 3)).bind(move |n| {
            if n == 0 {
                Gen::constant(None)
            } else {
                generator.clone().map(Some)
            }
        })
    }

    /// Lists whose length grows with size, from 0 up to `Size::MAX`.
    pub fn list_of(element: Gen<T>) -> Gen<Vec<T>> {
        sequence_of(element, 0, Size::MAX)
    }

    /// Lists of at least one element.
    pub fn non_empty_list_of(element: Gen<T>) -> Gen<Vec<T>> {
        sequence_of(element, 1, Size::MAX)
    }

    /// Lists with a length in `[min, max]`, scaled by size.
    pub fn list_of_range(element: Gen<T>, min: usize, max: usize) -> Result<Gen<Vec<T>>> {
        if min > max {
            return Err(PropcheckError::invalid_generator(format!(
                "list length bounds are inverted: min {min} > max {max}"
            )));
        }
        Ok(sequence_of(element, min, max))
    }

    /// Lists of exactly `len` elements.
    pub fn list_of_len(element: Gen<T>, len: usize) -> Gen<Vec<T>> {
        sequence_of(element, len, len)
    }
}

fn sequence_of<T: Clone + 'static>(element: Gen<T>, min: usize, max: usize) -> Gen<Vec<T>> {
    let length = Gen::<usize>::from_range(Range::linear_from(min, min, max));
    Gen::new(move |size, seed| {
        let (length_seed, mut seed) = seed.split();
        let len = length.generate(size, length_seed)?.value;
        let mut trees = Vec::with_capacity(len);
        for _ in 0..len {
            let (element_seed, next) = seed.split();
            seed = next;
            trees.push(element.generate(size, element_seed)?);
        }
        Ok(Tree::sequence(trees, min))
    })
}

/// A generator paired with its relative weight for [`Gen::frequency`].
pub struct WeightedChoice<T> {
    pub weight: u32,
    pub generator: Gen<T>,
}

impl<T> WeightedChoice<T> {
    pub fn new(weight: u32, generator: Gen<T>) -> Self {
        WeightedChoice { weight, generator }
    }
}

/// Integer types the range generators work over.
pub trait Integral: Copy + Ord + fmt::Debug + 'static {
    fn to_i128(self) -> i128;
    /// Callers only pass values inside the type's bounds.
    fn from_i128(value: i128) -> Self;
}

macro_rules! impl_integral {
    ($($ty:ty),*) => {
        $(
            impl Integral for $ty {
                fn to_i128(self) -> i128 {
                    self as i128
                }

                fn from_i128(value: i128) -> Self {
                    value as $ty
                }
            }
        )*
    };
}

impl_integral!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Scaling {
    Constant,
    Linear,
}

/// Bounds for integer generation together with the shrink origin.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Range<T> {
    lo: T,
    hi: T,
    origin: T,
    scaling: Scaling,
}

impl<T: Integral> Range<T> {
    /// Uniform over `[lo, hi]` at every size, shrinking towards the value
    /// nearest zero. The bounds may be given in either order.
    pub fn new(lo: T, hi: T) -> Self {
        let (lo, hi) = if lo <= hi { (lo, hi) } else { (hi, lo) };
        Range {
            lo,
            hi,
            origin: nearest_zero(lo, hi),
            scaling: Scaling::Constant,
        }
    }

    /// Bounds that start at the origin for size 0 and reach `[lo, hi]` at
    /// `Size::MAX`.
    pub fn linear(lo: T, hi: T) -> Self {
        let range = Range::new(lo, hi);
        Range {
            scaling: Scaling::Linear,
            ..range
        }
    }

    /// Like [`Range::linear`] with an explicit origin, clamped into the bounds.
    pub fn linear_from(origin: T, lo: T, hi: T) -> Self {
        let range = Range::linear(lo, hi);
        Range {
            origin: origin.max(range.lo).min(range.hi),
            ..range
        }
    }

    pub fn origin(&self) -> T {
        self.origin
    }

    /// The inclusive bounds in effect at `size`.
    pub fn bounds(&self, size: Size) -> (T, T) {
        match self.scaling {
            Scaling::Constant => (self.lo, self.hi),
            Scaling::Linear => {
                let scale = size.get().min(Size::MAX) as i128;
                let origin = self.origin.to_i128();
                let toward = |bound: T| {
                    T::from_i128(origin + (bound.to_i128() - origin) * scale / Size::MAX as i128)
                };
                (toward(self.lo), toward(self.hi))
            }
        }
    }
}

fn nearest_zero<T: Integral>(lo: T, hi: T) -> T {
    let (low, high) = (lo.to_i128(), hi.to_i128());
    if low > 0 {
        lo
    } else if high < 0 {
        hi
    } else {
        T::from_i128(0)
    }
}

impl<T: Integral> Gen<T> {
    /// Uniform integers within `range`, shrinking towards its origin.
    pub fn from_range(range: Range<T>) -> Self {
        Gen::new(move |size, seed| {
            let (lo, hi) = range.bounds(size);
            let (value, _next) = seed.next_in_range(lo.to_i128(), hi.to_i128());
            let origin = range.origin().to_i128();
            Ok(Tree::unfold(value, move |&x| towards(origin, x)).map(T::from_i128))
        })
    }
}

/// Primitive generators.
impl Gen<bool> {
    /// Generate a random boolean, shrinking `true` to `false`.
    pub fn bool() -> Self {
        Gen::new(|_size, seed| {
            let (value, _new_seed) = seed.next_bool();
            Ok(Tree::unfold(value, |&b| if b { vec![false] } else { Vec::new() }))
        })
    }
}

impl Gen<i32> {
    /// Generate an integer in the given range.
    pub fn int_range(min: i32, max: i32) -> Self {
        Gen::from_range(Range::new(min, max))
    }

    /// Generate a positive integer whose magnitude grows with size.
    pub fn positive() -> Self {
        Gen::from_range(Range::linear(1, i32::MAX))
    }

    /// Generate a natural number (including zero).
    pub fn natural() -> Self {
        Gen::from_range(Range::linear(0, i32::MAX))
    }
}

impl Gen<char> {
    /// Choose from the characters of `alphabet`; shrinks towards the first.
    pub fn from_chars(alphabet: &str) -> Result<Self> {
        let chars: Vec<char> = alphabet.chars().collect();
        Gen::element(&chars)
    }

    /// ASCII letters.
    pub fn ascii_alpha() -> Self {
        ascii_between(b'a', b'z')
            .zip(Gen::bool())
            .map(|(c, upper)| if upper { c.to_ascii_uppercase() } else { c })
    }

    /// Lowercase ASCII letters.
    pub fn ascii_lowercase() -> Self {
        ascii_between(b'a', b'z')
    }

    /// Decimal digits.
    pub fn digit() -> Self {
        ascii_between(b'0', b'9')
    }

    /// Printable ASCII, space included.
    pub fn ascii_printable() -> Self {
        ascii_between(b' ', b'~')
    }
}

fn ascii_between(lo: u8, hi: u8) -> Gen<char> {
    Gen::<u8>::from_range(Range::constant_from_low(lo, hi)).map(char::from)
}

impl<T: Integral> Range<T> {
    /// Constant bounds shrinking towards `lo` regardless of sign.
    pub fn constant_from_low(lo: T, hi: T) -> Self {
        let range = Range::new(lo, hi);
        Range {
            origin: range.lo,
            ..range
        }
    }
}

impl Gen<String> {
    /// Strings drawn from `chars` with a length in `[min, max]`, scaled by size.
    pub fn string_of(chars: Gen<char>, min: usize, max: usize) -> Result<Self> {
        Ok(Gen::list_of_range(chars, min, max)?.map(|chars| chars.into_iter().collect()))
    }

    /// ASCII letter strings up to the current size in length.
    pub fn alpha() -> Self {
        Gen::list_of(Gen::<char>::ascii_alpha()).map(|chars| chars.into_iter().collect())
    }
}
