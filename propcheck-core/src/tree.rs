//! Rose tree implementation for shrinking test values.

use std::fmt;
use std::rc::Rc;

type Children<T> = Rc<dyn Fn() -> Vec<Tree<T>>>;

/// A rose tree containing a value and its shrink possibilities.
///
/// Children are produced on demand by a thunk, so the shrink space is never
/// materialised beyond the level being explored. Calling [`Tree::children`]
/// twice yields the same sequence.
pub struct Tree<T> {
    pub value: T,
    children: Children<T>,
}

impl<T: Clone> Clone for Tree<T> {
    fn clone(&self) -> Self {
        Tree {
            value: self.value.clone(),
            children: Rc::clone(&self.children),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for Tree<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Tree")
            .field("value", &self.value)
            .finish_non_exhaustive()
    }
}

impl<T: 'static> Tree<T> {
    /// Create a new tree with the given value and no children.
    pub fn singleton(value: T) -> Self {
        Tree {
            value,
            children: Rc::new(Vec::new),
        }
    }

    /// Create a tree whose children are computed by `children` when asked for.
    pub fn lazy<F>(value: T, children: F) -> Self
    where
        F: Fn() -> Vec<Tree<T>> + 'static,
    {
        Tree {
            value,
            children: Rc::new(children),
        }
    }

    /// The shrink candidates of this value, in exploration order.
    pub fn children(&self) -> Vec<Tree<T>> {
        (self.children)()
    }

    /// Check if the tree has any children (shrinks).
    pub fn has_shrinks(&self) -> bool {
        !self.children().is_empty()
    }

    /// Map a function over the tree values.
    pub fn map<U, F>(self, f: F) -> Tree<U>
    where
        F: Fn(T) -> U + Clone + 'static,
        U: 'static,
    {
        let children = self.children;
        let value = f(self.value);
        Tree::lazy(value, move || {
            children()
                .into_iter()
                .map(|child| child.map(f.clone()))
                .collect()
        })
    }

    /// Monadic bind over trees: shrinks of the outer value come first, each
    /// re-running `f`, followed by the shrinks of the inner tree.
    ///
    /// Outer shrinks for which `f` fails are skipped.
    pub fn try_bind<U, E>(self, f: Rc<dyn Fn(T) -> Result<Tree<U>, E>>) -> Result<Tree<U>, E>
    where
        T: Clone,
        U: 'static,
        E: 'static,
    {
        let inner = f(self.value.clone())?;
        let outer_children = self.children;
        let inner_children = inner.children;
        Ok(Tree {
            value: inner.value,
            children: Rc::new(move || {
                let mut result: Vec<Tree<U>> = outer_children()
                    .into_iter()
                    .filter_map(|child| child.try_bind(Rc::clone(&f)).ok())
                    .collect();
                result.extend(inner_children());
                result
            }),
        })
    }

    /// Pair two trees, shrinking the left component first.
    pub fn zip<U>(self, other: Tree<U>) -> Tree<(T, U)>
    where
        T: Clone,
        U: Clone + 'static,
    {
        let left = self.clone();
        let right = other.clone();
        Tree::lazy((self.value, other.value), move || {
            let mut result: Vec<Tree<(T, U)>> = left
                .children()
                .into_iter()
                .map(|l| l.zip(right.clone()))
                .collect();
            result.extend(right.children().into_iter().map(|r| left.clone().zip(r)));
            result
        })
    }

    /// Filter the tree, keeping only values that satisfy the predicate.
    pub fn filter(self, predicate: Rc<dyn Fn(&T) -> bool>) -> Option<Tree<T>> {
        if !predicate(&self.value) {
            return None;
        }
        let children = self.children;
        Some(Tree::lazy(self.value, move || {
            children()
                .into_iter()
                .filter_map(|child| child.filter(Rc::clone(&predicate)))
                .collect()
        }))
    }

    /// Transform and filter in one pass; candidates mapped to `None` are pruned.
    pub fn filter_map<U: 'static>(self, f: Rc<dyn Fn(T) -> Option<U>>) -> Option<Tree<U>> {
        let value = f(self.value)?;
        let children = self.children;
        Some(Tree::lazy(value, move || {
            children()
                .into_iter()
                .filter_map(|child| child.filter_map(Rc::clone(&f)))
                .collect()
        }))
    }

    /// Values of the immediate shrink candidates.
    pub fn shrinks(&self) -> Vec<T> {
        self.children().into_iter().map(|child| child.value).collect()
    }

    /// Expand the tree to a given depth, collecting all values.
    pub fn expand(&self, max_depth: usize) -> Vec<T>
    where
        T: Clone,
    {
        let mut result = vec![self.value.clone()];
        self.expand_recursive(&mut result, max_depth, 0);
        result
    }

    fn expand_recursive(&self, result: &mut Vec<T>, max_depth: usize, current_depth: usize)
    where
        T: Clone,
    {
        if current_depth >= max_depth {
            return;
        }

        for child in self.children() {
            result.push(child.value.clone());
            child.expand_recursive(result, max_depth, current_depth + 1);
        }
    }
}

impl<T: Clone + 'static> Tree<T> {
    /// Create a new tree with the given value and children.
    pub fn with_children(value: T, children: Vec<Tree<T>>) -> Self {
        Tree::lazy(value, move || children.clone())
    }

    /// Build a tree by repeatedly applying `shrink` to each value.
    ///
    /// `shrink` must only return values strictly smaller than its input
    /// under some well-founded measure, otherwise shrinking never ends.
    pub fn unfold<F>(value: T, shrink: F) -> Self
    where
        F: Fn(&T) -> Vec<T> + Clone + 'static,
    {
        let seed = value.clone();
        Tree::lazy(value, move || {
            shrink(&seed)
                .into_iter()
                .map(|candidate| Tree::unfold(candidate, shrink.clone()))
                .collect()
        })
    }

    /// Combine element trees into a tree of sequences.
    ///
    /// Shrinks first drop chunks of elements (halving the chunk size each
    /// round, never going below `min_len` elements) and then shrink single
    /// elements in place.
    pub fn sequence(trees: Vec<Tree<T>>, min_len: usize) -> Tree<Vec<T>> {
        let value = trees.iter().map(|tree| tree.value.clone()).collect();
        let trees = Rc::new(trees);
        Tree::lazy(value, move || {
            let n = trees.len();
            let mut result = Vec::new();

            let mut chunk = n;
            while chunk > 0 {
                let mut start = 0;
                while start < n {
                    let end = (start + chunk).min(n);
                    if n - (end - start) >= min_len {
                        let kept = trees[..start].iter().chain(&trees[end..]).cloned().collect();
                        result.push(Tree::sequence(kept, min_len));
                    }
                    start += chunk;
                }
                chunk /= 2;
            }

            for index in 0..n {
                for shrunk in trees[index].children() {
                    let mut replaced: Vec<Tree<T>> = trees.as_ref().clone();
                    replaced[index] = shrunk;
                    result.push(Tree::sequence(replaced, min_len));
                }
            }

            result
        })
    }
}

/// Integer shrink candidates: the origin first, then values halving the
/// distance back towards `value`. Every candidate is strictly closer to
/// `origin` than `value` is.
pub fn towards(origin: i128, value: i128) -> Vec<i128> {
    if origin == value {
        return Vec::new();
    }

    let mut result = vec![origin];
    let mut step = (value - origin) / 2;
    while step != 0 {
        let candidate = value - step;
        if result.last() != Some(&candidate) {
            result.push(candidate);
        }
        step /= 2;
    }
    result
}

impl<T: 'static> From<T> for Tree<T> {
    fn from(value: T) -> Self {
        Tree::singleton(value)
    }
}
