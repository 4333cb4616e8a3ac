use std::cmp::Ordering;
use std::fmt;

/// A total order over weights
///
/// `compare(a, b) == Ordering::Less` means `a` belongs closer to the top of the
/// queue than `b`. Ties are resolved by the queue itself (insertion order).
pub trait Comparator<W> {
    /// Compares two weights
    fn compare(&self, a: &W, b: &W) -> Ordering;
}

/// Built-in orderings for weights that implement `Ord`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Order {
    /// Smaller weight is the top
    #[default]
    Minimum,
    /// Larger weight is the top
    Maximum,
}

impl<W: Ord> Comparator<W> for Order {
    fn compare(&self, a: &W, b: &W) -> Ordering {
        match self {
            Order::Minimum => a.cmp(b),
            Order::Maximum => b.cmp(a),
        }
    }
}

/// Caller-supplied ordering
///
/// Wraps any `Fn(&W, &W) -> Ordering`. The closure must describe a total order,
/// otherwise the heap may surface entries in an arbitrary sequence.
#[derive(Clone, Copy)]
pub struct Custom<F>(pub F);

impl<W, F> Comparator<W> for Custom<F>
where
    F: Fn(&W, &W) -> Ordering,
{
    fn compare(&self, a: &W, b: &W) -> Ordering {
        (self.0)(a, b)
    }
}

impl<F> fmt::Debug for Custom<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Custom(..)")
    }
}
