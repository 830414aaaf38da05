//! Exhaustive dispatch from outside the `Opt` enum.

use crate::opt::Opt;

/// One arm per observable shape. A `Lazy` is resolved before dispatch, so
/// implementors only ever handle `Some` and `None`.
pub trait OptVisitor<T> {
    type Value;

    fn visit_some(self, value: T) -> Self::Value;

    fn visit_none(self) -> Self::Value;
}

/// Visitor assembled from two closures; see [`from_fns`].
pub struct FnVisitor<S, N> {
    some: S,
    none: N,
}

pub fn from_fns<T, R, S, N>(some: S, none: N) -> FnVisitor<S, N>
where
    S: FnOnce(T) -> R,
    N: FnOnce() -> R,
{
    FnVisitor { some, none }
}

impl<T, R, S, N> OptVisitor<T> for FnVisitor<S, N>
where
    S: FnOnce(T) -> R,
    N: FnOnce() -> R,
{
    type Value = R;

    #[inline]
    fn visit_some(self, value: T) -> R { (self.some)(value) }

    #[inline]
    fn visit_none(self) -> R { (self.none)() }
}

impl<T> Opt<T> {
    pub fn accept<V>(self, visitor: V) -> V::Value
    where
        V: OptVisitor<T>,
    {
        match self.into_option() {
            Some(value) => visitor.visit_some(value),
            None => visitor.visit_none(),
        }
    }

    pub fn accept_ref<'a, V>(&'a self, visitor: V) -> V::Value
    where
        V: OptVisitor<&'a T>,
    {
        match self.as_option() {
            Some(value) => visitor.visit_some(value),
            None => visitor.visit_none(),
        }
    }
}
