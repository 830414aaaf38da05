//! Iteration over the 0 or 1 values of an `Opt`, and the sequence helpers
//! built on top of it.

use std::iter::FusedIterator;

use crate::opt::Opt;

/// Borrowing iterator; a fresh one comes out of every [`Opt::iter`] call.
#[derive(Clone, Debug)]
pub struct Iter<'a, T> {
    inner: Option<&'a T>,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    #[inline]
    fn next(&mut self) -> Option<&'a T> { self.inner.take() }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = usize::from(self.inner.is_some());
        (n, Some(n))
    }
}

impl<'a, T> DoubleEndedIterator for Iter<'a, T> {
    #[inline]
    fn next_back(&mut self) -> Option<&'a T> { self.inner.take() }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}
impl<T> FusedIterator for Iter<'_, T> {}

#[derive(Clone, Debug)]
pub struct IntoIter<T> {
    inner: Option<T>,
}

impl<T> Iterator for IntoIter<T> {
    type Item = T;

    #[inline]
    fn next(&mut self) -> Option<T> { self.inner.take() }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = usize::from(self.inner.is_some());
        (n, Some(n))
    }
}

impl<T> DoubleEndedIterator for IntoIter<T> {
    #[inline]
    fn next_back(&mut self) -> Option<T> { self.inner.take() }
}

impl<T> ExactSizeIterator for IntoIter<T> {}
impl<T> FusedIterator for IntoIter<T> {}

impl<T> Opt<T> {
    pub fn iter(&self) -> Iter<'_, T> { Iter { inner: self.as_option() } }
}

impl<T> IntoIterator for Opt<T> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    fn into_iter(self) -> IntoIter<T> { IntoIter { inner: self.into_option() } }
}

impl<'a, T> IntoIterator for &'a Opt<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Iter<'a, T> { self.iter() }
}

/// All-or-nothing collect: the first `None` stops consumption and the
/// result is `None`.
impl<A, V: FromIterator<A>> FromIterator<Opt<A>> for Opt<V> {
    fn from_iter<I: IntoIterator<Item = Opt<A>>>(iter: I) -> Self {
        let collected: Option<V> = iter.into_iter().map(Opt::into_option).collect();
        Opt::of_nullable(collected)
    }
}

/// Contained values in input order, absent entries dropped.
pub fn flatten<T, I>(opts: I) -> impl Iterator<Item = T>
where
    I: IntoIterator<Item = Opt<T>>,
{
    opts.into_iter().flat_map(Opt::into_iter)
}

/// `Some` of every value in input order, or `None` as soon as one is missing.
pub fn sequence<T, I>(opts: I) -> Opt<Vec<T>>
where
    I: IntoIterator<Item = Opt<T>>,
{
    opts.into_iter().collect()
}
