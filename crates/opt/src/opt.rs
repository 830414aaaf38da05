//! `Opt<T>`: presence or absence of a value, plus a deferred variant that
//! settles into one of the two the first time anything looks at it.

use std::borrow::Cow;
use std::fmt;
use std::hash::{Hash, Hasher};

use crate::error::{OptError, Result};
use crate::lazy::Deferred;

/// Optional value with a closed set of shapes.
///
/// `Lazy` is observable only as `Some` or `None`: every operation that looks
/// at the value resolves it first, and the visitor never sees it.
pub enum Opt<T> {
    Some(T),
    None,
    Lazy(Deferred<T>),
}

impl<T> Opt<T> {
    // ——— Factories ———

    #[inline]
    pub fn of(value: T) -> Self { Opt::Some(value) }

    /// The nullable boundary: a missing value collapses to `None`.
    #[inline]
    pub fn of_nullable(value: Option<T>) -> Self {
        match value {
            Some(value) => Opt::Some(value),
            None => Opt::None,
        }
    }

    /// Strict counterpart of [`Opt::of_nullable`]: a missing value is a
    /// caller error rather than an absent container.
    pub fn try_of(value: Option<T>) -> Result<Self> {
        value.map(Opt::Some).ok_or(OptError::NullArgument("value"))
    }

    #[inline]
    pub const fn none() -> Self { Opt::None }

    /// Defer the value behind `producer`. It runs at most once, on the first
    /// observation; returning `None` resolves to an absent container.
    pub fn lazy<F>(producer: F) -> Self
    where
        F: FnOnce() -> Option<T> + Send + 'static,
    {
        Opt::Lazy(Deferred::new(producer))
    }

    /// Like [`Opt::lazy`] for producers that always yield a value.
    pub fn lazy_of<F>(producer: F) -> Self
    where
        F: FnOnce() -> T + Send + 'static,
    {
        Opt::lazy(move || Some(producer()))
    }

    pub fn try_lazy<F>(producer: Option<F>) -> Result<Self>
    where
        F: FnOnce() -> Option<T> + Send + 'static,
    {
        producer.map(Opt::lazy).ok_or(OptError::NullArgument("producer"))
    }

    #[inline]
    pub fn from_option(value: Option<T>) -> Self { Opt::of_nullable(value) }

    // ——— Resolution ———

    /// Borrow the value if present. Forces a `Lazy`.
    pub fn as_option(&self) -> Option<&T> {
        match self {
            Opt::Some(value) => Some(value),
            Opt::None => None,
            Opt::Lazy(cell) => cell.force(),
        }
    }

    /// Take the value if present. Forces a `Lazy`.
    pub fn into_option(self) -> Option<T> {
        match self {
            Opt::Some(value) => Some(value),
            Opt::None => None,
            Opt::Lazy(cell) => cell.into_resolved(),
        }
    }

    /// Collapse a `Lazy` into the terminal shape it resolves to.
    pub fn resolved(self) -> Self { Opt::of_nullable(self.into_option()) }

    /// Run a pending producer now. Returns `self` for chaining.
    pub fn force(&self) -> &Self {
        self.as_option();
        self
    }

    #[inline]
    pub fn is_lazy(&self) -> bool { matches!(self, Opt::Lazy(_)) }

    /// `false` only for a `Lazy` whose producer has not run yet. Never forces.
    pub fn is_resolved(&self) -> bool {
        match self {
            Opt::Lazy(cell) => cell.is_resolved(),
            _ => true,
        }
    }

    // ——— Queries ———

    pub fn is_present(&self) -> bool { self.as_option().is_some() }

    pub fn is_empty(&self) -> bool { !self.is_present() }

    pub fn exists<P>(&self, predicate: P) -> bool
    where
        P: FnOnce(&T) -> bool,
    {
        self.as_option().map_or(false, predicate)
    }

    pub fn contains(&self, value: &T) -> bool
    where
        T: PartialEq,
    {
        self.as_option() == Some(value)
    }

    // ——— Extraction ———

    /// The value, or `EmptyContainer` when absent.
    pub fn get(self) -> Result<T> { self.into_option().ok_or_else(OptError::empty) }

    pub fn get_ref(&self) -> Result<&T> { self.as_option().ok_or_else(OptError::empty) }

    /// Like [`Opt::get`] with a caller-chosen message on the error.
    pub fn expect(self, message: impl Into<Cow<'static, str>>) -> Result<T> {
        self.into_option().ok_or_else(|| OptError::EmptyContainer(message.into()))
    }

    pub fn get_or(self, other: T) -> T { self.into_option().unwrap_or(other) }

    /// `supplier` runs only when the container is absent.
    pub fn get_or_else<F>(self, supplier: F) -> T
    where
        F: FnOnce() -> T,
    {
        self.into_option().unwrap_or_else(supplier)
    }

    /// The value, or the error `error` builds. Whatever `error` returns is
    /// handed back untouched.
    pub fn get_or_throw<E, F>(self, error: F) -> Result<T, E>
    where
        F: FnOnce() -> E,
    {
        self.into_option().ok_or_else(error)
    }

    pub fn as_ref(&self) -> Opt<&T> { Opt::of_nullable(self.as_option()) }

    // ——— Transformation ———

    pub fn map<U, F>(self, f: F) -> Opt<U>
    where
        F: FnOnce(T) -> U,
    {
        Opt::of_nullable(self.into_option().map(f))
    }

    /// `map` for functions that may come back empty-handed; a `None` result
    /// goes through the same nullable boundary as [`Opt::of_nullable`].
    pub fn map_nullable<U, F>(self, f: F) -> Opt<U>
    where
        F: FnOnce(T) -> Option<U>,
    {
        Opt::of_nullable(self.into_option().and_then(f))
    }

    /// The container `f` returns is passed through as-is, never re-wrapped.
    pub fn flat_map<U, F>(self, f: F) -> Opt<U>
    where
        F: FnOnce(T) -> Opt<U>,
    {
        match self.into_option() {
            Some(value) => f(value),
            None => Opt::None,
        }
    }

    pub fn flat_map_or_else<U, F, D>(self, f: F, fallback: D) -> Opt<U>
    where
        F: FnOnce(T) -> Opt<U>,
        D: FnOnce() -> Opt<U>,
    {
        match self.into_option() {
            Some(value) => f(value),
            None => fallback(),
        }
    }

    pub fn map_or_else<U, D, F>(self, default: D, f: F) -> U
    where
        D: FnOnce() -> U,
        F: FnOnce(T) -> U,
    {
        self.into_option().map_or_else(default, f)
    }

    /// Feed the whole container to `f` and wrap what comes back.
    pub fn transform<U, F>(self, f: F) -> Opt<U>
    where
        F: FnOnce(Opt<T>) -> Option<U>,
    {
        Opt::of_nullable(f(self))
    }

    // ——— Filtering ———

    pub fn filter<P>(self, predicate: P) -> Self
    where
        P: FnOnce(&T) -> bool,
    {
        if self.exists(predicate) { self } else { Opt::None }
    }

    pub fn filter_not<P>(self, predicate: P) -> Self
    where
        P: FnOnce(&T) -> bool,
    {
        self.filter(|value| !predicate(value))
    }

    pub fn filter_or_else<P, D>(self, predicate: P, fallback: D) -> Self
    where
        P: FnOnce(&T) -> bool,
        D: FnOnce() -> Opt<T>,
    {
        if self.exists(predicate) { self } else { fallback() }
    }

    // ——— Combination ———

    /// `other` is left unresolved when `self` is absent.
    pub fn zip<U, R, F>(self, other: Opt<U>, f: F) -> Opt<R>
    where
        F: FnOnce(T, U) -> R,
    {
        let Some(left) = self.into_option() else { return Opt::None };
        let Some(right) = other.into_option() else { return Opt::None };
        Opt::Some(f(left, right))
    }

    /// Apply a contained function to the contained value.
    pub fn ap<U, F>(self, f: Opt<F>) -> Opt<U>
    where
        F: FnOnce(T) -> U,
    {
        self.zip(f, |value, f| f(value))
    }

    pub fn and<U>(self, other: Opt<U>) -> Opt<U> {
        if self.is_present() { other } else { Opt::None }
    }

    pub fn or(self, alternative: Opt<T>) -> Opt<T> {
        if self.is_present() { self } else { alternative }
    }

    pub fn or_else<F>(self, alternative: F) -> Opt<T>
    where
        F: FnOnce() -> Opt<T>,
    {
        if self.is_present() { self } else { alternative() }
    }

    /// Whichever side is present, if exactly one is.
    pub fn xor(self, other: Opt<T>) -> Opt<T> {
        match (self.is_present(), other.is_present()) {
            (true, false) => self,
            (false, true) => other,
            _ => Opt::None,
        }
    }

    // ——— Folding ———

    pub fn fold<U, F>(self, default: U, f: F) -> U
    where
        F: FnOnce(T) -> U,
    {
        self.into_option().map_or(default, f)
    }

    /// Two-armed match over the resolved shape.
    pub fn match_with<R, S, N>(self, some: S, none: N) -> R
    where
        S: FnOnce(T) -> R,
        N: FnOnce() -> R,
    {
        match self.into_option() {
            Some(value) => some(value),
            None => none(),
        }
    }

    // ——— Side effects ———

    pub fn if_present<F>(&self, f: F)
    where
        F: FnOnce(&T),
    {
        if let Some(value) = self.as_option() {
            f(value);
        }
    }

    pub fn if_present_or_else<F, G>(&self, f: F, otherwise: G)
    where
        F: FnOnce(&T),
        G: FnOnce(),
    {
        match self.as_option() {
            Some(value) => f(value),
            None => otherwise(),
        }
    }

    pub fn if_empty<G>(self, action: G) -> Self
    where
        G: FnOnce(),
    {
        if self.is_empty() {
            action();
        }
        self
    }

    /// Observe the value without changing the container.
    pub fn peek<F>(self, f: F) -> Self
    where
        F: FnOnce(&T),
    {
        self.if_present(f);
        self
    }
}

impl<T> Opt<Opt<T>> {
    pub fn flatten(self) -> Opt<T> { self.flat_map(|inner| inner) }
}

impl<T> Default for Opt<T> {
    fn default() -> Self { Opt::None }
}

/// Cloning resolves a `Lazy`; the clone holds the terminal shape.
impl<T: Clone> Clone for Opt<T> {
    fn clone(&self) -> Self { Opt::of_nullable(self.as_option().cloned()) }
}

/// Compares resolved shapes. An unresolved `Lazy` on either side is forced.
impl<T: PartialEq> PartialEq for Opt<T> {
    fn eq(&self, other: &Self) -> bool { self.as_option() == other.as_option() }
}

impl<T: Eq> Eq for Opt<T> {}

impl<T: Hash> Hash for Opt<T> {
    fn hash<H: Hasher>(&self, state: &mut H) { self.as_option().hash(state) }
}

impl<T: fmt::Debug> fmt::Debug for Opt<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Opt::Some(value) => write!(f, "Some({:?})", value),
            Opt::None => write!(f, "None"),
            Opt::Lazy(cell) => fmt::Debug::fmt(cell, f),
        }
    }
}

impl<T: fmt::Display> fmt::Display for Opt<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.as_option() {
            Some(value) => write!(f, "Some({})", value),
            None => write!(f, "None"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::collections::hash_map::DefaultHasher;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    fn hash_of<T: Hash>(value: &T) -> u64 {
        let mut h = DefaultHasher::new();
        value.hash(&mut h);
        h.finish()
    }

    #[test]
    fn factories() {
        assert_eq!(Opt::of(3).get(), Ok(3));
        assert_eq!(Opt::of_nullable(Some("x")), Opt::of("x"));
        assert_eq!(Opt::<u8>::of_nullable(None), Opt::none());
        assert_eq!(Opt::try_of(Some(1)), Ok(Opt::of(1)));
        assert_eq!(Opt::<u8>::try_of(None), Err(OptError::NullArgument("value")));
        assert_eq!(Opt::<u8>::default(), Opt::None);
    }

    #[test]
    fn try_lazy_rejects_missing_producer() {
        let missing: Option<fn() -> Option<u8>> = None;
        let err = Opt::try_lazy(missing).unwrap_err();
        assert!(err.is_null_argument());
        let ok = Opt::try_lazy(Some(|| Some(4u8))).unwrap();
        assert_eq!(ok.get(), Ok(4));
    }

    #[test]
    fn get_on_none_is_empty_container() {
        let err = Opt::<u8>::none().get().unwrap_err();
        assert!(err.is_empty_container());
        assert_eq!(err.to_string(), "No value present");
        assert_eq!(
            Opt::<u8>::none().expect("port not configured"),
            Err(OptError::EmptyContainer("port not configured".into()))
        );
    }

    #[test]
    fn extraction_fallbacks() {
        assert_eq!(Opt::of(1).get_or(9), 1);
        assert_eq!(Opt::none().get_or(9), 9);

        let calls = Cell::new(0);
        let fallback = || {
            calls.set(calls.get() + 1);
            0
        };
        assert_eq!(Opt::of(5).get_or_else(fallback), 5);
        assert_eq!(calls.get(), 0);
        assert_eq!(Opt::none().get_or_else(fallback), 0);
        assert_eq!(calls.get(), 1);

        assert_eq!(Opt::of(2).get_or_throw(|| "missing"), Ok(2));
        assert_eq!(Opt::<u8>::none().get_or_throw(|| "missing"), Err("missing"));
    }

    #[test]
    fn queries() {
        assert!(Opt::of(4).exists(|v| *v % 2 == 0));
        assert!(!Opt::of(3).exists(|v| *v % 2 == 0));
        assert!(!Opt::<u8>::none().exists(|_| true));
        assert!(Opt::of("a").contains(&"a"));
        assert!(!Opt::of("a").contains(&"b"));
        assert!(!Opt::none().contains(&"a"));
    }

    #[test]
    fn map_and_map_nullable() {
        assert_eq!(Opt::of(2).map(|v| v * 10), Opt::of(20));
        assert_eq!(Opt::<i32>::none().map(|v| v * 10), Opt::none());
        assert_eq!(Opt::of(2).map_nullable(|_| None::<i32>), Opt::none());
        assert_eq!(Opt::of(2).map_nullable(|v| Some(v + 1)), Opt::of(3));
    }

    #[test]
    fn flat_map_returns_inner_container() {
        let half = |v: i32| if v % 2 == 0 { Opt::of(v / 2) } else { Opt::none() };
        assert_eq!(Opt::of(8).flat_map(half).flat_map(half), Opt::of(2));
        assert_eq!(Opt::of(6).flat_map(half).flat_map(half), Opt::none());
        assert_eq!(Opt::of(Opt::of(1)).flatten(), Opt::of(1));
        assert_eq!(Opt::<Opt<u8>>::of(Opt::none()).flatten(), Opt::none());

        let out = Opt::<i32>::none().flat_map_or_else(half, || Opt::of(-1));
        assert_eq!(out, Opt::of(-1));
        assert_eq!(Opt::none().map_or_else(|| "none".to_string(), |v: u8| v.to_string()), "none");
    }

    #[test]
    fn transform_sees_the_container() {
        let size = Opt::of(vec![1, 2]).transform(|o| o.into_option().map(|v| v.len()));
        assert_eq!(size, Opt::of(2));
        assert_eq!(Opt::of(1).transform(|_| None::<u8>), Opt::none());
    }

    #[test]
    fn filters() {
        assert_eq!(Opt::of(4).filter(|v| *v > 3), Opt::of(4));
        assert_eq!(Opt::of(2).filter(|v| *v > 3), Opt::none());
        assert_eq!(Opt::of(2).filter_not(|v| *v > 3), Opt::of(2));
        assert_eq!(Opt::of(2).filter_or_else(|v| *v > 3, || Opt::of(0)), Opt::of(0));
        assert_eq!(Opt::none().filter_or_else(|v: &i32| *v > 3, || Opt::of(0)), Opt::of(0));
    }

    #[test]
    fn combination() {
        assert_eq!(Opt::of(2).zip(Opt::of(3), |a, b| a * b), Opt::of(6));
        assert_eq!(Opt::of(2).zip(Opt::<i32>::none(), |a, b| a * b), Opt::none());

        let double = |v: i32| v * 2;
        assert_eq!(Opt::of(4).ap(Opt::of(double)), Opt::of(8));
        assert_eq!(Opt::<i32>::none().ap(Opt::of(double)), Opt::none());

        assert_eq!(Opt::of(1).and(Opt::of("b")), Opt::of("b"));
        assert_eq!(Opt::<u8>::none().and(Opt::of("b")), Opt::none());
        assert_eq!(Opt::of(1).or(Opt::of(2)), Opt::of(1));
        assert_eq!(Opt::none().or(Opt::of(2)), Opt::of(2));
        assert_eq!(Opt::none().or_else(|| Opt::of(7)), Opt::of(7));
    }

    #[test]
    fn xor_cases() {
        assert_eq!(Opt::of(1).xor(Opt::none()), Opt::of(1));
        assert_eq!(Opt::none().xor(Opt::of(2)), Opt::of(2));
        assert_eq!(Opt::of(1).xor(Opt::of(2)), Opt::none());
        assert_eq!(Opt::<i32>::none().xor(Opt::none()), Opt::none());
    }

    #[test]
    fn zip_leaves_other_unforced_when_absent() {
        let calls = Arc::new(AtomicUsize::new(0));
        let seen = Arc::clone(&calls);
        let other = Opt::lazy(move || {
            seen.fetch_add(1, Ordering::SeqCst);
            Some(1)
        });
        assert_eq!(Opt::<i32>::none().zip(other, |a, b| a + b), Opt::none());
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn fold_and_match_with() {
        assert_eq!(Opt::of(3).fold(0, |v| v + 1), 4);
        assert_eq!(Opt::none().fold(0, |v: i32| v + 1), 0);
        assert_eq!(Opt::of(3).match_with(|v| format!("got {v}"), || "nothing".into()), "got 3");
        assert_eq!(Opt::<u8>::none().match_with(|v| format!("got {v}"), || "nothing".into()), "nothing");
    }

    #[test]
    fn side_effects_never_fail_on_absence() {
        let hits = Cell::new(0);
        Opt::of(5).if_present(|v| hits.set(hits.get() + *v));
        Opt::<i32>::none().if_present(|v| hits.set(hits.get() + *v));
        assert_eq!(hits.get(), 5);

        let branch = Cell::new("");
        Opt::<u8>::none().if_present_or_else(|_| branch.set("some"), || branch.set("none"));
        assert_eq!(branch.get(), "none");

        let emptied = Cell::new(false);
        let kept = Opt::of(1).if_empty(|| emptied.set(true));
        assert!(!emptied.get());
        assert_eq!(kept, Opt::of(1));
        Opt::<u8>::none().if_empty(|| emptied.set(true));
        assert!(emptied.get());

        let peeked = Cell::new(0);
        assert_eq!(Opt::of(9).peek(|v| peeked.set(*v)), Opt::of(9));
        assert_eq!(peeked.get(), 9);
    }

    #[test]
    fn display_and_debug() {
        assert_eq!(Opt::of(42).to_string(), "Some(42)");
        assert_eq!(Opt::<i32>::none().to_string(), "None");
        assert_eq!(format!("{:?}", Opt::of("x")), "Some(\"x\")");
        assert_eq!(format!("{:?}", Opt::<u8>::none()), "None");
        let lazy = Opt::lazy_of(|| 1);
        assert_eq!(format!("{:?}", lazy), "Lazy(<unresolved>)");
        assert_eq!(lazy.to_string(), "Some(1)");
        assert_eq!(format!("{:?}", lazy), "Lazy(Some(1))");
    }

    #[test]
    fn hash_agrees_across_shapes() {
        assert_eq!(hash_of(&Opt::of(7)), hash_of(&Opt::lazy_of(|| 7)));
        assert_eq!(hash_of(&Opt::<u8>::none()), hash_of(&Opt::<u8>::lazy(|| None)));
        assert_ne!(hash_of(&Opt::of(7)), hash_of(&Opt::<i32>::none()));
    }

    #[test]
    fn clone_resolves_lazy() {
        let lazy = Opt::lazy_of(|| String::from("v"));
        let copy = lazy.clone();
        assert!(!copy.is_lazy());
        assert!(lazy.is_resolved());
        assert_eq!(copy, Opt::of(String::from("v")));
        assert_eq!(Opt::lazy_of(|| 1).resolved(), Opt::Some(1));
    }
}
