//! Write-once memo cell behind `Opt::Lazy`.
//!
//! The producer sits in a take-once slot; the first observation moves it out,
//! runs it, and stores the outcome in a `OnceCell`. `get_or_init` is the
//! check-and-set: racing observers block until the winner has stored the
//! value, so the producer never runs twice.

use std::fmt;
use std::sync::{Mutex, PoisonError};

use log::trace;
use once_cell::sync::OnceCell;

type Producer<T> = Box<dyn FnOnce() -> Option<T> + Send>;

pub struct Deferred<T> {
    producer: Mutex<Option<Producer<T>>>,
    resolved: OnceCell<Option<T>>,
}

impl<T> Deferred<T> {
    pub fn new<F>(producer: F) -> Self
    where
        F: FnOnce() -> Option<T> + Send + 'static,
    {
        let producer: Producer<T> = Box::new(producer);
        Self { producer: Mutex::new(Some(producer)), resolved: OnceCell::new() }
    }

    /// Whether the producer has already run. Never forces.
    #[inline]
    pub fn is_resolved(&self) -> bool { self.resolved.get().is_some() }

    /// Resolved state if the producer has run, `None` otherwise. Never forces.
    #[inline]
    pub fn peek(&self) -> Option<Option<&T>> { self.resolved.get().map(Option::as_ref) }

    /// Resolve on first call, then borrow the memoized outcome.
    ///
    /// Calling this from inside the producer of the same cell is a bug: the
    /// inner call either deadlocks or panics.
    pub fn force(&self) -> Option<&T> {
        self.resolved.get_or_init(|| run(take(&self.producer))).as_ref()
    }

    /// Resolve if needed and hand back the owned outcome.
    pub fn into_resolved(self) -> Option<T> {
        let Deferred { producer, resolved } = self;
        match resolved.into_inner() {
            Some(value) => value,
            None => run(producer.into_inner().unwrap_or_else(PoisonError::into_inner)),
        }
    }
}

fn take<T>(slot: &Mutex<Option<Producer<T>>>) -> Option<Producer<T>> {
    slot.lock().unwrap_or_else(PoisonError::into_inner).take()
}

fn run<T>(producer: Option<Producer<T>>) -> Option<T> {
    let Some(producer) = producer else {
        // Only reachable after the producer panicked or re-entered its own cell.
        panic!("deferred Opt has no producer left to resolve it");
    };
    let value = producer();
    trace!("deferred Opt resolved to {}", if value.is_some() { "Some" } else { "None" });
    value
}

impl<T: fmt::Debug> fmt::Debug for Deferred<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.peek() {
            Some(Some(value)) => write!(f, "Lazy(Some({:?}))", value),
            Some(None) => write!(f, "Lazy(None)"),
            None => write!(f, "Lazy(<unresolved>)"),
        }
    }
}
