//! Callbacks notified of probe decisions.
//!
//! A probe owns one [`Listeners`] registry for its own event type and calls
//! [`Listeners::notify`] once per decision. Callbacks run on the caller's
//! thread, in subscription order.

use std::fmt;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::Arc;

type Callback<E> = Arc<dyn Fn(&E) + Send + Sync>;

/// Subscribed callbacks for events of type `E`.
///
/// Cloning is cheap and yields an independent registry that shares the
/// callbacks subscribed so far.
pub struct Listeners<E> {
    callbacks: Vec<Callback<E>>,
}

impl<E> Listeners<E> {
    /// An empty registry.
    pub fn new() -> Self {
        Self {
            callbacks: Vec::new(),
        }
    }

    /// Subscribe a callback.
    pub fn subscribe<F>(&mut self, callback: F)
    where
        F: Fn(&E) + Send + Sync + 'static,
    {
        self.callbacks.push(Arc::new(callback));
    }

    /// Hand `event` to every callback and return how many of them panicked.
    ///
    /// A panicking callback is skipped; the rest still run and the panic
    /// never reaches the probe's caller, so a broken listener cannot turn a
    /// passing attempt into a failing one.
    pub fn notify(&self, event: &E) -> usize {
        self.callbacks
            .iter()
            .filter(|callback| catch_unwind(AssertUnwindSafe(|| callback(event))).is_err())
            .count()
    }

    /// Number of subscribed callbacks.
    pub fn len(&self) -> usize {
        self.callbacks.len()
    }

    /// True if nothing is subscribed.
    pub fn is_empty(&self) -> bool {
        self.callbacks.is_empty()
    }
}

impl<E> Clone for Listeners<E> {
    fn clone(&self) -> Self {
        Self {
            callbacks: self.callbacks.clone(),
        }
    }
}

impl<E> Default for Listeners<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> fmt::Debug for Listeners<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Listeners")
            .field("len", &self.callbacks.len())
            .finish()
    }
}
