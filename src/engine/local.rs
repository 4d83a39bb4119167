//! This module implements a single-threaded promise engine. The promise is a
//! future, and the resolver can be cloned and shared freely inside a thread.

use crate::engine::{AlreadySettled, Defer, Deferred, Resolver};
use std::{cell::Cell, fmt, future::Future, pin::Pin, rc::Rc, task};

/// The single-threaded engine. It is the engine used by the crate-level
/// shorthands such as [`crate::apply`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Local;

impl Local {
    /// Creates a pending promise and its resolver. Same as
    /// [`Defer::defer`], without needing the trait in scope.
    pub fn deferred<T, E>(
        &self,
    ) -> Deferred<LocalPromise<T, E>, LocalResolver<T, E>> {
        let slot = Slot::init_pending();
        Deferred::new(LocalPromise::new(slot.clone()), LocalResolver::new(slot))
    }
}

impl<T, E> Defer<T, E> for Local
where
    T: 'static,
    E: 'static,
{
    type Promise = LocalPromise<T, E>;
    type Resolver = LocalResolver<T, E>;

    fn defer(&self) -> Deferred<Self::Promise, Self::Resolver> {
        self.deferred()
    }
}

struct SlotInner<T, E> {
    settled: Cell<bool>,
    waker: Cell<Option<task::Waker>>,
    data: Cell<Option<Result<T, E>>>,
}

impl<T, E> fmt::Debug for SlotInner<T, E>
where
    T: fmt::Debug,
    E: fmt::Debug,
{
    fn fmt(&self, fmtr: &mut fmt::Formatter) -> fmt::Result {
        let waker = self.waker.take();
        let data = self.data.take();
        let result = fmtr
            .debug_struct("local::Slot")
            .field("settled", &self.settled)
            .field("waker", &waker)
            .field("data", &data)
            .finish();
        self.waker.set(waker);
        self.data.set(data);
        result
    }
}

impl<T, E> SlotInner<T, E> {
    fn init_pending() -> Self {
        Self {
            settled: Cell::new(false),
            waker: Cell::new(None),
            data: Cell::new(None),
        }
    }
}

#[derive(Debug)]
struct Slot<T, E> {
    inner: Rc<SlotInner<T, E>>,
}

impl<T, E> Slot<T, E> {
    fn init_pending() -> Self {
        Self { inner: Rc::new(SlotInner::init_pending()) }
    }

    fn is_settled(&self) -> bool {
        self.inner.settled.get()
    }

    fn settle(&self, outcome: Result<T, E>) -> Result<(), AlreadySettled> {
        if self.inner.settled.replace(true) {
            return Err(AlreadySettled);
        }
        self.inner.data.set(Some(outcome));
        if let Some(waker) = self.inner.waker.take() {
            waker.wake();
        }
        Ok(())
    }
}

impl<T, E> Clone for Slot<T, E> {
    fn clone(&self) -> Self {
        Self { inner: self.inner.clone() }
    }
}

/// Write side of a [`Local`] promise.
///
/// Clones settle the same promise; only the first settlement counts.
#[derive(Debug)]
pub struct LocalResolver<T, E> {
    slot: Slot<T, E>,
}

impl<T, E> LocalResolver<T, E> {
    fn new(slot: Slot<T, E>) -> Self {
        Self { slot }
    }

    /// Fulfills the promise, failing if it was already settled.
    pub fn try_resolve(&self, value: T) -> Result<(), AlreadySettled> {
        self.slot.settle(Ok(value))
    }

    /// Rejects the promise, failing if it was already settled.
    pub fn try_reject(&self, reason: E) -> Result<(), AlreadySettled> {
        self.slot.settle(Err(reason))
    }

    /// Tests whether the promise was already settled.
    pub fn is_settled(&self) -> bool {
        self.slot.is_settled()
    }
}

impl<T, E> Clone for LocalResolver<T, E> {
    fn clone(&self) -> Self {
        Self { slot: self.slot.clone() }
    }
}

impl<T, E> Resolver<T, E> for LocalResolver<T, E> {
    fn resolve(&self, value: T) {
        if let Err(error) = self.try_resolve(value) {
            tracing::debug!(%error, "ignoring resolve of a settled promise");
        }
    }

    fn reject(&self, reason: E) {
        if let Err(error) = self.try_reject(reason) {
            tracing::debug!(%error, "ignoring reject of a settled promise");
        }
    }
}

/// Read side of a [`Local`] promise. Awaiting it yields `Ok` when fulfilled
/// and `Err` when rejected.
///
/// If every resolver is dropped before settling, the promise stays pending
/// forever. Polling again after it completed also stays pending.
#[derive(Debug)]
pub struct LocalPromise<T, E> {
    slot: Slot<T, E>,
}

impl<T, E> LocalPromise<T, E> {
    fn new(slot: Slot<T, E>) -> Self {
        Self { slot }
    }

    /// Tests whether the promise was settled, even if its outcome was
    /// already taken.
    pub fn is_settled(&self) -> bool {
        self.slot.is_settled()
    }

    /// Takes the outcome without waiting, if the promise is settled and the
    /// outcome was not taken yet.
    pub fn try_take(&self) -> Option<Result<T, E>> {
        self.slot.inner.data.take()
    }
}

impl<T, E> Future for LocalPromise<T, E> {
    type Output = Result<T, E>;

    fn poll(
        self: Pin<&mut Self>,
        ctx: &mut task::Context<'_>,
    ) -> task::Poll<Self::Output> {
        match self.try_take() {
            Some(outcome) => task::Poll::Ready(outcome),
            None => {
                let waker = match self.slot.inner.waker.take() {
                    Some(stored) if stored.will_wake(ctx.waker()) => stored,
                    _ => ctx.waker().clone(),
                };
                self.slot.inner.waker.set(Some(waker));
                task::Poll::Pending
            },
        }
    }
}
