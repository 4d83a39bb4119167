//! This module implements a thread-safe promise engine on top of
//! `futures`' oneshot channels. Unlike [`crate::engine::local`], a promise
//! whose resolvers are all dropped before settling completes with
//! [`Canceled`].

use crate::engine::{AlreadySettled, Defer, Deferred, Resolver};
use futures::channel::oneshot;
use std::sync::{Arc, Mutex};

pub use futures::channel::oneshot::Canceled;

/// Read side of a [`Oneshot`] promise: the receiving half of the channel.
pub type OneshotPromise<T, E> = oneshot::Receiver<Result<T, E>>;

/// The oneshot channel engine.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Oneshot;

impl Oneshot {
    /// Creates a pending promise and its resolver.
    pub fn deferred<T, E>(
        &self,
    ) -> Deferred<OneshotPromise<T, E>, OneshotResolver<T, E>> {
        let (sender, receiver) = oneshot::channel();
        Deferred::new(
            receiver,
            OneshotResolver { sender: Arc::new(Mutex::new(Some(sender))) },
        )
    }
}

impl<T, E> Defer<T, E> for Oneshot
where
    T: Send + 'static,
    E: Send + 'static,
{
    type Promise = OneshotPromise<T, E>;
    type Resolver = OneshotResolver<T, E>;

    fn defer(&self) -> Deferred<Self::Promise, Self::Resolver> {
        self.deferred()
    }
}

/// Write side of a [`Oneshot`] promise. It can be cloned and sent across
/// threads; only the first settlement counts.
#[derive(Debug)]
pub struct OneshotResolver<T, E> {
    sender: Arc<Mutex<Option<oneshot::Sender<Result<T, E>>>>>,
}

impl<T, E> OneshotResolver<T, E> {
    fn settle(&self, outcome: Result<T, E>) -> Result<(), AlreadySettled> {
        let sender = match self.sender.lock() {
            Ok(mut guard) => guard.take(),
            Err(poisoned) => poisoned.into_inner().take(),
        };
        match sender {
            // A dropped receiver means nobody waits anymore, which still
            // counts as settling.
            Some(sender) => {
                let _ = sender.send(outcome);
                Ok(())
            },
            None => Err(AlreadySettled),
        }
    }

    /// Fulfills the promise, failing if it was already settled.
    pub fn try_resolve(&self, value: T) -> Result<(), AlreadySettled> {
        self.settle(Ok(value))
    }

    /// Rejects the promise, failing if it was already settled.
    pub fn try_reject(&self, reason: E) -> Result<(), AlreadySettled> {
        self.settle(Err(reason))
    }
}

impl<T, E> Clone for OneshotResolver<T, E> {
    fn clone(&self) -> Self {
        Self { sender: self.sender.clone() }
    }
}

impl<T, E> Resolver<T, E> for OneshotResolver<T, E> {
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
