//! This module defines reactions on settled promises. Any future whose output
//! is a `Result` counts as a promise here.

use pin_project::pin_project;
use std::{future::Future, pin::Pin, task};

/// Reactions available on every promise.
pub trait PromiseExt<T, E>: Future<Output = Result<T, E>> + Sized {
    /// Maps the fulfillment value with `on_fulfilled`, or the rejection
    /// reason with `on_rejected`, into a derived future.
    ///
    /// # Examples
    ///
    /// ```
    /// use errback::PromiseExt;
    /// use futures::executor::block_on;
    ///
    /// let derived = async { Err::<u8, &str>("boom") }.then(
    ///     |value: u8| value.to_string(),
    ///     |reason: &str| reason.to_uppercase(),
    /// );
    /// assert_eq!(block_on(derived), "BOOM");
    /// ```
    fn then<F, G, U>(self, on_fulfilled: F, on_rejected: G) -> Then<Self, F, G>
    where
        F: FnOnce(T) -> U,
        G: FnOnce(E) -> U,
    {
        Then { promise: self, reactions: Some((on_fulfilled, on_rejected)) }
    }

    /// Runs `reaction` once the promise settles, whatever the outcome, and
    /// then yields the original outcome.
    fn always<F>(self, reaction: F) -> Always<Self, F>
    where
        F: FnOnce(),
    {
        Always { promise: self, reaction: Some(reaction) }
    }
}

impl<P, T, E> PromiseExt<T, E> for P where P: Future<Output = Result<T, E>> {}

/// Future returned by [`PromiseExt::then`].
#[pin_project]
#[derive(Debug)]
#[must_use = "futures do nothing unless polled"]
pub struct Then<P, F, G> {
    #[pin]
    promise: P,
    reactions: Option<(F, G)>,
}

impl<P, F, G, T, E, U> Future for Then<P, F, G>
where
    P: Future<Output = Result<T, E>>,
    F: FnOnce(T) -> U,
    G: FnOnce(E) -> U,
{
    type Output = U;

    fn poll(
        self: Pin<&mut Self>,
        ctx: &mut task::Context<'_>,
    ) -> task::Poll<Self::Output> {
        let this = self.project();
        let outcome = match this.promise.poll(ctx) {
            task::Poll::Ready(outcome) => outcome,
            task::Poll::Pending => return task::Poll::Pending,
        };
        let (on_fulfilled, on_rejected) = match this.reactions.take() {
            Some(reactions) => reactions,
            None => panic!("`Then` polled after completion"),
        };
        task::Poll::Ready(match outcome {
            Ok(value) => on_fulfilled(value),
            Err(reason) => on_rejected(reason),
        })
    }
}

/// Future returned by [`PromiseExt::always`].
#[pin_project]
#[derive(Debug)]
#[must_use = "futures do nothing unless polled"]
pub struct Always<P, F> {
    #[pin]
    promise: P,
    reaction: Option<F>,
}

impl<P, F, T, E> Future for Always<P, F>
where
    P: Future<Output = Result<T, E>>,
    F: FnOnce(),
{
    type Output = Result<T, E>;

    fn poll(
        self: Pin<&mut Self>,
        ctx: &mut task::Context<'_>,
    ) -> task::Poll<Self::Output> {
        let this = self.project();
        let outcome = match this.promise.poll(ctx) {
            task::Poll::Ready(outcome) => outcome,
            task::Poll::Pending => return task::Poll::Pending,
        };
        match this.reaction.take() {
            Some(reaction) => reaction(),
            None => panic!("`Always` polled after completion"),
        }
        task::Poll::Ready(outcome)
    }
}
