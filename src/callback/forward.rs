//! This module implements the opposite direction of the bridge: forwarding
//! the outcome of a promise to an error-first callback.

use pin_project::pin_project;
use std::{future::Future, pin::Pin, task};

/// Forwards the outcome of `promise` to the error-first `callback` once the
/// returned future is driven to completion: `callback(Some(error), None)` on
/// rejection, `callback(None, Some(value))` on fulfillment.
///
/// The callback runs exactly once, and only if the returned future is polled
/// until it completes.
///
/// # Examples
///
/// ```
/// use futures::executor::block_on;
///
/// let mut seen = None;
/// block_on(errback::bind_callback(
///     async { Ok::<_, String>(42) },
///     |error, value| seen = Some((error, value)),
/// ));
/// assert_eq!(seen, Some((None, Some(42))));
/// ```
pub fn bind_callback<P, C, T, E>(promise: P, callback: C) -> Forward<P, C>
where
    P: Future<Output = Result<T, E>>,
    C: FnOnce(Option<E>, Option<T>),
{
    Forward { promise, callback: Some(callback) }
}

/// Future returned by [`bind_callback`].
#[pin_project]
#[derive(Debug)]
#[must_use = "the callback only runs when the future is polled"]
pub struct Forward<P, C> {
    #[pin]
    promise: P,
    callback: Option<C>,
}

impl<P, C, T, E> Future for Forward<P, C>
where
    P: Future<Output = Result<T, E>>,
    C: FnOnce(Option<E>, Option<T>),
{
    type Output = ();

    fn poll(
        self: Pin<&mut Self>,
        ctx: &mut task::Context<'_>,
    ) -> task::Poll<Self::Output> {
        let this = self.project();
        let outcome = match this.promise.poll(ctx) {
            task::Poll::Ready(outcome) => outcome,
            task::Poll::Pending => return task::Poll::Pending,
        };
        let callback = match this.callback.take() {
            Some(callback) => callback,
            None => panic!("`Forward` polled after completion"),
        };
        match outcome {
            Ok(value) => callback(None, Some(value)),
            Err(error) => callback(Some(error), None),
        }
        task::Poll::Ready(())
    }
}
