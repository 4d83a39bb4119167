//! This module implements calling error-first callback functions so that
//! they return promises.
//!
//! A wrapped function receives its arguments as a `Vec` followed by the
//! injected callback, either a [`Callback`] or, when the engine's resolver
//! is `Send`, a [`SendCallback`] the function may move to another thread. It
//! is invoked synchronously, exactly once per call, and the returned promise
//! settles whenever the function invokes the callback. If the function never
//! invokes it, the promise never settles.
//!
//! Panics raised by the wrapped function are not caught: they unwind through
//! the bridging call, as programmer errors, instead of turning into
//! rejections. Only errors reported through the callback reject.
//!
//! [`Callback`]: crate::Callback
//! [`SendCallback`]: crate::callback::SendCallback

use crate::{
    callback::{ErrorFirst, FromResolver},
    engine::{local::Local, Defer, Deferred},
    settlement::Settlement,
};
use std::fmt;

/// Calls error-first callback functions through an injected promise engine.
#[derive(Debug, Clone, Copy, Default)]
pub struct Bridge<D = Local> {
    engine: D,
}

impl Bridge<Local> {
    /// Creates a bridge over the single-threaded [`Local`] engine.
    pub fn local() -> Self {
        Self::new(Local)
    }
}

impl<D> Bridge<D> {
    /// Creates a bridge whose promises come from the given deferred factory.
    pub fn new(engine: D) -> Self {
        Self { engine }
    }

    /// The engine promises are created by.
    pub fn engine(&self) -> &D {
        &self.engine
    }

    /// Calls `function` with `args` followed by a fresh callback, returning
    /// the promise the callback settles.
    ///
    /// # Examples
    ///
    /// ```
    /// use errback::{Bridge, Callback, Settlement};
    /// use futures::executor::block_on;
    ///
    /// fn add(args: Vec<i32>, callback: Callback<i32, String>) {
    ///     callback.succeed(vec![args[0] + args[1]]);
    /// }
    ///
    /// let promise = Bridge::local().apply(add, vec![10, 20]);
    /// assert_eq!(block_on(promise), Ok(Settlement::Single(30)));
    /// ```
    pub fn apply<F, A, C>(&self, function: F, args: Vec<A>) -> D::Promise
    where
        D: Defer<Settlement<C::Value>, C::Error>,
        F: FnOnce(Vec<A>, C),
        C: ErrorFirst + FromResolver<D::Resolver>,
    {
        let Deferred { promise, resolver } = self.engine.defer();
        tracing::trace!(args = args.len(), "invoking callback-style function");
        function(args, C::from_resolver(resolver));
        promise
    }

    /// Same as [`Bridge::apply`], with the arguments given as any sequence.
    pub fn call<F, I, C>(&self, function: F, args: I) -> D::Promise
    where
        D: Defer<Settlement<C::Value>, C::Error>,
        F: FnOnce(Vec<I::Item>, C),
        I: IntoIterator,
        C: ErrorFirst + FromResolver<D::Resolver>,
    {
        self.apply::<_, I::Item, C>(function, args.into_iter().collect())
    }

    /// Produces a reusable function with the `leading` arguments fixed. Each
    /// call of the result invokes `function` with the leading arguments
    /// followed by the call's own arguments, and returns a new promise.
    ///
    /// Nothing is invoked at bind time.
    pub fn bind<F, A>(&self, function: F, leading: Vec<A>) -> Bound<D, F, A>
    where
        D: Clone,
    {
        Bound { bridge: self.clone(), function, leading }
    }
}

/// A callback-style function with fixed leading arguments, produced by
/// [`Bridge::bind`].
#[derive(Clone)]
pub struct Bound<D, F, A> {
    bridge: Bridge<D>,
    function: F,
    leading: Vec<A>,
}

impl<D, F, A> Bound<D, F, A> {
    /// The arguments fixed at bind time.
    pub fn leading(&self) -> &[A] {
        &self.leading
    }

    /// Calls the function with the leading arguments followed by `trailing`.
    pub fn apply<C>(&self, trailing: Vec<A>) -> D::Promise
    where
        D: Defer<Settlement<C::Value>, C::Error>,
        F: Fn(Vec<A>, C),
        A: Clone,
        C: ErrorFirst + FromResolver<D::Resolver>,
    {
        self.call::<_, C>(trailing)
    }

    /// Same as [`Bound::apply`], with the trailing arguments given as any
    /// sequence.
    pub fn call<I, C>(&self, trailing: I) -> D::Promise
    where
        D: Defer<Settlement<C::Value>, C::Error>,
        F: Fn(Vec<A>, C),
        I: IntoIterator<Item = A>,
        A: Clone,
        C: ErrorFirst + FromResolver<D::Resolver>,
    {
        let args: Vec<A> =
            self.leading.iter().cloned().chain(trailing).collect();
        self.bridge.apply::<_, A, C>(&self.function, args)
    }
}

impl<D, F, A> fmt::Debug for Bound<D, F, A>
where
    D: fmt::Debug,
    A: fmt::Debug,
{
    fn fmt(&self, fmtr: &mut fmt::Formatter) -> fmt::Result {
        fmtr.debug_struct("Bound")
            .field("bridge", &self.bridge)
            .field("leading", &self.leading)
            .finish_non_exhaustive()
    }
}
