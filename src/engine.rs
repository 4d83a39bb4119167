//! This module defines the boundary between the bridge and a promise engine:
//! how a promise is created together with its resolver, and how a resolver
//! settles it.

use std::{rc::Rc, sync::Arc};
use thiserror::Error;

pub mod local;

pub mod oneshot;

#[cfg(feature = "js")]
#[cfg_attr(feature = "feature-doc-cfg", doc(cfg(feature = "js")))]
pub mod js;

/// The write side of a promise.
///
/// A promise is settled at most once. Calls made after the first settlement,
/// either `resolve` or `reject`, are ignored without any error.
pub trait Resolver<T, E> {
    /// Fulfills the promise with the given value.
    fn resolve(&self, value: T);

    /// Rejects the promise with the given reason.
    fn reject(&self, reason: E);
}

impl<'res, R, T, E> Resolver<T, E> for &'res R
where
    R: Resolver<T, E> + ?Sized,
{
    fn resolve(&self, value: T) {
        (**self).resolve(value)
    }

    fn reject(&self, reason: E) {
        (**self).reject(reason)
    }
}

impl<R, T, E> Resolver<T, E> for Box<R>
where
    R: Resolver<T, E> + ?Sized,
{
    fn resolve(&self, value: T) {
        (**self).resolve(value)
    }

    fn reject(&self, reason: E) {
        (**self).reject(reason)
    }
}

impl<R, T, E> Resolver<T, E> for Rc<R>
where
    R: Resolver<T, E> + ?Sized,
{
    fn resolve(&self, value: T) {
        (**self).resolve(value)
    }

    fn reject(&self, reason: E) {
        (**self).reject(reason)
    }
}

impl<R, T, E> Resolver<T, E> for Arc<R>
where
    R: Resolver<T, E> + ?Sized,
{
    fn resolve(&self, value: T) {
        (**self).resolve(value)
    }

    fn reject(&self, reason: E) {
        (**self).reject(reason)
    }
}

/// A promise paired with the resolver that settles it.
#[derive(Debug, Clone)]
pub struct Deferred<P, R> {
    /// The read side, handed to whoever waits for the outcome.
    pub promise: P,
    /// The write side, handed to whoever produces the outcome.
    pub resolver: R,
}

impl<P, R> Deferred<P, R> {
    /// Pairs a promise with its resolver.
    pub fn new(promise: P, resolver: R) -> Self {
        Self { promise, resolver }
    }
}

/// A promise engine's deferred factory: creates a fresh promise and its
/// resolver.
///
/// Any closure returning a [`Deferred`] is a factory, which makes it easy to
/// plug a substitute engine in.
///
/// # Examples
///
/// ```
/// use errback::{engine::local::Local, Bridge, Callback, Settlement};
///
/// let bridge = Bridge::new(|| Local.deferred::<Settlement<u8>, ()>());
/// let promise = bridge.call(
///     |_: Vec<u8>, callback: Callback<u8, ()>| callback.succeed(vec![1]),
///     [],
/// );
/// assert_eq!(promise.try_take(), Some(Ok(Settlement::Single(1))));
/// ```
pub trait Defer<T, E> {
    /// Type of the read side.
    type Promise;
    /// Type of the write side.
    type Resolver: Resolver<T, E> + 'static;

    /// Creates a pending promise together with its resolver.
    fn defer(&self) -> Deferred<Self::Promise, Self::Resolver>;
}

impl<F, P, R, T, E> Defer<T, E> for F
where
    F: Fn() -> Deferred<P, R>,
    R: Resolver<T, E> + 'static,
{
    type Promise = P;
    type Resolver = R;

    fn defer(&self) -> Deferred<P, R> {
        self()
    }
}

/// Error returned when settling a promise that was already settled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Error)]
#[error("promise already settled")]
pub struct AlreadySettled;
