//! This module defines the error-first callback injected into callback-style
//! functions, and the translation of its arguments into a promise
//! settlement.

use crate::{engine::Resolver, settlement::Settlement};
use std::{fmt, marker::PhantomData};

pub mod forward;

/// An error-first callback: `callback(error, values...)`.
///
/// A present error rejects the target promise with that very error. An
/// absent error fulfills it with the values shaped as a [`Settlement`].
/// Invoking consumes the callback, so a callback fires at most once.
///
/// The resolver is boxed as `R`. The default is not `Send`; see
/// [`SendCallback`] for a callback that can be handed to another thread.
pub struct Callback<V, E, R = dyn Resolver<Settlement<V>, E>>
where
    R: ?Sized,
{
    resolver: Option<Box<R>>,
    _marker: PhantomData<fn(Result<Vec<V>, E>)>,
}

/// An error-first callback that can be sent to other threads. Bridges inject
/// it when the engine's resolver is `Send`, such as
/// [`Oneshot`](crate::engine::oneshot::Oneshot)'s.
pub type SendCallback<V, E> =
    Callback<V, E, dyn Resolver<Settlement<V>, E> + Send>;

/// Creates an error-first callback that settles through the given resolver.
///
/// # Examples
///
/// ```
/// use errback::{engine::local::Local, Settlement};
///
/// let deferred = Local.deferred::<Settlement<i32>, String>();
/// let callback = errback::create_callback(deferred.resolver);
/// callback.invoke(None, vec![10, 20, 30]);
///
/// assert_eq!(
///     deferred.promise.try_take(),
///     Some(Ok(Settlement::Multiple(vec![10, 20, 30]))),
/// );
/// ```
pub fn create_callback<R, V, E>(resolver: R) -> Callback<V, E>
where
    R: Resolver<Settlement<V>, E> + 'static,
{
    Callback::from_resolver(resolver)
}

/// Creates an error-first callback that can be sent to other threads.
pub fn create_send_callback<R, V, E>(resolver: R) -> SendCallback<V, E>
where
    R: Resolver<Settlement<V>, E> + Send + 'static,
{
    SendCallback::from_resolver(resolver)
}

/// The values and error an error-first callback type carries.
pub trait ErrorFirst {
    /// Type of the success values.
    type Value;
    /// Type of the error.
    type Error;
}

impl<V, E, R> ErrorFirst for Callback<V, E, R>
where
    R: ?Sized,
{
    type Value = V;
    type Error = E;
}

/// Builds a callback out of a promise engine's resolver. Bridges use it to
/// inject the callback type the wrapped function asks for.
pub trait FromResolver<R>: Sized {
    /// Wraps the resolver.
    fn from_resolver(resolver: R) -> Self;
}

impl<V, E, R> FromResolver<R> for Callback<V, E>
where
    R: Resolver<Settlement<V>, E> + 'static,
{
    fn from_resolver(resolver: R) -> Self {
        Self { resolver: Some(Box::new(resolver)), _marker: PhantomData }
    }
}

impl<V, E, R> FromResolver<R> for SendCallback<V, E>
where
    R: Resolver<Settlement<V>, E> + Send + 'static,
{
    fn from_resolver(resolver: R) -> Self {
        Self { resolver: Some(Box::new(resolver)), _marker: PhantomData }
    }
}

impl<V, E, R> Callback<V, E, R>
where
    R: ?Sized,
{
    /// Creates a callback with no resolver: invoking it has no observable
    /// effect.
    pub fn detached() -> Self {
        Self { resolver: None, _marker: PhantomData }
    }

    /// Tests whether this callback has no resolver to settle.
    pub fn is_detached(&self) -> bool {
        self.resolver.is_none()
    }
}

impl<V, E, R> Callback<V, E, R>
where
    R: Resolver<Settlement<V>, E> + ?Sized,
{
    /// Invokes the callback in the error-first form. `Some(error)` rejects,
    /// `None` fulfills with `values`.
    pub fn invoke(self, error: Option<E>, values: Vec<V>) {
        let outcome = match error {
            Some(error) => Err(error),
            None => Ok(values),
        };
        self.complete(outcome)
    }

    /// Invokes the callback with no error, i.e. `callback(null, values...)`.
    pub fn succeed(self, values: Vec<V>) {
        self.complete(Ok(values))
    }

    /// Invokes the callback with an error, i.e. `callback(error)`.
    pub fn fail(self, error: E) {
        self.complete(Err(error))
    }

    /// Invokes the callback with an already tagged outcome.
    pub fn complete(self, outcome: Result<Vec<V>, E>) {
        let resolver = match self.resolver {
            Some(resolver) => resolver,
            None => {
                tracing::trace!("detached callback fired");
                return;
            },
        };
        match outcome {
            Ok(values) => {
                tracing::trace!(values = values.len(), "callback fulfilled");
                resolver.resolve(Settlement::from(values));
            },
            Err(error) => {
                tracing::trace!("callback rejected");
                resolver.reject(error);
            },
        }
    }

    /// Turns the callback into a plain error-first closure, for APIs that
    /// expect one.
    pub fn into_fn(self) -> impl FnOnce(Option<E>, Vec<V>) {
        move |error, values| self.invoke(error, values)
    }
}

impl<V, E, R> Default for Callback<V, E, R>
where
    R: ?Sized,
{
    fn default() -> Self {
        Self::detached()
    }
}

impl<V, E, R> fmt::Debug for Callback<V, E, R>
where
    R: ?Sized,
{
    fn fmt(&self, fmtr: &mut fmt::Formatter) -> fmt::Result {
        fmtr.debug_struct("Callback")
            .field("detached", &self.is_detached())
            .finish()
    }
}
