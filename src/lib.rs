//! Bridges functions written in the error-first callback style to promises,
//! and promises back to error-first callbacks.
//!
//! A callback-style function receives its arguments followed by a callback,
//! and reports completion by calling `callback(error, values...)`. The
//! functions in this crate inject such a callback, and surface whatever it
//! gets called with through a promise of an injectable promise engine
//! (see [`engine`]).
//!
//! # Examples
//!
//! ```
//! use errback::{Callback, Settlement};
//! use futures::executor::block_on;
//!
//! fn sum(args: Vec<i32>, callback: Callback<i32, String>) {
//!     callback.invoke(None, vec![args.iter().sum()]);
//! }
//!
//! let promise = errback::apply(sum, vec![10, 20]);
//! assert_eq!(block_on(promise), Ok(Settlement::Single(30)));
//!
//! let curried = errback::bind(sum, vec![5]);
//! assert_eq!(block_on(curried.call([10])), Ok(Settlement::Single(15)));
//! ```

#![warn(missing_docs)]
#![cfg_attr(feature = "feature-doc-cfg", feature(doc_cfg))]

#[macro_use]
mod macros;

pub mod settlement;

pub mod engine;

pub mod callback;

pub mod bridge;

pub mod reaction;

pub use bridge::{Bound, Bridge};
pub use callback::{
    create_callback,
    create_send_callback,
    forward::bind_callback,
    Callback,
    ErrorFirst,
    FromResolver,
    SendCallback,
};
pub use engine::{
    local::{Local, LocalPromise, LocalResolver},
    Defer,
    Deferred,
    Resolver,
};
pub use reaction::PromiseExt;
pub use settlement::{ArityError, Settlement};

/// Calls `function` with `args` and an injected callback, returning a promise
/// of the [`Local`] engine settled by that callback.
///
/// See [`Bridge::apply`].
pub fn apply<F, A, C>(
    function: F,
    args: Vec<A>,
) -> LocalPromise<Settlement<C::Value>, C::Error>
where
    F: FnOnce(Vec<A>, C),
    C: ErrorFirst,
    C: FromResolver<LocalResolver<Settlement<C::Value>, C::Error>>,
    C::Value: 'static,
    C::Error: 'static,
{
    Bridge::local().apply(function, args)
}

/// Same as [`apply`], but arguments are given as any sequence, such as an
/// array literal. For a variadic call site, see the [`call!`] macro.
pub fn call<F, I, C>(
    function: F,
    args: I,
) -> LocalPromise<Settlement<C::Value>, C::Error>
where
    F: FnOnce(Vec<I::Item>, C),
    I: IntoIterator,
    C: ErrorFirst,
    C: FromResolver<LocalResolver<Settlement<C::Value>, C::Error>>,
    C::Value: 'static,
    C::Error: 'static,
{
    Bridge::local().call(function, args)
}

/// Produces a reusable function with `leading` arguments fixed, which returns
/// a fresh [`Local`] promise on every call.
///
/// See [`Bridge::bind`].
pub fn bind<F, A>(function: F, leading: Vec<A>) -> Bound<Local, F, A> {
    Bridge::local().bind(function, leading)
}
