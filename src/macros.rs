//! This module defines macros.

/// Calls an error-first callback function with variadic arguments, returning
/// a promise of the [`Local`](crate::Local) engine. Syntax:
/// ```ignore
/// call!($function $(, $arguments)*)
/// ```
/// `call!(f, a, b)` is the same as `errback::apply(f, vec![a, b])`.
///
/// # Examples
///
/// ```
/// use errback::{call, Callback, Settlement};
/// use futures::executor::block_on;
///
/// fn add(args: Vec<i32>, callback: Callback<i32, ()>) {
///     callback.succeed(vec![args.iter().sum()]);
/// }
///
/// assert_eq!(block_on(call!(add, 10, 20)), Ok(Settlement::Single(30)));
/// ```
#[macro_export]
macro_rules! call {
    ($function:expr $(, $arguments:expr)* $(,)?) => {
        $crate::apply($function, ::std::vec![$($arguments),*])
    };
}

/// Binds leading arguments of an error-first callback function given
/// variadically, producing a reusable [`Bound`](crate::Bound) function over
/// the [`Local`](crate::Local) engine. Syntax:
/// ```ignore
/// bind!($function $(, $arguments)*)
/// ```
///
/// # Examples
///
/// ```
/// use errback::{bind, Callback, Settlement};
/// use futures::executor::block_on;
///
/// fn add(args: Vec<i32>, callback: Callback<i32, ()>) {
///     callback.succeed(vec![args.iter().sum()]);
/// }
///
/// let curried = bind!(add, 5);
/// assert_eq!(block_on(curried.call([10])), Ok(Settlement::Single(15)));
/// ```
#[macro_export]
macro_rules! bind {
    ($function:expr $(, $arguments:expr)* $(,)?) => {
        $crate::bind($function, ::std::vec![$($arguments),*])
    };
}
