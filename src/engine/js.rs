//! This module implements the promise engine of the JavaScript host, and a
//! bridge for JavaScript functions written in the error-first callback
//! style.

use crate::{
    callback::{create_callback, Callback},
    engine::{Defer, Deferred, Resolver},
    settlement::Settlement,
};
use js_sys::{Array, Function, Promise};
use wasm_bindgen::{closure::Closure, prelude::wasm_bindgen, JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;

#[wasm_bindgen(inline_js = "export function variadic(sink) {
    return function (error) {
        return sink(error, Array.prototype.slice.call(arguments, 1));
    };
}")]
extern "C" {
    /// Turns `sink(error, values)` into a variadic `function (error,
    /// ...values)`.
    fn variadic(sink: &JsValue) -> Function;
}

/// The JS host's `Promise` engine.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Js;

impl Js {
    /// Creates a pending JS promise and its resolver.
    pub fn deferred(&self) -> Deferred<Promise, JsResolver> {
        // Overwritten: the executor runs synchronously inside `Promise::new`.
        let mut resolve: Function = JsValue::UNDEFINED.unchecked_into();
        let mut reject: Function = JsValue::UNDEFINED.unchecked_into();
        let promise = Promise::new(&mut |on_resolve, on_reject| {
            resolve = on_resolve;
            reject = on_reject;
        });
        Deferred::new(promise, JsResolver { resolve, reject })
    }
}

impl Defer<Settlement<JsValue>, JsValue> for Js {
    type Promise = Promise;
    type Resolver = JsResolver;

    fn defer(&self) -> Deferred<Self::Promise, Self::Resolver> {
        self.deferred()
    }
}

/// Write side of a JS promise: its `resolve` and `reject` functions.
///
/// The JS engine itself ignores every settlement after the first.
#[derive(Debug, Clone)]
pub struct JsResolver {
    resolve: Function,
    reject: Function,
}

impl Resolver<Settlement<JsValue>, JsValue> for JsResolver {
    fn resolve(&self, value: Settlement<JsValue>) {
        let value = settlement_to_js(value);
        if let Err(error) = self.resolve.call1(&JsValue::UNDEFINED, &value) {
            tracing::debug!(?error, "JS resolve function threw");
        }
    }

    fn reject(&self, reason: JsValue) {
        if let Err(error) = self.reject.call1(&JsValue::UNDEFINED, &reason) {
            tracing::debug!(?error, "JS reject function threw");
        }
    }
}

/// Converts a settlement to the JS value a promise is fulfilled with:
/// `undefined`, the value itself, or an array of the values.
pub fn settlement_to_js(settlement: Settlement<JsValue>) -> JsValue {
    match settlement {
        Settlement::Empty => JsValue::UNDEFINED,
        Settlement::Single(value) => value,
        Settlement::Multiple(values) => {
            values.into_iter().collect::<Array>().into()
        },
    }
}

/// Turns a JS promise into a Rust future.
pub fn into_future(promise: Promise) -> JsFuture {
    JsFuture::from(promise)
}

/// Wraps a Rust [`Callback`] into a JS function with the error-first
/// convention: a `null` or `undefined` first argument means success.
///
/// Only the first call of the JS function reaches the callback; later calls
/// are ignored.
pub fn callback_to_js(callback: Callback<JsValue, JsValue>) -> Function {
    let mut pending = Some(callback);
    let sink = move |error: JsValue, values: Array| match pending.take() {
        Some(callback) => {
            let error = if error.is_null() || error.is_undefined() {
                None
            } else {
                Some(error)
            };
            callback.invoke(error, values.to_vec());
        },
        None => tracing::debug!("ignoring repeated call of a JS callback"),
    };
    let sink =
        Closure::wrap(Box::new(sink) as Box<dyn FnMut(JsValue, Array)>)
            .into_js_value();
    variadic(&sink)
}

/// Calls the JS `function` with `args` followed by an injected error-first
/// callback, returning a JS promise settled by that callback.
///
/// If `function` throws synchronously, the exception is returned as `Err`
/// and no promise is produced.
pub fn apply_js(function: &Function, args: &Array) -> Result<Promise, JsValue> {
    let Deferred { promise, resolver } = Js.deferred();
    let callback = callback_to_js(create_callback(resolver));
    let args = args.concat(&Array::of1(&callback));
    tracing::trace!(args = args.length(), "invoking JS callback-style function");
    function.apply(&JsValue::UNDEFINED, &args)?;
    Ok(promise)
}
