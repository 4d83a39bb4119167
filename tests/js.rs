#![cfg(all(target_arch = "wasm32", feature = "js"))]

use errback::{
    create_callback,
    engine::js::{self, Js},
    Bridge,
    Callback,
};
use js_sys::{Array, Error, Function};
use wasm_bindgen::JsValue;
use wasm_bindgen_test::wasm_bindgen_test;

#[wasm_bindgen_test]
async fn js_engine_resolves_single_value() {
    let promise = Bridge::new(Js).call(
        |args: Vec<f64>, callback: Callback<JsValue, JsValue>| {
            callback.succeed(vec![JsValue::from(args[0] + args[1])])
        },
        [10.0, 20.0],
    );
    let value = js::into_future(promise).await.unwrap();
    assert_eq!(value.as_f64(), Some(30.0));
}

#[wasm_bindgen_test]
async fn js_engine_resolves_multiple_values_as_array() {
    let promise = Bridge::new(Js).call(
        |_: Vec<()>, callback: Callback<JsValue, JsValue>| {
            callback.succeed(vec![10.into(), 20.into(), 30.into()])
        },
        [],
    );
    let value = js::into_future(promise).await.unwrap();
    let values: Vec<_> =
        Array::from(&value).iter().filter_map(|v| v.as_f64()).collect();
    assert_eq!(values, vec![10.0, 20.0, 30.0]);
}

#[wasm_bindgen_test]
async fn apply_js_rejects_with_same_error() {
    let error = JsValue::from(Error::new("foobar"));
    let function = Function::new_with_args("error, cb", "cb(error);");
    let promise = js::apply_js(&function, &Array::of1(&error)).unwrap();
    let reason = js::into_future(promise).await.unwrap_err();
    assert_eq!(reason, error);
}

#[wasm_bindgen_test]
async fn apply_js_forwards_args_and_treats_null_as_success() {
    let function = Function::new_with_args("x, y, cb", "cb(null, x + y);");
    let args = Array::of2(&10.into(), &20.into());
    let promise = js::apply_js(&function, &args).unwrap();
    let value = js::into_future(promise).await.unwrap();
    assert_eq!(value.as_f64(), Some(30.0));
}

#[wasm_bindgen_test]
fn apply_js_returns_synchronous_throw() {
    let function = Function::new_with_args("cb", "throw new Error('boom');");
    assert!(js::apply_js(&function, &Array::new()).is_err());
}

#[wasm_bindgen_test]
async fn apply_js_ignores_second_callback_call() {
    let function = Function::new_with_args("cb", "cb(null, 1); cb(null, 2);");
    let promise = js::apply_js(&function, &Array::new()).unwrap();
    let value = js::into_future(promise).await.unwrap();
    assert_eq!(value.as_f64(), Some(1.0));
}

#[wasm_bindgen_test]
async fn js_callback_ignores_repeated_calls() {
    let deferred = Js.deferred();
    let callback = js::callback_to_js(create_callback(deferred.resolver));
    callback
        .call2(&JsValue::UNDEFINED, &JsValue::NULL, &"first".into())
        .unwrap();
    let repeated = callback.call1(&JsValue::UNDEFINED, &"late error".into());
    assert!(repeated.is_ok());
    let value = js::into_future(deferred.promise).await.unwrap();
    assert_eq!(value.as_string().as_deref(), Some("first"));
}
