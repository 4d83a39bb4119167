use errback::{
    create_callback,
    create_send_callback,
    engine::{
        local::Local,
        oneshot::{Canceled, Oneshot},
        AlreadySettled,
        Defer,
    },
    Bridge,
    Callback,
    Resolver,
    SendCallback,
    Settlement,
};
use futures::{executor::LocalPool, task::LocalSpawnExt};
use std::{cell::Cell, rc::Rc, thread};

#[test]
fn local_promise_wakes_waiting_task() {
    let mut pool = LocalPool::new();
    let deferred = Defer::<u8, ()>::defer(&Local);
    let observed = Rc::new(Cell::new(None));
    let sink = observed.clone();

    pool.spawner()
        .spawn_local(async move {
            sink.set(Some(deferred.promise.await));
        })
        .unwrap();
    pool.run_until_stalled();
    assert_eq!(observed.get(), None);

    deferred.resolver.resolve(9);
    pool.run_until_stalled();
    assert_eq!(observed.get(), Some(Ok(9)));
}

#[test]
fn local_promise_stays_pending_when_resolver_dropped() {
    let mut pool = LocalPool::new();
    let deferred = Local.deferred::<u8, ()>();
    let finished = Rc::new(Cell::new(false));
    let flag = finished.clone();

    pool.spawner()
        .spawn_local(async move {
            let _ = deferred.promise.await;
            flag.set(true);
        })
        .unwrap();
    drop(deferred.resolver);
    pool.run_until_stalled();
    assert!(!finished.get());
}

#[test]
fn local_try_methods_report_already_settled() {
    let deferred = Local.deferred::<(), &str>();
    assert!(!deferred.resolver.is_settled());
    assert_eq!(deferred.resolver.try_reject("first"), Ok(()));
    assert_eq!(deferred.resolver.try_resolve(()), Err(AlreadySettled));
    assert_eq!(AlreadySettled.to_string(), "promise already settled");
}

#[test]
fn oneshot_callback_settles_from_worker_thread() {
    let bridge = Bridge::new(Oneshot);
    let promise = bridge.call(
        |args: Vec<u64>, callback: SendCallback<u64, String>| {
            thread::spawn(move || {
                callback.succeed(vec![args.into_iter().product()]);
            });
        },
        [2, 3, 7],
    );
    let outcome = futures::executor::block_on(promise);
    assert_eq!(outcome, Ok(Ok(Settlement::Single(42))));
}

#[test]
fn bound_oneshot_callback_rejects_from_worker_thread() {
    let bound = Bridge::new(Oneshot).bind(
        |args: Vec<&'static str>, callback: SendCallback<(), String>| {
            thread::spawn(move || callback.fail(args.concat()));
        },
        vec!["worker ", "failed"],
    );
    let outcome = futures::executor::block_on(bound.call([]));
    assert_eq!(outcome, Ok(Err("worker failed".to_owned())));
}

#[test]
fn send_callback_created_from_send_resolver() {
    let deferred = Oneshot.deferred::<Settlement<u8>, ()>();
    let callback = create_send_callback(deferred.resolver);
    thread::spawn(move || callback.into_fn()(None, vec![1, 2]))
        .join()
        .unwrap();
    let outcome = futures::executor::block_on(deferred.promise);
    assert_eq!(outcome, Ok(Ok(Settlement::Multiple(vec![1, 2]))));
}

#[test]
fn oneshot_also_accepts_plain_callback() {
    let promise = Bridge::new(Oneshot).call(
        |_: Vec<()>, callback: Callback<u8, ()>| callback.succeed(vec![3]),
        [],
    );
    let outcome = futures::executor::block_on(promise);
    assert_eq!(outcome, Ok(Ok(Settlement::Single(3))));
}

#[test]
fn oneshot_resolver_is_send() {
    let deferred = Oneshot.deferred::<Settlement<u8>, String>();
    let resolver = deferred.resolver.clone();
    thread::spawn(move || resolver.resolve(Settlement::Single(1)))
        .join()
        .unwrap();
    deferred.resolver.reject("late".to_owned());
    assert_eq!(
        deferred.resolver.try_reject("later".to_owned()),
        Err(AlreadySettled)
    );
    let outcome = futures::executor::block_on(deferred.promise);
    assert_eq!(outcome, Ok(Ok(Settlement::Single(1))));
}

#[test]
fn oneshot_cancels_when_resolver_dropped() {
    let deferred = Oneshot.deferred::<Settlement<u8>, ()>();
    let callback = create_callback(deferred.resolver);
    drop(callback);
    let outcome = futures::executor::block_on(deferred.promise);
    assert_eq!(outcome, Err(Canceled));
}

#[test]
fn local_second_settlement_is_ignored_by_trait_methods() {
    let deferred = Local.deferred::<u8, &str>();
    let other = deferred.resolver.clone();
    deferred.resolver.reject("first");
    other.resolve(2);
    assert!(other.is_settled());
    assert_eq!(deferred.promise.try_take(), Some(Err("first")));
}

#[test]
fn local_pending_until_settled() {
    let deferred = Local.deferred::<u8, ()>();
    assert!(!deferred.promise.is_settled());
    assert_eq!(deferred.promise.try_take(), None);
    deferred.resolver.resolve(1);
    assert!(deferred.promise.is_settled());
    assert_eq!(deferred.promise.try_take(), Some(Ok(1)));
}
