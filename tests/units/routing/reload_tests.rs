use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::thread;

use relay_routing::{
    DirectiveAction, DispatchError, DispatchRegistry, Method, ReloadError, RouteDirective,
    RouteEntry, RouteTarget, Router,
};
use relay_uri::{join_segments, UriDocument};
use serial_test::serial;

fn directive(method: &str, template: &str, name: &str) -> RouteDirective {
    RouteDirective::new(method, template, RouteTarget::Invoke(name.into()))
}

#[test]
fn test_reload_replaces_whole_table() {
    let router = Router::new();
    router
        .reload(&[directive("GET", "/old", "old")])
        .unwrap();
    router
        .reload(&[directive("GET", "/new", "new")])
        .unwrap();

    assert!(router.matches(Method::Get, "/old").is_none());
    assert!(router.matches(Method::Get, "/new").is_some());
}

#[test]
fn test_request_flow_from_uri_to_params() {
    let router = Router::new();
    router
        .reload(&[directive("GET", "/users/{id}", "show_user")])
        .unwrap();

    // a raw request URI flows through the codec into match and merge
    let doc = UriDocument::parse("http://svc.internal/users/7?verbose=1&id=9").unwrap();
    let path = format!("/{}", join_segments(&doc.path().unwrap().all_segments()));

    let found = router.matches(Method::Get, &path).unwrap();
    let params = found.params_with_query(doc.query().unwrap());
    assert_eq!(params.get("id").map(String::as_str), Some("7"));
    assert_eq!(params.get("verbose").map(String::as_str), Some("1"));
}

#[test]
fn test_failed_compile_aborts_before_any_change() {
    let router = Router::new();
    router.reload(&[directive("GET", "/keep", "keep")]).unwrap();

    let result = router.reload(&[
        directive("GET", "/fresh", "fresh"),
        directive("GET", "", "broken"),
    ]);
    assert!(matches!(result, Err(ReloadError::InvalidDirective(_))));
    assert!(router.matches(Method::Get, "/keep").is_some());
    assert!(router.matches(Method::Get, "/fresh").is_none());
}

#[test]
fn test_all_dispatch_failures_reported() {
    struct RejectAll;

    impl DispatchRegistry for RejectAll {
        fn register(&self, _entry: &RouteEntry) -> Result<(), DispatchError> {
            Err(DispatchError::new("register refused"))
        }

        fn unregister(&self, _entry: &RouteEntry) -> Result<(), DispatchError> {
            Err(DispatchError::new("unregister refused"))
        }
    }

    let router = Router::with_dispatch(Arc::new(RejectAll));

    let first = router.reload(&[directive("GET", "/a", "a"), directive("GET", "/b", "b")]);
    let failures = match first {
        Err(ReloadError::Dispatch(failures)) => failures,
        other => panic!("expected dispatch failures, got {other:?}"),
    };
    assert_eq!(failures.len(), 2);
    assert!(failures
        .iter()
        .all(|failure| failure.action == DirectiveAction::Register));

    // the table was still published; the next reload reports the removals
    let second = router.reload(&[]);
    let failures = match second {
        Err(ReloadError::Dispatch(failures)) => failures,
        other => panic!("expected dispatch failures, got {other:?}"),
    };
    assert_eq!(failures.len(), 2);
    assert!(failures
        .iter()
        .all(|failure| failure.action == DirectiveAction::Unregister));
}

#[test]
fn test_unchanged_routes_not_touched_by_reload() {
    struct CountingDispatch {
        log: Mutex<Vec<String>>,
    }

    impl DispatchRegistry for CountingDispatch {
        fn register(&self, entry: &RouteEntry) -> Result<(), DispatchError> {
            self.log.lock().unwrap().push(format!("+{}", entry.label()));
            Ok(())
        }

        fn unregister(&self, entry: &RouteEntry) -> Result<(), DispatchError> {
            self.log.lock().unwrap().push(format!("-{}", entry.label()));
            Ok(())
        }
    }

    let dispatch = Arc::new(CountingDispatch {
        log: Mutex::new(Vec::new()),
    });
    let router = Router::with_dispatch(dispatch.clone());

    let stable = directive("GET", "/stable", "stable");
    router
        .reload(&[stable.clone(), directive("GET", "/a", "a")])
        .unwrap();
    router
        .reload(&[stable, directive("GET", "/b", "b")])
        .unwrap();

    let log = dispatch.log.lock().unwrap().clone();
    assert_eq!(log, vec!["+GET /stable", "+GET /a", "+GET /b", "-GET /a"]);
}

/// Readers must observe each published table as a unit: both routes of a
/// generation, never one from each.
#[test]
#[serial]
#[ntest::timeout(30000)]
fn test_concurrent_lookups_see_one_generation() {
    let router = Arc::new(Router::new());
    router
        .reload(&[
            directive("GET", "/left", "gen0"),
            directive("GET", "/right", "gen0"),
        ])
        .unwrap();

    let stop = Arc::new(AtomicBool::new(false));
    let mut readers = Vec::new();

    for _ in 0..4 {
        let router = Arc::clone(&router);
        let stop = Arc::clone(&stop);
        readers.push(thread::spawn(move || {
            while !stop.load(Ordering::Relaxed) {
                let table = router.table();
                let left = table.find(Method::Get, "/left").unwrap();
                let right = table.find(Method::Get, "/right").unwrap();
                assert_eq!(
                    left.entry().target(),
                    right.entry().target(),
                    "mixed generations observed in one snapshot"
                );
            }
        }));
    }

    for generation in 1..200 {
        let name = format!("gen{generation}");
        router
            .reload(&[
                directive("GET", "/left", &name),
                directive("GET", "/right", &name),
            ])
            .unwrap();
    }

    stop.store(true, Ordering::Relaxed);
    for reader in readers {
        reader.join().unwrap();
    }
}

/// Concurrent reloads are serialized; the final state is one of the
/// submitted tables, intact.
#[test]
#[serial]
#[ntest::timeout(30000)]
fn test_concurrent_reloads_serialize() {
    let router = Arc::new(Router::new());
    let mut writers = Vec::new();

    for writer in 0..4 {
        let router = Arc::clone(&router);
        writers.push(thread::spawn(move || {
            for round in 0..50 {
                let name = format!("w{writer}r{round}");
                router
                    .reload(&[
                        directive("GET", "/a", &name),
                        directive("GET", "/b", &name),
                    ])
                    .unwrap();
            }
        }));
    }

    for writer in writers {
        writer.join().unwrap();
    }

    let table = router.table();
    let a = table.find(Method::Get, "/a").unwrap();
    let b = table.find(Method::Get, "/b").unwrap();
    assert_eq!(a.entry().target(), b.entry().target());
}
