//! 一次性监听器：至多执行一次、先删除后执行、可在触发前取消
use legion_events::{Event, EventDispatcher, ListenerRegistry};
use parking_lot::Mutex;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

#[derive(Debug, Default)]
struct Started {
    attempt: u32,
}

impl Event for Started {}

fn counter() -> Arc<AtomicUsize> {
    Arc::new(AtomicUsize::new(0))
}

#[test]
fn once_fires_on_first_dispatch_only() {
    let registry = ListenerRegistry::new();
    let hits = counter();
    let handle = {
        let hits = hits.clone();
        registry.once::<Started, _>(move |_| {
            hits.fetch_add(1, Ordering::SeqCst);
            Ok(())
        })
    };

    let dispatcher = EventDispatcher::new(registry.clone());
    dispatcher.dispatch(Started::default()).unwrap();
    dispatcher.dispatch(Started::default()).unwrap();

    assert_eq!(hits.load(Ordering::SeqCst), 1);
    assert!(!registry.contains(handle));
    assert!(registry.resolve(&Started::default()).is_empty());
}

#[test]
fn audit_once_then_metrics_only() {
    let registry = ListenerRegistry::new();
    let log = Arc::new(Mutex::new(Vec::new()));

    {
        let log = log.clone();
        registry.add_with_priority::<Started, _>(
            move |_| {
                log.lock().push("metrics");
                Ok(())
            },
            0,
        );
    }
    {
        let log = log.clone();
        registry.once_with_priority::<Started, _>(
            move |_| {
                log.lock().push("audit");
                Ok(())
            },
            100,
        );
    }

    let dispatcher = EventDispatcher::new(registry);
    dispatcher.dispatch(Started::default()).unwrap();
    assert_eq!(*log.lock(), vec!["audit", "metrics"]);

    log.lock().clear();
    dispatcher.dispatch(Started::default()).unwrap();
    assert_eq!(*log.lock(), vec!["metrics"]);
}

#[test]
fn once_is_removed_even_when_listener_fails() {
    let registry = ListenerRegistry::new();
    let handle = registry.once::<Started, _>(|_| anyhow::bail!("first run fails"));

    let dispatcher = EventDispatcher::new(registry.clone());
    assert!(dispatcher.dispatch(Started::default()).is_err());
    assert!(!registry.contains(handle));
    assert!(dispatcher.dispatch(Started::default()).is_ok());
}

#[test]
fn cancel_before_fire() {
    let registry = ListenerRegistry::new();
    let hits = counter();
    let handle = {
        let hits = hits.clone();
        registry.once::<Started, _>(move |_| {
            hits.fetch_add(1, Ordering::SeqCst);
            Ok(())
        })
    };

    registry.remove(handle);
    EventDispatcher::new(registry).dispatch(Started::default()).unwrap();

    assert_eq!(hits.load(Ordering::SeqCst), 0);
}

#[test]
fn nested_dispatch_does_not_refire_once_listener() {
    let registry = ListenerRegistry::new();
    let dispatcher = EventDispatcher::new(registry.clone());
    let hits = counter();

    // 高优先级监听器在外层快照中先执行，并在内部重入分发同类事件
    {
        let dispatcher = dispatcher.clone();
        registry.add_with_priority::<Started, _>(
            move |e| {
                if e.attempt == 0 {
                    dispatcher.dispatch(Started { attempt: 1 })?;
                }
                Ok(())
            },
            10,
        );
    }
    {
        let hits = hits.clone();
        registry.once::<Started, _>(move |_| {
            hits.fetch_add(1, Ordering::SeqCst);
            Ok(())
        });
    }

    dispatcher.dispatch(Started { attempt: 0 }).unwrap();
    assert_eq!(hits.load(Ordering::SeqCst), 1);

    dispatcher.dispatch(Started { attempt: 0 }).unwrap();
    assert_eq!(hits.load(Ordering::SeqCst), 1);
}

#[test]
fn once_listener_may_register_itself_again() {
    let registry = ListenerRegistry::new();
    let hits = counter();

    fn arm(registry: &ListenerRegistry, hits: Arc<AtomicUsize>) {
        let again = registry.clone();
        registry.once::<Started, _>(move |_| {
            if hits.fetch_add(1, Ordering::SeqCst) == 0 {
                arm(&again, hits.clone());
            }
            Ok(())
        });
    }
    arm(&registry, hits.clone());

    let dispatcher = EventDispatcher::new(registry.clone());
    dispatcher.dispatch(Started::default()).unwrap();
    assert_eq!(hits.load(Ordering::SeqCst), 1);
    assert_eq!(registry.len(), 1);

    dispatcher.dispatch(Started::default()).unwrap();
    dispatcher.dispatch(Started::default()).unwrap();
    assert_eq!(hits.load(Ordering::SeqCst), 2);
    assert!(registry.is_empty());
}

#[test]
fn concurrent_dispatch_runs_once_listener_at_most_once() {
    let registry = ListenerRegistry::new();
    let hits = counter();
    {
        let hits = hits.clone();
        registry.once::<Started, _>(move |_| {
            hits.fetch_add(1, Ordering::SeqCst);
            Ok(())
        });
    }

    let dispatcher = EventDispatcher::new(registry);
    std::thread::scope(|scope| {
        for _ in 0..8 {
            scope.spawn(|| dispatcher.dispatch(Started::default()).unwrap());
        }
    });

    assert_eq!(hits.load(Ordering::SeqCst), 1);
}
