use sn_service::*;
use std::sync::Arc;

trait Datum: Send + Sync {
    fn source(&self) -> &str;
}

#[derive(Debug)]
struct Meter(&'static str);

impl Datum for Meter {
    fn source(&self) -> &str {
        self.0
    }
}

fn props(uid: &str, ranking: i32) -> ServiceProperties {
    ServiceProperties::new().with_ranking(ranking).with(ServiceProperties::UID, uid).unwrap()
}

#[test]
fn empty_registry_yields_nothing() {
    let registry = ServiceRegistry::new();
    let tracker = registry.tracker::<dyn Datum>();

    assert_eq!(tracker.services().count(), 0);
    assert!(tracker.service().is_none());
    assert!(matches!(registry.require::<dyn Datum>(), Err(ServiceError::NotFound { .. })));
}

#[test]
fn trait_objects_enumerate_in_registration_order() {
    let registry = ServiceRegistry::new();
    registry.register::<dyn Datum>(Arc::new(Meter("a")));
    registry.register::<dyn Datum>(Arc::new(Meter("b")));
    registry.register::<dyn Datum>(Arc::new(Meter("c")));

    let sources: Vec<String> =
        registry.services::<dyn Datum>().iter().map(|d| d.source().to_owned()).collect();
    assert_eq!(sources, ["a", "b", "c"]);
    assert_eq!(registry.count::<dyn Datum>(), 3);
}

#[test]
fn concrete_and_trait_object_registrations_are_distinct() {
    let registry = ServiceRegistry::new();
    let meter = Arc::new(Meter("shared"));
    registry.register(Arc::clone(&meter));
    registry.register::<dyn Datum>(meter);

    assert_eq!(registry.count::<Meter>(), 1);
    assert_eq!(registry.count::<dyn Datum>(), 1);
    assert_eq!(registry.require::<Meter>().unwrap().0, "shared");
}

#[test]
fn policies_choose_differently() {
    let registry = ServiceRegistry::new();
    registry.register_with::<dyn Datum>(Arc::new(Meter("first")), props("first", 0));
    registry.register_with::<dyn Datum>(Arc::new(Meter("best")), props("best", 10));
    registry.register_with::<dyn Datum>(Arc::new(Meter("tied")), props("tied", 10));

    let tracker = registry.tracker::<dyn Datum>();
    assert_eq!(tracker.service().unwrap().source(), "best");
    assert_eq!(
        select(&tracker, SelectionPolicy::FirstAvailable).unwrap().source(),
        "first"
    );

    let first = tracker.clone().with_policy(SelectionPolicy::FirstAvailable);
    assert_eq!(first.service().unwrap().source(), "first");
    assert_eq!(registry.service::<dyn Datum>().unwrap().source(), "best");
}

#[test]
fn tracker_sees_later_registrations_and_withdrawals() {
    let registry = ServiceRegistry::new();
    let tracker = registry.tracker::<dyn Datum>();
    assert!(tracker.is_empty());

    let reg = registry.register::<dyn Datum>(Arc::new(Meter("late")));
    assert_eq!(tracker.len(), 1);
    assert!(registry.is_registered(&reg));

    assert!(reg.clone().unregister());
    assert!(tracker.is_empty());
    assert!(!registry.unregister(&reg));
}

#[test]
fn filter_narrows_tracker() {
    let registry = ServiceRegistry::new();
    registry.register_with::<dyn Datum>(
        Arc::new(Meter("m1")),
        props("m1", 0).with(ServiceProperties::GROUP_UID, "roof").unwrap(),
    );
    registry.register_with::<dyn Datum>(
        Arc::new(Meter("m2")),
        props("m2", 0).with(ServiceProperties::GROUP_UID, "garage").unwrap(),
    );

    let roof = registry.tracker::<dyn Datum>().with_filter(ServiceFilter::new().group_uid("roof"));
    let all: Vec<_> = roof.services().map(|d| d.source().to_owned()).collect();
    assert_eq!(all, ["m1"]);

    let missing = registry.tracker::<dyn Datum>().with_filter(ServiceFilter::new().uid("m3"));
    assert!(missing.service().is_none());
    let fallback: Arc<dyn Datum> = Arc::new(Meter("fallback"));
    assert_eq!(missing.service_or(fallback).source(), "fallback");
}

#[test]
fn properties_are_reported_in_registration_order() {
    let registry = ServiceRegistry::new();
    registry.register_with(Arc::new(Meter("x")), props("x", 3));
    registry.register_with(Arc::new(Meter("y")), props("y", -1));

    let uids: Vec<_> = registry
        .properties::<Meter>()
        .iter()
        .map(|p| (p.uid().map(str::to_owned), p.ranking()))
        .collect();
    assert_eq!(uids, [(Some("x".to_owned()), 3), (Some("y".to_owned()), -1)]);
}

#[test]
fn concurrent_registration_is_consistent() {
    let registry = ServiceRegistry::new();

    std::thread::scope(|scope| {
        for t in 0..8 {
            let registry = registry.clone();
            scope.spawn(move || {
                for i in 0..50 {
                    let reg = registry.register(Arc::new(t * 100 + i));
                    if i % 2 == 0 {
                        assert!(registry.unregister(&reg));
                    }
                }
            });
        }
    });

    assert_eq!(registry.count::<i32>(), 8 * 25);
    registry.clear();
    assert_eq!(registry.count::<i32>(), 0);
}
