mod common;

use common::stub_library;
use ferrule_bridge::{BridgeError, FieldEvents, NativeLibrary};
use pretty_assertions::assert_eq;
use rstest::rstest;

#[rstest]
#[case("alpha", "alpha", 1, "equal")]
#[case("alpha", "beta", 2, "different")]
#[case("", "", 1, "equal")]
fn test_notify_v1_status_and_message(
    #[case] old: &str,
    #[case] new: &str,
    #[case] expected_status: i32,
    #[case] expected_word: &str,
) {
    let lib = stub_library();
    let events = FieldEvents::new(&lib).unwrap();

    let change = events.notify_v1(7, old, new).unwrap();
    assert_eq!(change.status, expected_status);
    assert_eq!(change.message, format!("field 7 values are {expected_word}"));
}

#[rstest]
#[case("alpha", "alpha", 1)]
#[case("alpha", "beta", 2)]
fn test_notify_v2_matches_v1(#[case] old: &str, #[case] new: &str, #[case] expected_status: i32) {
    let lib = stub_library();
    let events = FieldEvents::new(&lib).unwrap();

    let v1 = events.notify_v1(42, old, new).unwrap();
    let v2 = events.notify_v2(42, old, new).unwrap();
    assert_eq!(v2.status, expected_status);
    assert_eq!(v2.message, v1.message);
}

#[test]
fn test_notify_v2_releases_native_buffer_every_time() {
    let lib = stub_library();
    let events = FieldEvents::new(&lib).unwrap();

    // the reference library panics if a message buffer is destroyed twice
    // or through the wrong path; surviving many calls means each buffer
    // was released exactly once
    for round in 0..32 {
        let change = events.notify_v2(round, "old", "new").unwrap();
        assert_eq!(change.status, 2);
    }
}

#[test]
fn test_interior_nul_is_rejected_before_the_call() {
    let lib = stub_library();
    let events = FieldEvents::new(&lib).unwrap();

    let result = events.notify_v1(1, "bad\0value", "other");
    assert!(matches!(result, Err(BridgeError::InteriorNul { .. })));

    let result = events.notify_v2(1, "other", "bad\0value");
    assert!(matches!(result, Err(BridgeError::InteriorNul { .. })));
}

#[test]
fn test_field_events_unavailable_without_the_pair() {
    let lib = NativeLibrary::from_table(ferrule_testlib::collection_api());
    assert!(!lib.has_field_events());

    let result = FieldEvents::new(&lib);
    assert!(matches!(
        result,
        Err(BridgeError::FieldEventsUnavailable)
    ));
}
