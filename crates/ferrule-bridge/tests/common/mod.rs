//! Shared test helpers
//!
//! Wires the bridge to the in-process reference library so tests cross a
//! real `extern "C"` call path.

#![allow(dead_code)]

use ferrule_bridge::{Collection, Item, NativeLibrary};

pub use pretty_assertions::{assert_eq, assert_ne};

/// A library backed by the in-process reference implementation, with the
/// field-change entry points available.
pub fn stub_library() -> NativeLibrary {
    NativeLibrary::with_field_events(
        ferrule_testlib::collection_api(),
        ferrule_testlib::field_event_api(),
    )
}

/// Create a collection pre-filled with `records`.
pub fn collection_with(lib: &NativeLibrary, records: &[(i32, &str)]) -> Collection {
    let mut collection = Collection::create(lib).expect("collection_create returned null");
    for &(i, s) in records {
        collection.append(&Item::new(i, s));
    }
    collection
}
