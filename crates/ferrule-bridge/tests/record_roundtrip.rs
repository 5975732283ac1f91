mod common;

use common::stub_library;
use ferrule_bridge::{Collection, Item};
use proptest::prelude::*;

proptest! {
    /// Appending any sequence of records and iterating reproduces it
    /// exactly: order, integers (full signed range), and strings (full
    /// character range, including embedded NULs, since content strings
    /// cross the boundary length-delimited).
    #[test]
    fn prop_append_then_iterate_round_trips(
        records in proptest::collection::vec((any::<i32>(), any::<String>()), 0..24)
    ) {
        let lib = stub_library();
        let mut collection = Collection::create(&lib).unwrap();
        for (i, s) in &records {
            collection.append(&Item::new(*i, s.clone()));
        }

        let decoded: Vec<(i32, String)> =
            collection.iter().map(|item| (item.i, item.s)).collect();
        prop_assert_eq!(decoded, records);
    }

    /// A traversal is restartable: iterating twice over independent
    /// cursors yields the same sequence.
    #[test]
    fn prop_repeated_traversals_agree(
        records in proptest::collection::vec((any::<i32>(), "[a-zA-Z0-9 ]{0,16}"), 0..12)
    ) {
        let lib = stub_library();
        let mut collection = Collection::create(&lib).unwrap();
        for (i, s) in &records {
            collection.append(&Item::new(*i, s.clone()));
        }

        let first: Vec<Item> = collection.iter().collect();
        let second: Vec<Item> = collection.iter().collect();
        prop_assert_eq!(first, second);
    }
}
