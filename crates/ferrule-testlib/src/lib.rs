//! In-process reference implementation of the native entry points
//!
//! Implements the full boundary surface — collection, cursor, and the
//! field-change pair — as `unsafe extern "C"` functions over a real ordered
//! store, so the bridge's tests exercise a genuine foreign call path
//! without an external build artifact. Handles are minted with
//! `Box::into_raw` and tracked in a live-handle registry that panics on an
//! unknown or repeated destroy, turning double-free and cross-allocator
//! bugs into immediate test failures.
//!
//! Cursors snapshot the collection at creation time, so traversals are
//! unaffected by later appends; position equality compares source
//! collection and index.

mod events;
mod registry;
mod store;

pub use events::field_event_api;
pub use store::collection_api;
