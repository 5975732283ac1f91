//! Native entry-point signatures and resolved call tables
//!
//! Every signature the bridge consumes is known statically, so the tables
//! hold direct `unsafe extern "C"` function pointers; no dynamic call
//! construction is needed. A table is populated either by the binder in
//! [`crate::bind`] or directly from in-process functions with the same
//! signatures (the route the test library takes).

use crate::types::{CollectionHandle, CursorHandle, RawItem};
use std::os::raw::c_char;

pub type CollectionCreateFn = unsafe extern "C" fn() -> *mut CollectionHandle;
pub type CollectionDestroyFn = unsafe extern "C" fn(collection: *mut CollectionHandle);
pub type CollectionAddItemFn =
    unsafe extern "C" fn(collection: *mut CollectionHandle, item: *const RawItem);
pub type CollectionGetIteratorFn =
    unsafe extern "C" fn(collection: *mut CollectionHandle) -> *mut CursorHandle;

pub type IteratorDestroyFn = unsafe extern "C" fn(iterator: *mut CursorHandle);
pub type IteratorGetCurrentFn =
    unsafe extern "C" fn(iterator: *mut CursorHandle, item: *mut RawItem);
pub type IteratorMoveNextFn = unsafe extern "C" fn(iterator: *mut CursorHandle) -> bool;
pub type IteratorResetFn = unsafe extern "C" fn(iterator: *mut CursorHandle);
pub type IteratorCloneFn = unsafe extern "C" fn(iterator: *mut CursorHandle) -> *mut CursorHandle;
pub type IteratorEqualFn =
    unsafe extern "C" fn(a: *mut CursorHandle, b: *mut CursorHandle) -> bool;

pub type FieldChangedV1Fn = unsafe extern "C" fn(
    field_id: i32,
    old_value: *const c_char,
    new_value: *const c_char,
    message: *mut c_char,
    capacity: u32,
) -> i32;
pub type FieldChangedV2Fn = unsafe extern "C" fn(
    field_id: i32,
    old_value: *const c_char,
    new_value: *const c_char,
    message: *mut *mut c_char,
    length: *mut u32,
) -> i32;
pub type DestroyMessageFn = unsafe extern "C" fn(message: *mut c_char);

/// Export names of the collection/iterator entry points.
pub mod symbols {
    pub const COLLECTION_CREATE: &str = "collection_create";
    pub const COLLECTION_DESTROY: &str = "collection_destroy";
    pub const COLLECTION_ADD_ITEM: &str = "collection_addItem";
    pub const COLLECTION_GET_ITERATOR: &str = "collection_getIterator";
    pub const ITERATOR_DESTROY: &str = "iterator_destroy";
    pub const ITERATOR_GET_CURRENT: &str = "iterator_getCurrent";
    pub const ITERATOR_MOVE_NEXT: &str = "iterator_moveNext";
    pub const ITERATOR_RESET: &str = "iterator_reset";
    pub const ITERATOR_CLONE: &str = "iterator_clone";
    pub const ITERATOR_EQUAL: &str = "iterator_equal";

    pub const FIELD_CHANGED_V1: &str = "fieldChanged_v1";
    pub const FIELD_CHANGED_V2: &str = "fieldChanged_v2";
    pub const DESTROY_MESSAGE_DATA: &str = "destroyMessageData";
}

/// Resolved collection/iterator entry points.
///
/// Copying the table is cheap and safe in itself; the caller is responsible
/// for keeping whatever owns the pointed-to code alive (see
/// [`crate::bind::BoundLibrary`]).
#[derive(Debug, Clone, Copy)]
pub struct CollectionApi {
    pub collection_create: CollectionCreateFn,
    pub collection_destroy: CollectionDestroyFn,
    pub collection_add_item: CollectionAddItemFn,
    pub collection_get_iterator: CollectionGetIteratorFn,
    pub iterator_destroy: IteratorDestroyFn,
    pub iterator_get_current: IteratorGetCurrentFn,
    pub iterator_move_next: IteratorMoveNextFn,
    pub iterator_reset: IteratorResetFn,
    pub iterator_clone: IteratorCloneFn,
    pub iterator_equal: IteratorEqualFn,
}

/// Resolved field-change entry points (the secondary pair plus its
/// destroy call).
#[derive(Debug, Clone, Copy)]
pub struct FieldEventApi {
    pub field_changed_v1: FieldChangedV1Fn,
    pub field_changed_v2: FieldChangedV2Fn,
    pub destroy_message: DestroyMessageFn,
}
