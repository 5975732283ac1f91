//! Collection and cursor entry points
//!
//! Behavior matches what the bridge is allowed to assume of a conforming
//! library: append copies both record fields during the call, cursors
//! start before the first element, exhaustion is sticky, reset returns to
//! before-first, clone duplicates the cursor at its position, and equality
//! means same source collection and same position. Destroy on a null
//! handle is a no-op.

use crate::registry::{register, unregister};
use ferrule_abi::entry::CollectionApi;
use ferrule_abi::types::{CollectionHandle, CursorHandle, RawItem};
use std::os::raw::c_char;
use std::slice;

#[derive(Default)]
struct CollectionState {
    items: Vec<(i32, String)>,
}

#[derive(Clone, Copy, PartialEq)]
enum Position {
    BeforeFirst,
    At(usize),
    Exhausted,
}

struct CursorState {
    /// Identity of the source collection, for position equality
    source: usize,
    /// Snapshot taken when the cursor was created
    items: Vec<(i32, String)>,
    pos: Position,
}

/// The resolved table for this in-process library.
pub fn collection_api() -> CollectionApi {
    CollectionApi {
        collection_create,
        collection_destroy,
        collection_add_item,
        collection_get_iterator,
        iterator_destroy,
        iterator_get_current,
        iterator_move_next,
        iterator_reset,
        iterator_clone,
        iterator_equal,
    }
}

unsafe extern "C" fn collection_create() -> *mut CollectionHandle {
    let state = Box::into_raw(Box::new(CollectionState::default()));
    register(state as usize);
    state as *mut CollectionHandle
}

unsafe extern "C" fn collection_destroy(collection: *mut CollectionHandle) {
    if collection.is_null() {
        return;
    }
    unregister(collection as usize);
    drop(Box::from_raw(collection as *mut CollectionState));
}

unsafe extern "C" fn collection_add_item(
    collection: *mut CollectionHandle,
    item: *const RawItem,
) {
    if collection.is_null() || item.is_null() {
        return;
    }
    let state = &mut *(collection as *mut CollectionState);
    let raw = &*item;
    let text = if raw.s.input.data.is_null() {
        String::new()
    } else {
        let bytes = slice::from_raw_parts(raw.s.input.data as *const u8, raw.s.input.len as usize);
        String::from_utf8_lossy(bytes).into_owned()
    };
    state.items.push((raw.i, text));
}

unsafe extern "C" fn collection_get_iterator(
    collection: *mut CollectionHandle,
) -> *mut CursorHandle {
    if collection.is_null() {
        return std::ptr::null_mut();
    }
    let state = &*(collection as *mut CollectionState);
    let cursor = Box::into_raw(Box::new(CursorState {
        source: collection as usize,
        items: state.items.clone(),
        pos: Position::BeforeFirst,
    }));
    register(cursor as usize);
    cursor as *mut CursorHandle
}

unsafe extern "C" fn iterator_destroy(iterator: *mut CursorHandle) {
    if iterator.is_null() {
        return;
    }
    unregister(iterator as usize);
    drop(Box::from_raw(iterator as *mut CursorState));
}

unsafe extern "C" fn iterator_get_current(iterator: *mut CursorHandle, item: *mut RawItem) {
    if iterator.is_null() || item.is_null() {
        return;
    }
    let state = &*(iterator as *mut CursorState);
    let index = match state.pos {
        Position::At(index) if index < state.items.len() => index,
        // Not positioned: leave the record untouched
        _ => return,
    };
    let (i, ref s) = state.items[index];
    let raw = &mut *item;
    raw.i = i;
    if let Some(setter) = raw.s.output.setter {
        setter(raw.s.output.cell, s.as_ptr() as *const c_char, s.len() as u32);
    }
}

unsafe extern "C" fn iterator_move_next(iterator: *mut CursorHandle) -> bool {
    if iterator.is_null() {
        return false;
    }
    let state = &mut *(iterator as *mut CursorState);
    state.pos = match state.pos {
        Position::BeforeFirst => {
            if state.items.is_empty() {
                Position::Exhausted
            } else {
                Position::At(0)
            }
        }
        Position::At(index) => {
            if index + 1 < state.items.len() {
                Position::At(index + 1)
            } else {
                Position::Exhausted
            }
        }
        Position::Exhausted => Position::Exhausted,
    };
    state.pos != Position::Exhausted
}

unsafe extern "C" fn iterator_reset(iterator: *mut CursorHandle) {
    if iterator.is_null() {
        return;
    }
    let state = &mut *(iterator as *mut CursorState);
    state.pos = Position::BeforeFirst;
}

unsafe extern "C" fn iterator_clone(iterator: *mut CursorHandle) -> *mut CursorHandle {
    if iterator.is_null() {
        return std::ptr::null_mut();
    }
    let state = &*(iterator as *mut CursorState);
    let clone = Box::into_raw(Box::new(CursorState {
        source: state.source,
        items: state.items.clone(),
        pos: state.pos,
    }));
    register(clone as usize);
    clone as *mut CursorHandle
}

unsafe extern "C" fn iterator_equal(a: *mut CursorHandle, b: *mut CursorHandle) -> bool {
    if a.is_null() || b.is_null() {
        return false;
    }
    let a = &*(a as *mut CursorState);
    let b = &*(b as *mut CursorState);
    a.source == b.source && a.pos == b.pos
}
