//! Forward iteration over a native cursor
//!
//! A [`Cursor`] is positioned either before the first element (fresh), at
//! an element, or past the last one (exhausted). [`Cursor::advance`] moves
//! fresh→positioned, positioned→positioned, or into exhausted, and
//! exhaustion is sticky. [`Cursor::current`] is meaningful only while
//! positioned; outside that state the outcome is whatever the native
//! library defines (the bundled reference library leaves the record
//! untouched, which decodes to an empty item).
//!
//! [`Items`] adapts a cursor to `std::iter::Iterator`, which only ever
//! calls `current` after a successful `advance`, so iterator-driven callers
//! stay inside the contract by construction.

use crate::error::BridgeError;
use crate::handle::OwnedHandle;
use crate::item::{Item, ItemReceiver};
use crate::library::NativeLibrary;
use ferrule_abi::types::CursorHandle;
use std::ptr;

/// One native cursor over a collection.
///
/// Each cursor owns its own native handle, released exactly once on drop.
/// Cursors over the same collection advance independently.
pub struct Cursor {
    lib: NativeLibrary,
    handle: OwnedHandle<CursorHandle>,
}

impl Cursor {
    /// Adopt a native cursor handle. A null handle yields an inert cursor:
    /// advance reports exhaustion and every other operation is a no-op.
    pub(crate) fn adopt(lib: NativeLibrary, raw: *mut CursorHandle) -> Self {
        let destroy = lib.api().iterator_destroy;
        Self {
            lib,
            handle: OwnedHandle::new(raw, destroy),
        }
    }

    /// Move to the next position. Returns whether a valid position was
    /// reached; once this returns false it keeps returning false until
    /// [`Cursor::reset`].
    pub fn advance(&mut self) -> bool {
        if self.handle.is_released() {
            return false;
        }
        unsafe { (self.lib.api().iterator_move_next)(self.handle.as_ptr()) }
    }

    /// Decode the record at the current position.
    ///
    /// Meaningful only after an [`Cursor::advance`] that returned true and
    /// before one that returned false; outside that window the result is
    /// native-defined.
    pub fn current(&self) -> Item {
        if self.handle.is_released() {
            return Item::default();
        }
        let mut receiver = ItemReceiver::new();
        unsafe { (self.lib.api().iterator_get_current)(self.handle.as_ptr(), receiver.as_mut_ptr()) };
        receiver.finish()
    }

    /// Return to the before-first position.
    pub fn reset(&mut self) {
        if self.handle.is_released() {
            return;
        }
        unsafe { (self.lib.api().iterator_reset)(self.handle.as_ptr()) };
    }

    /// Duplicate the cursor at its current logical position. The clone owns
    /// a fresh native handle and advances independently.
    pub fn try_clone(&self) -> Result<Cursor, BridgeError> {
        if self.handle.is_released() {
            return Ok(Cursor::adopt(self.lib.clone(), ptr::null_mut()));
        }
        let raw = unsafe { (self.lib.api().iterator_clone)(self.handle.as_ptr()) };
        if raw.is_null() {
            return Err(BridgeError::NullHandle {
                call: "iterator_clone",
            });
        }
        Ok(Cursor::adopt(self.lib.clone(), raw))
    }

    /// Whether two cursors sit at the same underlying position, as defined
    /// by the native library. Distinct handles at the same position are
    /// equal; a released cursor equals nothing.
    pub fn same_position(&self, other: &Cursor) -> bool {
        if self.handle.is_released() || other.handle.is_released() {
            return false;
        }
        unsafe { (self.lib.api().iterator_equal)(self.handle.as_ptr(), other.handle.as_ptr()) }
    }

    /// Release the native handle now instead of at drop. Idempotent.
    pub fn release(&mut self) {
        self.handle.release();
    }

    /// Whether the native handle has been released.
    pub fn is_released(&self) -> bool {
        self.handle.is_released()
    }
}

impl PartialEq for Cursor {
    fn eq(&self, other: &Self) -> bool {
        self.same_position(other)
    }
}

/// Iterator adapter over a [`Cursor`]: advance, then decode.
pub struct Items {
    cursor: Cursor,
}

impl Items {
    pub(crate) fn new(cursor: Cursor) -> Self {
        Self { cursor }
    }

    /// Recover the underlying cursor (e.g. to reset and traverse again).
    pub fn into_cursor(self) -> Cursor {
        self.cursor
    }
}

impl Iterator for Items {
    type Item = Item;

    fn next(&mut self) -> Option<Item> {
        if self.cursor.advance() {
            Some(self.cursor.current())
        } else {
            None
        }
    }
}
