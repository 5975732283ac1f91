//! The native collection
//!
//! An ordered, append-only sequence of [`Item`] owned by the native
//! library and identified by one handle. The wrapper destroys that handle
//! exactly once, on drop or explicit [`Collection::close`].

use crate::cursor::{Cursor, Items};
use crate::error::BridgeError;
use crate::handle::OwnedHandle;
use crate::item::{Item, PackedItem};
use crate::library::NativeLibrary;
use ferrule_abi::types::CollectionHandle;
use std::ptr;

/// One native collection.
pub struct Collection {
    lib: NativeLibrary,
    handle: OwnedHandle<CollectionHandle>,
}

impl Collection {
    /// Create an empty native collection.
    pub fn create(lib: &NativeLibrary) -> Result<Self, BridgeError> {
        let raw = unsafe { (lib.api().collection_create)() };
        if raw.is_null() {
            return Err(BridgeError::NullHandle {
                call: "collection_create",
            });
        }
        Ok(Self {
            lib: lib.clone(),
            handle: OwnedHandle::new(raw, lib.api().collection_destroy),
        })
    }

    /// Append a copy of `item`. The native side copies both fields during
    /// the call; no reference to the caller's string bytes survives it.
    /// A no-op on a closed collection.
    pub fn append(&mut self, item: &Item) {
        if self.handle.is_released() {
            return;
        }
        let packed = PackedItem::new(item);
        unsafe { (self.lib.api().collection_add_item)(self.handle.as_ptr(), packed.as_ptr()) };
    }

    /// Produce a fresh cursor positioned before the first element.
    ///
    /// Every call yields an independent, restartable traversal in
    /// insertion order. On a closed collection the cursor is inert.
    pub fn cursor(&self) -> Cursor {
        if self.handle.is_released() {
            return Cursor::adopt(self.lib.clone(), ptr::null_mut());
        }
        let raw = unsafe { (self.lib.api().collection_get_iterator)(self.handle.as_ptr()) };
        Cursor::adopt(self.lib.clone(), raw)
    }

    /// Iterate the collection from the beginning.
    pub fn iter(&self) -> Items {
        Items::new(self.cursor())
    }

    /// Destroy the native collection now instead of at drop. Idempotent.
    /// Cursors already produced keep their own handles and stay valid for
    /// whatever the native library guarantees.
    pub fn close(&mut self) {
        self.handle.release();
    }

    /// Whether the native collection has been destroyed.
    pub fn is_closed(&self) -> bool {
        self.handle.is_released()
    }
}

impl<'a> IntoIterator for &'a Collection {
    type Item = Item;
    type IntoIter = Items;

    fn into_iter(self) -> Items {
        self.iter()
    }
}
