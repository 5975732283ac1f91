//! The record exchanged with the native collection
//!
//! [`Item`] is the value type callers see; [`PackedItem`] and
//! [`ItemReceiver`] are its two raw-record projections, one per transfer
//! direction. Pack borrows the caller's string for the duration of the
//! call; unpack materializes a complete owned string before any caller
//! observes the item.

use crate::strings::{OutCell, StrInView};
use ferrule_abi::types::{RawItem, StrField, StrOut};
use std::marker::PhantomData;

/// A record in the native collection: one integer, one string.
///
/// A plain value with no identity; copied by value across the boundary in
/// both directions.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Item {
    pub i: i32,
    pub s: String,
}

impl Item {
    pub fn new(i: i32, s: impl Into<String>) -> Self {
        Self { i, s: s.into() }
    }
}

/// Append-path projection: integer by value, string borrowed, receptacle
/// unset. Valid for the duration of one native call.
pub(crate) struct PackedItem<'a> {
    raw: RawItem,
    _source: PhantomData<&'a str>,
}

impl<'a> PackedItem<'a> {
    pub(crate) fn new(item: &'a Item) -> Self {
        let view = StrInView::new(&item.s);
        Self {
            raw: RawItem {
                i: item.i,
                s: StrField {
                    input: view.raw(),
                    output: StrOut::unset(),
                },
            },
            _source: PhantomData,
        }
    }

    pub(crate) fn as_ptr(&self) -> *const RawItem {
        &self.raw
    }
}

/// Retrieval-path projection: a blank record wired to an out-cell, plus the
/// cell itself. The cell address stays stable across moves, so the record
/// can be handed to the native side from wherever the receiver ends up.
pub(crate) struct ItemReceiver {
    raw: RawItem,
    cell: OutCell,
}

impl ItemReceiver {
    pub(crate) fn new() -> Self {
        let mut cell = OutCell::new();
        let mut raw = RawItem::blank();
        raw.s.output = cell.armed();
        Self { raw, cell }
    }

    pub(crate) fn as_mut_ptr(&mut self) -> *mut RawItem {
        &mut self.raw
    }

    /// Materialize the filled record. A receptacle the native side never
    /// set yields the empty string.
    pub(crate) fn finish(mut self) -> Item {
        Item {
            i: self.raw.i,
            s: self.cell.take().unwrap_or_default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::os::raw::c_char;

    #[test]
    fn test_pack_projects_fields() {
        let item = Item::new(-123, "john");
        let packed = PackedItem::new(&item);
        let raw = unsafe { *packed.as_ptr() };
        assert_eq!(raw.i, -123);
        assert_eq!(raw.s.input.len, 4);
        assert!(raw.s.output.setter.is_none());
    }

    #[test]
    fn test_receiver_fills_through_setter() {
        let mut receiver = ItemReceiver::new();
        let raw = receiver.as_mut_ptr();
        unsafe {
            (*raw).i = 54;
            let out = (*raw).s.output;
            (out.setter.unwrap())(out.cell, "rick".as_ptr() as *const c_char, 4);
        }
        assert_eq!(receiver.finish(), Item::new(54, "rick"));
    }

    #[test]
    fn test_receiver_survives_a_move() {
        let receiver = ItemReceiver::new();
        let mut moved = receiver;
        let raw = moved.as_mut_ptr();
        unsafe {
            let out = (*raw).s.output;
            (out.setter.unwrap())(out.cell, "jim".as_ptr() as *const c_char, 3);
        }
        assert_eq!(moved.finish().s, "jim");
    }

    #[test]
    fn test_receiver_untouched_yields_empty_string() {
        let receiver = ItemReceiver::new();
        assert_eq!(receiver.finish(), Item::new(0, ""));
    }
}
