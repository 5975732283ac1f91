//! Wire types shared verbatim with the native library
//!
//! Field order and primitive widths are part of the contract: the native
//! side reads these structs with the layout below and no other. All strings
//! cross the boundary as UTF-8 byte runs with explicit lengths.
//!
//! Type mapping:
//! - `StrIn` → `{ const char* data; uint32_t length; }`
//! - `StrOut` → `{ void (*setter)(void*, const char*, uint32_t); void* cell; }`
//! - `StrField` → `{ StrIn in; StrOut out; }`
//! - `RawItem` → `{ int32_t i; StrField s; }`

use std::ffi::c_void;
use std::os::raw::c_char;
use std::ptr;

/// Caller-owned, read-only string view passed into the native library.
///
/// Valid only for the duration of the single call that receives it; the
/// native side copies the bytes and never retains the pointer. A null
/// `data` denotes the empty string.
#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct StrIn {
    pub data: *const c_char,
    pub len: u32,
}

impl StrIn {
    /// The empty view (null data, zero length).
    pub fn empty() -> Self {
        Self {
            data: ptr::null(),
            len: 0,
        }
    }
}

/// Setter invoked by the native side to hand back a produced string.
///
/// The `data` pointer is valid only for the duration of the invocation;
/// implementations copy, never retain.
pub type StrSetter = unsafe extern "C" fn(cell: *mut c_void, data: *const c_char, len: u32);

/// Receptacle for a native-produced string of caller-unknown length.
///
/// `cell` identifies a caller-owned state cell with a stable address for
/// the duration of the call. The native side invokes `setter` at most once
/// with that cell and the produced bytes. A `None` setter tells the native
/// side no output is wanted.
#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct StrOut {
    pub setter: Option<StrSetter>,
    pub cell: *mut c_void,
}

impl StrOut {
    /// An unset receptacle (no setter, null cell) for the append path.
    pub fn unset() -> Self {
        Self {
            setter: None,
            cell: ptr::null_mut(),
        }
    }
}

/// Bidirectional string field of the record: input view first, output
/// receptacle second, matching the native struct order.
#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct StrField {
    pub input: StrIn,
    pub output: StrOut,
}

/// The fixed-layout record exchanged on append and retrieval.
#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct RawItem {
    pub i: i32,
    pub s: StrField,
}

impl RawItem {
    /// A blank record for the retrieval path: zero integer, empty input,
    /// receptacle to be wired up by the caller.
    pub fn blank() -> Self {
        Self {
            i: 0,
            s: StrField {
                input: StrIn::empty(),
                output: StrOut::unset(),
            },
        }
    }
}

/// Opaque native collection object. Only ever handled by pointer.
#[repr(C)]
pub struct CollectionHandle {
    _opaque: [u8; 0],
}

/// Opaque native cursor object. Only ever handled by pointer.
#[repr(C)]
pub struct CursorHandle {
    _opaque: [u8; 0],
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::mem::{align_of, size_of};

    fn offset_of<T, F>(base: &T, field: &F) -> usize {
        field as *const F as usize - base as *const T as usize
    }

    #[test]
    fn test_str_in_layout() {
        assert_eq!(
            size_of::<StrIn>(),
            size_of::<*const c_char>() + size_of::<u32>().max(align_of::<*const c_char>())
        );
        let v = StrIn::empty();
        assert_eq!(offset_of(&v, &v.data), 0);
        assert_eq!(offset_of(&v, &v.len), size_of::<*const c_char>());
    }

    #[test]
    fn test_str_out_layout() {
        // Option<fn ptr> has the nullable-pointer layout, so the struct is
        // two pointers with the setter first.
        assert_eq!(size_of::<Option<StrSetter>>(), size_of::<*const c_void>());
        let v = StrOut::unset();
        assert_eq!(offset_of(&v, &v.setter), 0);
        assert_eq!(offset_of(&v, &v.cell), size_of::<*const c_void>());
    }

    #[test]
    fn test_raw_item_field_order() {
        let v = RawItem::blank();
        assert_eq!(offset_of(&v, &v.i), 0);
        assert_eq!(offset_of(&v, &v.s), align_of::<StrField>());
        assert_eq!(offset_of(&v.s, &v.s.input), 0);
        assert!(offset_of(&v.s, &v.s.output) >= size_of::<StrIn>());
    }

    #[test]
    fn test_blank_record_is_inert() {
        let v = RawItem::blank();
        assert_eq!(v.i, 0);
        assert!(v.s.input.data.is_null());
        assert_eq!(v.s.input.len, 0);
        assert!(v.s.output.setter.is_none());
        assert!(v.s.output.cell.is_null());
    }

    #[test]
    fn test_handles_are_zero_sized() {
        assert_eq!(size_of::<CollectionHandle>(), 0);
        assert_eq!(size_of::<CursorHandle>(), 0);
    }
}
