//! Field-change entry points
//!
//! v1 writes into the caller's buffer (truncating to capacity, always
//! NUL-terminated); v2 allocates the message itself and
//! `destroy_message_data` is the only valid release for it. Status is 1
//! when old and new values are equal, 2 when they differ, -1 on null
//! arguments.

use crate::registry::{register, unregister};
use ferrule_abi::entry::FieldEventApi;
use std::ffi::{CStr, CString};
use std::os::raw::c_char;

/// The resolved table for this in-process library.
pub fn field_event_api() -> FieldEventApi {
    FieldEventApi {
        field_changed_v1,
        field_changed_v2,
        destroy_message: destroy_message_data,
    }
}

unsafe fn compose(field_id: i32, old_value: *const c_char, new_value: *const c_char) -> Option<(String, i32)> {
    if old_value.is_null() || new_value.is_null() {
        return None;
    }
    let old = CStr::from_ptr(old_value).to_string_lossy();
    let new = CStr::from_ptr(new_value).to_string_lossy();
    let equal = old == new;
    let text = format!(
        "field {} values are {}",
        field_id,
        if equal { "equal" } else { "different" }
    );
    Some((text, if equal { 1 } else { 2 }))
}

unsafe extern "C" fn field_changed_v1(
    field_id: i32,
    old_value: *const c_char,
    new_value: *const c_char,
    message: *mut c_char,
    capacity: u32,
) -> i32 {
    if message.is_null() || capacity == 0 {
        return -1;
    }
    let (text, status) = match compose(field_id, old_value, new_value) {
        Some(composed) => composed,
        None => return -1,
    };
    let bytes = text.as_bytes();
    let written = bytes.len().min(capacity as usize - 1);
    std::ptr::copy_nonoverlapping(bytes.as_ptr() as *const c_char, message, written);
    *message.add(written) = 0;
    status
}

unsafe extern "C" fn field_changed_v2(
    field_id: i32,
    old_value: *const c_char,
    new_value: *const c_char,
    message: *mut *mut c_char,
    length: *mut u32,
) -> i32 {
    if message.is_null() || length.is_null() {
        return -1;
    }
    let (text, status) = match compose(field_id, old_value, new_value) {
        Some(composed) => composed,
        None => return -1,
    };
    let len = text.len() as u32;
    let owned = CString::new(text).expect("composed message has no interior NUL");
    let raw = owned.into_raw();
    register(raw as usize);
    *message = raw;
    *length = len;
    status
}

unsafe extern "C" fn destroy_message_data(message: *mut c_char) {
    if message.is_null() {
        return;
    }
    unregister(message as usize);
    drop(CString::from_raw(message));
}
