//! Field-change notifications
//!
//! The native library reports a field edit with a status code and a
//! human-readable message, through two entry points that differ only in
//! who allocates the message buffer: v1 writes into a caller-allocated
//! fixed buffer, v2 hands back a buffer the native side allocated, to be
//! released only through the paired destroy entry point. Both are wrapped
//! here; statuses come back verbatim, negative meaning failure.

use crate::error::BridgeError;
use crate::library::NativeLibrary;
use crate::strings::{decode_fixed, NativeMessage, MESSAGE_CAPACITY};
use ferrule_abi::FieldEventApi;
use std::ffi::CString;
use std::os::raw::c_char;
use std::ptr;

/// Outcome of a field-change notification: the native status code (passed
/// through unchanged) and the decoded message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldChange {
    pub status: i32,
    pub message: String,
}

/// Safe wrapper over the field-change entry points.
pub struct FieldEvents {
    /// Keeps the loaded library alive while the copied table is callable
    _lib: NativeLibrary,
    api: FieldEventApi,
}

impl FieldEvents {
    /// Errors with [`BridgeError::FieldEventsUnavailable`] if the library
    /// does not export the pair.
    pub fn new(lib: &NativeLibrary) -> Result<Self, BridgeError> {
        let api = *lib
            .field_events()
            .ok_or(BridgeError::FieldEventsUnavailable)?;
        Ok(Self {
            _lib: lib.clone(),
            api,
        })
    }

    /// Notify through the caller-allocated-buffer variant.
    ///
    /// On a negative status the buffer contents are undefined and are
    /// ignored; the status is surfaced as an error.
    pub fn notify_v1(
        &self,
        field_id: i32,
        old_value: &str,
        new_value: &str,
    ) -> Result<FieldChange, BridgeError> {
        let old = c_arg(old_value, "fieldChanged_v1")?;
        let new = c_arg(new_value, "fieldChanged_v1")?;

        let mut buffer = vec![0u8; MESSAGE_CAPACITY];
        let status = unsafe {
            (self.api.field_changed_v1)(
                field_id,
                old.as_ptr(),
                new.as_ptr(),
                buffer.as_mut_ptr() as *mut c_char,
                buffer.len() as u32,
            )
        };
        if status < 0 {
            return Err(BridgeError::NativeCall {
                call: "fieldChanged_v1",
                status,
            });
        }
        Ok(FieldChange {
            status,
            message: decode_fixed(&buffer),
        })
    }

    /// Notify through the native-allocated-buffer variant.
    ///
    /// The returned buffer is adopted by a [`NativeMessage`] guard before
    /// the status is inspected, so it is destroyed exactly once on every
    /// path, including failure.
    pub fn notify_v2(
        &self,
        field_id: i32,
        old_value: &str,
        new_value: &str,
    ) -> Result<FieldChange, BridgeError> {
        let old = c_arg(old_value, "fieldChanged_v2")?;
        let new = c_arg(new_value, "fieldChanged_v2")?;

        let mut data: *mut c_char = ptr::null_mut();
        let mut length: u32 = 0;
        let status = unsafe {
            (self.api.field_changed_v2)(field_id, old.as_ptr(), new.as_ptr(), &mut data, &mut length)
        };
        let message =
            unsafe { NativeMessage::from_raw(data, length, self.api.destroy_message) };
        if status < 0 {
            return Err(BridgeError::NativeCall {
                call: "fieldChanged_v2",
                status,
            });
        }
        Ok(FieldChange {
            status,
            message: message.map(|m| m.to_text()).unwrap_or_default(),
        })
    }
}

fn c_arg(value: &str, call: &'static str) -> Result<CString, BridgeError> {
    CString::new(value).map_err(|_| BridgeError::InteriorNul { call })
}
