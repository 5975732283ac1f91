//! Raw ABI surface of the ferrule bridge
//!
//! Everything that must match the native library byte-for-byte lives here:
//! - `types`: `#[repr(C)]` wire structs and opaque handle types
//! - `entry`: entry-point signatures, export names, and the resolved tables
//! - `bind`: dynamic library loading and symbol resolution via `libloading`
//!
//! # Safety
//!
//! This crate defines the unsafe boundary; it performs no native calls
//! itself. Invoking the function pointers it resolves is the job of the safe
//! layer in `ferrule-bridge`, which wraps every call in ownership-tracking
//! types.

pub mod bind;
pub mod entry;
pub mod types;

pub use bind::{BindError, Binder, BoundLibrary};
pub use entry::{CollectionApi, FieldEventApi};
pub use types::{CollectionHandle, CursorHandle, RawItem, StrField, StrIn, StrOut};
