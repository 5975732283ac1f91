//! Safe consumer for a native, C-ABI collection library
//!
//! ferrule lets code on this side of an in-process language boundary use
//! records, variable-length strings, and iteration sequences that are
//! produced and owned by a native library, without ownership bugs and
//! without leaking native resources:
//!
//! - `strings`: the three buffer-ownership conventions for moving text
//!   across the boundary (borrowed view in, callback cell out,
//!   native-allocated out)
//! - `item`: the fixed-layout record and its pack/unpack paths
//! - `handle`: exactly-once ownership of one native handle
//! - `cursor`: forward iteration over a native cursor, with a
//!   `std::iter::Iterator` adapter
//! - `collection`: the native collection itself (append + iterate)
//! - `events`: the field-change notification pair
//! - `library`: ownership of the loaded native library
//! - `config`: locating that library (ferrule.toml + environment)
//!
//! # Resource discipline
//!
//! Every native handle and every transfer cell is released by scoped
//! acquisition: wrappers free their resource in `Drop`, release is
//! idempotent, and handle types are move-only so two owners of one native
//! object cannot exist. This holds on every exit path, including `?` and
//! panic unwind.
//!
//! # Example
//!
//! ```no_run
//! use ferrule_bridge::{Collection, Item, NativeLibrary};
//!
//! # fn main() -> Result<(), ferrule_bridge::BridgeError> {
//! let lib = NativeLibrary::open("itemstore")?;
//! let mut collection = Collection::create(&lib)?;
//! collection.append(&Item::new(98, "bob"));
//! for item in &collection {
//!     println!("{} {}", item.i, item.s);
//! }
//! # Ok(())
//! # }
//! ```

pub mod collection;
pub mod config;
pub mod cursor;
pub mod error;
pub mod events;
pub mod handle;
pub mod item;
pub mod library;
pub mod strings;

pub use collection::Collection;
pub use config::{BridgeConfig, ConfigError};
pub use cursor::{Cursor, Items};
pub use error::BridgeError;
pub use events::{FieldChange, FieldEvents};
pub use handle::OwnedHandle;
pub use item::Item;
pub use library::NativeLibrary;
pub use strings::{decode_fixed, NativeMessage, OutCell, StrInView, MESSAGE_CAPACITY};
