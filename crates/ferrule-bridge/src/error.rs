//! Bridge error taxonomy
//!
//! Failures propagate as values; the bridge performs no logging, no retry,
//! and no recovery. Leak and double-free classes do not appear here because
//! they are eliminated by construction in [`crate::handle`].

use crate::config::ConfigError;
use ferrule_abi::BindError;
use thiserror::Error;

/// Errors surfaced by the safe bridge layer
#[derive(Debug, Error)]
pub enum BridgeError {
    /// Library open or symbol resolution failure
    #[error(transparent)]
    Bind(#[from] BindError),

    /// Configuration failure while locating the library
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// A status-returning entry point reported failure; the status is the
    /// native value, passed through verbatim
    #[error("native call {call} failed with status {status}")]
    NativeCall { call: &'static str, status: i32 },

    /// A creating entry point returned a null handle
    #[error("native call {call} returned a null handle")]
    NullHandle { call: &'static str },

    /// An argument string cannot cross as a NUL-terminated C string
    #[error("string argument for {call} contains an interior NUL byte")]
    InteriorNul { call: &'static str },

    /// The loaded library exports no field-change entry points
    #[error("library exports no field-change entry points")]
    FieldEventsUnavailable,
}
