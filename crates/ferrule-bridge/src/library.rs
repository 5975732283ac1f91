//! Ownership of the native library behind the bridge
//!
//! Collections and cursors each hold a [`NativeLibrary`] clone, so the
//! loaded library (and with it every resolved function pointer) outlives
//! every native handle minted from it.

use crate::config::BridgeConfig;
use crate::error::BridgeError;
use ferrule_abi::{Binder, BoundLibrary, CollectionApi, FieldEventApi};
use std::sync::Arc;

enum Provider {
    /// Dynamically loaded: the tables borrow from the kept-alive library
    Bound(BoundLibrary),
    /// In-process entry points (tests, statically linked callers)
    Tables {
        collection: CollectionApi,
        events: Option<FieldEventApi>,
    },
}

/// Shared handle to one native library.
///
/// Cheap to clone; the underlying library is unloaded when the last clone
/// and the last handle minted from it are gone.
#[derive(Clone)]
pub struct NativeLibrary {
    provider: Arc<Provider>,
}

impl NativeLibrary {
    /// Load and bind a library by name or path using the default binder.
    pub fn open(name: &str) -> Result<Self, BridgeError> {
        Self::open_with(&Binder::new(), name)
    }

    /// Load and bind a library using a caller-configured binder.
    pub fn open_with(binder: &Binder, name: &str) -> Result<Self, BridgeError> {
        let bound = binder.bind(name)?;
        Ok(Self {
            provider: Arc::new(Provider::Bound(bound)),
        })
    }

    /// Load and bind the library the configuration names.
    pub fn from_config(config: &BridgeConfig) -> Result<Self, BridgeError> {
        let name = config.library_name()?.to_string();
        Self::open_with(&config.binder(), &name)
    }

    /// Wrap an in-process entry-point table.
    pub fn from_table(collection: CollectionApi) -> Self {
        Self {
            provider: Arc::new(Provider::Tables {
                collection,
                events: None,
            }),
        }
    }

    /// Wrap in-process entry-point tables including the field-change pair.
    pub fn with_field_events(collection: CollectionApi, events: FieldEventApi) -> Self {
        Self {
            provider: Arc::new(Provider::Tables {
                collection,
                events: Some(events),
            }),
        }
    }

    pub(crate) fn api(&self) -> &CollectionApi {
        match &*self.provider {
            Provider::Bound(bound) => bound.collection_api(),
            Provider::Tables { collection, .. } => collection,
        }
    }

    pub(crate) fn field_events(&self) -> Option<&FieldEventApi> {
        match &*self.provider {
            Provider::Bound(bound) => bound.field_event_api(),
            Provider::Tables { events, .. } => events.as_ref(),
        }
    }

    /// Whether the library exports the field-change entry points.
    pub fn has_field_events(&self) -> bool {
        self.field_events().is_some()
    }
}
