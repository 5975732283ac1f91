//! Dynamic library binding
//!
//! Resolves the native library's exported entry points into the call tables
//! of [`crate::entry`], using `libloading` with platform-specific library
//! naming and a caller-extendable search path list.

use crate::entry::{symbols, CollectionApi, FieldEventApi};
use libloading::{Library, Symbol};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Binding errors
#[derive(Debug, Error)]
pub enum BindError {
    /// Library file not found in search paths
    #[error("library not found: {0}")]
    LibraryNotFound(String),

    /// Entry point not exported by the library
    #[error("symbol '{symbol}' not found in library '{library}'")]
    SymbolNotFound { library: String, symbol: String },

    /// Failed to load library
    #[error("failed to load library: {0}")]
    LoadFailed(String),
}

/// Resolves a native library into bound entry-point tables
///
/// # Safety
///
/// Loading a dynamic library is inherently unsafe: its initialization code
/// runs in-process and the resolved symbols are trusted to have the
/// declared signatures. The binder confines that trust to [`Binder::bind`].
pub struct Binder {
    /// Library search paths, highest priority first
    search_paths: Vec<PathBuf>,
}

impl Binder {
    /// Create a binder with the platform's default search paths
    pub fn new() -> Self {
        Self {
            search_paths: Self::default_search_paths(),
        }
    }

    /// Get platform-specific default library search paths
    ///
    /// - Linux: /usr/lib, /usr/local/lib, /lib (plus lib64 variants)
    /// - macOS: /usr/lib, /usr/local/lib, /opt/homebrew/lib
    /// - Windows: System32
    /// - All platforms: current working directory, highest priority
    fn default_search_paths() -> Vec<PathBuf> {
        let mut paths = Vec::new();

        #[cfg(target_os = "linux")]
        {
            paths.push(PathBuf::from("/usr/lib"));
            paths.push(PathBuf::from("/usr/local/lib"));
            paths.push(PathBuf::from("/lib"));

            if cfg!(target_pointer_width = "64") {
                paths.push(PathBuf::from("/usr/lib64"));
                paths.push(PathBuf::from("/lib64"));
            }
        }

        #[cfg(target_os = "macos")]
        {
            paths.push(PathBuf::from("/usr/lib"));
            paths.push(PathBuf::from("/usr/local/lib"));
            paths.push(PathBuf::from("/opt/homebrew/lib"));
        }

        #[cfg(target_os = "windows")]
        {
            paths.push(PathBuf::from("C:\\Windows\\System32"));
            if let Ok(system_root) = std::env::var("SystemRoot") {
                paths.push(PathBuf::from(format!("{}\\System32", system_root)));
            }
        }

        if let Ok(cwd) = std::env::current_dir() {
            paths.insert(0, cwd);
        }

        paths
    }

    /// Add a custom search path (prepended to the search list)
    pub fn add_search_path(&mut self, path: PathBuf) {
        self.search_paths.insert(0, path);
    }

    /// Resolve a library name to a full path with platform-specific naming
    ///
    /// - Linux: lib{name}.so
    /// - macOS: lib{name}.dylib or lib{name}.so
    /// - Windows: {name}.dll
    fn resolve_library_path(&self, name: &str) -> Option<PathBuf> {
        let path = Path::new(name);
        if path.is_absolute() && path.exists() {
            return Some(path.to_path_buf());
        }

        let extensions = if cfg!(target_os = "windows") {
            vec!["dll"]
        } else if cfg!(target_os = "macos") {
            vec!["dylib", "so"]
        } else {
            vec!["so"]
        };

        let prefixes = if cfg!(target_os = "windows") {
            vec!["", "lib"]
        } else {
            vec!["lib", ""]
        };

        for search_path in &self.search_paths {
            for prefix in &prefixes {
                for ext in &extensions {
                    let filename = format!("{}{}.{}", prefix, name, ext);
                    let full_path = search_path.join(&filename);
                    if full_path.exists() {
                        return Some(full_path);
                    }
                }
            }
        }

        None
    }

    /// Load a library and resolve its entry points
    ///
    /// The collection/iterator table is mandatory; the field-change table is
    /// resolved only if the library exports it.
    pub fn bind(&self, name: &str) -> Result<BoundLibrary, BindError> {
        let path = self
            .resolve_library_path(name)
            .ok_or_else(|| BindError::LibraryNotFound(name.to_string()))?;

        let library =
            unsafe { Library::new(&path).map_err(|e| BindError::LoadFailed(e.to_string()))? };

        let collection = unsafe { resolve_collection_api(&library, name)? };
        let events = unsafe { resolve_field_event_api(&library, name).ok() };

        Ok(BoundLibrary {
            collection,
            events,
            _library: library,
        })
    }
}

impl Default for Binder {
    fn default() -> Self {
        Self::new()
    }
}

/// A loaded native library with its resolved entry-point tables
///
/// Keeps the `libloading::Library` alive for as long as the tables are
/// reachable; the raw function pointers are valid only while this value
/// exists.
pub struct BoundLibrary {
    collection: CollectionApi,
    events: Option<FieldEventApi>,
    _library: Library,
}

impl BoundLibrary {
    /// The collection/iterator entry points
    pub fn collection_api(&self) -> &CollectionApi {
        &self.collection
    }

    /// The field-change entry points, if the library exports them
    pub fn field_event_api(&self) -> Option<&FieldEventApi> {
        self.events.as_ref()
    }
}

/// Lookup one symbol and copy out its function pointer.
///
/// # Safety
///
/// The caller must ensure the symbol's actual signature matches `T`.
unsafe fn entry_point<T: Copy>(
    library: &Library,
    library_name: &str,
    symbol: &str,
) -> Result<T, BindError> {
    let resolved: Symbol<'_, T> =
        library
            .get(symbol.as_bytes())
            .map_err(|_| BindError::SymbolNotFound {
                library: library_name.to_string(),
                symbol: symbol.to_string(),
            })?;
    Ok(*resolved)
}

unsafe fn resolve_collection_api(
    library: &Library,
    library_name: &str,
) -> Result<CollectionApi, BindError> {
    Ok(CollectionApi {
        collection_create: entry_point(library, library_name, symbols::COLLECTION_CREATE)?,
        collection_destroy: entry_point(library, library_name, symbols::COLLECTION_DESTROY)?,
        collection_add_item: entry_point(library, library_name, symbols::COLLECTION_ADD_ITEM)?,
        collection_get_iterator: entry_point(
            library,
            library_name,
            symbols::COLLECTION_GET_ITERATOR,
        )?,
        iterator_destroy: entry_point(library, library_name, symbols::ITERATOR_DESTROY)?,
        iterator_get_current: entry_point(library, library_name, symbols::ITERATOR_GET_CURRENT)?,
        iterator_move_next: entry_point(library, library_name, symbols::ITERATOR_MOVE_NEXT)?,
        iterator_reset: entry_point(library, library_name, symbols::ITERATOR_RESET)?,
        iterator_clone: entry_point(library, library_name, symbols::ITERATOR_CLONE)?,
        iterator_equal: entry_point(library, library_name, symbols::ITERATOR_EQUAL)?,
    })
}

unsafe fn resolve_field_event_api(
    library: &Library,
    library_name: &str,
) -> Result<FieldEventApi, BindError> {
    Ok(FieldEventApi {
        field_changed_v1: entry_point(library, library_name, symbols::FIELD_CHANGED_V1)?,
        field_changed_v2: entry_point(library, library_name, symbols::FIELD_CHANGED_V2)?,
        destroy_message: entry_point(library, library_name, symbols::DESTROY_MESSAGE_DATA)?,
    })
}
