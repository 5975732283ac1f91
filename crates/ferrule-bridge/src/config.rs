//! Bridge configuration
//!
//! Locates the native library. Configuration is loaded and merged in the
//! following order (later overrides earlier):
//! 1. Global config (~/.ferrule/config.toml)
//! 2. Project config (ferrule.toml, found by walking up from the start
//!    directory)
//! 3. Environment variables (FERRULE_LIBRARY, FERRULE_LIBRARY_PATH)

use ferrule_abi::Binder;
use serde::{Deserialize, Serialize};
use std::env;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("configuration file not found: {0}")]
    NotFound(PathBuf),

    #[error("failed to read configuration file: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid TOML syntax in {file}: {error}")]
    TomlParse {
        file: PathBuf,
        error: toml::de::Error,
    },

    #[error("no native library configured (set [library] name in ferrule.toml or FERRULE_LIBRARY)")]
    MissingLibraryName,

    #[error("home directory not found")]
    HomeNotFound,
}

/// Bridge configuration from ferrule.toml
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(deny_unknown_fields)]
pub struct BridgeConfig {
    /// Native library location
    #[serde(default)]
    pub library: LibraryConfig,
}

/// The `[library]` table
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(deny_unknown_fields)]
pub struct LibraryConfig {
    /// Library name or path, as understood by the binder
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Extra search paths, highest priority first
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub search_paths: Vec<PathBuf>,
}

impl BridgeConfig {
    /// Load configuration from a specific file.
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Err(ConfigError::NotFound(path.to_path_buf()));
        }
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|error| ConfigError::TomlParse {
            file: path.to_path_buf(),
            error,
        })
    }

    /// Load configuration starting from the given directory.
    ///
    /// Walks up the directory tree to find ferrule.toml, merges it over the
    /// global config, then applies environment overrides. Missing files are
    /// not errors; the result falls back to defaults.
    pub fn load_from_directory(start_dir: &Path) -> Result<Self, ConfigError> {
        let global = Self::load_global().unwrap_or_default();
        let project = Self::find_project_config(start_dir)?;
        Ok(global.merged_with(project).apply_env_overrides())
    }

    /// Walk up from `start_dir` looking for ferrule.toml.
    fn find_project_config(start_dir: &Path) -> Result<Self, ConfigError> {
        let mut current = start_dir.to_path_buf();

        loop {
            let config_path = current.join("ferrule.toml");
            if config_path.exists() {
                return Self::load_from_file(&config_path);
            }

            match current.parent() {
                Some(parent) => current = parent.to_path_buf(),
                None => return Ok(Self::default()),
            }
        }
    }

    /// Path of the global configuration file (~/.ferrule/config.toml).
    pub fn global_config_path() -> Result<PathBuf, ConfigError> {
        let home = dirs::home_dir().ok_or(ConfigError::HomeNotFound)?;
        Ok(home.join(".ferrule").join("config.toml"))
    }

    fn load_global() -> Result<Self, ConfigError> {
        let path = Self::global_config_path()?;
        if !path.exists() {
            return Ok(Self::default());
        }
        Self::load_from_file(&path)
    }

    /// Merge `other` over `self`: a set field in `other` wins, search paths
    /// from `other` take priority.
    fn merged_with(self, other: Self) -> Self {
        let mut search_paths = other.library.search_paths;
        search_paths.extend(self.library.search_paths);
        Self {
            library: LibraryConfig {
                name: other.library.name.or(self.library.name),
                search_paths,
            },
        }
    }

    /// Apply FERRULE_LIBRARY / FERRULE_LIBRARY_PATH overrides.
    pub fn apply_env_overrides(mut self) -> Self {
        if let Ok(name) = env::var("FERRULE_LIBRARY") {
            if !name.is_empty() {
                self.library.name = Some(name);
            }
        }
        if let Ok(path) = env::var("FERRULE_LIBRARY_PATH") {
            if !path.is_empty() {
                self.library.search_paths.insert(0, PathBuf::from(path));
            }
        }
        self
    }

    /// The configured library name, or an error if none is set anywhere.
    pub fn library_name(&self) -> Result<&str, ConfigError> {
        self.library
            .name
            .as_deref()
            .ok_or(ConfigError::MissingLibraryName)
    }

    /// A binder with this configuration's search paths prepended.
    pub fn binder(&self) -> Binder {
        let mut binder = Binder::new();
        // Insert in reverse so the first configured path searches first.
        for path in self.library.search_paths.iter().rev() {
            binder.add_search_path(path.clone());
        }
        binder
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::fs;

    fn write_config(dir: &Path, content: &str) -> PathBuf {
        let path = dir.join("ferrule.toml");
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_load_from_file_parses_library_table() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_config(
            dir.path(),
            r#"
[library]
name = "itemstore"
search_paths = ["/opt/itemstore/lib"]
"#,
        );

        let config = BridgeConfig::load_from_file(&path).unwrap();
        assert_eq!(config.library.name.as_deref(), Some("itemstore"));
        assert_eq!(
            config.library.search_paths,
            vec![PathBuf::from("/opt/itemstore/lib")]
        );
    }

    #[test]
    fn test_load_from_file_missing() {
        let result = BridgeConfig::load_from_file(Path::new("/nonexistent/ferrule.toml"));
        assert!(matches!(result, Err(ConfigError::NotFound(_))));
    }

    #[test]
    fn test_load_from_file_rejects_unknown_fields() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_config(dir.path(), "[library]\nnmae = \"typo\"\n");

        let result = BridgeConfig::load_from_file(&path);
        assert!(matches!(result, Err(ConfigError::TomlParse { .. })));
    }

    #[test]
    #[serial]
    fn test_walk_up_finds_project_config() {
        let dir = tempfile::tempdir().unwrap();
        write_config(dir.path(), "[library]\nname = \"itemstore\"\n");
        let nested = dir.path().join("a").join("b");
        fs::create_dir_all(&nested).unwrap();

        let config = BridgeConfig::load_from_directory(&nested).unwrap();
        assert_eq!(config.library.name.as_deref(), Some("itemstore"));
    }

    #[test]
    #[serial]
    fn test_env_override_wins() {
        let dir = tempfile::tempdir().unwrap();
        write_config(dir.path(), "[library]\nname = \"from-file\"\n");

        env::set_var("FERRULE_LIBRARY", "from-env");
        let config = BridgeConfig::load_from_directory(dir.path()).unwrap();
        env::remove_var("FERRULE_LIBRARY");

        assert_eq!(config.library.name.as_deref(), Some("from-env"));
    }

    #[test]
    #[serial]
    fn test_env_search_path_prepended() {
        let dir = tempfile::tempdir().unwrap();
        write_config(
            dir.path(),
            "[library]\nname = \"itemstore\"\nsearch_paths = [\"/from/file\"]\n",
        );

        env::set_var("FERRULE_LIBRARY_PATH", "/from/env");
        let config = BridgeConfig::load_from_directory(dir.path()).unwrap();
        env::remove_var("FERRULE_LIBRARY_PATH");

        assert_eq!(config.library.search_paths[0], PathBuf::from("/from/env"));
        assert!(config
            .library
            .search_paths
            .contains(&PathBuf::from("/from/file")));
    }

    #[test]
    fn test_library_name_required() {
        let config = BridgeConfig::default();
        assert!(matches!(
            config.library_name(),
            Err(ConfigError::MissingLibraryName)
        ));
    }

    #[test]
    fn test_merge_project_over_global() {
        let global = BridgeConfig {
            library: LibraryConfig {
                name: Some("global-lib".into()),
                search_paths: vec![PathBuf::from("/global")],
            },
        };
        let project = BridgeConfig {
            library: LibraryConfig {
                name: Some("project-lib".into()),
                search_paths: vec![PathBuf::from("/project")],
            },
        };

        let merged = global.merged_with(project);
        assert_eq!(merged.library.name.as_deref(), Some("project-lib"));
        assert_eq!(
            merged.library.search_paths,
            vec![PathBuf::from("/project"), PathBuf::from("/global")]
        );
    }
}
