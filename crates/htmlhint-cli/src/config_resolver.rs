//! Per-file configuration lookup.
//!
//! Each linted file uses the nearest config file found by walking up from
//! its directory:
//!
//! 1. `--config` flag (explicit path, applies to every file)
//! 2. `.htmlhintrc` or `htmlhint.toml` in the file's directory or any parent
//! 3. `~/.htmlhint/config.toml` (global fallback)
//! 4. No config found → defaults (the `recommended` preset)

use anyhow::{Context, Result};
use htmlhint::Configuration;
use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Config file names checked in each directory, in order.
const CONFIG_FILE_NAMES: &[&str] = &[".htmlhintrc", "htmlhint.toml"];

/// Config file name within the global config directory.
const GLOBAL_CONFIG_NAME: &str = "config.toml";

/// Where a configuration came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigOrigin {
    /// Explicitly specified via `--config` flag.
    Explicit(PathBuf),
    /// Nearest config file above the linted file.
    Nearest(PathBuf),
    /// Loaded from the global config directory (`~/.htmlhint/`).
    Global(PathBuf),
    /// No config found; defaults are used.
    Default,
}

impl ConfigOrigin {
    /// Returns the config file path, if any.
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::Explicit(p) | Self::Nearest(p) | Self::Global(p) => Some(p),
            Self::Default => None,
        }
    }
}

/// A parsed configuration and its origin.
#[derive(Debug, Clone)]
pub struct LoadedConfig {
    /// Where it was found.
    pub origin: ConfigOrigin,
    /// The parsed configuration.
    pub config: Configuration,
}

/// Resolves and caches the configuration of each linted file.
#[derive(Debug)]
pub struct ConfigResolver {
    explicit: Option<LoadedConfig>,
    global_dir: Option<PathBuf>,
    /// Parsed config files, keyed by path.
    nearest: HashMap<PathBuf, LoadedConfig>,
    /// Global or default configuration, loaded on first use.
    fallback: Option<LoadedConfig>,
}

impl ConfigResolver {
    /// Creates a resolver. An explicit config is read immediately.
    ///
    /// # Errors
    ///
    /// Returns an error if the explicit config cannot be read or parsed.
    pub fn new(explicit: Option<&Path>) -> Result<Self> {
        Self::with_global_dir(explicit, global_config_dir())
    }

    /// Testable core: accepts `global_dir` as parameter to avoid env var races.
    fn with_global_dir(explicit: Option<&Path>, global_dir: Option<PathBuf>) -> Result<Self> {
        let explicit = explicit
            .map(|path| load(ConfigOrigin::Explicit(path.to_path_buf())))
            .transpose()?;
        Ok(Self {
            explicit,
            global_dir,
            nearest: HashMap::new(),
            fallback: None,
        })
    }

    /// Returns the configuration that applies to `file`.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file found cannot be read or parsed.
    pub fn config_for(&mut self, file: &Path) -> Result<&LoadedConfig> {
        if let Some(explicit) = &self.explicit {
            return Ok(explicit);
        }

        if let Some(path) = find_config(&search_dir(file)) {
            let loaded: &LoadedConfig = match self.nearest.entry(path) {
                Entry::Occupied(entry) => entry.into_mut(),
                Entry::Vacant(entry) => {
                    let origin = ConfigOrigin::Nearest(entry.key().clone());
                    entry.insert(load(origin)?)
                }
            };
            return Ok(loaded);
        }

        if self.fallback.is_none() {
            self.fallback = Some(load_fallback(self.global_dir.as_deref())?);
        }
        self.fallback
            .as_ref()
            .context("fallback configuration was not loaded")
    }
}

/// Directory the upward search starts from.
fn search_dir(path: &Path) -> PathBuf {
    let dir = if path.is_dir() {
        path
    } else {
        path.parent()
            .filter(|parent| !parent.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."))
    };
    dir.canonicalize().unwrap_or_else(|_| dir.to_path_buf())
}

/// Walks from `start_dir` up to the filesystem root, returning the first
/// config file found.
fn find_config(start_dir: &Path) -> Option<PathBuf> {
    let mut current_dir = start_dir.to_path_buf();
    loop {
        for name in CONFIG_FILE_NAMES {
            let candidate = current_dir.join(name);
            if candidate.is_file() {
                tracing::debug!("Found config: {}", candidate.display());
                return Some(candidate);
            }
        }
        if !current_dir.pop() {
            return None;
        }
    }
}

fn load_fallback(global_dir: Option<&Path>) -> Result<LoadedConfig> {
    let global = global_dir
        .map(|dir| dir.join(GLOBAL_CONFIG_NAME))
        .filter(|candidate| candidate.is_file());
    match global {
        Some(path) => {
            tracing::info!("Using global config: {}", path.display());
            load(ConfigOrigin::Global(path))
        }
        None => {
            tracing::debug!("No config found, using defaults");
            load(ConfigOrigin::Default)
        }
    }
}

fn load(origin: ConfigOrigin) -> Result<LoadedConfig> {
    let config = match origin.path() {
        Some(path) => Configuration::from_file(path)
            .with_context(|| format!("Failed to load config: {}", path.display()))?,
        None => Configuration::default(),
    };
    Ok(LoadedConfig { origin, config })
}

/// Returns the global config directory path.
///
/// Resolution: `$HTMLHINT_CONFIG_DIR` > `~/.htmlhint/`
#[must_use]
pub fn global_config_dir() -> Option<PathBuf> {
    if let Ok(dir) = std::env::var("HTMLHINT_CONFIG_DIR") {
        return Some(PathBuf::from(dir));
    }
    home::home_dir().map(|h| h.join(".htmlhint"))
}
