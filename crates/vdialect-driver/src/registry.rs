//! Process-wide driver registry
//!
//! Drivers register once on startup and are looked up by identity for every
//! query and introspection call afterwards. Registration can be gated on a
//! capability probe; when the probe fails, registration is a no-op.

use crate::driver::SqlDriver;
use crate::vertica::VerticaDriver;
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::{Arc, OnceLock, RwLock};

type DriverMap = HashMap<String, Arc<dyn SqlDriver>>;

fn drivers() -> &'static RwLock<DriverMap> {
    static DRIVERS: OnceLock<RwLock<DriverMap>> = OnceLock::new();
    DRIVERS.get_or_init(|| RwLock::new(HashMap::new()))
}

/// Decides whether a driver's native client is usable on this machine
pub trait ClientProbe {
    fn is_available(&self) -> bool;
}

impl<F: Fn() -> bool> ClientProbe for F {
    fn is_available(&self) -> bool {
        self()
    }
}

/// Native client library shipped with the Vertica client drivers
pub const CLIENT_LIBRARY: &str = "libverticaodbc.so";

/// Probe that looks for the native client library on disk
#[derive(Debug, Clone, PartialEq)]
pub struct LibraryProbe {
    library: String,
    search_paths: Vec<PathBuf>,
}

impl LibraryProbe {
    /// Probe for `library` in the given directories
    pub fn new(library: impl Into<String>, search_paths: Vec<PathBuf>) -> Self {
        Self {
            library: library.into(),
            search_paths,
        }
    }

    pub fn search_paths(&self) -> &[PathBuf] {
        &self.search_paths
    }
}

impl Default for LibraryProbe {
    /// `$VERTICA_HOME/lib64` then `/opt/vertica/lib64`
    fn default() -> Self {
        let mut search_paths = Vec::new();
        if let Some(home) = std::env::var_os("VERTICA_HOME") {
            search_paths.push(PathBuf::from(home).join("lib64"));
        }
        search_paths.push(PathBuf::from("/opt/vertica/lib64"));
        Self::new(CLIENT_LIBRARY, search_paths)
    }
}

impl ClientProbe for LibraryProbe {
    fn is_available(&self) -> bool {
        let found = self
            .search_paths
            .iter()
            .map(|dir| dir.join(&self.library))
            .find(|path| path.is_file());

        match &found {
            Some(path) => tracing::debug!(path = %path.display(), "native client library found"),
            None => tracing::debug!(library = %self.library, "native client library not found"),
        }
        found.is_some()
    }
}

/// Register a driver under its identity, replacing any previous entry
pub fn register(driver: Arc<dyn SqlDriver>) {
    let name = driver.name().to_string();
    tracing::info!(driver = %name, "registering database driver");
    drivers()
        .write()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
        .insert(name, driver);
}

/// Register a driver only if its capability probe succeeds
///
/// Returns whether the driver was registered.
pub fn register_if_available(driver: Arc<dyn SqlDriver>, probe: &dyn ClientProbe) -> bool {
    if !probe.is_available() {
        tracing::debug!(driver = driver.name(), "capability probe failed; skipping registration");
        return false;
    }
    register(driver);
    true
}

/// Register the built-in Vertica driver, gated on the native client
pub fn register_builtin() -> bool {
    register_if_available(Arc::new(VerticaDriver::new()), &LibraryProbe::default())
}

/// Get a driver by identity
pub fn get(name: &str) -> Option<Arc<dyn SqlDriver>> {
    let driver = drivers()
        .read()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
        .get(name)
        .cloned();
    if driver.is_none() {
        tracing::warn!(driver = %name, "driver not found in registry");
    }
    driver
}

/// Check if a driver is registered
pub fn has(name: &str) -> bool {
    drivers()
        .read()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
        .contains_key(name)
}

/// Identities of all registered drivers, sorted
pub fn registered_names() -> Vec<String> {
    let mut names: Vec<String> = drivers()
        .read()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
        .keys()
        .cloned()
        .collect();
    names.sort();
    names
}
