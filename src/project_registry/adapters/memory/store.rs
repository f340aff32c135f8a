//! In-memory registry store.

use crate::project_registry::{
    domain::Registry,
    ports::{RegistryStore, RegistryStoreError, RegistryStoreResult},
};
use std::io;
use std::sync::{Arc, RwLock};

/// Thread-safe in-memory registry store.
///
/// Saves can be made to fail so callers can exercise persistence errors.
#[derive(Debug, Clone, Default)]
pub struct InMemoryRegistryStore {
    state: Arc<RwLock<InMemoryStoreState>>,
}

#[derive(Debug, Default)]
struct InMemoryStoreState {
    registry: Registry,
    save_count: usize,
    fail_saves: bool,
}

impl InMemoryRegistryStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store whose document already holds `registry`.
    #[must_use]
    pub fn with_registry(registry: Registry) -> Self {
        Self {
            state: Arc::new(RwLock::new(InMemoryStoreState {
                registry,
                ..InMemoryStoreState::default()
            })),
        }
    }

    /// Makes every subsequent save fail (or succeed again).
    ///
    /// # Errors
    ///
    /// Returns persistence errors when lock acquisition fails.
    pub fn set_fail_saves(&self, fail: bool) -> RegistryStoreResult<()> {
        let mut state = self
            .state
            .write()
            .map_err(|err| RegistryStoreError::persistence(io::Error::other(err.to_string())))?;
        state.fail_saves = fail;
        Ok(())
    }

    /// Returns the number of successful saves.
    ///
    /// # Errors
    ///
    /// Returns persistence errors when lock acquisition fails.
    pub fn save_count(&self) -> RegistryStoreResult<usize> {
        let state = self
            .state
            .read()
            .map_err(|err| RegistryStoreError::persistence(io::Error::other(err.to_string())))?;
        Ok(state.save_count)
    }
}

impl RegistryStore for InMemoryRegistryStore {
    fn load(&self) -> RegistryStoreResult<Registry> {
        let state = self
            .state
            .read()
            .map_err(|err| RegistryStoreError::persistence(io::Error::other(err.to_string())))?;
        Ok(state.registry.clone())
    }

    fn save(&self, registry: &Registry) -> RegistryStoreResult<()> {
        let mut state = self
            .state
            .write()
            .map_err(|err| RegistryStoreError::persistence(io::Error::other(err.to_string())))?;
        if state.fail_saves {
            return Err(RegistryStoreError::persistence(io::Error::new(
                io::ErrorKind::PermissionDenied,
                "registry document is read-only",
            )));
        }
        state.registry = registry.clone();
        state.save_count += 1;
        Ok(())
    }
}
