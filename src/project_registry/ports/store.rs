//! Repository port for the persisted registry document.

use crate::project_registry::domain::Registry;
use std::sync::Arc;
use thiserror::Error;

/// Result type for registry store operations.
pub type RegistryStoreResult<T> = Result<T, RegistryStoreError>;

/// Persistence contract for the registry document.
pub trait RegistryStore: Send + Sync {
    /// Loads the whole registry. A missing or empty document yields an
    /// empty registry.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryStoreError::InvalidDocument`] when the document
    /// cannot be decoded and [`RegistryStoreError::Persistence`] when it
    /// cannot be read.
    fn load(&self) -> RegistryStoreResult<Registry>;

    /// Replaces the whole document with `registry`.
    ///
    /// Implementations must be all-or-nothing: on failure the previous
    /// document is left intact.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryStoreError::Persistence`] when the document cannot
    /// be written.
    fn save(&self, registry: &Registry) -> RegistryStoreResult<()>;
}

/// Errors returned by registry store implementations.
#[derive(Debug, Clone, Error)]
pub enum RegistryStoreError {
    /// Persisted data could not be reconstructed into domain types.
    #[error("invalid registry document: {0}")]
    InvalidDocument(Arc<dyn std::error::Error + Send + Sync>),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl RegistryStoreError {
    /// Wraps document decoding or validation failures.
    pub fn invalid_document(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::InvalidDocument(Arc::new(err))
    }

    /// Wraps a persistence-layer failure.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
