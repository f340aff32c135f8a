//! In-memory adapters for the reconciler ports.

mod diagnostics;
mod store;
mod tree;

pub use diagnostics::RecordingDiagnostics;
pub use store::InMemoryRegistryStore;
pub use tree::InMemoryProjectTree;
