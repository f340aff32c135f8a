//! Adapter implementations for project registry ports.

mod diagnostics;
pub mod fs;
pub mod memory;
pub mod provider;

pub use diagnostics::TracingDiagnostics;
