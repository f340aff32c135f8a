//! Application services for project reconciliation and reporting.

mod reconciler;
mod summary;

pub use reconciler::{ProjectRegistryReconciler, ReconcilerError, ReconcilerResult, ScanOutcome};
pub use summary::{DEFAULT_DOCS_LINK_TEMPLATE, ScanSummaryRenderer, SummaryError};
