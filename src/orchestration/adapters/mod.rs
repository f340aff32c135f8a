//! Adapter implementations for orchestration ports.

mod memory;
mod process;

pub use memory::RecordingScriptRunner;
pub use process::ProcessScriptRunner;
