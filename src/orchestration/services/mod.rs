//! Application services for fleet orchestration.

mod fleet;

pub use fleet::{
    FLEET_SCRIPT_NAME, FleetScriptService, FleetScriptServiceError, FleetScriptServiceResult,
    UNKNOWN_COMMIT,
};
