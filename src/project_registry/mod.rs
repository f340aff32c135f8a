//! Project registry reconciliation for Beetroot.
//!
//! Every service in the fleet lives in its own directory under a services
//! root. A scan discovers those directories, looks each one up in the
//! persisted registry, asks a configuration provider for routing settings
//! when a project is new, and reports drift between a project's manifest,
//! its environment file and its registry entry. The module follows
//! hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Scan and reporting services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
