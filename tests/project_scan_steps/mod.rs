//! Step definitions for project scan scenarios.

mod given;
mod then;
mod when;
pub mod world;
