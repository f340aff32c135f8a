//! Fleet orchestration through the sibling shell scripts.
//!
//! Beetroot operates its services with `mose.sh`, a script that wraps the
//! compose tool for every project at once or for a single project. This
//! module builds those invocations, runs them through a [`ports::ScriptRunner`]
//! and turns their output into operator-facing outcomes.

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
