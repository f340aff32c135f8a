//! Beetroot: environment checks and orchestration for a Compose fleet.
//!
//! Every service of a Beetroot installation lives in its own directory below
//! a services root. This crate keeps the routing registry of those services
//! in step with what is on disk and drives the fleet script that operates
//! them.
//!
//! # Architecture
//!
//! Beetroot follows hexagonal architecture principles:
//!
//! - **Domain**: Pure types and predicates with no infrastructure dependencies
//! - **Ports**: Trait seams for the filesystem, the registry document, operator
//!   input and external processes
//! - **Adapters**: Concrete implementations of ports (filesystem, YAML,
//!   terminal prompts, child processes, in-memory doubles)
//!
//! # Modules
//!
//! - [`project_registry`]: Project discovery, registry reconciliation and
//!   drift findings
//! - [`orchestration`]: Fleet script actions and repository metadata
//! - [`settings`]: Filesystem layout of a Beetroot checkout

pub mod orchestration;
pub mod project_registry;
pub mod settings;
