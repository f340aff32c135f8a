//! Configuration provider adapters.

mod answers;
mod defaults;
mod interactive;

pub use answers::AnswersConfigProvider;
pub use defaults::{DefaultsConfigProvider, RoutingPolicy};
pub use interactive::InteractiveConfigProvider;
