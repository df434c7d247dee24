// ABOUTME: Builds concrete compose invocations for (task, target) cells.
// ABOUTME: Exports the command builder, command specs and per-cell build errors.

mod builder;
mod error;
mod template;

pub use builder::{CommandBuilder, CommandSpec, inherited_env};
pub use error::CommandError;
pub use template::substitute;
