// ABOUTME: Command module aggregator for the deployhelp CLI.
// ABOUTME: Re-exports deploy and quickstart command handlers.

mod deploy;
mod quickstart;

pub use deploy::deploy;
pub use quickstart::quickstart;
