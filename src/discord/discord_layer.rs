// Discord layer - commands, adapters and startup glue.

#[path = "commands/command_catalog.rs"]
pub mod commands;

#[path = "relay/mod.rs"]
pub mod relay;

// Re-export command types for convenience
pub use commands::relay::{Data, Error};
