// The core module contains all business logic.
// Each feature gets its own submodule.

#[path = "relay/mod.rs"]
pub mod relay;
