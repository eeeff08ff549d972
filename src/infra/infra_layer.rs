// The infra module contains implementations backed by files, env and other
// outside resources. Each feature implementation goes in its own submodule.

#[path = "config/mod.rs"]
pub mod config;
