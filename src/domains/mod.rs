//! Domains module containing business logic organized by bounded contexts.
//!
//! - `weather`: the QWeather client, location resolution and report rendering
//! - `tools`: the MCP tools built on top of it

pub mod tools;
pub mod weather;
