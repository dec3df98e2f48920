//! QWeather MCP Server Library
//!
//! A Model Context Protocol server exposing QWeather data as four tools:
//! current conditions, multi-day forecast, hourly forecast and city lookup.
//!
//! # Architecture
//!
//! - **core**: configuration, error handling, the MCP server handler and transports
//! - **domains**: business logic organized by bounded contexts
//!   - **weather**: QWeather client, location resolution, unit conversion and report rendering
//!   - **tools**: the MCP tool definitions and their router
//!
//! # Example
//!
//! ```rust,no_run
//! use qweather_mcp_server::core::{Config, McpServer, TransportService};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::from_env();
//!     let server = McpServer::new(config.clone())?;
//!     TransportService::new(config.transport).run(server).await?;
//!     Ok(())
//! }
//! ```

pub mod core;
pub mod domains;

pub use core::{Config, Error, McpServer, Result};
