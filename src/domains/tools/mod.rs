//! Tools domain module.
//!
//! Tools are the functions MCP clients call. This server exposes four
//! weather tools backed by the QWeather API.
//!
//! ## Architecture
//!
//! - `definitions/` - Individual tool implementations (one file per tool)
//! - `router.rs` - ToolRouter builder used by every transport
//! - `error.rs` - Tool-specific error types and failure wording
//!
//! ## Adding a New Tool
//!
//! 1. Create a new file in `definitions/qweather/` (e.g., `air.rs`)
//! 2. Define params, `execute()`, `to_tool()` and `create_route()`
//! 3. Export in `definitions/mod.rs`
//! 4. Add the route in `router.rs` using `with_route()`

pub mod definitions;
pub mod error;
pub mod router;

pub use error::{Operation, ToolError};
pub use router::build_tool_router;
