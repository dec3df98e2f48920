//! Tool Router - builds the rmcp ToolRouter.
//!
//! Each tool knows how to create its own route; this module only lists them.

use std::sync::Arc;

use rmcp::handler::server::tool::ToolRouter;

use crate::core::config::Config;
use crate::domains::weather::QWeatherClient;

use super::definitions::{GetForecastTool, GetHourlyTool, GetWeatherTool, LookupCityTool};

/// Build the tool router with all registered tools.
pub fn build_tool_router<S>(config: Arc<Config>, client: QWeatherClient) -> ToolRouter<S>
where
    S: Send + Sync + 'static,
{
    ToolRouter::new()
        .with_route(GetWeatherTool::create_route(config.clone(), client.clone()))
        .with_route(GetForecastTool::create_route(config.clone(), client.clone()))
        .with_route(GetHourlyTool::create_route(config.clone(), client.clone()))
        .with_route(LookupCityTool::create_route(config, client))
}
