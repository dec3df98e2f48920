//! MCP Server implementation and lifecycle management.
//!
//! The server owns the immutable configuration, one shared QWeather client
//! and the tool router. Tools are defined in `domains/tools/definitions/`
//! and routed through `domains/tools/router.rs`, so adding a tool does not
//! touch this file.

use rmcp::{
    ServerHandler, handler::server::tool::ToolRouter, model::*, tool_handler,
};
use std::sync::Arc;
use tracing::info;

use super::config::Config;
use super::error::Error;
use crate::domains::{tools::build_tool_router, weather::QWeatherClient};

/// The main MCP server handler.
#[derive(Clone)]
pub struct McpServer {
    /// Server configuration.
    config: Arc<Config>,

    /// Tool router for handling tool calls.
    tool_router: ToolRouter<Self>,
}

impl McpServer {
    /// Create a new MCP server with the given configuration.
    ///
    /// Fails when a provider base URL is not a valid URL or the HTTP client
    /// cannot be built.
    pub fn new(config: Config) -> super::error::Result<Self> {
        for (name, url) in [
            ("QWEATHER_API_URL", &config.qweather.api_base_url),
            ("QWEATHER_GEO_API_URL", &config.qweather.geo_api_base_url),
        ] {
            reqwest::Url::parse(url)
                .map_err(|e| Error::config(format!("{name} '{url}' is not a valid URL: {e}")))?;
        }

        let config = Arc::new(config);
        let client = QWeatherClient::new(&config.qweather)?;

        info!(
            "Using QWeather API at {} (geo: {})",
            config.qweather.api_base_url, config.qweather.geo_api_base_url
        );

        Ok(Self {
            tool_router: build_tool_router::<Self>(config.clone(), client),
            config,
        })
    }

    /// Get the server name.
    pub fn name(&self) -> &str {
        &self.config.server.name
    }

    /// Get the server version.
    pub fn version(&self) -> &str {
        &self.config.server.version
    }

    /// Get the server configuration.
    pub fn config(&self) -> &Arc<Config> {
        &self.config
    }

    /// Names of every registered tool.
    pub fn tool_names(&self) -> Vec<String> {
        self.tool_router
            .list_all()
            .into_iter()
            .map(|t| t.name.into_owned())
            .collect()
    }
}

/// ServerHandler implementation with tool_handler macro for automatic tool routing.
#[tool_handler]
impl ServerHandler for McpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(
                "Weather tools backed by QWeather. Use lookupCity to find a location ID, then \
                 getWeather, getWeatherForecast or getHourlyWeather with a city name, location \
                 ID or 'lat,lon' pair."
                    .to_string(),
            ),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: self.config.server.name.clone(),
                version: self.config.server.version.clone(),
                ..Implementation::from_build_env()
            },
            ..Default::default()
        }
    }
}
