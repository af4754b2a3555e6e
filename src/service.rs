use anyhow::Result;
use rmcp::{
    handler::server::{tool::ToolRouter, wrapper::Parameters, ServerHandler},
    model::{
        CallToolResult, Content, Implementation, ListResourceTemplatesResult,
        ListResourcesResult, PaginatedRequestParam, ProtocolVersion, ReadResourceRequestParam,
        ReadResourceResult, ResourceContents, ServerCapabilities, ServerInfo,
    },
    service::RequestContext,
    tool, tool_handler, tool_router, ErrorData as McpError, RoleServer,
};
use serde_json::json;
use std::sync::Arc;

use crate::client::NwsClient;
use crate::config::ClientConfig;
use crate::constants::SERVER_NAME;
use crate::formatters::format_alerts_reply;
use crate::models::{AlertsResponse, GetAlertsRequest, RegionCode};
use crate::registry::{check_tools, ResourceRegistry};
use crate::resources;

/// Tools this server is expected to route
const TOOLS: &[&str] = &["get_alerts"];

/// Main weather service that handles MCP requests
#[derive(Clone)]
pub struct Weather {
    client: NwsClient,
    resources: Arc<ResourceRegistry>,
    tool_router: ToolRouter<Self>,
}

impl Weather {
    /// Creates a new Weather service against the public NWS API
    pub fn new() -> Result<Self> {
        Self::with_config(ClientConfig::default())
    }

    /// Creates a Weather service, checking every published entry point
    pub fn with_config(config: ClientConfig) -> Result<Self> {
        let client = NwsClient::new(&config)?;
        let tool_router = Self::tool_router();

        let routed: Vec<String> = tool_router
            .list_all()
            .into_iter()
            .map(|tool| tool.name.to_string())
            .collect();
        check_tools(TOOLS, &routed)?;

        let resources = resources::registry()?;

        Ok(Self {
            client,
            resources: Arc::new(resources),
            tool_router,
        })
    }

    /// Fetches and formats active alerts for a state; never fails
    pub async fn alerts_for(&self, state: &str) -> String {
        let region = RegionCode::new(state);
        let url = self.client.alerts_url(&region);
        tracing::debug!("Getting alerts for {} from {}", region, url);

        // Fetch failures are already logged by the client
        let response = match self.client.fetch(&url).await {
            Ok(body) => match AlertsResponse::from_json(body) {
                Ok(alerts) => Some(alerts),
                Err(e) => {
                    tracing::warn!("Unusable alerts payload for {}: {}", region, e);
                    None
                }
            },
            Err(_) => None,
        };

        format_alerts_reply(response)
    }

    /// Reads a resource by URI through the registry
    pub fn read(&self, uri: &str) -> Result<ReadResourceResult, McpError> {
        match self.resources.resolve(uri) {
            Some(text) => Ok(ReadResourceResult {
                contents: vec![ResourceContents::text(text, uri)],
            }),
            None => Err(McpError::resource_not_found(
                format!("Unknown resource: {}", uri),
                Some(json!({ "uri": uri })),
            )),
        }
    }
}

#[tool_handler]
impl ServerHandler for Weather {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2024_11_05,
            capabilities: ServerCapabilities::builder()
                .enable_tools()
                .enable_resources()
                .build(),
            server_info: Implementation {
                name: SERVER_NAME.to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
                icons: None,
                title: None,
                website_url: None,
            },
            instructions: Some(
                "Active weather alerts for US states from the National Weather Service API, \
                plus a static config resource and an echo resource."
                    .to_string(),
            ),
        }
    }

    async fn list_resources(
        &self,
        _request: Option<PaginatedRequestParam>,
        _: RequestContext<RoleServer>,
    ) -> Result<ListResourcesResult, McpError> {
        Ok(ListResourcesResult {
            resources: self.resources.resources(),
            next_cursor: None,
        })
    }

    async fn list_resource_templates(
        &self,
        _request: Option<PaginatedRequestParam>,
        _: RequestContext<RoleServer>,
    ) -> Result<ListResourceTemplatesResult, McpError> {
        Ok(ListResourceTemplatesResult {
            resource_templates: self.resources.resource_templates(),
            next_cursor: None,
        })
    }

    async fn read_resource(
        &self,
        request: ReadResourceRequestParam,
        _: RequestContext<RoleServer>,
    ) -> Result<ReadResourceResult, McpError> {
        tracing::debug!("Reading resource {}", request.uri);
        self.read(&request.uri)
    }
}

#[tool_router]
impl Weather {
    /// Gets active weather alerts for a US state
    #[tool(description = "Get weather alerts for a specific state. Provide a two-letter state code (e.g., 'CA' for California, 'NY' for New York).")]
    async fn get_alerts(
        &self,
        Parameters(request): Parameters<GetAlertsRequest>,
    ) -> Result<CallToolResult, McpError> {
        let formatted = self.alerts_for(&request.state).await;

        Ok(CallToolResult::success(vec![Content::text(formatted)]))
    }
}
