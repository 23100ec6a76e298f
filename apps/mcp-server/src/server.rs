use crate::tools::{self, ToolOutput};
use hyperliquid_sdk::ExchangeClient;
use rmcp::model::{
    CallToolRequestParam, CallToolResult, Implementation, ListToolsResult, PaginatedRequestParam,
    ServerCapabilities, ServerInfo,
};
use rmcp::service::RequestContext;
use rmcp::{ErrorData as McpError, RoleServer, ServerHandler};
use std::sync::Arc;

pub const SERVER_NAME: &str = "mcp-hyperliquid";

/// MCP tool server over one exchange client
#[derive(Clone)]
pub struct HyperliquidServer {
    client: Arc<ExchangeClient>,
}

impl HyperliquidServer {
    pub fn new(client: ExchangeClient) -> Self {
        Self {
            client: Arc::new(client),
        }
    }

    pub fn client(&self) -> &ExchangeClient {
        &self.client
    }

    /// Run one tool call outside the MCP framing
    pub async fn call(&self, name: &str, args: serde_json::Value) -> ToolOutput {
        let args = match args {
            serde_json::Value::Object(map) => map,
            _ => Default::default(),
        };
        tools::dispatch(&self.client, name, &args).await
    }
}

impl ServerHandler for HyperliquidServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: SERVER_NAME.to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
                ..Default::default()
            },
            instructions: Some(format!(
                "Trade Hyperliquid perpetuals ({}) as wallet {}",
                self.client.network(),
                self.client.wallet_address()
            )),
            ..Default::default()
        }
    }

    async fn list_tools(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListToolsResult, McpError> {
        Ok(ListToolsResult::with_all_items(tools::definitions()))
    }

    async fn call_tool(
        &self,
        request: CallToolRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, McpError> {
        let args = request.arguments.unwrap_or_default();
        Ok(tools::dispatch(&self.client, &request.name, &args).await.into())
    }
}
