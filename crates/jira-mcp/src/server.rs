//! MCP server surface and transports.
//!
//! [`JiraMcpServer`] implements the rmcp handler over the static catalog
//! and the dispatcher. The two entry points differ only in how call
//! descriptors arrive: newline-framed stdio, or streamable HTTP hosted by
//! axum. Both run the same Config -> Client -> Dispatcher composition.

use crate::catalog;
use crate::dispatch::Dispatcher;
use jira_api::IssueTracker;
use rmcp::handler::server::ServerHandler;
use rmcp::model::{
    CallToolRequestParam, CallToolResult, Implementation, ListToolsResult, PaginatedRequestParam,
    ProtocolVersion, ServerCapabilities, ServerInfo, Tool,
};
use rmcp::service::{RequestContext, RoleServer};
use rmcp::transport::streamable_http_server::session::local::LocalSessionManager;
use rmcp::transport::streamable_http_server::{StreamableHttpServerConfig, StreamableHttpService};
use rmcp::{ErrorData as McpError, ServiceExt};
use std::net::SocketAddr;
use std::sync::Arc;

/// The Jira MCP server.
#[derive(Clone)]
pub struct JiraMcpServer {
    dispatcher: Arc<Dispatcher>,
}

impl JiraMcpServer {
    /// Create a server over the given issue tracker.
    #[must_use]
    pub fn new(tracker: Arc<dyn IssueTracker>) -> Self {
        Self {
            dispatcher: Arc::new(Dispatcher::new(tracker)),
        }
    }

    /// Serve over stdio until the client disconnects.
    ///
    /// # Errors
    ///
    /// Returns an error if the transport fails to start or shuts down
    /// abnormally.
    pub async fn run_stdio(self) -> anyhow::Result<()> {
        let service = self.serve(rmcp::transport::stdio()).await?;
        service.waiting().await?;
        Ok(())
    }

    /// Serve over streamable HTTP, mounted at `/mcp`, until the process
    /// is stopped.
    ///
    /// Each session gets a clone of the server; all clones share the same
    /// tracker and its connection pool.
    ///
    /// # Errors
    ///
    /// Returns an error if the address cannot be bound or the HTTP server
    /// fails.
    pub async fn run_http(self, addr: SocketAddr) -> anyhow::Result<()> {
        let handler = self;
        let service = StreamableHttpService::new(
            move || -> Result<JiraMcpServer, std::io::Error> { Ok(handler.clone()) },
            LocalSessionManager::default().into(),
            StreamableHttpServerConfig::default(),
        );

        let router = axum::Router::new().nest_service("/mcp", service);
        let listener = tokio::net::TcpListener::bind(addr).await?;
        axum::serve(listener, router).await?;
        Ok(())
    }
}

impl ServerHandler for JiraMcpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2024_11_05,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: "jira-mcp".into(),
                version: env!("CARGO_PKG_VERSION").into(),
                title: None,
                icons: None,
                website_url: None,
            },
            instructions: Some(
                "Jira MCP server. Use search_issues with a JQL query to find issues, \
                 get_issue for details, update_issue to change fields, get_transitions \
                 and transition_issue to move issues through the workflow, get_users to \
                 look up account IDs, and assign_issue to set or clear the assignee."
                    .into(),
            ),
        }
    }

    async fn list_tools(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListToolsResult, McpError> {
        let tools = catalog::CATALOG
            .iter()
            .map(|def| Tool::new(def.name, def.description, Arc::new(def.input_schema())))
            .collect();

        Ok(ListToolsResult {
            next_cursor: None,
            tools,
        })
    }

    async fn call_tool(
        &self,
        request: CallToolRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, McpError> {
        let args = request.arguments.unwrap_or_default();
        self.dispatcher.dispatch(&request.name, &args).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn server_info_advertises_tools() {
        struct NoTracker;

        #[async_trait::async_trait]
        impl IssueTracker for NoTracker {
            async fn search(&self, _: &str) -> jira_api::Result<jira_api::models::SearchResult> {
                unimplemented!()
            }
            async fn issue(&self, _: &str) -> jira_api::Result<jira_api::models::Issue> {
                unimplemented!()
            }
            async fn update(
                &self,
                _: &str,
                _: serde_json::Map<String, serde_json::Value>,
            ) -> jira_api::Result<()> {
                unimplemented!()
            }
            async fn transitions(
                &self,
                _: &str,
            ) -> jira_api::Result<Vec<jira_api::models::Transition>> {
                unimplemented!()
            }
            async fn transition(&self, _: &str, _: &str, _: Option<&str>) -> jira_api::Result<()> {
                unimplemented!()
            }
            async fn users(&self, _: &str, _: u32) -> jira_api::Result<Vec<jira_api::models::User>> {
                unimplemented!()
            }
            async fn assign(&self, _: &str, _: Option<&str>) -> jira_api::Result<()> {
                unimplemented!()
            }
        }

        let server = JiraMcpServer::new(Arc::new(NoTracker));
        let info = server.get_info();
        assert_eq!(info.server_info.name, "jira-mcp");
        assert!(!info.server_info.version.is_empty());
        assert!(info.instructions.is_some());
    }
}
