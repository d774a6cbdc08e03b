//! MCP server implementation for Shopfloor
//!
//! Exposes every workshop operation as a Model Context Protocol tool over
//! stdio, so agents can register products, work through their steps and read
//! the finalization history.

use std::{future::Future, sync::Arc};

use anyhow::Result;
use log::{debug, error, info, warn};
use rmcp::{
    handler::server::{router::tool::ToolRouter, tool::Parameters},
    model::{Implementation, ProtocolVersion, ServerCapabilities, ServerInfo},
    tool, tool_handler, tool_router, ServerHandler,
};
use shopfloor_core::{Event, Workshop};
use tokio::{
    signal::unix::{signal, SignalKind},
    sync::broadcast::{self, error::RecvError},
};

pub mod errors;
pub mod handlers;

pub use handlers::{
    CreateProduct, Id, ListProducts, McpResult, SearchProducts, SetInvoice, StepCreate,
    UpdateProductStatus, UpdateStepStatus,
};

const INSTRUCTIONS: &str = r#"Shopfloor tracks products through an ordered list of manufacturing steps.

## Core Concepts
- **Products**: work items with a name, optional description, invoice flag and status (pending/finalized)
- **Steps**: ordered sub-tasks of a product, each pending, in_progress or done

## Lifecycle
Completing a step with `complete_step` marks it done and starts the lowest pending step of the same product. When no pending or in-progress steps remain, the product is finalized and recorded in the history. `update_step_status` sets a status directly and does not run this cascade.

## Tool Categories
- **Products**: create_product, list_products, show_product, search_products, update_product_status, set_invoice, delete_product
- **Steps**: add_step, list_steps, show_step, update_step_status, delete_step, complete_step
- **History**: list_history"#;

/// MCP server for Shopfloor
#[derive(Clone)]
pub struct ShopfloorMcpServer {
    workshop: Arc<Workshop>,
    tool_router: ToolRouter<Self>,
}

#[tool_router]
impl ShopfloorMcpServer {
    pub fn new(workshop: Workshop) -> Self {
        Self {
            workshop: Arc::new(workshop),
            tool_router: Self::tool_router(),
        }
    }

    fn handlers(&self) -> handlers::McpHandlers {
        handlers::McpHandlers::new(self.workshop.clone())
    }

    #[tool(
        name = "create_product",
        description = "Register a new product. Provide a name (required), optional description, has_invoice (default false) and an optional ordered list of steps as [{\"name\": ...}]. Steps are processed in the order given."
    )]
    async fn create_product(&self, params: Parameters<CreateProduct>) -> McpResult {
        self.handlers().create_product(params).await
    }

    #[tool(
        name = "list_products",
        description = "List products with their steps, newest first. Optionally filter by status ('pending' or 'finalized')."
    )]
    async fn list_products(&self, params: Parameters<ListProducts>) -> McpResult {
        self.handlers().list_products(params).await
    }

    #[tool(
        name = "show_product",
        description = "Show one product by ID with its status, invoice flag, progress and steps in processing order."
    )]
    async fn show_product(&self, params: Parameters<Id>) -> McpResult {
        self.handlers().show_product(params).await
    }

    #[tool(
        name = "search_products",
        description = "Find products whose name contains the query, ignoring case. Fails with not found when nothing matches."
    )]
    async fn search_products(&self, params: Parameters<SearchProducts>) -> McpResult {
        self.handlers().search_products(params).await
    }

    #[tool(
        name = "update_product_status",
        description = "Set a product's status directly to 'pending' or 'finalized'. Normally a product is finalized by completing its last step."
    )]
    async fn update_product_status(&self, params: Parameters<UpdateProductStatus>) -> McpResult {
        self.handlers().update_product_status(params).await
    }

    #[tool(
        name = "set_invoice",
        description = "Record whether an invoice has been issued for a product."
    )]
    async fn set_invoice(&self, params: Parameters<SetInvoice>) -> McpResult {
        self.handlers().set_invoice(params).await
    }

    #[tool(
        name = "delete_product",
        description = "Permanently delete a product and all of its steps. Finalization history is kept."
    )]
    async fn delete_product(&self, params: Parameters<Id>) -> McpResult {
        self.handlers().delete_product(params).await
    }

    #[tool(
        name = "add_step",
        description = "Append a pending step to an existing product. Requires product_id and name."
    )]
    async fn add_step(&self, params: Parameters<StepCreate>) -> McpResult {
        self.handlers().add_step(params).await
    }

    #[tool(
        name = "list_steps",
        description = "List the steps of a product (id = product ID) in processing order."
    )]
    async fn list_steps(&self, params: Parameters<Id>) -> McpResult {
        self.handlers().list_steps(params).await
    }

    #[tool(name = "show_step", description = "Show one step by ID.")]
    async fn show_step(&self, params: Parameters<Id>) -> McpResult {
        self.handlers().show_step(params).await
    }

    #[tool(
        name = "update_step_status",
        description = "Set a step's status directly to 'pending', 'in_progress' or 'done' without advancing the product. Use complete_step to move a product forward."
    )]
    async fn update_step_status(&self, params: Parameters<UpdateStepStatus>) -> McpResult {
        self.handlers().update_step_status(params).await
    }

    #[tool(name = "delete_step", description = "Permanently delete a step by ID.")]
    async fn delete_step(&self, params: Parameters<Id>) -> McpResult {
        self.handlers().delete_step(params).await
    }

    #[tool(
        name = "complete_step",
        description = "Complete a step: mark it done, start the next pending step of its product, or finalize the product when no work remains. Returns which of these happened."
    )]
    async fn complete_step(&self, params: Parameters<Id>) -> McpResult {
        self.handlers().complete_step(params).await
    }

    #[tool(
        name = "list_history",
        description = "List finalized products, most recently finalized first."
    )]
    async fn list_history(&self) -> McpResult {
        self.handlers().list_history().await
    }
}

#[tool_handler(router = self.tool_router)]
impl ServerHandler for ShopfloorMcpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2024_11_05,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: "shopfloor".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
            instructions: Some(INSTRUCTIONS.to_string()),
        }
    }
}

/// Logs workshop events until the channel closes.
pub async fn log_events(mut receiver: broadcast::Receiver<Event>) {
    loop {
        match receiver.recv().await {
            Ok(event) => info!("event {}: {}", event.name, event.payload),
            Err(RecvError::Lagged(skipped)) => warn!("Event log skipped {skipped} events"),
            Err(RecvError::Closed) => break,
        }
    }
}

/// Run the MCP server with stdio transport
pub async fn run_stdio_server(server: ShopfloorMcpServer) -> Result<()> {
    use rmcp::{transport::stdio, ServiceExt};

    info!("Starting Shopfloor MCP server on stdio");
    debug!(
        "Server created with {} tools",
        server.tool_router.list_all().len()
    );

    let service = server.serve(stdio()).await.inspect_err(|e| {
        error!("serving error: {e:?}");
    })?;

    let mut sigint = signal(SignalKind::interrupt())?;
    let mut sigterm = signal(SignalKind::terminate())?;

    tokio::select! {
        result = service.waiting() => {
            match result {
                Ok(_) => info!("MCP server stopped normally"),
                Err(e) => error!("MCP server error: {e:?}"),
            }
        }
        _ = sigint.recv() => {
            info!("Received SIGINT, shutting down");
        }
        _ = sigterm.recv() => {
            info!("Received SIGTERM, shutting down");
        }
    }

    info!("MCP server shutdown complete");
    Ok(())
}
