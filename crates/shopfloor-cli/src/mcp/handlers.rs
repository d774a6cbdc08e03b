//! MCP tool handlers implementation

use std::sync::Arc;

use log::debug;
use rmcp::{
    handler::server::tool::Parameters,
    model::{CallToolResult, Content},
    ErrorData,
};
use schemars::JsonSchema;
use serde::Deserialize;
use shopfloor_core::{
    display::{CreateResult, DeleteResult, UpdateResult},
    params as core, Workshop,
};

use super::errors::to_mcp_error;

/// Transparent wrapper adding MCP deserialization and a JSON schema to a
/// core parameter type.
#[derive(Debug, Deserialize)]
#[serde(transparent)]
pub struct McpParams<T>(T)
where
    T: JsonSchema;

impl<T> JsonSchema for McpParams<T>
where
    T: JsonSchema,
{
    fn schema_name() -> std::borrow::Cow<'static, str> {
        T::schema_name()
    }

    fn json_schema(g: &mut schemars::SchemaGenerator) -> schemars::Schema {
        T::json_schema(g)
    }
}

impl<T> AsRef<T> for McpParams<T>
where
    T: JsonSchema,
{
    fn as_ref(&self) -> &T {
        &self.0
    }
}

pub type Id = McpParams<core::Id>;
pub type CreateProduct = McpParams<core::CreateProduct>;
pub type ListProducts = McpParams<core::ListProducts>;
pub type SearchProducts = McpParams<core::SearchProducts>;
pub type UpdateProductStatus = McpParams<core::UpdateProductStatus>;
pub type SetInvoice = McpParams<core::SetInvoice>;
pub type StepCreate = McpParams<core::StepCreate>;
pub type UpdateStepStatus = McpParams<core::UpdateStepStatus>;

pub type McpResult = Result<CallToolResult, ErrorData>;

fn text(body: impl Into<String>) -> McpResult {
    Ok(CallToolResult::success(vec![Content::text(body.into())]))
}

/// Handler implementations for the MCP server
pub struct McpHandlers {
    workshop: Arc<Workshop>,
}

impl McpHandlers {
    pub fn new(workshop: Arc<Workshop>) -> Self {
        Self { workshop }
    }

    pub async fn create_product(&self, Parameters(params): Parameters<CreateProduct>) -> McpResult {
        debug!("create_product: {params:?}");

        let product = self
            .workshop
            .create_product(params.as_ref())
            .await
            .map_err(|e| to_mcp_error("Failed to create product", &e))?;

        text(CreateResult::new(product).to_string())
    }

    pub async fn list_products(&self, Parameters(params): Parameters<ListProducts>) -> McpResult {
        debug!("list_products: {params:?}");

        let products = self
            .workshop
            .list_products(params.as_ref())
            .await
            .map_err(|e| to_mcp_error("Failed to list products", &e))?;

        let title = match params.as_ref().status.as_deref() {
            Some(status) => format!("Products ({})", status.trim().to_lowercase()),
            None => "Products".to_string(),
        };
        text(format!("# {title}\n\n{products}"))
    }

    pub async fn show_product(&self, Parameters(params): Parameters<Id>) -> McpResult {
        debug!("show_product: {params:?}");

        let product = self
            .workshop
            .get_product(params.as_ref())
            .await
            .map_err(|e| to_mcp_error("Failed to get product", &e))?;

        text(product.to_string())
    }

    pub async fn search_products(&self, Parameters(params): Parameters<SearchProducts>) -> McpResult {
        debug!("search_products: {params:?}");

        let products = self
            .workshop
            .search_products(params.as_ref())
            .await
            .map_err(|e| to_mcp_error("Failed to search products", &e))?;

        text(format!(
            "# Products matching '{}'\n\n{products}",
            params.as_ref().query.trim()
        ))
    }

    pub async fn update_product_status(
        &self,
        Parameters(params): Parameters<UpdateProductStatus>,
    ) -> McpResult {
        debug!("update_product_status: {params:?}");

        let product = self
            .workshop
            .update_product_status(params.as_ref())
            .await
            .map_err(|e| to_mcp_error("Failed to update product status", &e))?;

        let change = format!("Status set to {}", product.status);
        text(UpdateResult::with_changes(product, vec![change]).to_string())
    }

    pub async fn set_invoice(&self, Parameters(params): Parameters<SetInvoice>) -> McpResult {
        debug!("set_invoice: {params:?}");

        let product = self
            .workshop
            .set_invoice(params.as_ref())
            .await
            .map_err(|e| to_mcp_error("Failed to set invoice", &e))?;

        let change = if product.has_invoice {
            "Invoice recorded".to_string()
        } else {
            "Invoice cleared".to_string()
        };
        text(UpdateResult::with_changes(product, vec![change]).to_string())
    }

    pub async fn delete_product(&self, Parameters(params): Parameters<Id>) -> McpResult {
        debug!("delete_product: {params:?}");

        let product = self
            .workshop
            .delete_product(params.as_ref())
            .await
            .map_err(|e| to_mcp_error("Failed to delete product", &e))?;

        text(DeleteResult::new(product).to_string())
    }

    pub async fn add_step(&self, Parameters(params): Parameters<StepCreate>) -> McpResult {
        debug!("add_step: {params:?}");

        let step = self
            .workshop
            .add_step(params.as_ref())
            .await
            .map_err(|e| to_mcp_error("Failed to add step", &e))?;

        text(CreateResult::new(step).to_string())
    }

    pub async fn list_steps(&self, Parameters(params): Parameters<Id>) -> McpResult {
        debug!("list_steps: {params:?}");

        let steps = self
            .workshop
            .list_steps(params.as_ref())
            .await
            .map_err(|e| to_mcp_error("Failed to list steps", &e))?;

        text(format!("# Steps of product {}\n\n{steps}", params.as_ref().id))
    }

    pub async fn show_step(&self, Parameters(params): Parameters<Id>) -> McpResult {
        debug!("show_step: {params:?}");

        let step = self
            .workshop
            .get_step(params.as_ref())
            .await
            .map_err(|e| to_mcp_error("Failed to get step", &e))?;

        text(step.to_string())
    }

    pub async fn update_step_status(
        &self,
        Parameters(params): Parameters<UpdateStepStatus>,
    ) -> McpResult {
        debug!("update_step_status: {params:?}");

        let step = self
            .workshop
            .update_step_status(params.as_ref())
            .await
            .map_err(|e| to_mcp_error("Failed to update step status", &e))?;

        let change = format!("Status set to {}", step.status);
        text(UpdateResult::with_changes(step, vec![change]).to_string())
    }

    pub async fn delete_step(&self, Parameters(params): Parameters<Id>) -> McpResult {
        debug!("delete_step: {params:?}");

        let step = self
            .workshop
            .remove_step(params.as_ref())
            .await
            .map_err(|e| to_mcp_error("Failed to delete step", &e))?;

        text(DeleteResult::new(step).to_string())
    }

    pub async fn complete_step(&self, Parameters(params): Parameters<Id>) -> McpResult {
        debug!("complete_step: {params:?}");

        let cascade = self
            .workshop
            .complete_step(params.as_ref())
            .await
            .map_err(|e| to_mcp_error("Failed to complete step", &e))?;

        text(cascade.to_string())
    }

    pub async fn list_history(&self) -> McpResult {
        debug!("list_history");

        let history = self
            .workshop
            .list_history()
            .await
            .map_err(|e| to_mcp_error("Failed to list history", &e))?;

        text(format!("# Finalized products\n\n{history}"))
    }
}

#[cfg(test)]
mod tests {
    use rmcp::model::ErrorCode;
    use shopfloor_core::WorkshopBuilder;
    use tempfile::TempDir;

    use super::*;

    async fn handlers() -> (McpHandlers, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let workshop = WorkshopBuilder::new()
            .with_database_path(Some(temp_dir.path().join("mcp.db")))
            .build()
            .await
            .unwrap();
        (McpHandlers::new(Arc::new(workshop)), temp_dir)
    }

    fn body(result: CallToolResult) -> String {
        serde_json::to_string(&result).unwrap()
    }

    fn params<T>(json: serde_json::Value) -> Parameters<McpParams<T>>
    where
        T: JsonSchema + serde::de::DeserializeOwned,
    {
        Parameters(serde_json::from_value(json).unwrap())
    }

    #[tokio::test]
    async fn test_create_and_complete_through_tools() {
        let (handlers, _temp_dir) = handlers().await;

        let created = handlers
            .create_product(params(serde_json::json!({
                "name": "Stool",
                "steps": [{"name": "cut"}, {"name": "glue"}]
            })))
            .await
            .unwrap();
        assert!(body(created).contains("Stool"));

        let first = handlers
            .complete_step(params(serde_json::json!({"id": 1})))
            .await
            .unwrap();
        assert!(body(first).contains("Next step started"));

        let second = handlers
            .complete_step(params(serde_json::json!({"id": 2})))
            .await
            .unwrap();
        assert!(body(second).contains("Product finalized"));

        let history = body(handlers.list_history().await.unwrap());
        assert!(history.contains("Stool"));
    }

    #[tokio::test]
    async fn test_errors_map_to_protocol_codes() {
        let (handlers, _temp_dir) = handlers().await;

        let missing = handlers
            .complete_step(params(serde_json::json!({"id": 99})))
            .await
            .unwrap_err();
        assert_eq!(missing.code, ErrorCode::RESOURCE_NOT_FOUND);

        let invalid = handlers
            .create_product(params(serde_json::json!({"name": "  "})))
            .await
            .unwrap_err();
        assert_eq!(invalid.code, ErrorCode::INVALID_PARAMS);

        let bad_status = handlers
            .update_step_status(params(serde_json::json!({"id": 1, "status": "shipped"})))
            .await
            .unwrap_err();
        assert_eq!(bad_status.code, ErrorCode::INVALID_PARAMS);
    }
}
