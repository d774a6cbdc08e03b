//! Command-line handlers and argument wrappers.
//!
//! Each clap argument struct converts into its core parameter type through
//! `From`, so clap attributes never leak into `shopfloor_core::params`:
//!
//! ```text
//! User Input → CLI Args (clap) → Core Params → Workshop
//! ```
//!
//! Handlers return the markdown to print. Turning errors into messages and
//! exit codes happens once, in [`Cli::finish`].

use std::process::ExitCode;

use clap::{Args, Subcommand, ValueEnum};
use log::debug;
use shopfloor_core::{
    display::{CreateResult, DeleteResult, OperationStatus, UpdateResult},
    params::*,
    Outcome, Result, Workshop,
};

use crate::renderer::TerminalRenderer;

/// Create a new product
///
/// Steps given with --step are created together with the product, in the
/// order given, and are processed in that order.
#[derive(Args)]
pub struct CreateProductArgs {
    /// Name of the product
    pub name: String,
    /// Optional description of the product
    #[arg(short, long)]
    pub description: Option<String>,
    /// Mark the product as already invoiced
    #[arg(long)]
    pub invoice: bool,
    /// Step to create with the product (repeatable, in processing order)
    #[arg(short, long = "step", value_name = "NAME")]
    pub steps: Vec<String>,
}

impl From<CreateProductArgs> for CreateProduct {
    fn from(val: CreateProductArgs) -> Self {
        CreateProduct {
            name: val.name,
            description: val.description,
            has_invoice: val.invoice,
            steps: val.steps.into_iter().map(|name| NewStep { name }).collect(),
        }
    }
}

/// List products, newest first
#[derive(Args)]
pub struct ListProductsArgs {
    /// Only show products in this status
    #[arg(long, value_enum)]
    pub status: Option<ProductStatusArg>,
}

impl From<ListProductsArgs> for ListProducts {
    fn from(val: ListProductsArgs) -> Self {
        ListProducts {
            status: val.status.map(|s| s.to_string()),
        }
    }
}

/// Select a product or step by ID
#[derive(Args)]
pub struct IdArgs {
    /// Unique identifier
    pub id: u64,
}

impl From<IdArgs> for Id {
    fn from(val: IdArgs) -> Self {
        Id { id: val.id }
    }
}

/// Search products by name (case-insensitive)
#[derive(Args)]
pub struct SearchProductsArgs {
    /// Fragment of the product name
    pub query: String,
}

impl From<SearchProductsArgs> for SearchProducts {
    fn from(val: SearchProductsArgs) -> Self {
        SearchProducts { query: val.query }
    }
}

/// Set a product's status directly
#[derive(Args)]
pub struct ProductStatusArgs {
    /// ID of the product
    pub id: u64,
    /// New status
    #[arg(value_enum)]
    pub status: ProductStatusArg,
}

impl From<ProductStatusArgs> for UpdateProductStatus {
    fn from(val: ProductStatusArgs) -> Self {
        UpdateProductStatus {
            id: val.id,
            status: val.status.to_string(),
        }
    }
}

/// Record whether a product has been invoiced
#[derive(Args)]
pub struct InvoiceArgs {
    /// ID of the product
    pub id: u64,
    /// Clear the invoice flag instead of setting it
    #[arg(long)]
    pub clear: bool,
}

impl From<InvoiceArgs> for SetInvoice {
    fn from(val: InvoiceArgs) -> Self {
        SetInvoice {
            id: val.id,
            has_invoice: !val.clear,
        }
    }
}

#[derive(Subcommand)]
pub enum ProductCommands {
    /// Create a new product
    #[command(alias = "c")]
    Create(CreateProductArgs),
    /// List products
    #[command(aliases = ["l", "ls"])]
    List(ListProductsArgs),
    /// Show a product with its steps
    #[command(alias = "s")]
    Show(IdArgs),
    /// Search products by name
    #[command(alias = "f")]
    Search(SearchProductsArgs),
    /// Set a product's status directly
    Status(ProductStatusArgs),
    /// Record the invoice flag of a product
    #[command(alias = "i")]
    Invoice(InvoiceArgs),
    /// Delete a product and its steps permanently
    #[command(aliases = ["d", "rm"])]
    Delete(IdArgs),
}

/// Append a step to a product
#[derive(Args)]
pub struct AddStepArgs {
    /// ID of the product to add the step to
    pub product_id: u64,
    /// Name of the step
    pub name: String,
}

impl From<AddStepArgs> for StepCreate {
    fn from(val: AddStepArgs) -> Self {
        StepCreate {
            product_id: val.product_id,
            name: val.name,
        }
    }
}

/// Set a step's status without running the cascade
#[derive(Args)]
pub struct StepStatusArgs {
    /// ID of the step
    pub id: u64,
    /// New status
    #[arg(value_enum)]
    pub status: StepStatusArg,
}

impl From<StepStatusArgs> for UpdateStepStatus {
    fn from(val: StepStatusArgs) -> Self {
        UpdateStepStatus {
            id: val.id,
            status: val.status.to_string(),
        }
    }
}

#[derive(Subcommand)]
pub enum StepCommands {
    /// Append a step to a product
    #[command(alias = "a")]
    Add(AddStepArgs),
    /// List the steps of a product
    #[command(aliases = ["l", "ls"])]
    List(IdArgs),
    /// Show a single step
    #[command(alias = "s")]
    Show(IdArgs),
    /// Complete a step and advance its product
    #[command(alias = "c")]
    Complete(IdArgs),
    /// Set a step's status directly (no cascade)
    #[command(alias = "u")]
    Status(StepStatusArgs),
    /// Delete a step permanently
    #[command(aliases = ["d", "rm"])]
    Delete(IdArgs),
}

/// Product status values accepted on the command line
#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
pub enum ProductStatusArg {
    Pending,
    Finalized,
}

impl std::fmt::Display for ProductStatusArg {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProductStatusArg::Pending => write!(f, "pending"),
            ProductStatusArg::Finalized => write!(f, "finalized"),
        }
    }
}

/// Step status values accepted on the command line
#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
pub enum StepStatusArg {
    Pending,
    InProgress,
    Done,
}

impl std::fmt::Display for StepStatusArg {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StepStatusArg::Pending => write!(f, "pending"),
            StepStatusArg::InProgress => write!(f, "in_progress"),
            StepStatusArg::Done => write!(f, "done"),
        }
    }
}

/// Runs commands against a workshop and prints the results.
pub struct Cli {
    workshop: Workshop,
    renderer: TerminalRenderer,
}

impl Cli {
    pub fn new(workshop: Workshop, renderer: TerminalRenderer) -> Self {
        Self { workshop, renderer }
    }

    pub async fn handle_product_command(&self, command: ProductCommands) -> Result<String> {
        match command {
            ProductCommands::Create(args) => {
                let product = self.workshop.create_product(&args.into()).await?;
                Ok(CreateResult::new(product).to_string())
            }
            ProductCommands::List(args) => self.list_products(&args.into()).await,
            ProductCommands::Show(args) => {
                let product = self.workshop.get_product(&args.into()).await?;
                Ok(product.to_string())
            }
            ProductCommands::Search(args) => {
                let params: SearchProducts = args.into();
                let products = self.workshop.search_products(&params).await?;
                Ok(format!(
                    "# Products matching '{}'\n\n{products}",
                    params.query.trim()
                ))
            }
            ProductCommands::Status(args) => {
                let params: UpdateProductStatus = args.into();
                let product = self.workshop.update_product_status(&params).await?;
                let change = format!("Status set to {}", product.status);
                Ok(UpdateResult::with_changes(product, vec![change]).to_string())
            }
            ProductCommands::Invoice(args) => {
                let params: SetInvoice = args.into();
                let product = self.workshop.set_invoice(&params).await?;
                let message = if product.has_invoice {
                    format!("Invoice recorded for product {}", product.id)
                } else {
                    format!("Invoice cleared for product {}", product.id)
                };
                Ok(OperationStatus::success(message).to_string())
            }
            ProductCommands::Delete(args) => {
                let product = self.workshop.delete_product(&args.into()).await?;
                Ok(DeleteResult::new(product).to_string())
            }
        }
    }

    pub async fn handle_step_command(&self, command: StepCommands) -> Result<String> {
        match command {
            StepCommands::Add(args) => {
                let step = self.workshop.add_step(&args.into()).await?;
                Ok(CreateResult::new(step).to_string())
            }
            StepCommands::List(args) => {
                let params: Id = args.into();
                let steps = self.workshop.list_steps(&params).await?;
                Ok(format!("# Steps of product {}\n\n{steps}", params.id))
            }
            StepCommands::Show(args) => {
                let step = self.workshop.get_step(&args.into()).await?;
                Ok(step.to_string())
            }
            StepCommands::Complete(args) => {
                let cascade = self.workshop.complete_step(&args.into()).await?;
                Ok(cascade.to_string())
            }
            StepCommands::Status(args) => {
                let step = self.workshop.update_step_status(&args.into()).await?;
                let change = format!("Status set to {}", step.status);
                Ok(UpdateResult::with_changes(step, vec![change]).to_string())
            }
            StepCommands::Delete(args) => {
                let step = self.workshop.remove_step(&args.into()).await?;
                Ok(DeleteResult::new(step).to_string())
            }
        }
    }

    pub async fn list_products(&self, params: &ListProducts) -> Result<String> {
        let products = self.workshop.list_products(params).await?;
        let title = match params.status.as_deref() {
            Some(status) => format!("Products ({status})"),
            None => "Products".to_string(),
        };
        Ok(format!("# {title}\n\n{products}"))
    }

    pub async fn history(&self) -> Result<String> {
        let history = self.workshop.list_history().await?;
        Ok(format!("# Finalized products\n\n{history}"))
    }

    /// Prints the result of a command and picks the process exit code.
    pub fn finish(&self, result: Result<String>) -> anyhow::Result<ExitCode> {
        let outcome = Outcome::from(result);
        debug!("Command finished: ok={}", outcome.is_ok());

        match outcome {
            Outcome::Ok { value } => {
                self.renderer.render(&value)?;
                Ok(ExitCode::SUCCESS)
            }
            ref failure => {
                eprintln!("Error: {}", failure.message().unwrap_or_default());
                Ok(exit_code(failure))
            }
        }
    }
}

/// 2 for rejected input, 3 for missing entities, 1 for everything else.
pub fn exit_code<T>(outcome: &Outcome<T>) -> ExitCode {
    match outcome {
        Outcome::Ok { .. } => ExitCode::SUCCESS,
        Outcome::ValidationError { .. } => ExitCode::from(2),
        Outcome::NotFoundError { .. } => ExitCode::from(3),
        Outcome::StorageError { .. } | Outcome::ConsistencyFault { .. } => ExitCode::FAILURE,
    }
}

#[cfg(test)]
mod tests {
    use clap::Parser;
    use shopfloor_core::ShopError;

    use super::*;
    use crate::args::{Args, Commands};

    #[test]
    fn test_create_args_convert_with_steps_in_order() {
        let args = Args::parse_from([
            "sf", "product", "create", "Table", "-s", "cut", "--step", "sand", "--invoice",
        ]);
        let Some(Commands::Product {
            command: ProductCommands::Create(create),
        }) = args.command
        else {
            panic!("Expected product create command");
        };

        let params: CreateProduct = create.into();
        assert_eq!(params.name, "Table");
        assert!(params.has_invoice);
        assert_eq!(
            params.steps.iter().map(|s| s.name.as_str()).collect::<Vec<_>>(),
            vec!["cut", "sand"]
        );
    }

    #[test]
    fn test_status_args_use_storage_strings() {
        let params: UpdateStepStatus = StepStatusArgs {
            id: 3,
            status: StepStatusArg::InProgress,
        }
        .into();
        assert_eq!(params.status, "in_progress");
        assert!(params.validate().is_ok());

        let params: SetInvoice = InvoiceArgs { id: 1, clear: true }.into();
        assert!(!params.has_invoice);
    }

    #[test]
    fn test_exit_codes_follow_error_kind() {
        let validation: Outcome<()> =
            Err(ShopError::invalid_input("name").with_reason("Name is required")).into();
        let missing: Outcome<()> = Err(ShopError::ProductNotFound { id: 1 }).into();
        let fault: Outcome<()> = Err(ShopError::consistency("orphan")).into();

        assert_eq!(exit_code(&validation), ExitCode::from(2));
        assert_eq!(exit_code(&missing), ExitCode::from(3));
        assert_eq!(exit_code(&fault), ExitCode::FAILURE);
        assert_eq!(exit_code(&Outcome::Ok { value: () }), ExitCode::SUCCESS);
    }
}
