//! CLI output must match the core Display implementations that the MCP tools
//! return, so both interfaces show the same text.

use std::process::Command;

use shopfloor_core::{
    display::{History, Products},
    params::{Id, ListProducts},
    Workshop, WorkshopBuilder,
};
use tempfile::TempDir;

async fn create_test_workshop() -> (Workshop, TempDir) {
    let temp_dir = TempDir::new().expect("Failed to create temporary directory");
    let workshop = WorkshopBuilder::new()
        .with_database_path(Some(temp_dir.path().join("test.db")))
        .build()
        .await
        .expect("Failed to create workshop");
    (workshop, temp_dir)
}

fn run_cli_command(workshop: &Workshop, args: &[&str]) -> String {
    let output = Command::new(env!("CARGO_BIN_EXE_sf"))
        .arg("--no-color")
        .arg("--database-file")
        .arg(workshop.database_path())
        .args(args)
        .output()
        .expect("Failed to run CLI command");
    assert!(output.status.success(), "sf {args:?} failed");
    String::from_utf8(output.stdout).expect("Invalid UTF-8 in CLI output")
}

#[tokio::test]
async fn test_show_product_matches_display() {
    let (workshop, _temp_dir) = create_test_workshop().await;
    run_cli_command(&workshop, &["product", "create", "Lamp", "-s", "wire", "-s", "test"]);
    run_cli_command(&workshop, &["step", "complete", "1"]);

    let cli_output = run_cli_command(&workshop, &["product", "show", "1"]);
    let product = workshop.get_product(&Id { id: 1 }).await.unwrap();

    assert_eq!(cli_output, product.to_string());
}

#[tokio::test]
async fn test_list_products_matches_display() {
    let (workshop, _temp_dir) = create_test_workshop().await;
    run_cli_command(&workshop, &["product", "create", "Lamp", "-d", "Desk lamp"]);
    run_cli_command(&workshop, &["product", "create", "Stool", "--invoice"]);

    let cli_output = run_cli_command(&workshop, &["product", "list"]);
    let products: Products = workshop
        .list_products(&ListProducts::default())
        .await
        .unwrap();

    assert_eq!(cli_output, format!("# Products\n\n{products}"));
}

#[tokio::test]
async fn test_history_matches_display() {
    let (workshop, _temp_dir) = create_test_workshop().await;
    run_cli_command(&workshop, &["product", "create", "Lamp", "-s", "wire"]);
    run_cli_command(&workshop, &["step", "complete", "1"]);

    let cli_output = run_cli_command(&workshop, &["history"]);
    let history: History = workshop.list_history().await.unwrap();

    assert_eq!(history.len(), 1);
    assert_eq!(cli_output, format!("# Finalized products\n\n{history}"));
}
