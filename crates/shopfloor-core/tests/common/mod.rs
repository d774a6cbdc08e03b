#![allow(dead_code)]

use shopfloor_core::{
    params::{CreateProduct, NewStep},
    Database, Workshop, WorkshopBuilder,
};
use tempfile::{NamedTempFile, TempDir};

/// Helper function to create a test workshop
pub async fn create_test_workshop() -> (TempDir, Workshop) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let db_path = temp_dir.path().join("test.db");
    let workshop = WorkshopBuilder::new()
        .with_database_path(Some(&db_path))
        .build()
        .await
        .expect("Failed to create workshop");
    (temp_dir, workshop)
}

/// Helper function to create a temporary database for testing
pub fn create_test_db() -> (NamedTempFile, Database) {
    let temp_file = NamedTempFile::new().expect("Failed to create temporary file");
    let db = Database::new(temp_file.path()).expect("Failed to create test database");
    (temp_file, db)
}

/// Creation parameters for a product with the given step names.
pub fn product_with_steps(name: &str, steps: &[&str]) -> CreateProduct {
    CreateProduct {
        name: name.to_string(),
        steps: steps
            .iter()
            .map(|s| NewStep {
                name: s.to_string(),
            })
            .collect(),
        ..Default::default()
    }
}
