use jiff::Timestamp;

use crate::{
    display::{CreateResult, DeleteResult, History, Products, Steps, UpdateResult},
    lifecycle::{Cascade, CascadeOutcome},
    models::{HistoryEntry, Product, ProductStatus, Step, StepStatus},
};

fn step(id: u64, name: &str, status: StepStatus) -> Step {
    Step {
        id,
        product_id: 10,
        name: name.to_string(),
        status,
    }
}

fn product() -> Product {
    Product {
        id: 10,
        name: "Dining chair".to_string(),
        description: "Beech frame".to_string(),
        has_invoice: false,
        status: ProductStatus::Pending,
        registered_at: Timestamp::from_second(1_640_995_200).unwrap(),
        steps: vec![
            step(1, "cut", StepStatus::Done),
            step(2, "assemble", StepStatus::InProgress),
            step(3, "finish", StepStatus::Pending),
        ],
    }
}

#[test]
fn test_product_progress_helpers() {
    let product = product();
    assert_eq!(product.completed_steps(), 1);
    assert_eq!(product.active_step().map(|s| s.id), Some(2));

    let empty = Product {
        steps: vec![],
        ..product
    };
    assert_eq!(empty.completed_steps(), 0);
    assert!(empty.active_step().is_none());
}

#[test]
fn test_status_parsing_round_trips_storage_strings() {
    for status in [StepStatus::Pending, StepStatus::InProgress, StepStatus::Done] {
        assert_eq!(status.as_str().parse::<StepStatus>().unwrap(), status);
    }
    for status in [ProductStatus::Pending, ProductStatus::Finalized] {
        assert_eq!(status.as_str().parse::<ProductStatus>().unwrap(), status);
    }
    assert_eq!("In-Progress".parse::<StepStatus>().unwrap(), StepStatus::InProgress);
    assert!("completed".parse::<StepStatus>().is_err());
    assert!("archived".parse::<ProductStatus>().is_err());
}

#[test]
fn test_statuses_serialize_as_storage_strings() {
    assert_eq!(
        serde_json::to_string(&StepStatus::InProgress).unwrap(),
        "\"in_progress\""
    );
    assert_eq!(
        serde_json::to_string(&ProductStatus::Finalized).unwrap(),
        "\"finalized\""
    );
    assert!(!StepStatus::Done.is_unfinished());
    assert!(StepStatus::InProgress.is_unfinished());
}

#[test]
fn test_product_display() {
    let output = product().to_string();

    assert!(output.starts_with("# 10. Dining chair"));
    assert!(output.contains("- Status: pending"));
    assert!(output.contains("- Invoice: not issued"));
    assert!(output.contains("- Progress: 1/3 steps done"));
    assert!(output.contains("Beech frame"));
    assert!(output.contains("## Steps"));
    assert!(output.contains("- 2. assemble (➤ In Progress)"));
}

#[test]
fn test_product_without_steps_display() {
    let output = Product {
        steps: vec![],
        description: String::new(),
        ..product()
    }
    .to_string();

    assert!(output.contains("No steps for this product."));
    assert!(!output.contains("Progress"));
}

#[test]
fn test_product_deserializes_with_defaults() {
    let product: Product = serde_json::from_str(
        r#"{"id": 1, "name": "Stool", "registered_at": "2024-01-01T00:00:00Z"}"#,
    )
    .unwrap();

    assert_eq!(product.description, "");
    assert!(!product.has_invoice);
    assert_eq!(product.status, ProductStatus::Pending);
    assert!(product.steps.is_empty());
}

#[test]
fn test_collection_displays() {
    let products = Products(vec![product()]);
    let output = products.to_string();
    assert!(output.contains("## Dining chair (ID: 10) (1/3)"));
    assert!(output.contains("- **Current step**: assemble"));
    assert_eq!(products.len(), 1);

    let steps = Steps(product().steps);
    assert_eq!(steps.iter().count(), 3);
    assert!(steps.to_string().contains("- 3. finish (○ Pending)"));
    assert_eq!(Steps(vec![]).to_string(), "No steps found.\n");

    let history = History(vec![HistoryEntry {
        id: 1,
        product_id: 10,
        name: "Dining chair".to_string(),
        description: String::new(),
        registered_at: Timestamp::from_second(1_640_995_200).unwrap(),
        finalized_at: Timestamp::from_second(1_641_081_600).unwrap(),
    }]);
    assert!(history.to_string().contains("## Dining chair (product 10)"));
    assert_eq!(History(vec![]).to_string(), "No finalized products yet.\n");
}

#[test]
fn test_result_wrappers() {
    let created = CreateResult::new(product()).to_string();
    assert!(created.starts_with("Created product with ID: 10"));

    let updated = UpdateResult::with_changes(
        step(2, "assemble", StepStatus::Done),
        vec!["Status set to done".to_string()],
    )
    .to_string();
    assert!(updated.contains("Updated step with ID: 2"));
    assert!(updated.contains("- Status set to done"));

    let deleted = DeleteResult::new(product()).to_string();
    assert_eq!(deleted, "Deleted product 'Dining chair' (ID: 10) and 3 step(s)\n");
}

#[test]
fn test_cascade_display_and_serialization() {
    let cascade = Cascade {
        step_id: 1,
        product_id: 10,
        outcome: CascadeOutcome::Advanced { next_step_id: 2 },
    };

    let output = cascade.to_string();
    assert!(output.starts_with("Step completed. Next step started."));
    assert!(output.contains("- Next step: 2"));

    assert_eq!(
        serde_json::to_value(cascade).unwrap(),
        serde_json::json!({
            "step_id": 1,
            "product_id": 10,
            "outcome": "advanced",
            "next_step_id": 2
        })
    );
}
