//! End-to-end lifecycle behavior through the public API.

mod common;

use common::{create_test_db, create_test_workshop, product_with_steps};
use shopfloor_core::{
    params::{Id, StepCreate},
    CascadeOutcome, Database, Product, ProductStatus, ShopError, StepStatus,
};

fn snapshot(db: &Database, product_id: u64) -> Product {
    db.get_product(product_id)
        .expect("Failed to read product")
        .expect("Product should exist")
}

fn step_statuses(db: &Database, product_id: u64) -> Vec<StepStatus> {
    snapshot(db, product_id)
        .steps
        .into_iter()
        .map(|s| s.status)
        .collect()
}

fn assert_single_active_step(product: &Product) {
    let active = product
        .steps
        .iter()
        .filter(|s| s.status == StepStatus::InProgress)
        .count();
    assert!(active <= 1, "product {} has {active} active steps", product.id);
}

#[tokio::test]
async fn test_completing_steps_in_order_finalizes_product() {
    let (_temp_dir, workshop) = create_test_workshop().await;
    let product = workshop
        .create_product(&product_with_steps("Chest", &["cut", "drill", "paint"]))
        .await
        .unwrap();
    let ids: Vec<u64> = product.steps.iter().map(|s| s.id).collect();
    assert!(product
        .steps
        .iter()
        .all(|s| s.status == StepStatus::Pending));

    // first step done, second started
    let cascade = workshop.complete_step(&Id { id: ids[0] }).await.unwrap();
    assert_eq!(
        cascade.outcome,
        CascadeOutcome::Advanced {
            next_step_id: ids[1]
        }
    );
    let current = workshop.get_product(&Id { id: product.id }).await.unwrap();
    assert_eq!(
        current.steps.iter().map(|s| s.status).collect::<Vec<_>>(),
        vec![StepStatus::Done, StepStatus::InProgress, StepStatus::Pending]
    );
    assert_eq!(current.status, ProductStatus::Pending);

    // second done, third started
    let cascade = workshop.complete_step(&Id { id: ids[1] }).await.unwrap();
    assert_eq!(
        cascade.outcome,
        CascadeOutcome::Advanced {
            next_step_id: ids[2]
        }
    );
    let current = workshop.get_product(&Id { id: product.id }).await.unwrap();
    assert_eq!(
        current.steps.iter().map(|s| s.status).collect::<Vec<_>>(),
        vec![StepStatus::Done, StepStatus::Done, StepStatus::InProgress]
    );
    assert_eq!(current.status, ProductStatus::Pending);

    // last step done
    let cascade = workshop.complete_step(&Id { id: ids[2] }).await.unwrap();
    assert_eq!(cascade.outcome, CascadeOutcome::Finalized);
    assert_eq!(cascade.message(), "Step completed. Product finalized.");
    let current = workshop.get_product(&Id { id: product.id }).await.unwrap();
    assert!(current.steps.iter().all(|s| s.status == StepStatus::Done));
    assert_eq!(current.status, ProductStatus::Finalized);
}

#[tokio::test]
async fn test_product_without_steps_stays_pending() {
    let (_temp_dir, workshop) = create_test_workshop().await;
    let product = workshop
        .create_product(&product_with_steps("Empty crate", &[]))
        .await
        .unwrap();

    let fetched = workshop.get_product(&Id { id: product.id }).await.unwrap();
    assert_eq!(fetched.status, ProductStatus::Pending);
    assert!(fetched.steps.is_empty());
    assert!(workshop.list_history().await.unwrap().is_empty());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_concurrent_completions_are_serialized() {
    for _ in 0..10 {
        let (_temp_dir, workshop) = create_test_workshop().await;
        let product = workshop
            .create_product(&product_with_steps("Race", &["s1", "s2", "s3"]))
            .await
            .unwrap();
        let ids: Vec<u64> = product.steps.iter().map(|s| s.id).collect();

        let (id0, id1) = (Id { id: ids[0] }, Id { id: ids[1] });
        let (first, second) = tokio::join!(
            workshop.complete_step(&id0),
            workshop.complete_step(&id1),
        );
        first.unwrap();
        second.unwrap();

        let current = workshop.get_product(&Id { id: product.id }).await.unwrap();
        assert_single_active_step(&current);
        assert_eq!(
            current.steps.iter().map(|s| s.status).collect::<Vec<_>>(),
            vec![StepStatus::Done, StepStatus::Done, StepStatus::InProgress]
        );
        assert_eq!(current.status, ProductStatus::Pending);
    }
}

#[test]
fn test_lifecycle_rules_hold_for_every_completion_order() {
    let orders: [[usize; 4]; 6] = [
        [0, 1, 2, 3],
        [3, 2, 1, 0],
        [1, 0, 3, 2],
        [2, 0, 3, 1],
        [0, 3, 1, 2],
        [3, 0, 2, 1],
    ];

    for order in orders {
        let (_temp_file, mut db) = create_test_db();
        let names = ["a", "b", "c", "d"].map(String::from);
        let product = db.create_product("Sofa", "", false, &names).unwrap();
        let ids: Vec<u64> = product.steps.iter().map(|s| s.id).collect();

        for (position, &index) in order.iter().enumerate() {
            let before = snapshot(&db, product.id);
            let lowest_pending = before
                .steps
                .iter()
                .filter(|s| s.status == StepStatus::Pending && s.id != ids[index])
                .map(|s| s.id)
                .min();

            let cascade = db.complete_step(ids[index]).unwrap();
            let after = snapshot(&db, product.id);

            // at most one step in progress
            assert_single_active_step(&after);

            // the lowest pending step is the one started
            if let CascadeOutcome::Advanced { next_step_id } = cascade.outcome {
                assert_eq!(Some(next_step_id), lowest_pending, "order {order:?}");
            }

            // finalized exactly when every step is done
            let all_done = after.steps.iter().all(|s| s.status == StepStatus::Done);
            assert_eq!(
                after.status == ProductStatus::Finalized,
                all_done,
                "order {order:?}"
            );
            assert_eq!(all_done, position == order.len() - 1, "order {order:?}");
        }
    }
}

#[test]
fn test_missing_step_never_mutates() {
    let (_temp_file, mut db) = create_test_db();
    let names = ["a", "b"].map(String::from);
    let product = db.create_product("Bed", "", false, &names).unwrap();
    db.complete_step(product.steps[0].id).unwrap();
    let before = snapshot(&db, product.id);

    for missing in [0, 999, u64::from(u32::MAX)] {
        match db.complete_step(missing) {
            Err(ShopError::StepNotFound { id }) => assert_eq!(id, missing),
            other => panic!("Expected StepNotFound, got {other:?}"),
        }
    }

    assert_eq!(snapshot(&db, product.id), before);
    assert_eq!(
        step_statuses(&db, product.id),
        vec![StepStatus::Done, StepStatus::InProgress]
    );
}

#[tokio::test]
async fn test_blank_names_never_succeed() {
    let (_temp_dir, workshop) = create_test_workshop().await;

    for params in [
        product_with_steps("", &[]),
        product_with_steps("   ", &["cut"]),
        product_with_steps("Desk", &["cut", ""]),
    ] {
        assert!(matches!(
            workshop.create_product(&params).await,
            Err(ShopError::InvalidInput { .. })
        ));
    }

    let product = workshop
        .create_product(&product_with_steps("Desk", &[]))
        .await
        .unwrap();
    let blank_step = workshop
        .add_step(&StepCreate {
            product_id: product.id,
            name: "\n".to_string(),
        })
        .await;
    assert!(matches!(blank_step, Err(ShopError::InvalidInput { .. })));

    let products = workshop
        .list_products(&Default::default())
        .await
        .unwrap();
    assert_eq!(products.len(), 1);
    assert!(products[0].steps.is_empty());
}

#[tokio::test]
async fn test_steps_added_later_join_the_queue() {
    let (_temp_dir, workshop) = create_test_workshop().await;
    let product = workshop
        .create_product(&product_with_steps("Lamp", &["wire"]))
        .await
        .unwrap();
    let extra = workshop
        .add_step(&StepCreate {
            product_id: product.id,
            name: "shade".to_string(),
        })
        .await
        .unwrap();

    let cascade = workshop
        .complete_step(&Id {
            id: product.steps[0].id,
        })
        .await
        .unwrap();
    assert_eq!(
        cascade.outcome,
        CascadeOutcome::Advanced {
            next_step_id: extra.id
        }
    );
}
