//! Inventory stock-mutation invariants
//!
//! Exercises the repositories against an in-memory SQLite database with
//! migrations applied: the stock level never goes negative, removal
//! failures leave the record untouched, and the low-stock / below-threshold
//! queries keep their distinct semantics.

use catalog_server::db::repository::{RepoError, category, inventory, product};
use shared::error::ErrorCode;
use shared::models::{
    CategoryCreate, CategoryRef, Inventory, InventoryCreate, InventoryUpdate, Product,
    ProductCreate,
};
use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use std::str::FromStr;

async fn setup_pool() -> SqlitePool {
    let options = SqliteConnectOptions::from_str("sqlite::memory:")
        .unwrap()
        .pragma("foreign_keys", "ON");
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect_with(options)
        .await
        .unwrap();
    sqlx::migrate!("./migrations").run(&pool).await.unwrap();
    pool
}

async fn seed_product(pool: &SqlitePool, name: &str, sku: &str) -> Product {
    let cat = category::create(
        pool,
        CategoryCreate {
            name: format!("cat-{name}"),
            description: None,
        },
    )
    .await
    .unwrap();

    product::create(
        pool,
        ProductCreate {
            name: name.to_string(),
            description: None,
            price: 49.90,
            sku: Some(sku.to_string()),
            size: Some("M".to_string()),
            color: Some("indigo".to_string()),
            category: Some(CategoryRef { id: Some(cat.id) }),
        },
    )
    .await
    .unwrap()
}

async fn seed_inventory(pool: &SqlitePool, product_id: i64, stock: i64, reorder: i64) -> Inventory {
    inventory::create(
        pool,
        product_id,
        InventoryCreate {
            stock_level: stock,
            location: Some("warehouse-a".to_string()),
            reorder_level: Some(reorder),
        },
    )
    .await
    .unwrap()
}

#[tokio::test]
async fn create_defaults_stock_zero_and_reorder_ten() {
    let pool = setup_pool().await;
    let p = seed_product(&pool, "Basic Tee", "TEE-1").await;

    let inv = inventory::create(
        &pool,
        p.id,
        InventoryCreate {
            stock_level: 0,
            location: None,
            reorder_level: None,
        },
    )
    .await
    .unwrap();

    assert_eq!(inv.stock_level, 0);
    assert_eq!(inv.reorder_level, 10);
    assert_eq!(inv.product.id, p.id);
    assert!(inv.last_updated > 0);
}

#[tokio::test]
async fn create_for_missing_product_fails() {
    let pool = setup_pool().await;

    let err = inventory::create(
        &pool,
        424242,
        InventoryCreate {
            stock_level: 1,
            location: None,
            reorder_level: None,
        },
    )
    .await
    .unwrap_err();

    assert!(matches!(err, RepoError::Domain(ErrorCode::ProductNotFound, _)));
}

#[tokio::test]
async fn duplicate_inventory_rejected_and_original_untouched() {
    let pool = setup_pool().await;
    let p = seed_product(&pool, "Denim Jacket", "DJ-1").await;
    let original = seed_inventory(&pool, p.id, 7, 10).await;

    let err = inventory::create(
        &pool,
        p.id,
        InventoryCreate {
            stock_level: 99,
            location: Some("warehouse-b".to_string()),
            reorder_level: Some(3),
        },
    )
    .await
    .unwrap_err();
    assert!(matches!(err, RepoError::Domain(ErrorCode::InventoryExists, _)));

    let unchanged = inventory::find_by_product_id(&pool, p.id).await.unwrap().unwrap();
    assert_eq!(unchanged.id, original.id);
    assert_eq!(unchanged.stock_level, 7);
    assert_eq!(unchanged.location.as_deref(), Some("warehouse-a"));
}

#[tokio::test]
async fn add_then_remove_restores_original_level() {
    let pool = setup_pool().await;
    let p = seed_product(&pool, "Wool Scarf", "WS-1").await;
    let inv = seed_inventory(&pool, p.id, 12, 5).await;

    let after_add = inventory::add_stock(&pool, inv.id, 30).await.unwrap();
    assert_eq!(after_add.stock_level, 42);

    let after_remove = inventory::remove_stock(&pool, inv.id, 30).await.unwrap();
    assert_eq!(after_remove.stock_level, 12);
}

#[tokio::test]
async fn remove_more_than_available_fails_and_leaves_stock_unchanged() {
    let pool = setup_pool().await;
    let p = seed_product(&pool, "Linen Shirt", "LS-1").await;
    let inv = seed_inventory(&pool, p.id, 5, 10).await;

    let err = inventory::remove_stock(&pool, inv.id, 6).await.unwrap_err();
    match err {
        RepoError::Domain(ErrorCode::InsufficientStock, msg) => {
            assert_eq!(msg, "Insufficient stock. Available: 5, Requested: 6");
        }
        other => panic!("expected InsufficientStock, got {other:?}"),
    }

    let unchanged = inventory::find_by_id(&pool, inv.id).await.unwrap().unwrap();
    assert_eq!(unchanged.stock_level, 5);
}

#[tokio::test]
async fn remove_exact_stock_level_drains_to_zero() {
    let pool = setup_pool().await;
    let p = seed_product(&pool, "Canvas Belt", "CB-1").await;
    let inv = seed_inventory(&pool, p.id, 5, 2).await;

    let drained = inventory::remove_stock(&pool, inv.id, 5).await.unwrap();
    assert_eq!(drained.stock_level, 0);
}

#[tokio::test]
async fn negative_quantities_are_rejected() {
    let pool = setup_pool().await;
    let p = seed_product(&pool, "Rain Coat", "RC-1").await;
    let inv = seed_inventory(&pool, p.id, 5, 10).await;

    assert!(matches!(
        inventory::add_stock(&pool, inv.id, -1).await.unwrap_err(),
        RepoError::Validation(_)
    ));
    assert!(matches!(
        inventory::remove_stock(&pool, inv.id, -1).await.unwrap_err(),
        RepoError::Validation(_)
    ));
    assert!(matches!(
        inventory::set_stock_level(&pool, inv.id, -1).await.unwrap_err(),
        RepoError::Validation(_)
    ));

    // Guard order: validation fires before the not-found check
    assert!(matches!(
        inventory::set_stock_level(&pool, 424242, -1).await.unwrap_err(),
        RepoError::Validation(_)
    ));

    let unchanged = inventory::find_by_id(&pool, inv.id).await.unwrap().unwrap();
    assert_eq!(unchanged.stock_level, 5);
}

#[tokio::test]
async fn mutations_against_missing_record_are_not_found() {
    let pool = setup_pool().await;

    assert!(matches!(
        inventory::add_stock(&pool, 424242, 1).await.unwrap_err(),
        RepoError::Domain(ErrorCode::InventoryNotFound, _)
    ));
    assert!(matches!(
        inventory::remove_stock(&pool, 424242, 1).await.unwrap_err(),
        RepoError::Domain(ErrorCode::InventoryNotFound, _)
    ));
    assert!(matches!(
        inventory::set_stock_level(&pool, 424242, 1).await.unwrap_err(),
        RepoError::Domain(ErrorCode::InventoryNotFound, _)
    ));
    assert!(matches!(
        inventory::set_stock_level_by_product_id(&pool, 424242, 1)
            .await
            .unwrap_err(),
        RepoError::Domain(ErrorCode::InventoryNotFound, _)
    ));
    assert!(matches!(
        inventory::delete(&pool, 424242).await.unwrap_err(),
        RepoError::Domain(ErrorCode::InventoryNotFound, _)
    ));
}

#[tokio::test]
async fn set_stock_level_by_product_id_resolves_through_product() {
    let pool = setup_pool().await;
    let p = seed_product(&pool, "Puffer Vest", "PV-1").await;
    let inv = seed_inventory(&pool, p.id, 3, 10).await;

    let updated = inventory::set_stock_level_by_product_id(&pool, p.id, 40)
        .await
        .unwrap();
    assert_eq!(updated.id, inv.id);
    assert_eq!(updated.stock_level, 40);
}

#[tokio::test]
async fn update_overwrites_fields_verbatim() {
    let pool = setup_pool().await;
    let p = seed_product(&pool, "Twill Cap", "TC-1").await;
    let inv = seed_inventory(&pool, p.id, 9, 4).await;

    let updated = inventory::update(
        &pool,
        inv.id,
        InventoryUpdate {
            stock_level: 17,
            location: Some("warehouse-c".to_string()),
            reorder_level: 6,
        },
    )
    .await
    .unwrap();

    assert_eq!(updated.stock_level, 17);
    assert_eq!(updated.location.as_deref(), Some("warehouse-c"));
    assert_eq!(updated.reorder_level, 6);

    assert!(matches!(
        inventory::update(
            &pool,
            inv.id,
            InventoryUpdate {
                stock_level: -1,
                location: None,
                reorder_level: 6,
            },
        )
        .await
        .unwrap_err(),
        RepoError::Validation(_)
    ));
}

#[tokio::test]
async fn mutations_restamp_last_updated() {
    let pool = setup_pool().await;
    let p = seed_product(&pool, "Chino Pants", "CP-1").await;
    let inv = seed_inventory(&pool, p.id, 10, 5).await;

    tokio::time::sleep(std::time::Duration::from_millis(10)).await;

    let after = inventory::add_stock(&pool, inv.id, 1).await.unwrap();
    assert!(after.last_updated > inv.last_updated);
}

#[tokio::test]
async fn low_stock_is_inclusive_below_is_strict() {
    let pool = setup_pool().await;

    // stock == reorder == 10: low-stock includes it, below(10) does not
    let p1 = seed_product(&pool, "Boundary Hoodie", "BH-1").await;
    let at_reorder = seed_inventory(&pool, p1.id, 10, 10).await;

    let p2 = seed_product(&pool, "Plenty Parka", "PP-1").await;
    let plenty = seed_inventory(&pool, p2.id, 50, 10).await;

    let p3 = seed_product(&pool, "Scarce Socks", "SS-1").await;
    let scarce = seed_inventory(&pool, p3.id, 2, 10).await;

    let low: Vec<i64> = inventory::find_low_stock(&pool)
        .await
        .unwrap()
        .into_iter()
        .map(|r| r.id)
        .collect();
    assert!(low.contains(&at_reorder.id));
    assert!(low.contains(&scarce.id));
    assert!(!low.contains(&plenty.id));

    let below: Vec<i64> = inventory::find_below_stock_level(&pool, 10)
        .await
        .unwrap()
        .into_iter()
        .map(|r| r.id)
        .collect();
    assert!(!below.contains(&at_reorder.id), "strict threshold must exclude stock == t");
    assert!(below.contains(&scarce.id));
    assert!(!below.contains(&plenty.id));
}

#[tokio::test]
async fn low_stock_walkthrough() {
    let pool = setup_pool().await;
    let p = seed_product(&pool, "Varsity Jacket", "SKU1").await;
    let inv = seed_inventory(&pool, p.id, 5, 10).await;

    // 5 <= 10: listed as low stock
    let low = inventory::find_low_stock(&pool).await.unwrap();
    assert!(low.iter().any(|r| r.id == inv.id));

    // Restock to 25: drops off the low-stock list
    let restocked = inventory::add_stock(&pool, inv.id, 20).await.unwrap();
    assert_eq!(restocked.stock_level, 25);
    let low = inventory::find_low_stock(&pool).await.unwrap();
    assert!(!low.iter().any(|r| r.id == inv.id));

    // Removing 30 fails and leaves the level at 25
    let err = inventory::remove_stock(&pool, inv.id, 30).await.unwrap_err();
    assert!(matches!(err, RepoError::Domain(ErrorCode::InsufficientStock, _)));
    let unchanged = inventory::find_by_id(&pool, inv.id).await.unwrap().unwrap();
    assert_eq!(unchanged.stock_level, 25);
}

#[tokio::test]
async fn find_by_location_is_exact_match() {
    let pool = setup_pool().await;

    let p1 = seed_product(&pool, "Utility Jacket", "UJ-1").await;
    let a = seed_inventory(&pool, p1.id, 5, 10).await; // warehouse-a

    let p2 = seed_product(&pool, "Slim Jeans", "SJ-1").await;
    let b = inventory::create(
        &pool,
        p2.id,
        InventoryCreate {
            stock_level: 5,
            location: Some("warehouse-a-annex".to_string()),
            reorder_level: None,
        },
    )
    .await
    .unwrap();

    let found = inventory::find_by_location(&pool, "warehouse-a").await.unwrap();
    assert!(found.iter().any(|r| r.id == a.id));
    assert!(!found.iter().any(|r| r.id == b.id));
}

#[tokio::test]
async fn delete_removes_record() {
    let pool = setup_pool().await;
    let p = seed_product(&pool, "Knit Beanie", "KB-1").await;
    let inv = seed_inventory(&pool, p.id, 5, 10).await;

    inventory::delete(&pool, inv.id).await.unwrap();
    assert!(inventory::find_by_id(&pool, inv.id).await.unwrap().is_none());
}
