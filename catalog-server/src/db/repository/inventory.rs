//! Inventory Repository
//!
//! Stock mutations are single UPDATE statements so concurrent callers
//! cannot interleave a read-modify-write. `remove_stock` carries the
//! non-negative guard in its WHERE clause: the decrement and the check
//! are one atomic statement, and zero affected rows is disambiguated
//! into "not found" vs "insufficient stock" by a follow-up point read.

use super::{RepoError, RepoResult};
use shared::error::ErrorCode;
use shared::models::{
    DEFAULT_REORDER_LEVEL, Inventory, InventoryCreate, InventoryRow, InventoryUpdate,
};
use sqlx::SqlitePool;

const INVENTORY_WITH_PRODUCT_SELECT: &str = "SELECT i.id, i.stock_level, i.location, i.reorder_level, i.last_updated, p.id as product_id, p.name as product_name, p.description as product_description, p.price, p.sku, p.size, p.color, p.created_at as product_created_at, p.updated_at as product_updated_at, c.id as category_id, c.name as category_name, c.description as category_description, c.created_at as category_created_at, c.updated_at as category_updated_at FROM inventory i JOIN product p ON i.product_id = p.id JOIN category c ON p.category_id = c.id";

fn rows_to_inventory(rows: Vec<InventoryRow>) -> Vec<Inventory> {
    rows.into_iter().map(Inventory::from).collect()
}

pub async fn find_all(pool: &SqlitePool) -> RepoResult<Vec<Inventory>> {
    let sql = format!("{} ORDER BY p.name", INVENTORY_WITH_PRODUCT_SELECT);
    let rows = sqlx::query_as::<_, InventoryRow>(&sql)
        .fetch_all(pool)
        .await?;
    Ok(rows_to_inventory(rows))
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<Inventory>> {
    let sql = format!("{} WHERE i.id = ?", INVENTORY_WITH_PRODUCT_SELECT);
    let row = sqlx::query_as::<_, InventoryRow>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(row.map(Inventory::from))
}

pub async fn find_by_product_id(pool: &SqlitePool, product_id: i64) -> RepoResult<Option<Inventory>> {
    let sql = format!("{} WHERE i.product_id = ?", INVENTORY_WITH_PRODUCT_SELECT);
    let row = sqlx::query_as::<_, InventoryRow>(&sql)
        .bind(product_id)
        .fetch_optional(pool)
        .await?;
    Ok(row.map(Inventory::from))
}

pub async fn create(
    pool: &SqlitePool,
    product_id: i64,
    data: InventoryCreate,
) -> RepoResult<Inventory> {
    let product_exists: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM product WHERE id = ?")
        .bind(product_id)
        .fetch_one(pool)
        .await?;
    if product_exists == 0 {
        return Err(RepoError::Domain(
            ErrorCode::ProductNotFound,
            format!("Product not found with id: {product_id}"),
        ));
    }

    // One inventory record per product
    if find_by_product_id(pool, product_id).await?.is_some() {
        return Err(RepoError::Domain(
            ErrorCode::InventoryExists,
            format!("Inventory already exists for product with id: {product_id}"),
        ));
    }

    if data.stock_level < 0 {
        return Err(RepoError::Validation("Stock level cannot be negative".into()));
    }

    let now = shared::util::now_millis();
    let id = shared::util::snowflake_id();
    sqlx::query(
        "INSERT INTO inventory (id, product_id, stock_level, location, reorder_level, last_updated) VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
    )
    .bind(id)
    .bind(product_id)
    .bind(data.stock_level)
    .bind(&data.location)
    .bind(data.reorder_level.unwrap_or(DEFAULT_REORDER_LEVEL))
    .bind(now)
    .execute(pool)
    .await?;

    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create inventory".into()))
}

pub async fn update(pool: &SqlitePool, id: i64, data: InventoryUpdate) -> RepoResult<Inventory> {
    if data.stock_level < 0 {
        return Err(RepoError::Validation("Stock level cannot be negative".into()));
    }

    let now = shared::util::now_millis();
    let rows = sqlx::query(
        "UPDATE inventory SET stock_level = ?1, location = ?2, reorder_level = ?3, last_updated = ?4 WHERE id = ?5",
    )
    .bind(data.stock_level)
    .bind(&data.location)
    .bind(data.reorder_level)
    .bind(now)
    .bind(id)
    .execute(pool)
    .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::Domain(
            ErrorCode::InventoryNotFound,
            format!("Inventory not found with id: {id}"),
        ));
    }

    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to reload inventory".into()))
}

pub async fn set_stock_level(pool: &SqlitePool, id: i64, new_level: i64) -> RepoResult<Inventory> {
    if new_level < 0 {
        return Err(RepoError::Validation("Stock level cannot be negative".into()));
    }

    let now = shared::util::now_millis();
    let rows = sqlx::query(
        "UPDATE inventory SET stock_level = ?1, last_updated = ?2 WHERE id = ?3",
    )
    .bind(new_level)
    .bind(now)
    .bind(id)
    .execute(pool)
    .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::Domain(
            ErrorCode::InventoryNotFound,
            format!("Inventory not found with id: {id}"),
        ));
    }

    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to reload inventory".into()))
}

pub async fn set_stock_level_by_product_id(
    pool: &SqlitePool,
    product_id: i64,
    new_level: i64,
) -> RepoResult<Inventory> {
    if new_level < 0 {
        return Err(RepoError::Validation("Stock level cannot be negative".into()));
    }

    let now = shared::util::now_millis();
    let rows = sqlx::query(
        "UPDATE inventory SET stock_level = ?1, last_updated = ?2 WHERE product_id = ?3",
    )
    .bind(new_level)
    .bind(now)
    .bind(product_id)
    .execute(pool)
    .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::Domain(
            ErrorCode::InventoryNotFound,
            format!("Inventory not found for product with id: {product_id}"),
        ));
    }

    find_by_product_id(pool, product_id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to reload inventory".into()))
}

/// Atomically increment the stock level; no upper bound
pub async fn add_stock(pool: &SqlitePool, id: i64, quantity: i64) -> RepoResult<Inventory> {
    if quantity < 0 {
        return Err(RepoError::Validation("Quantity to add cannot be negative".into()));
    }

    let now = shared::util::now_millis();
    let rows = sqlx::query(
        "UPDATE inventory SET stock_level = stock_level + ?1, last_updated = ?2 WHERE id = ?3",
    )
    .bind(quantity)
    .bind(now)
    .bind(id)
    .execute(pool)
    .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::Domain(
            ErrorCode::InventoryNotFound,
            format!("Inventory not found with id: {id}"),
        ));
    }

    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to reload inventory".into()))
}

/// Atomically decrement the stock level, refusing to go below zero.
///
/// The `stock_level >= quantity` guard lives in the WHERE clause: two
/// concurrent removals against the same record serialize on the row and
/// the loser sees zero affected rows instead of a negative stock level.
pub async fn remove_stock(pool: &SqlitePool, id: i64, quantity: i64) -> RepoResult<Inventory> {
    if quantity < 0 {
        return Err(RepoError::Validation("Quantity to remove cannot be negative".into()));
    }

    let now = shared::util::now_millis();
    let rows = sqlx::query(
        "UPDATE inventory SET stock_level = stock_level - ?1, last_updated = ?2 WHERE id = ?3 AND stock_level >= ?1",
    )
    .bind(quantity)
    .bind(now)
    .bind(id)
    .execute(pool)
    .await?;

    if rows.rows_affected() == 0 {
        // Either the record is missing or the guard refused the decrement
        return match find_by_id(pool, id).await? {
            Some(existing) => Err(RepoError::Domain(
                ErrorCode::InsufficientStock,
                format!(
                    "Insufficient stock. Available: {}, Requested: {}",
                    existing.stock_level, quantity
                ),
            )),
            None => Err(RepoError::Domain(
                ErrorCode::InventoryNotFound,
                format!("Inventory not found with id: {id}"),
            )),
        };
    }

    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to reload inventory".into()))
}

pub async fn delete(pool: &SqlitePool, id: i64) -> RepoResult<()> {
    let rows = sqlx::query("DELETE FROM inventory WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::Domain(
            ErrorCode::InventoryNotFound,
            format!("Inventory not found with id: {id}"),
        ));
    }
    Ok(())
}

/// Records at or below their own reorder level (inclusive threshold)
pub async fn find_low_stock(pool: &SqlitePool) -> RepoResult<Vec<Inventory>> {
    let sql = format!(
        "{} WHERE i.stock_level <= i.reorder_level ORDER BY i.stock_level",
        INVENTORY_WITH_PRODUCT_SELECT
    );
    let rows = sqlx::query_as::<_, InventoryRow>(&sql)
        .fetch_all(pool)
        .await?;
    Ok(rows_to_inventory(rows))
}

/// Records strictly below the given threshold (not the reorder level)
pub async fn find_below_stock_level(
    pool: &SqlitePool,
    threshold: i64,
) -> RepoResult<Vec<Inventory>> {
    let sql = format!(
        "{} WHERE i.stock_level < ? ORDER BY i.stock_level",
        INVENTORY_WITH_PRODUCT_SELECT
    );
    let rows = sqlx::query_as::<_, InventoryRow>(&sql)
        .bind(threshold)
        .fetch_all(pool)
        .await?;
    Ok(rows_to_inventory(rows))
}

pub async fn find_by_location(pool: &SqlitePool, location: &str) -> RepoResult<Vec<Inventory>> {
    let sql = format!(
        "{} WHERE i.location = ? ORDER BY p.name",
        INVENTORY_WITH_PRODUCT_SELECT
    );
    let rows = sqlx::query_as::<_, InventoryRow>(&sql)
        .bind(location)
        .fetch_all(pool)
        .await?;
    Ok(rows_to_inventory(rows))
}
