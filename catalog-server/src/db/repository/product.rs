//! Product Repository

use super::{RepoError, RepoResult};
use shared::error::ErrorCode;
use shared::models::{CategoryRef, Product, ProductCreate, ProductRow, ProductSearch, ProductUpdate};
use sqlx::SqlitePool;

const PRODUCT_WITH_CATEGORY_SELECT: &str = "SELECT p.id, p.name, p.description, p.price, p.sku, p.size, p.color, p.created_at, p.updated_at, c.id as category_id, c.name as category_name, c.description as category_description, c.created_at as category_created_at, c.updated_at as category_updated_at FROM product p JOIN category c ON p.category_id = c.id";

fn rows_to_products(rows: Vec<ProductRow>) -> Vec<Product> {
    rows.into_iter().map(Product::from).collect()
}

pub async fn find_all(pool: &SqlitePool) -> RepoResult<Vec<Product>> {
    let sql = format!("{} ORDER BY p.name", PRODUCT_WITH_CATEGORY_SELECT);
    let rows = sqlx::query_as::<_, ProductRow>(&sql).fetch_all(pool).await?;
    Ok(rows_to_products(rows))
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<Product>> {
    let sql = format!("{} WHERE p.id = ?", PRODUCT_WITH_CATEGORY_SELECT);
    let row = sqlx::query_as::<_, ProductRow>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(row.map(Product::from))
}

pub async fn find_by_sku(pool: &SqlitePool, sku: &str) -> RepoResult<Option<Product>> {
    let sql = format!("{} WHERE p.sku = ? LIMIT 1", PRODUCT_WITH_CATEGORY_SELECT);
    let row = sqlx::query_as::<_, ProductRow>(&sql)
        .bind(sku)
        .fetch_optional(pool)
        .await?;
    Ok(row.map(Product::from))
}

/// Resolve the category reference on a create/update payload.
///
/// Absent reference (or reference without id) is a validation failure;
/// a reference to a missing row is a not-found failure.
async fn resolve_category_id(
    pool: &SqlitePool,
    category: &Option<CategoryRef>,
) -> RepoResult<i64> {
    let category_id = category
        .as_ref()
        .and_then(|c| c.id)
        .ok_or_else(|| RepoError::Validation("Category is required for product".into()))?;

    let exists: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM category WHERE id = ?")
        .bind(category_id)
        .fetch_one(pool)
        .await?;
    if exists == 0 {
        return Err(RepoError::Domain(
            ErrorCode::CategoryNotFound,
            format!("Category not found with id: {category_id}"),
        ));
    }
    Ok(category_id)
}

/// Non-empty SKU must be unique; `exclude_id` skips the product being updated
async fn check_sku_unique(
    pool: &SqlitePool,
    sku: &str,
    exclude_id: Option<i64>,
) -> RepoResult<()> {
    let count: i64 = match exclude_id {
        Some(id) => {
            sqlx::query_scalar("SELECT COUNT(*) FROM product WHERE sku = ? AND id != ?")
                .bind(sku)
                .bind(id)
                .fetch_one(pool)
                .await?
        }
        None => {
            sqlx::query_scalar("SELECT COUNT(*) FROM product WHERE sku = ?")
                .bind(sku)
                .fetch_one(pool)
                .await?
        }
    };
    if count > 0 {
        return Err(RepoError::Domain(
            ErrorCode::ProductSkuExists,
            format!("Product with SKU '{sku}' already exists"),
        ));
    }
    Ok(())
}

pub async fn create(pool: &SqlitePool, data: ProductCreate) -> RepoResult<Product> {
    let category_id = resolve_category_id(pool, &data.category).await?;

    if let Some(ref sku) = data.sku
        && !sku.is_empty()
    {
        check_sku_unique(pool, sku, None).await?;
    }

    let now = shared::util::now_millis();
    let id = shared::util::snowflake_id();
    sqlx::query(
        "INSERT INTO product (id, name, description, price, sku, size, color, category_id, created_at, updated_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?9)",
    )
    .bind(id)
    .bind(&data.name)
    .bind(&data.description)
    .bind(data.price)
    .bind(&data.sku)
    .bind(&data.size)
    .bind(&data.color)
    .bind(category_id)
    .bind(now)
    .execute(pool)
    .await?;

    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create product".into()))
}

pub async fn update(pool: &SqlitePool, id: i64, data: ProductUpdate) -> RepoResult<Product> {
    let existing = find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Product not found with id: {id}")))?;

    // Re-point the category only when the payload carries a resolvable reference
    let category_id = match data.category.as_ref().and_then(|c| c.id) {
        Some(_) => resolve_category_id(pool, &data.category).await?,
        None => existing.category.id,
    };

    // Re-check SKU uniqueness against all other products when it changed
    if let Some(ref sku) = data.sku
        && !sku.is_empty()
        && data.sku != existing.sku
    {
        check_sku_unique(pool, sku, Some(id)).await?;
    }

    let now = shared::util::now_millis();
    let rows = sqlx::query(
        "UPDATE product SET name = ?1, description = ?2, price = ?3, sku = ?4, size = ?5, color = ?6, category_id = ?7, updated_at = ?8 WHERE id = ?9",
    )
    .bind(&data.name)
    .bind(&data.description)
    .bind(data.price)
    .bind(&data.sku)
    .bind(&data.size)
    .bind(&data.color)
    .bind(category_id)
    .bind(now)
    .bind(id)
    .execute(pool)
    .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Product not found with id: {id}")));
    }

    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Product not found with id: {id}")))
}

/// Delete a product and its inventory record (if any) in one transaction
pub async fn delete(pool: &SqlitePool, id: i64) -> RepoResult<()> {
    let mut tx = pool.begin().await?;

    sqlx::query("DELETE FROM inventory WHERE product_id = ?")
        .bind(id)
        .execute(&mut *tx)
        .await?;

    let rows = sqlx::query("DELETE FROM product WHERE id = ?")
        .bind(id)
        .execute(&mut *tx)
        .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Product not found with id: {id}")));
    }

    tx.commit().await?;
    Ok(())
}

// ── Search and filter queries ───────────────────────────────────────

pub async fn search_by_name(pool: &SqlitePool, name: &str) -> RepoResult<Vec<Product>> {
    let pattern = format!("%{}%", name.to_lowercase());
    let sql = format!(
        "{} WHERE lower(p.name) LIKE ? ORDER BY p.name",
        PRODUCT_WITH_CATEGORY_SELECT
    );
    let rows = sqlx::query_as::<_, ProductRow>(&sql)
        .bind(&pattern)
        .fetch_all(pool)
        .await?;
    Ok(rows_to_products(rows))
}

pub async fn find_by_category(pool: &SqlitePool, category_id: i64) -> RepoResult<Vec<Product>> {
    let sql = format!(
        "{} WHERE p.category_id = ? ORDER BY p.name",
        PRODUCT_WITH_CATEGORY_SELECT
    );
    let rows = sqlx::query_as::<_, ProductRow>(&sql)
        .bind(category_id)
        .fetch_all(pool)
        .await?;
    Ok(rows_to_products(rows))
}

pub async fn find_by_category_name(
    pool: &SqlitePool,
    category_name: &str,
) -> RepoResult<Vec<Product>> {
    let sql = format!(
        "{} WHERE c.name = ? ORDER BY p.name",
        PRODUCT_WITH_CATEGORY_SELECT
    );
    let rows = sqlx::query_as::<_, ProductRow>(&sql)
        .bind(category_name)
        .fetch_all(pool)
        .await?;
    Ok(rows_to_products(rows))
}

/// Inclusive price bounds
pub async fn find_by_price_range(
    pool: &SqlitePool,
    min_price: f64,
    max_price: f64,
) -> RepoResult<Vec<Product>> {
    let sql = format!(
        "{} WHERE p.price >= ?1 AND p.price <= ?2 ORDER BY p.price",
        PRODUCT_WITH_CATEGORY_SELECT
    );
    let rows = sqlx::query_as::<_, ProductRow>(&sql)
        .bind(min_price)
        .bind(max_price)
        .fetch_all(pool)
        .await?;
    Ok(rows_to_products(rows))
}

pub async fn find_by_size(pool: &SqlitePool, size: &str) -> RepoResult<Vec<Product>> {
    let sql = format!(
        "{} WHERE p.size = ? ORDER BY p.name",
        PRODUCT_WITH_CATEGORY_SELECT
    );
    let rows = sqlx::query_as::<_, ProductRow>(&sql)
        .bind(size)
        .fetch_all(pool)
        .await?;
    Ok(rows_to_products(rows))
}

pub async fn find_by_color(pool: &SqlitePool, color: &str) -> RepoResult<Vec<Product>> {
    let sql = format!(
        "{} WHERE p.color = ? ORDER BY p.name",
        PRODUCT_WITH_CATEGORY_SELECT
    );
    let rows = sqlx::query_as::<_, ProductRow>(&sql)
        .bind(color)
        .fetch_all(pool)
        .await?;
    Ok(rows_to_products(rows))
}

/// Combined search: every supplied filter is ANDed, absent filters
/// impose no constraint. Name is a case-insensitive substring match,
/// size/color are exact, price bounds are inclusive.
pub async fn search(pool: &SqlitePool, filters: &ProductSearch) -> RepoResult<Vec<Product>> {
    let name_pattern = filters
        .name
        .as_ref()
        .map(|n| format!("%{}%", n.to_lowercase()));
    let sql = format!(
        "{} WHERE (?1 IS NULL OR lower(p.name) LIKE ?1) \
         AND (?2 IS NULL OR p.category_id = ?2) \
         AND (?3 IS NULL OR p.price >= ?3) \
         AND (?4 IS NULL OR p.price <= ?4) \
         AND (?5 IS NULL OR p.size = ?5) \
         AND (?6 IS NULL OR p.color = ?6) \
         ORDER BY p.name",
        PRODUCT_WITH_CATEGORY_SELECT
    );
    let rows = sqlx::query_as::<_, ProductRow>(&sql)
        .bind(&name_pattern)
        .bind(filters.category_id)
        .bind(filters.min_price)
        .bind(filters.max_price)
        .bind(&filters.size)
        .bind(&filters.color)
        .fetch_all(pool)
        .await?;
    Ok(rows_to_products(rows))
}
