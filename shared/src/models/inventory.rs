//! Inventory Model
//!
//! One inventory record per product (one-to-one). `stock_level` never goes
//! negative; `last_updated` is re-stamped on every create/mutation.

use super::category::Category;
use super::product::Product;
use serde::{Deserialize, Serialize};

/// Default reorder threshold when the caller leaves it unset
pub const DEFAULT_REORDER_LEVEL: i64 = 10;

/// Inventory record with its product (and the product's category) embedded
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Inventory {
    pub id: i64,
    pub product: Product,
    /// Current available quantity; >= 0 always
    pub stock_level: i64,
    pub location: Option<String>,
    /// At or below this level the record counts as low stock
    pub reorder_level: i64,
    pub last_updated: i64,
}

/// Flat JOIN row (inventory + product + category columns)
#[derive(Debug, Clone)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct InventoryRow {
    pub id: i64,
    pub stock_level: i64,
    pub location: Option<String>,
    pub reorder_level: i64,
    pub last_updated: i64,
    pub product_id: i64,
    pub product_name: String,
    pub product_description: Option<String>,
    pub price: f64,
    pub sku: Option<String>,
    pub size: Option<String>,
    pub color: Option<String>,
    pub product_created_at: i64,
    pub product_updated_at: i64,
    pub category_id: i64,
    pub category_name: String,
    pub category_description: Option<String>,
    pub category_created_at: i64,
    pub category_updated_at: i64,
}

impl From<InventoryRow> for Inventory {
    fn from(row: InventoryRow) -> Self {
        Self {
            id: row.id,
            product: Product {
                id: row.product_id,
                name: row.product_name,
                description: row.product_description,
                price: row.price,
                sku: row.sku,
                size: row.size,
                color: row.color,
                category: Category {
                    id: row.category_id,
                    name: row.category_name,
                    description: row.category_description,
                    created_at: row.category_created_at,
                    updated_at: row.category_updated_at,
                },
                created_at: row.product_created_at,
                updated_at: row.product_updated_at,
            },
            stock_level: row.stock_level,
            location: row.location,
            reorder_level: row.reorder_level,
            last_updated: row.last_updated,
        }
    }
}

/// Create inventory payload (the product comes from the URL path)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryCreate {
    #[serde(default)]
    pub stock_level: i64,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub reorder_level: Option<i64>,
}

/// Update inventory payload — stock level, location and reorder level are
/// overwritten verbatim
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryUpdate {
    pub stock_level: i64,
    #[serde(default)]
    pub location: Option<String>,
    pub reorder_level: i64,
}
