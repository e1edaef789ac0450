//! Data models
//!
//! Shared between catalog-server and frontend (via API).
//! DB row types use `#[cfg_attr(feature = "db", derive(sqlx::FromRow))]`.
//! All IDs are `i64` (snowflake-style, SQLite INTEGER PRIMARY KEY).
//! All wire JSON is camelCase — the field names (`stockLevel`,
//! `reorderLevel`, `createdAt`, ...) are part of the API contract.

pub mod category;
pub mod inventory;
pub mod product;

// Re-exports
pub use category::*;
pub use inventory::*;
pub use product::*;
