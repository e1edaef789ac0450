//! API 路由模块
//!
//! # 结构
//!
//! - [`health`] - 健康检查
//! - [`categories`] - 分类管理接口
//! - [`products`] - 商品管理接口
//! - [`inventory`] - 库存管理接口

pub mod categories;
pub mod health;
pub mod inventory;
pub mod products;

// Re-export common types for handlers
pub use crate::utils::AppResult;
