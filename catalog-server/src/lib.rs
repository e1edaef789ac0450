//! Stitch Catalog Server - 服装零售目录与库存管理后端
//!
//! # 架构概述
//!
//! 本模块是 Catalog Server 的主入口，提供以下核心功能：
//!
//! - **目录管理** (`api/categories`, `api/products`): 分类与商品的 CRUD 和多条件搜索
//! - **库存管理** (`api/inventory`): 库存水平变更、补货阈值查询、商品一对一绑定
//! - **数据库** (`db`): 嵌入式 SQLite 存储 (sqlx, WAL)
//!
//! # 模块结构
//!
//! ```text
//! catalog-server/src/
//! ├── core/          # 配置、状态、服务器
//! ├── api/           # HTTP 路由和处理器
//! ├── db/            # 数据库层 (连接池、仓储)
//! └── utils/         # 工具函数 (日志、校验)
//! ```

pub mod api;
pub mod core;
pub mod db;
pub mod utils;

// Re-export 公共类型
pub use crate::core::{Config, Server, ServerState};
pub use utils::{AppError, AppResult};

// Re-export logger functions
pub use utils::logger::{init_logger, init_logger_with_file};

/// 设置运行环境 (dotenv, 日志)
pub fn setup_environment() -> anyhow::Result<()> {
    // Load .env before anything reads the environment
    dotenv::dotenv().ok();

    let log_level = std::env::var("LOG_LEVEL").ok();
    let log_dir = std::env::var("LOG_DIR").ok();
    init_logger_with_file(log_level.as_deref(), log_dir.as_deref());

    Ok(())
}

pub fn print_banner() {
    println!(
        r#"
   _____ __  _ __       __
  / ___// /_(_) /______/ /_
  \__ \/ __/ / __/ ___/ __ \
 ___/ / /_/ / /_/ /__/ / / /
/____/\__/_/\__/\___/_/ /_/
    "#
    );
}
