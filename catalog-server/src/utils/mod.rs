//! 工具模块 - 通用工具函数和类型
//!
//! # 内容
//!
//! - [`AppError`] / [`ApiResponse`] - 应用错误类型 (from shared::error)
//! - 校验辅助函数
//! - 日志等工具

pub mod logger;
pub mod result;
pub mod validation;

// Re-export error types from shared
pub use result::AppResult;
pub use shared::error::{ApiResponse, AppError, ErrorCategory, ErrorCode};
