//! Shared types for the Stitch catalog backend
//!
//! Common types used across crates: wire models for the catalog API,
//! the unified error system, and small utilities (timestamps, IDs).

pub mod error;
pub mod models;
pub mod util;

// Re-exports
pub use http;
pub use serde::{Deserialize, Serialize};

pub use error::{ApiResponse, AppError, AppResult, ErrorCategory, ErrorCode};
